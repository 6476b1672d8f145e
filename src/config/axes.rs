// src/config/axes.rs
//
// Static query axes (geography x category), kept outside the binary so the
// identifier lists can be refreshed without a rebuild.
//
//   geography = [1001, 1002, "2008"]
//   category  = [1004, 1009]

use std::{error::Error, fmt, fs, path::Path};

use serde::Deserialize;

/// Axis entries are opaque; TOML may spell them as integers or strings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AxisKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for AxisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKey::Int(n) => write!(f, "{n}"),
            AxisKey::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Axes {
    pub geography: Vec<AxisKey>,
    pub category: Vec<AxisKey>,
}

impl Axes {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read axes file {}: {e}", path.display()))?;
        Ok(Self::parse(&text)?)
    }
}
