// src/engine/types.rs
use std::collections::HashMap;

use crate::data::{DayHours, Stars, UNRATED};

/* Declarative field rules */

/// How the elements a rule's selector matched become a field value.
#[derive(Clone, Copy, Debug)]
pub enum Transform {
    /// Text of every match concatenated, trimmed.
    Text,
    /// Attribute of the first match.
    Attr(&'static str),
    /// Trimmed text of each match.
    TextList,
    /// Direct child text of every match, skipping the listed child tags.
    OwnText(&'static [&'static str]),
    /// Text of the first child node of the first match.
    FirstNodeText,
    /// One entry per match: day label selector → time-range selector.
    Hours { day: &'static str, time: &'static str },
    /// Star count next to a labelled row. The rule's selector locates label
    /// rows, `label` is matched by partial text, `stars` is the adjacent
    /// block and `filled` the lit-star marker inside it. Only the first
    /// matching row counts, capped at five.
    Stars { label: &'static str, stars: &'static str, filled: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub selector: &'static str,
    pub transform: Transform,
}

pub type Ruleset = &'static [FieldRule];

/* Extraction output */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Attr(Option<String>),
    List(Vec<String>),
    Hours(Vec<DayHours>),
    Stars(Stars),
}

/// Best-effort field map. Accessors never fail: a field that is absent or
/// of another shape reads as its empty value (or UNRATED for stars).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extracted {
    pub(crate) values: HashMap<&'static str, FieldValue>,
}

impl Extracted {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> String {
        match self.values.get(field) {
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Attr(Some(s))) => s.clone(),
            _ => s!(),
        }
    }

    pub fn attr(&self, field: &str) -> Option<String> {
        match self.values.get(field) {
            Some(FieldValue::Attr(v)) => v.clone(),
            _ => None,
        }
    }

    pub fn list(&self, field: &str) -> Vec<String> {
        match self.values.get(field) {
            Some(FieldValue::List(v)) => v.clone(),
            _ => Vec::new(),
        }
    }

    pub fn hours(&self, field: &str) -> Vec<DayHours> {
        match self.values.get(field) {
            Some(FieldValue::Hours(v)) => v.clone(),
            _ => Vec::new(),
        }
    }

    pub fn stars(&self, field: &str) -> Stars {
        match self.values.get(field) {
            Some(FieldValue::Stars(n)) => *n,
            _ => UNRATED,
        }
    }
}
