// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Runtime knobs shared by every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestOptions {
    pub base_url: String,
    pub listing_tmpl: String,
    pub batch_size: usize,
    pub max_pages: u32,
    pub venues_log: PathBuf,
    pub reviews_log: PathBuf,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            listing_tmpl: s!(LISTING_URL_TMPL),
            batch_size: BATCH_SIZE,
            max_pages: MAX_PAGES,
            venues_log: PathBuf::from(VENUES_LOG),
            reviews_log: PathBuf::from(REVIEWS_LOG),
        }
    }
}

impl HarvestOptions {
    /// Resolve a site-relative path (`/en/hongkong/r-...`) against the base URL.
    /// Absolute URLs pass through.
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return s!(path);
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
