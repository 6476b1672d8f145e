// src/scrape/targets.rs
use std::fmt::Display;

use crate::config::consts::{CATEGORY_PLACEHOLDER, GEO_PLACEHOLDER, PAGE_PLACEHOLDER};

/// One locator to walk, independent of pagination. `locator` still carries
/// the `{page}` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTarget {
    pub id: String,
    pub locator: String,
}

impl FetchTarget {
    pub fn new(id: impl Into<String>, locator: impl Into<String>) -> Self {
        Self { id: id.into(), locator: locator.into() }
    }

    /// Target over a plain page URL, paginated through a `page` query param.
    pub fn with_page_param(id: impl Into<String>, url: &str) -> Self {
        let sep = if url.contains('?') { '&' } else { '?' };
        Self::new(id, format!("{url}{sep}page={PAGE_PLACEHOLDER}"))
    }

    pub fn page_url(&self, page: u32) -> String {
        self.locator.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

/// Cartesian product of the two axes, geography outer, category inner, so
/// every run schedules targets in the same order.
pub fn enumerate<A: Display, B: Display>(tmpl: &str, geography: &[A], category: &[B]) -> Vec<FetchTarget> {
    let mut out = Vec::with_capacity(geography.len() * category.len());
    for g in geography {
        let g = g.to_string();
        let by_geo = tmpl.replace(GEO_PLACEHOLDER, &g);
        for c in category {
            let c = c.to_string();
            out.push(FetchTarget::new(
                format!("{g}/{c}"),
                by_geo.replace(CATEGORY_PLACEHOLDER, &c),
            ));
        }
    }
    out
}
