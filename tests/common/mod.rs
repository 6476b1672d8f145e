// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use venue_scrape::config::options::HarvestOptions;
use venue_scrape::core::{Fetch, FetchError};

pub const BASE: &str = "https://site.test";
pub const LISTING: &str = "https://site.test/api?geo={geo}&cat={category}&page={page}";

/// In-memory fetcher. Unknown URLs and URLs marked failing answer 503.
#[derive(Default)]
pub struct Scripted {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    calls: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn fail(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl Fetch for Scripted {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(FetchError::Status { url: url.to_string(), status: 503 });
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status { url: url.to_string(), status: 404 })
    }
}

pub fn options(dir: &Path) -> HarvestOptions {
    HarvestOptions {
        base_url: BASE.to_string(),
        listing_tmpl: LISTING.to_string(),
        batch_size: 15,
        max_pages: 50,
        venues_log: dir.join("restaurants.ndjson"),
        reviews_log: dir.join("restaurantReviews.ndjson"),
    }
}

pub fn listing_url(geo: &str, cat: &str, page: u32) -> String {
    format!("{BASE}/api?geo={geo}&cat={cat}&page={page}")
}

/// Listing payload with one entry per id; venue `n` lives at `/en/r-v{n}-r{n}`.
pub fn listing_body(ids: &[u64]) -> String {
    let results: Vec<String> = ids
        .iter()
        .map(|n| {
            format!(
                r#"{{"poiId":{n},"name":"Venue {n}","urlUI":"/en/r-v{n}-r{n}","reviewUrlUI":"/en/r-v{n}-r{n}/reviews","shortenUrl":"https://s.test/{n}"}}"#
            )
        })
        .collect();
    format!(r#"{{"searchResult":{{"paginationResult":{{"results":[{}]}}}}}}"#, results.join(","))
}

pub fn venue_page_url(n: u64) -> String {
    format!("{BASE}/en/r-v{n}-r{n}")
}

pub fn review_page_url(n: u64, page: u32) -> String {
    format!("{BASE}/en/r-v{n}-r{n}/reviews?page={page}")
}

pub fn venue_html(name: &str) -> String {
    format!(r#"<html><body><div class="poi-name"><span class="name">{name}</span></div></body></html>"#)
}

/// One review fragment. `stars` lists (label, filled count).
pub fn review_html(user_id: Option<&str>, stars: &[(&str, usize)]) -> String {
    let author = match user_id {
        Some(id) => format!(r#"<a href="/en/gourmet/user?userid={id}"><span>u{id}</span></a>"#),
        None => "<span>Guest</span>".to_string(),
    };
    let rows: String = stars
        .iter()
        .map(|(label, n)| {
            let lit = r#"<span class="common_yellowstar_desktop"></span>"#.repeat(*n);
            format!(r#"<div class="row"><div class="name">{label}</div><div class="stars">{lit}</div></div>"#)
        })
        .collect();
    format!(r#"<div itemprop="review"><div itemprop="author">{author}</div><div class="review-scores">{rows}</div></div>"#)
}

pub fn review_page(fragments: &[String], more: bool) -> String {
    let marker = if more { r#"<div class="common_pagination_more_r_desktop">More</div>"# } else { "" };
    format!("<html><body>{}{marker}</body></html>", fragments.concat())
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
