// src/scrape/paginate.rs
use tracing::{debug, warn};

use crate::core::{Fetch, FetchError};
use super::targets::FetchTarget;

/// One parsed page: its records and whether another page should be fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// Walk `target` from page 1 until a page says there is nothing more, and
/// concatenate the records in page order. Stops early (keeping what was read)
/// at `max_pages`. Any fetch or parse failure fails the whole target.
pub fn fetch_all<T, F, P>(
    fetcher: &F,
    target: &FetchTarget,
    max_pages: u32,
    mut parse: P,
) -> Result<Vec<T>, FetchError>
where
    F: Fetch + ?Sized,
    P: FnMut(&str, &str) -> Result<Page<T>, FetchError>,
{
    let mut out = Vec::new();
    for page in 1..=max_pages {
        let url = target.page_url(page);
        let body = fetcher.fetch(&url)?;
        let Page { items, has_more } = parse(&body, &url)?;
        debug!(id = %target.id, page, items = items.len(), has_more, "page fetched");
        out.extend(items);
        if !has_more {
            return Ok(out);
        }
    }
    warn!("{}: page cap {max_pages} reached, keeping {} records", target.id, out.len());
    Ok(out)
}
