// src/specs/listing.rs
//
// Listing API page → venue summaries. Payload shape:
//   { "searchResult": { "paginationResult": { "results": [ {...}, ... ] } } }
// An empty `results` array is the end-of-listing signal.

use serde_json::Value;
use tracing::warn;

use crate::core::FetchError;
use crate::data::VenueSummary;
use crate::scrape::Page;

pub fn parse_page(body: &str, url: &str) -> Result<Page<VenueSummary>, FetchError> {
    let payload = |reason: String| FetchError::Payload { url: s!(url), reason };

    let root: Value = serde_json::from_str(body).map_err(|e| payload(e.to_string()))?;
    let results = root
        .pointer("/searchResult/paginationResult/results")
        .and_then(Value::as_array)
        .ok_or_else(|| payload(s!("no searchResult.paginationResult.results array")))?;

    let mut items = Vec::with_capacity(results.len());
    for raw in results {
        match serde_json::from_value::<VenueSummary>(raw.clone()) {
            Ok(v) => items.push(v),
            Err(e) => warn!("{url}: dropping unreadable listing entry: {e}"),
        }
    }
    let has_more = !results.is_empty();
    Ok(Page { items, has_more })
}
