// src/data.rs
//
// Record shapes for the two NDJSON logs and the rating-matrix projection.
//
// - VenueSummary: one listing-API entry, stored as delivered (unknown fields
//                 survive a round trip through `extra`).
// - ReviewBundle: one venue page + all of its reviews from one scrape pass.
// - RatingMatrixRow: derived at aggregation time, never logged.
//
// Every field that comes from a scraped page is best-effort: empty string,
// empty list, or UNRATED when the page did not show it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Star count for one rating dimension, 0..=5, or UNRATED.
pub type Stars = i8;

/// Dimension label absent from the page. Distinct from a rating of zero.
pub const UNRATED: Stars = -1;

/// Anything that carries a venue identity usable for checkpointing/joins.
pub trait Keyed {
    fn key(&self) -> Option<u64>;
}

/* ---------------- Venue log ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    #[serde(rename = "poiId", default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Site-relative venue page path.
    #[serde(rename = "urlUI", default)]
    pub url: Option<String>,
    /// Site-relative review listing path.
    #[serde(rename = "reviewUrlUI", default)]
    pub review_url: Option<String>,
    #[serde(rename = "shortenUrl", default)]
    pub short_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Keyed for VenueSummary {
    fn key(&self) -> Option<u64> {
        nonzero(self.venue_id).or_else(|| self.url.as_deref().and_then(id_from_slug))
    }
}

/* ---------------- Review log ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayHours {
    pub days: String,
    pub hours: Vec<String>,
}

/// Venue page as extracted from its HTML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueRecord {
    #[serde(deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<u64>,
    pub webpage_url: String,
    pub name: String,
    pub alt_name: String,
    pub district: String,
    pub address: String,
    pub transport: String,
    pub seat_count: String,
    pub overall_score: String,
    pub good_ok_bad: Vec<String>,
    pub price_range: String,
    pub categories: Vec<String>,
    pub telephones: Vec<String>,
    pub additional_info: String,
    pub payment_methods: Vec<String>,
    pub other_conditions: Vec<String>,
    pub bookmark_count: String,
    pub opening_hours: Vec<DayHours>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ratings {
    pub taste: Stars,
    pub decor: Stars,
    pub service: Stars,
    pub hygiene: Stars,
    pub value: Stars,
}

impl Default for Ratings {
    fn default() -> Self {
        Self { taste: UNRATED, decor: UNRATED, service: UNRATED, hygiene: UNRATED, value: UNRATED }
    }
}

impl Ratings {
    pub fn dimensions(&self) -> [Stars; 5] {
        [self.taste, self.decor, self.service, self.hygiene, self.value]
    }

    /// Mean of the rated dimensions, rounded to one decimal.
    /// None when every dimension is UNRATED.
    pub fn score(&self) -> Option<f64> {
        let rated: Vec<f64> = self
            .dimensions()
            .into_iter()
            .filter(|&s| s >= 0)
            .map(f64::from)
            .collect();
        if rated.is_empty() {
            return None;
        }
        let mean = rated.iter().sum::<f64>() / rated.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitInfo {
    pub date: String,
    pub meal_type: String,
    pub dining_method: String,
    pub spend_per_head: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewRecord {
    /// Reviewer profile link; carries `userid` in its query string.
    /// Absent for non-member reviews.
    pub user_link: Option<String>,
    pub user_name: String,
    pub user_level: String,
    pub user_review_count: String,
    pub title: String,
    pub comment: String,
    pub visit: VisitInfo,
    pub published: String,
    pub view_count: String,
    pub recommended_dishes: Vec<String>,
    pub ratings: Ratings,
    /// Review page the record was read from.
    pub page_url: String,
}

impl ReviewRecord {
    pub fn user_id(&self) -> Option<String> {
        self.user_link.as_deref().and_then(user_id_from_link)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewBundle {
    pub venue: VenueRecord,
    pub reviews: Vec<ReviewRecord>,
}

impl Keyed for ReviewBundle {
    fn key(&self) -> Option<u64> {
        nonzero(self.venue.venue_id).or_else(|| id_from_slug(&self.venue.webpage_url))
    }
}

/* ---------------- Matrix ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatingMatrixRow {
    #[serde(rename = "venueId")]
    pub venue_id: u64,
    #[serde(rename = "venueName")]
    pub venue_name: String,
    #[serde(rename = "venueShortUrl")]
    pub venue_short_url: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub rating: f64,
}

pub const MATRIX_HEADERS: [&str; 5] = ["venueId", "venueName", "venueShortUrl", "userId", "rating"];

/* ---------------- Identity helpers ---------------- */

fn nonzero(id: Option<u64>) -> Option<u64> {
    id.filter(|&n| n != 0)
}

/// `/en/hongkong/r-some-place-central-r12345` → 12345.
/// Last path segment, last `-` piece, leading `r` dropped.
pub fn id_from_slug(url: &str) -> Option<u64> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let slug = path.trim_end_matches('/').rsplit('/').next()?;
    let tail = slug.rsplit('-').next()?;
    tail.strip_prefix('r').unwrap_or(tail).parse().ok().filter(|&n| n != 0)
}

/// `userid` from the query string of a profile link. Everything after the
/// last `?` is treated as the query.
pub fn user_id_from_link(link: &str) -> Option<String> {
    let query = link.rsplit('?').next()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "userid")
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Ids arrive as numbers, numeric strings, or null depending on the source.
fn lenient_id<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_ids() {
        assert_eq!(id_from_slug("/en/hongkong/r-tasty-place-central-r12345"), Some(12345));
        assert_eq!(id_from_slug("https://x.test/en/r-a-r77/?tab=1"), Some(77));
        assert_eq!(id_from_slug("/en/hongkong/about"), None);
        assert_eq!(id_from_slug(""), None);
    }

    #[test]
    fn user_ids_from_profile_links() {
        assert_eq!(user_id_from_link("/en/gourmet/profile?lang=en&userid=12345").as_deref(), Some("12345"));
        assert_eq!(user_id_from_link("/en/gourmet/profile?lang=en"), None);
        assert_eq!(user_id_from_link("/en/gourmet/profile?userid="), None);
    }

    #[test]
    fn score_ignores_unrated_dimensions() {
        let r = Ratings { taste: 4, decor: 3, service: UNRATED, hygiene: 5, value: 4 };
        assert_eq!(r.score(), Some(4.0));
        assert_eq!(Ratings::default().score(), None);
        let zeros = Ratings { taste: 0, decor: 0, service: 0, hygiene: 0, value: 0 };
        assert_eq!(zeros.score(), Some(0.0));
        let third = Ratings { taste: 4, decor: 4, service: 5, ..Ratings::default() };
        assert_eq!(third.score(), Some(4.3));
    }

    #[test]
    fn venue_summary_keeps_unknown_fields_and_lenient_ids() {
        let line = r#"{"poiId":"42","name":"Cafe","urlUI":"/en/r-cafe-r42","shortenUrl":"https://s.test/x","score":4.5}"#;
        let v: VenueSummary = serde_json::from_str(line).unwrap();
        assert_eq!(v.key(), Some(42));
        assert_eq!(v.extra.get("score"), Some(&serde_json::json!(4.5)));
        let back = serde_json::to_value(&v).unwrap();
        assert_eq!(back["poiId"], serde_json::json!(42));
        assert_eq!(back["score"], serde_json::json!(4.5));
    }

    #[test]
    fn bundle_key_falls_back_to_slug() {
        let line = r#"{"venue":{"webpage_url":"https://x.test/en/r-noodles-r991"},"reviews":[]}"#;
        let b: ReviewBundle = serde_json::from_str(line).unwrap();
        assert_eq!(b.venue.venue_id, None);
        assert_eq!(b.key(), Some(991));
    }
}
