// src/specs/reviews.rs
//
// Review listing page (`<review path>?page=N`). Each `div[itemprop='review']`
// is one review fragment; the "more" pagination button is the only signal
// that another page exists.

use crate::core::Document;
use crate::data::{Ratings, ReviewRecord, VisitInfo};
use crate::engine::{extract, select, FieldRule, Ruleset, Transform::*};
use crate::scrape::Page;

pub const REVIEW_ITEM: &str = "div[itemprop='review']";
pub const MORE_MARKER: &str = "div.common_pagination_more_r_desktop";

const STAR_ROW: &str = ".name";
const STAR_BLOCK: &str = "div.stars";
const STAR_LIT: &str = ".common_yellowstar_desktop";

pub const REVIEW_RULES: Ruleset = &[
    FieldRule { field: "user_link", selector: "[itemprop='author'] a", transform: Attr("href") },
    FieldRule { field: "user_name", selector: "[itemprop='author'] span", transform: Text },
    FieldRule { field: "user_level", selector: ".grade-name", transform: Text },
    FieldRule { field: "user_review_count", selector: ".no-reviews", transform: Text },
    FieldRule { field: "title", selector: ".review-title .title", transform: Text },
    FieldRule { field: "comment", selector: ".main-review .review-container", transform: OwnText(&["img", "br", "a"]) },
    FieldRule { field: "visit_date", selector: ".info div.title:contains('Date of Visit') + div.text", transform: Text },
    FieldRule { field: "meal_type", selector: ".info div.title:contains('Type of Meal') + div.text", transform: Text },
    FieldRule { field: "dining_method", selector: ".info div.title:contains('Dining Method') + div.text", transform: Text },
    FieldRule { field: "spend_per_head", selector: ".info div.title:contains('Spending Per Head') + div.text", transform: Text },
    FieldRule { field: "published", selector: "[itemprop='datepublished']", transform: Text },
    FieldRule { field: "view_count", selector: ".view-count", transform: Text },
    FieldRule { field: "recommended_dishes", selector: ".recommend-dish-name-list .dish-name", transform: TextList },
    FieldRule { field: "taste", selector: STAR_ROW, transform: Stars { label: "Taste", stars: STAR_BLOCK, filled: STAR_LIT } },
    FieldRule { field: "decor", selector: STAR_ROW, transform: Stars { label: "Decor", stars: STAR_BLOCK, filled: STAR_LIT } },
    FieldRule { field: "service", selector: STAR_ROW, transform: Stars { label: "Service", stars: STAR_BLOCK, filled: STAR_LIT } },
    FieldRule { field: "hygiene", selector: STAR_ROW, transform: Stars { label: "Hygiene", stars: STAR_BLOCK, filled: STAR_LIT } },
    FieldRule { field: "value", selector: STAR_ROW, transform: Stars { label: "Value", stars: STAR_BLOCK, filled: STAR_LIT } },
];

pub fn parse_page(html: &str, page_url: &str) -> Page<ReviewRecord> {
    let doc = Document::parse(html);
    let root = doc.root();

    let items = select(root, REVIEW_ITEM)
        .into_iter()
        .map(|el| {
            let f = extract(el, REVIEW_RULES);
            ReviewRecord {
                user_link: f.attr("user_link"),
                user_name: f.text("user_name"),
                user_level: f.text("user_level"),
                user_review_count: f.text("user_review_count"),
                title: f.text("title"),
                comment: f.text("comment"),
                visit: VisitInfo {
                    date: f.text("visit_date"),
                    meal_type: f.text("meal_type"),
                    dining_method: f.text("dining_method"),
                    spend_per_head: f.text("spend_per_head"),
                },
                published: f.text("published"),
                view_count: f.text("view_count"),
                recommended_dishes: f.list("recommended_dishes"),
                ratings: Ratings {
                    taste: f.stars("taste"),
                    decor: f.stars("decor"),
                    service: f.stars("service"),
                    hygiene: f.stars("hygiene"),
                    value: f.stars("value"),
                },
                page_url: s!(page_url),
            }
        })
        .collect();

    let has_more = !select(root, MORE_MARKER).is_empty();
    Page { items, has_more }
}
