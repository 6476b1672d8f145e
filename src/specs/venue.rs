// src/specs/venue.rs
//
// Venue detail page. One document → one VenueRecord; every field optional.

use crate::core::Document;
use crate::data::VenueRecord;
use crate::engine::{extract, FieldRule, Ruleset, Transform::*};

pub const VENUE_RULES: Ruleset = &[
    FieldRule { field: "name", selector: "div.poi-name span.name", transform: Text },
    FieldRule { field: "alt_name", selector: ".poi-name-container .smaller-font-name", transform: Text },
    FieldRule { field: "district", selector: ".header-poi-district a", transform: Text },
    FieldRule {
        field: "address",
        selector: "section.address-section > div.address-info-map-section > div.address-info-section > div.content > a",
        transform: Text,
    },
    FieldRule { field: "transport", selector: "section.transport-section > div", transform: FirstNodeText },
    FieldRule { field: "seat_count", selector: ".more-info-section div.content", transform: Text },
    FieldRule { field: "overall_score", selector: "div.header-score", transform: Text },
    FieldRule { field: "good_ok_bad", selector: ".header-smile-section .score-div", transform: TextList },
    FieldRule { field: "price_range", selector: "[itemprop='priceRange'] > a", transform: Text },
    FieldRule { field: "categories", selector: "div.header-poi-categories a", transform: TextList },
    FieldRule { field: "telephones", selector: "section.telephone-section div.content", transform: TextList },
    FieldRule { field: "additional_info", selector: "section.poi-additional-info-section .text", transform: Text },
    FieldRule { field: "payment_methods", selector: "div.comma-tags > span", transform: TextList },
    FieldRule { field: "other_conditions", selector: ".conditions-section span.condition-name", transform: TextList },
    FieldRule { field: "bookmark_count", selector: ".header-bookmark-count", transform: Text },
    FieldRule {
        field: "opening_hours",
        selector: ".opening-hours-day",
        transform: Hours { day: ".opening-hours-date", time: ".opening-hours-time div" },
    },
];

pub fn parse_venue(html: &str, webpage_url: &str) -> VenueRecord {
    let doc = Document::parse(html);
    let f = extract(doc.root(), VENUE_RULES);
    VenueRecord {
        venue_id: None,
        webpage_url: s!(webpage_url),
        name: f.text("name"),
        alt_name: f.text("alt_name"),
        district: f.text("district"),
        address: f.text("address"),
        transport: f.text("transport"),
        seat_count: f.text("seat_count"),
        overall_score: f.text("overall_score"),
        good_ok_bad: f.list("good_ok_bad"),
        price_range: f.text("price_range"),
        categories: f.list("categories"),
        telephones: f.list("telephones"),
        additional_info: f.text("additional_info"),
        payment_methods: f.list("payment_methods"),
        other_conditions: f.list("other_conditions"),
        bookmark_count: f.text("bookmark_count"),
        opening_hours: f.hours("opening_hours"),
    }
}
