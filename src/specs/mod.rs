// src/specs/mod.rs
//! # Page specs
//!
//! One module per page/endpoint the harvester reads. Each spec encodes
//! *where the data lives* in that page, as a declarative [`Ruleset`] for
//! HTML pages or a JSON path for the listing API, and shapes the result into
//! the record types in [`crate::data`].
//!
//! ## What lives here
//! - Field rulesets (selector + transform) for the venue and review pages.
//! - Page-level decisions: which element is one review fragment, what marks
//!   "there is another page".
//! - Mapping of extracted fields into typed records.
//!
//! ## What does **not** live here
//! - Fetching, pagination, batching: `scrape`.
//! - Checkpoints and logs: `store` / `file`.
//! - The selector engine and tree: `core::html`, `engine`.
//!
//! ## Conventions
//! - HTML specs never fail. A missing element is an empty string, an empty
//!   list, or `UNRATED` for a star dimension; the label row being absent
//!   (renamed or localised page) reads as unrated, not as zero.
//! - The listing spec *does* fail on an unreadable payload, because an
//!   empty-vs-broken listing must not be mistaken for the end of a listing.
//! - Every spec is testable offline against inline fixtures.
//!
//! [`Ruleset`]: crate::engine::Ruleset
pub mod listing;
pub mod reviews;
pub mod venue;
