// src/scrape/mod.rs
mod paginate;
mod reviews;
mod scheduler;
mod targets;
mod venues;

pub use paginate::{fetch_all, Page};
pub use reviews::{fetch_bundle, harvest_reviews, review_targets, VenueTarget};
pub use scheduler::{run_batches, BatchStats};
pub use targets::{enumerate, FetchTarget};
pub use venues::harvest_venues;

/// End-of-stage counts. `failed_batches > 0` means some work was discarded
/// and another run will pick it up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageSummary {
    pub targets: usize,
    pub added: usize,
    pub skipped: usize,
    pub failed_batches: usize,
}
