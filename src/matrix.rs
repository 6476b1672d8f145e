// src/matrix.rs
//
// Join of the venue log and the review log into the user-item rating
// matrix. Runs offline against completed logs; no fetching.

use std::{
    collections::{HashMap, HashSet},
    io,
    path::Path,
};

use tracing::{info, warn};

use crate::csv::TableSink;
use crate::data::{Keyed, RatingMatrixRow, ReviewBundle, VenueSummary, MATRIX_HEADERS};
use crate::store::scan;

/// The venue columns carried into every matrix row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VenueRef {
    pub name: String,
    pub short_url: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregate {
    pub rows: Vec<RatingMatrixRow>,
    /// Venue ids referenced by review bundles but absent from the venue log,
    /// each listed once, in first-seen order.
    pub missing_venues: Vec<u64>,
    pub bundles: usize,
    pub duplicate_bundles: usize,
    /// Reviews dropped for having no rated dimension or no user id.
    pub dropped_reviews: usize,
}

/// Venue id → columns. On duplicate ids the later line wins.
pub fn load_venues(path: &Path) -> io::Result<HashMap<u64, VenueRef>> {
    let mut venues = HashMap::new();
    scan::<VenueSummary, _>(path, |v| {
        if let Some(id) = v.key() {
            venues.insert(id, VenueRef {
                name: v.name.unwrap_or_default(),
                short_url: v.short_url.unwrap_or_default(),
            });
        }
    })?;
    Ok(venues)
}

/// Incremental joiner, fed one bundle at a time in log order.
pub struct Joiner<'v> {
    venues: &'v HashMap<u64, VenueRef>,
    seen: HashSet<u64>,
    missing: HashSet<u64>,
    out: Aggregate,
}

impl<'v> Joiner<'v> {
    pub fn new(venues: &'v HashMap<u64, VenueRef>) -> Self {
        Self { venues, seen: HashSet::new(), missing: HashSet::new(), out: Aggregate::default() }
    }

    pub fn push(&mut self, bundle: ReviewBundle) {
        let Some(id) = bundle.key() else { return };
        self.out.bundles += 1;

        // Only the first bundle per venue in a log counts.
        if !self.seen.insert(id) {
            self.out.duplicate_bundles += 1;
            return;
        }
        if bundle.reviews.is_empty() {
            return;
        }
        let Some(venue) = self.venues.get(&id) else {
            if self.missing.insert(id) {
                self.out.missing_venues.push(id);
            }
            return;
        };

        for review in &bundle.reviews {
            match (review.ratings.score(), review.user_id()) {
                (Some(rating), Some(user_id)) => self.out.rows.push(RatingMatrixRow {
                    venue_id: id,
                    venue_name: venue.name.clone(),
                    venue_short_url: venue.short_url.clone(),
                    user_id,
                    rating,
                }),
                _ => self.out.dropped_reviews += 1,
            }
        }
    }

    pub fn finish(self) -> Aggregate {
        self.out
    }
}

/// Load every venue, stream the review log, and join.
pub fn aggregate(venues_log: &Path, reviews_log: &Path) -> io::Result<Aggregate> {
    let venues = load_venues(venues_log)?;
    info!(venues = venues.len(), "venue index built");

    let mut joiner = Joiner::new(&venues);
    scan::<ReviewBundle, _>(reviews_log, |b| joiner.push(b))?;
    let agg = joiner.finish();

    if !agg.missing_venues.is_empty() {
        warn!(
            count = agg.missing_venues.len(),
            "review bundles reference venues missing from the venue log (closed?): {:?}",
            agg.missing_venues
        );
    }
    info!(
        rows = agg.rows.len(),
        bundles = agg.bundles,
        duplicates = agg.duplicate_bundles,
        dropped = agg.dropped_reviews,
        "matrix joined"
    );
    Ok(agg)
}

/// Write rows as the rating-matrix CSV (header always present).
pub fn write_matrix(path: &Path, rows: &[RatingMatrixRow]) -> Result<usize, ::csv::Error> {
    let mut sink = TableSink::create(path, &MATRIX_HEADERS)?;
    for row in rows {
        sink.write(row)?;
    }
    sink.close()
}
