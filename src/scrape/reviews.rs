// src/scrape/reviews.rs
//
// Stage 2: for every venue in the venue log not yet in the review log, fetch
// its page and all of its review pages and append one bundle.

use std::{collections::HashSet, error::Error, path::Path};

use tracing::info;

use crate::{
    config::options::HarvestOptions,
    core::{Fetch, FetchError},
    data::{Keyed, ReviewBundle, VenueSummary},
    file::RecordLog,
    progress::Progress,
    specs::{reviews, venue},
    store,
};

use super::{fetch_all, run_batches, FetchTarget, StageSummary};

/// One venue to harvest: its page plus its paginated review listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VenueTarget {
    pub key: u64,
    pub page_url: String,
    pub reviews: FetchTarget,
}

/// Distinct venues from the venue log that carry an id, a page path and a
/// review path. The first line for an id wins.
pub fn review_targets(opts: &HarvestOptions, venues_log: &Path) -> std::io::Result<Vec<VenueTarget>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    store::scan::<VenueSummary, _>(venues_log, |v| {
        let (Some(key), Some(url), Some(review_url)) = (v.key(), v.url.as_deref(), v.review_url.as_deref()) else {
            return;
        };
        if url.is_empty() || review_url.is_empty() || !seen.insert(key) {
            return;
        }
        out.push(VenueTarget {
            key,
            page_url: opts.absolute(url),
            reviews: FetchTarget::with_page_param(key.to_string(), &opts.absolute(review_url)),
        });
    })?;
    Ok(out)
}

/// Venue page + every review page for one venue.
pub fn fetch_bundle<F: Fetch + ?Sized>(
    fetcher: &F,
    target: &VenueTarget,
    max_pages: u32,
) -> Result<ReviewBundle, FetchError> {
    let html = fetcher.fetch(&target.page_url)?;
    let mut venue = venue::parse_venue(&html, &target.page_url);
    venue.venue_id = Some(target.key);

    let reviews = fetch_all(fetcher, &target.reviews, max_pages, |body, url| {
        Ok(reviews::parse_page(body, url))
    })?;
    Ok(ReviewBundle { venue, reviews })
}

pub fn harvest_reviews<F: Fetch + ?Sized>(
    opts: &HarvestOptions,
    fetcher: &F,
    progress: &mut dyn Progress,
) -> Result<StageSummary, Box<dyn Error>> {
    let all = review_targets(opts, &opts.venues_log)?;
    let done = store::load_checkpoint::<ReviewBundle>(&opts.reviews_log)?;

    let (already, todo): (Vec<VenueTarget>, Vec<VenueTarget>) =
        all.into_iter().partition(|t| done.contains(&t.key));
    info!(venues = already.len() + todo.len(), to_fetch = todo.len(), skipping = already.len(), "harvesting reviews");

    let log = RecordLog::open(&opts.reviews_log)?;
    progress.begin(todo.len());
    for t in &already {
        progress.item_skipped(t.key);
    }

    let mut added = 0usize;
    let stats = run_batches(
        &todo,
        opts.batch_size,
        |t| fetch_bundle(fetcher, t, opts.max_pages),
        |bundles: Vec<ReviewBundle>, p: &mut dyn Progress| {
            for bundle in bundles {
                log.append(&bundle)?;
                added += 1;
                if let Some(k) = bundle.key() {
                    p.item_done(k);
                }
            }
            log.flush()?;
            Ok(())
        },
        progress,
    )?;

    log.close()?;
    progress.finish();

    let summary = StageSummary {
        targets: todo.len(),
        added,
        skipped: already.len(),
        failed_batches: stats.failed,
    };
    info!(?summary, "review stage done");
    Ok(summary)
}
