// src/scrape/venues.rs
//
// Stage 1: walk every geography x category listing and append venues that no
// earlier run has recorded.

use std::{collections::HashSet, error::Error};

use tracing::info;

use crate::{
    config::{axes::Axes, options::HarvestOptions},
    core::Fetch,
    data::{Keyed, VenueSummary},
    file::RecordLog,
    progress::Progress,
    specs::listing,
    store,
};

use super::{enumerate, fetch_all, run_batches, StageSummary};

pub fn harvest_venues<F: Fetch + ?Sized>(
    opts: &HarvestOptions,
    axes: &Axes,
    fetcher: &F,
    progress: &mut dyn Progress,
) -> Result<StageSummary, Box<dyn Error>> {
    let targets = enumerate(&opts.listing_tmpl, &axes.geography, &axes.category);
    let done = store::load_checkpoint::<VenueSummary>(&opts.venues_log)?;
    info!(targets = targets.len(), checkpointed = done.len(), "harvesting venue listings");

    let log = RecordLog::open(&opts.venues_log)?;
    progress.begin(targets.len());

    // The same venue shows up under several categories; the checkpoint is
    // frozen for the run, so this run's own appends are tracked separately.
    let mut written: HashSet<u64> = HashSet::new();
    let mut added = 0usize;
    let mut skipped = 0usize;
    let mut keyless = 0usize;

    let stats = run_batches(
        &targets,
        opts.batch_size,
        |t| fetch_all(fetcher, t, opts.max_pages, listing::parse_page),
        |listings: Vec<Vec<VenueSummary>>, p: &mut dyn Progress| {
            for venue in listings.into_iter().flatten() {
                let Some(key) = venue.key() else {
                    keyless += 1;
                    continue;
                };
                if done.contains(&key) || !written.insert(key) {
                    skipped += 1;
                    p.item_skipped(key);
                    continue;
                }
                log.append(&venue)?;
                added += 1;
                p.item_done(key);
            }
            log.flush()?;
            Ok(())
        },
        progress,
    )?;

    log.close()?;
    progress.finish();

    let summary = StageSummary { targets: targets.len(), added, skipped, failed_batches: stats.failed };
    info!(?summary, keyless, "venue stage done");
    Ok(summary)
}
