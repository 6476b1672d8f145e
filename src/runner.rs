// src/runner.rs
//
// Stage entry points shared by every frontend. Each returns counts; batch
// failures are reported in the summary, never as an error.

use std::error::Error;
use std::path::Path;

use tracing::{info, warn};

use crate::{
    config::{axes::Axes, options::HarvestOptions},
    core::Fetch,
    matrix,
    progress::Progress,
    scrape::{self, StageSummary},
};

/// Outcome of the join stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatrixSummary {
    pub rows: usize,
    pub missing_venues: Vec<u64>,
    pub duplicate_bundles: usize,
    pub dropped_reviews: usize,
}

/// Everything `all` did, stage by stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub venues: StageSummary,
    pub reviews: StageSummary,
    pub matrix: MatrixSummary,
}

impl RunSummary {
    pub fn failed_batches(&self) -> usize {
        self.venues.failed_batches + self.reviews.failed_batches
    }
}

pub fn run_venues<F: Fetch + ?Sized>(
    opts: &HarvestOptions,
    axes_path: &Path,
    fetcher: &F,
    progress: &mut dyn Progress,
) -> Result<StageSummary, Box<dyn Error>> {
    let axes = Axes::load(axes_path)?;
    progress.log(&format!(
        "{} geographies x {} categories",
        axes.geography.len(),
        axes.category.len()
    ));
    let summary = scrape::harvest_venues(opts, &axes, fetcher, progress)?;
    report("venues", &summary);
    Ok(summary)
}

pub fn run_reviews<F: Fetch + ?Sized>(
    opts: &HarvestOptions,
    fetcher: &F,
    progress: &mut dyn Progress,
) -> Result<StageSummary, Box<dyn Error>> {
    let summary = scrape::harvest_reviews(opts, fetcher, progress)?;
    report("reviews", &summary);
    Ok(summary)
}

pub fn run_matrix(opts: &HarvestOptions, out: &Path) -> Result<MatrixSummary, Box<dyn Error>> {
    let agg = matrix::aggregate(&opts.venues_log, &opts.reviews_log)?;
    let rows = matrix::write_matrix(out, &agg.rows)?;
    info!(rows, out = %out.display(), "rating matrix written");
    Ok(MatrixSummary {
        rows,
        missing_venues: agg.missing_venues,
        duplicate_bundles: agg.duplicate_bundles,
        dropped_reviews: agg.dropped_reviews,
    })
}

/// Venues, then reviews, then the matrix. Later stages run even when an
/// earlier one discarded batches; they work from whatever is durable.
pub fn run_all<F: Fetch + ?Sized>(
    opts: &HarvestOptions,
    axes_path: &Path,
    out: &Path,
    fetcher: &F,
    progress: &mut dyn Progress,
) -> Result<RunSummary, Box<dyn Error>> {
    let venues = run_venues(opts, axes_path, fetcher, progress)?;
    let reviews = run_reviews(opts, fetcher, progress)?;
    let matrix = run_matrix(opts, out)?;
    Ok(RunSummary { venues, reviews, matrix })
}

fn report(stage: &str, s: &StageSummary) {
    if s.failed_batches > 0 {
        warn!(
            stage,
            failed_batches = s.failed_batches,
            "some batches were discarded; re-run to pick them up"
        );
    }
    info!(stage, targets = s.targets, added = s.added, skipped = s.skipped, "stage finished");
}
