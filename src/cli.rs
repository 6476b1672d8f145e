// src/cli.rs
use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};

use crate::{
    config::{consts::*, options::HarvestOptions},
    core::HttpFetcher,
    progress::Progress,
    runner::{self, MatrixSummary},
    scrape::StageSummary,
};

#[derive(Debug, Parser)]
#[command(name = "venue_scrape", version, about = "Incremental venue and review harvester")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Venue summary log (NDJSON, append-only)
    #[arg(long, global = true, default_value = VENUES_LOG)]
    pub venues_log: PathBuf,

    /// Review bundle log (NDJSON, append-only)
    #[arg(long, global = true, default_value = REVIEWS_LOG)]
    pub reviews_log: PathBuf,

    /// Fetches in flight per batch
    #[arg(long, global = true, default_value_t = BATCH_SIZE)]
    pub batch_size: usize,

    /// Page cap per paginated target
    #[arg(long, global = true, default_value_t = MAX_PAGES)]
    pub max_pages: u32,

    /// Site root used to resolve relative venue paths
    #[arg(long, global = true, default_value = BASE_URL)]
    pub base_url: String,

    /// Listing URL template with {geo}, {category} and {page}
    #[arg(long, global = true, default_value = LISTING_URL_TMPL)]
    pub listing_url: String,

    /// Write diagnostics to a file instead of stderr
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = DEBUG_LOG)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Harvest venue summaries from the listing API
    Venues {
        #[arg(long, default_value = AXES_FILE)]
        axes: PathBuf,
    },
    /// Harvest venue details and reviews for every logged venue
    Reviews,
    /// Join both logs into the rating matrix CSV
    Matrix {
        #[arg(short, long, default_value = MATRIX_CSV)]
        out: PathBuf,
    },
    /// venues, reviews, matrix in order
    All {
        #[arg(long, default_value = AXES_FILE)]
        axes: PathBuf,
        #[arg(short, long, default_value = MATRIX_CSV)]
        out: PathBuf,
    },
}

impl GlobalArgs {
    pub fn options(&self) -> HarvestOptions {
        HarvestOptions {
            base_url: self.base_url.clone(),
            listing_tmpl: self.listing_url.clone(),
            batch_size: self.batch_size,
            max_pages: self.max_pages,
            venues_log: self.venues_log.clone(),
            reviews_log: self.reviews_log.clone(),
        }
    }
}

/// Terminal progress: one mark per record on stdout, failures on stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    skipped: usize,
    failed: usize,
}

impl ConsoleProgress {
    /// Tally line printed when a stage finishes.
    pub fn tally(&self) -> String {
        format!("{} written, {} skipped, {} batch(es) discarded", self.done, self.skipped, self.failed)
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        *self = Self::default();
        eprintln!("{total} targets");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, _key: u64) {
        self.done += 1;
        mark('+');
    }

    fn item_skipped(&mut self, _key: u64) {
        self.skipped += 1;
        mark('.');
    }

    fn batch_failed(&mut self, batch: usize, error: &str) {
        self.failed += 1;
        eprintln!("\nbatch {batch} discarded: {error}");
    }

    fn finish(&mut self) {
        println!();
        eprintln!("{}", self.tally());
    }
}

fn mark(c: char) {
    let mut out = io::stdout().lock();
    let _ = write!(out, "{c}");
    let _ = out.flush();
}

fn fatal(e: Box<dyn Error>) -> color_eyre::Report {
    eyre!("{e}")
}

fn print_stage(stage: &str, s: &StageSummary) {
    println!("{stage}: {} added, {} already present", s.added, s.skipped);
    if s.failed_batches > 0 {
        println!("{stage}: {} batch(es) failed! Please re-run to pick them up.", s.failed_batches);
    }
}

fn print_matrix(s: &MatrixSummary) {
    println!("matrix: {} rows", s.rows);
    if !s.missing_venues.is_empty() {
        println!(
            "matrix: {} venue(s) with reviews but no summary (closed?): {:?}",
            s.missing_venues.len(),
            s.missing_venues
        );
    }
    if s.duplicate_bundles > 0 {
        println!("matrix: {} duplicate review bundle(s) ignored", s.duplicate_bundles);
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.global.log_file.as_deref()).map_err(fatal)?;

    let opts = cli.global.options();
    let mut progress = ConsoleProgress::default();

    match &cli.command {
        Command::Venues { axes } => {
            let fetcher = HttpFetcher::new()?;
            let s = runner::run_venues(&opts, axes, &fetcher, &mut progress).map_err(fatal)?;
            print_stage("venues", &s);
        }
        Command::Reviews => {
            let fetcher = HttpFetcher::new()?;
            let s = runner::run_reviews(&opts, &fetcher, &mut progress).map_err(fatal)?;
            print_stage("reviews", &s);
        }
        Command::Matrix { out } => {
            let s = runner::run_matrix(&opts, out).map_err(fatal)?;
            print_matrix(&s);
        }
        Command::All { axes, out } => {
            let fetcher = HttpFetcher::new()?;
            let s = runner::run_all(&opts, axes, out, &fetcher, &mut progress).map_err(fatal)?;
            print_stage("venues", &s.venues);
            print_stage("reviews", &s.reviews);
            print_matrix(&s.matrix);
        }
    }
    Ok(())
}
