// src/scrape/scheduler.rs
//
// Fixed fan-out: targets are cut into consecutive batches; every fetch in a
// batch runs on its own scoped thread and the batch is joined as a whole
// before the next one starts. Peak concurrency is therefore `batch_size`.
//
// A batch commits all-or-nothing. One failed fetch discards the results of
// every other fetch in the same batch; the next run picks them up again
// through the checkpoint.

use std::{error::Error, thread};

use tracing::{error, info};

use crate::core::FetchError;
use crate::progress::Progress;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub batches: usize,
    pub committed: usize,
    pub failed: usize,
}

/// Run `fetch` over `targets` batch by batch and hand each fully successful
/// batch's results, in target order, to `commit`.
///
/// Fetch failures are counted, never returned. A `commit` error (sink I/O)
/// is returned immediately and aborts the run.
pub fn run_batches<T, R, F, C>(
    targets: &[T],
    batch_size: usize,
    fetch: F,
    mut commit: C,
    progress: &mut dyn Progress,
) -> Result<BatchStats, Box<dyn Error>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, FetchError> + Sync,
    C: FnMut(Vec<R>, &mut dyn Progress) -> Result<(), Box<dyn Error>>,
{
    let mut stats = BatchStats::default();
    let fetch = &fetch;

    for (b, batch) in targets.chunks(batch_size.max(1)).enumerate() {
        stats.batches += 1;

        let results: Vec<Result<R, FetchError>> = thread::scope(|s| {
            let handles: Vec<_> = batch.iter().map(|t| s.spawn(move || fetch(t))).collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(i, h)| {
                    h.join().unwrap_or_else(|_| {
                        Err(FetchError::Panicked { target: format!("batch {b} item {i}") })
                    })
                })
                .collect()
        });

        let mut ok = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for r in results {
            match r {
                Ok(v) => ok.push(v),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            stats.failed += 1;
            for e in &errors {
                error!(batch = b, "fetch failed: {e}");
            }
            error!(batch = b, discarded = ok.len(), "batch discarded");
            progress.batch_failed(b, &errors[0].to_string());
            continue;
        }

        commit(ok, &mut *progress)?;
        stats.committed += 1;
    }

    info!(batches = stats.batches, committed = stats.committed, failed = stats.failed, "scheduler done");
    Ok(stats)
}
