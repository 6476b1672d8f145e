// src/progress.rs
/// Progress reporting for the harvesting stages. Purely informational:
/// nothing here feeds back into what gets fetched or written.
pub trait Progress {
    /// Called at the start with the number of targets about to be scheduled.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A record was appended to the output log.
    fn item_done(&mut self, _key: u64) {}

    /// A record was already checkpointed (or already written this run).
    fn item_skipped(&mut self, _key: u64) {}

    /// A whole batch was discarded because one of its fetches failed.
    fn batch_failed(&mut self, _batch: usize, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
