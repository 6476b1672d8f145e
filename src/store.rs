// src/store.rs
//
// Read side of the NDJSON record logs: streaming replay and the checkpoint
// set built from it. Nothing here writes.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::data::Keyed;

/// Ids already durably recorded by earlier runs.
pub type Checkpoint = HashSet<u64>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub records: usize,
    pub blank: usize,
    pub malformed: usize,
}

/// Replay a record log line by line, handing each parseable record to `f`.
/// Blank and malformed lines are counted and skipped; a missing file reads
/// as empty.
pub fn scan<T, F>(path: &Path, mut f: F) -> io::Result<ScanStats>
where
    T: DeserializeOwned,
    F: FnMut(T),
{
    let mut stats = ScanStats::default();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, treating as empty", path.display());
            return Ok(stats);
        }
        Err(e) => return Err(e),
    };

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut line_no = 0usize;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_no += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            stats.blank += 1;
            continue;
        }
        match serde_json::from_slice::<T>(&line) {
            Ok(rec) => {
                stats.records += 1;
                f(rec);
            }
            Err(e) => {
                stats.malformed += 1;
                warn!("{}:{line_no}: skipping malformed record: {e}", path.display());
            }
        }
    }
    Ok(stats)
}

/// Build the checkpoint set from a log. Records without a resolvable id
/// contribute nothing.
pub fn load_checkpoint<T>(path: &Path) -> io::Result<Checkpoint>
where
    T: DeserializeOwned + Keyed,
{
    let mut keys = Checkpoint::new();
    let stats = scan::<T, _>(path, |rec| {
        if let Some(k) = rec.key() {
            keys.insert(k);
        }
    })?;
    info!(
        log = %path.display(),
        keys = keys.len(),
        records = stats.records,
        malformed = stats.malformed,
        "checkpoint loaded"
    );
    Ok(keys)
}
