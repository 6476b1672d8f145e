// tests/scheduler.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use venue_scrape::core::FetchError;
use venue_scrape::progress::{NullProgress, Progress};
use venue_scrape::scrape::{run_batches, BatchStats};

#[derive(Default)]
struct Recorder {
    failed: Vec<usize>,
}

impl Progress for Recorder {
    fn batch_failed(&mut self, batch: usize, _error: &str) {
        self.failed.push(batch);
    }
}

#[test]
fn one_failure_discards_its_whole_batch() {
    let targets: Vec<u32> = (1..=20).collect();
    let mut committed: Vec<Vec<u32>> = Vec::new();
    let mut progress = Recorder::default();

    let stats = run_batches(
        &targets,
        15,
        |&t| {
            if t == 7 {
                Err(FetchError::Status { url: format!("t{t}"), status: 500 })
            } else {
                Ok(t)
            }
        },
        |batch, _| {
            committed.push(batch);
            Ok(())
        },
        &mut progress,
    )
    .unwrap();

    assert_eq!(stats, BatchStats { batches: 2, committed: 1, failed: 1 });
    assert_eq!(progress.failed, vec![0]);
    // Only the second batch reached the sink, in target order.
    assert_eq!(committed, vec![(16..=20).collect::<Vec<_>>()]);
}

#[test]
fn concurrency_never_exceeds_batch_size() {
    let targets: Vec<u32> = (0..12).collect();
    let live = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    let stats = run_batches(
        &targets,
        4,
        |_| {
            let now = live.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            live.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        },
        |_, _| Ok(()),
        &mut NullProgress,
    )
    .unwrap();

    assert_eq!(stats.batches, 3);
    assert!(peak.load(Ordering::SeqCst) <= 4);
}

#[test]
fn a_panicking_fetch_counts_as_a_failure() {
    let targets = [1u32, 2, 3];
    let mut commits = 0;
    let stats = run_batches(
        &targets,
        3,
        |&t| {
            if t == 2 {
                panic!("boom");
            }
            Ok(t)
        },
        |_, _| {
            commits += 1;
            Ok(())
        },
        &mut NullProgress,
    )
    .unwrap();
    assert_eq!(stats.failed, 1);
    assert_eq!(commits, 0);
}

#[test]
fn sink_errors_abort_the_run() {
    let targets = [1u32, 2, 3, 4];
    let result = run_batches(
        &targets,
        2,
        |&t| Ok(t),
        |_, _| Err("disk full".into()),
        &mut NullProgress,
    );
    assert!(result.is_err());
}

#[test]
fn zero_batch_size_behaves_as_one() {
    let targets = [1u32, 2];
    let stats = run_batches(&targets, 0, |&t| Ok(t), |_, _| Ok(()), &mut NullProgress).unwrap();
    assert_eq!(stats.batches, 2);
}
