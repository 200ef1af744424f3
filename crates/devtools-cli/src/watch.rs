//! Re-run a task when files change
//!
//! Events are debounced: a burst of saves triggers a single run once the
//! tree has been quiet for [`DEBOUNCE_MS`].

use crate::errors::CliError;
use crate::logger;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Quiet period before a batch of changes is handed over
pub const DEBOUNCE_MS: u64 = 100;

const POLL_MS: u64 = 50;

/// Pending changes waiting for the debounce window to close
#[derive(Debug, Default)]
struct Debouncer {
    pending: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl Debouncer {
    fn add(&mut self, path: PathBuf) {
        self.pending.insert(path);
        self.last_change = Some(Instant::now());
    }

    fn is_ready(&self) -> bool {
        self.last_change
            .is_some_and(|last| last.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

/// Watch `dir` recursively until `running` is cleared
///
/// `on_change` receives each debounced batch of changed files that pass
/// `keep`; an error from it ends the watch.
pub fn watch_dir(
    dir: &Path,
    running: &AtomicBool,
    keep: impl Fn(&Path) -> bool,
    on_change: impl FnMut(&[PathBuf]) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::Recursive)?;
    logger::info(&format!("Watching {} for changes", dir.display()));

    run_loop(&rx, running, keep, on_change)
}

/// Drain `rx` into debounced batches until `running` is cleared or the
/// sender is gone; a pending batch is flushed on disconnect.
fn run_loop(
    rx: &Receiver<PathBuf>,
    running: &AtomicBool,
    keep: impl Fn(&Path) -> bool,
    mut on_change: impl FnMut(&[PathBuf]) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let mut debouncer = Debouncer::default();

    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(Duration::from_millis(POLL_MS)) {
            Ok(path) => {
                if keep(&path) {
                    logger::debug(&format!("Changed: {}", path.display()));
                    debouncer.add(path);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if !debouncer.pending.is_empty() {
                    on_change(&debouncer.take())?;
                }
                break;
            }
        }

        if debouncer.is_ready() {
            on_change(&debouncer.take())?;
        }
    }
    Ok(())
}
