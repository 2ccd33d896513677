use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use tokio::sync::mpsc;

use crate::event::Event;

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Watches the directory being browsed and reports changes to its listing.
///
/// Only direct children matter for NERs, so the watch is not recursive.
/// Navigating elsewhere means building a new watcher for the new directory.
pub struct FsWatcher {
    /// Directory being watched.
    dir: PathBuf,
    /// Handle to the debouncer (dropped to stop watching).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl FsWatcher {
    /// Watch `dir`. Debounced change batches are sent as `Event::FsChange`.
    pub fn new(
        dir: &Path,
        debounce_duration: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> notify::Result<Self> {
        let watched_dir = dir.to_path_buf();

        let mut debouncer = new_debouncer(
            debounce_duration,
            move |result: Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>| {
                match result {
                    Ok(events) => {
                        let paths: Vec<PathBuf> = events
                            .iter()
                            .filter(|e| e.kind == DebouncedEventKind::Any)
                            .map(|e| e.path.clone())
                            .filter(|p| is_direct_child(p, &watched_dir))
                            .collect();

                        if paths.is_empty() {
                            return;
                        }
                        let _ = event_tx.send(Event::FsChange(paths));
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "watcher error");
                    }
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(dir, notify::RecursiveMode::NonRecursive)?;

        tracing::debug!(dir = %dir.display(), "watching directory");

        Ok(Self {
            dir: dir.to_path_buf(),
            _debouncer: debouncer,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Whether `path` is `dir` itself or one of its immediate entries.
pub fn is_direct_child(path: &Path, dir: &Path) -> bool {
    path == dir || path.parent() == Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_children_are_relevant() {
        let dir = Path::new("/home/user/project");
        assert!(is_direct_child(Path::new("/home/user/project/a.txt"), dir));
        assert!(is_direct_child(Path::new("/home/user/project"), dir));
    }

    #[test]
    fn nested_and_foreign_paths_are_ignored() {
        let dir = Path::new("/home/user/project");
        assert!(!is_direct_child(
            Path::new("/home/user/project/src/main.rs"),
            dir
        ));
        assert!(!is_direct_child(Path::new("/home/user/other.txt"), dir));
    }
}
