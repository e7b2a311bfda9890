// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system watcher for YAML configuration files.

use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::{ChangeCallback, ConfigWatcher};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Watches one file and reports modifications, debounced.
///
/// A burst of writes is reported once, after the file has been quiet for the
/// debounce delay, so the report always follows the last write.
///
/// The parent directory is watched rather than the file itself so editors that
/// replace the file on save are still seen. The callback receives the watched
/// path as its key.
///
/// # Examples
///
/// ```rust,no_run
/// use sidecfg::adapters::FileWatcher;
/// use sidecfg::ports::ConfigWatcher;
/// use std::sync::Arc;
///
/// # fn main() -> sidecfg::domain::Result<()> {
/// let mut watcher = FileWatcher::new("/etc/gotask/config.yaml", None)?;
/// watcher.watch(Arc::new(|path| tracing::info!("changed: {}", path)))?;
/// watcher.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileWatcher {
    file_path: PathBuf,
    debounce_delay: Duration,
    watcher: Option<RecommendedWatcher>,
    watch_thread: Option<JoinHandle<()>>,
    stop_tx: Option<Sender<()>>,
}

impl FileWatcher {
    /// Creates a watcher for an existing file; `debounce_delay` defaults to 500ms.
    pub fn new(path: impl AsRef<Path>, debounce_delay: Option<Duration>) -> Result<Self> {
        let path = path.as_ref();
        let file_path = path.canonicalize().map_err(|e| ConfigError::WatcherError {
            message: format!("File does not exist: {}", path.display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            file_path,
            debounce_delay: debounce_delay.unwrap_or(DEFAULT_DEBOUNCE),
            watcher: None,
            watch_thread: None,
            stop_tx: None,
        })
    }

    /// Returns `true` between a successful `watch` and the next `stop`.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    fn run(
        file_path: PathBuf,
        debounce_delay: Duration,
        events: Receiver<notify::Result<Event>>,
        stop_rx: Receiver<()>,
        callback: ChangeCallback,
    ) {
        // time of the latest event not yet reported
        let mut pending: Option<Instant> = None;

        loop {
            if stop_rx.try_recv().is_ok() {
                break;
            }

            let wait = match pending {
                Some(last) => debounce_delay
                    .saturating_sub(last.elapsed())
                    .min(POLL_INTERVAL),
                None => POLL_INTERVAL,
            };

            match events.recv_timeout(wait) {
                Ok(Ok(event)) => {
                    if event.paths.iter().any(|p| p == &file_path) {
                        pending = Some(Instant::now());
                    }
                }
                Ok(Err(e)) => tracing::warn!("File watcher error: {}", e),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // fire once the file has been quiet for a full debounce window
            if pending.is_some_and(|last| last.elapsed() >= debounce_delay) {
                pending = None;
                tracing::debug!("Detected change in {}", file_path.display());
                callback(ConfigKey::from(file_path.to_string_lossy().as_ref()));
            }
        }
    }
}

impl ConfigWatcher for FileWatcher {
    fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
        if self.watcher.is_some() {
            return Err(ConfigError::WatcherError {
                message: "Watcher is already running".to_string(),
                source: None,
            });
        }

        let (event_tx, event_rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();

        let mut watcher =
            RecommendedWatcher::new(event_tx, notify::Config::default()).map_err(|e| {
                ConfigError::WatcherError {
                    message: format!("Failed to create file watcher: {}", e),
                    source: Some(Box::new(e)),
                }
            })?;

        let dir = self
            .file_path
            .parent()
            .ok_or_else(|| ConfigError::WatcherError {
                message: "Failed to get parent directory".to_string(),
                source: None,
            })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatcherError {
                message: format!("Failed to start watching: {}", e),
                source: Some(Box::new(e)),
            })?;

        let file_path = self.file_path.clone();
        let debounce_delay = self.debounce_delay;
        self.watch_thread = Some(thread::spawn(move || {
            Self::run(file_path, debounce_delay, event_rx, stop_rx, callback)
        }));
        self.watcher = Some(watcher);
        self.stop_tx = Some(stop_tx);

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        // dropping the notify watcher disconnects the event channel
        self.watcher = None;

        if let Some(handle) = self.watch_thread.take() {
            handle.join().map_err(|_| ConfigError::WatcherError {
                message: "Failed to join watcher thread".to_string(),
                source: None,
            })?;
        }

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_watcher_nonexistent_file() {
        let watcher = FileWatcher::new("/nonexistent/path/to/config.yaml", None);
        assert!(matches!(watcher, Err(ConfigError::WatcherError { .. })));
    }

    #[test]
    fn test_file_watcher_default_debounce() {
        let file = NamedTempFile::new().unwrap();
        let watcher = FileWatcher::new(file.path(), None).unwrap();
        assert_eq!(watcher.debounce_delay, DEFAULT_DEBOUNCE);
        assert!(!watcher.is_watching());
    }

    #[test]
    fn test_file_watcher_watch_and_stop() {
        let file = NamedTempFile::new().unwrap();
        let mut watcher = FileWatcher::new(file.path(), None).unwrap();

        watcher.watch(Arc::new(|_key: ConfigKey| {})).unwrap();
        assert!(watcher.is_watching());

        watcher.stop().unwrap();
        assert!(!watcher.is_watching());
    }

    #[test]
    fn test_file_watcher_double_watch() {
        let file = NamedTempFile::new().unwrap();
        let mut watcher = FileWatcher::new(file.path(), None).unwrap();
        let callback: ChangeCallback = Arc::new(|_key: ConfigKey| {});

        assert!(watcher.watch(callback.clone()).is_ok());
        assert!(watcher.watch(callback).is_err());
        watcher.stop().unwrap();
    }

    fn wait_for(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(25));
        }
        done()
    }

    #[test]
    fn test_file_watcher_triggers_on_change() {
        let file = NamedTempFile::new().unwrap();
        let mut watcher =
            FileWatcher::new(file.path(), Some(Duration::from_millis(50))).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        watcher
            .watch(Arc::new(move |_key: ConfigKey| {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        fs::write(file.path(), "gotask:\n  workers: 8\n").unwrap();

        let seen = wait_for(Duration::from_secs(5), || fired.load(Ordering::SeqCst) > 0);
        watcher.stop().unwrap();
        assert!(seen, "no change reported for {}", file.path().display());
    }

    #[test]
    fn test_file_watcher_reports_after_last_write_of_burst() {
        let file = NamedTempFile::new().unwrap();
        let debounce = Duration::from_millis(300);
        let mut watcher = FileWatcher::new(file.path(), Some(debounce)).unwrap();

        let fired_at = Arc::new(Mutex::new(Vec::new()));
        let fired_clone = Arc::clone(&fired_at);
        watcher
            .watch(Arc::new(move |_key: ConfigKey| {
                fired_clone.lock().unwrap().push(Instant::now());
            }))
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        fs::write(file.path(), "key: v1\n").unwrap();
        thread::sleep(Duration::from_millis(100));
        fs::write(file.path(), "key: v2\n").unwrap();
        let last_write = Instant::now();

        let seen = wait_for(Duration::from_secs(5), || !fired_at.lock().unwrap().is_empty());
        thread::sleep(debounce * 2);
        watcher.stop().unwrap();

        assert!(seen, "no change reported for {}", file.path().display());
        let fired = fired_at.lock().unwrap();
        assert_eq!(fired.len(), 1, "burst reported {} times", fired.len());
        assert!(fired[0] >= last_write);
    }
}
