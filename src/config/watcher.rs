//! Route table file watcher for hot reload.
//!
//! # Design Decisions
//! - Watches the file's parent directory, not the file. Editors save by
//!   writing a temp file and renaming it over the config, which replaces
//!   the inode; a watch on the file itself goes silent after the first save
//! - Events are filtered by file name, so sibling files never trigger a reload
//! - A reload is only sent when the file content actually changed

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::RouterConfig;

/// Sends a validated [`RouterConfig`] every time the route table file changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for validated route tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| notify::Error::generic("route table path has no file name"))?;
        let dir = watch_dir(&self.path);

        let tx = self.update_tx;
        let path = self.path.clone();
        let mut last = fs::read_to_string(&path).ok();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, &file_name) => {
                    let content = match fs::read_to_string(&path) {
                        Ok(content) => content,
                        Err(e) => {
                            tracing::warn!(path = ?path, error = %e, "Route table unreadable, waiting for next change");
                            return;
                        }
                    };
                    if last.as_deref() == Some(content.as_str()) {
                        tracing::trace!(path = ?path, "Route table unchanged");
                        return;
                    }

                    tracing::info!(path = ?path, kind = ?event.kind, "Route table change detected, reloading");
                    match parse_config(&content) {
                        Ok(new_config) => {
                            last = Some(content);
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload route table, keeping current one");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

/// Directory to watch for `path`. A bare file name lives in the working directory.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether `event` may have left new content at the watched file name.
fn touches(event: &Event, file_name: &OsStr) -> bool {
    let lands = match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Create(_) | EventKind::Modify(_) => true,
        _ => false,
    };
    lands
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}
