//! Watch mode: full rebuild on filesystem change.
//!
//! There is no incremental anything — a qualifying change schedules a
//! complete run. Triggers go through a single-slot [`Trigger`]: however
//! many events land during the debounce window (or while a build is
//! running), they coalesce into exactly one pending rebuild, so runs never
//! overlap and never race.

use crate::build::{self, BuildError, BuildReport};
use crate::config::BuildConfig;
use crate::render::TemplateEngine;
use notify::{RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Quiet period after the last event before a rebuild fires. Editors tend
/// to emit bursts (write + rename + metadata) for a single save.
pub const DEBOUNCE_MS: u64 = 300;

/// Substring patterns filtering out events that must not trigger rebuilds.
const IGNORE_PATTERNS: &[&str] = &[".git", ".obsidian", ".DS_Store", "content_data.json"];

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("watcher error: {0}")]
    Notify(#[from] notify::Error),
}

/// Single-slot rebuild request with debounce.
///
/// `note_event` arms the slot; `take_ready` disarms it once the quiet
/// period has elapsed. Re-arming while already armed just restarts the
/// quiet period — there is never more than one pending rebuild.
#[derive(Debug, Default)]
pub struct Trigger {
    armed_at: Option<Instant>,
}

impl Trigger {
    pub fn note_event(&mut self) {
        self.armed_at = Some(Instant::now());
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// True (and disarms) when an event is pending and the debounce window
    /// has passed.
    pub fn take_ready(&mut self, debounce: Duration) -> bool {
        match self.armed_at {
            Some(at) if at.elapsed() >= debounce => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Should a change at `path` be ignored?
pub fn is_ignored(path: &Path, output_root: &Path) -> bool {
    if path.starts_with(output_root) {
        return true;
    }
    let path_str = path.to_string_lossy();
    IGNORE_PATTERNS.iter().any(|p| path_str.contains(p))
}

/// Build once, then watch the source and assets roots forever, rebuilding
/// on change. `report` is called after every run with its outcome; build
/// failures are reported but do not stop the watch.
pub fn run(
    config: &BuildConfig,
    engine: &dyn TemplateEngine,
    mut report: impl FnMut(Result<BuildReport, BuildError>),
) -> Result<(), WatchError> {
    let dump = Path::new("content_data.json");
    report(build::build(config, engine, Some(dump)));

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&config.source_root, RecursiveMode::Recursive)?;
    if config.assets_root.is_dir() {
        watcher.watch(&config.assets_root, RecursiveMode::Recursive)?;
    }

    let debounce = Duration::from_millis(DEBOUNCE_MS);
    let mut trigger = Trigger::default();
    loop {
        // Short poll so the debounce window is checked even when the
        // filesystem goes quiet.
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(Ok(event)) => {
                if event
                    .paths
                    .iter()
                    .any(|p| !is_ignored(p, &config.output_root))
                {
                    trigger.note_event();
                }
            }
            Ok(Err(e)) => return Err(WatchError::Notify(e)),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }

        // The build runs on this same thread, so events arriving mid-build
        // queue up in the channel and collapse into one re-arm afterwards.
        if trigger.take_ready(debounce) {
            report(build::build(config, engine, Some(dump)));
        }
    }
}
