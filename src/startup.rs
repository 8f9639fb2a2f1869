use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, TryRecvError};

use crate::data::loader;
use crate::data::model::RecordStore;

/// Where the record store comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(DataSource::File).unwrap_or(DataSource::Bundled)
    }

    pub fn load(&self) -> Result<RecordStore> {
        match self {
            DataSource::Bundled => loader::load_bundled(),
            DataSource::File(path) => loader::load_file(path),
        }
    }
}

// ---------------------------------------------------------------------------
// One-shot delayed load
// ---------------------------------------------------------------------------

/// A dataset load running on a background thread after a fixed delay.
/// It yields its result exactly once.
pub struct PendingLoad {
    rx: Option<Receiver<Result<RecordStore>>>,
}

impl PendingLoad {
    pub fn spawn(source: DataSource, delay: Duration) -> Self {
        // One slot: the loader sends a single result and never blocks.
        let (tx, rx) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            thread::sleep(delay);
            // The receiver may be gone if the window was closed meanwhile.
            let _ = tx.send(source.load());
        });
        Self { rx: Some(rx) }
    }

    /// `Some` once, when the load has finished.
    pub fn poll(&mut self) -> Option<Result<RecordStore>> {
        let rx = self.rx.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(anyhow!("dataset loader exited without a result")),
        };
        self.rx = None;
        Some(outcome)
    }

    pub fn is_resolved(&self) -> bool {
        self.rx.is_none()
    }
}
