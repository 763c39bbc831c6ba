//! Auto-save functionality for layout persistence.
//!
//! Saves the session's layout periodically while it has unsaved changes.
//! Dirty tracking lives in the session; the manager only decides when to
//! write and reports the outcome back through [`EditorSession::complete_save`].

use super::{LayoutStorage, SaveOptions, StorageResult};
use crate::config::EditorConfig;
use crate::session::EditorSession;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Manages automatic layout persistence.
pub struct AutoSaveManager<S: LayoutStorage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
}

impl<S: LayoutStorage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_interval(storage, Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS))
    }

    /// Manager using the interval from `config`.
    pub fn from_config(storage: Arc<S>, config: &EditorConfig) -> Self {
        Self::with_interval(storage, config.autosave_interval())
    }

    pub fn with_interval(storage: Arc<S>, interval: Duration) -> Self {
        Self {
            storage,
            interval,
            last_save: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Whether the session is dirty and the interval has elapsed.
    pub fn should_save(&self, session: &EditorSession) -> bool {
        if !session.is_dirty() {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if needed. Returns true if a save was performed.
    pub async fn maybe_save(&mut self, session: &mut EditorSession) -> StorageResult<bool> {
        if !self.should_save(session) {
            return Ok(false);
        }
        self.save_now(session).await
    }

    /// Write the session's layout immediately, keeping a backup of the
    /// previous version.
    ///
    /// Returns false when no layout is loaded. Edits made while the write
    /// is in flight keep the session dirty.
    pub async fn save_now(&mut self, session: &mut EditorSession) -> StorageResult<bool> {
        let Some(ticket) = session.begin_save() else {
            return Ok(false);
        };

        let result = self
            .storage
            .save(&ticket.slug, &ticket.layout, SaveOptions { create_backup: true })
            .await;
        self.last_save = Some(Instant::now());
        session.complete_save(ticket, &result);
        result.map(|_| true)
    }

    /// Load `slug` into the session.
    pub async fn open(&mut self, slug: &str, session: &mut EditorSession) -> StorageResult<()> {
        let layout = self.storage.load(slug).await?;
        session.load_layout(layout);
        self.last_save = Some(Instant::now());
        Ok(())
    }
}
