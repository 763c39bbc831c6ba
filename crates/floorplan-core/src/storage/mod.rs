//! Storage abstraction for layout persistence.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::layout::{Layout, LayoutSummary};
use crate::presets::PresetsFile;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("Layout {slug} is malformed: {reason}")]
    Malformed { slug: String, reason: String },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl StorageError {
    /// Whether the requested document is unavailable, either absent or
    /// unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_) | StorageError::Malformed { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Options for [`LayoutStorage::save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Keep a timestamped copy of the previously stored version.
    pub create_backup: bool,
}

/// Trait for layout storage backends.
///
/// Documents are keyed by slug. Loading never returns a partially parsed
/// document: a stored layout that fails to parse is reported as
/// [`StorageError::Malformed`].
pub trait LayoutStorage: Send + Sync {
    /// Summaries of every readable layout, most recently updated first.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<LayoutSummary>>>;

    /// Load a layout.
    fn load(&self, slug: &str) -> BoxFuture<'_, StorageResult<Layout>>;

    /// Save a layout, stamping its update time.
    fn save(
        &self,
        slug: &str,
        layout: &Layout,
        options: SaveOptions,
    ) -> BoxFuture<'_, StorageResult<()>>;

    /// Delete a layout.
    fn delete(&self, slug: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Check if a layout exists.
    fn exists(&self, slug: &str) -> BoxFuture<'_, StorageResult<bool>>;

    /// The object library. Written with the defaults when absent.
    fn get_presets(&self) -> BoxFuture<'_, StorageResult<PresetsFile>>;

    /// Replace the object library.
    fn save_presets(&self, presets: &PresetsFile) -> BoxFuture<'_, StorageResult<()>>;
}

/// Sort summaries newest first.
fn sort_summaries(summaries: &mut [LayoutSummary]) {
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
