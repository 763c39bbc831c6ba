//! In-memory storage implementation.

use super::{BoxFuture, LayoutStorage, SaveOptions, StorageError, StorageResult, sort_summaries};
use crate::layout::{Layout, LayoutSummary};
use crate::presets::PresetsFile;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Layouts are held as serialized JSON so they go through the same parse
/// path as persisted documents.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
    backups: RwLock<Vec<(String, String)>>,
    presets: RwLock<Option<PresetsFile>>,
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `slug`, bypassing serialization.
    pub fn insert_raw(&self, slug: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.insert(slug.to_string(), json.into());
        Ok(())
    }

    /// Number of backup copies taken so far.
    pub fn backup_count(&self) -> usize {
        self.backups.read().map(|b| b.len()).unwrap_or(0)
    }
}

impl LayoutStorage for MemoryStorage {
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<LayoutSummary>>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            let mut summaries: Vec<LayoutSummary> = docs
                .iter()
                .filter_map(|(slug, json)| match Layout::from_json(json) {
                    Ok(layout) => Some(layout.summary()),
                    Err(e) => {
                        log::warn!("Skipping malformed layout {}: {}", slug, e);
                        None
                    }
                })
                .collect();
            sort_summaries(&mut summaries);
            Ok(summaries)
        })
    }

    fn load(&self, slug: &str) -> BoxFuture<'_, StorageResult<Layout>> {
        let slug = slug.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            let json = docs
                .get(&slug)
                .ok_or_else(|| StorageError::NotFound(slug.clone()))?;
            Layout::from_json(json).map_err(|e| StorageError::Malformed {
                slug,
                reason: e.to_string(),
            })
        })
    }

    fn save(
        &self,
        slug: &str,
        layout: &Layout,
        options: SaveOptions,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let slug = slug.to_string();
        let layout = layout.clone();
        Box::pin(async move {
            let json = layout
                .to_json()
                .map_err(|e| StorageError::Other(format!("Serialization error: {}", e)))?;

            let mut docs = self.documents.write().map_err(lock_error)?;
            if options.create_backup {
                if let Some(previous) = docs.get(&slug) {
                    let mut backups = self.backups.write().map_err(lock_error)?;
                    backups.push((slug.clone(), previous.clone()));
                }
            }
            docs.insert(slug, json);
            Ok(())
        })
    }

    fn delete(&self, slug: &str) -> BoxFuture<'_, StorageResult<()>> {
        let slug = slug.to_string();
        Box::pin(async move {
            let mut docs = self.documents.write().map_err(lock_error)?;
            docs.remove(&slug)
                .map(|_| ())
                .ok_or(StorageError::NotFound(slug))
        })
    }

    fn exists(&self, slug: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let slug = slug.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            Ok(docs.contains_key(&slug))
        })
    }

    fn get_presets(&self) -> BoxFuture<'_, StorageResult<PresetsFile>> {
        Box::pin(async move {
            let mut presets = self.presets.write().map_err(lock_error)?;
            Ok(presets.get_or_insert_with(PresetsFile::default).clone())
        })
    }

    fn save_presets(&self, presets: &PresetsFile) -> BoxFuture<'_, StorageResult<()>> {
        let presets = presets.clone();
        Box::pin(async move {
            *self.presets.write().map_err(lock_error)? = Some(presets);
            Ok(())
        })
    }
}
