//! File-based storage implementation.

use super::{BoxFuture, LayoutStorage, SaveOptions, StorageError, StorageResult, sort_summaries};
use crate::layout::{Layout, LayoutSummary};
use crate::presets::PresetsFile;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the object library inside the storage directory.
pub const PRESETS_FILE_NAME: &str = "presets.json";

/// Directory, relative to the storage directory, holding backups.
pub const AUTOSAVE_DIR_NAME: &str = ".autosave";

/// Stores layouts as pretty-printed JSON files, one per slug.
///
/// ```text
/// <base>/<slug>.json
/// <base>/presets.json
/// <base>/.autosave/<slug>-<YYYY-MM-DDTHH-MM>.json
/// ```
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/floorplan/layouts/`
    /// On Windows: `%LOCALAPPDATA%\floorplan\layouts\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("floorplan").join("layouts"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, slug: &str) -> PathBuf {
        // Keep slugs from escaping the base directory
        let safe: String = slug
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe))
    }

    fn presets_path(&self) -> PathBuf {
        self.base_path.join(PRESETS_FILE_NAME)
    }

    /// Directory holding timestamped backup copies.
    pub fn autosave_dir(&self) -> PathBuf {
        self.base_path.join(AUTOSAVE_DIR_NAME)
    }

    fn backup(&self, slug: &str, current: &Path) -> StorageResult<()> {
        let dir = self.autosave_dir();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Io(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M");
        let name = self
            .document_path(slug)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| format!("{}-{}.json", s, stamp))
            .ok_or_else(|| StorageError::Other(format!("Invalid slug: {}", slug)))?;
        let target = dir.join(name);
        fs::copy(current, &target).map_err(|e| {
            StorageError::Io(format!("Failed to back up to {}: {}", target.display(), e))
        })?;
        log::debug!("Backed up {} to {}", slug, target.display());
        Ok(())
    }
}

fn read_layout(path: &Path, slug: &str) -> StorageResult<Layout> {
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Layout::from_json(&json).map_err(|e| StorageError::Malformed {
        slug: slug.to_string(),
        reason: e.to_string(),
    })
}

impl LayoutStorage for FileStorage {
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<LayoutSummary>>> {
        Box::pin(async move {
            if !self.base_path.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&self.base_path)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut summaries = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_file() || path.extension().is_none_or(|e| e != "json") {
                    continue;
                }
                if path.file_name().is_some_and(|n| n == PRESETS_FILE_NAME) {
                    continue;
                }
                let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                match read_layout(&path, slug) {
                    Ok(layout) => summaries.push(layout.summary()),
                    Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
                }
            }
            sort_summaries(&mut summaries);
            Ok(summaries)
        })
    }

    fn load(&self, slug: &str) -> BoxFuture<'_, StorageResult<Layout>> {
        let path = self.document_path(slug);
        let slug = slug.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(slug));
            }
            read_layout(&path, &slug)
        })
    }

    fn save(
        &self,
        slug: &str,
        layout: &Layout,
        options: SaveOptions,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(slug);
        let slug = slug.to_string();
        let layout = layout.clone();

        Box::pin(async move {
            let json = layout
                .to_json()
                .map_err(|e| StorageError::Other(format!("Serialization error: {}", e)))?;

            if options.create_backup && path.exists() {
                self.backup(&slug, &path)?;
            }

            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, slug: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(slug);
        let slug = slug.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(slug));
            }
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })
        })
    }

    fn exists(&self, slug: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.document_path(slug);
        Box::pin(async move { Ok(path.exists()) })
    }

    fn get_presets(&self) -> BoxFuture<'_, StorageResult<PresetsFile>> {
        let path = self.presets_path();

        Box::pin(async move {
            if !path.exists() {
                let presets = PresetsFile::default();
                self.save_presets(&presets).await?;
                return Ok(presets);
            }
            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;
            PresetsFile::from_json(&json).map_err(|e| StorageError::Malformed {
                slug: PRESETS_FILE_NAME.to_string(),
                reason: e.to_string(),
            })
        })
    }

    fn save_presets(&self, presets: &PresetsFile) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.presets_path();
        let json = presets.to_json();

        Box::pin(async move {
            let json =
                json.map_err(|e| StorageError::Other(format!("Serialization error: {}", e)))?;
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }
}
