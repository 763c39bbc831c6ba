//! Export interface.
//!
//! Rendering lives outside the core; a host provides an [`Exporter`] that
//! turns a layout snapshot into files.

use crate::layout::{Layout, PageSize};
use crate::storage::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_EXPORT_DPI: u32 = 150;

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// What to render and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub formats: Vec<ExportFormat>,
    pub include_grid: bool,
    pub include_dimensions: bool,
    pub include_labels: bool,
    pub paper_size: PageSize,
    pub orientation: Orientation,
    /// Free-form scale caption, e.g. `1/4" = 1'`.
    pub scale_label: Option<String>,
    /// Raster resolution.
    pub dpi: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::Png],
            include_grid: true,
            include_dimensions: true,
            include_labels: true,
            paper_size: PageSize::Letter,
            orientation: Orientation::Landscape,
            scale_label: None,
            dpi: DEFAULT_EXPORT_DPI,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export format not supported: {0}")]
    Unsupported(ExportFormat),
    #[error("Render error: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// A rendering backend. Returns the paths or names of the files written.
pub trait Exporter: Send + Sync {
    fn export(
        &self,
        layout: &Layout,
        options: &ExportOptions,
    ) -> BoxFuture<'_, Result<Vec<String>, ExportError>>;
}

/// File names an exporter is expected to produce, one per requested format
/// in request order. Duplicate formats are collapsed.
pub fn output_file_names(layout: &Layout, options: &ExportOptions) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(options.formats.len());
    for format in &options.formats {
        let name = format!("{}.{}", layout.slug, format.extension());
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
