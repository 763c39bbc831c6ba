//! Layout documents: settings plus an ordered list of entities.

use crate::entities::{Entity, EntityPatch, FloorObject, Wall};
use crate::error::EditorError;
use chrono::{DateTime, Utc};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Schema version written into new documents.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Measurement display unit. Document coordinates are always inches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    #[default]
    #[serde(rename = "ft-in")]
    FeetInches,
    #[serde(rename = "meters")]
    Meters,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::FeetInches => write!(f, "ft-in"),
            Units::Meters => write!(f, "meters"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ft-in" | "imperial" | "feet" => Ok(Units::FeetInches),
            "meters" | "metric" | "m" => Ok(Units::Meters),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

/// Page size classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    ArchD,
    Custom,
}

/// Per-document settings. Missing fields take their defaults when parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    pub units: Units,
    /// Grid spacing in inches.
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub snap_to_objects: bool,
    pub snap_to_walls: bool,
    /// Display scale in pixels per inch.
    pub scale: f64,
    pub page_size: PageSize,
    /// Page width in inches.
    pub page_width: f64,
    /// Page height in inches.
    pub page_height: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            units: Units::FeetInches,
            grid_size: 12.0,
            snap_to_grid: true,
            snap_to_objects: true,
            snap_to_walls: true,
            scale: 4.0,
            page_size: PageSize::Letter,
            page_width: 132.0,
            page_height: 102.0,
        }
    }
}

impl LayoutSettings {
    /// Shallow-merge the present fields of `patch`.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(units) = patch.units {
            self.units = units;
        }
        if let Some(grid_size) = patch.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(on) = patch.snap_to_grid {
            self.snap_to_grid = on;
        }
        if let Some(on) = patch.snap_to_objects {
            self.snap_to_objects = on;
        }
        if let Some(on) = patch.snap_to_walls {
            self.snap_to_walls = on;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(page_size) = patch.page_size {
            self.page_size = page_size;
        }
        if let Some(width) = patch.page_width {
            self.page_width = width;
        }
        if let Some(height) = patch.page_height {
            self.page_height = height;
        }
    }
}

/// Partial update for [`LayoutSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub units: Option<Units>,
    pub grid_size: Option<f64>,
    pub snap_to_grid: Option<bool>,
    pub snap_to_objects: Option<bool>,
    pub snap_to_walls: Option<bool>,
    pub scale: Option<f64>,
    pub page_size: Option<PageSize>,
    pub page_width: Option<f64>,
    pub page_height: Option<f64>,
}

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, collapses every run of non `[a-z0-9]` characters into a single
/// `-` and trims dashes from both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Summary row for document listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub updated_at: DateTime<Utc>,
    pub entity_count: usize,
}

/// A complete layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: LayoutSettings,
    /// Entities in layering order.
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Layout {
    /// Create an empty layout with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_settings(name, LayoutSettings::default())
    }

    /// Create an empty layout with the given settings.
    pub fn with_settings(name: impl Into<String>, settings: LayoutSettings) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            id: Uuid::new_v4().to_string(),
            slug: slugify(&name),
            name,
            created_at: now,
            updated_at: now,
            settings,
            entities: Vec::new(),
        }
    }

    /// Give the layout a new identity under `name`, as for "save as".
    pub fn reidentify(&mut self, name: impl Into<String>) {
        let name = name.into();
        let now = Utc::now();
        self.id = Uuid::new_v4().to_string();
        self.slug = slugify(&name);
        self.name = name;
        self.created_at = now;
        self.updated_at = now;
    }

    /// Stamp the update time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entity(id).is_some()
    }

    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Wall(wall) => Some(wall),
            _ => None,
        })
    }

    pub fn objects(&self) -> impl Iterator<Item = &FloorObject> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Object(object) => Some(object),
            _ => None,
        })
    }

    /// Append an entity on top of the layering order.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), EditorError> {
        if self.contains(entity.id()) {
            return Err(EditorError::DuplicateEntity(entity.id().to_string()));
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Shallow-merge `patch` into the entity with `id`. Returns false if absent.
    pub fn update_entity(&mut self, id: &str, patch: &EntityPatch) -> bool {
        match self.entity_mut(id) {
            Some(entity) => {
                entity.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Remove every entity whose id is in `ids`, keeping the order of the rest.
    pub fn remove_entities<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let before = self.entities.len();
        self.entities
            .retain(|e| !ids.iter().any(|id| id.as_ref() == e.id()));
        before - self.entities.len()
    }

    /// Union of all entity bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.entities
            .iter()
            .filter_map(Entity::bounds)
            .reduce(|acc, r| acc.union(r))
    }

    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            updated_at: self.updated_at,
            entity_count: self.entities.len(),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
