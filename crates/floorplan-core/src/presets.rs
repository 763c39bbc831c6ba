//! Object library used to seed new floor objects.

use crate::entities::ObjectType;
use crate::layout::CURRENT_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Template for a floor object. Not part of any layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetObject {
    pub name: String,
    pub object_type: ObjectType,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl PresetObject {
    pub fn new(name: impl Into<String>, object_type: ObjectType, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            object_type,
            width,
            height,
            depth: None,
        }
    }
}

/// Presets grouped by library category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCategories {
    #[serde(default)]
    pub desks: Vec<PresetObject>,
    #[serde(default)]
    pub chairs: Vec<PresetObject>,
    #[serde(default)]
    pub shelves: Vec<PresetObject>,
    #[serde(default)]
    pub racks: Vec<PresetObject>,
    #[serde(default)]
    pub custom: Vec<PresetObject>,
}

/// The persisted object library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetsFile {
    pub schema_version: u32,
    pub presets: PresetCategories,
}

impl Default for PresetsFile {
    fn default() -> Self {
        use ObjectType::{Chair, Desk, Rack, Shelf};

        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            presets: PresetCategories {
                desks: vec![
                    PresetObject::new("Small Desk (48x24)", Desk, 48.0, 24.0),
                    PresetObject::new("Medium Desk (60x30)", Desk, 60.0, 30.0),
                    PresetObject::new("Large Desk (72x30)", Desk, 72.0, 30.0),
                ],
                chairs: vec![
                    PresetObject::new("Office Chair", Chair, 24.0, 24.0),
                    PresetObject::new("Task Chair", Chair, 20.0, 20.0),
                ],
                shelves: vec![
                    PresetObject::new("Small Shelf (36x18)", Shelf, 36.0, 18.0),
                    PresetObject::new("Large Shelf (48x18)", Shelf, 48.0, 18.0),
                    PresetObject::new("Wide Shelf (72x24)", Shelf, 72.0, 24.0),
                ],
                racks: vec![
                    PresetObject::new("Server Rack 42U (24x42)", Rack, 24.0, 42.0),
                    PresetObject::new("Server Rack 48U (24x48)", Rack, 24.0, 48.0),
                    PresetObject::new("Network Rack (24x36)", Rack, 24.0, 36.0),
                ],
                custom: Vec::new(),
            },
        }
    }
}

impl PresetsFile {
    /// Categories in display order, paired with their names.
    pub fn categories(&self) -> [(&'static str, &[PresetObject]); 5] {
        [
            ("desks", self.presets.desks.as_slice()),
            ("chairs", self.presets.chairs.as_slice()),
            ("shelves", self.presets.shelves.as_slice()),
            ("racks", self.presets.racks.as_slice()),
            ("custom", self.presets.custom.as_slice()),
        ]
    }

    /// Every preset across all categories.
    pub fn all(&self) -> impl Iterator<Item = &PresetObject> {
        self.categories()
            .into_iter()
            .flat_map(|(_, presets)| presets.iter())
    }

    /// Look up a preset by exact name.
    pub fn find(&self, name: &str) -> Option<&PresetObject> {
        self.all().find(|p| p.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_library() {
        let presets = PresetsFile::default();
        assert_eq!(presets.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(presets.all().count(), 11);
        assert!(presets.presets.custom.is_empty());

        let rack = presets.find("Server Rack 42U (24x42)").unwrap();
        assert_eq!(rack.object_type, ObjectType::Rack);
        assert_eq!((rack.width, rack.height), (24.0, 42.0));
        assert!(presets.find("Nope").is_none());
    }

    #[test]
    fn test_parses_library_with_missing_categories() {
        let json = r#"{"schemaVersion":1,"presets":{"custom":[{"name":"Bench","objectType":"bench","width":60,"height":18,"depth":17}]}}"#;
        let presets = PresetsFile::from_json(json).unwrap();
        assert!(presets.presets.desks.is_empty());
        let bench = presets.find("Bench").unwrap();
        assert_eq!(bench.object_type, ObjectType::Custom("bench".to_string()));
        assert_eq!(bench.depth, Some(17.0));
    }
}
