//! Furniture and equipment placed on the floor.

use super::EntityBase;
use crate::presets::PresetObject;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Classifier for floor objects.
///
/// Unknown values are kept verbatim in [`ObjectType::Custom`] so documents
/// written by newer tools survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectType {
    Desk,
    Chair,
    Shelf,
    Rack,
    #[default]
    Rect,
    Custom(String),
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Desk => "desk",
            ObjectType::Chair => "chair",
            ObjectType::Shelf => "shelf",
            ObjectType::Rack => "rack",
            ObjectType::Rect => "rect",
            ObjectType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for ObjectType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "desk" => ObjectType::Desk,
            "chair" => ObjectType::Chair,
            "shelf" => ObjectType::Shelf,
            "rack" => ObjectType::Rack,
            "rect" => ObjectType::Rect,
            _ => ObjectType::Custom(value),
        }
    }
}

impl From<ObjectType> for String {
    fn from(value: ObjectType) -> Self {
        match value {
            ObjectType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// A rectangular floor object. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorObject {
    #[serde(flatten)]
    pub base: EntityBase,
    pub object_type: ObjectType,
    pub width: f64,
    /// Footprint extent along y.
    pub height: f64,
    /// Vertical height, for reference only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl FloorObject {
    /// Instantiate a preset centered on `center`.
    pub fn from_preset(preset: &PresetObject, center: Point) -> Self {
        Self {
            base: EntityBase::at(center.x - preset.width / 2.0, center.y - preset.height / 2.0),
            object_type: preset.object_type.clone(),
            width: preset.width,
            height: preset.height,
            depth: preset.depth,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.base.x,
            self.base.y,
            self.base.x + self.width,
            self.base.y + self.height,
        )
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Corners clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    /// Edge midpoints: top, right, bottom, left.
    pub fn edge_midpoints(&self) -> [Point; 4] {
        let r = self.rect();
        let c = r.center();
        [
            Point::new(c.x, r.y0),
            Point::new(r.x1, c.y),
            Point::new(c.x, r.y1),
            Point::new(r.x0, c.y),
        ]
    }
}
