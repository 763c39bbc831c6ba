//! Entity definitions for floorplan layouts.

mod dimension;
mod object;
mod opening;
mod text;
mod wall;

pub use dimension::DimensionLine;
pub use object::{FloorObject, ObjectType};
pub use opening::{
    DEFAULT_DOOR_WIDTH, DEFAULT_OPEN_ANGLE, DEFAULT_WINDOW_WIDTH, Door, HingeSide,
    OPENING_ATTACH_DISTANCE, SwingDirection, WallAttachment, Window, nearest_wall_attachment,
};
pub use text::{DEFAULT_FONT_SIZE, DEFAULT_TEXT, TextLabel};
pub use wall::{DEFAULT_WALL_THICKNESS, Wall};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an entity within a layout.
pub type EntityId = String;

/// Generate a fresh entity id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Visual style hints. Only rendering and export read these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Fields shared by every entity variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBase {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EntityStyle>,
}

impl EntityBase {
    /// Base with a fresh id at the given position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            id: new_entity_id(),
            x,
            y,
            rotation: 0.0,
            label: None,
            metadata: None,
            style: None,
        }
    }
}

/// Discriminant of an [`Entity`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Wall,
    Door,
    Window,
    Object,
    Text,
    Dimension,
}

impl EntityKind {
    /// Tag used in the persisted document.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Wall => "wall",
            EntityKind::Door => "door",
            EntityKind::Window => "window",
            EntityKind::Object => "object",
            EntityKind::Text => "text",
            EntityKind::Dimension => "dimension",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placeable item in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Wall(Wall),
    Door(Door),
    Window(Window),
    Object(FloorObject),
    Text(TextLabel),
    Dimension(DimensionLine),
}

impl Entity {
    /// Shared fields of this entity.
    pub fn base(&self) -> &EntityBase {
        match self {
            Entity::Wall(e) => &e.base,
            Entity::Door(e) => &e.base,
            Entity::Window(e) => &e.base,
            Entity::Object(e) => &e.base,
            Entity::Text(e) => &e.base,
            Entity::Dimension(e) => &e.base,
        }
    }

    /// Mutable shared fields of this entity.
    pub fn base_mut(&mut self) -> &mut EntityBase {
        match self {
            Entity::Wall(e) => &mut e.base,
            Entity::Door(e) => &mut e.base,
            Entity::Window(e) => &mut e.base,
            Entity::Object(e) => &mut e.base,
            Entity::Text(e) => &mut e.base,
            Entity::Dimension(e) => &mut e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Wall(_) => EntityKind::Wall,
            Entity::Door(_) => EntityKind::Door,
            Entity::Window(_) => EntityKind::Window,
            Entity::Object(_) => EntityKind::Object,
            Entity::Text(_) => EntityKind::Text,
            Entity::Dimension(_) => EntityKind::Dimension,
        }
    }

    /// Position of the entity.
    pub fn position(&self) -> Point {
        let base = self.base();
        Point::new(base.x, base.y)
    }

    /// Whether a select-mode drag moves this entity.
    pub fn is_draggable(&self) -> bool {
        matches!(self, Entity::Object(_) | Entity::Text(_))
    }

    /// Axis-aligned extent in document space, ignoring rotation.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Entity::Wall(wall) => wall.bounds(),
            Entity::Door(door) => Some(opening_bounds(&door.base, door.width)),
            Entity::Window(window) => Some(opening_bounds(&window.base, window.width)),
            Entity::Object(object) => Some(object.rect()),
            Entity::Text(text) => Some(Rect::new(
                text.base.x,
                text.base.y,
                text.base.x + text.font_size * text.text.chars().count() as f64 * 0.6,
                text.base.y + text.font_size,
            )),
            Entity::Dimension(dim) => Some(Rect::from_points(dim.start(), dim.end())),
        }
    }

    /// Apply a shallow partial update.
    ///
    /// Only fields present in `patch` and meaningful for this variant are
    /// written; nested values such as wall points are replaced wholesale.
    pub fn apply_patch(&mut self, patch: &EntityPatch) {
        {
            let base = self.base_mut();
            if let Some(x) = patch.x {
                base.x = x;
            }
            if let Some(y) = patch.y {
                base.y = y;
            }
            if let Some(rotation) = patch.rotation {
                base.rotation = rotation;
            }
            if let Some(label) = &patch.label {
                base.label = Some(label.clone());
            }
            if let Some(metadata) = &patch.metadata {
                base.metadata = Some(metadata.clone());
            }
            if let Some(style) = &patch.style {
                base.style = Some(style.clone());
            }
        }

        match self {
            Entity::Wall(wall) => {
                if let Some(points) = &patch.points {
                    wall.points = points.clone();
                }
                if let Some(thickness) = patch.thickness {
                    wall.thickness = thickness;
                }
            }
            Entity::Door(door) => {
                if let Some(wall_id) = &patch.wall_id {
                    door.wall_id = wall_id.clone();
                }
                if let Some(position) = patch.wall_position {
                    door.wall_position = position;
                }
                if let Some(width) = patch.width {
                    door.width = width;
                }
                if let Some(direction) = patch.swing_direction {
                    door.swing_direction = direction;
                }
                if let Some(side) = patch.hinge_side {
                    door.hinge_side = side;
                }
                if let Some(angle) = patch.open_angle {
                    door.open_angle = angle;
                }
            }
            Entity::Window(window) => {
                if let Some(wall_id) = &patch.wall_id {
                    window.wall_id = wall_id.clone();
                }
                if let Some(position) = patch.wall_position {
                    window.wall_position = position;
                }
                if let Some(width) = patch.width {
                    window.width = width;
                }
                if let Some(sill) = patch.sill_height {
                    window.sill_height = Some(sill);
                }
            }
            Entity::Object(object) => {
                if let Some(object_type) = &patch.object_type {
                    object.object_type = object_type.clone();
                }
                if let Some(width) = patch.width {
                    object.width = width;
                }
                if let Some(height) = patch.height {
                    object.height = height;
                }
                if let Some(depth) = patch.depth {
                    object.depth = Some(depth);
                }
            }
            Entity::Text(text) => {
                if let Some(content) = &patch.text {
                    text.text = content.clone();
                }
                if let Some(size) = patch.font_size {
                    text.font_size = size;
                }
            }
            Entity::Dimension(dim) => {
                if let Some(v) = patch.start_x {
                    dim.start_x = v;
                }
                if let Some(v) = patch.start_y {
                    dim.start_y = v;
                }
                if let Some(v) = patch.end_x {
                    dim.end_x = v;
                }
                if let Some(v) = patch.end_y {
                    dim.end_y = v;
                }
            }
        }
    }
}

fn opening_bounds(base: &EntityBase, width: f64) -> Rect {
    let half = width / 2.0;
    Rect::new(base.x - half, base.y - half, base.x + half, base.y + half)
}

/// Partial update for an entity. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub label: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub style: Option<EntityStyle>,
    pub points: Option<Vec<Point>>,
    pub thickness: Option<f64>,
    pub wall_id: Option<EntityId>,
    pub wall_position: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub swing_direction: Option<SwingDirection>,
    pub hinge_side: Option<HingeSide>,
    pub open_angle: Option<f64>,
    pub sill_height: Option<f64>,
    pub object_type: Option<ObjectType>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
}

impl EntityPatch {
    /// Patch that moves an entity to `(x, y)`.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Find the closest point on a line segment to a given point.
///
/// Returns the point and its normalized position `t` in `[0, 1]`.
pub fn closest_point_on_segment(point: Point, start: Point, end: Point) -> (Point, f64) {
    let d = end - start;
    let length_sq = d.hypot2();
    if length_sq == 0.0 {
        return (start, 0.0);
    }
    let t = ((point - start).dot(d) / length_sq).clamp(0.0, 1.0);
    (start + d * t, t)
}
