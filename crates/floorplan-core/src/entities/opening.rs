//! Doors and windows, which reference a host wall.
//!
//! The reference is an id plus a normalized position along one wall
//! segment. It is resolved once at placement time and is not kept in sync
//! when the host wall is later edited or deleted.

use super::{Entity, EntityBase, EntityId, closest_point_on_segment};
use kurbo::Point;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOOR_WIDTH: f64 = 36.0;
pub const DEFAULT_WINDOW_WIDTH: f64 = 36.0;
pub const DEFAULT_OPEN_ANGLE: f64 = 90.0;

/// How far from a wall, in inches, a door or window click may land.
pub const OPENING_ATTACH_DISTANCE: f64 = 24.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    #[default]
    Inward,
    Outward,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HingeSide {
    #[default]
    Left,
    Right,
}

/// A door hosted by a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    #[serde(flatten)]
    pub base: EntityBase,
    pub wall_id: EntityId,
    /// Position along the host segment in `[0, 1]`.
    pub wall_position: f64,
    pub width: f64,
    pub swing_direction: SwingDirection,
    pub hinge_side: HingeSide,
    /// Opening angle in degrees, `0..=180`.
    pub open_angle: f64,
}

impl Door {
    /// Create a door at a resolved wall attachment.
    pub fn attached(attachment: &WallAttachment) -> Self {
        Self {
            base: attachment.base(),
            wall_id: attachment.wall_id.clone(),
            wall_position: attachment.position,
            width: DEFAULT_DOOR_WIDTH,
            swing_direction: SwingDirection::default(),
            hinge_side: HingeSide::default(),
            open_angle: DEFAULT_OPEN_ANGLE,
        }
    }
}

/// A window hosted by a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    #[serde(flatten)]
    pub base: EntityBase,
    pub wall_id: EntityId,
    /// Position along the host segment in `[0, 1]`.
    pub wall_position: f64,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sill_height: Option<f64>,
}

impl Window {
    /// Create a window at a resolved wall attachment.
    pub fn attached(attachment: &WallAttachment) -> Self {
        Self {
            base: attachment.base(),
            wall_id: attachment.wall_id.clone(),
            wall_position: attachment.position,
            width: DEFAULT_WINDOW_WIDTH,
            sill_height: None,
        }
    }
}

/// Where a point lands on the nearest wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallAttachment {
    pub wall_id: EntityId,
    /// Index of the host segment within the wall polyline.
    pub segment_index: usize,
    /// Normalized position along the segment.
    pub position: f64,
    /// Projected point on the segment in document coordinates.
    pub point: Point,
    /// Segment direction in degrees.
    pub angle: f64,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

impl WallAttachment {
    fn base(&self) -> EntityBase {
        EntityBase {
            rotation: self.angle,
            ..EntityBase::at(self.point.x, self.point.y)
        }
    }
}

/// Find the wall segment closest to `point` within `max_distance`.
///
/// Walls are scanned in layer order; on equal distance the first wins.
pub fn nearest_wall_attachment(
    entities: &[Entity],
    point: Point,
    max_distance: f64,
) -> Option<WallAttachment> {
    let mut best: Option<WallAttachment> = None;

    for entity in entities {
        let Entity::Wall(wall) = entity else {
            continue;
        };
        for (index, segment) in wall.segments().enumerate() {
            let (projected, t) = closest_point_on_segment(point, segment.p0, segment.p1);
            let distance = point.distance(projected);
            if distance > max_distance {
                continue;
            }
            if best.as_ref().is_some_and(|b| distance >= b.distance) {
                continue;
            }
            let d = segment.p1 - segment.p0;
            best = Some(WallAttachment {
                wall_id: wall.base.id.clone(),
                segment_index: index,
                position: t,
                point: projected,
                angle: d.y.atan2(d.x).to_degrees(),
                distance,
            });
        }
    }

    best
}
