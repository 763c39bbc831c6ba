//! Snap functionality for aligning points to the grid, walls and objects.

use crate::layout::Layout;
use kurbo::Point;

/// Candidates farther than this from the input point (in inches) are ignored.
pub const SNAP_RADIUS: f64 = 12.0;

/// What a snapped point was drawn toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// Nearest grid intersection.
    Grid,
    /// Wall vertex.
    Endpoint,
    /// Midpoint of a wall segment.
    Midpoint,
    /// Center of an object.
    Center,
    /// Corner of an object.
    Corner,
    /// Midpoint of an object edge.
    Edge,
}

/// A possible snap location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub point: Point,
    pub kind: SnapKind,
    /// Distance from the input point.
    pub distance: f64,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// What the point snapped to, if anything.
    pub kind: Option<SnapKind>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self { point, kind: None }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.kind.is_some()
    }
}

/// Snap a point to the nearest grid intersection, rounding each axis.
///
/// A non-positive spacing leaves the point unchanged.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Collect every snap candidate for `point` in encounter order.
///
/// Order: the grid intersection, then wall vertices and segment midpoints
/// wall by wall, then object centers, corners and edge midpoints object by
/// object. Each group is gated by its toggle in the layout settings.
pub fn collect_candidates(point: Point, layout: &Layout) -> Vec<SnapCandidate> {
    let settings = &layout.settings;
    let mut candidates = Vec::new();
    let mut push = |p: Point, kind: SnapKind| {
        candidates.push(SnapCandidate {
            point: p,
            kind,
            distance: point.distance(p),
        });
    };

    if settings.snap_to_grid {
        push(snap_to_grid(point, settings.grid_size), SnapKind::Grid);
    }

    if settings.snap_to_walls {
        for wall in layout.walls() {
            for vertex in wall.absolute_points() {
                push(vertex, SnapKind::Endpoint);
            }
            for mid in wall.midpoints() {
                push(mid, SnapKind::Midpoint);
            }
        }
    }

    if settings.snap_to_objects {
        for object in layout.objects() {
            push(object.center(), SnapKind::Center);
            for corner in object.corners() {
                push(corner, SnapKind::Corner);
            }
            for mid in object.edge_midpoints() {
                push(mid, SnapKind::Edge);
            }
        }
    }

    candidates
}

/// Snap a document point against the layout.
///
/// The closest candidate within [`SNAP_RADIUS`] wins; on equal distance the
/// one encountered first is kept. With no candidate in range the result is
/// the grid-rounded point when grid snapping is on, otherwise the input.
pub fn snap(point: Point, layout: &Layout) -> SnapResult {
    let mut best: Option<SnapCandidate> = None;
    for candidate in collect_candidates(point, layout) {
        if candidate.distance > SNAP_RADIUS {
            continue;
        }
        if best.is_none_or(|b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) => SnapResult {
            point: candidate.point,
            kind: Some(candidate.kind),
        },
        None if layout.settings.snap_to_grid => SnapResult {
            point: snap_to_grid(point, layout.settings.grid_size),
            kind: Some(SnapKind::Grid),
        },
        None => SnapResult::none(point),
    }
}

/// Convenience wrapper returning only the snapped point.
pub fn snap_point(point: Point, layout: &Layout) -> Point {
    snap(point, layout).point
}
