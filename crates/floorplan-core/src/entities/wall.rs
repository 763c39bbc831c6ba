//! Polyline wall entity.

use super::EntityBase;
use kurbo::{Line, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Thickness given to walls created by the wall tool, in inches.
pub const DEFAULT_WALL_THICKNESS: f64 = 6.0;

/// A wall drawn as a polyline. Points are relative to the wall's position.
///
/// A wall with fewer than two points has no segments but is still valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default)]
    pub points: Vec<Point>,
    pub thickness: f64,
}

impl Wall {
    /// Create a wall at the origin whose points are absolute coordinates.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            base: EntityBase::at(0.0, 0.0),
            points,
            thickness: DEFAULT_WALL_THICKNESS,
        }
    }

    fn offset(&self) -> Vec2 {
        Vec2::new(self.base.x, self.base.y)
    }

    /// Vertices in document coordinates.
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        let offset = self.offset();
        self.points.iter().map(move |p| *p + offset)
    }

    /// Consecutive vertex pairs in document coordinates.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        let offset = self.offset();
        self.points
            .windows(2)
            .map(move |pair| Line::new(pair[0] + offset, pair[1] + offset))
    }

    /// Midpoint of every segment in document coordinates.
    pub fn midpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments().map(|seg| seg.p0.midpoint(seg.p1))
    }

    /// Total polyline length in inches.
    pub fn length(&self) -> f64 {
        self.segments().map(|seg| seg.p0.distance(seg.p1)).sum()
    }

    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.absolute_points();
        let first = points.next()?;
        let rect = points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p));
        Some(rect.inflate(self.thickness / 2.0, self.thickness / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_wall() -> Wall {
        let mut wall = Wall::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(120.0, 0.0),
            Point::new(120.0, 60.0),
        ]);
        wall.base.x = 12.0;
        wall.base.y = 24.0;
        wall
    }

    #[test]
    fn test_absolute_points_apply_offset() {
        let wall = l_wall();
        let points: Vec<Point> = wall.absolute_points().collect();
        assert_eq!(points[0], Point::new(12.0, 24.0));
        assert_eq!(points[2], Point::new(132.0, 84.0));
    }

    #[test]
    fn test_segments_and_midpoints() {
        let wall = l_wall();
        assert_eq!(wall.segments().count(), 2);
        let mids: Vec<Point> = wall.midpoints().collect();
        assert_eq!(mids, vec![Point::new(72.0, 24.0), Point::new(132.0, 54.0)]);
        assert!((wall.length() - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_wall() {
        let wall = Wall::from_points(vec![Point::new(5.0, 5.0)]);
        assert_eq!(wall.segments().count(), 0);
        assert!(wall.bounds().is_some());
        assert!(Wall::from_points(Vec::new()).bounds().is_none());
    }
}
