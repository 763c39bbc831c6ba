//! Annotative dimension lines.

use super::EntityBase;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A measured line between two absolute points.
///
/// Start and end ignore the base position. Dimension lines are never snap
/// targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLine {
    #[serde(flatten)]
    pub base: EntityBase,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl DimensionLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            base: EntityBase::at(0.0, 0.0),
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Length in inches.
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let dim = DimensionLine::new(Point::new(0.0, 0.0), Point::new(36.0, 48.0));
        assert!((dim.length() - 60.0).abs() < f64::EPSILON);
    }
}
