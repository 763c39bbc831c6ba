//! Tool modes and their transient interaction state.

use crate::entities::{Entity, EntityId, Wall};
use crate::presets::PresetObject;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Select,
    Wall,
    Door,
    Window,
    Object,
    Measure,
    Text,
}

impl ToolMode {
    pub const ALL: [ToolMode; 7] = [
        ToolMode::Select,
        ToolMode::Wall,
        ToolMode::Door,
        ToolMode::Window,
        ToolMode::Object,
        ToolMode::Measure,
        ToolMode::Text,
    ];

    /// Map a letter or digit shortcut to a tool.
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'v' | '1' => Some(ToolMode::Select),
            'w' | '2' => Some(ToolMode::Wall),
            'd' | '3' => Some(ToolMode::Door),
            'n' | '4' => Some(ToolMode::Window),
            'o' | '5' => Some(ToolMode::Object),
            'm' | '6' => Some(ToolMode::Measure),
            't' | '7' => Some(ToolMode::Text),
            _ => None,
        }
    }

    /// Letter shortcut for the tool.
    pub fn shortcut(self) -> char {
        match self {
            ToolMode::Select => 'V',
            ToolMode::Wall => 'W',
            ToolMode::Door => 'D',
            ToolMode::Window => 'N',
            ToolMode::Object => 'O',
            ToolMode::Measure => 'M',
            ToolMode::Text => 'T',
        }
    }

    /// Tools whose every click is geometry input rather than selection.
    pub fn is_geometry_tool(self) -> bool {
        matches!(self, ToolMode::Wall | ToolMode::Measure)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolMode::Select => "select",
            ToolMode::Wall => "wall",
            ToolMode::Door => "door",
            ToolMode::Window => "window",
            ToolMode::Object => "object",
            ToolMode::Measure => "measure",
            ToolMode::Text => "text",
        };
        f.write_str(name)
    }
}

/// An in-progress drag of an entity in select mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveState {
    pub id: EntityId,
    /// Document point where the drag started.
    pub grab: Point,
    /// Latest document point of the drag.
    pub current: Point,
    /// Entity position when the drag started.
    pub origin: Point,
}

impl MoveState {
    pub fn delta(&self) -> Vec2 {
        self.current - self.grab
    }

    /// Position the entity should end up at.
    pub fn target(&self) -> Point {
        self.origin + self.delta()
    }
}

/// Transient interaction state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    is_drawing_wall: bool,
    wall_points: Vec<Point>,
    measure_start: Option<Point>,
    measure_end: Option<Point>,
    placing: Option<PresetObject>,
    moving: Option<MoveState>,
    /// Last snapped pointer position, for previews.
    pub hover: Option<Point>,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing_wall(&self) -> bool {
        self.is_drawing_wall
    }

    pub fn wall_points(&self) -> &[Point] {
        &self.wall_points
    }

    /// Begin a wall at `point`, discarding any previous buffer.
    pub fn start_wall(&mut self, point: Point) {
        self.is_drawing_wall = true;
        self.wall_points.clear();
        self.wall_points.push(point);
    }

    /// Append a vertex to the wall being drawn. Ignored when not drawing.
    pub fn add_wall_point(&mut self, point: Point) {
        if self.is_drawing_wall {
            self.wall_points.push(point);
        }
    }

    /// Finish drawing. Returns a wall when at least two points were placed.
    ///
    /// Drawing state is cleared either way.
    pub fn finish_wall(&mut self) -> Option<Entity> {
        let points = std::mem::take(&mut self.wall_points);
        self.is_drawing_wall = false;
        (points.len() >= 2).then(|| Entity::Wall(Wall::from_points(points)))
    }

    /// Discard the wall being drawn.
    pub fn cancel_wall(&mut self) {
        self.is_drawing_wall = false;
        self.wall_points.clear();
    }

    pub fn measure_start(&self) -> Option<Point> {
        self.measure_start
    }

    pub fn measure_end(&self) -> Option<Point> {
        self.measure_end
    }

    pub fn start_measure(&mut self, point: Point) {
        self.measure_start = Some(point);
        self.measure_end = Some(point);
    }

    /// Move the measurement end. Ignored until a measurement is started.
    pub fn update_measure(&mut self, point: Point) {
        if self.measure_start.is_some() {
            self.measure_end = Some(point);
        }
    }

    pub fn clear_measure(&mut self) {
        self.measure_start = None;
        self.measure_end = None;
    }

    /// Current measured length in inches.
    pub fn measurement(&self) -> Option<f64> {
        Some(self.measure_start?.distance(self.measure_end?))
    }

    pub fn placing(&self) -> Option<&PresetObject> {
        self.placing.as_ref()
    }

    pub fn arm(&mut self, preset: PresetObject) {
        self.placing = Some(preset);
    }

    pub fn disarm(&mut self) {
        self.placing = None;
    }

    pub fn moving(&self) -> Option<&MoveState> {
        self.moving.as_ref()
    }

    pub fn begin_move(&mut self, id: EntityId, grab: Point, origin: Point) {
        self.moving = Some(MoveState {
            id,
            grab,
            current: grab,
            origin,
        });
    }

    pub fn update_move(&mut self, point: Point) {
        if let Some(moving) = &mut self.moving {
            moving.current = point;
        }
    }

    pub fn take_move(&mut self) -> Option<MoveState> {
        self.moving.take()
    }

    /// Clear everything scoped to the current mode.
    pub fn reset(&mut self) {
        self.cancel_wall();
        self.clear_measure();
        self.disarm();
        self.moving = None;
    }
}
