//! Camera module for the screen-to-document transform.
//!
//! Document space is measured in inches. A screen point maps to a document
//! point through the pan offset (screen pixels), the interactive zoom factor
//! and the document's display scale (pixels per inch at zoom 1).

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;
/// Default wheel zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;
/// Default display scale in pixels per inch.
pub const DEFAULT_DISPLAY_SCALE: f64 = 4.0;

/// Convert a screen point to document coordinates.
pub fn to_document(device: Point, pan: Vec2, zoom: f64, display_scale: f64) -> Point {
    Point::new(
        (device.x - pan.x) / zoom / display_scale,
        (device.y - pan.y) / zoom / display_scale,
    )
}

/// Convert a document point to screen coordinates.
pub fn to_device(document: Point, pan: Vec2, zoom: f64, display_scale: f64) -> Point {
    Point::new(
        document.x * display_scale * zoom + pan.x,
        document.y * display_scale * zoom + pan.y,
    )
}

/// Camera manages the view transform for the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%)
    pub zoom: f64,
    /// Pixels per document inch at zoom 1
    pub display_scale: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            display_scale: DEFAULT_DISPLAY_SCALE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera for a document rendered at `display_scale` px/in.
    pub fn with_display_scale(display_scale: f64) -> Self {
        let mut camera = Self::default();
        camera.set_display_scale(display_scale);
        camera
    }

    /// Affine transform mapping document coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom * self.display_scale)
    }

    /// Affine transform mapping screen coordinates to document coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / (self.zoom * self.display_scale)) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to document coordinates.
    pub fn screen_to_document(&self, screen_point: Point) -> Point {
        to_document(screen_point, self.offset, self.zoom, self.display_scale)
    }

    /// Convert a document point to screen coordinates.
    pub fn document_to_screen(&self, document_point: Point) -> Point {
        to_device(document_point, self.offset, self.zoom, self.display_scale)
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        if delta.x.is_finite() && delta.y.is_finite() {
            self.offset += delta;
        }
    }

    /// Replace the pan offset.
    pub fn set_offset(&mut self, offset: Vec2) {
        if offset.x.is_finite() && offset.y.is_finite() {
            self.offset = offset;
        }
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Set pixels per inch. Non-positive values are ignored.
    pub fn set_display_scale(&mut self, display_scale: f64) {
        if display_scale.is_finite() && display_scale > 0.0 {
            self.display_scale = display_scale;
        }
    }

    /// Zoom the camera, keeping the document point under `pointer` fixed.
    pub fn zoom_at(&mut self, pointer: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 || !pointer.x.is_finite() || !pointer.y.is_finite() {
            return;
        }

        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        // newPan = pointer - (pointer - oldPan) / oldZoom * newZoom
        let anchor = pointer.to_vec2();
        self.offset = anchor - (anchor - self.offset) / old_zoom * new_zoom;
        self.zoom = new_zoom;
    }

    /// Apply a wheel gesture: scrolling up zooms in by `step`, down zooms out.
    pub fn zoom_wheel(&mut self, pointer: Point, delta_y: f64, step: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() || !step.is_finite() || step <= 0.0 {
            return;
        }
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.zoom_at(pointer, factor);
    }

    /// Screen-space rectangle covered by a page of the given size in inches.
    pub fn page_rect(&self, page_width: f64, page_height: f64) -> Rect {
        let origin = self.document_to_screen(Point::ZERO);
        let corner = self.document_to_screen(Point::new(page_width, page_height));
        Rect::from_points(origin, corner)
    }

    /// Reset pan and zoom, keeping the display scale.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit a document-space rectangle into the viewport.
    ///
    /// A degenerate viewport or rectangle leaves the camera unchanged.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }

        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded_viewport.width / (bounds.width() * self.display_scale);
        let scale_y = padded_viewport.height / (bounds.height() * self.display_scale);
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        let pixels = self.zoom * self.display_scale;
        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);

        self.offset = Vec2::new(
            viewport_center.x - bounds_center.x * pixels,
            viewport_center.y - bounds_center.y * pixels,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
        assert!((camera.display_scale - DEFAULT_DISPLAY_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_document_uses_display_scale() {
        let camera = Camera::new();
        let doc = camera.screen_to_document(Point::new(48.0, 96.0));
        assert!((doc.x - 12.0).abs() < f64::EPSILON);
        assert!((doc.y - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_document_with_offset_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(40.0, 80.0);
        camera.zoom = 2.0;
        let doc = camera.screen_to_document(Point::new(120.0, 160.0));
        assert!((doc.x - 10.0).abs() < f64::EPSILON);
        assert!((doc.y - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::with_display_scale(3.0);
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let doc = camera.screen_to_document(original);
        let back = camera.document_to_screen(doc);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);

        let via_affine = camera.transform() * doc;
        assert!((via_affine.x - original.x).abs() < 1e-10);
        assert!((via_affine.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        camera.zoom = 1.0;
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);

        camera.set_zoom(42.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(35.0, -12.5);
        camera.zoom = 0.8;

        let pointer = Point::new(317.0, 205.0);
        let before = camera.screen_to_document(pointer);
        camera.zoom_at(pointer, 1.1);
        let after = camera.screen_to_document(pointer);

        assert!((camera.zoom - 0.88).abs() < 1e-12);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_wheel_direction() {
        let mut camera = Camera::new();
        camera.zoom_wheel(Point::new(10.0, 10.0), -120.0, DEFAULT_ZOOM_STEP);
        assert!((camera.zoom - 1.1).abs() < 1e-12);
        camera.zoom_wheel(Point::new(10.0, 10.0), 120.0, DEFAULT_ZOOM_STEP);
        assert!((camera.zoom - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_input_is_ignored() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(5.0, 5.0);
        let before = camera.clone();

        camera.zoom_at(Point::new(f64::NAN, 0.0), 2.0);
        camera.zoom_at(Point::ZERO, 0.0);
        camera.zoom_at(Point::ZERO, -1.0);
        camera.set_display_scale(0.0);
        camera.pan(Vec2::new(f64::INFINITY, 0.0));
        camera.fit_to_bounds(Rect::new(0.0, 0.0, 100.0, 100.0), Size::ZERO, 10.0);

        assert_eq!(camera, before);
    }

    #[test]
    fn test_fit_to_bounds_centers_page() {
        let mut camera = Camera::new();
        camera.fit_to_bounds(Rect::new(0.0, 0.0, 100.0, 50.0), Size::new(800.0, 800.0), 0.0);
        assert!((camera.zoom - 2.0).abs() < 1e-12);
        let center = camera.document_to_screen(Point::new(50.0, 25.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
