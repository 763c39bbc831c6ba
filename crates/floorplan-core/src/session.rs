//! Editing session: one open layout plus everything needed to edit it.
//!
//! A session owns the document, its undo history, the selection, the active
//! tool and the camera. Hosts feed it [`EditorEvent`]s in arrival order and
//! persist the document through [`SaveTicket`]s.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::entities::{
    DEFAULT_TEXT, Door, Entity, EntityId, EntityKind, EntityPatch, FloorObject,
    OPENING_ATTACH_DISTANCE, TextLabel, Window, nearest_wall_attachment,
};
use crate::error::EditorError;
use crate::history::History;
use crate::input::{EditorEvent, Key, Modifiers, MouseButton, PointerTarget};
use crate::layout::{Layout, SettingsPatch};
use crate::presets::{PresetObject, PresetsFile};
use crate::snap::snap;
use crate::storage::StorageResult;
use crate::tools::{ToolMode, ToolState};
use crate::units::format_dimension;
use kurbo::{Point, Size, Vec2};

/// Padding in screen pixels used by [`EditorSession::fit_to_content`].
const FIT_PADDING: f64 = 50.0;

/// Something the host must do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Persist the current document.
    Save,
}

/// Result of [`EditorSession::handle_event`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The document changed.
    pub changed: bool,
    pub request: Option<HostRequest>,
}

/// A snapshot taken for an in-flight save.
///
/// Hand it back to [`EditorSession::complete_save`] with the storage result.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    pub slug: String,
    /// The document to write, with its update time stamped.
    pub layout: Layout,
    /// Session revision when the snapshot was taken.
    pub revision: u64,
    layout_id: String,
}

/// The editing session.
pub struct EditorSession {
    layout: Option<Layout>,
    history: History,
    selection: Vec<EntityId>,
    mode: ToolMode,
    tools: ToolState,
    camera: Camera,
    show_grid: bool,
    is_panning: bool,
    /// Last screen position of a held pointer.
    drag_anchor: Option<Point>,
    dirty: bool,
    revision: u64,
    text_input_focused: bool,
    presets: Option<PresetsFile>,
    config: EditorConfig,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            layout: None,
            history: History::new(),
            selection: Vec::new(),
            mode: ToolMode::default(),
            tools: ToolState::new(),
            camera: Camera::with_display_scale(config.default_settings.scale),
            show_grid: true,
            is_panning: false,
            drag_anchor: None,
            dirty: false,
            revision: 0,
            text_input_focused: false,
            presets: None,
            config,
        }
    }

    // --- Document lifecycle ---

    /// Start a new, unsaved layout with the configured default settings.
    pub fn new_layout(&mut self, name: impl Into<String>) {
        let layout = Layout::with_settings(name, self.config.default_settings.clone());
        log::info!("Created layout {} ({})", layout.name, layout.slug);
        self.install(layout, true);
    }

    /// Open an existing layout.
    pub fn load_layout(&mut self, layout: Layout) {
        log::info!(
            "Opened layout {} ({} entities)",
            layout.slug,
            layout.entities.len()
        );
        self.install(layout, false);
    }

    /// Close the current layout, discarding unsaved changes.
    pub fn close(&mut self) {
        if let Some(layout) = self.layout.take() {
            log::info!("Closed layout {}", layout.slug);
        }
        self.history.clear();
        self.selection.clear();
        self.tools.reset();
        self.dirty = false;
        self.revision += 1;
    }

    fn install(&mut self, layout: Layout, dirty: bool) {
        self.history.reset(&layout.entities);
        self.selection.clear();
        self.tools.reset();
        self.camera.reset();
        self.camera.set_display_scale(layout.settings.scale);
        self.layout = Some(layout);
        self.dirty = dirty;
        self.revision += 1;
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    // --- Mutations ---

    /// Append an entity. Recorded in history.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), EditorError> {
        let Some(layout) = self.layout.as_mut() else {
            return Err(EditorError::NoDocument);
        };
        if layout.contains(entity.id()) {
            return Err(EditorError::DuplicateEntity(entity.id().to_string()));
        }
        self.history.push(&layout.entities);
        log::debug!("Adding {} {}", entity.kind(), entity.id());
        layout.add_entity(entity)?;
        self.mark_changed();
        Ok(())
    }

    /// Shallow-merge `patch` into an entity. Unknown ids are ignored.
    pub fn update_entity(&mut self, id: &str, patch: &EntityPatch) -> bool {
        let Some(layout) = self.layout.as_mut() else {
            return false;
        };
        if !layout.contains(id) {
            return false;
        }
        self.history.push(&layout.entities);
        layout.update_entity(id, patch);
        self.mark_changed();
        true
    }

    /// Remove entities and drop them from the selection. Returns the number
    /// removed; unknown ids are ignored.
    pub fn delete_entities<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let Some(layout) = self.layout.as_mut() else {
            return 0;
        };
        if !ids.iter().any(|id| layout.contains(id.as_ref())) {
            return 0;
        }
        self.history.push(&layout.entities);
        let removed = layout.remove_entities(ids);
        self.selection
            .retain(|selected| !ids.iter().any(|id| id.as_ref() == selected.as_str()));
        self.mark_changed();
        removed
    }

    /// Delete every selected entity.
    pub fn delete_selection(&mut self) -> usize {
        let ids = std::mem::take(&mut self.selection);
        self.delete_entities(&ids)
    }

    pub fn undo(&mut self) -> bool {
        let Some(layout) = self.layout.as_mut() else {
            return false;
        };
        if !self.history.undo(&mut layout.entities) {
            return false;
        }
        self.after_history_step();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(layout) = self.layout.as_mut() else {
            return false;
        };
        if !self.history.redo(&mut layout.entities) {
            return false;
        }
        self.after_history_step();
        true
    }

    fn after_history_step(&mut self) {
        if let Some(layout) = &self.layout {
            self.selection.retain(|id| layout.contains(id));
        }
        self.tools.take_move();
        self.mark_changed();
    }

    /// Merge a settings patch. Settings are not part of the undo history.
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        layout.settings.apply(patch);
        self.camera.set_display_scale(layout.settings.scale);
        self.mark_changed();
    }

    // --- Selection ---

    /// Select `id`, replacing the selection, or toggle its membership.
    pub fn select(&mut self, id: &str, toggle: bool) {
        if !self.layout.as_ref().is_some_and(|l| l.contains(id)) {
            return;
        }
        if toggle {
            match self.selection.iter().position(|s| s == id) {
                Some(index) => {
                    self.selection.remove(index);
                }
                None => self.selection.push(id.to_string()),
            }
        } else {
            self.selection = vec![id.to_string()];
        }
    }

    /// Replace the selection with the known ids among `ids`, in order.
    pub fn select_many<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.selection.clear();
        let Some(layout) = &self.layout else {
            return;
        };
        for id in ids {
            let id = id.as_ref();
            if layout.contains(id) && !self.selection.iter().any(|s| s == id) {
                self.selection.push(id.to_string());
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected entities in selection order.
    pub fn selected_entities(&self) -> Vec<&Entity> {
        let Some(layout) = &self.layout else {
            return Vec::new();
        };
        self.selection
            .iter()
            .filter_map(|id| layout.entity(id))
            .collect()
    }

    // --- Tools ---

    /// Switch tools, abandoning all transient state and the selection.
    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        self.tools.reset();
        self.selection.clear();
        if self.mode != mode {
            log::debug!("Tool mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Arm a preset for placement and switch to object mode.
    pub fn arm_preset(&mut self, preset: PresetObject) {
        self.set_tool_mode(ToolMode::Object);
        self.tools.arm(preset);
    }

    /// Arm a preset from the loaded library (or the built-in one) by name.
    pub fn arm_preset_by_name(&mut self, name: &str) -> bool {
        let preset = match &self.presets {
            Some(presets) => presets.find(name).cloned(),
            None => PresetsFile::default().find(name).cloned(),
        };
        match preset {
            Some(preset) => {
                self.arm_preset(preset);
                true
            }
            None => false,
        }
    }

    pub fn cancel_placement(&mut self) {
        self.tools.disarm();
    }

    pub fn set_presets(&mut self, presets: PresetsFile) {
        self.presets = Some(presets);
    }

    pub fn presets(&self) -> Option<&PresetsFile> {
        self.presets.as_ref()
    }

    /// Snap a document point against the open layout.
    pub fn snap_document_point(&self, point: Point) -> Point {
        match &self.layout {
            Some(layout) => snap(point, layout).point,
            None => point,
        }
    }

    fn finish_wall(&mut self) {
        let Some(wall) = self.tools.finish_wall() else {
            return;
        };
        if let Err(e) = self.add_entity(wall) {
            log::warn!("Discarding wall: {}", e);
        }
    }

    /// Current measurement formatted in the layout's units.
    pub fn measurement_label(&self) -> Option<String> {
        let units = self.layout.as_ref()?.settings.units;
        Some(format_dimension(self.tools.measurement()?, units))
    }

    // --- Events ---

    /// Process one input event.
    pub fn handle_event(&mut self, event: EditorEvent) -> EventOutcome {
        log::debug!("{:?} ({} mode)", event, self.mode);
        let revision = self.revision;

        let request = match event {
            EditorEvent::PointerDown {
                position,
                button,
                target,
                modifiers,
            } => {
                self.on_pointer_down(position, button, target, modifiers);
                None
            }
            EditorEvent::PointerMove { position } => {
                self.on_pointer_move(position);
                None
            }
            EditorEvent::PointerUp { .. } => {
                self.on_pointer_up();
                None
            }
            EditorEvent::Click {
                position,
                target,
                modifiers,
            } => {
                self.on_click(position, target, modifiers);
                None
            }
            EditorEvent::Wheel { position, delta_y } => {
                self.camera
                    .zoom_wheel(position, delta_y, self.config.zoom_step);
                None
            }
            EditorEvent::KeyDown {
                key,
                modifiers,
                repeat,
            } => self.on_key_down(key, modifiers, repeat),
            EditorEvent::KeyUp { key } => {
                if key == Key::Space {
                    self.is_panning = false;
                }
                None
            }
        };

        EventOutcome {
            changed: self.revision != revision,
            request,
        }
    }

    fn on_pointer_down(
        &mut self,
        position: Point,
        button: MouseButton,
        target: PointerTarget,
        modifiers: Modifiers,
    ) {
        self.drag_anchor = Some(position);
        if self.is_panning || button != MouseButton::Left || self.layout.is_none() {
            return;
        }

        let raw = self.camera.screen_to_document(position);
        let point = self.snap_document_point(raw);
        match self.mode {
            ToolMode::Wall => {
                if self.tools.is_drawing_wall() {
                    self.tools.add_wall_point(point);
                } else {
                    self.tools.start_wall(point);
                }
            }
            ToolMode::Measure => self.tools.start_measure(point),
            ToolMode::Select => match target {
                PointerTarget::Background => self.clear_selection(),
                // The click that follows toggles membership
                PointerTarget::Entity(_) if modifiers.toggles_selection() => {}
                PointerTarget::Entity(id) => self.begin_entity_move(id, raw),
            },
            _ => {}
        }
    }

    fn begin_entity_move(&mut self, id: EntityId, grab: Point) {
        let origin = self
            .layout
            .as_ref()
            .and_then(|l| l.entity(&id))
            .filter(|e| e.is_draggable())
            .map(Entity::position);
        let Some(origin) = origin else {
            return;
        };
        if !self.selection.contains(&id) {
            self.select(&id, false);
        }
        self.tools.begin_move(id, grab, origin);
    }

    fn on_pointer_move(&mut self, position: Point) {
        if self.is_panning {
            if let Some(anchor) = self.drag_anchor {
                self.camera.pan(position - anchor);
                self.drag_anchor = Some(position);
            }
            return;
        }

        let raw = self.camera.screen_to_document(position);
        let point = self.snap_document_point(raw);
        if self.mode == ToolMode::Measure {
            self.tools.update_measure(point);
        }
        self.tools.update_move(raw);
        self.tools.hover = Some(point);
    }

    fn on_pointer_up(&mut self) {
        self.drag_anchor = None;
        let Some(moved) = self.tools.take_move() else {
            return;
        };
        if moved.delta() != Vec2::ZERO {
            let target = moved.target();
            self.update_entity(&moved.id, &EntityPatch::position(target.x, target.y));
        }
    }

    fn on_click(&mut self, position: Point, target: PointerTarget, modifiers: Modifiers) {
        if self.is_panning {
            return;
        }

        match self.mode {
            ToolMode::Select => match target {
                PointerTarget::Entity(id) => self.select(&id, modifiers.toggles_selection()),
                PointerTarget::Background => self.clear_selection(),
            },
            // Handled on pointer down
            ToolMode::Wall | ToolMode::Measure => {}
            ToolMode::Door | ToolMode::Window | ToolMode::Object | ToolMode::Text => {
                if let PointerTarget::Entity(id) = &target {
                    let kind = self.layout.as_ref().and_then(|l| l.entity(id)).map(Entity::kind);
                    if kind.is_some_and(|k| k != EntityKind::Wall) {
                        self.select(id, modifiers.toggles_selection());
                        return;
                    }
                }
                let point = self.camera.screen_to_document(position);
                self.place_at(point);
            }
        }
    }

    /// Create the active tool's entity at a document point.
    fn place_at(&mut self, point: Point) {
        let Some(layout) = &self.layout else {
            return;
        };
        let snapped = snap(point, layout).point;
        let entity = match self.mode {
            ToolMode::Object => match self.tools.placing() {
                Some(preset) => Entity::Object(FloorObject::from_preset(preset, snapped)),
                None => return,
            },
            ToolMode::Text => Entity::Text(TextLabel::new(DEFAULT_TEXT, snapped)),
            ToolMode::Door | ToolMode::Window => {
                let Some(attachment) =
                    nearest_wall_attachment(&layout.entities, point, OPENING_ATTACH_DISTANCE)
                else {
                    log::debug!("No wall within reach of {:?}", point);
                    return;
                };
                if self.mode == ToolMode::Door {
                    Entity::Door(Door::attached(&attachment))
                } else {
                    Entity::Window(Window::attached(&attachment))
                }
            }
            _ => return,
        };

        if let Err(e) = self.add_entity(entity) {
            log::warn!("Placement failed: {}", e);
        }
    }

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers, repeat: bool) -> Option<HostRequest> {
        if self.text_input_focused {
            return None;
        }

        match key {
            Key::Space => {
                if !repeat {
                    self.is_panning = true;
                }
            }
            Key::Escape => {
                self.tools.cancel_wall();
                self.set_tool_mode(ToolMode::Select);
            }
            Key::Enter => {
                if self.tools.is_drawing_wall() {
                    self.finish_wall();
                }
            }
            Key::Delete | Key::Backspace => {
                self.delete_selection();
            }
            Key::Char(_) => {
                let c = key.as_char()?;
                return self.on_shortcut(c, modifiers);
            }
            Key::Other(_) => {}
        }
        None
    }

    fn on_shortcut(&mut self, c: char, modifiers: Modifiers) -> Option<HostRequest> {
        if modifiers.command() {
            match c {
                'z' if modifiers.shift => {
                    self.redo();
                }
                'z' => {
                    self.undo();
                }
                'y' => {
                    self.redo();
                }
                's' if self.layout.is_some() => return Some(HostRequest::Save),
                _ => {}
            }
            return None;
        }

        if c == 'g' {
            self.show_grid = !self.show_grid;
        } else if let Some(mode) = ToolMode::from_shortcut(c) {
            self.set_tool_mode(mode);
        }
        None
    }

    // --- Persistence ---

    /// Snapshot the layout for saving. None when no layout is open.
    pub fn begin_save(&self) -> Option<SaveTicket> {
        let mut layout = self.layout.clone()?;
        layout.touch();
        Some(SaveTicket {
            slug: layout.slug.clone(),
            layout_id: layout.id.clone(),
            revision: self.revision,
            layout,
        })
    }

    /// Record the outcome of a save started with [`begin_save`].
    ///
    /// Returns true when the session became clean. It stays dirty if the
    /// save failed or the document changed after the ticket was taken.
    ///
    /// [`begin_save`]: EditorSession::begin_save
    pub fn complete_save(&mut self, ticket: SaveTicket, result: &StorageResult<()>) -> bool {
        if let Err(e) = result {
            log::warn!("Failed to save {}: {}", ticket.slug, e);
            return false;
        }

        let Some(layout) = self.layout.as_mut() else {
            return false;
        };
        if layout.id != ticket.layout_id {
            return false;
        }
        layout.updated_at = ticket.layout.updated_at;

        if self.revision != ticket.revision {
            log::debug!("Layout {} changed during save", ticket.slug);
            return false;
        }
        log::info!("Saved layout {}", ticket.slug);
        self.dirty = false;
        true
    }

    /// Give the layout a new identity and snapshot it for saving.
    pub fn save_as(&mut self, name: impl Into<String>) -> Option<SaveTicket> {
        self.layout.as_mut()?.reidentify(name);
        self.mark_changed();
        self.begin_save()
    }

    /// Copy of the layout for an export service.
    pub fn export_snapshot(&self) -> Option<Layout> {
        self.layout.clone()
    }

    // --- View ---

    /// Fit the camera to the layout's content.
    pub fn fit_to_content(&mut self, viewport: Size) {
        if let Some(bounds) = self.layout.as_ref().and_then(Layout::bounds) {
            self.camera.fit_to_bounds(bounds, viewport, FIT_PADDING);
        }
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    // --- Accessors ---

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Counter bumped on every document change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn text_input_focused(&self) -> bool {
        self.text_input_focused
    }

    /// While set, keyboard shortcuts are ignored.
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.layout.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.layout.is_some() && self.history.can_redo()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DimensionLine, ObjectType, Wall};
    use crate::layout::Units;
    use crate::storage::{LayoutStorage, MemoryStorage, StorageError};

    fn session() -> EditorSession {
        let mut session = EditorSession::default();
        session.new_layout("Lab");
        session
    }

    fn label(id: &str, x: f64, y: f64) -> Entity {
        let mut text = TextLabel::new(id, Point::new(x, y));
        text.base.id = id.to_string();
        Entity::Text(text)
    }

    fn wall(id: &str, points: Vec<Point>) -> Entity {
        let mut wall = Wall::from_points(points);
        wall.base.id = id.to_string();
        Entity::Wall(wall)
    }

    /// Screen position of a document point under the session camera.
    fn screen(session: &EditorSession, x: f64, y: f64) -> Point {
        session.camera().document_to_screen(Point::new(x, y))
    }

    fn ids(session: &EditorSession) -> Vec<String> {
        session
            .layout()
            .unwrap()
            .entities
            .iter()
            .map(|e| e.id().to_string())
            .collect()
    }

    #[test]
    fn test_lifecycle_dirty_flags() {
        let mut session = EditorSession::default();
        assert!(session.layout().is_none());
        assert!(!session.is_dirty());

        session.new_layout("New Lab");
        assert!(session.is_dirty());
        assert_eq!(session.layout().unwrap().slug, "new-lab");

        session.load_layout(Layout::new("Loaded"));
        assert!(!session.is_dirty());
        assert!(!session.can_undo());

        session.close();
        assert!(session.layout().is_none());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_load_follows_display_scale() {
        let mut session = EditorSession::default();
        let mut layout = Layout::new("Scaled");
        layout.settings.scale = 8.0;
        session.load_layout(layout);
        assert_eq!(session.camera().display_scale, 8.0);

        session.update_settings(&SettingsPatch {
            scale: Some(2.0),
            ..Default::default()
        });
        assert_eq!(session.camera().display_scale, 2.0);
        assert!(session.is_dirty());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_add_entity_errors() {
        let mut session = EditorSession::default();
        assert_eq!(session.add_entity(label("a", 0.0, 0.0)), Err(EditorError::NoDocument));

        session.new_layout("Lab");
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        assert_eq!(
            session.add_entity(label("a", 5.0, 5.0)),
            Err(EditorError::DuplicateEntity("a".to_string()))
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut session = session();
        let revision = session.revision();
        assert!(!session.update_entity("missing", &EntityPatch::position(1.0, 1.0)));
        assert_eq!(session.revision(), revision);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_delete_updates_selection() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        session.add_entity(label("b", 0.0, 0.0)).unwrap();
        session.select_many(&["a", "b", "missing"]);
        assert_eq!(session.selection(), ["a", "b"]);

        assert_eq!(session.delete_entities(&["a"]), 1);
        assert_eq!(session.selection(), ["b"]);
        assert_eq!(session.delete_entities(&["nope"]), 0);
        assert_eq!(session.history().len(), 4);
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        session.select("a", false);
        assert!(session.undo());
        assert!(session.selection().is_empty());
        assert!(session.redo());
        assert_eq!(ids(&session), vec!["a"]);
        assert!(!session.redo());
    }

    #[test]
    fn test_select_toggle() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        session.add_entity(label("b", 0.0, 0.0)).unwrap();

        session.select("a", false);
        session.select("b", true);
        assert_eq!(session.selection(), ["a", "b"]);
        session.select("a", true);
        assert_eq!(session.selection(), ["b"]);
        session.select("a", false);
        assert_eq!(session.selection(), ["a"]);
        session.select("ghost", false);
        assert_eq!(session.selection(), ["a"]);

        let selected = session.selected_entities();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id(), "a");
    }

    #[test]
    fn test_mode_switch_clears_transient_state() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        session.select("a", false);
        session.set_tool_mode(ToolMode::Wall);
        assert!(session.selection().is_empty());

        session.handle_event(EditorEvent::down(screen(&session, 0.0, 0.0)));
        session.handle_event(EditorEvent::down(screen(&session, 120.0, 0.0)));
        assert_eq!(session.tools().wall_points().len(), 2);

        session.set_tool_mode(ToolMode::Select);
        assert!(!session.tools().is_drawing_wall());
        assert!(session.tools().wall_points().is_empty());
        assert_eq!(session.layout().unwrap().entities.len(), 1);
    }

    #[test]
    fn test_arm_preset_switches_to_object() {
        let mut session = session();
        session.set_tool_mode(ToolMode::Wall);
        session.handle_event(EditorEvent::down(screen(&session, 0.0, 0.0)));

        assert!(session.arm_preset_by_name("Office Chair"));
        assert_eq!(session.mode(), ToolMode::Object);
        assert!(!session.tools().is_drawing_wall());
        assert_eq!(session.tools().placing().unwrap().object_type, ObjectType::Chair);
        assert!(!session.arm_preset_by_name("Throne"));
    }

    #[test]
    fn test_object_placement_stays_armed() {
        let mut session = session();
        session.arm_preset(PresetObject::new("Desk", ObjectType::Desk, 60.0, 30.0));

        session.handle_event(EditorEvent::click(screen(&session, 120.0, 96.0)));
        session.handle_event(EditorEvent::click(screen(&session, 240.0, 96.0)));

        let objects: Vec<_> = session.layout().unwrap().objects().cloned().collect();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].center(), Point::new(120.0, 96.0));
        assert!(session.tools().placing().is_some());

        session.cancel_placement();
        session.handle_event(EditorEvent::click(screen(&session, 360.0, 96.0)));
        assert_eq!(session.layout().unwrap().entities.len(), 2);
    }

    #[test]
    fn test_text_click_on_entity_selects() {
        let mut session = session();
        session.add_entity(label("a", 48.0, 48.0)).unwrap();
        session.set_tool_mode(ToolMode::Text);

        let outcome = session.handle_event(EditorEvent::click_on(
            screen(&session, 48.0, 48.0),
            "a",
            Modifiers::NONE,
        ));
        assert!(!outcome.changed);
        assert_eq!(session.selection(), ["a"]);

        let outcome = session.handle_event(EditorEvent::click(screen(&session, 97.0, 143.0)));
        assert!(outcome.changed);
        let Some(Entity::Text(text)) = session.layout().unwrap().entities.last() else {
            panic!("expected a text label");
        };
        assert_eq!(text.text, DEFAULT_TEXT);
        assert_eq!((text.base.x, text.base.y), (96.0, 144.0));
    }

    #[test]
    fn test_door_on_wall_and_nowhere() {
        let mut session = session();
        session
            .add_entity(wall("w", vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]))
            .unwrap();
        session.set_tool_mode(ToolMode::Door);

        session.handle_event(EditorEvent::click_on(
            screen(&session, 25.0, 10.0),
            "w",
            Modifiers::NONE,
        ));
        let Some(Entity::Door(door)) = session.layout().unwrap().entities.last() else {
            panic!("expected a door");
        };
        assert_eq!(door.wall_id, "w");
        assert!((door.wall_position - 0.25).abs() < 1e-9);
        assert_eq!((door.base.x, door.base.y), (25.0, 0.0));
        assert!(session.selection().is_empty());

        let count = session.layout().unwrap().entities.len();
        session.handle_event(EditorEvent::click(screen(&session, 50.0, 200.0)));
        assert_eq!(session.layout().unwrap().entities.len(), count);
    }

    #[test]
    fn test_window_mode_selects_dimension() {
        let mut session = session();
        let mut dim = DimensionLine::new(Point::new(0.0, 0.0), Point::new(50.0, 0.0));
        dim.base.id = "dim".to_string();
        session.add_entity(Entity::Dimension(dim)).unwrap();
        session.set_tool_mode(ToolMode::Window);

        session.handle_event(EditorEvent::click_on(
            screen(&session, 10.0, 0.0),
            "dim",
            Modifiers::NONE,
        ));
        assert_eq!(session.selection(), ["dim"]);
        assert_eq!(session.layout().unwrap().entities.len(), 1);
    }

    #[test]
    fn test_drag_moves_object_without_snapping() {
        let mut session = session();
        session.add_entity(label("a", 10.0, 10.0)).unwrap();

        session.handle_event(EditorEvent::down_on(screen(&session, 11.0, 11.0), "a"));
        assert_eq!(session.selection(), ["a"]);
        session.handle_event(EditorEvent::moved(screen(&session, 14.5, 18.25)));
        let outcome = session.handle_event(EditorEvent::up(screen(&session, 14.5, 18.25)));
        assert!(outcome.changed);

        let moved = session.layout().unwrap().entity("a").unwrap().position();
        assert_eq!(moved, Point::new(13.5, 17.25));
        assert!(session.undo());
        assert_eq!(
            session.layout().unwrap().entity("a").unwrap().position(),
            Point::new(10.0, 10.0)
        );
    }

    #[test]
    fn test_shift_click_extends_selection() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        session.add_entity(label("b", 40.0, 0.0)).unwrap();
        session.select("a", false);

        let position = screen(&session, 41.0, 1.0);
        let shift_click = |session: &mut EditorSession| {
            session.handle_event(EditorEvent::PointerDown {
                position,
                button: MouseButton::Left,
                target: PointerTarget::Entity("b".to_string()),
                modifiers: Modifiers::SHIFT,
            });
            session.handle_event(EditorEvent::up(position));
            session.handle_event(EditorEvent::click_on(position, "b", Modifiers::SHIFT));
        };

        shift_click(&mut session);
        assert_eq!(session.selection(), ["a", "b"]);
        assert!(session.tools().moving().is_none());

        shift_click(&mut session);
        assert_eq!(session.selection(), ["a"]);
    }

    #[test]
    fn test_press_without_drag_does_not_mutate() {
        let mut session = session();
        session
            .add_entity(wall("w", vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]))
            .unwrap();
        let revision = session.revision();

        session.handle_event(EditorEvent::down_on(screen(&session, 50.0, 0.0), "w"));
        session.handle_event(EditorEvent::up(screen(&session, 50.0, 0.0)));
        assert_eq!(session.revision(), revision);
        assert!(session.tools().moving().is_none());
    }

    #[test]
    fn test_space_drag_pans() {
        let mut session = session();
        session.handle_event(EditorEvent::key(Key::Space));
        assert!(session.is_panning());

        session.handle_event(EditorEvent::down(Point::new(100.0, 100.0)));
        session.handle_event(EditorEvent::moved(Point::new(130.0, 90.0)));
        session.handle_event(EditorEvent::moved(Point::new(140.0, 90.0)));
        session.handle_event(EditorEvent::up(Point::new(140.0, 90.0)));
        assert_eq!(session.camera().offset, Vec2::new(40.0, -10.0));

        session.handle_event(EditorEvent::moved(Point::new(0.0, 0.0)));
        assert_eq!(session.camera().offset, Vec2::new(40.0, -10.0));

        session.handle_event(EditorEvent::KeyUp { key: Key::Space });
        assert!(!session.is_panning());
    }

    #[test]
    fn test_measure_updates_after_start() {
        let mut session = session();
        session.set_tool_mode(ToolMode::Measure);
        session.handle_event(EditorEvent::moved(screen(&session, 30.0, 30.0)));
        assert!(session.measurement_label().is_none());

        session.handle_event(EditorEvent::down(screen(&session, 0.0, 0.0)));
        session.handle_event(EditorEvent::moved(screen(&session, 61.0, 1.0)));
        assert_eq!(session.measurement_label().as_deref(), Some("5'"));
    }

    #[test]
    fn test_keyboard_suppressed_while_typing() {
        let mut session = session();
        session.set_text_input_focused(true);
        session.handle_event(EditorEvent::key(Key::Char('w')));
        session.handle_event(EditorEvent::key(Key::Char('g')));
        assert_eq!(session.mode(), ToolMode::Select);
        assert!(session.show_grid());

        session.set_text_input_focused(false);
        session.handle_event(EditorEvent::key(Key::Char('w')));
        session.handle_event(EditorEvent::key(Key::Char('g')));
        assert_eq!(session.mode(), ToolMode::Wall);
        assert!(!session.show_grid());
    }

    #[test]
    fn test_command_shortcuts() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();

        session.handle_event(EditorEvent::key_with(Key::Char('z'), Modifiers::CTRL));
        assert!(session.layout().unwrap().entities.is_empty());
        let redo = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        session.handle_event(EditorEvent::key_with(Key::Char('Z'), redo));
        assert_eq!(ids(&session), vec!["a"]);

        session.handle_event(EditorEvent::key_with(Key::Char('z'), Modifiers::CTRL));
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        session.handle_event(EditorEvent::key_with(Key::Char('y'), meta));
        assert_eq!(ids(&session), vec!["a"]);

        let outcome = session.handle_event(EditorEvent::key_with(Key::Char('s'), Modifiers::CTRL));
        assert_eq!(outcome.request, Some(HostRequest::Save));

        // Command chords never switch tools
        session.handle_event(EditorEvent::key_with(Key::Char('w'), Modifiers::CTRL));
        assert_eq!(session.mode(), ToolMode::Select);
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        session.add_entity(label("b", 0.0, 0.0)).unwrap();
        session.select("b", false);

        let outcome = session.handle_event(EditorEvent::key(Key::Backspace));
        assert!(outcome.changed);
        assert_eq!(ids(&session), vec!["a"]);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_escape_cancels_wall() {
        let mut session = session();
        session.handle_event(EditorEvent::key(Key::Char('2')));
        session.handle_event(EditorEvent::down(screen(&session, 0.0, 0.0)));
        session.handle_event(EditorEvent::key(Key::Escape));
        assert_eq!(session.mode(), ToolMode::Select);
        assert!(!session.tools().is_drawing_wall());
    }

    #[test]
    fn test_save_ticket_semantics() {
        let mut session = session();
        let ticket = session.begin_save().unwrap();
        assert_eq!(ticket.slug, "lab");
        assert!(session.complete_save(ticket, &Ok(())));
        assert!(!session.is_dirty());

        session.add_entity(label("a", 0.0, 0.0)).unwrap();
        let ticket = session.begin_save().unwrap();
        session.add_entity(label("b", 0.0, 0.0)).unwrap();
        assert!(!session.complete_save(ticket, &Ok(())));
        assert!(session.is_dirty());

        let ticket = session.begin_save().unwrap();
        let failed = Err(StorageError::Io("disk full".to_string()));
        assert!(!session.complete_save(ticket, &failed));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_saved_timestamp_matches_storage() {
        let storage = MemoryStorage::new();
        let mut session = session();
        session.add_entity(label("a", 0.0, 0.0)).unwrap();

        let ticket = session.begin_save().unwrap();
        let slug = ticket.slug.clone();
        let result = pollster::block_on(storage.save(&slug, &ticket.layout, Default::default()));
        assert!(session.complete_save(ticket, &result));

        let stored = pollster::block_on(storage.load(&slug)).unwrap();
        assert_eq!(stored.updated_at, session.layout().unwrap().updated_at);
    }

    #[test]
    fn test_save_for_replaced_layout_is_ignored() {
        let mut session = session();
        let ticket = session.begin_save().unwrap();
        session.new_layout("Other");
        assert!(!session.complete_save(ticket, &Ok(())));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_save_as_reidentifies() {
        let mut session = EditorSession::default();
        assert!(session.save_as("Nothing").is_none());

        session.load_layout(Layout::new("Lab"));
        let old_id = session.layout().unwrap().id.clone();
        let ticket = session.save_as("Lab Copy").unwrap();
        assert_eq!(ticket.slug, "lab-copy");
        assert_ne!(ticket.layout.id, old_id);
        assert!(session.is_dirty());
        assert!(session.complete_save(ticket, &Ok(())));
    }

    #[test]
    fn test_measurement_label_meters() {
        let mut session = session();
        session.update_settings(&SettingsPatch {
            units: Some(Units::Meters),
            snap_to_grid: Some(false),
            ..Default::default()
        });
        session.set_tool_mode(ToolMode::Measure);
        session.handle_event(EditorEvent::down(screen(&session, 0.0, 0.0)));
        session.handle_event(EditorEvent::moved(screen(&session, 100.0, 0.0)));
        assert_eq!(session.measurement_label().as_deref(), Some("2.54m"));
    }

    #[test]
    fn test_fit_to_content() {
        let mut session = session();
        session.fit_to_content(Size::new(800.0, 600.0));
        assert_eq!(session.camera().zoom, 1.0);

        session
            .add_entity(wall("w", vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]))
            .unwrap();
        session.fit_to_content(Size::new(800.0, 600.0));
        assert!(session.camera().zoom > 1.0);
    }
}
