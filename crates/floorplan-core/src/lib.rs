//! Floorplan Core Library
//!
//! Document model and interactive editing engine for scaled floorplan layouts:
//! entities, snapping, undo/redo history, tool interaction and the
//! screen-to-document transform. Persistence and export are exposed as traits
//! so hosts can plug in their own backends.

pub mod camera;
pub mod config;
pub mod entities;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod layout;
pub mod presets;
pub mod session;
pub mod snap;
pub mod storage;
pub mod tools;
pub mod units;

pub use camera::Camera;
pub use config::{ConfigError, EditorConfig};
pub use entities::{
    DimensionLine, Door, Entity, EntityBase, EntityId, EntityKind, EntityPatch, EntityStyle,
    FloorObject, HingeSide, ObjectType, SwingDirection, TextLabel, Wall, WallAttachment, Window,
};
pub use error::EditorError;
pub use export::{ExportError, ExportFormat, ExportOptions, Exporter, Orientation};
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use input::{EditorEvent, Key, Modifiers, MouseButton, PointerTarget};
pub use layout::{Layout, LayoutSettings, LayoutSummary, PageSize, SettingsPatch, Units, slugify};
pub use presets::{PresetCategories, PresetObject, PresetsFile};
pub use session::{EditorSession, EventOutcome, HostRequest, SaveTicket};
pub use snap::{SNAP_RADIUS, SnapCandidate, SnapKind, SnapResult, snap, snap_point, snap_to_grid};
pub use storage::{
    AutoSaveManager, FileStorage, LayoutStorage, MemoryStorage, SaveOptions, StorageError,
    StorageResult,
};
pub use tools::{ToolMode, ToolState};
pub use units::{format_dimension, parse_dimension};
