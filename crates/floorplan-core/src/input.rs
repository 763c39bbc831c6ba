//! Input events delivered by the host to an editing session.
//!
//! Positions are screen coordinates; the session converts them to document
//! space itself.

use crate::entities::EntityId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether a click should toggle selection instead of replacing it.
    pub fn toggles_selection(self) -> bool {
        self.shift || self.command()
    }
}

/// What the pointer was over when the event fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Empty canvas.
    #[default]
    Background,
    /// A rendered entity.
    Entity(EntityId),
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// A letter or symbol key, as typed.
    Char(char),
    Space,
    Escape,
    Enter,
    Delete,
    Backspace,
    /// Any other key, by name.
    Other(String),
}

impl Key {
    /// Lowercased character for letter and digit keys.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }

    /// Parse a host key name such as `"Escape"`, `" "` or `"z"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Enter" | "Return" => Key::Enter,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }
}

/// A single input event. Sessions process these strictly in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    PointerDown {
        position: Point,
        button: MouseButton,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        button: MouseButton,
    },
    Click {
        position: Point,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    Wheel {
        position: Point,
        delta_y: f64,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        repeat: bool,
    },
    KeyUp {
        key: Key,
    },
}

impl EditorEvent {
    /// Left-button press on the background.
    pub fn down(position: Point) -> Self {
        EditorEvent::PointerDown {
            position,
            button: MouseButton::Left,
            target: PointerTarget::Background,
            modifiers: Modifiers::NONE,
        }
    }

    /// Left-button press on an entity.
    pub fn down_on(position: Point, id: impl Into<EntityId>) -> Self {
        EditorEvent::PointerDown {
            position,
            button: MouseButton::Left,
            target: PointerTarget::Entity(id.into()),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(position: Point) -> Self {
        EditorEvent::PointerUp {
            position,
            button: MouseButton::Left,
        }
    }

    pub fn moved(position: Point) -> Self {
        EditorEvent::PointerMove { position }
    }

    /// Click on the background.
    pub fn click(position: Point) -> Self {
        EditorEvent::Click {
            position,
            target: PointerTarget::Background,
            modifiers: Modifiers::NONE,
        }
    }

    /// Click on an entity.
    pub fn click_on(position: Point, id: impl Into<EntityId>, modifiers: Modifiers) -> Self {
        EditorEvent::Click {
            position,
            target: PointerTarget::Entity(id.into()),
            modifiers,
        }
    }

    /// Key press without modifiers.
    pub fn key(key: Key) -> Self {
        EditorEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
            repeat: false,
        }
    }

    /// Key press with modifiers.
    pub fn key_with(key: Key, modifiers: Modifiers) -> Self {
        EditorEvent::KeyDown {
            key,
            modifiers,
            repeat: false,
        }
    }
}
