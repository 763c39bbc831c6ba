//! Keyboard shortcut registry and documentation.

use floorplan_core::ToolMode;
use std::io::{self, Write};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub description: String,
}

impl Shortcut {
    pub fn new(
        key: impl Into<String>,
        ctrl: bool,
        shift: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            ctrl,
            shift,
            description: description.into(),
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    ///
    /// Ctrl also stands for Cmd on macOS.
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.as_str());
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut::new("S", true, false, "Save"),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("Delete", false, false, "Delete selected entities"),
            Shortcut::new("Backspace", false, false, "Delete selected entities"),
            Shortcut::new("Escape", false, false, "Cancel wall and return to select"),
            Shortcut::new("Enter", false, false, "Finish the wall being drawn"),
            Shortcut::new("Space+Drag", false, false, "Pan the view"),
            Shortcut::new("G", false, false, "Toggle grid"),
        ];

        for (index, mode) in ToolMode::ALL.into_iter().enumerate() {
            shortcuts.push(Shortcut::new(
                format!("{} / {}", mode.shortcut(), index + 1),
                false,
                false,
                format!("{} tool", mode),
            ));
        }
        shortcuts
    }

    /// Write all shortcuts as an aligned table.
    pub fn write_all(out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "=== Keyboard Shortcuts ===")?;
        for shortcut in Self::all() {
            writeln!(out, "  {:20} {}", shortcut.format(), shortcut.description)?;
        }
        Ok(())
    }
}
