//! Free-standing text labels.

use super::EntityBase;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Content of a label created by the text tool.
pub const DEFAULT_TEXT: &str = "Text";
/// Font size of a label created by the text tool.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    #[serde(flatten)]
    pub base: EntityBase,
    pub text: String,
    pub font_size: f64,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            base: EntityBase::at(position.x, position.y),
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}
