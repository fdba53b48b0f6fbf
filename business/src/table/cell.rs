//! Renderer-neutral cell view nodes.

use crate::record::CellValue;
use crate::status::{Status, StyleToken, status_to_style_token};
use crate::table::actions::RowAction;

/// What one table cell displays. The UI paints these without inspecting records.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Badge { text: String, token: StyleToken },
    /// Highlighted text, e.g. a name column.
    Emphasis(String),
    Actions(Vec<ActionButton>),
    Empty,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::Emphasis(text.into())
    }

    pub fn badge(text: impl Into<String>, status: Status) -> Self {
        Self::Badge {
            text: text.into(),
            token: status_to_style_token(status),
        }
    }

    /// The raw value as text; null values render nothing.
    pub fn from_value(value: &CellValue) -> Self {
        if value.is_null() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }

    pub fn actions(buttons: impl IntoIterator<Item = ActionButton>) -> Self {
        Self::Actions(buttons.into_iter().collect())
    }
}

/// A button of an actions cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: RowAction,
    pub label: String,
    /// Painted as a destructive action.
    pub danger: bool,
}

impl ActionButton {
    pub fn new(action: RowAction) -> Self {
        Self {
            action,
            label: action.label().to_owned(),
            danger: matches!(action, RowAction::Delete | RowAction::Disable),
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn danger(mut self, danger: bool) -> Self {
        self.danger = danger;
        self
    }
}
