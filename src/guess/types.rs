use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::InputConfig;

/// Visible state of the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    Closed,
    OpenUnselected,
    OpenSelected(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPolicy {
    pub quiet_period: Duration,
    /// Cap for non-empty queries; the browse-all list is never truncated.
    pub max_suggestions: Option<usize>,
    pub placeholder: String,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl InputPolicy {
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            quiet_period: config.debounce(),
            max_suggestions: config.suggestion_limit(),
            placeholder: config.placeholder.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessKeyResult {
    Ignored,
    Consumed { redraw: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessItemView {
    pub label: String,
    pub detail: Option<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessView {
    pub input: String,
    /// Caret position in characters, not display columns.
    pub cursor: usize,
    pub placeholder: String,
    pub focused: bool,
    pub disabled: bool,
    /// Empty unless the list is visible.
    pub items: Vec<GuessItemView>,
    pub highlight: Option<usize>,
}

/// Screen regions recorded at render time, used for pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuessHitAreas {
    pub field: Option<Rect>,
    /// Whole dropdown, border included.
    pub list: Option<Rect>,
    /// Rows that hold suggestions, one suggestion per row.
    pub items: Option<Rect>,
    /// Index of the suggestion drawn on the first row of `items`.
    pub list_offset: usize,
}
