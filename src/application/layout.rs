// src/application/layout.rs
//
// Seams for the two rendering collaborators: the masonry grid and the
// auto-growing text fields.
use serde::{Deserialize, Serialize};

use crate::application::NoteCard;
use crate::constants::DEFAULT_COLUMNS;
use crate::domain::NoteId;

/// Options handed to the grid engine on every layout pass.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Which children of the container take part in the grid
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
    /// Element whose width defines one column
    #[serde(default = "default_column_width")]
    pub column_width: String,
    #[serde(default = "default_percent_position")]
    pub percent_position: bool,
    #[serde(default = "default_columns")]
    pub columns: usize,
}

fn default_item_selector() -> String {
    ".col".to_string()
}
fn default_column_width() -> String {
    ".col".to_string()
}
fn default_percent_position() -> bool {
    true
}
fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_selector: default_item_selector(),
            column_width: default_column_width(),
            percent_position: default_percent_position(),
            columns: default_columns(),
        }
    }
}

/// Where the grid engine put one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub column: usize,
    /// Horizontal offset, percent of container width when `percent_position`
    /// is set, otherwise in column units
    pub left: f32,
    pub top: u32,
    pub height: u32,
}

pub trait LayoutEngine {
    /// Recompute positions for the current cards. Hidden cards take no space.
    fn layout(&mut self, config: &LayoutConfig, cards: &[NoteCard]);

    fn placement(&self, _id: NoteId) -> Option<Placement> {
        None
    }
}

/// A multi-line input whose visible height follows its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub name: String,
    pub value: String,
    pub rows: usize,
}

impl TextField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            rows: 1,
        }
    }
}

pub trait AutoGrow {
    /// Start tracking `fields` and size them once.
    fn attach(&mut self, fields: &mut [&mut TextField]);

    /// Recompute sizes after a value changed outside user typing.
    fn update(&mut self, fields: &mut [&mut TextField]);

    /// Resize one field as the user types into it.
    fn on_input(&mut self, field: &mut TextField) {
        self.update(&mut [field]);
    }
}
