// src/domain/note.rs
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub type NoteId = i64;

/// A persisted note. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Build a note from raw field values, trimming both fields.
    ///
    /// Fails with [`DomainError::EmptyNote`] when both fields are blank.
    pub fn new(id: NoteId, title: &str, content: &str) -> Result<Self, DomainError> {
        let note = Self {
            id,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        };
        note.validate()?;
        Ok(note)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() && self.content.trim().is_empty() {
            return Err(DomainError::EmptyNote);
        }
        Ok(())
    }

    /// Case-insensitive substring match against title or content.
    pub fn matches(&self, query: &str) -> bool {
        matches_query(&self.title, &self.content, query)
    }
}

pub(crate) fn matches_query(title: &str, content: &str, query: &str) -> bool {
    let query = query.to_lowercase();
    title.to_lowercase().contains(&query) || content.to_lowercase().contains(&query)
}

/// Pending form input that has not been committed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// True when both fields are empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// True when anything at all has been typed, whitespace included.
    pub fn has_text(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    pub fn to_note(&self, id: NoteId) -> Result<Note, DomainError> {
        Note::new(id, &self.title, &self.content)
    }
}
