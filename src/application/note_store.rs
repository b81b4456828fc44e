// src/application/note_store.rs
use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::application::{StorageAdapter, StorageError};
use crate::constants::{CORRUPT_BACKUP_SUFFIX, DEFAULT_STORAGE_KEY};
use crate::domain::{DomainError, Note, NoteId};

/// Result of decoding the stored collection text.
#[derive(Debug, Default, PartialEq)]
pub struct DecodedCollection {
    pub notes: Vec<Note>,
    pub skipped: Vec<DomainError>,
}

/// One element of the stored list, in stored order.
///
/// Elements that are not usable notes are carried as raw JSON so a rewrite
/// puts them back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum StoredRecord {
    Note(Note),
    Kept(Value),
}

impl StoredRecord {
    fn id(&self) -> Option<NoteId> {
        match self {
            StoredRecord::Note(note) => Some(note.id),
            StoredRecord::Kept(raw) => raw.get("id").and_then(Value::as_i64),
        }
    }
}

fn decode_records(raw: &str) -> Result<(Vec<StoredRecord>, Vec<DomainError>), serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(raw)?;
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();
    let mut seen: HashSet<NoteId> = HashSet::with_capacity(values.len());

    for value in values {
        let note: Note = match serde_json::from_value(value.clone()) {
            Ok(note) => note,
            Err(e) => {
                skipped.push(DomainError::MalformedRecord(e.to_string()));
                records.push(StoredRecord::Kept(value));
                continue;
            }
        };
        if let Err(e) = note.validate() {
            skipped.push(e);
            records.push(StoredRecord::Kept(value));
            continue;
        }
        if !seen.insert(note.id) {
            skipped.push(DomainError::DuplicateId(note.id));
            records.push(StoredRecord::Kept(value));
            continue;
        }
        records.push(StoredRecord::Note(note));
    }

    Ok((records, skipped))
}

/// Parse the stored JSON list, keeping every well-formed record.
///
/// Fails only when the text as a whole is not a JSON array. Bad records
/// (wrong shape, both fields blank, repeated id) are collected in `skipped`.
pub fn decode_collection(raw: &str) -> Result<DecodedCollection, serde_json::Error> {
    let (records, skipped) = decode_records(raw)?;
    let notes = records
        .into_iter()
        .filter_map(|record| match record {
            StoredRecord::Note(note) => Some(note),
            StoredRecord::Kept(_) => None,
        })
        .collect();
    Ok(DecodedCollection { notes, skipped })
}

pub fn encode_collection(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Owner of the persisted note collection.
///
/// Every mutation is a full read-modify-write of the one storage key. Nothing
/// here returns an error: failures are logged and the call degrades to a
/// no-op. Stored elements that are not usable notes are never shown but are
/// written back as they were.
#[derive(Debug)]
pub struct NoteStore<S: StorageAdapter> {
    storage: S,
    key: String,
}

impl<S: StorageAdapter> NoteStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn load_all(&self) -> Vec<Note> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored notes");
                return Vec::new();
            }
            Err(e) => {
                error!(error = %e, "Error loading notes");
                return Vec::new();
            }
        };

        match decode_collection(&raw) {
            Ok(decoded) => {
                log_skipped(&decoded.skipped);
                debug!(count = decoded.notes.len(), "Loaded notes");
                decoded.notes
            }
            Err(e) => {
                warn!(error = %e, "Stored notes are not a valid list, treating as empty");
                Vec::new()
            }
        }
    }

    /// Add `note` at the end of the stored collection.
    ///
    /// Returns whether the note reached storage.
    #[instrument(level = "debug", skip(self, note), fields(key = %self.key, note_id = note.id))]
    pub fn append(&mut self, note: Note) -> bool {
        if let Err(e) = note.validate() {
            warn!(error = %e, "Refusing to save note");
            return false;
        }

        let mut records = match self.read_for_update() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Error saving note");
                return false;
            }
        };

        if records.iter().any(|r| r.id() == Some(note.id)) {
            warn!(error = %DomainError::DuplicateId(note.id), "Refusing to save note");
            return false;
        }

        records.push(StoredRecord::Note(note));
        match self.write(&records) {
            Ok(()) => {
                info!(count = records.len(), "Saved note");
                true
            }
            Err(e) => {
                error!(error = %e, "Error saving note");
                false
            }
        }
    }

    /// Drop every stored element with `id`. Unknown ids are a no-op.
    ///
    /// Returns the number of elements removed.
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    pub fn remove(&mut self, id: NoteId) -> usize {
        let records = match self.read_for_update() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Error deleting note");
                return 0;
            }
        };

        let before = records.len();
        let kept: Vec<StoredRecord> = records
            .into_iter()
            .filter(|r| r.id() != Some(id))
            .collect();
        let removed = before - kept.len();
        if removed == 0 {
            debug!(note_id = id, "Nothing to delete");
            return 0;
        }

        match self.write(&kept) {
            Ok(()) => {
                info!(note_id = id, remaining = kept.len(), "Deleted note");
                removed
            }
            Err(e) => {
                error!(error = %e, "Error deleting note");
                0
            }
        }
    }

    /// Read the stored list ahead of a write.
    ///
    /// Unlike `load_all`, a read failure aborts the mutation so an unreadable
    /// store is never overwritten. Text that is readable but not a list is
    /// copied to a backup key first, then treated as empty.
    fn read_for_update(&mut self) -> Result<Vec<StoredRecord>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };

        match decode_records(&raw) {
            Ok((records, skipped)) => {
                if !skipped.is_empty() {
                    warn!(count = skipped.len(), "Keeping unusable records as stored");
                }
                Ok(records)
            }
            Err(e) => {
                let backup_key = format!("{}{}", self.key, CORRUPT_BACKUP_SUFFIX);
                warn!(error = %e, %backup_key, "Stored notes unreadable, backing up before overwrite");
                self.storage.set_item(&backup_key, &raw)?;
                Ok(Vec::new())
            }
        }
    }

    fn write(&mut self, records: &[StoredRecord]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(records).map_err(|e| StorageError::Write {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.storage.set_item(&self.key, &encoded)
    }
}

fn log_skipped(skipped: &[DomainError]) {
    for reason in skipped {
        warn!(%reason, "Skipping stored note record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockStorage;
    use serde_json::json;

    fn note(id: NoteId, title: &str, content: &str) -> Note {
        Note::new(id, title, content).expect("valid note")
    }

    fn stored(store: &NoteStore<MockStorage>) -> Value {
        let raw = store.storage().value("notes").expect("notes written");
        serde_json::from_str(&raw).expect("stored text is JSON")
    }

    #[test]
    fn given_empty_storage_when_loading_then_returns_no_notes() {
        let store = NoteStore::new(MockStorage::builder().build());

        assert!(store.load_all().is_empty());
    }

    #[test]
    fn given_note_when_appending_then_loads_at_last_position() {
        // Arrange
        let mut store = NoteStore::new(MockStorage::builder().build());
        store.append(note(1, "A", "x"));

        // Act
        let saved = store.append(note(2, "B", "y"));
        let notes = store.load_all();

        // Assert
        assert!(saved);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1], note(2, "B", "y"));
        assert_eq!(notes.iter().filter(|n| n.id == 2).count(), 1);
    }

    #[test]
    fn given_blank_note_when_appending_then_storage_untouched() {
        let mut store = NoteStore::new(MockStorage::builder().build());
        let blank = Note {
            id: 1,
            title: "  ".to_string(),
            content: String::new(),
        };

        let saved = store.append(blank);

        assert!(!saved);
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn given_existing_id_when_appending_then_refuses() {
        let mut store = NoteStore::new(MockStorage::builder().build());
        store.append(note(1, "A", "x"));

        let saved = store.append(note(1, "Other", "z"));

        assert!(!saved);
        assert_eq!(store.load_all(), vec![note(1, "A", "x")]);
    }

    #[test]
    fn given_notes_when_removing_then_excludes_id_and_is_idempotent() {
        // Arrange
        let mut store = NoteStore::new(MockStorage::builder().build());
        store.append(note(1, "A", "x"));
        store.append(note(2, "B", "y"));

        // Act
        let first = store.remove(1);
        let once = store.load_all();
        let second = store.remove(1);
        let twice = store.load_all();

        // Assert
        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(once, vec![note(2, "B", "y")]);
        assert_eq!(once, twice);
    }

    #[test]
    fn given_unknown_id_when_removing_then_does_not_write() {
        let mut store = NoteStore::new(MockStorage::builder().build());
        store.append(note(1, "A", "x"));
        let writes = store.storage().write_count();

        assert_eq!(store.remove(42), 0);
        assert_eq!(store.storage().write_count(), writes);
    }

    #[test]
    fn given_unparseable_text_when_loading_then_returns_empty() {
        let store = NoteStore::new(
            MockStorage::builder()
                .with_value("notes", "{not json")
                .build(),
        );

        assert!(store.load_all().is_empty());
    }

    #[test]
    fn given_malformed_records_when_loading_then_skips_only_bad_ones() {
        let raw = r#"[
            {"id": 1, "title": "A", "content": "x"},
            {"id": "two", "title": "B", "content": "y"},
            {"title": "no id"},
            {"id": 3, "title": "", "content": "   "},
            {"id": 1, "title": "dup", "content": "dup"},
            {"id": 4, "title": "D", "content": ""}
        ]"#;
        let store = NoteStore::new(MockStorage::builder().with_value("notes", raw).build());

        let notes = store.load_all();

        assert_eq!(notes, vec![note(1, "A", "x"), note(4, "D", "")]);
    }

    #[test]
    fn given_read_failure_when_loading_then_returns_empty() {
        let store = NoteStore::new(MockStorage::builder().with_read_failure().build());

        assert!(store.load_all().is_empty());
    }

    #[test]
    fn given_read_failure_when_appending_then_does_not_overwrite() {
        let mut store = NoteStore::new(MockStorage::builder().with_read_failure().build());

        assert!(!store.append(note(1, "A", "x")));
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn given_write_failure_when_appending_then_reports_not_saved() {
        let mut store = NoteStore::new(MockStorage::builder().with_write_failure().build());

        assert!(!store.append(note(1, "A", "x")));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn given_unparseable_text_when_appending_then_backs_up_and_saves() {
        let mut store = NoteStore::new(
            MockStorage::builder()
                .with_value("notes", "garbage")
                .build(),
        );

        let saved = store.append(note(1, "A", "x"));

        assert!(saved);
        assert_eq!(store.load_all(), vec![note(1, "A", "x")]);
        assert_eq!(
            store.storage().value("notes.corrupt").as_deref(),
            Some("garbage")
        );
    }

    #[test]
    fn given_custom_key_when_appending_then_writes_that_key_only() {
        let mut store = NoteStore::with_key(MockStorage::builder().build(), "board-2");

        store.append(note(1, "A", "x"));

        assert!(store.storage().value("board-2").is_some());
        assert!(store.storage().value("notes").is_none());
    }

    #[test]
    fn given_malformed_record_when_appending_then_record_written_back_unchanged() {
        // Arrange
        let raw = r#"[{"id":1,"title":"A","content":"x"},{"id":"legacy-7","title":"Keep","content":"me"}]"#;
        let mut store = NoteStore::new(MockStorage::builder().with_value("notes", raw).build());

        // Act
        let saved = store.append(note(2, "B", "y"));

        // Assert
        assert!(saved);
        assert_eq!(
            stored(&store),
            json!([
                {"id": 1, "title": "A", "content": "x"},
                {"id": "legacy-7", "title": "Keep", "content": "me"},
                {"id": 2, "title": "B", "content": "y"}
            ])
        );
        assert_eq!(store.load_all(), vec![note(1, "A", "x"), note(2, "B", "y")]);
    }

    #[test]
    fn given_unusable_records_when_removing_other_note_then_they_survive() {
        let raw = r#"[{"id":1,"title":"A","content":"x"},{"id":3,"title":"","content":" "},{"broken":true}]"#;
        let mut store = NoteStore::new(MockStorage::builder().with_value("notes", raw).build());

        let removed = store.remove(1);

        assert_eq!(removed, 1);
        assert_eq!(
            stored(&store),
            json!([{"id": 3, "title": "", "content": " "}, {"broken": true}])
        );
    }

    #[test]
    fn given_duplicate_id_records_when_removing_then_all_copies_go() {
        let raw = r#"[{"id":1,"title":"A","content":"x"},{"id":1,"title":"dup","content":"dup"},{"id":2,"title":"B","content":"y"}]"#;
        let mut store = NoteStore::new(MockStorage::builder().with_value("notes", raw).build());

        let removed = store.remove(1);

        assert_eq!(removed, 2);
        assert_eq!(store.load_all(), vec![note(2, "B", "y")]);
    }

    #[test]
    fn given_notes_when_encoding_then_uses_id_title_content_records() {
        let encoded = encode_collection(&[note(5, "T", "C")]).unwrap();

        assert_eq!(encoded, r#"[{"id":5,"title":"T","content":"C"}]"#);
    }
}
