use notegrid::application::{NoteStore, StorageAdapter};
use notegrid::domain::Note;
use notegrid::infrastructure::{Config, FileStorage};
use notegrid::Board;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture: a note store in a temporary directory
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub dir: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let dir = temp_dir.path().join("store");

        Ok(Self {
            _temp_dir: temp_dir,
            dir,
        })
    }

    /// Store pre-filled with raw text under the notes key
    pub fn with_raw(raw: &str) -> Result<Self> {
        let fixture = Self::new()?;
        FileStorage::new(&fixture.dir)
            .set_item("notes", raw)
            .context("Failed to seed store")?;
        Ok(fixture)
    }

    pub fn with_notes(notes: &[Note]) -> Result<Self> {
        let raw = serde_json::to_string(notes)?;
        Self::with_raw(&raw)
    }

    pub fn open_store(&self) -> NoteStore<FileStorage> {
        NoteStore::new(FileStorage::new(&self.dir))
    }

    pub fn open_board(&self) -> Board {
        let mut board = notegrid::open_board(&Config::default(), &self.dir);
        board.init();
        board
    }

    pub fn raw(&self) -> Option<String> {
        FileStorage::new(&self.dir).get_item("notes").ok().flatten()
    }
}

#[allow(dead_code)]
pub mod test_notes {
    use notegrid::domain::Note;

    pub fn groceries() -> Note {
        Note::new(1695797540370, "Groceries", "milk").expect("valid note")
    }

    pub fn a() -> Note {
        Note::new(1, "A", "x").expect("valid note")
    }

    pub fn b() -> Note {
        Note::new(2, "B", "y").expect("valid note")
    }
}
