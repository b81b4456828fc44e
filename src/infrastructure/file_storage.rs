// src/infrastructure/file_storage.rs
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::application::{StorageAdapter, StorageError};

/// Key-value text storage in a directory, one `<key>.json` file per key.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageAdapter for FileStorage {
    #[instrument(level = "trace", skip(self))]
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {}", path.display(), e),
            }),
        }
    }

    #[instrument(level = "trace", skip(self, value), fields(bytes = value.len()))]
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };

        fs::create_dir_all(&self.dir)
            .map_err(|e| write_err(format!("{}: {}", self.dir.display(), e)))?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| write_err(e.to_string()))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| write_err(e.to_string()))?;
        tmp.persist(&path)
            .map_err(|e| write_err(format!("{}: {}", path.display(), e.error)))?;

        debug!(?path, "Stored value");
        Ok(())
    }
}
