// src/infrastructure/store.rs
use crate::application::StateStore;
use crate::constants::{FOLDERS_FILE, NOTES_FILE};
use crate::domain::{DomainError, Folder, Note};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Collections persisted as two JSON documents, `notes.json` and
/// `folders.json`, in one data directory.
///
/// An absent file reads as an empty collection; a present but unparsable
/// file is a [`DomainError::Corrupt`] naming the file, never a silent reset.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, DomainError> {
        let dir = PathBuf::from(dir.as_ref());
        debug!(?dir, "Opening JSON store");
        fs::create_dir_all(&dir).map_err(|e| DomainError::Store {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn notes_path(&self) -> PathBuf {
        self.dir.join(NOTES_FILE)
    }

    pub fn folders_path(&self) -> PathBuf {
        self.dir.join(FOLDERS_FILE)
    }

    fn read_collection<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, DomainError> {
        if !path.exists() {
            debug!(?path, "No stored collection, starting empty");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path).map_err(|e| DomainError::Store {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| DomainError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn write_collection<T: Serialize>(&self, path: &Path, items: &[T]) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(items).map_err(|e| DomainError::Store {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| DomainError::Store {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl StateStore for JsonStore {
    #[instrument(level = "debug", skip(self))]
    fn load(&self) -> Result<(Vec<Note>, Vec<Folder>), DomainError> {
        let notes = self.read_collection(&self.notes_path())?;
        let folders = self.read_collection(&self.folders_path())?;
        info!(
            notes = notes.len(),
            folders = folders.len(),
            dir = %self.dir.display(),
            "Loaded store"
        );
        Ok((notes, folders))
    }

    #[instrument(level = "debug", skip(self, notes))]
    fn save_notes(&mut self, notes: &[Note]) -> Result<(), DomainError> {
        self.write_collection(&self.notes_path(), notes)
    }

    #[instrument(level = "debug", skip(self, folders))]
    fn save_folders(&mut self, folders: &[Folder]) -> Result<(), DomainError> {
        self.write_collection(&self.folders_path(), folders)
    }
}
