use anyhow::{Context, Result};
use notemark::application::StateStore;
use notemark::constants::{FOLDERS_FILE, NOTES_FILE};
use notemark::domain::{Folder, Note};
use notemark::infrastructure::JsonStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for working with a temporary notemark data directory
#[allow(dead_code)]
pub struct TestDataDir {
    _temp_dir: TempDir,
    pub dir: PathBuf,
}

#[allow(dead_code)]
impl TestDataDir {
    /// Create a fixture whose data directory does not exist yet
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .context("Failed to create temporary directory")?;
        let dir = temp_dir.path().join("notemark");

        Ok(Self {
            _temp_dir: temp_dir,
            dir,
        })
    }

    /// Create a fixture pre-seeded with the given collections
    pub fn seeded(notes: &[Note], folders: &[Folder]) -> Result<Self> {
        let fixture = Self::new()?;
        let mut store = fixture.open_store()?;
        store.save_notes(notes).context("Failed to seed notes")?;
        store
            .save_folders(folders)
            .context("Failed to seed folders")?;
        Ok(fixture)
    }

    /// Create a fixture seeded with the sample tree from [`sample`]
    pub fn with_sample_tree() -> Result<Self> {
        Self::seeded(
            &[
                note(sample::GROCERIES, "Groceries", "- milk\n- eggs\n", None),
                note(sample::IDEAS, "Ideas", "# Someday\n", None),
                note(sample::STANDUP, "Standup", "Monday topics\n", Some(sample::WORK)),
                note(sample::ROADMAP, "Roadmap", "Q3 plan\n", Some(sample::WORK)),
                note(sample::TRIP, "Trip", "Pack light\n", Some(sample::PERSONAL)),
            ],
            &[
                folder(sample::WORK, "Work", true),
                folder(sample::PERSONAL, "Personal", false),
            ],
        )
    }

    /// Open a store over this data directory
    pub fn open_store(&self) -> Result<JsonStore> {
        JsonStore::new(&self.dir).context("Failed to open JSON store")
    }

    pub fn notes_path(&self) -> PathBuf {
        self.dir.join(NOTES_FILE)
    }

    pub fn folders_path(&self) -> PathBuf {
        self.dir.join(FOLDERS_FILE)
    }

    /// Parse notes.json directly, bypassing the store
    pub fn read_notes(&self) -> Result<Vec<Note>> {
        let raw = std::fs::read_to_string(self.notes_path())
            .context("Failed to read notes.json")?;
        serde_json::from_str(&raw).context("Failed to parse notes.json")
    }

    /// Parse folders.json directly, bypassing the store
    pub fn read_folders(&self) -> Result<Vec<Folder>> {
        let raw = std::fs::read_to_string(self.folders_path())
            .context("Failed to read folders.json")?;
        serde_json::from_str(&raw).context("Failed to parse folders.json")
    }
}

#[allow(dead_code)]
pub fn note(id: &str, title: &str, content: &str, folder_id: Option<&str>) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        folder_id: folder_id.map(str::to_string),
    }
}

#[allow(dead_code)]
pub fn folder(id: &str, name: &str, is_open: bool) -> Folder {
    Folder {
        id: id.to_string(),
        name: name.to_string(),
        is_open,
    }
}

/// Known ids in the sample tree built by [`TestDataDir::with_sample_tree`]
#[allow(dead_code)]
pub mod sample {
    // Loose notes, listed before any folder
    pub const GROCERIES: &str = "1";
    pub const IDEAS: &str = "2";

    // Notes filed under WORK
    pub const STANDUP: &str = "3";
    pub const ROADMAP: &str = "4";

    // Note filed under the collapsed PERSONAL folder
    pub const TRIP: &str = "5";

    pub const WORK: &str = "10";
    pub const PERSONAL: &str = "11";

    // For testing error cases
    pub const NONEXISTENT: &str = "999";
}
