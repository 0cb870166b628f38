// src/util/testing.rs

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::StateStore;
use crate::domain::{DomainError, Folder, Note};

/// Shared in-memory store for testing code that depends on StateStore.
///
/// Records the most recent write of each collection so tests can assert
/// on exactly what would have hit the disk.
///
/// # Examples
///
/// ```
/// use notemark::util::testing::MemoryStore;
/// use notemark::domain::Note;
///
/// let store = MemoryStore::builder()
///     .with_note(Note {
///         id: "1".to_string(),
///         title: "Reading list".to_string(),
///         content: String::new(),
///         folder_id: None,
///     })
///     .build();
/// ```
pub struct MemoryStore {
    notes: Vec<Note>,
    folders: Vec<Folder>,
    fail_saves: bool,
    pub saved_notes: Option<Vec<Note>>,
    pub saved_folders: Option<Vec<Folder>>,
}

impl MemoryStore {
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<(Vec<Note>, Vec<Folder>), DomainError> {
        Ok((self.notes.clone(), self.folders.clone()))
    }

    fn save_notes(&mut self, notes: &[Note]) -> Result<(), DomainError> {
        if self.fail_saves {
            return Err(DomainError::Store {
                path: PathBuf::from("<memory>"),
                reason: "simulated write failure".to_string(),
            });
        }
        self.saved_notes = Some(notes.to_vec());
        Ok(())
    }

    fn save_folders(&mut self, folders: &[Folder]) -> Result<(), DomainError> {
        if self.fail_saves {
            return Err(DomainError::Store {
                path: PathBuf::from("<memory>"),
                reason: "simulated write failure".to_string(),
            });
        }
        self.saved_folders = Some(folders.to_vec());
        Ok(())
    }
}

/// Builder for MemoryStore
///
/// Provides a fluent interface for seeding collections and configuring
/// failure behavior.
pub struct MemoryStoreBuilder {
    notes: Vec<Note>,
    folders: Vec<Folder>,
    fail_saves: bool,
}

impl MemoryStoreBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            folders: vec![],
            fail_saves: false,
        }
    }

    /// Seed a note that load will return
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Seed a folder that load will return
    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.folders.push(folder);
        self
    }

    /// Make every save fail with a Store error
    pub fn with_save_failure(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn build(self) -> MemoryStore {
        MemoryStore {
            notes: self.notes,
            folders: self.folders,
            fail_saves: self.fail_saves,
            saved_notes: None,
            saved_folders: None,
        }
    }
}

impl Default for MemoryStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["syntect", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    fn sample_note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("Note {id}"),
            content: String::new(),
            folder_id: None,
        }
    }

    #[test]
    fn given_seeded_builder_when_loading_then_returns_collections() {
        let store = MemoryStore::builder()
            .with_note(sample_note("1"))
            .with_folder(Folder {
                id: "2".to_string(),
                name: "Work".to_string(),
                is_open: true,
            })
            .build();

        let (notes, folders) = store.load().expect("load should succeed");
        assert_eq!(notes.len(), 1);
        assert_eq!(folders.len(), 1);
        assert_eq!(notes[0].id, "1");
    }

    #[test]
    fn given_store_when_saving_then_last_write_is_recorded() {
        let mut store = MemoryStore::builder().build();
        let notes = vec![sample_note("1"), sample_note("2")];

        store.save_notes(&notes).expect("save should succeed");

        assert_eq!(store.saved_notes.as_deref(), Some(&notes[..]));
        assert!(store.saved_folders.is_none());
    }

    #[test]
    fn given_save_failure_configured_when_saving_then_returns_store_error() {
        let mut store = MemoryStore::builder().with_save_failure().build();

        let result = store.save_notes(&[]);

        assert!(matches!(result, Err(DomainError::Store { .. })));
    }
}
