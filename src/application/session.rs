// src/application/session.rs
use crate::domain::{AppState, Command, DomainError, Folder, Note};
use tracing::{debug, instrument};

/// Persistence seam for the two serialized collections.
///
/// `load` returns empty collections when nothing has been stored yet;
/// a present-but-unparsable entry is a [`DomainError::Corrupt`].
pub trait StateStore {
    fn load(&self) -> Result<(Vec<Note>, Vec<Folder>), DomainError>;
    fn save_notes(&mut self, notes: &[Note]) -> Result<(), DomainError>;
    fn save_folders(&mut self, folders: &[Folder]) -> Result<(), DomainError>;
}

/// Owns the application state and a store, and keeps the two in sync.
///
/// Every dispatched command is followed by an unconditional write of both
/// collections, so persisted state always equals in-memory state.
pub struct Session<S: StateStore> {
    state: AppState,
    store: S,
}

impl<S: StateStore> Session<S> {
    /// Load both collections from the store and build the initial state.
    pub fn open(store: S) -> Result<Self, DomainError> {
        let (notes, folders) = store.load()?;
        debug!(
            notes = notes.len(),
            folders = folders.len(),
            "Loaded collections"
        );
        Ok(Self {
            state: AppState::from_collections(notes, folders),
            store,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one command and write both collections through to the store.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, command: Command) -> Result<(), DomainError> {
        self.state = std::mem::take(&mut self.state).apply(command);
        self.store.save_notes(&self.state.notes)?;
        self.store.save_folders(&self.state.folders)?;
        Ok(())
    }
}
