// src/domain/mod.rs
pub mod command;
pub mod error;
pub mod folder;
pub mod note;
pub mod state;

pub use command::{Command, ItemKind, MoveTarget};
pub use error::DomainError;
pub use folder::Folder;
pub use note::Note;
pub use state::{AppState, PendingDelete};
