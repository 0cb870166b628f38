// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the edges of the system.
///
/// Mutations themselves are total (missing ids are silent no-ops); the
/// variants here cover storage, target resolution and editor handoff.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Cannot access {path}: {reason}")]
    Store { path: PathBuf, reason: String },
    #[error("Corrupt state file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("No note or folder matches '{0}'")]
    TargetNotFound(String),
    #[error("'{0}' matches more than one item; address it by id")]
    AmbiguousTarget(String),
    #[error("Editor error: {0}")]
    Editor(String),
    #[error("Could not determine a data directory; pass --dir or set NOTEMARK_DIR")]
    NoDataDir,
}
