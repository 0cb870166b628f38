// src/domain/folder.rs
use serde::{Deserialize, Serialize};

/// A named, collapsible container referenced by zero or more notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub is_open: bool,
}
