// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// A titled unit of Markdown text, optionally filed under a folder.
///
/// `folder_id`, when present, references an existing [`Folder`](crate::domain::Folder).
/// Deleting that folder cascades to the note, so a dangling reference is never
/// observable through normal operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub folder_id: Option<String>,
}
