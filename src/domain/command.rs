// src/domain/command.rs

/// Discriminates notes from folders where an operation accepts either,
/// e.g. the delete-confirmation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Note,
    Folder,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Note => write!(f, "note"),
            ItemKind::Folder => write!(f, "folder"),
        }
    }
}

/// Destination of a note move: the unfiled root list or a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTarget {
    Root,
    Folder(String),
}

/// A user intent against the application state.
///
/// Every command is total: a missing id is a silent no-op, never an error.
/// [`AppState::apply`](crate::domain::AppState::apply) is the single
/// transition function consuming these.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new note (default title, empty content), make it the
    /// active note and enter edit mode.
    CreateNote { folder_id: Option<String> },
    /// Append a new folder (default name, expanded) and start an inline
    /// rename on it.
    CreateFolder,
    /// Replace the content of the matching note.
    EditContent { id: String, content: String },
    /// Apply the trimmed title if non-empty; whitespace-only input is
    /// discarded without effect.
    RenameNote { id: String, title: String },
    /// Apply the trimmed name if non-empty; whitespace-only input is
    /// discarded without effect.
    RenameFolder { id: String, name: String },
    /// Flip a folder between expanded and collapsed.
    ToggleFolder { id: String },
    /// Remove a note; clears the active-note reference if it pointed there.
    DeleteNote { id: String },
    /// Remove a folder and every note filed under it (hard cascade).
    DeleteFolder { id: String },
    /// Refile and reposition a note; see [`AppState::apply`] for the exact
    /// index semantics.
    MoveNote {
        id: String,
        dest: MoveTarget,
        index: usize,
    },
    /// Make a note the one shown in the main pane.
    OpenNote { id: String },
    /// Content pane enters edit mode (click on the rendered view).
    StartEditing,
    /// Content pane leaves edit mode (blur).
    StopEditing,
    /// Begin an inline rename of a note or folder.
    StartRename { id: String },
    /// Confirm the inline rename with the given name (trim rule applies)
    /// and clear the rename indicator.
    CommitRename { name: String },
    /// Abandon the inline rename; an already-applied rename is not reverted.
    CancelRename,
    /// Record a pending delete for confirmation; nothing is removed yet.
    RequestDelete { kind: ItemKind, id: String },
    /// Execute the pending delete and clear the record.
    ConfirmDelete,
    /// Drop the pending delete without mutating the collections.
    CancelDelete,
}
