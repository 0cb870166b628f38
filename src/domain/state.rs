// src/domain/state.rs
use crate::constants::{DEFAULT_FOLDER_NAME, DEFAULT_NOTE_TITLE};
use crate::domain::command::{Command, ItemKind, MoveTarget};
use crate::domain::{Folder, Note};

/// Snapshot of a delete awaiting explicit confirmation.
///
/// Captured when the user asks to delete an item; only
/// [`Command::ConfirmDelete`] turns it into an actual removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: ItemKind,
    pub id: String,
    pub name: String,
}

/// The whole application state: both ordered collections plus the derived
/// selection flags of the UI.
///
/// `AppState` exclusively owns the collections; mutations go through
/// [`AppState::apply`], which consumes the state and returns the next one.
/// Persistence only ever reads a full snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    /// The note shown in the main pane, if any.
    pub active_note_id: Option<String>,
    /// Whether the content pane is in edit mode (as opposed to rendered view).
    pub is_editing: bool,
    /// At most one note or folder whose name is being edited inline.
    pub renaming_id: Option<String>,
    /// Delete awaiting confirmation, if any.
    pub pending_delete: Option<PendingDelete>,
    next_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Build a state from loaded collections, seeding the id counter to one
    /// past the highest numeric id present so fresh ids never collide.
    pub fn from_collections(notes: Vec<Note>, folders: Vec<Folder>) -> Self {
        let highest = notes
            .iter()
            .map(|n| n.id.as_str())
            .chain(folders.iter().map(|f| f.id.as_str()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            notes,
            folders,
            next_id: highest.saturating_add(1),
            ..Self::default()
        }
    }

    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn find_folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_note_id
            .as_deref()
            .and_then(|id| self.find_note(id))
    }

    /// Notes not filed under any folder, in sequence order.
    pub fn root_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| n.folder_id.is_none())
    }

    /// Notes filed under the given folder, in sequence order.
    pub fn notes_in<'a>(&'a self, folder_id: &'a str) -> impl Iterator<Item = &'a Note> {
        self.notes
            .iter()
            .filter(move |n| n.folder_id.as_deref() == Some(folder_id))
    }

    fn fresh_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id.to_string()
    }

    /// The single state transition. Each operation replaces the relevant
    /// collection with a new snapshot; missing ids are silent no-ops.
    pub fn apply(mut self, command: Command) -> Self {
        match command {
            Command::CreateNote { folder_id } => {
                let id = self.fresh_id();
                self.notes.push(Note {
                    id: id.clone(),
                    title: DEFAULT_NOTE_TITLE.to_string(),
                    content: String::new(),
                    folder_id,
                });
                self.active_note_id = Some(id);
                self.is_editing = true;
                self
            }
            Command::CreateFolder => {
                let id = self.fresh_id();
                self.folders.push(Folder {
                    id: id.clone(),
                    name: DEFAULT_FOLDER_NAME.to_string(),
                    is_open: true,
                });
                self.renaming_id = Some(id);
                self
            }
            Command::EditContent { id, content } => {
                if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
                    note.content = content;
                }
                self
            }
            Command::RenameNote { id, title } => self.rename_note(&id, &title),
            Command::RenameFolder { id, name } => self.rename_folder(&id, &name),
            Command::ToggleFolder { id } => {
                if let Some(folder) = self.folders.iter_mut().find(|f| f.id == id) {
                    folder.is_open = !folder.is_open;
                }
                self
            }
            Command::DeleteNote { id } => self.delete_note(&id),
            Command::DeleteFolder { id } => self.delete_folder(&id),
            Command::MoveNote { id, dest, index } => self.move_note(&id, dest, index),
            Command::OpenNote { id } => {
                self.active_note_id = Some(id);
                self
            }
            Command::StartEditing => {
                self.is_editing = true;
                self
            }
            Command::StopEditing => {
                self.is_editing = false;
                self
            }
            Command::StartRename { id } => {
                self.renaming_id = Some(id);
                self
            }
            Command::CommitRename { name } => {
                if let Some(id) = self.renaming_id.take() {
                    if self.find_note(&id).is_some() {
                        self = self.rename_note(&id, &name);
                    } else {
                        self = self.rename_folder(&id, &name);
                    }
                }
                self
            }
            Command::CancelRename => {
                self.renaming_id = None;
                self
            }
            Command::RequestDelete { kind, id } => {
                let name = match kind {
                    ItemKind::Note => self.find_note(&id).map(|n| n.title.clone()),
                    ItemKind::Folder => self.find_folder(&id).map(|f| f.name.clone()),
                };
                if let Some(name) = name {
                    self.pending_delete = Some(PendingDelete { kind, id, name });
                }
                self
            }
            Command::ConfirmDelete => {
                if let Some(pending) = self.pending_delete.take() {
                    match pending.kind {
                        ItemKind::Note => self.delete_note(&pending.id),
                        ItemKind::Folder => self.delete_folder(&pending.id),
                    }
                } else {
                    self
                }
            }
            Command::CancelDelete => {
                self.pending_delete = None;
                self
            }
        }
    }

    fn rename_note(mut self, id: &str, title: &str) -> Self {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return self;
        }
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.title = trimmed.to_string();
        }
        self
    }

    fn rename_folder(mut self, id: &str, name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return self;
        }
        if let Some(folder) = self.folders.iter_mut().find(|f| f.id == id) {
            folder.name = trimmed.to_string();
        }
        self
    }

    fn delete_note(mut self, id: &str) -> Self {
        self.notes.retain(|n| n.id != id);
        if self.active_note_id.as_deref() == Some(id) {
            self.active_note_id = None;
        }
        self
    }

    fn delete_folder(mut self, id: &str) -> Self {
        self.folders.retain(|f| f.id != id);
        self.notes.retain(|n| n.folder_id.as_deref() != Some(id));
        // The cascade may have taken the active note with it.
        if let Some(active) = self.active_note_id.as_deref() {
            if self.find_note(active).is_none() {
                self.active_note_id = None;
            }
        }
        self
    }

    /// Remove the note from the sequence, refile it, and insert it back so
    /// that it occupies position `min(index, len)` within the destination's
    /// filtered list. An empty destination appends at the end of the
    /// sequence. No-op if the note or a named destination folder is missing.
    fn move_note(mut self, id: &str, dest: MoveTarget, index: usize) -> Self {
        let Some(position) = self.notes.iter().position(|n| n.id == id) else {
            return self;
        };
        let folder_id = match dest {
            MoveTarget::Root => None,
            MoveTarget::Folder(folder_id) => {
                if self.find_folder(&folder_id).is_none() {
                    return self;
                }
                Some(folder_id)
            }
        };

        let mut note = self.notes.remove(position);
        note.folder_id = folder_id.clone();

        let members: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.folder_id == folder_id)
            .map(|(i, _)| i)
            .collect();
        let insert_at = match members.get(index) {
            Some(&global) => global,
            None => match members.last() {
                Some(&last) => last + 1,
                None => self.notes.len(),
            },
        };
        self.notes.insert(insert_at, note);
        self
    }
}
