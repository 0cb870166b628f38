// src/application/resolve.rs
use crate::domain::{AppState, DomainError, Folder, Note};

/// Resolve a command-line target to a note: exact id first, then a unique
/// case-insensitive title match.
///
/// Resolution failures are CLI errors; the core mutations themselves stay
/// total and silent on missing ids.
pub fn resolve_note<'a>(state: &'a AppState, target: &str) -> Result<&'a Note, DomainError> {
    if let Some(note) = state.find_note(target) {
        return Ok(note);
    }
    let wanted = target.to_lowercase();
    let mut matches = state
        .notes
        .iter()
        .filter(|n| n.title.to_lowercase() == wanted);
    match (matches.next(), matches.next()) {
        (Some(note), None) => Ok(note),
        (Some(_), Some(_)) => Err(DomainError::AmbiguousTarget(target.to_string())),
        (None, _) => Err(DomainError::TargetNotFound(target.to_string())),
    }
}

/// Resolve a command-line target to a folder; same rules as [`resolve_note`].
pub fn resolve_folder<'a>(state: &'a AppState, target: &str) -> Result<&'a Folder, DomainError> {
    if let Some(folder) = state.find_folder(target) {
        return Ok(folder);
    }
    let wanted = target.to_lowercase();
    let mut matches = state
        .folders
        .iter()
        .filter(|f| f.name.to_lowercase() == wanted);
    match (matches.next(), matches.next()) {
        (Some(folder), None) => Ok(folder),
        (Some(_), Some(_)) => Err(DomainError::AmbiguousTarget(target.to_string())),
        (None, _) => Err(DomainError::TargetNotFound(target.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Folder, Note};

    fn state() -> AppState {
        AppState::from_collections(
            vec![
                Note {
                    id: "1".to_string(),
                    title: "Groceries".to_string(),
                    content: String::new(),
                    folder_id: None,
                },
                Note {
                    id: "2".to_string(),
                    title: "Ideas".to_string(),
                    content: String::new(),
                    folder_id: None,
                },
                Note {
                    id: "3".to_string(),
                    title: "ideas".to_string(),
                    content: String::new(),
                    folder_id: None,
                },
            ],
            vec![Folder {
                id: "10".to_string(),
                name: "Work".to_string(),
                is_open: true,
            }],
        )
    }

    #[test]
    fn given_exact_id_when_resolving_note_then_id_wins() {
        let state = state();
        let note = resolve_note(&state, "2").expect("should resolve");
        assert_eq!(note.title, "Ideas");
    }

    #[test]
    fn given_unique_title_when_resolving_note_then_matches_case_insensitively() {
        let state = state();
        let note = resolve_note(&state, "groceries").expect("should resolve");
        assert_eq!(note.id, "1");
    }

    #[test]
    fn given_duplicate_titles_when_resolving_note_then_is_ambiguous() {
        let state = state();
        let result = resolve_note(&state, "IDEAS");
        assert!(matches!(result, Err(DomainError::AmbiguousTarget(_))));
    }

    #[test]
    fn given_unknown_target_when_resolving_note_then_is_not_found() {
        let state = state();
        let result = resolve_note(&state, "missing");
        assert!(matches!(result, Err(DomainError::TargetNotFound(_))));
    }

    #[test]
    fn given_folder_name_when_resolving_folder_then_matches() {
        let state = state();
        let folder = resolve_folder(&state, "work").expect("should resolve");
        assert_eq!(folder.id, "10");
    }

    #[test]
    fn given_note_title_when_resolving_folder_then_is_not_found() {
        let state = state();
        let result = resolve_folder(&state, "Groceries");
        assert!(matches!(result, Err(DomainError::TargetNotFound(_))));
    }
}
