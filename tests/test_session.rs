mod helpers;

use anyhow::Result;
use helpers::{folder, note, sample, TestDataDir};
use notemark::application::Session;
use notemark::domain::{Command, DomainError, ItemKind, MoveTarget};

#[test]
fn given_seeded_store_when_opening_session_then_state_matches_files() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::with_sample_tree()?;

    // Act
    let session = Session::open(fixture.open_store()?)?;

    // Assert
    let state = session.state();
    assert_eq!(state.notes.len(), 5);
    assert_eq!(state.folders.len(), 2);
    assert_eq!(state.find_folder(sample::WORK).unwrap().name, "Work");
    assert_eq!(state.notes_in(sample::WORK).count(), 2);
    assert!(state.active_note_id.is_none());
    Ok(())
}

#[test]
fn given_dispatched_commands_when_reopening_then_mutations_survive() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::new()?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act: build a folder and file a note inside it
    session.dispatch(Command::CreateFolder)?;
    session.dispatch(Command::CommitRename {
        name: "Work".to_string(),
    })?;
    let folder_id = session.state().folders[0].id.clone();
    session.dispatch(Command::CreateNote {
        folder_id: Some(folder_id.clone()),
    })?;
    drop(session);

    // Assert: a fresh session over the same directory sees it all
    let reopened = Session::open(fixture.open_store()?)?;
    let state = reopened.state();
    assert_eq!(state.folders[0].name, "Work");
    assert!(state.folders[0].is_open);
    let members: Vec<&str> = state.notes_in(&folder_id).map(|n| n.title.as_str()).collect();
    assert_eq!(members, vec!["New Note"]);
    Ok(())
}

#[test]
fn given_two_root_notes_when_moving_second_to_front_then_persisted_order_flips() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::seeded(
        &[note("1", "A", "", None), note("2", "B", "", None)],
        &[],
    )?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act
    session.dispatch(Command::MoveNote {
        id: "2".to_string(),
        dest: MoveTarget::Root,
        index: 0,
    })?;

    // Assert: the file on disk carries the new order
    let titles: Vec<String> = fixture.read_notes()?.into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["B", "A"]);
    Ok(())
}

#[test]
fn given_folder_cascade_when_confirmed_then_survivors_persist_exactly() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::with_sample_tree()?;
    let mut session = Session::open(fixture.open_store()?)?;
    session.dispatch(Command::OpenNote {
        id: sample::STANDUP.to_string(),
    })?;

    // Act
    session.dispatch(Command::RequestDelete {
        kind: ItemKind::Folder,
        id: sample::WORK.to_string(),
    })?;
    session.dispatch(Command::ConfirmDelete)?;

    // Assert: the cascade took the active note with it
    assert_eq!(session.state().active_note_id, None);
    let titles: Vec<String> = fixture.read_notes()?.into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Groceries", "Ideas", "Trip"]);
    let names: Vec<String> = fixture.read_folders()?.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["Personal"]);
    Ok(())
}

#[test]
fn given_whitespace_rename_when_dispatched_then_stored_title_unchanged() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::seeded(&[note("1", "Keep", "", None)], &[])?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act
    session.dispatch(Command::RenameNote {
        id: "1".to_string(),
        title: "   ".to_string(),
    })?;

    // Assert
    assert_eq!(fixture.read_notes()?[0].title, "Keep");
    Ok(())
}

#[test]
fn given_corrupt_notes_file_when_opening_session_then_open_fails() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::with_sample_tree()?;
    std::fs::write(fixture.notes_path(), "{not json")?;

    // Act
    let result = Session::open(fixture.open_store()?);

    // Assert: a broken file must never read as an empty collection
    match result.err().expect("open should fail") {
        DomainError::Corrupt { path, .. } => {
            assert!(path.ends_with("notes.json"));
        }
        other => panic!("Expected Corrupt error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn given_request_delete_without_confirm_when_reopening_then_collections_intact() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::with_sample_tree()?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act: the record alone must not touch the files
    session.dispatch(Command::RequestDelete {
        kind: ItemKind::Note,
        id: sample::GROCERIES.to_string(),
    })?;
    drop(session);

    // Assert
    let reopened = Session::open(fixture.open_store()?)?;
    assert_eq!(reopened.state().notes.len(), 5);
    assert!(reopened.state().pending_delete.is_none());
    Ok(())
}

#[test]
fn given_persisted_ids_when_creating_after_reopen_then_fresh_id_skips_them() -> Result<()> {
    // Arrange: sample ids run up to "11"
    let fixture = TestDataDir::with_sample_tree()?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act
    session.dispatch(Command::CreateNote { folder_id: None })?;

    // Assert
    assert_eq!(session.state().notes.last().unwrap().id, "12");
    Ok(())
}

#[test]
fn given_empty_directory_when_opening_session_then_collections_start_empty() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::new()?;

    // Act
    let session = Session::open(fixture.open_store()?)?;

    // Assert
    assert!(session.state().notes.is_empty());
    assert!(session.state().folders.is_empty());
    Ok(())
}

#[test]
fn given_mixed_sequence_when_filing_into_folder_then_filtered_index_is_honored() -> Result<()> {
    // Arrange: Work already holds Standup and Roadmap
    let fixture = TestDataDir::with_sample_tree()?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act: slot Groceries between the two members
    session.dispatch(Command::MoveNote {
        id: sample::GROCERIES.to_string(),
        dest: MoveTarget::Folder(sample::WORK.to_string()),
        index: 1,
    })?;

    // Assert
    let stored = fixture.read_notes()?;
    let members: Vec<&str> = stored
        .iter()
        .filter(|n| n.folder_id.as_deref() == Some(sample::WORK))
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(members, vec!["Standup", "Groceries", "Roadmap"]);
    Ok(())
}

#[test]
fn given_collapsed_folder_when_toggling_then_open_flag_persists() -> Result<()> {
    // Arrange
    let fixture = TestDataDir::seeded(&[], &[folder("10", "Archive", false)])?;
    let mut session = Session::open(fixture.open_store()?)?;

    // Act
    session.dispatch(Command::ToggleFolder {
        id: "10".to_string(),
    })?;

    // Assert
    assert!(fixture.read_folders()?[0].is_open);
    Ok(())
}
