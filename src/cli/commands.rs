// src/cli/commands.rs
use crate::application::{resolve_folder, resolve_note, Session, StateStore};
use crate::domain::{Command, DomainError, ItemKind, MoveTarget};
use crate::infrastructure::EditorLauncher;
use crate::ports::{AnsiPresenter, SidebarPresenter};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

/// `new`: create a note, optionally file and title it, then hand the
/// empty content to the editor.
pub fn create_note<S: StateStore>(
    session: &mut Session<S>,
    title: Option<String>,
    folder: Option<String>,
    editor: &EditorLauncher,
    output: &mut impl Write,
) -> Result<()> {
    let folder_id = match folder {
        Some(spec) => Some(resolve_folder(session.state(), &spec)?.id.clone()),
        None => None,
    };
    session.dispatch(Command::CreateNote { folder_id })?;
    let id = session
        .state()
        .active_note_id
        .clone()
        .context("created note did not become active")?;
    if let Some(title) = title {
        session.dispatch(Command::RenameNote {
            id: id.clone(),
            title,
        })?;
    }

    let content = editor.edit("")?;
    session.dispatch(Command::EditContent {
        id: id.clone(),
        content,
    })?;
    session.dispatch(Command::StopEditing)?;

    let note = session
        .state()
        .find_note(&id)
        .context("created note vanished")?;
    info!(id = %note.id, title = %note.title, "Created note");
    writeln!(output, "Created note \"{}\" ({})", note.title, note.id)?;
    Ok(())
}

/// `mkdir`: create a folder, naming it in the same inline-rename flow
/// the shell uses.
pub fn create_folder<S: StateStore>(
    session: &mut Session<S>,
    name: Option<String>,
    output: &mut impl Write,
) -> Result<()> {
    session.dispatch(Command::CreateFolder)?;
    match name {
        Some(name) => session.dispatch(Command::CommitRename { name })?,
        None => session.dispatch(Command::CancelRename)?,
    }
    let folder = session
        .state()
        .folders
        .last()
        .context("created folder vanished")?;
    writeln!(output, "Created folder \"{}\" ({})", folder.name, folder.id)?;
    Ok(())
}

/// `ls`: the tree listing, or both raw collections as JSON.
pub fn list<S: StateStore>(
    session: &Session<S>,
    json: bool,
    presenter: &SidebarPresenter,
    output: &mut impl Write,
) -> Result<()> {
    if json {
        let state = session.state();
        let payload = serde_json::json!({
            "notes": state.notes,
            "folders": state.folders,
        });
        writeln!(output, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(());
    }
    write!(output, "{}", presenter.render(session.state()).to_text())?;
    Ok(())
}

/// `view`: render one note and make it the active note.
pub fn view<S: StateStore>(
    session: &mut Session<S>,
    target: &str,
    json: bool,
    presenter: &AnsiPresenter,
    output: &mut impl Write,
) -> Result<()> {
    let note = resolve_note(session.state(), target)?.clone();
    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&note)?)?;
    } else {
        write!(output, "{}", presenter.render(&note))?;
    }
    session.dispatch(Command::OpenNote { id: note.id })?;
    Ok(())
}

/// `edit`: run one editor cycle over the note's content.
pub fn edit<S: StateStore>(
    session: &mut Session<S>,
    target: &str,
    editor: &EditorLauncher,
    output: &mut impl Write,
) -> Result<()> {
    let note = resolve_note(session.state(), target)?.clone();
    session.dispatch(Command::OpenNote {
        id: note.id.clone(),
    })?;
    session.dispatch(Command::StartEditing)?;
    let content = editor.edit(&note.content)?;
    session.dispatch(Command::EditContent {
        id: note.id.clone(),
        content,
    })?;
    session.dispatch(Command::StopEditing)?;
    writeln!(output, "Updated \"{}\"", note.title)?;
    Ok(())
}

/// `rename`: notes win ties with folders; blank input renames nothing.
pub fn rename<S: StateStore>(
    session: &mut Session<S>,
    target: &str,
    new_name: &str,
    output: &mut impl Write,
) -> Result<()> {
    if new_name.trim().is_empty() {
        writeln!(output, "Blank name; nothing renamed")?;
        return Ok(());
    }
    match resolve_note(session.state(), target) {
        Ok(note) => {
            let id = note.id.clone();
            session.dispatch(Command::RenameNote {
                id: id.clone(),
                title: new_name.to_string(),
            })?;
            let title = session
                .state()
                .find_note(&id)
                .map(|n| n.title.as_str())
                .unwrap_or(new_name);
            writeln!(output, "Renamed note to \"{title}\"")?;
            Ok(())
        }
        Err(DomainError::TargetNotFound(_)) => {
            let id = resolve_folder(session.state(), target)?.id.clone();
            session.dispatch(Command::RenameFolder {
                id: id.clone(),
                name: new_name.to_string(),
            })?;
            let name = session
                .state()
                .find_folder(&id)
                .map(|f| f.name.as_str())
                .unwrap_or(new_name);
            writeln!(output, "Renamed folder to \"{name}\"")?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// `mv`: refile a note; "root" is reserved for the unfiled list. Without
/// an index the note goes to the end of the destination.
pub fn move_note<S: StateStore>(
    session: &mut Session<S>,
    note: &str,
    dest: &str,
    index: Option<usize>,
    output: &mut impl Write,
) -> Result<()> {
    let id = resolve_note(session.state(), note)?.id.clone();
    let (target, label) = if dest.eq_ignore_ascii_case("root") {
        (MoveTarget::Root, "the root list".to_string())
    } else {
        let folder = resolve_folder(session.state(), dest)?;
        (
            MoveTarget::Folder(folder.id.clone()),
            format!("folder \"{}\"", folder.name),
        )
    };
    let index = index.unwrap_or_else(|| match &target {
        MoveTarget::Root => session.state().root_notes().count(),
        MoveTarget::Folder(folder_id) => session.state().notes_in(folder_id).count(),
    });
    session.dispatch(Command::MoveNote {
        id: id.clone(),
        dest: target,
        index,
    })?;
    let title = session
        .state()
        .find_note(&id)
        .map(|n| n.title.clone())
        .unwrap_or(id);
    writeln!(output, "Moved \"{title}\" to {label}")?;
    Ok(())
}

/// `toggle`: expand or collapse a folder.
pub fn toggle<S: StateStore>(
    session: &mut Session<S>,
    folder: &str,
    output: &mut impl Write,
) -> Result<()> {
    let resolved = resolve_folder(session.state(), folder)?;
    let id = resolved.id.clone();
    let name = resolved.name.clone();
    session.dispatch(Command::ToggleFolder { id: id.clone() })?;
    let open = session
        .state()
        .find_folder(&id)
        .map(|f| f.is_open)
        .unwrap_or(false);
    writeln!(
        output,
        "{} \"{}\"",
        if open { "Expanded" } else { "Collapsed" },
        name
    )?;
    Ok(())
}

/// `rm` / `rmdir`: delete behind a confirmation prompt. The prompt goes
/// through the pending-delete record so the wording matches the shell's.
pub fn remove<S: StateStore>(
    session: &mut Session<S>,
    kind: ItemKind,
    target: &str,
    yes: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let (id, name) = match kind {
        ItemKind::Note => {
            let note = resolve_note(session.state(), target)?;
            (note.id.clone(), note.title.clone())
        }
        ItemKind::Folder => {
            let folder = resolve_folder(session.state(), target)?;
            (folder.id.clone(), folder.name.clone())
        }
    };
    let cascade = match kind {
        ItemKind::Folder => session.state().notes_in(&id).count(),
        ItemKind::Note => 0,
    };

    session.dispatch(Command::RequestDelete {
        kind,
        id: id.clone(),
    })?;

    if !yes {
        let record = session
            .state()
            .pending_delete
            .clone()
            .context("delete was not recorded")?;
        write!(
            output,
            "Delete {} \"{}\"? This action cannot be undone. [y/N] ",
            record.kind, record.name
        )?;
        output.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        if answer != "y" && answer != "yes" {
            session.dispatch(Command::CancelDelete)?;
            writeln!(output, "Cancelled")?;
            return Ok(());
        }
    }

    session.dispatch(Command::ConfirmDelete)?;
    match kind {
        ItemKind::Note => writeln!(output, "Deleted note \"{name}\"")?,
        ItemKind::Folder => {
            writeln!(output, "Deleted folder \"{name}\" and {cascade} note(s)")?
        }
    }
    Ok(())
}
