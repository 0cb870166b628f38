// src/cli/shell.rs
use crate::application::{resolve_folder, resolve_note, Session, StateStore};
use crate::cli::commands;
use crate::domain::{Command, DomainError, ItemKind};
use crate::infrastructure::EditorLauncher;
use crate::ports::{AnsiPresenter, SidebarEntry, SidebarPresenter};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "notemark> ";

enum Flow {
    Continue,
    Quit,
}

/// Interactive loop over one session. Rows are addressed by the numbers
/// of the most recently computed tree, ids and titles work everywhere a
/// number does.
pub struct Shell<'a, S: StateStore> {
    session: &'a mut Session<S>,
    editor: &'a EditorLauncher,
    ansi: AnsiPresenter,
    sidebar: SidebarPresenter,
}

impl<'a, S: StateStore> Shell<'a, S> {
    pub fn new(
        session: &'a mut Session<S>,
        editor: &'a EditorLauncher,
        ansi: AnsiPresenter,
        sidebar: SidebarPresenter,
    ) -> Self {
        Self {
            session,
            editor,
            ansi,
            sidebar,
        }
    }

    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
        commands::list(self.session, false, &self.sidebar, output)?;
        writeln!(output, "Type 'help' for commands.")?;

        let mut line = String::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(command = trimmed, "Shell input");
            match self.execute(trimmed, input, output) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(output, "Error: {e:#}")?,
            }
        }
        Ok(())
    }

    fn execute(
        &mut self,
        line: &str,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<Flow> {
        let mut parts = line.split_whitespace();
        let head = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        // A bare row number opens a note or toggles a folder.
        if rest.is_empty() {
            if let Ok(number) = head.parse::<usize>() {
                self.activate(number, output)?;
                return Ok(Flow::Continue);
            }
        }

        match head {
            "help" | "?" => self.help(output)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "ls" => commands::list(self.session, false, &self.sidebar, output)?,
            "new" => {
                let title = (!rest.is_empty()).then(|| rest.join(" "));
                commands::create_note(self.session, title, None, self.editor, output)?;
            }
            "mkdir" => self.mkdir(&rest, input, output)?,
            "view" | "open" => match rest.first() {
                Some(token) => {
                    let target = self.note_target(token);
                    commands::view(self.session, &target, false, &self.ansi, output)?;
                }
                None => writeln!(output, "Usage: view <note>")?,
            },
            "edit" => match rest.first() {
                Some(token) => {
                    let target = self.note_target(token);
                    commands::edit(self.session, &target, self.editor, output)?;
                }
                None => writeln!(output, "Usage: edit <note>")?,
            },
            "rename" => self.rename(&rest, input, output)?,
            "mv" => match &rest[..] {
                [note, dest, index @ ..] => {
                    let note = self.note_target(note);
                    let dest = if dest.eq_ignore_ascii_case("root") {
                        dest.to_string()
                    } else {
                        self.folder_target(dest)
                    };
                    let index = index.first().and_then(|i| i.parse::<usize>().ok());
                    commands::move_note(self.session, &note, &dest, index, output)?;
                }
                _ => writeln!(output, "Usage: mv <note> <folder|root> [index]")?,
            },
            "toggle" => match rest.first() {
                Some(token) => {
                    let target = self.folder_target(token);
                    commands::toggle(self.session, &target, output)?;
                }
                None => writeln!(output, "Usage: toggle <folder>")?,
            },
            "rm" => match rest.first() {
                Some(token) => self.remove(ItemKind::Note, token, input, output)?,
                None => writeln!(output, "Usage: rm <note>")?,
            },
            "rmdir" => match rest.first() {
                Some(token) => self.remove(ItemKind::Folder, token, input, output)?,
                None => writeln!(output, "Usage: rmdir <folder>")?,
            },
            _ => writeln!(output, "Unknown command '{head}'. Type 'help' for commands.")?,
        }
        Ok(Flow::Continue)
    }

    /// Open the note or toggle the folder behind a row number.
    fn activate(&mut self, number: usize, output: &mut impl Write) -> Result<()> {
        let view = self.sidebar.render(self.session.state());
        match view.entry(number).cloned() {
            Some(SidebarEntry {
                kind: ItemKind::Note,
                id,
            }) => commands::view(self.session, &id, false, &self.ansi, output),
            Some(SidebarEntry {
                kind: ItemKind::Folder,
                id,
            }) => commands::toggle(self.session, &id, output),
            None => {
                writeln!(output, "No row {number}")?;
                Ok(())
            }
        }
    }

    fn mkdir(
        &mut self,
        rest: &[&str],
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<()> {
        self.session.dispatch(Command::CreateFolder)?;
        let name = if rest.is_empty() {
            write!(output, "Folder name: ")?;
            output.flush()?;
            let mut buf = String::new();
            input.read_line(&mut buf)?;
            buf.trim().to_string()
        } else {
            rest.join(" ")
        };
        if name.is_empty() {
            // Same as clicking away from the name field: keep the default.
            self.session.dispatch(Command::CancelRename)?;
        } else {
            self.session.dispatch(Command::CommitRename { name })?;
        }
        if let Some(folder) = self.session.state().folders.last() {
            writeln!(output, "Created folder \"{}\" ({})", folder.name, folder.id)?;
        }
        Ok(())
    }

    fn rename(
        &mut self,
        rest: &[&str],
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<()> {
        let Some(token) = rest.first() else {
            writeln!(output, "Usage: rename <item> [new name]")?;
            return Ok(());
        };
        let (kind, id) = self.any_target(token)?;
        self.session.dispatch(Command::StartRename { id: id.clone() })?;

        let name = if rest.len() > 1 {
            rest[1..].join(" ")
        } else {
            write!(output, "New name: ")?;
            output.flush()?;
            let mut buf = String::new();
            input.read_line(&mut buf)?;
            buf.trim().to_string()
        };

        if name.is_empty() {
            self.session.dispatch(Command::CancelRename)?;
            writeln!(output, "Rename cancelled")?;
            return Ok(());
        }
        self.session.dispatch(Command::CommitRename { name })?;
        let current = match kind {
            ItemKind::Note => self.session.state().find_note(&id).map(|n| n.title.clone()),
            ItemKind::Folder => self.session.state().find_folder(&id).map(|f| f.name.clone()),
        };
        if let Some(current) = current {
            writeln!(output, "Renamed {kind} to \"{current}\"")?;
        }
        Ok(())
    }

    fn remove(
        &mut self,
        kind: ItemKind,
        token: &str,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<()> {
        if let Some(entry) = self.entry_for(token) {
            if entry.kind != kind {
                match kind {
                    ItemKind::Note => writeln!(output, "Row {token} is a folder; use rmdir")?,
                    ItemKind::Folder => writeln!(output, "Row {token} is a note; use rm")?,
                }
                return Ok(());
            }
            return commands::remove(self.session, kind, &entry.id, false, input, output);
        }
        commands::remove(self.session, kind, token, false, input, output)
    }

    fn help(&self, output: &mut impl Write) -> Result<()> {
        writeln!(output, "Commands:")?;
        writeln!(output, "  <n>                 open note n / toggle folder n")?;
        writeln!(output, "  ls                  show the tree")?;
        writeln!(output, "  new [title]         create a note and edit it")?;
        writeln!(output, "  mkdir [name]        create a folder")?;
        writeln!(output, "  view <n>            render a note")?;
        writeln!(output, "  edit <n>            edit a note in $EDITOR")?;
        writeln!(output, "  rename <n> [name]   rename a note or folder")?;
        writeln!(output, "  mv <n> <dest> [i]   move a note into a folder or 'root'")?;
        writeln!(output, "  toggle <n>          expand or collapse a folder")?;
        writeln!(output, "  rm <n>              delete a note")?;
        writeln!(output, "  rmdir <n>           delete a folder and its notes")?;
        writeln!(output, "  help                this list")?;
        writeln!(output, "  quit                leave the shell")?;
        Ok(())
    }

    /// Row number to entry, against a freshly computed tree.
    fn entry_for(&self, token: &str) -> Option<SidebarEntry> {
        let number: usize = token.parse().ok()?;
        let view = self.sidebar.render(self.session.state());
        view.entry(number).cloned()
    }

    // Row numbers win over literal ids and titles.
    fn note_target(&self, token: &str) -> String {
        match self.entry_for(token) {
            Some(entry) if entry.kind == ItemKind::Note => entry.id,
            _ => token.to_string(),
        }
    }

    fn folder_target(&self, token: &str) -> String {
        match self.entry_for(token) {
            Some(entry) if entry.kind == ItemKind::Folder => entry.id,
            _ => token.to_string(),
        }
    }

    fn any_target(&self, token: &str) -> Result<(ItemKind, String)> {
        if let Some(entry) = self.entry_for(token) {
            return Ok((entry.kind, entry.id));
        }
        match resolve_note(self.session.state(), token) {
            Ok(note) => Ok((ItemKind::Note, note.id.clone())),
            Err(DomainError::TargetNotFound(_)) => {
                let folder = resolve_folder(self.session.state(), token)?;
                Ok((ItemKind::Folder, folder.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
