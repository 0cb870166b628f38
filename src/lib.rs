// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::application::Session;
use crate::cli::args::{Args, Command};
use crate::cli::{commands, Shell};
use crate::constants::APP_DIR;
use crate::domain::{DomainError, ItemKind};
use crate::infrastructure::{Config, EditorLauncher, JsonStore};
use crate::ports::{AnsiPresenter, SidebarPresenter};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notemark with arguments");

    let config = Config::load_default()?;
    let data_dir = resolve_data_dir(args.dir.clone(), &config)?;

    // Printing the location must work even when nothing exists there yet.
    if let Some(Command::Path) = args.command {
        println!("{}", data_dir.display());
        return Ok(());
    }

    let store = JsonStore::new(&data_dir)?;
    let mut session = Session::open(store)?;

    let use_color = !args.plain && env::var_os("NO_COLOR").is_none() && config.ui.color;
    let ansi = AnsiPresenter::new(use_color, &config.ui.theme);
    let sidebar = SidebarPresenter::new(use_color);
    let editor = EditorLauncher::from_env(&config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match args.command {
        None | Some(Command::Shell) => {
            info!(dir = %data_dir.display(), "Starting interactive shell");
            Shell::new(&mut session, &editor, ansi, sidebar).run(&mut input, &mut output)
        }
        Some(Command::New { title, folder }) => {
            commands::create_note(&mut session, title, folder, &editor, &mut output)
        }
        Some(Command::Mkdir { name }) => commands::create_folder(&mut session, name, &mut output),
        Some(Command::Ls { json }) => commands::list(&session, json, &sidebar, &mut output),
        Some(Command::View { target, json }) => {
            commands::view(&mut session, &target, json, &ansi, &mut output)
        }
        Some(Command::Edit { target }) => {
            commands::edit(&mut session, &target, &editor, &mut output)
        }
        Some(Command::Rename { target, new_name }) => {
            commands::rename(&mut session, &target, &new_name, &mut output)
        }
        Some(Command::Mv { note, dest, index }) => {
            commands::move_note(&mut session, &note, &dest, index, &mut output)
        }
        Some(Command::Toggle { folder }) => commands::toggle(&mut session, &folder, &mut output),
        Some(Command::Rm { target, yes }) => commands::remove(
            &mut session,
            ItemKind::Note,
            &target,
            yes,
            &mut input,
            &mut output,
        ),
        Some(Command::Rmdir { target, yes }) => commands::remove(
            &mut session,
            ItemKind::Folder,
            &target,
            yes,
            &mut input,
            &mut output,
        ),
        // Handled before the session was opened.
        Some(Command::Path) => Ok(()),
    }
}

/// Resolution order: `--dir` flag, `NOTEMARK_DIR`, the config's
/// `[storage] dir`, then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf, DomainError> {
    if let Some(dir) = flag {
        debug!(?dir, "Using data directory from --dir");
        return Ok(dir);
    }
    if let Some(dir) = env::var_os("NOTEMARK_DIR").filter(|v| !v.is_empty()) {
        debug!(?dir, "Using data directory from NOTEMARK_DIR");
        return Ok(PathBuf::from(dir));
    }
    if !config.storage.dir.is_empty() {
        debug!(dir = %config.storage.dir, "Using data directory from config");
        return Ok(PathBuf::from(&config.storage.dir));
    }
    dirs::data_dir()
        .map(|base| base.join(APP_DIR))
        .ok_or(DomainError::NoDataDir)
}
