// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(disable_help_subcommand = true)]
pub struct Args {
    /// Data directory holding notes.json and folders.json (optional)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable ANSI styling and markdown rendering
    #[arg(long, global = true)]
    pub plain: bool,

    /// Subcommand to execute; without one the interactive shell starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a note and open it in $EDITOR
    New {
        /// Title for the note (defaults to "New Note")
        #[arg(value_name = "TITLE")]
        title: Option<String>,

        /// File the note under this folder (id or name)
        #[arg(short, long, value_name = "FOLDER")]
        folder: Option<String>,
    },

    /// Create a folder
    Mkdir {
        /// Name for the folder (defaults to "New Folder")
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// List notes and folders as a tree
    Ls {
        /// Output both collections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a note to the terminal
    View {
        /// Note id or title
        #[arg(value_name = "NOTE")]
        target: String,

        /// Output the note as JSON instead of rendering it
        #[arg(long)]
        json: bool,
    },

    /// Open a note's content in $EDITOR
    Edit {
        /// Note id or title
        #[arg(value_name = "NOTE")]
        target: String,
    },

    /// Rename a note or folder
    Rename {
        /// Note or folder, by id or name
        #[arg(value_name = "TARGET")]
        target: String,

        /// New name; surrounding whitespace is trimmed, blank input is
        /// discarded
        #[arg(value_name = "NEW_NAME")]
        new_name: String,
    },

    /// Move a note into a folder or back to the root list
    Mv {
        /// Note id or title
        #[arg(value_name = "NOTE")]
        note: String,

        /// Destination folder (id or name), or "root"
        #[arg(value_name = "DEST")]
        dest: String,

        /// Position within the destination (defaults to the end)
        #[arg(value_name = "INDEX")]
        index: Option<usize>,
    },

    /// Expand or collapse a folder
    Toggle {
        /// Folder id or name
        #[arg(value_name = "FOLDER")]
        folder: String,
    },

    /// Delete a note (asks for confirmation)
    Rm {
        /// Note id or title
        #[arg(value_name = "NOTE")]
        target: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a folder and every note inside it (asks for confirmation)
    Rmdir {
        /// Folder id or name
        #[arg(value_name = "FOLDER")]
        target: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the resolved data directory
    Path,

    /// Start the interactive shell
    Shell,
}
