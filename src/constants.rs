// src/constants.rs
//
// Application-wide constants extracted from magic values throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Title given to a freshly created note before the user renames it.
///
/// Used in: `domain/state.rs`
pub const DEFAULT_NOTE_TITLE: &str = "New Note";

/// Name given to a freshly created folder before the user renames it.
///
/// Used in: `domain/state.rs`
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

/// File name of the serialized note collection inside the data directory.
///
/// Used in: `infrastructure/store.rs`
pub const NOTES_FILE: &str = "notes.json";

/// File name of the serialized folder collection inside the data directory.
///
/// Used in: `infrastructure/store.rs`
pub const FOLDERS_FILE: &str = "folders.json";

/// Subdirectory name under the platform data/config directories.
///
/// Used in: `lib.rs`, `infrastructure/config.rs`
pub const APP_DIR: &str = "notemark";

/// Editor used when neither $VISUAL, $EDITOR nor the config names one.
///
/// Used in: `infrastructure/editor.rs`
pub const FALLBACK_EDITOR: &str = "vi";

/// Syntect theme used for fenced code blocks unless overridden in the config.
///
/// Used in: `infrastructure/config.rs`, `ports/ansi.rs`
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Terminal width assumed when the real width cannot be queried.
///
/// Used in: `ports/ansi.rs`, `ports/sidebar.rs`
pub const FALLBACK_WIDTH: usize = 80;
