// src/infrastructure/editor.rs
use crate::constants::FALLBACK_EDITOR;
use crate::domain::DomainError;
use crate::infrastructure::Config;
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::Builder;
use tracing::{debug, instrument};

/// Hands note content to an external editor and reads the result back.
///
/// The buffer travels through a temporary `.md` file so editors that
/// rename-over on save still work.
#[derive(Debug)]
pub struct EditorLauncher {
    program: String,
}

impl EditorLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// $VISUAL beats $EDITOR beats the config entry beats `vi`.
    pub fn from_env(config: &Config) -> Self {
        let program = env::var("VISUAL")
            .or_else(|_| env::var("EDITOR"))
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| {
                let configured = config.editor.program.clone();
                (!configured.is_empty()).then_some(configured)
            })
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
        Self { program }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run one edit cycle: write `initial` to a temp file, block on the
    /// editor, and return whatever the file holds afterwards.
    #[instrument(level = "debug", skip(self, initial))]
    pub fn edit(&self, initial: &str) -> Result<String, DomainError> {
        let mut file = Builder::new()
            .prefix("notemark-")
            .suffix(".md")
            .tempfile()
            .map_err(|e| DomainError::Editor(format!("cannot create temp file: {e}")))?;
        file.write_all(initial.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| DomainError::Editor(format!("cannot write temp file: {e}")))?;

        let path = file.path().to_path_buf();
        debug!(program = %self.program, ?path, "Launching editor");

        let status = Command::new(&self.program)
            .arg(&path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DomainError::Editor(format!("failed to launch '{}': {e}", self.program)))?;
        if !status.success() {
            return Err(DomainError::Editor(format!(
                "'{}' exited with non-zero status",
                self.program
            )));
        }

        // Read via the path, not the original handle: the editor may have
        // replaced the file.
        std::fs::read_to_string(&path)
            .map_err(|e| DomainError::Editor(format!("cannot read edited file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_noop_editor_when_editing_then_content_is_returned_unchanged() {
        // `true` exits 0 without touching its argument.
        let launcher = EditorLauncher::new("true");

        let result = launcher.edit("# unchanged").expect("edit should succeed");

        assert_eq!(result, "# unchanged");
    }

    #[test]
    fn given_failing_editor_when_editing_then_returns_editor_error() {
        let launcher = EditorLauncher::new("false");

        let result = launcher.edit("content");

        assert!(matches!(result, Err(DomainError::Editor(_))));
    }

    #[test]
    fn given_missing_program_when_editing_then_returns_editor_error() {
        let launcher = EditorLauncher::new("definitely-not-an-editor-2f8a");

        let result = launcher.edit("content");

        assert!(matches!(result, Err(DomainError::Editor(_))));
    }
}
