// src/ports/sidebar.rs
use crate::constants::FALLBACK_WIDTH;
use crate::domain::{AppState, ItemKind, Note};
use crate::util::text::truncate;
use terminal_size::{terminal_size, Width};
use yansi::Paint;

/// One selectable row in the rendered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub kind: ItemKind,
    pub id: String,
}

/// Rendered listing plus the table that maps row numbers back to items.
///
/// Row numbers are 1-based to match what the user sees on screen.
#[derive(Debug, Clone)]
pub struct SidebarView {
    pub lines: Vec<String>,
    pub entries: Vec<SidebarEntry>,
}

impl SidebarView {
    pub fn entry(&self, number: usize) -> Option<&SidebarEntry> {
        number.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Renders the note tree: loose notes first, then folders in creation
/// order with their notes indented underneath when open.
#[derive(Debug)]
pub struct SidebarPresenter {
    color: bool,
    width: usize,
}

impl SidebarPresenter {
    pub fn new(color: bool) -> Self {
        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH);
        Self { color, width }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn render(&self, state: &AppState) -> SidebarView {
        let mut view = SidebarView {
            lines: Vec::new(),
            entries: Vec::new(),
        };

        for note in state.root_notes() {
            self.push_note(&mut view, state, note, 0);
        }
        for folder in &state.folders {
            let number = view.entries.len() + 1;
            let count = state.notes_in(&folder.id).count();
            let name = truncate(&folder.name, self.title_width(1));
            let label = if folder.is_open {
                format!("▾ {name}")
            } else {
                format!("▸ {name} ({count})")
            };
            let label = if self.color {
                Paint::new(label.as_str()).bold().to_string()
            } else {
                label
            };
            view.lines.push(format!("{number:>3}. {label}"));
            view.entries.push(SidebarEntry {
                kind: ItemKind::Folder,
                id: folder.id.clone(),
            });

            if folder.is_open {
                let members: Vec<&Note> = state.notes_in(&folder.id).collect();
                for note in members {
                    self.push_note(&mut view, state, note, 1);
                }
            }
        }

        if view.entries.is_empty() {
            view.lines.push("No notes yet. Create one with 'new'.".to_string());
        }
        view
    }

    fn push_note(&self, view: &mut SidebarView, state: &AppState, note: &Note, depth: usize) {
        let number = view.entries.len() + 1;
        let indent = "  ".repeat(depth);
        let active = state.active_note_id.as_deref() == Some(note.id.as_str());
        let title = truncate(&note.title, self.title_width(depth));
        let title = match (self.color, active) {
            (true, true) => Paint::green(title.as_str()).bold().to_string(),
            _ => title,
        };
        let marker = if active { " *" } else { "" };
        view.lines.push(format!("{number:>3}. {indent}{title}{marker}"));
        view.entries.push(SidebarEntry {
            kind: ItemKind::Note,
            id: note.id.clone(),
        });
    }

    // Room left once the number column, indent and active marker are paid for.
    fn title_width(&self, depth: usize) -> usize {
        self.width.saturating_sub(9 + depth * 2).max(10)
    }
}
