// src/ports/mod.rs
pub mod ansi;
pub mod sidebar;

pub use ansi::AnsiPresenter;
pub use sidebar::{SidebarEntry, SidebarPresenter, SidebarView};
