// src/infrastructure/mod.rs
pub mod config;
pub mod editor;
pub mod store;

pub use config::Config;
pub use editor::EditorLauncher;
pub use store::JsonStore;
