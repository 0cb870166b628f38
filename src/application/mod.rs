// src/application/mod.rs
pub mod resolve;
pub mod session;

pub use resolve::{resolve_folder, resolve_note};
pub use session::{Session, StateStore};
