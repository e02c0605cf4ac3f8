//! Core library for Prompt Props.
//! Stores named groups of prompt attributes in SQLite and edits them in an egui page that
//! rebuilds the prompt text whenever an attribute value changes.

mod config;
mod dialog;
mod gui;
pub mod page;
mod prompt;
pub mod statics;
mod store;

pub use config::AppConfig;
pub use dialog::DialogResult;
pub use gui::run_gui;
pub use prompt::format_prompt;
pub use store::{DEFAULT_GROUP_ID, PropertyAttribute, PropertyDb, PropertyGroup, StoreError};
