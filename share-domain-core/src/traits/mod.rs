//! Host capability trait definitions

mod config_store;
mod note_api;
mod notifier;

pub use config_store::ConfigStore;
pub use note_api::NoteApi;
pub use notifier::{Clipboard, LogNotifier, Notifier};
