//! Blinko Custom Share Domain Core Library
//!
//! Provides the platform-independent logic of the custom share domain plugin:
//! - Domain registry and settings (Config Service)
//! - Legacy single-domain config migration (Migration Service)
//! - Share link rewriting and share options
//! - Remote share sessions and quick share (Share Service)
//!
//! Host capabilities (plugin config store, note API, toasts, clipboard) are
//! abstracted through traits and injected via [`ServiceContext`].

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{Clipboard, ConfigStore, NoteApi, Notifier};
pub use types::Outcome;
