//! # share-domain-host
//!
//! HTTP client for a Blinko instance's tRPC API, backing the custom share
//! domain plugin's host capabilities:
//!
//! | Capability | Procedures |
//! |------------|------------|
//! | [`ConfigStore`](share_domain_core::ConfigStore) | `config.getPluginConfig` (query), `config.setPluginConfig` (mutation) |
//! | [`NoteApi`](share_domain_core::NoteApi) | `notes.list`, `notes.shareNote` (mutations) |
//!
//! ## Feature Flags
//!
//! - **`native-tls`**: use the platform's native TLS implementation.
//! - **`rustls`** *(default)*: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use share_domain_host::{BlinkoClient, HostClientConfig};
//!
//! # fn main() -> Result<(), share_domain_host::HostError> {
//! let client = BlinkoClient::new(
//!     HostClientConfig::new("https://blinko.example").with_token("access-token"),
//! )?;
//! assert_eq!(client.origin(), "https://blinko.example");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http_client;
mod trpc;
mod utils;

pub use client::{BlinkoClient, HostClientConfig};
pub use error::{HostError, Result};
pub use utils::log_sanitizer;
