//! Notification and clipboard capabilities

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Notice;

/// Transient toast sink
///
/// Implementations forward to the host's toast API. Notices are fire and
/// forget; a notifier must not fail.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Notifier that only logs, for headless use
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        log::info!("[notice] {} {:?}", notice.i18n_key(), notice.params());
    }
}

/// Best-effort clipboard write
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> CoreResult<()>;
}
