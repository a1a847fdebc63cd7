use async_trait::async_trait;
use share_domain_core::error::{CoreError, CoreResult};
use share_domain_core::traits::Clipboard;

/// Clipboard for headless frontends (CLI, server)
///
/// Every write fails, so copy actions fall through to the manual-copy notice
/// that carries the URL.
pub struct HeadlessClipboard;

#[async_trait]
impl Clipboard for HeadlessClipboard {
    async fn write_text(&self, _text: &str) -> CoreResult<()> {
        Err(CoreError::ClipboardError(
            "no clipboard available in headless mode".to_string(),
        ))
    }
}
