//! 宿主笔记 API 抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{NoteListFilter, NoteSnapshot, ShareNoteRequest, ShareNoteResponse};

/// 宿主笔记 API Trait
///
/// 平台实现:
/// - Blinko HTTP API: `BlinkoClient` (`share-domain-host`, tRPC `notes.*`)
/// - 测试: `MockNoteApi`
#[async_trait]
pub trait NoteApi: Send + Sync {
    /// 列出笔记（仅用于重新获取权威的分享状态）
    async fn list_notes(&self, filter: &NoteListFilter) -> CoreResult<Vec<NoteSnapshot>>;

    /// 创建或取消分享（由 `request.is_cancel` 区分）
    ///
    /// # Returns
    /// * `Ok(Some(response))` - 宿主返回了结果
    /// * `Ok(None)` - 宿主返回 `null`
    async fn share_note(&self, request: &ShareNoteRequest) -> CoreResult<Option<ShareNoteResponse>>;
}
