//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{Clipboard, ConfigStore, NoteApi, Notifier};
use crate::types::{NoteListFilter, NoteSnapshot, Notice, ShareNoteRequest, ShareNoteResponse};

/// 测试用宿主地址
pub const TEST_ORIGIN: &str = "https://blinko.test";

// ===== MockConfigStore =====

pub struct MockConfigStore {
    values: RwLock<Map<String, Value>>,
    /// 如果 Some，load 时返回此错误
    load_error: RwLock<Option<String>>,
    /// 如果 Some，set 时返回此错误
    save_error: RwLock<Option<String>>,
    writes: RwLock<usize>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(Map::new()),
            load_error: RwLock::new(None),
            save_error: RwLock::new(None),
            writes: RwLock::new(0),
        }
    }

    /// 直接写入原始配置（不计入写入次数）
    pub async fn seed(&self, raw: Value) {
        *self.values.write().await = match raw {
            Value::Object(map) => map,
            _ => Map::new(),
        };
    }

    pub async fn set_load_error(&self, err: Option<String>) {
        *self.load_error.write().await = err;
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn snapshot(&self) -> Value {
        Value::Object(self.values.read().await.clone())
    }

    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }
}

#[async_trait]
impl ConfigStore for MockConfigStore {
    async fn load(&self, _namespace: &str) -> CoreResult<Value> {
        if let Some(ref msg) = *self.load_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(Value::Object(self.values.read().await.clone()))
    }

    async fn set(&self, _namespace: &str, key: &str, value: &Value) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.values
            .write()
            .await
            .insert(key.to_string(), value.clone());
        *self.writes.write().await += 1;
        Ok(())
    }
}

// ===== MockNoteApi =====

pub struct MockNoteApi {
    notes: RwLock<Vec<NoteSnapshot>>,
    list_error: RwLock<Option<String>>,
    share_response: RwLock<CoreResult<Option<ShareNoteResponse>>>,
    share_requests: RwLock<Vec<ShareNoteRequest>>,
    /// 每次调用前的模拟延迟
    delay: RwLock<Option<Duration>>,
}

impl MockNoteApi {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(Vec::new()),
            list_error: RwLock::new(None),
            share_response: RwLock::new(Ok(Some(ShareNoteResponse::default()))),
            share_requests: RwLock::new(Vec::new()),
            delay: RwLock::new(None),
        }
    }

    pub async fn set_notes(&self, notes: Vec<NoteSnapshot>) {
        *self.notes.write().await = notes;
    }

    pub async fn set_list_error(&self, err: Option<String>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_share_response(&self, response: CoreResult<Option<ShareNoteResponse>>) {
        *self.share_response.write().await = response;
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// 已收到的 `shareNote` 请求
    pub async fn share_requests(&self) -> Vec<ShareNoteRequest> {
        self.share_requests.read().await.clone()
    }

    async fn wait(&self) {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl NoteApi for MockNoteApi {
    async fn list_notes(&self, _filter: &NoteListFilter) -> CoreResult<Vec<NoteSnapshot>> {
        self.wait().await;
        if let Some(ref msg) = *self.list_error.read().await {
            return Err(CoreError::NetworkError(msg.clone()));
        }
        Ok(self.notes.read().await.clone())
    }

    async fn share_note(&self, request: &ShareNoteRequest) -> CoreResult<Option<ShareNoteResponse>> {
        self.share_requests.write().await.push(request.clone());
        self.wait().await;
        self.share_response.read().await.clone()
    }
}

// ===== MockNotifier =====

pub struct MockNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

// ===== MockClipboard =====

pub struct MockClipboard {
    contents: RwLock<Vec<String>>,
    error: RwLock<Option<String>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(Vec::new()),
            error: RwLock::new(None),
        }
    }

    pub async fn set_error(&self, err: Option<String>) {
        *self.error.write().await = err;
    }

    /// 成功写入的文本
    pub async fn contents(&self) -> Vec<String> {
        self.contents.read().await.clone()
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn write_text(&self, text: &str) -> CoreResult<()> {
        if let Some(ref msg) = *self.error.read().await {
            return Err(CoreError::ClipboardError(msg.clone()));
        }
        self.contents.write().await.push(text.to_string());
        Ok(())
    }
}

// ===== 工厂方法 =====

/// 测试中需要直接访问的 mock 实例
pub struct TestMocks {
    pub config_store: Arc<MockConfigStore>,
    pub note_api: Arc<MockNoteApi>,
    pub notifier: Arc<MockNotifier>,
    pub clipboard: Arc<MockClipboard>,
}

/// 创建测试用 `ServiceContext`，同时返回 mock 实例
pub fn create_test_context() -> (Arc<ServiceContext>, TestMocks) {
    let mocks = TestMocks {
        config_store: Arc::new(MockConfigStore::new()),
        note_api: Arc::new(MockNoteApi::new()),
        notifier: Arc::new(MockNotifier::new()),
        clipboard: Arc::new(MockClipboard::new()),
    };

    let ctx = Arc::new(ServiceContext::new(
        mocks.config_store.clone(),
        mocks.note_api.clone(),
        mocks.notifier.clone(),
        mocks.clipboard.clone(),
    ));

    (ctx, mocks)
}

/// 创建未分享的测试笔记
pub fn test_note(id: &str) -> NoteSnapshot {
    NoteSnapshot::new(id)
}
