//! 业务逻辑服务层

mod config_service;
mod domain_registry;
mod migration_service;
mod share_options;
mod share_service;
mod share_session_service;

pub use config_service::ConfigService;
pub use domain_registry::{validate_domain_input, DomainRegistry};
pub use migration_service::{
    migrate_config, MigrationResult, MigrationService, MIGRATED_DOMAIN_NAME,
};
pub use share_options::build_share_options;
pub use share_service::{DefaultShareLink, GeneratedShare, ShareSelectorState, ShareService};
pub use share_session_service::{SessionOptions, ShareSessionService};

use std::sync::Arc;

use crate::traits::{Clipboard, ConfigStore, NoteApi, Notifier};
use crate::types::{Notice, NoticeLevel};

/// 服务上下文 - 持有所有宿主能力
///
/// 平台层需要创建此上下文，并注入宿主提供的具体实现。
pub struct ServiceContext {
    /// 插件配置存储
    config_store: Arc<dyn ConfigStore>,
    /// 笔记 / 分享 API
    note_api: Arc<dyn NoteApi>,
    /// 提示消息
    notifier: Arc<dyn Notifier>,
    /// 剪贴板
    clipboard: Arc<dyn Clipboard>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        note_api: Arc<dyn NoteApi>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            config_store,
            note_api,
            notifier,
            clipboard,
        }
    }

    pub fn config_store(&self) -> &Arc<dyn ConfigStore> {
        &self.config_store
    }

    pub fn note_api(&self) -> &Arc<dyn NoteApi> {
        &self.note_api
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn clipboard(&self) -> &Arc<dyn Clipboard> {
        &self.clipboard
    }

    /// 发送提示消息并记录日志
    pub fn notify(&self, notice: &Notice) {
        match notice.level() {
            NoticeLevel::Error => log::warn!("Notify {}", notice.key()),
            _ => log::debug!("Notify {}", notice.key()),
        }
        self.notifier.notify(notice);
    }
}
