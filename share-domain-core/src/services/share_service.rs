//! 分享选择器与快速分享服务
//!
//! 组合配置、分享会话与选项生成，并把所有失败转换为提示消息或降级结果。

use std::sync::Arc;

use crate::error::CoreError;
use crate::services::{build_share_options, ConfigService, ServiceContext, ShareSessionService};
use crate::types::{
    NoteSnapshot, Notice, Outcome, ShareLink, ShareOption, ShareRequest, ShareSession,
    ORIGINAL_OPTION_NAME,
};
use crate::utils::password::{pad_share_password, validate_share_password};
use crate::utils::url::rewrite_share_link;

/// 打开分享选择器时的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSelectorState {
    /// 与宿主对齐后的笔记
    pub note: NoteSnapshot,
    /// 现有分享的密码（补齐 6 位），无密码为空
    pub password: String,
    /// 现有分享的选项；尚未分享时为空
    pub options: Vec<ShareOption>,
}

impl ShareSelectorState {
    /// 笔记是否已有分享
    #[must_use]
    pub fn is_shared(&self) -> bool {
        !self.options.is_empty()
    }
}

/// 生成分享的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedShare {
    /// 已合并新分享状态的笔记
    pub note: NoteSnapshot,
    pub link: Outcome<ShareLink>,
    pub options: Vec<ShareOption>,
}

/// 默认分享链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultShareLink {
    pub url: Outcome<String>,
    /// 实际使用的域名名称（未使用自定义域名时为原始链接名称）
    pub domain_name: String,
    /// 需要合并回笔记的分享状态
    pub session: ShareSession,
}

/// 分享服务
pub struct ShareService {
    ctx: Arc<ServiceContext>,
    config_service: Arc<ConfigService>,
    session_service: Arc<ShareSessionService>,
}

impl ShareService {
    #[must_use]
    pub fn new(
        ctx: Arc<ServiceContext>,
        config_service: Arc<ConfigService>,
        session_service: Arc<ShareSessionService>,
    ) -> Self {
        Self {
            ctx,
            config_service,
            session_service,
        }
    }

    /// 打开分享选择器
    ///
    /// 先从宿主获取最新的笔记状态；已有分享时直接基于现有链接生成选项，不创建新分享。
    pub async fn open_selector(&self, note: &NoteSnapshot) -> ShareSelectorState {
        let note = self.session_service.refresh_note(note).await;
        let session = note.session();

        let Some(link) = self.session_service.existing_share(&session) else {
            log::debug!("No existing share for note {}", note.id);
            return ShareSelectorState {
                note,
                password: String::new(),
                options: Vec::new(),
            };
        };

        log::debug!("Using existing share for note {}: {}", note.id, link.token);
        let config = self.config_service.load().await;
        let options =
            build_share_options(&config.domains, &link.url, config.default_domain_id.as_deref());

        ShareSelectorState {
            password: pad_share_password(&session.share_password),
            note,
            options,
        }
    }

    /// 生成（或刷新）分享并返回选项
    ///
    /// 密码不合法时提示并返回 `None`；已有请求进行中时同样返回 `None`。
    pub async fn generate_share(
        &self,
        note: &NoteSnapshot,
        request: &ShareRequest,
    ) -> Option<GeneratedShare> {
        if let Err(e) = validate_share_password(&request.password) {
            log::warn!("Share request rejected: {e}");
            self.ctx.notify(&Notice::InvalidPassword);
            return None;
        }

        let config = self.config_service.load().await;
        let outcome = self.session_service.create_share(note, request).await?;
        if outcome.is_fallback() {
            self.ctx.notify(&Notice::ShareFallback);
        }

        let session = outcome.value().session.clone();
        let link = outcome.map(|created| created.link);
        let options = build_share_options(
            &config.domains,
            &link.value().url,
            config.default_domain_id.as_deref(),
        );

        Some(GeneratedShare {
            note: note.clone().with_session(&session),
            link,
            options,
        })
    }

    /// 取消分享，成功时返回已清除分享状态的笔记
    pub async fn cancel_share(&self, note: &NoteSnapshot) -> Option<NoteSnapshot> {
        if let Some(session) = self.session_service.cancel_share(note).await {
            self.ctx.notify(&Notice::ShareCanceled);
            Some(note.clone().with_session(&session))
        } else {
            self.ctx.notify(&Notice::CancelShareFailed);
            None
        }
    }

    /// 复制选项链接
    ///
    /// 剪贴板不可用时提示用户手动复制该链接，返回 `false`。
    pub async fn copy_option(&self, option: &ShareOption) -> bool {
        match self.ctx.clipboard().write_text(&option.url).await {
            Ok(()) => {
                self.ctx.notify(&Notice::LinkCopied {
                    domain_name: option.name.clone(),
                });
                true
            }
            Err(e) => {
                log::warn!("Clipboard write failed, asking for manual copy: {e}");
                self.ctx.notify(&Notice::ManualCopy {
                    url: option.url.clone(),
                });
                false
            }
        }
    }

    /// 获取默认分享链接（用于快速分享）
    ///
    /// 创建分享后，若默认域名存在且已启用则改写到该域名下，否则使用原始链接。
    pub async fn default_share_link(&self, note: &NoteSnapshot) -> DefaultShareLink {
        let config = self.config_service.load().await;

        let (link, session) =
            match self.session_service.create_share(note, &ShareRequest::default()).await {
                Some(outcome) => {
                    let session = outcome.value().session.clone();
                    (outcome.map(|created| created.link.url), session)
                }
                None => (
                    Outcome::fallback(
                        self.session_service.fallback_link(note).url,
                        CoreError::ShareInProgress.to_string(),
                    ),
                    note.session(),
                ),
            };

        let Some(domain) = config.default_domain().filter(|d| d.enabled) else {
            return DefaultShareLink {
                url: link,
                domain_name: ORIGINAL_OPTION_NAME.to_string(),
                session,
            };
        };

        let url = match link {
            Outcome::Success { value } => rewrite_share_link(&value, &domain.url),
            Outcome::Fallback { value, reason } => Outcome::fallback(
                rewrite_share_link(&value, &domain.url).into_value(),
                reason,
            ),
        };

        DefaultShareLink {
            url,
            domain_name: domain.name.clone(),
            session,
        }
    }

    /// 快速分享：生成默认链接并复制到剪贴板
    ///
    /// 返回的链接无论是否复制成功都可用，`bool` 表示是否已复制。
    pub async fn quick_share(&self, note: &NoteSnapshot) -> (DefaultShareLink, bool) {
        let link = self.default_share_link(note).await;

        let copied = match self.ctx.clipboard().write_text(link.url.value()).await {
            Ok(()) => {
                self.ctx.notify(&Notice::LinkCopied {
                    domain_name: link.domain_name.clone(),
                });
                true
            }
            Err(e) => {
                log::warn!("Quick share copy failed: {e}");
                self.ctx.notify(&Notice::CopyFailed);
                false
            }
        };

        (link, copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SessionOptions;
    use crate::test_utils::{create_test_context, test_note, TestMocks, TEST_ORIGIN};
    use crate::types::ShareNoteResponse;
    use serde_json::json;

    fn service() -> (ShareService, TestMocks) {
        let (ctx, mocks) = create_test_context();
        let config_service = Arc::new(ConfigService::new(Arc::clone(&ctx)));
        let session_service = Arc::new(ShareSessionService::new(
            Arc::clone(&ctx),
            SessionOptions::new(TEST_ORIGIN),
        ));
        (ShareService::new(ctx, config_service, session_service), mocks)
    }

    async fn seed_blog_domain(mocks: &TestMocks, enabled: bool) {
        mocks
            .config_store
            .seed(json!({
                "domains": [{"id": "d1", "name": "Blog", "url": "https://blog.me", "enabled": enabled}],
                "defaultDomainId": "d1"
            }))
            .await;
    }

    async fn host_shares_as(mocks: &TestMocks, token: &str, password: &str) {
        mocks
            .note_api
            .set_share_response(Ok(Some(ShareNoteResponse {
                share_encrypted_url: Some(token.into()),
                share_password: Some(password.into()),
            })))
            .await;
    }

    #[tokio::test]
    async fn open_selector_uses_existing_host_share() {
        let (svc, mocks) = service();
        seed_blog_domain(&mocks, true).await;
        let mut hosted = test_note("8");
        hosted.is_share = true;
        hosted.share_encrypted_url = Some("xyz".into());
        hosted.share_password = Some("42".into());
        mocks.note_api.set_notes(vec![hosted.clone()]).await;

        // 调用方持有的是过期快照
        let state = svc.open_selector(&test_note("8")).await;

        assert!(state.is_shared());
        assert_eq!(state.note, hosted);
        assert_eq!(state.password, "000042");
        assert_eq!(state.options[0].url, "https://blinko.test/share/xyz?password=42");
        assert_eq!(state.options[1].url, "https://blog.me/share/xyz?password=42");
        assert!(state.options[1].is_default);
        assert!(mocks.note_api.share_requests().await.is_empty());
    }

    #[tokio::test]
    async fn open_selector_without_share_has_no_options() {
        let (svc, _) = service();
        let state = svc.open_selector(&test_note("8")).await;
        assert!(!state.is_shared());
        assert_eq!(state.password, "");
    }

    #[tokio::test]
    async fn generate_share_returns_rewritten_options() {
        let (svc, mocks) = service();
        seed_blog_domain(&mocks, true).await;
        host_shares_as(&mocks, "xyz", "").await;

        let generated = svc
            .generate_share(&test_note("8"), &ShareRequest::default())
            .await
            .unwrap();

        assert!(!generated.link.is_fallback());
        assert!(generated.note.is_share);
        assert_eq!(generated.note.share_encrypted_url.as_deref(), Some("xyz"));
        let urls: Vec<&str> = generated.options.iter().map(|o| o.url.as_str()).collect();
        assert_eq!(urls, vec!["https://blinko.test/share/xyz", "https://blog.me/share/xyz"]);
        assert!(mocks.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn generate_share_rejects_bad_password() {
        let (svc, mocks) = service();

        let result = svc
            .generate_share(&test_note("8"), &ShareRequest::with_password("12ab"))
            .await;

        assert!(result.is_none());
        assert_eq!(mocks.notifier.notices(), vec![Notice::InvalidPassword]);
        assert!(mocks.note_api.share_requests().await.is_empty());
    }

    #[tokio::test]
    async fn generate_share_warns_on_fallback() {
        let (svc, mocks) = service();
        mocks
            .note_api
            .set_share_response(Err(CoreError::NetworkError("down".into())))
            .await;

        let generated = svc
            .generate_share(&test_note("8"), &ShareRequest::default())
            .await
            .unwrap();

        assert!(generated.link.is_fallback());
        assert_eq!(generated.options[0].url, "https://blinko.test/share/8");
        assert!(!generated.note.is_share);
        assert_eq!(mocks.notifier.notices(), vec![Notice::ShareFallback]);
    }

    #[tokio::test]
    async fn cancel_share_clears_note_and_notifies() {
        let (svc, mocks) = service();
        mocks
            .note_api
            .set_share_response(Ok(Some(ShareNoteResponse::default())))
            .await;
        let mut note = test_note("8");
        note.is_share = true;
        note.share_encrypted_url = Some("xyz".into());
        note.share_password = Some("123456".into());

        let cleared = svc.cancel_share(&note).await.unwrap();

        assert!(!cleared.is_share);
        assert!(cleared.share_encrypted_url.is_none());
        assert_eq!(cleared.share_password.as_deref(), Some(""));
        assert_eq!(mocks.notifier.notices(), vec![Notice::ShareCanceled]);
    }

    #[tokio::test]
    async fn cancel_share_failure_notifies() {
        let (svc, mocks) = service();
        mocks.note_api.set_share_response(Ok(None)).await;

        assert!(svc.cancel_share(&test_note("8")).await.is_none());
        assert_eq!(mocks.notifier.notices(), vec![Notice::CancelShareFailed]);
    }

    #[tokio::test]
    async fn copy_option_asks_for_manual_copy_when_clipboard_fails() {
        let (svc, mocks) = service();
        let option = ShareOption {
            id: "d1".into(),
            name: "Blog".into(),
            url: "https://blog.me/share/xyz".into(),
            is_default: true,
        };

        assert!(svc.copy_option(&option).await);
        mocks.clipboard.set_error(Some("denied".into())).await;
        assert!(!svc.copy_option(&option).await);

        assert_eq!(mocks.clipboard.contents().await, vec![option.url.clone()]);
        assert_eq!(
            mocks.notifier.notices(),
            vec![
                Notice::LinkCopied {
                    domain_name: "Blog".into()
                },
                Notice::ManualCopy { url: option.url },
            ]
        );
    }

    #[tokio::test]
    async fn default_link_uses_enabled_default_domain() {
        let (svc, mocks) = service();
        seed_blog_domain(&mocks, true).await;
        host_shares_as(&mocks, "xyz", "").await;

        let link = svc.default_share_link(&test_note("8")).await;

        assert_eq!(link.url, Outcome::success("https://blog.me/share/xyz".to_string()));
        assert_eq!(link.domain_name, "Blog");
        assert_eq!(link.session.share_token.as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn default_link_ignores_disabled_default_domain() {
        let (svc, mocks) = service();
        seed_blog_domain(&mocks, false).await;
        host_shares_as(&mocks, "xyz", "").await;

        let link = svc.default_share_link(&test_note("8")).await;

        assert_eq!(link.url.value(), "https://blinko.test/share/xyz");
        assert_eq!(link.domain_name, ORIGINAL_OPTION_NAME);
    }

    #[tokio::test]
    async fn default_link_rewrites_fallback_and_keeps_tag() {
        let (svc, mocks) = service();
        seed_blog_domain(&mocks, true).await;
        mocks
            .note_api
            .set_share_response(Err(CoreError::NetworkError("down".into())))
            .await;

        let link = svc.default_share_link(&test_note("8")).await;

        assert!(link.url.is_fallback());
        assert_eq!(link.url.value(), "https://blog.me/share/8");
    }

    #[tokio::test]
    async fn quick_share_copies_and_notifies() {
        let (svc, mocks) = service();
        seed_blog_domain(&mocks, true).await;
        host_shares_as(&mocks, "xyz", "").await;

        let (link, copied) = svc.quick_share(&test_note("8")).await;

        assert!(copied);
        assert_eq!(mocks.clipboard.contents().await, vec![link.url.into_value()]);
        assert_eq!(
            mocks.notifier.notices(),
            vec![Notice::LinkCopied {
                domain_name: "Blog".into()
            }]
        );
    }

    #[tokio::test]
    async fn quick_share_reports_copy_failure() {
        let (svc, mocks) = service();
        mocks.clipboard.set_error(Some("denied".into())).await;

        let (_, copied) = svc.quick_share(&test_note("8")).await;

        assert!(!copied);
        assert_eq!(mocks.notifier.notices(), vec![Notice::CopyFailed]);
    }
}
