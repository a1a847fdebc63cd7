//! 分享相关类型定义

use serde::{Deserialize, Serialize};

/// 原始分享链接选项的 ID
pub const ORIGINAL_OPTION_ID: &str = "original";

/// 原始分享链接选项的显示名
pub const ORIGINAL_OPTION_NAME: &str = "original link";

/// 分享链接选项（派生数据，不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOption {
    /// `"original"` 或对应域名的 ID
    pub id: String,
    pub name: String,
    pub url: String,
    pub is_default: bool,
}

impl ShareOption {
    /// 是否为原始链接选项
    #[must_use]
    pub fn is_original(&self) -> bool {
        self.id == ORIGINAL_OPTION_ID
    }
}

/// 笔记的分享状态（宿主拥有，本地镜像）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSession {
    pub is_shared: bool,
    /// 宿主返回的分享令牌
    pub share_token: Option<String>,
    /// 空字符串表示无密码
    pub share_password: String,
}

impl ShareSession {
    /// 取消分享后的状态
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// 分享成功后的状态
    #[must_use]
    pub fn shared(token: String, password: String) -> Self {
        Self {
            is_shared: true,
            share_token: Some(token),
            share_password: password,
        }
    }

    /// 已分享且持有令牌时返回令牌
    #[must_use]
    pub fn active_token(&self) -> Option<&str> {
        if self.is_shared {
            self.share_token.as_deref()
        } else {
            None
        }
    }

    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.share_password.is_empty()
    }
}

/// 创建分享的参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// 空字符串表示不设密码
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub expire_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ShareRequest {
    #[must_use]
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            expire_at: None,
        }
    }
}

/// 宿主生成的规范分享链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub url: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// 创建分享的结果：链接加上需要合并回笔记的分享状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedShare {
    pub link: ShareLink,
    pub session: ShareSession,
}
