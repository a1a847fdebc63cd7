//! 插件配置类型定义

use serde::{Deserialize, Serialize};

use super::Domain;

/// 插件命名空间（宿主配置存储的键前缀）
pub const PLUGIN_NAME: &str = "custom-share-domain-plugin";

/// 持久化键：域名列表
pub const DOMAINS_KEY: &str = "domains";

/// 持久化键：默认域名 ID
pub const DEFAULT_DOMAIN_ID_KEY: &str = "defaultDomainId";

/// 旧版本单域名配置键
pub const LEGACY_CUSTOM_DOMAIN_KEY: &str = "customDomain";

/// 插件配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// 自定义域名列表（插入顺序即显示顺序）
    #[serde(default)]
    pub domains: Vec<Domain>,
    /// 默认域名 ID，`None` 表示使用原始分享链接
    #[serde(default)]
    pub default_domain_id: Option<String>,
}

impl PluginConfig {
    /// 查找默认域名（引用悬空时返回 `None`）
    #[must_use]
    pub fn default_domain(&self) -> Option<&Domain> {
        let id = self.default_domain_id.as_deref()?;
        self.domains.iter().find(|d| d.id == id)
    }

    /// 已启用的域名，保持原有顺序
    pub fn enabled_domains(&self) -> impl Iterator<Item = &Domain> {
        self.domains.iter().filter(|d| d.enabled)
    }
}
