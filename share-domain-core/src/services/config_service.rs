//! 插件配置读写服务

use std::sync::Arc;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::services::{DomainRegistry, MigrationResult, MigrationService, ServiceContext};
use crate::types::{
    Domain, Notice, PluginConfig, DEFAULT_DOMAIN_ID_KEY, DOMAINS_KEY, LEGACY_CUSTOM_DOMAIN_KEY,
    PLUGIN_NAME,
};
use crate::utils::url::ensure_scheme;

/// 插件配置服务
pub struct ConfigService {
    ctx: Arc<ServiceContext>,
}

impl ConfigService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 读取并迁移配置
    pub async fn try_load(&self) -> CoreResult<(PluginConfig, MigrationResult)> {
        let raw = self.ctx.config_store().load(PLUGIN_NAME).await?;
        Ok(MigrationService::migrate(&raw))
    }

    /// 读取配置，失败时返回空配置
    pub async fn load(&self) -> PluginConfig {
        match self.try_load().await {
            Ok((config, _)) => config,
            Err(e) => {
                log::error!("Failed to load plugin config: {e}");
                PluginConfig::default()
            }
        }
    }

    /// 保存配置（整体覆盖 `domains` 与 `defaultDomainId`，并清空旧版 `customDomain`）
    ///
    /// 旧键最后清空：只要它还在，读取时就会以它为准覆盖已保存的 `domains`。
    pub async fn save(&self, config: &PluginConfig) -> CoreResult<()> {
        let domains: Vec<Domain> = config
            .domains
            .iter()
            .map(|d| Domain {
                url: ensure_scheme(&d.url),
                ..d.clone()
            })
            .collect();

        let store = self.ctx.config_store();
        store
            .set(PLUGIN_NAME, DOMAINS_KEY, &serde_json::to_value(&domains)?)
            .await?;
        store
            .set(
                PLUGIN_NAME,
                DEFAULT_DOMAIN_ID_KEY,
                &serde_json::to_value(&config.default_domain_id)?,
            )
            .await?;
        store
            .set(PLUGIN_NAME, LEGACY_CUSTOM_DOMAIN_KEY, &Value::Null)
            .await?;

        log::info!(
            "Plugin config saved: {} domains, default {:?}",
            domains.len(),
            config.default_domain_id
        );
        Ok(())
    }

    /// 检查并写回迁移结果（启动时调用）
    ///
    /// 写回时 `save` 会清空 `customDomain`，之后的读取不再重新迁移，ID 保持不变。
    pub async fn migrate_if_needed(&self) -> CoreResult<MigrationResult> {
        let (config, result) = self.try_load().await?;
        if !result.needs_write_back() {
            log::info!("插件配置已是新格式，无需迁移");
            return Ok(result);
        }

        self.save(&config).await?;
        log::info!("插件配置迁移已写回: {result:?}");
        Ok(result)
    }

    // ===== 设置面板 =====

    /// 打开设置面板：读取配置，失败时提示并返回空注册表
    pub async fn open_settings(&self) -> DomainRegistry {
        match self.try_load().await {
            Ok((config, _)) => DomainRegistry::new(config),
            Err(e) => {
                log::error!("Failed to load config for settings: {e}");
                self.ctx.notify(&Notice::LoadConfigFailed);
                DomainRegistry::default()
            }
        }
    }

    /// 提交添加 / 编辑表单
    ///
    /// `editing_id` 为 `None` 时添加新域名。校验失败时提示并返回 `None`，注册表不变。
    pub fn submit_domain_form(
        &self,
        registry: &mut DomainRegistry,
        editing_id: Option<&str>,
        name: &str,
        raw_url: &str,
    ) -> Option<Domain> {
        let result = match editing_id {
            Some(id) => registry.update_domain(id, name, raw_url),
            None => registry.add_domain(name, raw_url),
        };

        match result {
            Ok(domain) => Some(domain),
            Err(CoreError::ValidationError(msg)) => {
                log::warn!("Domain form rejected: {msg}");
                let notice = if name.trim().is_empty() || raw_url.trim().is_empty() {
                    Notice::FillCompleteInfo
                } else {
                    Notice::InvalidUrl
                };
                self.ctx.notify(&notice);
                None
            }
            Err(e) => {
                log::warn!("Domain form rejected: {e}");
                None
            }
        }
    }

    /// 保存设置面板的修改，返回是否成功
    pub async fn commit_settings(&self, registry: &DomainRegistry) -> bool {
        match self.save(registry.config()).await {
            Ok(()) => {
                self.ctx.notify(&Notice::SettingsSaved);
                true
            }
            Err(e) => {
                log::error!("Failed to save plugin config: {e}");
                self.ctx.notify(&Notice::SaveConfigFailed);
                false
            }
        }
    }
}
