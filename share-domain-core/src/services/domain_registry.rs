//! 自定义域名注册表
//!
//! 在内存副本上完成所有修改，持久化由调用方显式调用 `ConfigService::save`。

use crate::error::{CoreError, CoreResult};
use crate::types::{Domain, PluginConfig};
use crate::utils::url::{ensure_scheme, is_valid_http_url};

/// 域名注册表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRegistry {
    config: PluginConfig,
}

impl DomainRegistry {
    /// 从已迁移、已规范化的配置创建注册表
    #[must_use]
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }

    /// 全部域名（显示顺序）
    pub fn domains(&self) -> &[Domain] {
        &self.config.domains
    }

    /// 已启用的域名
    pub fn enabled_domains(&self) -> impl Iterator<Item = &Domain> {
        self.config.enabled_domains()
    }

    pub fn default_domain_id(&self) -> Option<&str> {
        self.config.default_domain_id.as_deref()
    }

    /// 默认域名（引用悬空时为 `None`）
    pub fn default_domain(&self) -> Option<&Domain> {
        self.config.default_domain()
    }

    pub fn get(&self, id: &str) -> Option<&Domain> {
        self.config.domains.iter().find(|d| d.id == id)
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    #[must_use]
    pub fn into_config(self) -> PluginConfig {
        self.config
    }

    /// 添加域名
    ///
    /// 名称去除首尾空白后不能为空，URL 补全协议后必须是合法的 http/https 地址。
    /// 新域名默认启用，追加到列表末尾。
    pub fn add_domain(&mut self, name: &str, raw_url: &str) -> CoreResult<Domain> {
        let (name, url) = validate_domain_input(name, raw_url)?;
        let domain = Domain::new(name, url);
        log::info!("Domain added: {} ({})", domain.name, domain.url);
        self.config.domains.push(domain.clone());
        Ok(domain)
    }

    /// 更新域名名称和 URL（保持 ID、启用状态与位置）
    pub fn update_domain(&mut self, id: &str, name: &str, raw_url: &str) -> CoreResult<Domain> {
        let (name, url) = validate_domain_input(name, raw_url)?;
        let domain = self
            .config
            .domains
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CoreError::DomainNotFound(id.to_string()))?;

        domain.name = name;
        domain.url = url;
        Ok(domain.clone())
    }

    /// 删除域名（不存在时静默忽略）
    ///
    /// 被删除的域名若为默认域名，默认值重置为原始链接。
    pub fn remove_domain(&mut self, id: &str) {
        self.config.domains.retain(|d| d.id != id);
        if self.config.default_domain_id.as_deref() == Some(id) {
            self.config.default_domain_id = None;
        }
    }

    /// 切换启用状态，返回新状态；不影响默认域名设置
    pub fn toggle_enabled(&mut self, id: &str) -> Option<bool> {
        let domain = self.config.domains.iter_mut().find(|d| d.id == id)?;
        domain.enabled = !domain.enabled;
        Some(domain.enabled)
    }

    /// 设置或清除默认域名（不检查启用状态）
    pub fn set_default(&mut self, id: Option<&str>) {
        self.config.default_domain_id = id.map(str::to_string);
    }
}

/// 校验表单输入，返回去除空白后的名称和规范化 URL
pub fn validate_domain_input(name: &str, raw_url: &str) -> CoreResult<(String, String)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::ValidationError(
            "Domain name cannot be empty".to_string(),
        ));
    }

    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return Err(CoreError::ValidationError(
            "Domain URL cannot be empty".to_string(),
        ));
    }

    let url = ensure_scheme(raw_url);
    if !is_valid_http_url(&url) {
        return Err(CoreError::ValidationError(format!(
            "Invalid domain URL: '{raw_url}'"
        )));
    }

    Ok((name.to_string(), url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> (DomainRegistry, Vec<String>) {
        let mut registry = DomainRegistry::default();
        let ids = names
            .iter()
            .map(|n| {
                registry
                    .add_domain(n, &format!("{}.example", n.to_lowercase()))
                    .unwrap()
                    .id
            })
            .collect();
        (registry, ids)
    }

    #[test]
    fn add_domain_normalizes_and_appends() {
        let (mut registry, _) = registry_with(&["First"]);
        let d = registry.add_domain("  Blog  ", "blog.me").unwrap();

        assert_eq!(d.name, "Blog");
        assert_eq!(d.url, "https://blog.me");
        assert!(d.enabled);
        assert_eq!(registry.domains().len(), 2);
        assert_eq!(registry.domains()[1].id, d.id);
    }

    #[test]
    fn add_domain_rejects_empty_name() {
        let mut registry = DomainRegistry::default();
        let err = registry.add_domain("   ", "blog.me").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(registry.domains().is_empty());
    }

    #[test]
    fn add_domain_rejects_invalid_url() {
        let mut registry = DomainRegistry::default();
        assert!(registry.add_domain("Blog", "").is_err());
        assert!(registry.add_domain("Blog", "ftp://blog.me").is_err());
        assert!(registry.add_domain("Blog", "bad host name").is_err());
        assert!(registry.domains().is_empty());
    }

    #[test]
    fn update_domain_keeps_identity_position_and_flag() {
        let (mut registry, ids) = registry_with(&["A", "B", "C"]);
        registry.toggle_enabled(&ids[1]);

        let updated = registry.update_domain(&ids[1], "Renamed", "http://new.host:8080").unwrap();

        assert_eq!(updated.id, ids[1]);
        assert!(!updated.enabled);
        assert_eq!(registry.domains()[1].name, "Renamed");
        assert_eq!(registry.domains()[1].url, "http://new.host:8080");
    }

    #[test]
    fn update_domain_validation_leaves_state_unchanged() {
        let (mut registry, ids) = registry_with(&["A"]);
        let before = registry.clone();
        assert!(registry.update_domain(&ids[0], "", "a.example").is_err());
        assert_eq!(registry, before);
    }

    #[test]
    fn update_unknown_domain_fails() {
        let mut registry = DomainRegistry::default();
        let err = registry.update_domain("nope", "A", "a.example").unwrap_err();
        assert!(matches!(err, CoreError::DomainNotFound(_)));
    }

    #[test]
    fn removing_default_clears_default() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        registry.set_default(Some(&ids[0]));

        registry.remove_domain(&ids[0]);

        assert!(registry.default_domain_id().is_none());
        assert_eq!(registry.domains().len(), 1);
    }

    #[test]
    fn removing_other_domain_keeps_default() {
        let (mut registry, ids) = registry_with(&["A", "B"]);
        registry.set_default(Some(&ids[0]));

        registry.remove_domain(&ids[1]);

        assert_eq!(registry.default_domain_id(), Some(ids[0].as_str()));
    }

    #[test]
    fn remove_unknown_is_noop() {
        let (mut registry, _) = registry_with(&["A"]);
        let before = registry.clone();
        registry.remove_domain("missing");
        assert_eq!(registry, before);
    }

    #[test]
    fn disabling_default_keeps_default_id() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.set_default(Some(&ids[0]));

        assert_eq!(registry.toggle_enabled(&ids[0]), Some(false));

        assert_eq!(registry.default_domain_id(), Some(ids[0].as_str()));
        assert_eq!(registry.enabled_domains().count(), 0);
    }

    #[test]
    fn set_default_accepts_disabled_and_clears() {
        let (mut registry, ids) = registry_with(&["A"]);
        registry.toggle_enabled(&ids[0]);
        registry.set_default(Some(&ids[0]));
        assert_eq!(registry.default_domain().map(|d| d.id.as_str()), Some(ids[0].as_str()));

        registry.set_default(None);
        assert!(registry.default_domain().is_none());
    }

    #[test]
    fn toggle_unknown_returns_none() {
        let mut registry = DomainRegistry::default();
        assert_eq!(registry.toggle_enabled("x"), None);
    }
}
