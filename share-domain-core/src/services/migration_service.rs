//! 配置格式迁移服务
//!
//! 负责将旧版单域名配置（`customDomain: String`）迁移到多域名格式，
//! 并在读取时规范化所有域名 URL。迁移是幂等的：对自身输出再次迁移结果不变。

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::{
    Domain, PluginConfig, DEFAULT_DOMAIN_ID_KEY, DOMAINS_KEY, LEGACY_CUSTOM_DOMAIN_KEY,
};
use crate::utils::url::{ensure_scheme, is_valid_http_url};

/// 旧配置迁移生成的域名名称
pub const MIGRATED_DOMAIN_NAME: &str = "Migrated domain";

/// 迁移服务（无状态）
pub struct MigrationService;

impl MigrationService {
    /// 迁移原始配置
    ///
    /// 任何无法读取的部分都会被丢弃并记录，迁移本身永不失败。
    pub fn migrate(raw: &Value) -> (PluginConfig, MigrationResult) {
        let obj = match raw {
            Value::Object(obj) => obj,
            Value::Null => return (PluginConfig::default(), MigrationResult::NotNeeded),
            other => {
                let err = CoreError::MigrationError(format!(
                    "plugin config is not an object: {other}"
                ));
                log::warn!("{err}");
                return (
                    PluginConfig::default(),
                    MigrationResult::Recovered {
                        discarded: vec![err.to_string()],
                    },
                );
            }
        };

        let mut discarded = Vec::new();

        match obj.get(LEGACY_CUSTOM_DOMAIN_KEY) {
            None | Some(Value::Null) => {}
            Some(legacy) => match migrate_legacy_domain(legacy) {
                Ok(domain) => {
                    log::info!("检测到旧版单域名配置，已迁移为域名 {}", domain.url);
                    let domain_id = domain.id.clone();
                    let config = PluginConfig {
                        domains: vec![domain],
                        default_domain_id: Some(domain_id.clone()),
                    };
                    return (config, MigrationResult::LegacyMigrated { domain_id });
                }
                Err(e) => {
                    log::warn!("旧版域名配置无法解析，已丢弃: {e}");
                    discarded.push(e.to_string());
                }
            },
        }

        let domains = read_domains(obj, &mut discarded);
        let default_domain_id = read_default_domain_id(obj, &mut discarded);

        let config = PluginConfig {
            domains,
            default_domain_id,
        };

        if discarded.is_empty() {
            (config, MigrationResult::NotNeeded)
        } else {
            (config, MigrationResult::Recovered { discarded })
        }
    }
}

/// 迁移原始配置，只返回结果配置
pub fn migrate_config(raw: &Value) -> PluginConfig {
    MigrationService::migrate(raw).0
}

fn migrate_legacy_domain(legacy: &Value) -> Result<Domain, CoreError> {
    let raw_url = legacy
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CoreError::MigrationError(format!("{LEGACY_CUSTOM_DOMAIN_KEY} is not a domain: {legacy}"))
        })?;

    let url = ensure_scheme(raw_url);
    if !is_valid_http_url(&url) {
        return Err(CoreError::MigrationError(format!(
            "{LEGACY_CUSTOM_DOMAIN_KEY} is not a valid URL: {raw_url}"
        )));
    }

    Ok(Domain::new(MIGRATED_DOMAIN_NAME.to_string(), url))
}

fn read_domains(obj: &Map<String, Value>, discarded: &mut Vec<String>) -> Vec<Domain> {
    let entries = match obj.get(DOMAINS_KEY) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            log::warn!("{DOMAINS_KEY} is not an array, ignoring: {other}");
            discarded.push(format!("{DOMAINS_KEY} is not an array"));
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut domains = Vec::with_capacity(entries.len());

    for entry in entries {
        match serde_json::from_value::<Domain>(entry.clone()) {
            Ok(mut domain) => {
                if !seen.insert(domain.id.clone()) {
                    log::warn!("Duplicate domain id {}, keeping the first entry", domain.id);
                    discarded.push(format!("duplicate domain id {}", domain.id));
                    continue;
                }
                domain.url = ensure_scheme(&domain.url);
                domains.push(domain);
            }
            Err(e) => {
                log::warn!("Unreadable domain entry dropped: {e}");
                discarded.push(format!("unreadable domain entry: {e}"));
            }
        }
    }

    domains
}

fn read_default_domain_id(obj: &Map<String, Value>, discarded: &mut Vec<String>) -> Option<String> {
    match obj.get(DEFAULT_DOMAIN_ID_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) if id.is_empty() => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(other) => {
            log::warn!("{DEFAULT_DOMAIN_ID_KEY} is not a string, ignoring: {other}");
            discarded.push(format!("{DEFAULT_DOMAIN_ID_KEY} is not a string"));
            None
        }
    }
}

/// 迁移结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationResult {
    /// 已是新格式（或从未保存过配置）
    NotNeeded,

    /// 旧版单域名配置已迁移
    LegacyMigrated {
        /// 生成的域名 ID（已设为默认）
        domain_id: String,
    },

    /// 部分内容无法读取，已丢弃后继续
    Recovered {
        /// 被丢弃内容的说明
        discarded: Vec<String>,
    },
}

impl MigrationResult {
    /// 迁移结果与存储内容不一致，需要写回
    #[must_use]
    pub fn needs_write_back(&self) -> bool {
        !matches!(self, Self::NotNeeded)
    }
}
