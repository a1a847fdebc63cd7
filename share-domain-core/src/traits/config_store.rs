//! 插件配置存储抽象 Trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CoreResult;

/// 宿主键值配置存储 Trait
///
/// 平台实现:
/// - Blinko HTTP API: `BlinkoClient` (`share-domain-host`, tRPC `config.*`)
/// - 测试: `MockConfigStore`
///
/// 宿主不做任何 schema 校验，读出的是插件命名空间下的原始 JSON 对象。
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// 读取命名空间下的全部配置
    ///
    /// # Arguments
    /// * `namespace` - 插件命名空间
    ///
    /// # Returns
    /// * 原始 JSON（通常是对象；从未保存过时可能是 `null`）
    async fn load(&self, namespace: &str) -> CoreResult<Value>;

    /// 写入单个配置键（整体覆盖，后写者胜）
    ///
    /// # Arguments
    /// * `namespace` - 插件命名空间
    /// * `key` - 配置键
    /// * `value` - 配置值
    async fn set(&self, namespace: &str, key: &str, value: &Value) -> CoreResult<()>;
}
