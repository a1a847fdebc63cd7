//! Blinko API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use share_domain_core::error::CoreResult;
use share_domain_core::traits::{ConfigStore, NoteApi};
use share_domain_core::types::{
    NoteListFilter, NoteSnapshot, ShareNoteRequest, ShareNoteResponse,
};

use crate::error::{HostError, Result};
use crate::http_client::HttpUtils;
use crate::trpc::{decode_response, TrpcInput};

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// 只读请求的默认重试次数
const DEFAULT_MAX_RETRIES: u32 = 2;

/// tRPC 路由前缀
const TRPC_PATH: &str = "api/trpc";

const GET_PLUGIN_CONFIG: &str = "config.getPluginConfig";
const SET_PLUGIN_CONFIG: &str = "config.setPluginConfig";
const LIST_NOTES: &str = "notes.list";
const SHARE_NOTE: &str = "notes.shareNote";

/// Connection settings for a Blinko instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostClientConfig {
    /// Instance origin, e.g. `https://blinko.example`
    pub base_url: String,
    /// Access token sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Retries for read-only procedures; share and config writes are sent once
    pub max_retries: u32,
}

impl HostClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Blinko tRPC client
///
/// Implements [`ConfigStore`] over `config.*` and [`NoteApi`] over `notes.*`.
pub struct BlinkoClient {
    client: Client,
    config: HostClientConfig,
    /// `<origin>/api/trpc`
    endpoint: String,
}

impl BlinkoClient {
    pub fn new(config: HostClientConfig) -> Result<Self> {
        let endpoint = trpc_endpoint(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| HostError::NetworkError {
                procedure: "client".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &HostClientConfig {
        &self.config
    }

    /// Host origin without trailing slash, used as the share URL origin
    pub fn origin(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Call a tRPC query (GET)
    pub(crate) async fn query<I, T>(&self, procedure: &str, input: &I) -> Result<T>
    where
        I: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = format!(
            "{}/{procedure}?{}",
            self.endpoint,
            TrpcInput::new(input).to_query(procedure)?
        );
        let request = self.authorize(self.client.get(&url));
        let (status, body) = HttpUtils::execute_request_with_retry(
            request,
            procedure,
            "GET",
            self.config.max_retries,
        )
        .await?;
        decode_response(status, &body, procedure)
    }

    /// Call a tRPC mutation (POST)
    ///
    /// `retry` must only be set for procedures without side effects.
    pub(crate) async fn mutate<I, T>(&self, procedure: &str, input: &I, retry: bool) -> Result<T>
    where
        I: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = format!("{}/{procedure}", self.endpoint);
        let request = self.authorize(self.client.post(&url).json(&TrpcInput::new(input)));
        let max_retries = if retry { self.config.max_retries } else { 0 };
        let (status, body) =
            HttpUtils::execute_request_with_retry(request, procedure, "POST", max_retries).await?;
        decode_response(status, &body, procedure)
    }
}

fn trpc_endpoint(base_url: &str) -> Result<String> {
    let parsed = url::Url::parse(base_url).map_err(|e| HostError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        detail: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(HostError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            detail: "expected an http(s) origin".to_string(),
        });
    }
    Ok(format!("{}/{TRPC_PATH}", base_url.trim_end_matches('/')))
}

#[async_trait]
impl ConfigStore for BlinkoClient {
    async fn load(&self, namespace: &str) -> CoreResult<Value> {
        let config: Option<Value> = self
            .query(GET_PLUGIN_CONFIG, &json!({ "pluginName": namespace }))
            .await?;
        Ok(config.unwrap_or(Value::Null))
    }

    async fn set(&self, namespace: &str, key: &str, value: &Value) -> CoreResult<()> {
        let input = json!({
            "pluginName": namespace,
            "key": key,
            "value": value,
        });
        let _: Value = self.mutate(SET_PLUGIN_CONFIG, &input, false).await?;
        log::debug!("[{SET_PLUGIN_CONFIG}] {namespace}.{key} written");
        Ok(())
    }
}

#[async_trait]
impl NoteApi for BlinkoClient {
    async fn list_notes(&self, filter: &NoteListFilter) -> CoreResult<Vec<NoteSnapshot>> {
        // notes.list is a mutation on the host but has no side effects
        let notes: Option<Vec<NoteSnapshot>> = self.mutate(LIST_NOTES, filter, true).await?;
        Ok(notes.unwrap_or_default())
    }

    async fn share_note(&self, request: &ShareNoteRequest) -> CoreResult<Option<ShareNoteResponse>> {
        Ok(self.mutate(SHARE_NOTE, request, false).await?)
    }
}
