//! Application bootstrap for the Blinko custom share domain plugin.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection),
//! and `StartupHooks` (frontend callbacks around the config migration).

pub mod adapters;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use share_domain_core::error::{CoreError, CoreResult};
use share_domain_core::services::{
    ConfigService, MigrationResult, ServiceContext, SessionOptions, ShareService,
    ShareSessionService,
};
use share_domain_core::traits::{Clipboard, ConfigStore, LogNotifier, NoteApi, Notifier};

use crate::adapters::HeadlessClipboard;

/// Frontend hooks for the startup sequence.
///
/// Use `NoopStartupHooks` if the frontend does not care about migrations.
#[async_trait::async_trait]
pub trait StartupHooks: Send + Sync {
    /// Called after a stored config was migrated and written back.
    async fn on_config_migrated(&self, _result: &MigrationResult) {}

    /// Called when the config could not be read or written back. The stored
    /// config is left as it was and loads keep migrating it in memory.
    async fn on_migration_failed(&self, _error: &str) {}
}

/// No-op startup hooks.
pub struct NoopStartupHooks;

#[async_trait::async_trait]
impl StartupHooks for NoopStartupHooks {}

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all host adapters)
    pub ctx: Arc<ServiceContext>,
    /// Plugin config and settings panel
    pub config_service: Arc<ConfigService>,
    /// Remote share session
    pub share_session_service: Arc<ShareSessionService>,
    /// Share selector and quick share
    pub share_service: ShareService,
    /// Whether the startup sequence has completed
    pub startup_completed: AtomicBool,
}

impl AppState {
    /// Run the full startup sequence (config migration write-back).
    pub async fn run_startup(&self, hooks: &dyn StartupHooks) -> CoreResult<()> {
        self.run_migration(hooks).await;
        self.startup_completed.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Migrate a legacy or damaged plugin config and persist the result.
    ///
    /// Failures are logged and reported to the hooks; they never abort startup.
    pub async fn run_migration(&self, hooks: &dyn StartupHooks) {
        match self.config_service.migrate_if_needed().await {
            Ok(MigrationResult::NotNeeded) => {
                log::info!("插件配置检查：无需迁移");
            }
            Ok(result) => {
                log::info!("插件配置迁移完成: {result:?}");
                hooks.on_config_migrated(&result).await;
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("插件配置迁移失败: {e}");
                } else {
                    log::error!("插件配置迁移失败: {e}");
                }
                hooks.on_migration_failed(&e.to_string()).await;
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.startup_completed.load(Ordering::SeqCst)
    }
}

/// Builder for constructing `AppState` with host adapters.
///
/// # Required
/// - `config_store`: plugin config storage
/// - `note_api`: host note/share API
/// - `session_options`: share URL origin and request timeout
///
/// # Optional
/// - `notifier`: defaults to `LogNotifier`
/// - `clipboard`: defaults to `HeadlessClipboard`
pub struct AppStateBuilder {
    config_store: Option<Arc<dyn ConfigStore>>,
    note_api: Option<Arc<dyn NoteApi>>,
    notifier: Option<Arc<dyn Notifier>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    session_options: Option<SessionOptions>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_store: None,
            note_api: None,
            notifier: None,
            clipboard: None,
            session_options: None,
        }
    }

    #[must_use]
    pub fn config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    #[must_use]
    pub fn note_api(mut self, api: Arc<dyn NoteApi>) -> Self {
        self.note_api = Some(api);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    #[must_use]
    pub fn session_options(mut self, options: SessionOptions) -> Self {
        self.session_options = Some(options);
        self
    }

    /// Use a Blinko client as config store and note API.
    ///
    /// Also sets the share origin to the client's base URL unless session
    /// options were already given.
    #[cfg(feature = "blinko-client")]
    #[must_use]
    pub fn blinko_client(mut self, client: Arc<share_domain_host::BlinkoClient>) -> Self {
        if self.session_options.is_none() {
            self.session_options = Some(SessionOptions::new(client.origin()));
        }
        self.config_store = Some(client.clone());
        self.note_api = Some(client);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing and
    /// `CoreError::ConfigurationError` if no share origin is configured.
    pub fn build(self) -> CoreResult<AppState> {
        let config_store = self
            .config_store
            .ok_or_else(|| CoreError::ValidationError("config_store is required".to_string()))?;
        let note_api = self
            .note_api
            .ok_or_else(|| CoreError::ValidationError("note_api is required".to_string()))?;
        let session_options = self
            .session_options
            .filter(|o| !o.origin.is_empty())
            .ok_or_else(|| {
                CoreError::ConfigurationError("session_options with an origin is required".to_string())
            })?;
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));
        let clipboard = self
            .clipboard
            .unwrap_or_else(|| Arc::new(HeadlessClipboard));

        let ctx = Arc::new(ServiceContext::new(
            config_store,
            note_api,
            notifier,
            clipboard,
        ));

        let config_service = Arc::new(ConfigService::new(Arc::clone(&ctx)));
        let share_session_service = Arc::new(ShareSessionService::new(
            Arc::clone(&ctx),
            session_options,
        ));
        let share_service = ShareService::new(
            Arc::clone(&ctx),
            Arc::clone(&config_service),
            Arc::clone(&share_session_service),
        );

        Ok(AppState {
            ctx,
            config_service,
            share_session_service,
            share_service,
            startup_completed: AtomicBool::new(false),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
