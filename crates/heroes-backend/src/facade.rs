use std::sync::Arc;

use heroes_core::{CompareStore, HeroCatalogPort, HeroesStore};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{BackendLogLevel, BackendLoggerPort, IdentityProviderPort};
use crate::application::token_refresh::{spawn_token_refresh, TokenRefreshPolicy};
use crate::application::use_cases::{self, log};
use crate::error::BackendResult;
use crate::infrastructure::config::BackendConfig;
use crate::infrastructure::http_client::ReqwestHeroCatalog;
use crate::infrastructure::logging::StderrJsonBackendLogger;

pub use crate::models::dto::{
    CompareEntry, CompareHeroesInput, CompareHeroesOutput, HeroDetailInput, HeroDetailOutput,
    HeroSource, HeroSummary, ListHeroesInput, ListHeroesOutput,
};

/// Session-lifetime state: one heroes store and one compare selection.
#[derive(Debug, Default)]
pub struct AppState {
    pub heroes: HeroesStore,
    pub compare: CompareStore,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            heroes: HeroesStore::with_page_size(page_size),
            compare: CompareStore::new(),
        }
    }
}

pub struct HeroesApp {
    config: BackendConfig,
    catalog: Arc<dyn HeroCatalogPort>,
    logger: Arc<dyn BackendLoggerPort>,
    state: AppState,
}

impl HeroesApp {
    pub fn from_config(config: BackendConfig) -> BackendResult<Self> {
        let catalog = ReqwestHeroCatalog::new(&config)?;
        let logger = StderrJsonBackendLogger::new();

        log(
            &logger,
            BackendLogLevel::Debug,
            "HC-APP-001",
            "heroes_app_configured",
            serde_json::json!({
                "api_base_url": config.api_base_url.as_str(),
                "http_timeout_ms": u64::try_from(config.http_timeout.as_millis()).unwrap_or(u64::MAX),
                "page_size": config.page_size,
                "bearer_origin": config.app_origin.as_ref().map(|url| url.as_str()),
                "identity_configured": config.identity.is_some(),
            }),
        );

        Ok(Self::with_ports(config, Arc::new(catalog), Arc::new(logger)))
    }

    pub fn with_ports(
        config: BackendConfig,
        catalog: Arc<dyn HeroCatalogPort>,
        logger: Arc<dyn BackendLoggerPort>,
    ) -> Self {
        let state = AppState::new(config.page_size);
        Self {
            config,
            catalog,
            logger,
            state,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn logger(&self) -> Arc<dyn BackendLoggerPort> {
        Arc::clone(&self.logger)
    }

    /// `None` when no identity provider is configured. A failed refresh
    /// sends the user back to the configured redirect URI.
    pub fn token_refresh_policy(&self) -> Option<TokenRefreshPolicy> {
        self.config
            .identity
            .as_ref()
            .map(|identity| TokenRefreshPolicy::new(identity.redirect_uri.as_str()))
    }

    /// Starts the background refresh for an embedding UI that owns the
    /// identity session. Cancel the returned token to stop it.
    pub fn start_token_refresh(
        &self,
        provider: Arc<dyn IdentityProviderPort>,
    ) -> Option<CancellationToken> {
        let policy = self.token_refresh_policy()?;
        Some(spawn_token_refresh(provider, self.logger(), policy))
    }

    pub async fn list_heroes(
        &mut self,
        input: ListHeroesInput,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<ListHeroesOutput> {
        use_cases::list_heroes::list_heroes(
            &mut self.state.heroes,
            input,
            self.catalog.as_ref(),
            self.logger.as_ref(),
            cancel,
        )
        .await
    }

    pub async fn hero_detail(
        &self,
        input: HeroDetailInput,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<HeroDetailOutput> {
        use_cases::hero_detail::hero_detail(
            &self.state.heroes,
            input,
            self.catalog.as_ref(),
            self.logger.as_ref(),
            cancel,
        )
        .await
    }

    pub async fn compare_heroes(
        &mut self,
        input: CompareHeroesInput,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<CompareHeroesOutput> {
        use_cases::compare_heroes::compare_heroes(
            &mut self.state.heroes,
            &mut self.state.compare,
            input,
            self.catalog.as_ref(),
            self.logger.as_ref(),
            cancel,
        )
        .await
    }
}
