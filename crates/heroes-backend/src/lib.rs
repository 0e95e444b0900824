#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod application;
mod domain;
mod error;
mod facade;
mod infrastructure;
mod models;

pub use crate::application::ports::{
    AccessTokenSource, BackendLogEvent, BackendLogLevel, BackendLoggerPort, IdentityProviderPort,
};
pub use crate::application::token_refresh::{
    refresh_once, run_token_refresh_loop, spawn_token_refresh, RefreshOutcome,
    TokenRefreshPolicy, DEFAULT_MIN_TOKEN_VALIDITY, DEFAULT_REFRESH_INTERVAL,
};
pub use crate::application::use_cases::compare_heroes::{compare_heroes, CompareHeroesUseCase};
pub use crate::application::use_cases::hero_detail::{hero_detail, HeroDetailUseCase};
pub use crate::application::use_cases::list_heroes::{list_heroes, ListHeroesUseCase};
pub use crate::domain::session::{
    bootstrap_session, guard_route, is_returning_from_identity_provider,
    resolve_post_login_redirect, should_attach_bearer, strip_callback_params, RouteDecision,
    SessionBootstrap, CALLBACK_PARAMS,
};
pub use crate::error::{BackendError, BackendResult};
pub use crate::facade::{
    AppState, CompareEntry, CompareHeroesInput, CompareHeroesOutput, HeroDetailInput,
    HeroDetailOutput, HeroSource, HeroSummary, HeroesApp, ListHeroesInput, ListHeroesOutput,
};
pub use crate::infrastructure::config::{
    BackendConfig, ConfigError, IdentityConfig, DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_MS,
};
pub use crate::infrastructure::http_client::{ReqwestHeroCatalog, StaticAccessToken};
pub use crate::infrastructure::logging::{
    BackendLogPayload, StderrJsonBackendLogger, DEFAULT_BACKEND_COMPONENT,
};
