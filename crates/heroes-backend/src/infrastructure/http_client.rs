use std::sync::Arc;

use async_trait::async_trait;
use heroes_core::{CatalogError, HeroCatalogPort, HeroId, HeroRecord};
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::application::ports::AccessTokenSource;
use crate::domain::session::should_attach_bearer;
use crate::error::BackendResult;
use crate::infrastructure::config::BackendConfig;

pub(crate) const ALL_HEROES_PATH: &str = "all.json";
const CATALOG_USER_AGENT: &str = "heroes-catalog/0.1";

#[derive(Debug, Clone)]
pub struct StaticAccessToken {
    token: String,
}

impl StaticAccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AccessTokenSource for StaticAccessToken {
    fn access_token(&self) -> Option<String> {
        let trimmed = self.token.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[derive(Clone)]
pub struct ReqwestHeroCatalog {
    client: Client,
    base_url: Url,
    app_origin: Option<Url>,
    token_source: Option<Arc<dyn AccessTokenSource>>,
}

impl ReqwestHeroCatalog {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        let token_source = config
            .access_token
            .clone()
            .map(|token| Arc::new(StaticAccessToken::new(token)) as Arc<dyn AccessTokenSource>);

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            app_origin: config.app_origin.clone(),
            token_source,
        })
    }

    pub fn with_token_source(mut self, source: Arc<dyn AccessTokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|err| CatalogError::Transport(format!("invalid catalog URL for {path}: {err}")))
    }

    pub(crate) fn bearer_for(&self, url: &Url) -> Option<String> {
        let origin = self.app_origin.as_ref()?;
        if !should_attach_bearer(url, origin) {
            return None;
        }
        self.token_source.as_ref()?.access_token()
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, CATALOG_USER_AGENT);
        if let Some(token) = self.bearer_for(&url) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(catalog_error_from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_status_error(status, path, body.trim()));
        }

        response.json::<T>().await.map_err(catalog_error_from_reqwest)
    }
}

#[async_trait]
impl HeroCatalogPort for ReqwestHeroCatalog {
    async fn fetch_all(&self) -> Result<Vec<HeroRecord>, CatalogError> {
        self.get_json(ALL_HEROES_PATH).await
    }

    async fn fetch_by_id(&self, id: HeroId) -> Result<HeroRecord, CatalogError> {
        match self.get_json(&hero_path(id)).await {
            Err(CatalogError::Http { status: 404, .. }) => Err(CatalogError::NotFound(id)),
            other => other,
        }
    }
}

pub(crate) fn hero_path(id: HeroId) -> String {
    format!("id/{id}.json")
}

pub(crate) fn http_status_error(status: StatusCode, path: &str, body: &str) -> CatalogError {
    CatalogError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        path: format!("/{path}"),
        body: body.to_string(),
    }
}

fn catalog_error_from_reqwest(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Timeout(err.to_string())
    } else if err.is_decode() {
        CatalogError::Decode(err.to_string())
    } else {
        CatalogError::Transport(err.to_string())
    }
}

// `Client` has no useful Debug output; keep the token out of logs as well.
impl std::fmt::Debug for ReqwestHeroCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHeroCatalog")
            .field("base_url", &self.base_url.as_str())
            .field("app_origin", &self.app_origin.as_ref().map(Url::as_str))
            .field("has_token_source", &self.token_source.is_some())
            .finish()
    }
}
