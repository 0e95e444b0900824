use std::env;
use std::time::Duration;

use heroes_core::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use url::Url;

use crate::error::BackendError;

pub const DEFAULT_API_BASE_URL: &str = "https://akabab.github.io/superhero-api/api/";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 15_000;

pub const ENV_API_BASE_URL: &str = "HEROES_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_MS: &str = "HEROES_HTTP_TIMEOUT_MS";
pub const ENV_APP_ORIGIN: &str = "HEROES_APP_ORIGIN";
pub const ENV_ACCESS_TOKEN: &str = "HEROES_ACCESS_TOKEN";
pub const ENV_PAGE_SIZE: &str = "HEROES_PAGE_SIZE";
pub const ENV_IDP_URL: &str = "HEROES_IDP_URL";
pub const ENV_IDP_REALM: &str = "HEROES_IDP_REALM";
pub const ENV_IDP_CLIENT_ID: &str = "HEROES_IDP_CLIENT_ID";
pub const ENV_IDP_REDIRECT_URI: &str = "HEROES_IDP_REDIRECT_URI";

const IDENTITY_KEYS: [&str; 4] = [
    ENV_IDP_URL,
    ENV_IDP_REALM,
    ENV_IDP_CLIENT_ID,
    ENV_IDP_REDIRECT_URI,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be a positive integer, got {value}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("identity provider config is incomplete; missing {0}")]
    IncompleteIdentity(String),
}

impl From<ConfigError> for BackendError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::InvalidUrl { .. } => "config_invalid_url",
            ConfigError::InvalidNumber { .. } => "config_invalid_number",
            ConfigError::IncompleteIdentity(_) => "config_incomplete_identity",
        };
        BackendError::config(err.to_string()).with_code(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub auth_url: Url,
    pub realm: String,
    pub client_id: String,
    pub redirect_uri: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub api_base_url: Url,
    pub http_timeout: Duration,
    pub app_origin: Option<Url>,
    pub access_token: Option<String>,
    pub identity: Option<IdentityConfig>,
    pub page_size: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            app_origin: None,
            access_token: None,
            identity: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_base_url = match read(ENV_API_BASE_URL) {
            Some(raw) => parse_url(ENV_API_BASE_URL, &ensure_trailing_slash(&raw))?,
            None => default_api_base_url(),
        };
        let http_timeout = match read(ENV_HTTP_TIMEOUT_MS) {
            Some(raw) => Duration::from_millis(parse_positive(ENV_HTTP_TIMEOUT_MS, &raw)?),
            None => Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        };
        let page_size = match read(ENV_PAGE_SIZE) {
            Some(raw) => usize::try_from(parse_positive(ENV_PAGE_SIZE, &raw)?).map_err(|_| {
                ConfigError::InvalidNumber {
                    key: ENV_PAGE_SIZE,
                    value: raw.clone(),
                }
            })?,
            None => DEFAULT_PAGE_SIZE,
        };
        let app_origin = read(ENV_APP_ORIGIN)
            .map(|raw| parse_url(ENV_APP_ORIGIN, &raw))
            .transpose()?;

        Ok(Self {
            api_base_url,
            http_timeout,
            app_origin,
            access_token: read(ENV_ACCESS_TOKEN),
            identity: read_identity(&read)?,
            page_size,
        })
    }
}

fn read_identity<F>(read: &F) -> Result<Option<IdentityConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let values = IDENTITY_KEYS.map(|key| read(key));
    if values.iter().all(Option::is_none) {
        return Ok(None);
    }

    let missing = IDENTITY_KEYS
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| *key)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ConfigError::IncompleteIdentity(missing.join(", ")));
    }

    let [Some(auth_url), Some(realm), Some(client_id), Some(redirect_uri)] = values else {
        return Err(ConfigError::IncompleteIdentity(IDENTITY_KEYS.join(", ")));
    };

    Ok(Some(IdentityConfig {
        auth_url: parse_url(ENV_IDP_URL, &auth_url)?,
        realm,
        client_id,
        redirect_uri: parse_url(ENV_IDP_REDIRECT_URI, &redirect_uri)?,
    }))
}

// Malformed constant would be a build defect, not a runtime condition.
#[allow(clippy::expect_used)]
fn default_api_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL is valid")
}

fn ensure_trailing_slash(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|_| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
    })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BackendConfig, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        BackendConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).expect("defaults must load");

        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn base_url_gets_trailing_slash_so_joins_keep_the_api_prefix() {
        let config = config_from(&[(ENV_API_BASE_URL, "http://localhost:8080/api")])
            .expect("valid base url");

        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(
            config
                .api_base_url
                .join("all.json")
                .expect("join")
                .as_str(),
            "http://localhost:8080/api/all.json"
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(ENV_ACCESS_TOKEN, "   "), (ENV_APP_ORIGIN, "")])
            .expect("blank values are ignored");

        assert_eq!(config.access_token, None);
        assert_eq!(config.app_origin, None);
    }

    #[test]
    fn rejects_invalid_numbers_and_urls() {
        for (key, value) in [
            (ENV_HTTP_TIMEOUT_MS, "0"),
            (ENV_HTTP_TIMEOUT_MS, "soon"),
            (ENV_PAGE_SIZE, "-4"),
        ] {
            let err = config_from(&[(key, value)]).expect_err("invalid number must fail");
            assert!(matches!(err, ConfigError::InvalidNumber { .. }), "{key}={value}");
        }

        let err = config_from(&[(ENV_APP_ORIGIN, "not a url")]).expect_err("invalid url");
        assert_eq!(
            err,
            ConfigError::InvalidUrl {
                key: ENV_APP_ORIGIN,
                value: "not a url".to_string()
            }
        );
    }

    #[test]
    fn identity_config_is_all_or_nothing() {
        let err = config_from(&[
            (ENV_IDP_URL, "https://sso.example.com"),
            (ENV_IDP_REALM, "heroes"),
        ])
        .expect_err("partial identity config must fail");

        assert_eq!(
            err.to_string(),
            "identity provider config is incomplete; missing HEROES_IDP_CLIENT_ID, HEROES_IDP_REDIRECT_URI"
        );

        let config = config_from(&[
            (ENV_IDP_URL, "https://sso.example.com"),
            (ENV_IDP_REALM, "heroes"),
            (ENV_IDP_CLIENT_ID, "heroes-web"),
            (ENV_IDP_REDIRECT_URI, "https://heroes.example.com"),
        ])
        .expect("complete identity config");
        let identity = config.identity.expect("identity must be present");
        assert_eq!(identity.realm, "heroes");
        assert_eq!(identity.redirect_uri.as_str(), "https://heroes.example.com/");
    }

    #[test]
    fn config_error_maps_to_coded_backend_error() {
        let err = BackendError::from(ConfigError::InvalidNumber {
            key: ENV_PAGE_SIZE,
            value: "x".to_string(),
        });

        assert_eq!(err.code(), "config_invalid_number");
        assert_eq!(err.message(), "HEROES_PAGE_SIZE must be a positive integer, got x");
    }
}
