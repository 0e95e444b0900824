use thiserror::Error;

use crate::models::HeroId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("HTTP {status} {reason} for {path}{}", body_suffix(.body))]
    Http {
        status: u16,
        reason: String,
        path: String,
        body: String,
    },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid hero payload: {0}")]
    Decode(String),

    #[error("hero {0} not found")]
    NotFound(HeroId),

    #[error("request cancelled")]
    Cancelled,
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Http { .. } => "catalog_http_error",
            Self::Timeout(_) => "catalog_timeout",
            Self::Transport(_) => "catalog_transport_error",
            Self::Decode(_) => "catalog_decode_error",
            Self::NotFound(_) => "catalog_not_found",
            Self::Cancelled => "catalog_cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}
