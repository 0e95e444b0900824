use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendLogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendLogEvent {
    pub level: BackendLogLevel,
    pub event_code: String,
    pub message: String,
    pub context: serde_json::Value,
}

impl BackendLogEvent {
    pub fn new(
        level: BackendLogLevel,
        event_code: impl Into<String>,
        message: impl Into<String>,
        context: serde_json::Value,
    ) -> Self {
        Self {
            level,
            event_code: event_code.into(),
            message: message.into(),
            context,
        }
    }
}

pub trait BackendLoggerPort: Send + Sync {
    fn log(&self, event: &BackendLogEvent) -> BackendResult<()>;
}

/// Supplies the bearer token attached to same-origin catalog requests.
pub trait AccessTokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Refreshes the session when the access token expires within
    /// `min_validity`. Returns whether a refresh actually happened.
    async fn update_token(&self, min_validity: Duration) -> BackendResult<bool>;

    async fn login(&self, redirect_uri: &str) -> BackendResult<()>;
}
