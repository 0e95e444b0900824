use std::error::Error as StdError;
use std::fmt;

use heroes_core::CatalogError;

pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Clone, PartialEq)]
pub struct BackendError {
    code: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new("invalid_input", message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new("config_error", message)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_context(mut self, context: impl AsRef<str>) -> Self {
        let context = context.as_ref().trim();
        if !context.is_empty() {
            self.message = format!("{context}: {}", self.message);
        }
        self
    }

    pub fn with_details_json(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for BackendError {}

impl From<String> for BackendError {
    fn from(value: String) -> Self {
        Self::internal(value)
    }
}

impl From<&str> for BackendError {
    fn from(value: &str) -> Self {
        Self::internal(value.to_owned())
    }
}

impl From<CatalogError> for BackendError {
    fn from(err: CatalogError) -> Self {
        let code = err.code();
        let mut error = BackendError::new(code, err.to_string());
        if let CatalogError::Http { status, path, .. } = &err {
            error = error.with_details_json(serde_json::json!({
                "status": status,
                "path": path,
            }));
        }
        error
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::new("io_error", err.to_string()).with_details_json(serde_json::json!({
            "kind": format!("{:?}", err.kind()),
        }))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::new("json_error", err.to_string())
    }
}

impl From<url::ParseError> for BackendError {
    fn from(err: url::ParseError) -> Self {
        BackendError::new("url_error", err.to_string())
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|value| value.as_u16());
        let code = if err.is_timeout() {
            "http_timeout"
        } else {
            "http_error"
        };
        let mut error = BackendError::new(code, err.to_string());

        if status.is_some() || err.is_connect() || err.is_decode() || err.is_body() {
            error = error.with_details_json(serde_json::json!({
                "status": status,
                "is_connect": err.is_connect(),
                "is_decode": err.is_decode(),
                "is_body": err.is_body(),
                "is_timeout": err.is_timeout(),
            }));
        }

        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_http_error_keeps_code_message_and_status_details() {
        let err = BackendError::from(CatalogError::Http {
            status: 503,
            reason: "Service Unavailable".to_string(),
            path: "/all.json".to_string(),
            body: String::new(),
        });

        assert_eq!(err.code(), "catalog_http_error");
        assert_eq!(err.message(), "HTTP 503 Service Unavailable for /all.json");
        assert_eq!(
            err.details(),
            Some(&serde_json::json!({"status": 503, "path": "/all.json"}))
        );
    }

    #[test]
    fn with_context_prefixes_message_and_ignores_blank_context() {
        let err = BackendError::invalid_input("hero id must be positive")
            .with_context("show hero")
            .with_context("   ");

        assert_eq!(err.message(), "show hero: hero id must be positive");
        assert_eq!(err.code(), "invalid_input");
    }
}
