use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{BackendLogEvent, BackendLogLevel, BackendLoggerPort};
use crate::error::BackendResult;

pub const DEFAULT_BACKEND_COMPONENT: &str = "heroes-backend";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendLogPayload {
    pub ts: String,
    pub level: String,
    pub component: String,
    pub event_code: String,
    pub message: String,
    pub trace_id: String,
    pub pid: u32,
    pub context: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct StderrJsonBackendLogger {
    component: String,
    trace_id: String,
}

impl Default for StderrJsonBackendLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StderrJsonBackendLogger {
    pub fn new() -> Self {
        Self::with_component(DEFAULT_BACKEND_COMPONENT)
    }

    pub fn with_component(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            trace_id: new_trace_id(),
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn emit_event(&self, event: &BackendLogEvent) -> BackendResult<()> {
        let payload = self.build_payload(event);
        let mut stderr = std::io::stderr().lock();
        write_payload(&mut stderr, &payload)
    }

    pub fn build_payload(&self, event: &BackendLogEvent) -> BackendLogPayload {
        BackendLogPayload {
            ts: now_utc_rfc3339_millis(),
            level: format_backend_log_level(event.level).to_string(),
            component: self.component.clone(),
            event_code: event.event_code.clone(),
            message: event.message.clone(),
            trace_id: self.trace_id.clone(),
            pid: std::process::id(),
            context: event.context.clone(),
        }
    }
}

impl BackendLoggerPort for StderrJsonBackendLogger {
    fn log(&self, event: &BackendLogEvent) -> BackendResult<()> {
        if let Err(err) = self.emit_event(event) {
            let fallback = serde_json::json!({
                "ts": now_utc_rfc3339_millis(),
                "level": "ERROR",
                "component": self.component,
                "event_code": "HC-LOG-001",
                "message": "failed to emit backend log",
                "trace_id": self.trace_id,
                "pid": std::process::id(),
                "context": {
                    "error": err.to_string(),
                    "original_event_code": event.event_code,
                    "original_message": event.message,
                }
            });
            eprintln!("{fallback}");
            return Err(err);
        }
        Ok(())
    }
}

pub fn write_payload<W: Write>(writer: &mut W, payload: &BackendLogPayload) -> BackendResult<()> {
    serde_json::to_writer(&mut *writer, payload)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn format_backend_log_level(level: BackendLogLevel) -> &'static str {
    match level {
        BackendLogLevel::Trace => "TRACE",
        BackendLogLevel::Debug => "DEBUG",
        BackendLogLevel::Info => "INFO",
        BackendLogLevel::Warn => "WARN",
        BackendLogLevel::Error => "ERROR",
    }
}

pub fn now_utc_rfc3339_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}
