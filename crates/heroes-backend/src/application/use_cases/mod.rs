pub(crate) mod compare_heroes;
pub(crate) mod hero_detail;
pub(crate) mod list_heroes;

use crate::application::ports::{BackendLogEvent, BackendLogLevel, BackendLoggerPort};

// Logging never fails a use case.
pub(crate) fn log(
    logger: &dyn BackendLoggerPort,
    level: BackendLogLevel,
    event_code: &str,
    message: &str,
    context: serde_json::Value,
) {
    let _ = logger.log(&BackendLogEvent::new(level, event_code, message, context));
}
