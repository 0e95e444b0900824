use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{BackendLogLevel, BackendLoggerPort, IdentityProviderPort};
use crate::application::use_cases::log;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_MIN_TOKEN_VALIDITY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRefreshPolicy {
    pub interval: Duration,
    pub min_validity: Duration,
    /// Base redirect target used when a refresh fails. Never the current
    /// page, so a broken session cannot bounce between login and callback.
    pub login_redirect_uri: String,
}

impl TokenRefreshPolicy {
    pub fn new(login_redirect_uri: impl Into<String>) -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            min_validity: DEFAULT_MIN_TOKEN_VALIDITY,
            login_redirect_uri: login_redirect_uri.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    SkippedAnonymous,
    StillValid,
    Refreshed,
    LoginRequested,
    LoginFailed,
}

pub fn spawn_token_refresh(
    provider: Arc<dyn IdentityProviderPort>,
    logger: Arc<dyn BackendLoggerPort>,
    policy: TokenRefreshPolicy,
) -> CancellationToken {
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        run_token_refresh_loop(provider.as_ref(), logger.as_ref(), &policy, cancel_clone).await;
    });

    cancel
}

pub async fn run_token_refresh_loop(
    provider: &dyn IdentityProviderPort,
    logger: &dyn BackendLoggerPort,
    policy: &TokenRefreshPolicy,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + policy.interval, policy.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    log(
        logger,
        BackendLogLevel::Debug,
        "HC-AU-001",
        "token_refresh_started",
        serde_json::json!({
            "interval_secs": policy.interval.as_secs(),
            "min_validity_secs": policy.min_validity.as_secs(),
        }),
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                log(
                    logger,
                    BackendLogLevel::Debug,
                    "HC-AU-002",
                    "token_refresh_stopped",
                    serde_json::json!({}),
                );
                break;
            }
            _ = ticker.tick() => {
                refresh_once(provider, logger, policy).await;
            }
        }
    }
}

pub async fn refresh_once(
    provider: &dyn IdentityProviderPort,
    logger: &dyn BackendLoggerPort,
    policy: &TokenRefreshPolicy,
) -> RefreshOutcome {
    if !provider.is_authenticated() {
        return RefreshOutcome::SkippedAnonymous;
    }

    let err = match provider.update_token(policy.min_validity).await {
        Ok(true) => return RefreshOutcome::Refreshed,
        Ok(false) => return RefreshOutcome::StillValid,
        Err(err) => err,
    };

    log(
        logger,
        BackendLogLevel::Warn,
        "HC-AU-003",
        "token_refresh_failed_redirecting_to_login",
        serde_json::json!({
            "error": err.to_string(),
            "redirect_uri": policy.login_redirect_uri,
        }),
    );

    match provider.login(&policy.login_redirect_uri).await {
        Ok(()) => RefreshOutcome::LoginRequested,
        Err(login_err) => {
            log(
                logger,
                BackendLogLevel::Error,
                "HC-AU-004",
                "login_redirect_failed",
                serde_json::json!({ "error": login_err.to_string() }),
            );
            RefreshOutcome::LoginFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::BackendLogEvent;
    use crate::error::{BackendError, BackendResult};

    #[derive(Default)]
    struct FakeProvider {
        authenticated: AtomicBool,
        fail_refresh: AtomicBool,
        refreshes: AtomicUsize,
        logins: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn authenticated() -> Self {
            let provider = Self::default();
            provider.authenticated.store(true, Ordering::SeqCst);
            provider
        }
    }

    #[async_trait]
    impl IdentityProviderPort for FakeProvider {
        fn is_authenticated(&self) -> bool {
            self.authenticated.load(Ordering::SeqCst)
        }

        async fn update_token(&self, min_validity: Duration) -> BackendResult<bool> {
            assert_eq!(min_validity, DEFAULT_MIN_TOKEN_VALIDITY);
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.fail_refresh.load(Ordering::SeqCst) {
                return Err(BackendError::new("token_expired", "refresh token expired"));
            }
            Ok(true)
        }

        async fn login(&self, redirect_uri: &str) -> BackendResult<()> {
            self.logins
                .lock()
                .expect("logins lock")
                .push(redirect_uri.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<BackendLogEvent>>,
    }

    impl RecordingLogger {
        fn codes(&self) -> Vec<String> {
            self.events
                .lock()
                .expect("events lock")
                .iter()
                .map(|event| event.event_code.clone())
                .collect()
        }
    }

    impl BackendLoggerPort for RecordingLogger {
        fn log(&self, event: &BackendLogEvent) -> BackendResult<()> {
            self.events.lock().expect("events lock").push(event.clone());
            Ok(())
        }
    }

    fn policy() -> TokenRefreshPolicy {
        TokenRefreshPolicy::new("https://heroes.example.com")
    }

    #[tokio::test]
    async fn anonymous_sessions_are_not_refreshed() {
        let provider = FakeProvider::default();
        let logger = RecordingLogger::default();

        let outcome = refresh_once(&provider, &logger, &policy()).await;

        assert_eq!(outcome, RefreshOutcome::SkippedAnonymous);
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_failure_redirects_to_base_uri_and_logs_warning() {
        let provider = FakeProvider::authenticated();
        provider.fail_refresh.store(true, Ordering::SeqCst);
        let logger = RecordingLogger::default();

        let outcome = refresh_once(&provider, &logger, &policy()).await;

        assert_eq!(outcome, RefreshOutcome::LoginRequested);
        assert_eq!(
            *provider.logins.lock().expect("logins lock"),
            vec!["https://heroes.example.com".to_string()]
        );
        assert_eq!(logger.codes(), vec!["HC-AU-003".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_ticks_on_interval_until_cancelled() {
        let provider = Arc::new(FakeProvider::authenticated());
        let logger = Arc::new(RecordingLogger::default());
        let cancel = CancellationToken::new();

        let task = {
            let provider = Arc::clone(&provider);
            let logger = Arc::clone(&logger);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                run_token_refresh_loop(provider.as_ref(), logger.as_ref(), &policy(), cancel)
                    .await;
            })
        };

        tokio::time::sleep(Duration::from_secs(75)).await;
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 2);

        cancel.cancel();
        task.await.expect("refresh task must stop cleanly");

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 2);
        let codes = logger.codes();
        assert_eq!(codes.first().map(String::as_str), Some("HC-AU-001"));
        assert_eq!(codes.last().map(String::as_str), Some("HC-AU-002"));
    }

    #[tokio::test(start_paused = true)]
    async fn first_refresh_waits_a_full_interval() {
        let provider = Arc::new(FakeProvider::authenticated());
        let logger: Arc<dyn BackendLoggerPort> = Arc::new(RecordingLogger::default());

        let cancel = spawn_token_refresh(provider.clone(), logger, policy());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);

        cancel.cancel();
    }
}
