//! Rate-limit aware HTTP fetching.
//!
//! Every attempt is preceded by the throttle delay. What happens after a
//! failed attempt is decided by [`RetryPolicy::decide`], a pure function of
//! the attempt index and the classified outcome, so the schedule can be
//! tested without a network or a clock.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ArxivError, ArxivResult};

/// Fetches the raw body of a request URL.
///
/// The search facade only depends on this trait, which lets tests count
/// upstream calls without a network.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> ArxivResult<String>;
}

/// Classified result of one failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The attempt exceeded the request timeout.
    Timeout,
    /// Could not connect to the host.
    Connect(String),
    /// Upstream answered with a non-success status.
    Status { status: u16, message: String },
    /// Any other transport failure (body read, protocol, redirect loop).
    Transport(String),
}

impl AttemptFailure {
    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Short description for logs; never includes the response body.
    fn reason(&self) -> String {
        match self {
            Self::Timeout => "timeout".to_string(),
            Self::Connect(msg) | Self::Transport(msg) => msg.clone(),
            Self::Status { status, .. } => format!("HTTP {status}"),
        }
    }

    /// The error surfaced when this is the final failure.
    fn into_error(self) -> ArxivError {
        match self {
            Self::Timeout => ArxivError::network(None, "Request to arXiv API timed out."),
            Self::Connect(msg) => {
                ArxivError::network(None, format!("Could not connect to arXiv API: {msg}"))
            }
            Self::Status { status: 429, .. } => {
                ArxivError::network(Some(429), "arXiv API rate limit exceeded.")
            }
            Self::Status { status, message } if is_non_retryable(status) => {
                ArxivError::client(status, format!("Client error with arXiv API request. {message}"))
            }
            Self::Status { status, message } if status >= 500 => {
                ArxivError::network(Some(status), format!("arXiv API server error. {message}"))
            }
            Self::Status { status, message } => ArxivError::network(
                Some(status),
                format!("Unexpected status from arXiv API. {message}"),
            ),
            Self::Transport(msg) => ArxivError::network(
                None,
                format!("A general network or request error occurred: {msg}"),
            ),
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug)]
pub enum RetryDecision {
    /// Sleep for the backoff, then try again.
    Retry { backoff: Duration },
    /// Give up with this error.
    Fail(ArxivError),
}

/// Attempt budget and backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Unit for both backoff schedules; the throttle delay in production.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Decide what follows the failed attempt with 0-based index `attempt`.
    ///
    /// - 4xx other than 429: fail immediately.
    /// - 429: retry after `base_delay * (attempt + 2)`.
    /// - 5xx, timeouts, connection and transport errors: retry after
    ///   `base_delay * (attempt + 1)`.
    /// - Out of attempts: fail with the last failure.
    #[must_use]
    pub fn decide(&self, attempt: u32, failure: AttemptFailure) -> RetryDecision {
        let backoff = match &failure {
            AttemptFailure::Status { status, .. } if is_non_retryable(*status) => {
                return RetryDecision::Fail(failure.into_error());
            }
            AttemptFailure::Status { status: 429, .. } => self.base_delay * (attempt + 2),
            _ => self.base_delay * (attempt + 1),
        };

        if attempt + 1 >= self.max_attempts {
            return RetryDecision::Fail(failure.into_error());
        }
        RetryDecision::Retry { backoff }
    }
}

const fn is_non_retryable(status: u16) -> bool {
    status >= 400 && status < 500 && status != 429
}

/// [`Fetch`] over HTTP with throttling and retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    throttle: Duration,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Build a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(api::USER_AGENT)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            throttle: config.throttle_delay,
            policy: RetryPolicy {
                max_attempts: config.max_attempts.max(1),
                base_delay: config.throttle_delay,
            },
        })
    }

    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// One throttled GET. Success yields the body.
    async fn attempt(&self, url: &Url) -> Result<String, AttemptFailure> {
        tokio::time::sleep(self.throttle).await;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AttemptFailure::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AttemptFailure::Status { status: status.as_u16(), message });
        }

        response.text().await.map_err(|e| AttemptFailure::from_reqwest(&e))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> ArxivResult<String> {
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0;

        loop {
            tracing::info!(attempt = attempt + 1, max_attempts, %url, "Fetching arXiv URL");

            let failure = match self.attempt(url).await {
                Ok(body) => {
                    tracing::info!(%url, bytes = body.len(), "Fetched arXiv URL");
                    return Ok(body);
                }
                Err(failure) => failure,
            };

            let reason = failure.reason();
            match self.policy.decide(attempt, failure) {
                RetryDecision::Retry { backoff } => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        %reason,
                        backoff_ms = backoff.as_millis() as u64,
                        "arXiv request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                RetryDecision::Fail(err) => {
                    if err.is_retryable() {
                        tracing::error!(%url, error = %err, "All {max_attempts} attempts failed");
                    } else {
                        tracing::error!(%url, error = %err, "arXiv request failed, not retrying");
                    }
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_millis(100);

    fn policy() -> RetryPolicy {
        RetryPolicy { max_attempts: 3, base_delay: BASE }
    }

    fn status(code: u16) -> AttemptFailure {
        AttemptFailure::Status { status: code, message: String::new() }
    }

    fn backoff(decision: RetryDecision) -> Duration {
        match decision {
            RetryDecision::Retry { backoff } => backoff,
            RetryDecision::Fail(err) => panic!("expected retry, got {err}"),
        }
    }

    fn failure(decision: RetryDecision) -> ArxivError {
        match decision {
            RetryDecision::Fail(err) => err,
            RetryDecision::Retry { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn test_client_error_fails_immediately() {
        let err = failure(policy().decide(0, status(404)));
        assert!(matches!(err, ArxivError::Client { status: 404, .. }));

        let err = failure(policy().decide(0, status(400)));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_server_error_linear_backoff() {
        assert_eq!(backoff(policy().decide(0, status(500))), BASE);
        assert_eq!(backoff(policy().decide(1, status(503))), BASE * 2);

        let err = failure(policy().decide(2, status(500)));
        assert!(matches!(err, ArxivError::Network { status: Some(500), .. }));
    }

    #[test]
    fn test_rate_limit_escalating_backoff() {
        assert_eq!(backoff(policy().decide(0, status(429))), BASE * 2);
        assert_eq!(backoff(policy().decide(1, status(429))), BASE * 3);

        let err = failure(policy().decide(2, status(429)));
        assert!(matches!(err, ArxivError::Network { status: Some(429), .. }));
    }

    #[test]
    fn test_transport_failures_retry_then_fail_as_network() {
        assert_eq!(backoff(policy().decide(0, AttemptFailure::Timeout)), BASE);
        assert_eq!(
            backoff(policy().decide(1, AttemptFailure::Connect("refused".into()))),
            BASE * 2
        );

        let err = failure(policy().decide(2, AttemptFailure::Timeout));
        assert!(matches!(err, ArxivError::Network { status: None, .. }));
        assert!(err.to_string().contains("timed out"));

        let err = failure(policy().decide(2, AttemptFailure::Transport("reset".into())));
        assert!(err.to_string().contains("reset"));
    }

    #[test]
    fn test_single_attempt_budget() {
        let policy = RetryPolicy { max_attempts: 1, base_delay: BASE };
        assert!(matches!(policy.decide(0, status(500)), RetryDecision::Fail(_)));
    }

    #[test]
    fn test_policy_follows_config() {
        let mut config = Config::for_testing("http://127.0.0.1:9");
        config.throttle_delay = BASE;
        let policy = HttpFetcher::new(&config).unwrap().policy();
        assert_eq!(policy, RetryPolicy { max_attempts: api::MAX_ATTEMPTS, base_delay: BASE });

        config.max_attempts = 0;
        assert_eq!(HttpFetcher::new(&config).unwrap().policy().max_attempts, 1);
    }

    #[test]
    fn test_unexpected_status_retried_as_network() {
        assert_eq!(backoff(policy().decide(0, status(304))), BASE);

        let err = failure(policy().decide(2, status(304)));
        assert!(matches!(err, ArxivError::Network { status: Some(304), .. }));
    }
}
