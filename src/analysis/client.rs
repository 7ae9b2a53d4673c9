//! Blocking HTTP client for the analysis service.

use super::traits::AnalysisService;
use crate::error::{AssessmentError, ExternalErrorKind, Result};
use crate::pipeline::CancellationToken;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Upper bound on a single backoff delay.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// How often a backoff sleep checks for cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(100);

/// Analysis client configuration.
#[derive(Debug, Clone)]
pub struct AnalysisClientConfig {
    /// Endpoint receiving the POSTed request
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum retries for failed requests
    pub max_retries: u8,
    /// Optional API key sent as `x-api-key`
    pub api_key: Option<String>,
}

impl Default for AnalysisClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/analyze".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            api_key: None,
        }
    }
}

/// HTTP implementation of [`AnalysisService`].
pub struct HttpAnalysisService {
    client: Client,
    config: AnalysisClientConfig,
    cancel: CancellationToken,
}

/// Helper to convert reqwest errors to external errors
fn transport_error(msg: &str, err: &reqwest::Error) -> AssessmentError {
    let kind = if err.is_timeout() {
        ExternalErrorKind::Timeout(err.to_string())
    } else {
        ExternalErrorKind::Network(err.to_string())
    };
    AssessmentError::external(msg, kind)
}

impl HttpAnalysisService {
    /// Create a new client.
    pub fn new(config: AnalysisClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| transport_error("Failed to create HTTP client", &e))?;

        Ok(Self {
            client,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Stop retrying once `cancel` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisClientConfig {
        &self.config
    }

    /// Sleep for `delay`, waking early on cancellation. Returns false if cancelled.
    fn sleep_unless_cancelled(&self, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        while !self.cancel.is_cancelled() {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(CANCEL_POLL));
        }
        false
    }

    /// Send a single request.
    fn send_request(&self, request: &Value) -> Result<String> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder
            .send()
            .map_err(|e| transport_error("Failed to send analysis request", &e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| transport_error("Failed to read analysis response", &e))?;

        if !status.is_success() {
            return Err(AssessmentError::external(
                "analysis request",
                ExternalErrorKind::Status {
                    status: status.as_u16(),
                    body: truncate(&body, 200),
                },
            ));
        }

        Ok(body)
    }
}

impl AnalysisService for HttpAnalysisService {
    /// POST the request with retries.
    fn analyze(&self, request: &Value) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                tracing::debug!("Retry attempt {} after {:?}", attempt, delay);
                if !self.sleep_unless_cancelled(delay) {
                    return Err(cancelled());
                }
            }
            if self.cancel.is_cancelled() {
                return Err(cancelled());
            }

            match self.send_request(request) {
                Ok(body) => {
                    tracing::info!(
                        "Analysis service answered ({} bytes) on attempt {}",
                        body.len(),
                        attempt + 1
                    );
                    return Ok(body);
                }
                Err(e) => {
                    tracing::debug!("Analysis request attempt {} failed: {}", attempt + 1, e);
                    let retry = is_retryable(&e);
                    last_error = Some(e);
                    if !retry {
                        tracing::debug!("Not retrying a client error");
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AssessmentError::external(
                "analysis request",
                ExternalErrorKind::Network("no attempt made".to_string()),
            )
        }))
    }

    fn name(&self) -> &'static str {
        "http"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Exponential backoff: 1s, 2s, 4s, ..., capped at [`MAX_BACKOFF`].
fn backoff_delay(attempt: u8) -> Duration {
    let shift = u32::from(attempt.saturating_sub(1));
    let secs = 1u64.checked_shl(shift).unwrap_or(u64::MAX);
    Duration::from_secs(secs).min(MAX_BACKOFF)
}

/// Client errors (4xx) and cancellation cannot succeed on retry.
fn is_retryable(err: &AssessmentError) -> bool {
    !matches!(
        err,
        AssessmentError::ExternalUnavailable {
            source: ExternalErrorKind::Status {
                status: 400..=499,
                ..
            } | ExternalErrorKind::Cancelled,
            ..
        }
    )
}

fn cancelled() -> AssessmentError {
    AssessmentError::external("analysis request", ExternalErrorKind::Cancelled)
}

/// Cut a response body for error messages, on a char boundary.
fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
