//! Lookup configuration
//!
//! The wire constants come from the BTE records endpoint contract: every
//! request carries the same checked-type and evaluation session, only
//! the barcode varies.

use crate::error::{LookupError, Result};
use std::time::Duration;
use url::Url;

/// Default marks endpoint
pub const DEFAULT_ENDPOINT: &str = "https://bteexam.com/Admin/Copy_Marks";

/// Fixed checked-type sent with every request
pub const CHECKED_TYPE: &str = "EVAL";

/// Fixed evaluation session sent with every request
pub const EVAL_SESSION: &str = "MAY 2025";

/// Default ceiling for simultaneous in-flight requests
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the marks client and batch dispatcher
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Endpoint accepting the marks POST request
    pub endpoint: Url,
    /// Checked-type constant for the request payload
    pub checked_type: String,
    /// Evaluation session constant for the request payload
    pub eval_session: String,
    /// Maximum concurrent requests (always at least 1)
    pub concurrency: usize,
    /// Timeout per individual request
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            checked_type: CHECKED_TYPE.to_string(),
            eval_session: EVAL_SESSION.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LookupConfig {
    /// Create a config with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint from a string, validating it as a URL
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = Url::parse(endpoint)
            .map_err(|e| LookupError::Unexpected(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        Ok(self)
    }

    /// Set the evaluation session label
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.eval_session = session.into();
        self
    }

    /// Set the concurrency ceiling
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
