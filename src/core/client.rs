//! Marks client: one POST per barcode, classified into an outcome
//!
//! Classification is a closed set resolved by pattern matching: a
//! barcode either yields rows, an explicit no-data signal, or exactly
//! one [`LookupError`]. There is no partial-row error; field absence is
//! handled by the record types, not here.

use crate::config::LookupConfig;
use crate::core::records::{MarksRequest, MarksRow, RawMarksRecord};
use crate::error::{LookupError, Result};
use tracing::{debug, warn};

/// Maximum bytes of an error body carried into an error message
const ERROR_BODY_LIMIT: usize = 200;

/// Terminal state of one barcode lookup
#[derive(Debug, Clone)]
pub enum Outcome {
    /// One or more rows came back; response order is preserved
    Success(Vec<MarksRow>),
    /// The endpoint answered cleanly with no records (valid negative)
    NoData,
    /// The lookup failed; the batch continues without it
    Error(LookupError),
}

impl Outcome {
    /// Whether this outcome carries rows
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// HTTP client for the marks endpoint
#[derive(Debug, Clone)]
pub struct MarksClient {
    config: LookupConfig,
    http: reqwest::Client,
}

impl MarksClient {
    /// Create a client with the configured per-request timeout
    pub fn new(config: LookupConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::Unexpected(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Issue the POST for one barcode and parse the response array.
    ///
    /// `Ok(None)` means the endpoint answered with JSON `null`; an empty
    /// array comes back as `Ok(Some(vec![]))`. Both are "no data" to the
    /// caller.
    pub async fn fetch_marks(&self, bar_code: &str) -> Result<Option<Vec<RawMarksRecord>>> {
        let payload = MarksRequest::new(
            &self.config.checked_type,
            &self.config.eval_session,
            bar_code,
        );

        debug!(bar_code, endpoint = %self.config.endpoint, "sending marks request");

        // .json() sets Content-Type: application/json
        let response = self
            .http
            .post(self.config.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) if !body.is_empty() => truncate(&body, ERROR_BODY_LIMIT),
                _ => status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            };
            return Err(LookupError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Option<Vec<RawMarksRecord>>>()
            .await
            .map_err(|e| LookupError::MalformedResponse(e.to_string()))
    }

    /// Resolve one barcode to its terminal outcome
    pub async fn lookup(&self, bar_code: &str) -> Outcome {
        match self.fetch_marks(bar_code).await {
            Ok(Some(records)) if !records.is_empty() => {
                let rows = records.into_iter().map(MarksRow::from).collect::<Vec<_>>();
                debug!(bar_code, rows = rows.len(), "lookup succeeded");
                Outcome::Success(rows)
            }
            Ok(_) => {
                debug!(bar_code, "no data for barcode");
                Outcome::NoData
            }
            Err(e) => {
                warn!(bar_code, error = %e, "lookup failed");
                Outcome::Error(e)
            }
        }
    }

    /// Map a reqwest send failure onto the error taxonomy
    fn classify_send_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.config.timeout)
        } else if err.is_connect() || err.is_request() {
            LookupError::Network(err.to_string())
        } else {
            LookupError::Unexpected(err.to_string())
        }
    }
}

/// Truncate a body snippet on a char boundary
fn truncate(body: &str, limit: usize) -> String {
    if body.len() <= limit {
        body.to_string()
    } else {
        let mut end = limit;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
