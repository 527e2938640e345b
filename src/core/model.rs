// ChatbotQuery - core/model.rs
//
// Core data types shared between the request pipeline, the background
// query manager, and the UI.

use crate::util::constants;
use crate::util::error::QueryError;
use chrono::{DateTime, Local};
use std::fmt;

/// Identifier assigned to each submitted request, increasing per session.
pub type RequestId = u64;

/// Result of one chatbot request: the decoded JSON body or the failure kind.
pub type QueryOutcome = Result<serde_json::Value, QueryError>;

/// Location of the chatbot endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Scheme, host and port, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Path joined onto `base_url`, e.g. `/chatbot/`.
    pub path: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(constants::DEFAULT_BASE_URL, constants::DEFAULT_ENDPOINT_PATH)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

/// Status line and body text of a received HTTP response, before
/// classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Message sent from a background request thread to the UI thread.
#[derive(Debug)]
pub enum QueryProgress {
    /// A request finished, successfully or not.
    Resolved {
        id: RequestId,
        outcome: QueryOutcome,
        resolved_at: DateTime<Local>,
    },
}

/// Explicit request lifecycle state of the query panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,

    /// At least one request is in flight.
    Pending,

    /// The most recently resolved request succeeded.
    Succeeded(serde_json::Value),

    /// The most recently resolved request failed.
    Failed(QueryError),
}

impl QueryStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<QueryOutcome> for QueryStatus {
    fn from(outcome: QueryOutcome) -> Self {
        match outcome {
            Ok(value) => Self::Succeeded(value),
            Err(e) => Self::Failed(e),
        }
    }
}
