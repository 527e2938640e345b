// ChatbotQuery - app/state.rs
//
// Application state management. Holds the query text, the rendered
// response, and the explicit request lifecycle status.
// Owned by the eframe::App implementation and only mutated on the UI thread.

use crate::core::model::{QueryOutcome, QueryProgress, QueryStatus, RequestId};
use crate::core::request;
use chrono::{DateTime, Local};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Free-text supplier id, brand, or product name. Updated per keystroke.
    pub query: String,

    /// Text shown in the response view. Empty until the first request
    /// resolves; afterwards always the rendering of the last resolution.
    pub response: String,

    /// Request lifecycle status.
    pub status: QueryStatus,

    /// Number of submitted requests that have not resolved yet.
    pub in_flight: usize,

    /// Id of the request whose outcome is currently displayed.
    pub displayed_request: Option<RequestId>,

    /// When the displayed outcome arrived.
    pub last_resolved_at: Option<DateTime<Local>>,

    /// Set by the query panel; consumed by the app on the next frame.
    pub submit_requested: bool,

    /// Endpoint shown in the status bar.
    pub endpoint_label: String,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal startup warnings (config validation).
    pub warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state for the given endpoint label.
    pub fn new(endpoint_label: String, debug_mode: bool) -> Self {
        Self {
            query: String::new(),
            response: String::new(),
            status: QueryStatus::Idle,
            in_flight: 0,
            displayed_request: None,
            last_resolved_at: None,
            submit_requested: false,
            endpoint_label,
            status_message: "Ready. Enter a query and press Send Query.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            debug_mode,
        }
    }

    /// Replace the query text. No validation and no other side effects.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Ask for the current query to be sent on the next frame.
    pub fn request_submit(&mut self) {
        self.submit_requested = true;
    }

    /// Take a pending submit request, clearing the flag.
    pub fn take_submit_request(&mut self) -> bool {
        std::mem::take(&mut self.submit_requested)
    }

    /// Record that request `id` has been sent.
    ///
    /// The previous response stays visible until a new one resolves.
    pub fn begin_request(&mut self, id: RequestId) {
        self.in_flight += 1;
        self.status = QueryStatus::Pending;
        self.status_message = format!("Request #{id} sent to {}...", self.endpoint_label);
    }

    /// Apply one message from the query manager.
    pub fn apply_progress(&mut self, msg: QueryProgress) {
        match msg {
            QueryProgress::Resolved {
                id,
                outcome,
                resolved_at,
            } => self.resolve(id, outcome, resolved_at),
        }
    }

    /// Apply a resolved outcome. Resolutions overwrite the response in the
    /// order they are applied, so the last request to resolve wins.
    pub fn resolve(&mut self, id: RequestId, outcome: QueryOutcome, resolved_at: DateTime<Local>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.response = request::render_outcome(&outcome);
        self.displayed_request = Some(id);
        self.last_resolved_at = Some(resolved_at);

        let summary = match &outcome {
            Ok(_) => format!("Request #{id} succeeded"),
            Err(e) => format!("Request #{id} failed ({})", e.kind()),
        };
        self.status_message = if self.in_flight > 0 {
            format!("{summary}; {} still pending", self.in_flight)
        } else {
            format!("{summary} at {}", resolved_at.format("%H:%M:%S"))
        };

        if self.in_flight == 0 {
            self.status = QueryStatus::from(outcome);
        }
    }

    /// Whether any request is still in flight.
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::QueryError;
    use serde_json::json;

    fn state() -> AppState {
        AppState::new("http://127.0.0.1:8000/chatbot/".to_string(), false)
    }

    #[test]
    fn test_initial_state_is_idle_and_empty() {
        let s = state();
        assert_eq!(s.status, QueryStatus::Idle);
        assert!(s.response.is_empty());
        assert_eq!(s.in_flight, 0);
    }

    #[test]
    fn test_query_change_only_updates_query() {
        let mut s = state();
        s.on_query_change("ACME");
        assert_eq!(s.query, "ACME");
        assert_eq!(s.status, QueryStatus::Idle);
        assert!(!s.submit_requested);
        assert!(s.response.is_empty());
    }

    #[test]
    fn test_submit_flag_is_consumed_once() {
        let mut s = state();
        s.request_submit();
        assert!(s.take_submit_request());
        assert!(!s.take_submit_request());
    }

    #[test]
    fn test_pending_then_succeeded() {
        let mut s = state();
        s.begin_request(1);
        assert!(s.is_pending());

        s.resolve(1, Ok(json!({"answer": "hello"})), Local::now());
        assert_eq!(s.response, "{\n  \"answer\": \"hello\"\n}");
        assert_eq!(s.status, QueryStatus::Succeeded(json!({"answer": "hello"})));
        assert_eq!(s.in_flight, 0);
        assert!(s.last_resolved_at.is_some());
    }

    #[test]
    fn test_pending_then_failed() {
        let mut s = state();
        s.begin_request(1);
        let err = QueryError::NoResponse {
            detail: "refused".to_string(),
        };
        s.resolve(1, Err(err.clone()), Local::now());
        assert_eq!(
            s.response,
            "No response from server. Possible CORS or server issue."
        );
        assert_eq!(s.status, QueryStatus::Failed(err));
    }

    #[test]
    fn test_previous_response_kept_while_pending() {
        let mut s = state();
        s.begin_request(1);
        s.resolve(1, Ok(json!(1)), Local::now());
        s.begin_request(2);
        assert!(s.is_pending());
        assert_eq!(s.response, "1");
    }

    #[test]
    fn test_last_resolution_wins() {
        let mut s = state();
        s.begin_request(1);
        s.begin_request(2);

        // Second request resolves first.
        s.resolve(2, Ok(json!({"from": "second"})), Local::now());
        assert!(s.is_pending(), "first request still in flight");
        assert!(s.response.contains("second"));

        s.resolve(
            1,
            Err(QueryError::ServerError {
                status: 500,
                body: "boom".to_string(),
            }),
            Local::now(),
        );
        assert_eq!(s.response, "Server responded with: 500 - boom");
        assert_eq!(s.displayed_request, Some(1));
        assert!(matches!(s.status, QueryStatus::Failed(_)));
    }
}
