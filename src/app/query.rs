// ChatbotQuery - app/query.rs
//
// Request lifecycle management. Each submitted query runs on its own
// background thread and reports back to the UI thread over an mpsc channel.
//
// Architecture:
//   - `QueryManager` lives on the UI thread and owns the receiving end.
//   - Every `submit` spawns one thread that performs exactly one GET and
//     sends exactly one `QueryProgress::Resolved` message.
//   - In-flight requests are never cancelled; messages are applied in
//     arrival order, so the last request to resolve wins.

use crate::core::model::{Endpoint, QueryOutcome, QueryProgress, RequestId};
use crate::core::request::ChatbotClient;
use crate::util::error::QueryError;
use chrono::Local;
use std::sync::{mpsc, Arc};

/// Manages chatbot requests on background threads.
pub struct QueryManager {
    client: Arc<ChatbotClient>,
    progress_tx: mpsc::Sender<QueryProgress>,
    progress_rx: mpsc::Receiver<QueryProgress>,
    next_id: RequestId,
}

impl QueryManager {
    pub fn new(client: ChatbotClient) -> Self {
        let (progress_tx, progress_rx) = mpsc::channel();
        Self {
            client: Arc::new(client),
            progress_tx,
            progress_rx,
            next_id: 1,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.client.endpoint()
    }

    /// Send `supplier_id` to the chatbot endpoint on a background thread.
    ///
    /// Returns the id that the matching `Resolved` message will carry.
    pub fn submit(&mut self, supplier_id: String) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;

        let client = Arc::clone(&self.client);
        let tx = self.progress_tx.clone();

        tracing::info!(request = id, endpoint = %client.endpoint(), "Query submitted");
        tracing::debug!(request = id, supplier_id = %supplier_id, "Query text");

        let spawned = std::thread::Builder::new()
            .name(format!("chatbot-request-{id}"))
            .spawn(move || {
                let outcome = client.query(&supplier_id);
                log_outcome(id, &outcome);
                // Receiver dropped means the window closed; nothing to report to.
                let _ = tx.send(QueryProgress::Resolved {
                    id,
                    outcome,
                    resolved_at: Local::now(),
                });
            });

        if let Err(e) = spawned {
            let outcome: QueryOutcome = Err(QueryError::RequestSetup {
                message: format!("could not start request thread: {e}"),
            });
            log_outcome(id, &outcome);
            let _ = self.progress_tx.send(QueryProgress::Resolved {
                id,
                outcome,
                resolved_at: Local::now(),
            });
        }

        id
    }

    /// Poll for resolved requests without blocking. Returns all pending messages
    /// in arrival order.
    pub fn poll_progress(&self) -> Vec<QueryProgress> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.progress_rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}

/// Console diagnostic for a finished request.
fn log_outcome(id: RequestId, outcome: &QueryOutcome) {
    match outcome {
        Ok(_) => tracing::info!(request = id, "Query succeeded"),
        Err(QueryError::NoResponse { detail }) => tracing::error!(
            request = id,
            kind = "no_response",
            detail = %detail,
            "Error fetching data"
        ),
        Err(e) => tracing::error!(request = id, kind = e.kind(), error = %e, "Error fetching data"),
    }
}
