// ChatbotQuery - core/request.rs
//
// Request pipeline for the chatbot endpoint:
//   1. build the GET URL with the single `supplier_id` parameter,
//   2. hand it to a `Transport`,
//   3. classify the reply into success or one of three failure kinds,
//   4. render the outcome as the text shown in the response view.
//
// The transport is a trait so the pipeline can be driven by the real HTTP
// agent (platform::http) or by an in-memory double in tests.

use crate::core::model::{Endpoint, HttpReply, QueryOutcome};
use crate::util::constants;
use crate::util::error::QueryError;
use serde_json::Value;
use url::Url;

/// Performs one blocking HTTP GET.
///
/// Implementations must return `Ok` for every received response regardless
/// of status, `QueryError::NoResponse` when the request was sent but nothing
/// came back, and `QueryError::RequestSetup` when it could not be sent.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> Result<HttpReply, QueryError>;
}

/// Client for the chatbot endpoint, generic over the transport.
pub struct ChatbotClient {
    endpoint: Endpoint,
    transport: Box<dyn Transport>,
}

impl ChatbotClient {
    pub fn new(endpoint: Endpoint, transport: Box<dyn Transport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Issue exactly one GET for `supplier_id` and classify the result.
    pub fn query(&self, supplier_id: &str) -> QueryOutcome {
        let url = build_request_url(&self.endpoint, supplier_id)?;
        tracing::debug!(url = %url, "Sending chatbot request");
        let reply = self.transport.get(&url)?;
        tracing::debug!(
            status = reply.status,
            bytes = reply.body.len(),
            "Chatbot reply received"
        );
        classify_reply(reply)
    }
}

/// Build the request URL: `{base_url}{path}?supplier_id={supplier_id}`.
///
/// The supplier id is passed through unmodified apart from URL encoding;
/// an empty id still produces the parameter with an empty value.
pub fn build_request_url(endpoint: &Endpoint, supplier_id: &str) -> Result<Url, QueryError> {
    let mut url = Url::parse(&endpoint.to_string()).map_err(|e| QueryError::RequestSetup {
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(QueryError::RequestSetup {
                message: format!("unsupported URL scheme '{scheme}'"),
            });
        }
    }

    url.query_pairs_mut()
        .clear()
        .append_pair(constants::SUPPLIER_ID_PARAM, supplier_id);
    Ok(url)
}

/// Classify a received response: 2xx is success, anything else a server error.
pub fn classify_reply(reply: HttpReply) -> QueryOutcome {
    if (200..300).contains(&reply.status) {
        Ok(decode_body(reply.body))
    } else {
        Err(QueryError::ServerError {
            status: reply.status,
            body: server_error_text(reply.body),
        })
    }
}

/// Decode a success body as JSON. Bodies that are not JSON are kept as a
/// JSON string value so they still render.
fn decode_body(body: String) -> Value {
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => value,
        Err(_) => Value::String(body),
    }
}

/// Text of a server error body as shown to the user: a JSON string literal is
/// unquoted, everything else is shown verbatim.
fn server_error_text(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::String(s)) => s,
        _ => body,
    }
}

/// Pretty-print a JSON value with 2-space indentation.
pub fn render_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Text shown in the response view for an outcome.
pub fn render_outcome(outcome: &QueryOutcome) -> String {
    match outcome {
        Ok(value) => render_json(value),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Transport double: records every URL and answers with a canned result.
    struct CannedTransport {
        reply: Result<HttpReply, QueryError>,
        calls: Arc<Mutex<Vec<Url>>>,
    }

    impl Transport for CannedTransport {
        fn get(&self, url: &Url) -> Result<HttpReply, QueryError> {
            self.calls.lock().unwrap().push(url.clone());
            self.reply.clone()
        }
    }

    fn client_with(
        endpoint: Endpoint,
        reply: Result<HttpReply, QueryError>,
    ) -> (ChatbotClient, Arc<Mutex<Vec<Url>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let transport = CannedTransport {
            reply,
            calls: Arc::clone(&calls),
        };
        (ChatbotClient::new(endpoint, Box::new(transport)), calls)
    }

    fn reply(status: u16, body: &str) -> Result<HttpReply, QueryError> {
        Ok(HttpReply {
            status,
            body: body.to_string(),
        })
    }

    fn supplier_id_of(url: &Url) -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == constants::SUPPLIER_ID_PARAM)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn test_one_get_per_query_with_supplier_id() {
        for query in ["", "ACME-42", "Brand & Co / Widgets?"] {
            let (client, calls) = client_with(Endpoint::default(), reply(200, "{}"));
            client.query(query).unwrap();

            let calls = calls.lock().unwrap();
            assert_eq!(calls.len(), 1, "exactly one request for {query:?}");
            assert_eq!(calls[0].path(), "/chatbot/");
            assert_eq!(calls[0].host_str(), Some("127.0.0.1"));
            assert_eq!(calls[0].port(), Some(8000));
            assert_eq!(supplier_id_of(&calls[0]), vec![query.to_string()]);
        }
    }

    #[test]
    fn test_success_renders_two_space_json() {
        let (client, _) = client_with(Endpoint::default(), reply(200, r#"{"answer": "hello"}"#));
        let outcome = client.query("hello");
        assert_eq!(render_outcome(&outcome), "{\n  \"answer\": \"hello\"\n}");
    }

    #[test]
    fn test_success_non_json_body_renders_as_string() {
        let (client, _) = client_with(Endpoint::default(), reply(200, "plain text"));
        let outcome = client.query("x");
        assert_eq!(outcome, Ok(Value::String("plain text".to_string())));
        assert_eq!(render_outcome(&outcome), "\"plain text\"");
    }

    #[test]
    fn test_any_2xx_is_success() {
        let (client, _) = client_with(Endpoint::default(), reply(204, ""));
        assert!(client.query("x").is_ok());
    }

    #[test]
    fn test_404_renders_server_error() {
        let (client, _) = client_with(Endpoint::default(), reply(404, "not found"));
        let outcome = client.query("missing");
        assert_eq!(
            render_outcome(&outcome),
            "Server responded with: 404 - not found"
        );
    }

    #[test]
    fn test_server_error_json_string_body_is_unquoted() {
        let (client, _) = client_with(Endpoint::default(), reply(404, r#""not found""#));
        assert_eq!(
            render_outcome(&client.query("missing")),
            "Server responded with: 404 - not found"
        );
    }

    #[test]
    fn test_server_error_json_object_body_is_verbatim() {
        let body = r#"{"detail":"Internal Server Error"}"#;
        let (client, _) = client_with(Endpoint::default(), reply(500, body));
        assert_eq!(
            render_outcome(&client.query("x")),
            format!("Server responded with: 500 - {body}")
        );
    }

    #[test]
    fn test_network_failure_renders_fixed_message() {
        let failure = Err(QueryError::NoResponse {
            detail: "Connection refused".to_string(),
        });
        let (client, _) = client_with(Endpoint::default(), failure);
        assert_eq!(
            render_outcome(&client.query("x")),
            "No response from server. Possible CORS or server issue."
        );
    }

    #[test]
    fn test_invalid_base_url_is_setup_error_and_sends_nothing() {
        let (client, calls) = client_with(Endpoint::new("not a url", "/chatbot/"), reply(200, "{}"));
        let outcome = client.query("x");
        let message = url::ParseError::RelativeUrlWithoutBase.to_string();
        assert_eq!(
            outcome,
            Err(QueryError::RequestSetup {
                message: message.clone()
            })
        );
        assert_eq!(
            render_outcome(&outcome),
            format!("Request setup error: {message}")
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_scheme_is_setup_error() {
        let endpoint = Endpoint::new("ftp://127.0.0.1:8000", "/chatbot/");
        assert_eq!(
            build_request_url(&endpoint, "x"),
            Err(QueryError::RequestSetup {
                message: "unsupported URL scheme 'ftp'".to_string()
            })
        );
    }

    #[test]
    fn test_repeated_query_is_idempotent() {
        let (client, calls) = client_with(Endpoint::default(), reply(200, r#"{"answer": "hello"}"#));
        let first = render_outcome(&client.query("ACME"));
        let second = render_outcome(&client.query("ACME"));
        assert_eq!(first, second);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }
}
