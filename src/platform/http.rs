// ChatbotQuery - platform/http.rs
//
// Blocking HTTP transport for the chatbot endpoint, built on a ureq agent
// with native-tls. Status codes are not treated as errors so the body of a
// non-2xx response can be read and shown to the user.

use crate::core::model::HttpReply;
use crate::core::request::Transport;
use crate::util::constants;
use crate::util::error::QueryError;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use ureq::Agent;
use url::Url;

/// Create the HTTP agent used for chatbot requests.
///
/// Uses the system TLS library and root certificates. No global timeout is
/// configured; a request waits until the backend answers or the connection
/// fails.
pub fn agent() -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .http_status_as_error(false)
        .build()
        .into()
}

/// `Transport` backed by a shared ureq agent.
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_body_limit(constants::MAX_RESPONSE_BODY_BYTES)
    }

    /// Transport that refuses response bodies larger than `body_limit` bytes.
    pub fn with_body_limit(body_limit: u64) -> Self {
        Self {
            agent: agent(),
            body_limit,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &Url) -> Result<HttpReply, QueryError> {
        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec();

        reply_from_body(status, body)
    }
}

/// Build the reply once the status line has arrived.
///
/// Bodies are decoded lossily so invalid UTF-8 never hides a response. A
/// non-2xx status is always reported as a server error, with an empty body if
/// the body could not be read. A 2xx whose body could not be read (oversized,
/// truncated, connection dropped) carries no usable answer and counts as
/// `NoResponse`.
pub fn reply_from_body(
    status: u16,
    body: Result<Vec<u8>, ureq::Error>,
) -> Result<HttpReply, QueryError> {
    match body {
        Ok(bytes) => Ok(HttpReply {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }),
        Err(e) if (200..300).contains(&status) => {
            tracing::warn!(status, error = %e, "Success response body unreadable");
            Err(QueryError::NoResponse {
                detail: format!("response body unreadable: {e}"),
            })
        }
        Err(e) => {
            tracing::warn!(status, error = %e, "Error response body unreadable");
            Ok(HttpReply {
                status,
                body: String::new(),
            })
        }
    }
}

/// Map a ureq failure onto the request error taxonomy.
///
/// Only failures that happen before anything is written to the network count
/// as setup errors; every other failure means the request was attempted but
/// no usable response arrived.
pub fn classify_transport_error(err: ureq::Error) -> QueryError {
    match err {
        ureq::Error::StatusCode(status) => QueryError::ServerError {
            status,
            body: String::new(),
        },
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => QueryError::RequestSetup {
            message: err.to_string(),
        },
        other => QueryError::NoResponse {
            detail: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_uri_is_setup_error() {
        let err = classify_transport_error(ureq::Error::BadUri("no host".to_string()));
        assert!(matches!(err, QueryError::RequestSetup { .. }));
        assert!(err.to_string().starts_with("Request setup error: "));
    }

    #[test]
    fn test_connection_failures_are_no_response() {
        for err in [
            ureq::Error::ConnectionFailed,
            ureq::Error::HostNotFound,
            ureq::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset by peer",
            )),
        ] {
            let classified = classify_transport_error(err);
            assert!(
                matches!(classified, QueryError::NoResponse { .. }),
                "expected NoResponse, got {classified:?}"
            );
        }
    }

    fn reset() -> ureq::Error {
        ureq::Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed mid-body",
        ))
    }

    #[test]
    fn test_invalid_utf8_body_is_decoded_lossily() {
        let reply = reply_from_body(404, Ok(b"not found \xff".to_vec())).unwrap();
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body, "not found \u{fffd}");
    }

    #[test]
    fn test_unreadable_error_body_keeps_status() {
        let reply = reply_from_body(500, Err(reset())).unwrap();
        assert_eq!(
            reply,
            HttpReply {
                status: 500,
                body: String::new()
            }
        );
    }

    #[test]
    fn test_unreadable_success_body_is_no_response() {
        let err = reply_from_body(200, Err(reset())).unwrap_err();
        assert!(matches!(err, QueryError::NoResponse { .. }), "got {err:?}");
    }

    #[test]
    fn test_status_code_error_is_server_error() {
        let err = classify_transport_error(ureq::Error::StatusCode(503));
        assert_eq!(
            err,
            QueryError::ServerError {
                status: 503,
                body: String::new()
            }
        );
    }
}
