// ChatbotQuery - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Request failures are classified into exactly three kinds; their Display
// output is the text shown to the user in the response view.

use super::constants;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for fallible startup operations.
#[derive(Debug)]
pub enum ChatbotQueryError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ChatbotQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ChatbotQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Why a chatbot request did not produce a successful reply.
///
/// The variants are mutually exclusive and checked in declaration order:
/// a received response always wins over a transport failure, which always
/// wins over a construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The server answered with a non-2xx status.
    ServerError { status: u16, body: String },

    /// The request left the client but no response came back (refused
    /// connection, DNS failure, timeout, TLS failure, dropped connection).
    /// `detail` is the transport's own message and is only logged.
    NoResponse { detail: String },

    /// The request could not be constructed or sent at all.
    RequestSetup { message: String },
}

impl QueryError {
    /// Short label for log fields and the status bar.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServerError { .. } => "server_error",
            Self::NoResponse { .. } => "no_response",
            Self::RequestSetup { .. } => "request_setup",
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerError { status, body } => {
                write!(f, "Server responded with: {status} - {body}")
            }
            Self::NoResponse { .. } => f.write_str(constants::NO_RESPONSE_MESSAGE),
            Self::RequestSetup { message } => write!(f, "Request setup error: {message}"),
        }
    }
}

impl std::error::Error for QueryError {}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range or not recognised.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ChatbotQueryError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ChatbotQuery results.
pub type Result<T> = std::result::Result<T, ChatbotQueryError>;
