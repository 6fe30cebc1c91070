//! Error types for pipeline-query
//!
//! This module defines the error hierarchy for the whole client.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pipeline-query
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Operation '{operation}' is not implemented by this backend")]
    NotImplemented { operation: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("{code} (HTTP {status}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Response from '{operation}' is missing field '{field}'")]
    MissingField { operation: String, field: String },

    #[error("Pagination stopped after {max_pages} pages with more results pending")]
    PageLimitExceeded { max_pages: u32 },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a provider fault from a decoded `__type`/`message` body
    pub fn service(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a missing response field error
    pub fn missing_field(operation: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            operation: operation.into(),
            field: field.into(),
        }
    }

    /// Check if the transport should send the request again
    ///
    /// Throttling faults arrive as HTTP 400, so the fault code is checked
    /// before the status.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect(),
            Error::Timeout { .. } => true,
            Error::Service { status, code, .. } => {
                THROTTLING_CODES.contains(&code.as_str()) || *status >= 500
            }
            Error::HttpStatus { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Check if this error came from a backend without the operation
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Error::NotImplemented { .. })
    }
}

/// Fault codes the provider uses when a caller exceeds its request rate
const THROTTLING_CODES: &[&str] = &["ThrottlingException", "Throttling", "RequestLimitExceeded"];

/// Result type alias for pipeline-query
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::not_implemented("DataPipeline.QueryObjects");
        assert_eq!(
            err.to_string(),
            "Operation 'DataPipeline.QueryObjects' is not implemented by this backend"
        );

        let err = Error::http_status(502, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = Error::service(400, "PipelineNotFoundException", "Pipeline df-1 not found");
        assert_eq!(
            err.to_string(),
            "PipelineNotFoundException (HTTP 400): Pipeline df-1 not found"
        );

        let err = Error::PageLimitExceeded { max_pages: 3 };
        assert_eq!(
            err.to_string(),
            "Pagination stopped after 3 pages with more results pending"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());
        assert!(Error::service(400, "ThrottlingException", "Rate exceeded").is_retryable());
        assert!(Error::service(500, "InternalServiceError", "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::service(400, "InvalidRequestException", "bad sphere").is_retryable());
        assert!(!Error::service(400, "PipelineNotFoundException", "").is_retryable());
        assert!(!Error::not_implemented("x").is_retryable());
        assert!(!Error::PageLimitExceeded { max_pages: 1 }.is_retryable());
    }

    #[test]
    fn test_is_not_implemented() {
        assert!(Error::not_implemented("DataPipeline.DescribeObjects").is_not_implemented());
        assert!(!Error::config("x").is_not_implemented());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
