//! Error types for Dome9 API operations.

use thiserror::Error;

use crate::client::ResponseMeta;

/// Errors that can occur during Dome9 API operations.
#[derive(Debug, Error)]
pub enum Dome9Error {
    /// Client construction failed: missing credentials, bad base URL or
    /// an unusable transport.
    #[error("Dome9 configuration error: {0}")]
    Configuration(String),

    /// A relative path could not be resolved against the base URL.
    #[error("Invalid URL '{input}': {reason}")]
    Url { input: String, reason: String },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The request never produced a response (connect, DNS, TLS,
    /// redirect loop, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside the operation's contract.
    #[error("Unexpected response status {status}")]
    Status {
        status: u16,
        response: Box<ResponseMeta>,
        body: String,
    },

    /// The server answered but its body could not be read to the end.
    #[error("Failed to read response body: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
        response: Box<ResponseMeta>,
    },

    /// A successful response body did not match the expected shape.
    #[error("Failed to decode response: {source}")]
    Decoding {
        #[source]
        source: serde_json::Error,
        response: Box<ResponseMeta>,
    },

    /// Writing the response body to the caller's sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Dome9Error {
    /// Response metadata, when the server answered at all.
    ///
    /// Available for [`Dome9Error::Status`], [`Dome9Error::Body`] and
    /// [`Dome9Error::Decoding`]; transport failures never produced a response.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Status { response, .. }
            | Self::Body { response, .. }
            | Self::Decoding { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// The HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status.as_u16())
    }
}

/// Result type alias for Dome9 operations.
pub type Result<T> = core::result::Result<T, Dome9Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_includes_code() {
        let err = Dome9Error::Status {
            status: 404,
            response: Box::new(ResponseMeta::for_status(404)),
            body: String::new(),
        };
        assert!(err.to_string().contains("404"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_configuration_has_no_response() {
        let err = Dome9Error::Configuration("Credentials must be provided".to_string());
        assert!(err.response().is_none());
        assert!(err.status().is_none());
    }
}
