//! Error handling for the method-channel boundary

use chapoly_crypto::{CodecError, ErrorKind};
use thiserror::Error;

/// Structured failure returned to the caller.
///
/// `kind` is the stable machine-readable code; `message` is for humans and
/// never contains key material or plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct BridgeError {
    /// Machine-readable error kind
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
}

impl BridgeError {
    /// Create an error with an explicit kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A required parameter was absent or had the wrong kind.
    pub fn invalid_parameter(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("Parameter '{name}' is missing or invalid"),
        )
    }

    /// The method call itself could not be parsed.
    pub fn malformed_call(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Wire-level error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.as_str()
    }
}

impl From<CodecError> for BridgeError {
    fn from(err: CodecError) -> Self {
        match &err {
            CodecError::InvalidArgument(name) => Self::invalid_parameter(name),
            _ => Self::new(err.kind(), err.to_string()),
        }
    }
}
