//! Codec error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::Encoding;

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// A required parameter was missing or had the wrong kind
    #[error("parameter '{0}' is missing or invalid")]
    InvalidArgument(String),

    /// Invalid key length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Invalid nonce length
    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Invalid tag length
    #[error("invalid tag length: expected {expected}, got {actual}")]
    InvalidTagLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Encoding tag is not one of the recognized values
    #[error("unsupported encoding '{value}' for '{field}': expected 'hex' or 'base64'")]
    UnsupportedEncoding {
        /// Name of the parameter carrying the tag
        field: String,
        /// The rejected tag
        value: String,
    },

    /// Text could not be decoded in the requested encoding
    #[error("malformed {encoding} in '{field}': {reason}")]
    MalformedText {
        /// Name of the parameter carrying the text
        field: String,
        /// Encoding the text was decoded with
        encoding: Encoding,
        /// Decoder diagnostic
        reason: String,
    },

    /// Tag verification failed
    #[error("decryption failed: authentication failure")]
    AuthenticationFailed,

    /// AEAD encryption failed
    #[error("encryption failed")]
    EncryptionFailed,

    /// Random number generation failed
    #[error("random number generation failed")]
    RandomFailed,

    /// Plaintext exceeds the ChaCha20 block counter range
    #[error("encryption failed: plaintext too large ({0} bytes)")]
    PlaintextTooLarge(u64),

    /// Ciphertext exceeds the ChaCha20 block counter range
    #[error("decryption failed: ciphertext too large ({0} bytes)")]
    CiphertextTooLarge(u64),

    /// Authenticated plaintext is not valid UTF-8
    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,
}

impl CodecError {
    /// Machine-readable kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidKeyLength { .. } => ErrorKind::InvalidKeyLength,
            Self::InvalidNonceLength { .. } => ErrorKind::InvalidNonceLength,
            Self::InvalidTagLength { .. } => ErrorKind::InvalidTagLength,
            Self::UnsupportedEncoding { .. } | Self::MalformedText { .. } => {
                ErrorKind::EncodingError
            }
            Self::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            Self::EncryptionFailed | Self::RandomFailed | Self::PlaintextTooLarge(_) => {
                ErrorKind::EncryptionError
            }
            Self::CiphertextTooLarge(_) | Self::InvalidUtf8 => ErrorKind::DecryptionError,
        }
    }

    /// Shorthand for a missing or wrong-kind parameter.
    pub fn invalid_argument(field: impl Into<String>) -> Self {
        Self::InvalidArgument(field.into())
    }
}

/// Stable error classification shared by every implementation of the codec.
///
/// The string form returned by [`ErrorKind::as_str`] is the wire-level error
/// code; it must not change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing or malformed field
    InvalidArgument,
    /// Key is not 32 bytes
    InvalidKeyLength,
    /// Nonce is not 12 bytes
    InvalidNonceLength,
    /// Tag is not 16 bytes
    InvalidTagLength,
    /// Malformed hex/base64 text or unrecognized encoding tag
    EncodingError,
    /// Tag mismatch on decryption
    AuthenticationFailed,
    /// Any other seal failure
    EncryptionError,
    /// Any other open failure
    DecryptionError,
}

impl ErrorKind {
    /// Wire-level error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidKeyLength => "InvalidKeyLength",
            Self::InvalidNonceLength => "InvalidNonceLength",
            Self::InvalidTagLength => "InvalidTagLength",
            Self::EncodingError => "EncodingError",
            Self::AuthenticationFailed => "AuthenticationFailed",
            Self::EncryptionError => "EncryptionError",
            Self::DecryptionError => "DecryptionError",
        }
    }

    /// True for errors raised before any cryptographic work starts.
    #[must_use]
    pub const fn is_validation(self) -> bool {
        matches!(
            self,
            Self::InvalidArgument
                | Self::InvalidKeyLength
                | Self::InvalidNonceLength
                | Self::InvalidTagLength
                | Self::EncodingError
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
