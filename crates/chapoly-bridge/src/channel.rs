//! Method-name dispatch.
//!
//! A [`MethodCall`] names one of four methods and carries an argument bag.
//! [`CodecChannel::handle`] validates the bag into a typed request, runs the
//! codec, and always answers with a [`MethodResponse`]: a malformed call is
//! an `Error` response, an unknown method is `NotImplemented`, nothing
//! panics.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::request::{DecryptRequest, DecryptStringRequest, EncryptRequest, EncryptStringRequest};
use crate::value::{Arguments, Value};

/// The four supported methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Raw-bytes encryption
    Encrypt,
    /// Text encryption with encoded key and output
    EncryptString,
    /// Raw-bytes decryption
    Decrypt,
    /// Text decryption with encoded inputs
    DecryptString,
}

impl Method {
    /// All methods, in declaration order.
    pub const ALL: [Method; 4] = [
        Method::Encrypt,
        Method::EncryptString,
        Method::Decrypt,
        Method::DecryptString,
    ];

    /// Wire-level method name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Method::Encrypt => "encrypt",
            Method::EncryptString => "encryptString",
            Method::Decrypt => "decrypt",
            Method::DecryptString => "decryptString",
        }
    }

    /// Look up a method by its wire-level name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A method name plus its argument bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Wire-level method name
    pub method: String,
    /// Argument bag
    #[serde(default)]
    pub arguments: Arguments,
}

impl MethodCall {
    /// Create a call.
    pub fn new(method: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Outcome of a method call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    /// The call succeeded
    Success {
        /// Method result
        result: Value,
    },
    /// The call failed
    Error {
        /// Machine-readable error kind
        code: String,
        /// Human-readable description
        message: String,
    },
    /// No such method
    NotImplemented,
}

impl MethodResponse {
    /// True for `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success { .. })
    }

    /// The result value, for `Success`.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        match self {
            MethodResponse::Success { result } => Some(result),
            _ => None,
        }
    }

    /// The error code, for `Error`.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            MethodResponse::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<BridgeError> for MethodResponse {
    fn from(err: BridgeError) -> Self {
        MethodResponse::Error {
            code: err.code().to_string(),
            message: err.message,
        }
    }
}

/// Dispatcher for the codec methods.
///
/// Stateless; one instance may serve any number of threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodecChannel;

impl CodecChannel {
    /// Create a dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handle one call.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        let Some(method) = Method::from_name(&call.method) else {
            debug!(method = %call.method, "method not implemented");
            return MethodResponse::NotImplemented;
        };

        debug!(%method, arguments = call.arguments.len(), "dispatching method call");

        match self.invoke(method, &call.arguments) {
            Ok(result) => MethodResponse::Success { result },
            Err(err) => {
                if err.kind.is_validation() {
                    debug!(%method, kind = %err.kind, "rejected method call");
                } else {
                    warn!(%method, kind = %err.kind, "method call failed");
                }
                err.into()
            }
        }
    }

    /// Handle one JSON-encoded [`MethodCall`], answering with a JSON-encoded
    /// [`MethodResponse`].
    ///
    /// Unparseable input becomes an `InvalidArgument` response rather than
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the response cannot be serialized.
    pub fn handle_json(&self, request: &str) -> serde_json::Result<String> {
        let response = match serde_json::from_str::<MethodCall>(request) {
            Ok(call) => self.handle(&call),
            Err(e) => {
                debug!(error = %e, "malformed method call");
                BridgeError::malformed_call(format!("malformed method call: {e}")).into()
            }
        };
        serde_json::to_string(&response)
    }

    fn invoke(&self, method: Method, args: &Arguments) -> Result<Value, BridgeError> {
        match method {
            Method::Encrypt => {
                let sealed = EncryptRequest::from_arguments(args)?.execute()?;
                Ok(Value::map([
                    ("encrypted", Value::Bytes(sealed.ciphertext)),
                    ("nonce", Value::from(&sealed.nonce.as_bytes()[..])),
                    ("tag", Value::from(&sealed.tag.as_bytes()[..])),
                ]))
            }
            Method::EncryptString => {
                let sealed = EncryptStringRequest::from_arguments(args)?.execute()?;
                Ok(Value::map([
                    ("encrypted", Value::String(sealed.encrypted)),
                    ("nonce", Value::String(sealed.nonce)),
                    ("tag", Value::String(sealed.tag)),
                ]))
            }
            Method::Decrypt => {
                let plaintext = DecryptRequest::from_arguments(args)?.execute()?;
                Ok(Value::Bytes(plaintext))
            }
            Method::DecryptString => {
                let plaintext = DecryptStringRequest::from_arguments(args)?.execute()?;
                Ok(Value::String(plaintext))
            }
        }
    }
}
