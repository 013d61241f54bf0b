//! # chapoly-bridge - method-channel adapter
//!
//! Exposes the chapoly codec to a host that speaks in method names and
//! dynamically typed argument bags (a mobile platform channel, an RPC
//! shim, a JSON pipe).
//!
//! ## Methods
//!
//! | Method | Arguments | Result |
//! |--------|-----------|--------|
//! | `encrypt` | `data`, `key` (bytes) | map `{encrypted, nonce, tag}` of bytes |
//! | `encryptString` | `string`, `key`, `keyEncoding`, `outputEncoding` | map `{encrypted, nonce, tag}` of strings |
//! | `decrypt` | `encrypted`, `key`, `nonce`, `tag` (bytes) | bytes |
//! | `decryptString` | `encryptedString`, `key`, `nonce`, `tag`, `inputEncoding` | string |
//!
//! Any other method name answers [`MethodResponse::NotImplemented`].
//!
//! ## Error Handling
//!
//! Failures are returned as [`MethodResponse::Error`] carrying the
//! [`ErrorKind`](chapoly_crypto::ErrorKind) code and a message. Messages
//! never contain key material, plaintext or ciphertext.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod error;
pub mod request;
pub mod value;

pub use channel::{CodecChannel, Method, MethodCall, MethodResponse};
pub use error::BridgeError;
pub use request::{DecryptRequest, DecryptStringRequest, EncryptRequest, EncryptStringRequest};
pub use value::{Arguments, Value};

/// Initialize logging for hosts that embed the bridge.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// only the first call installs a subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Library version.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
