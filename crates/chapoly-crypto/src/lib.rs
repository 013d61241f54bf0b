//! # Chapoly Crypto
//!
//! ChaCha20-Poly1305 authenticated encryption for callers that exchange the
//! nonce, ciphertext and tag as three separate fields.
//!
//! This crate provides:
//! - Detached `Seal`/`Open` primitives over a 96-bit random nonce
//! - Fixed-size key, nonce and tag types with length validation
//! - A hex/base64 encoding layer for text-mode callers
//! - The four typed codec operations: [`encrypt`], [`encrypt_text`],
//!   [`decrypt`], [`decrypt_text`]
//! - A single error type whose [`ErrorKind`] is stable across implementations
//!
//! ## Cryptographic Suite
//!
//! | Field | Size | Notes |
//! |-------|------|-------|
//! | Key | 32 bytes | caller-supplied, zeroized on drop |
//! | Nonce | 12 bytes | OS CSPRNG, fresh per seal |
//! | Tag | 16 bytes | Poly1305, constant-time verification |
//! | AAD | 0 bytes | always empty at the codec level |
//!
//! ## Usage
//!
//! ```
//! use chapoly_crypto::{Encoding, decrypt_text, encrypt_text};
//!
//! let key = "00".repeat(32);
//! let sealed = encrypt_text("hello", &key, Encoding::Hex, Encoding::Base64)?;
//! let opened = decrypt_text(
//!     &sealed.encrypted,
//!     &Encoding::Base64.encode(&[0u8; 32]),
//!     &sealed.nonce,
//!     &sealed.tag,
//!     Encoding::Base64,
//! )?;
//! assert_eq!(opened, "hello");
//! # Ok::<(), chapoly_crypto::CodecError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod aead;
pub mod codec;
pub mod encoding;
pub mod error;
pub mod random;

pub use aead::{AeadKey, KEY_SIZE, NONCE_SIZE, Nonce, SealedOutput, TAG_SIZE, Tag, open, seal};
pub use codec::{EncodedSealedOutput, decrypt, decrypt_text, encrypt, encrypt_text};
pub use encoding::Encoding;
pub use error::{CodecError, ErrorKind};
