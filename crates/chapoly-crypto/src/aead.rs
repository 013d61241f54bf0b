//! `ChaCha20-Poly1305` AEAD with detached tags.
//!
//! Provides the two primitives every codec operation funnels through:
//! - [`seal`]: fresh random nonce, encrypt, return `(nonce, ciphertext, tag)`
//! - [`open`]: verify the tag in constant time, then decrypt
//!
//! ## Layout
//!
//! The nonce, ciphertext and tag never share a buffer. The ciphertext is
//! exactly as long as the plaintext; the tag is produced separately by
//! `encrypt_in_place_detached` rather than sliced off a combined output.
//!
//! ## Security Properties
//!
//! - Confidentiality: `ChaCha20` stream cipher, 256-bit key
//! - Integrity: Poly1305 MAC with 128-bit tag
//! - Nonce: 96 bits from the OS CSPRNG per seal; a key must never seal twice
//!   under the same nonce
//!
//! ## Usage
//!
//! ```
//! use chapoly_crypto::aead::{open, seal};
//!
//! let key = [0x42u8; 32];
//! let sealed = seal(b"secret", &key)?;
//! let plaintext = open(
//!     sealed.nonce.as_bytes(),
//!     &sealed.ciphertext,
//!     sealed.tag.as_bytes(),
//!     &key,
//! )?;
//! assert_eq!(plaintext, b"secret");
//! # Ok::<(), chapoly_crypto::CodecError>(())
//! ```

use std::fmt;

use chacha20poly1305::{
    ChaCha20Poly1305,
    aead::{AeadInPlace, KeyInit},
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::CodecError;
use crate::random;

/// Authentication tag size (16 bytes / 128 bits).
pub const TAG_SIZE: usize = 16;

/// ChaCha20-Poly1305 nonce size (12 bytes / 96 bits).
pub const NONCE_SIZE: usize = 12;

/// AEAD key size (32 bytes / 256 bits).
pub const KEY_SIZE: usize = 32;

/// Largest message the 32-bit ChaCha20 block counter can cover.
pub const MAX_MESSAGE_SIZE: u64 = 64 * u32::MAX as u64;

/// ChaCha20-Poly1305 nonce (12 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Create a nonce from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a nonce from a slice.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidNonceLength` if slice length is not 12 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; NONCE_SIZE] = slice
            .try_into()
            .map_err(|_| CodecError::InvalidNonceLength {
                expected: NONCE_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Generate a random nonce from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::RandomFailed` if the OS CSPRNG is unavailable.
    pub fn generate() -> Result<Self, CodecError> {
        random::random_nonce().map(Self)
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    fn as_generic(&self) -> &chacha20poly1305::Nonce {
        chacha20poly1305::Nonce::from_slice(&self.0)
    }
}

/// Authentication tag (16 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag([u8; TAG_SIZE]);

impl Tag {
    /// Create a tag from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidTagLength` if slice length is not 16 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; TAG_SIZE] = slice
            .try_into()
            .map_err(|_| CodecError::InvalidTagLength {
                expected: TAG_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }
}

/// AEAD encryption key (32 bytes).
///
/// Key is zeroized on drop and never printed.
#[derive(Clone, ZeroizeOnDrop)]
pub struct AeadKey([u8; KEY_SIZE]);

impl fmt::Debug for AeadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AeadKey(<redacted>)")
    }
}

impl AeadKey {
    /// Create a key from raw bytes.
    #[must_use]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidKeyLength` if slice length is not 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CodecError> {
        if slice.len() != KEY_SIZE {
            return Err(CodecError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Get raw key bytes.
    ///
    /// # Security
    ///
    /// Handle with extreme care - this exposes the raw key material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Seal plaintext under a freshly generated nonce with empty AAD.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::RandomFailed` if no nonce can be drawn, or
    /// `CodecError::EncryptionFailed` if the AEAD rejects the input.
    pub fn seal(&self, plaintext: &[u8]) -> Result<SealedOutput, CodecError> {
        let nonce = Nonce::generate()?;
        self.seal_with_nonce(&nonce, plaintext)
    }

    /// Seal plaintext under a caller-chosen nonce with empty AAD.
    ///
    /// Deterministic: only for known-answer tests. Production callers use
    /// [`AeadKey::seal`].
    ///
    /// # Errors
    ///
    /// Returns `CodecError::EncryptionFailed` if the AEAD rejects the input.
    pub fn seal_with_nonce(
        &self,
        nonce: &Nonce,
        plaintext: &[u8],
    ) -> Result<SealedOutput, CodecError> {
        let (ciphertext, tag) = self.encrypt_detached(nonce, plaintext, &[])?;
        Ok(SealedOutput {
            nonce: *nonce,
            ciphertext,
            tag,
        })
    }

    /// Verify and decrypt a sealed triple with empty AAD.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::AuthenticationFailed` if the tag does not verify.
    pub fn open(&self, sealed: &SealedOutput) -> Result<Vec<u8>, CodecError> {
        self.decrypt_detached(&sealed.nonce, &sealed.ciphertext, &sealed.tag, &[])
    }

    /// Encrypt with associated data, returning ciphertext and tag separately.
    ///
    /// The ciphertext is exactly `plaintext.len()` bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::PlaintextTooLarge` past the block counter range and
    /// `CodecError::EncryptionFailed` if AEAD encryption fails.
    pub fn encrypt_detached(
        &self,
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Tag), CodecError> {
        check_message_size(plaintext.len(), CodecError::PlaintextTooLarge)?;

        let cipher = ChaCha20Poly1305::new((&self.0).into());
        let mut buffer = plaintext.to_vec();

        let tag = cipher
            .encrypt_in_place_detached(nonce.as_generic(), aad, &mut buffer)
            .map_err(|_| CodecError::EncryptionFailed)?;

        let mut tag_bytes = [0u8; TAG_SIZE];
        tag_bytes.copy_from_slice(&tag);
        Ok((buffer, Tag(tag_bytes)))
    }

    /// Verify the tag and decrypt with associated data.
    ///
    /// Nothing is returned unless the tag verifies; the working buffer is
    /// wiped on failure.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::CiphertextTooLarge` past the block counter range
    /// and `CodecError::AuthenticationFailed` on tag mismatch.
    pub fn decrypt_detached(
        &self,
        nonce: &Nonce,
        ciphertext: &[u8],
        tag: &Tag,
        aad: &[u8],
    ) -> Result<Vec<u8>, CodecError> {
        check_message_size(ciphertext.len(), CodecError::CiphertextTooLarge)?;

        let cipher = ChaCha20Poly1305::new((&self.0).into());
        let mut buffer = ciphertext.to_vec();

        match cipher.decrypt_in_place_detached(
            nonce.as_generic(),
            aad,
            &mut buffer,
            chacha20poly1305::Tag::from_slice(&tag.0),
        ) {
            Ok(()) => Ok(buffer),
            Err(_) => {
                buffer.zeroize();
                Err(CodecError::AuthenticationFailed)
            }
        }
    }
}

/// The `(nonce, ciphertext, tag)` triple produced by one seal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedOutput {
    /// Nonce the ciphertext was sealed under
    pub nonce: Nonce,
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
    /// Poly1305 tag
    pub tag: Tag,
}

/// Seal `plaintext` under `key` with a fresh random nonce.
///
/// # Errors
///
/// Returns `CodecError::InvalidKeyLength` if `key` is not 32 bytes, before
/// any nonce is drawn.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<SealedOutput, CodecError> {
    AeadKey::from_slice(key)?.seal(plaintext)
}

/// Verify and decrypt a detached `(nonce, ciphertext, tag)` triple.
///
/// Lengths are checked in the order key, nonce, tag before any
/// cryptographic work.
///
/// # Errors
///
/// Returns `CodecError::InvalidKeyLength`, `CodecError::InvalidNonceLength`
/// or `CodecError::InvalidTagLength` for a wrong field length, and
/// `CodecError::AuthenticationFailed` if the tag does not verify.
pub fn open(nonce: &[u8], ciphertext: &[u8], tag: &[u8], key: &[u8]) -> Result<Vec<u8>, CodecError> {
    let key = AeadKey::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce)?;
    let tag = Tag::from_slice(tag)?;
    key.decrypt_detached(&nonce, ciphertext, &tag, &[])
}

fn check_message_size(len: usize, too_large: fn(u64) -> CodecError) -> Result<(), CodecError> {
    let len = len as u64;
    if len > MAX_MESSAGE_SIZE {
        return Err(too_large(len));
    }
    Ok(())
}
