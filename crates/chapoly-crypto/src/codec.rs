//! The four codec operations.
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`encrypt`] | bytes + 32-byte key | [`SealedOutput`] |
//! | [`decrypt`] | ciphertext, key, nonce, tag bytes | plaintext bytes |
//! | [`encrypt_text`] | string + encoded key | [`EncodedSealedOutput`] |
//! | [`decrypt_text`] | encoded ciphertext, key, nonce, tag | UTF-8 string |
//!
//! Each call is independent: no state survives between calls except the
//! process-wide OS CSPRNG used for nonces.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::CodecError;
use crate::aead::{self, SealedOutput};
use crate::encoding::Encoding;

/// A [`SealedOutput`] with every field rendered in one text encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSealedOutput {
    /// Encoded ciphertext
    pub encrypted: String,
    /// Encoded 12-byte nonce
    pub nonce: String,
    /// Encoded 16-byte tag
    pub tag: String,
}

impl SealedOutput {
    /// Render nonce, ciphertext and tag in `encoding`.
    #[must_use]
    pub fn encode(&self, encoding: Encoding) -> EncodedSealedOutput {
        EncodedSealedOutput {
            encrypted: encoding.encode(&self.ciphertext),
            nonce: encoding.encode(self.nonce.as_bytes()),
            tag: encoding.encode(self.tag.as_bytes()),
        }
    }
}

/// Encrypt raw bytes.
///
/// # Errors
///
/// Returns `CodecError::InvalidKeyLength` for a key that is not 32 bytes and
/// `CodecError::RandomFailed` / `CodecError::EncryptionFailed` if sealing
/// fails.
pub fn encrypt(data: &[u8], key: &[u8]) -> Result<SealedOutput, CodecError> {
    aead::seal(data, key)
}

/// Decrypt raw bytes.
///
/// # Errors
///
/// Returns a length error for a wrong-sized key, nonce or tag, and
/// `CodecError::AuthenticationFailed` if the tag does not verify.
pub fn decrypt(
    encrypted: &[u8],
    key: &[u8],
    nonce: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CodecError> {
    aead::open(nonce, encrypted, tag, key)
}

/// Encrypt the UTF-8 bytes of `string`.
///
/// The key is decoded with `key_encoding`; nonce, ciphertext and tag are
/// returned in `output_encoding`.
///
/// # Errors
///
/// Returns `CodecError::MalformedText` if the key text does not decode,
/// `CodecError::InvalidKeyLength` if it decodes to anything but 32 bytes,
/// and any error from [`encrypt`].
pub fn encrypt_text(
    string: &str,
    key: &str,
    key_encoding: Encoding,
    output_encoding: Encoding,
) -> Result<EncodedSealedOutput, CodecError> {
    let key = Zeroizing::new(key_encoding.decode("key", key)?);
    let sealed = encrypt(string.as_bytes(), &key)?;
    Ok(sealed.encode(output_encoding))
}

/// Decrypt text-encoded fields back to a UTF-8 string.
///
/// All four inputs, key included, are decoded with `input_encoding`.
/// Decoding happens in the order ciphertext, key, nonce, tag; the first
/// malformed field is the one reported.
///
/// # Errors
///
/// Returns `CodecError::MalformedText` for undecodable text, a length error
/// for a wrong-sized field, `CodecError::AuthenticationFailed` if the tag
/// does not verify, and `CodecError::InvalidUtf8` if the authentic plaintext
/// is not UTF-8.
pub fn decrypt_text(
    encrypted_string: &str,
    key: &str,
    nonce: &str,
    tag: &str,
    input_encoding: Encoding,
) -> Result<String, CodecError> {
    let ciphertext = input_encoding.decode("encryptedString", encrypted_string)?;
    let key = Zeroizing::new(input_encoding.decode("key", key)?);
    let nonce = input_encoding.decode("nonce", nonce)?;
    let tag = input_encoding.decode("tag", tag)?;

    let plaintext = decrypt(&ciphertext, &key, &nonce, &tag)?;
    String::from_utf8(plaintext).map_err(|e| {
        e.into_bytes().zeroize();
        CodecError::InvalidUtf8
    })
}
