//! Validated, typed inputs for each method.
//!
//! Each request borrows from the argument bag it was parsed from. Parsing
//! checks presence and kind of every field, and for the text methods the
//! encoding tags, in the order the fields are listed here; the first failure
//! wins. Length checks are left to the codec.

use chapoly_crypto::{
    EncodedSealedOutput, Encoding, SealedOutput, decrypt, decrypt_text, encrypt, encrypt_text,
};

use crate::error::BridgeError;
use crate::value::Arguments;

/// `encrypt`: raw plaintext and key.
#[derive(Debug)]
pub struct EncryptRequest<'a> {
    /// Plaintext bytes
    pub data: &'a [u8],
    /// 32-byte key
    pub key: &'a [u8],
}

impl<'a> EncryptRequest<'a> {
    /// Parse from an argument bag.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming the first missing or wrong-kind field.
    pub fn from_arguments(args: &'a Arguments) -> Result<Self, BridgeError> {
        Ok(Self {
            data: args.bytes("data")?,
            key: args.bytes("key")?,
        })
    }

    /// Run the operation.
    ///
    /// # Errors
    ///
    /// Any codec failure, converted to a [`BridgeError`].
    pub fn execute(&self) -> Result<SealedOutput, BridgeError> {
        Ok(encrypt(self.data, self.key)?)
    }
}

/// `encryptString`: text plaintext, encoded key, two encoding tags.
#[derive(Debug)]
pub struct EncryptStringRequest<'a> {
    /// Encoding of `key`
    pub key_encoding: Encoding,
    /// Encoding of the returned fields
    pub output_encoding: Encoding,
    /// Encoded key
    pub key: &'a str,
    /// Plaintext
    pub string: &'a str,
}

impl<'a> EncryptStringRequest<'a> {
    /// Parse from an argument bag.
    ///
    /// Both encoding tags are checked before the key and plaintext.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a missing or wrong-kind field, `EncodingError`
    /// for an unrecognized encoding tag.
    pub fn from_arguments(args: &'a Arguments) -> Result<Self, BridgeError> {
        let key_encoding = args.string("keyEncoding")?;
        let output_encoding = args.string("outputEncoding")?;
        let key_encoding = Encoding::parse("keyEncoding", key_encoding)?;
        let output_encoding = Encoding::parse("outputEncoding", output_encoding)?;

        Ok(Self {
            key_encoding,
            output_encoding,
            key: args.string("key")?,
            string: args.string("string")?,
        })
    }

    /// Run the operation.
    ///
    /// # Errors
    ///
    /// Any codec failure, converted to a [`BridgeError`].
    pub fn execute(&self) -> Result<EncodedSealedOutput, BridgeError> {
        Ok(encrypt_text(
            self.string,
            self.key,
            self.key_encoding,
            self.output_encoding,
        )?)
    }
}

/// `decrypt`: raw ciphertext, key, nonce and tag.
#[derive(Debug)]
pub struct DecryptRequest<'a> {
    /// Ciphertext bytes
    pub encrypted: &'a [u8],
    /// 32-byte key
    pub key: &'a [u8],
    /// 12-byte nonce
    pub nonce: &'a [u8],
    /// 16-byte tag
    pub tag: &'a [u8],
}

impl<'a> DecryptRequest<'a> {
    /// Parse from an argument bag.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming the first missing or wrong-kind field.
    pub fn from_arguments(args: &'a Arguments) -> Result<Self, BridgeError> {
        Ok(Self {
            encrypted: args.bytes("encrypted")?,
            key: args.bytes("key")?,
            nonce: args.bytes("nonce")?,
            tag: args.bytes("tag")?,
        })
    }

    /// Run the operation.
    ///
    /// # Errors
    ///
    /// Any codec failure, converted to a [`BridgeError`].
    pub fn execute(&self) -> Result<Vec<u8>, BridgeError> {
        Ok(decrypt(self.encrypted, self.key, self.nonce, self.tag)?)
    }
}

/// `decryptString`: encoded ciphertext, key, nonce and tag, one encoding tag.
#[derive(Debug)]
pub struct DecryptStringRequest<'a> {
    /// Encoding of every other field
    pub input_encoding: Encoding,
    /// Encoded ciphertext
    pub encrypted_string: &'a str,
    /// Encoded key
    pub key: &'a str,
    /// Encoded nonce
    pub nonce: &'a str,
    /// Encoded tag
    pub tag: &'a str,
}

impl<'a> DecryptStringRequest<'a> {
    /// Parse from an argument bag.
    ///
    /// The encoding tag is checked before any other field.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a missing or wrong-kind field, `EncodingError`
    /// for an unrecognized encoding tag.
    pub fn from_arguments(args: &'a Arguments) -> Result<Self, BridgeError> {
        let input_encoding = Encoding::parse("inputEncoding", args.string("inputEncoding")?)?;

        Ok(Self {
            input_encoding,
            encrypted_string: args.string("encryptedString")?,
            key: args.string("key")?,
            nonce: args.string("nonce")?,
            tag: args.string("tag")?,
        })
    }

    /// Run the operation.
    ///
    /// # Errors
    ///
    /// Any codec failure, converted to a [`BridgeError`].
    pub fn execute(&self) -> Result<String, BridgeError> {
        Ok(decrypt_text(
            self.encrypted_string,
            self.key,
            self.nonce,
            self.tag,
            self.input_encoding,
        )?)
    }
}
