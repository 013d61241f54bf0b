//! Text encodings for sealed fields.
//!
//! Two representations are supported, selected explicitly on every call:
//! - `hex`: lowercase on output, either case accepted on input, no separators
//! - `base64`: RFC 4648 standard alphabet with canonical `=` padding
//!
//! Decoding never guesses: odd-length hex, a foreign alphabet, missing or
//! extra padding, and non-zero trailing bits are all rejected.

use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Textual representation applied to key, nonce, ciphertext and tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Lowercase hexadecimal
    Hex,
    /// Standard padded base64
    Base64,
}

impl Encoding {
    /// Wire-level tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }

    /// Parse an encoding tag supplied in parameter `field`.
    ///
    /// Tags are matched exactly: `"HEX"` is not `"hex"`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedEncoding` naming `field`.
    pub fn parse(field: &str, value: &str) -> Result<Self, CodecError> {
        match value {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(CodecError::UnsupportedEncoding {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Encode bytes.
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
        }
    }

    /// Decode the text carried in parameter `field`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::MalformedText` naming `field`.
    pub fn decode(self, field: &str, text: &str) -> Result<Vec<u8>, CodecError> {
        let malformed = |reason: String| CodecError::MalformedText {
            field: field.to_string(),
            encoding: self,
            reason,
        };

        match self {
            Self::Hex => hex::decode(text).map_err(|e| malformed(e.to_string())),
            Self::Base64 => STANDARD.decode(text).map_err(|e| malformed(e.to_string())),
        }
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("encoding", s)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_hex_lowercase_no_separators() {
        assert_eq!(Encoding::Hex.encode(&[0x00, 0xAB, 0xff, 0x10]), "00abff10");
        assert_eq!(Encoding::Hex.encode(&[]), "");
    }

    #[test]
    fn test_hex_accepts_either_case() {
        assert_eq!(
            Encoding::Hex.decode("key", "ABcdEF").unwrap(),
            vec![0xAB, 0xCD, 0xEF]
        );
    }

    #[test]
    fn test_hex_rejects_odd_length() {
        let err = Encoding::Hex.decode("nonce", "abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingError);
        assert!(err.to_string().contains("'nonce'"));
    }

    #[test]
    fn test_hex_rejects_foreign_alphabet() {
        assert!(Encoding::Hex.decode("tag", "zz").is_err());
        assert!(Encoding::Hex.decode("tag", "0x00").is_err());
        assert!(Encoding::Hex.decode("tag", "00 11").is_err());
    }

    #[test]
    fn test_base64_padded_standard_alphabet() {
        assert_eq!(Encoding::Base64.encode(b"hello"), "aGVsbG8=");
        assert_eq!(Encoding::Base64.encode(&[0xfb, 0xff]), "+/8=");
        assert_eq!(Encoding::Base64.decode("x", "aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_base64_rejects_bad_padding() {
        for bad in ["aGVsbG8", "aGVsbG8==", "aGVsbG9=", "a===", "-_8="] {
            let err = Encoding::Base64.decode("encryptedString", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EncodingError, "accepted {bad:?}");
        }
    }

    #[test]
    fn test_empty_text_is_empty_bytes() {
        assert!(Encoding::Hex.decode("x", "").unwrap().is_empty());
        assert!(Encoding::Base64.decode("x", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_exact_tags() {
        assert_eq!(Encoding::parse("keyEncoding", "hex").unwrap(), Encoding::Hex);
        assert_eq!(
            Encoding::parse("keyEncoding", "base64").unwrap(),
            Encoding::Base64
        );

        for bad in ["base32", "HEX", "Base64", "", "utf8"] {
            let err = Encoding::parse("outputEncoding", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EncodingError);
            assert!(err.to_string().contains("'outputEncoding'"));
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let enc: Encoding = "base64".parse().unwrap();
        assert_eq!(enc, Encoding::Base64);
        assert_eq!(enc.to_string(), "base64");
        assert!("rot13".parse::<Encoding>().is_err());
    }
}
