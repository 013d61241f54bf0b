//! Fuzz target for the text codec
//!
//! Arbitrary strings in every encoded field must produce an error, never a
//! panic, in both encodings.

#![no_main]

use arbitrary::Arbitrary;
use chapoly_crypto::{Encoding, decrypt_text, encrypt_text};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct TextInput<'a> {
    encrypted: &'a str,
    key: &'a str,
    nonce: &'a str,
    tag: &'a str,
    base64: bool,
}

fuzz_target!(|input: TextInput<'_>| {
    let encoding = if input.base64 {
        Encoding::Base64
    } else {
        Encoding::Hex
    };

    let _ = decrypt_text(input.encrypted, input.key, input.nonce, input.tag, encoding);
    let _ = encrypt_text(input.encrypted, input.key, encoding, encoding);
    let _ = encoding.decode("field", input.encrypted);
});
