//! Fuzz target for the raw-bytes codec
//!
//! Arbitrary-length keys, nonces and tags must be rejected with an error,
//! and well-formed seals must always open.

#![no_main]

use arbitrary::Arbitrary;
use chapoly_crypto::{decrypt, encrypt};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct AeadInput {
    key: Vec<u8>,
    nonce: Vec<u8>,
    tag: Vec<u8>,
    data: Vec<u8>,
}

fuzz_target!(|input: AeadInput| {
    // Arbitrary fields - should never panic
    let _ = decrypt(&input.data, &input.key, &input.nonce, &input.tag);

    if let Ok(sealed) = encrypt(&input.data, &input.key) {
        let opened = decrypt(
            &sealed.ciphertext,
            &input.key,
            sealed.nonce.as_bytes(),
            sealed.tag.as_bytes(),
        );
        assert_eq!(opened.ok().as_deref(), Some(&input.data[..]));
    }
});
