//! Integration tests across the codec and the method channel.
//!
//! Each scenario is exercised twice: through the typed codec functions and
//! through the string-keyed method channel a host would use.

use chapoly_bridge::{Arguments, MethodResponse, Value};
use chapoly_crypto::{
    CodecError, Encoding, ErrorKind, decrypt, decrypt_text, encrypt, encrypt_text,
};
use chapoly_integration_tests::{call, flip_bit, random_key};

const ZERO_KEY_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn result_map(response: &MethodResponse) -> &std::collections::BTreeMap<String, Value> {
    response
        .result()
        .and_then(Value::as_map)
        .expect("success with a map result")
}

// ============================================================================
// Text Round-Trip
// ============================================================================

/// Zero key, "hello", hex key, base64 output: round-trips and has the
/// expected encoded lengths.
#[test]
fn test_text_roundtrip_zero_key() {
    let sealed = encrypt_text("hello", ZERO_KEY_HEX, Encoding::Hex, Encoding::Base64).unwrap();
    assert_eq!(sealed.nonce.len(), 16);
    assert_eq!(sealed.tag.len(), 24);
    assert_eq!(sealed.encrypted.len(), 8);

    let zero_key_b64 = Encoding::Base64.encode(&[0u8; 32]);
    let opened = decrypt_text(
        &sealed.encrypted,
        &zero_key_b64,
        &sealed.nonce,
        &sealed.tag,
        Encoding::Base64,
    )
    .unwrap();
    assert_eq!(opened, "hello");
}

#[test]
fn test_text_roundtrip_zero_key_via_channel() {
    let response = call(
        "encryptString",
        Arguments::new()
            .with("string", "hello")
            .with("key", ZERO_KEY_HEX)
            .with("keyEncoding", "hex")
            .with("outputEncoding", "base64"),
    );
    let sealed = result_map(&response);

    let response = call(
        "decryptString",
        Arguments::new()
            .with("encryptedString", sealed["encrypted"].clone())
            .with("key", Encoding::Base64.encode(&[0u8; 32]))
            .with("nonce", sealed["nonce"].clone())
            .with("tag", sealed["tag"].clone())
            .with("inputEncoding", "base64"),
    );
    assert_eq!(response.result(), Some(&Value::from("hello")));
}

// ============================================================================
// Tamper Detection
// ============================================================================

/// One altered tag byte fails authentication.
#[test]
fn test_altered_tag_fails() {
    let key = random_key();
    let sealed = encrypt(b"integrity matters", &key).unwrap();

    let mut tag = *sealed.tag.as_bytes();
    tag[7] = tag[7].wrapping_add(1);

    let err = decrypt(&sealed.ciphertext, &key, sealed.nonce.as_bytes(), &tag).unwrap_err();
    assert!(matches!(err, CodecError::AuthenticationFailed));
    assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
}

#[test]
fn test_altered_tag_fails_via_channel() {
    let key = random_key();
    let response = call(
        "encrypt",
        Arguments::new()
            .with("data", b"integrity matters".to_vec())
            .with("key", key.to_vec()),
    );
    let sealed = result_map(&response);

    let mut tag = sealed["tag"].as_bytes().unwrap().to_vec();
    tag[0] ^= 0xFF;

    let response = call(
        "decrypt",
        Arguments::new()
            .with("encrypted", sealed["encrypted"].clone())
            .with("key", key.to_vec())
            .with("nonce", sealed["nonce"].clone())
            .with("tag", tag),
    );
    assert_eq!(response.error_code(), Some("AuthenticationFailed"));
}

#[test]
fn test_every_field_is_authenticated() {
    let key = random_key();
    let sealed = encrypt(b"sixteen byte msg", &key).unwrap();

    for bit in [0, 9, 63, 127] {
        let mut ciphertext = sealed.ciphertext.clone();
        flip_bit(&mut ciphertext, bit);
        let err = decrypt(&ciphertext, &key, sealed.nonce.as_bytes(), sealed.tag.as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);

        let mut nonce = *sealed.nonce.as_bytes();
        flip_bit(&mut nonce, bit);
        let err = decrypt(&sealed.ciphertext, &key, &nonce, sealed.tag.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);

        let mut tag = *sealed.tag.as_bytes();
        flip_bit(&mut tag, bit);
        let err = decrypt(&sealed.ciphertext, &key, sealed.nonce.as_bytes(), &tag).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
    }
}

#[test]
fn test_wrong_key_fails() {
    let sealed = encrypt(b"for one key only", &random_key()).unwrap();
    let err = decrypt(
        &sealed.ciphertext,
        &random_key(),
        sealed.nonce.as_bytes(),
        sealed.tag.as_bytes(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
}

// ============================================================================
// Encoding Validation
// ============================================================================

/// An unsupported key encoding is rejected before any key processing.
#[test]
fn test_unsupported_key_encoding() {
    let response = call(
        "encryptString",
        Arguments::new()
            .with("string", "hello")
            .with("key", "not even a key")
            .with("keyEncoding", "base32")
            .with("outputEncoding", "hex"),
    );
    match response {
        MethodResponse::Error { code, message } => {
            assert_eq!(code, "EncodingError");
            assert!(message.contains("keyEncoding"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

/// Unsupported output and input encodings are rejected on both text methods.
#[test]
fn test_unsupported_output_and_input_encodings() {
    let response = call(
        "encryptString",
        Arguments::new()
            .with("string", "hello")
            .with("key", ZERO_KEY_HEX)
            .with("keyEncoding", "hex")
            .with("outputEncoding", "base32"),
    );
    assert_eq!(response.error_code(), Some("EncodingError"));

    let sealed = encrypt_text("hello", ZERO_KEY_HEX, Encoding::Hex, Encoding::Hex).unwrap();
    let args = Arguments::new()
        .with("encryptedString", sealed.encrypted.as_str())
        .with("key", ZERO_KEY_HEX)
        .with("nonce", sealed.nonce.as_str())
        .with("tag", sealed.tag.as_str());

    let response = call("decryptString", args.clone().with("inputEncoding", "base32"));
    match response {
        MethodResponse::Error { code, message } => {
            assert_eq!(code, "EncodingError");
            assert!(message.contains("inputEncoding"));
        }
        other => panic!("expected error, got {other:?}"),
    }

    let response = call("decryptString", args);
    assert_eq!(
        response,
        MethodResponse::Error {
            code: "InvalidArgument".to_string(),
            message: "Parameter 'inputEncoding' is missing or invalid".to_string(),
        }
    );
}

#[test]
fn test_malformed_text_is_encoding_error() {
    let sealed = encrypt_text("x", ZERO_KEY_HEX, Encoding::Hex, Encoding::Hex).unwrap();

    let err = decrypt_text("abc", ZERO_KEY_HEX, &sealed.nonce, &sealed.tag, Encoding::Hex)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingError);

    let err = decrypt_text("aGVsbG8", ZERO_KEY_HEX, "", "", Encoding::Base64).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingError);
}

#[test]
fn test_hex_fields_accept_uppercase() {
    let sealed = encrypt_text("case", ZERO_KEY_HEX, Encoding::Hex, Encoding::Hex).unwrap();
    let opened = decrypt_text(
        &sealed.encrypted.to_uppercase(),
        &ZERO_KEY_HEX.to_uppercase(),
        &sealed.nonce.to_uppercase(),
        &sealed.tag.to_uppercase(),
        Encoding::Hex,
    )
    .unwrap();
    assert_eq!(opened, "case");
}

// ============================================================================
// Length Validation
// ============================================================================

#[test]
fn test_length_validation() {
    let key = random_key();
    let sealed = encrypt(b"lengths", &key).unwrap();
    let nonce = sealed.nonce.as_bytes();
    let tag = sealed.tag.as_bytes();

    for len in [0, 31, 33] {
        let err = decrypt(&sealed.ciphertext, &vec![0u8; len], nonce, tag).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKeyLength);
        assert_eq!(
            encrypt(b"", &vec![0u8; len]).unwrap_err().kind(),
            ErrorKind::InvalidKeyLength
        );
    }
    for len in [11, 13] {
        let err = decrypt(&sealed.ciphertext, &key, &vec![0u8; len], tag).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNonceLength);
    }
    for len in [15, 17] {
        let err = decrypt(&sealed.ciphertext, &key, nonce, &vec![0u8; len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTagLength);
    }
}

// ============================================================================
// Channel Behavior
// ============================================================================

#[test]
fn test_missing_argument_names_parameter() {
    let response = call("decrypt", Arguments::new().with("encrypted", vec![1u8]));
    assert_eq!(
        response,
        MethodResponse::Error {
            code: "InvalidArgument".to_string(),
            message: "Parameter 'key' is missing or invalid".to_string(),
        }
    );
}

#[test]
fn test_wrong_kind_argument() {
    let response = call(
        "encrypt",
        Arguments::new().with("data", "text, not bytes").with("key", vec![0u8; 32]),
    );
    assert_eq!(response.error_code(), Some("InvalidArgument"));
}

#[test]
fn test_unknown_method() {
    assert_eq!(
        call("generateKey", Arguments::new()),
        MethodResponse::NotImplemented
    );
}

#[test]
fn test_non_utf8_plaintext_is_decryption_error() {
    let key = random_key();
    let sealed = encrypt(&[0xFF, 0xFE, 0xFD], &key).unwrap().encode(Encoding::Base64);
    let err = decrypt_text(
        &sealed.encrypted,
        &Encoding::Base64.encode(&key),
        &sealed.nonce,
        &sealed.tag,
        Encoding::Base64,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecryptionError);
}

#[test]
fn test_json_channel_roundtrip() {
    let channel = chapoly_bridge::CodecChannel::new();
    let key = hex::encode(random_key());

    let request = serde_json::json!({
        "method": "encryptString",
        "arguments": {
            "string": {"string": "over the wire"},
            "key": {"string": key},
            "keyEncoding": {"string": "hex"},
            "outputEncoding": {"string": "hex"}
        }
    });
    let reply = channel.handle_json(&request.to_string()).unwrap();
    let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["status"], "success");
    let fields = &reply["result"]["map"];

    let request = serde_json::json!({
        "method": "decryptString",
        "arguments": {
            "encryptedString": fields["encrypted"],
            "key": {"string": key},
            "nonce": fields["nonce"],
            "tag": fields["tag"],
            "inputEncoding": {"string": "hex"}
        }
    });
    let reply = channel.handle_json(&request.to_string()).unwrap();
    let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["result"]["string"], "over the wire");
}

#[test]
fn test_concurrent_calls() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let key = random_key();
                let message = format!("thread {i}");
                let sealed = encrypt(message.as_bytes(), &key).unwrap();
                let opened = decrypt(
                    &sealed.ciphertext,
                    &key,
                    sealed.nonce.as_bytes(),
                    sealed.tag.as_bytes(),
                )
                .unwrap();
                assert_eq!(opened, message.as_bytes());
                *sealed.nonce.as_bytes()
            })
        })
        .collect();

    let mut nonces: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    nonces.sort_unstable();
    nonces.dedup();
    assert_eq!(nonces.len(), 8);
}
