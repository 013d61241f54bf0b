//! Fuzz target for the JSON method channel
//!
//! Any input must yield a serializable response.

#![no_main]

use chapoly_bridge::CodecChannel;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = std::str::from_utf8(data) {
        let response = CodecChannel::new().handle_json(request);
        assert!(response.is_ok());
    }
});
