//! Fuzz target for strategy configuration parsing.
//!
//! Arbitrary JSON and TOML must either parse and validate or return an
//! error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use snc_config::{parse_strategy, ConfigFormat};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for format in [ConfigFormat::Json, ConfigFormat::Toml] {
        if let Ok(config) = parse_strategy(text, format) {
            // Parsed configs are already validated; validation is idempotent.
            assert!(config.validate().is_ok());
        }
    }
});
