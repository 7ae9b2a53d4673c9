#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the full interpretation path.
///
/// Arbitrary bodies must always produce a result: envelope unwrapping,
/// shape detection and decoding may reject input but never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let result = esg_readiness::interpret_response(s);
        if let Some(score) = result.overall_score {
            assert!((0.0..=100.0).contains(&score));
        }
    }
});
