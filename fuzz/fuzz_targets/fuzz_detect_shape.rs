#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz shape detection on parsed JSON values.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = esg_readiness::interpret::detect_shape(&value);
    }
});
