#![no_main]
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static REGISTRY: OnceLock<Option<esg_readiness::SchemaRegistry>> = OnceLock::new();

/// Fuzz answer-sheet parsing and replay against the built-in frameworks.
fuzz_target!(|data: &[u8]| {
    let Some(registry) = REGISTRY
        .get_or_init(|| esg_readiness::SchemaRegistry::builtin().ok())
        .as_ref()
    else {
        return;
    };
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(sheet) = esg_readiness::AnswerSheet::from_yaml_str(s) {
            let _ = sheet.start_session(registry);
        }
    }
});
