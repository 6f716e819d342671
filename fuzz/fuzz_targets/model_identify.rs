#![no_main]

use libfuzzer_sys::fuzz_target;
use mcp_audit_ai_bom::{ModelIdentifier, infer_provider_from_endpoint};

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = std::str::from_utf8(data) {
        let identifier = ModelIdentifier::builtin();
        match identifier.identify(model) {
            Some(info) => {
                assert!(!model.trim().is_empty());
                assert!(!info.provider.is_empty());
            }
            None => assert!(model.trim().is_empty()),
        }

        if let Some(info) = infer_provider_from_endpoint(model) {
            assert!(!info.provider.is_empty());
        }
    }
});
