#![no_main]

use libfuzzer_sys::fuzz_target;
use mcp_audit_ai_bom::{ConfigModelDetector, attach_detected_models, parse_scan_results};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(mut results) = parse_scan_results(content, "fuzz/scan.json") {
            attach_detected_models(&ConfigModelDetector::builtin(), &mut results);
        }
    }
});
