#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

use mcp_audit_ai_bom::{
    ApiDescriptor, BomBuilder, BomDocument, ConfigModelDetector, ScanResult,
    attach_detected_models,
};

/// 퍼저용 구조적 스캔 결과 입력
#[derive(Arbitrary, Debug)]
struct FuzzScanResult {
    name: String,
    server_type: String,
    risk_flags: Vec<String>,
    env: Vec<(String, String)>,
    apis: Vec<String>,
    is_known: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    results: Vec<FuzzScanResult>,
    include_mcps: bool,
}

fuzz_target!(|input: FuzzInput| {
    // 결과 수 제한 (퍼징 성능)
    let mut results: Vec<ScanResult> = input
        .results
        .into_iter()
        .take(64)
        .map(|r| {
            let mut result = ScanResult::new(r.name);
            result.server_type = r.server_type;
            result.risk_flags = r.risk_flags.into_iter().take(8).collect();
            result.env = r
                .env
                .into_iter()
                .take(8)
                .map(|(k, v)| (k, Value::String(v)))
                .collect::<Map<String, Value>>();
            result.apis = r.apis.into_iter().take(4).map(ApiDescriptor::url).collect();
            result.is_known = r.is_known;
            result
        })
        .collect();

    attach_detected_models(&ConfigModelDetector::builtin(), &mut results);

    let builder = BomBuilder::new().include_mcps(input.include_mcps);
    if let Ok(doc) = builder.build(&results) {
        // 생성된 JSON은 다시 읽혀야 하고 무결성 검증을 통과해야 한다
        let json = doc.to_json().expect("built document must serialize");
        let parsed: BomDocument =
            serde_json::from_str(&json).expect("AI-BOM output must be valid JSON");
        parsed.validate().expect("parsed document must stay consistent");

        let _ = doc.to_xml().expect("built document must render as XML");
    }
});
