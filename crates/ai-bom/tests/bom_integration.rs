//! 스캔 결과 → 모델 탐지 → AI-BOM 생성 통합 테스트

use std::collections::HashSet;
use std::path::PathBuf;

use mcp_audit_ai_bom::bom::ComponentType;
use mcp_audit_ai_bom::{
    BomBuilder, BomDocument, BomFormat, ConfigModelDetector, ScanResult, attach_detected_models,
    load_scan_results,
};
use mcp_audit_core::types::Hosting;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn detected_fixture() -> Vec<ScanResult> {
    let mut results = load_scan_results(&fixture_path("scan_results.json")).unwrap();
    attach_detected_models(&ConfigModelDetector::builtin(), &mut results);
    results
}

/// 모든 bom-ref가 고유하고 모든 엣지가 존재하는 컴포넌트를 가리키는지 확인
fn assert_referentially_sound(doc: &BomDocument) {
    let mut refs = HashSet::new();
    for component in &doc.components {
        assert!(
            refs.insert(component.bom_ref.as_str()),
            "duplicate bom-ref {}",
            component.bom_ref
        );
    }
    for dep in &doc.dependencies {
        assert!(refs.contains(dep.bom_ref.as_str()), "dangling ref {}", dep.bom_ref);
        for target in dep.depends_on.iter().chain(&dep.provides) {
            assert!(refs.contains(target.as_str()), "dangling target {target}");
        }
    }
}

#[test]
fn fixture_models_are_detected() {
    let results = detected_fixture();
    assert_eq!(results.len(), 6);

    let chat = results[0].model.as_ref().unwrap();
    assert_eq!(chat.model_name, "GPT-4o");
    assert_eq!(chat.source, "env:OPENAI_MODEL");
    assert_eq!(chat.mcp_name, "openai-chat");

    let local = results[1].model.as_ref().unwrap();
    assert_eq!(local.model_name, "Code Llama");
    assert_eq!(local.hosting, Hosting::Local);

    let groq = results[2].model.as_ref().unwrap();
    assert_eq!(groq.model_id, "unknown");
    assert_eq!(groq.provider, "Groq");
    assert_eq!(groq.source, "api:https://api.groq.com/openai/v1");

    assert!(results[3].model.is_none());
    assert!(results[5].model.is_none());
}

#[test]
fn json_round_trip_is_referentially_sound() {
    let results = detected_fixture();
    let json = BomBuilder::new()
        .build(&results)
        .unwrap()
        .render(BomFormat::Json)
        .unwrap();

    let parsed: BomDocument = serde_json::from_str(&json).unwrap();
    parsed.validate().unwrap();
    assert_referentially_sound(&parsed);

    // 모델 3종 (gpt-4o 공유), MCP 6개 (filesystem 중복)
    let models = parsed
        .components
        .iter()
        .filter(|c| c.component_type == ComponentType::MachineLearningModel)
        .count();
    assert_eq!(models, 3);
    assert_eq!(parsed.components.len(), 9);
    assert!(parsed.component("mcp:filesystem").is_some());
    assert!(parsed.component("mcp:filesystem#2").is_some());

    let shared = parsed
        .component("model:openai:gpt-4o-2024-08-06")
        .unwrap();
    assert_eq!(shared.property("mcp"), Some("openai-chat,second-chat"));
}

#[test]
fn json_round_trip_preserves_structure() {
    let doc = BomBuilder::new().build(&detected_fixture()).unwrap();
    let parsed: BomDocument = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn models_only_bom_has_no_dangling_edges() {
    let doc = BomBuilder::new()
        .include_mcps(false)
        .build(&detected_fixture())
        .unwrap();
    assert!(
        doc.components
            .iter()
            .all(|c| c.component_type == ComponentType::MachineLearningModel)
    );
    assert_referentially_sound(&doc);
}

#[test]
fn registry_properties_for_known_mcp() {
    let doc = BomBuilder::new().build(&detected_fixture()).unwrap();
    let fs = doc.component("mcp:filesystem").unwrap();
    assert_eq!(fs.property("registry_known"), Some("true"));
    assert_eq!(fs.property("registry_risk"), Some("high"));
    assert_eq!(fs.property("verified"), Some("true"));
    assert_eq!(fs.property("capabilities"), Some("read,write"));

    let fs2 = doc.component("mcp:filesystem#2").unwrap();
    assert_eq!(fs2.name, "filesystem");
    assert!(fs2.property("registry_known").is_none());
}

#[test]
fn xml_output_is_well_formed_enough() {
    let xml = BomBuilder::new()
        .build(&detected_fixture())
        .unwrap()
        .render(BomFormat::Xml)
        .unwrap();

    assert_eq!(
        xml.matches("<component type=").count(),
        xml.matches("</component>").count()
    );
    assert!(xml.contains(r#"xmlns="http://cyclonedx.org/schema/bom/1.6""#));
    assert!(xml.contains(r#"<component type="application" bom-ref="mcp:filesystem#2">"#));
    assert!(xml.contains("<name>Code Llama</name>"));
    assert!(xml.contains("<dependencies>"));
}

#[test]
fn empty_input_builds_valid_document() {
    let doc = BomBuilder::new().build(&[]).unwrap();
    assert!(doc.components.is_empty());
    assert!(doc.dependencies.is_empty());
    let json = doc.to_json().unwrap();
    let parsed: BomDocument = serde_json::from_str(&json).unwrap();
    parsed.validate().unwrap();
}
