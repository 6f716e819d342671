//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 라이브러리는 exporter를 설치하지 않으므로, 호스트가 recorder를 설치하지 않으면 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `mcp_audit_`
//! - 모듈명: `model_`, `bom_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(mcp_audit_core::metrics::BOM_DOCUMENTS_TOTAL, "format" => "json").increment(1);
//! ```

use metrics::{Unit, describe_counter};

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 탐지 출처 레이블 키 (env, api)
pub const LABEL_SOURCE: &str = "source";

/// 식별 단계 레이블 키 (exact, prefix, substring, keyword, generic)
pub const LABEL_TIER: &str = "tier";

/// 출력 형식 레이블 키 (json, xml)
pub const LABEL_FORMAT: &str = "format";

/// 컴포넌트 종류 레이블 키 (machine-learning-model, application)
pub const LABEL_COMPONENT_TYPE: &str = "component_type";

// ─── 모델 탐지 메트릭 ──────────────────────────────────────────────

/// 모델 식별 시도 수 (counter, label: tier)
pub const MODEL_IDENTIFICATIONS_TOTAL: &str = "mcp_audit_model_identifications_total";

/// 탐지된 모델 수 (counter, label: source)
pub const MODEL_DETECTIONS_TOTAL: &str = "mcp_audit_model_detections_total";

// ─── BOM 메트릭 ────────────────────────────────────────────────────

/// 생성된 BOM 문서 수 (counter, label: format)
pub const BOM_DOCUMENTS_TOTAL: &str = "mcp_audit_bom_documents_total";

/// BOM에 포함된 컴포넌트 수 (counter, label: component_type)
pub const BOM_COMPONENTS_TOTAL: &str = "mcp_audit_bom_components_total";

/// 대상 컴포넌트가 없어 생략된 의존성 엣지 수 (counter)
pub const BOM_DEPENDENCIES_DROPPED_TOTAL: &str = "mcp_audit_bom_dependencies_dropped_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// recorder 설치 직후 한 번 호출합니다. recorder가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    describe_counter!(
        MODEL_IDENTIFICATIONS_TOTAL,
        Unit::Count,
        "Model identifier lookups by matching tier"
    );
    describe_counter!(
        MODEL_DETECTIONS_TOTAL,
        Unit::Count,
        "Models detected from MCP configuration by source"
    );
    describe_counter!(
        BOM_DOCUMENTS_TOTAL,
        Unit::Count,
        "AI-BOM documents serialized by output format"
    );
    describe_counter!(
        BOM_COMPONENTS_TOTAL,
        Unit::Count,
        "Components emitted into AI-BOM documents"
    );
    describe_counter!(
        BOM_DEPENDENCIES_DROPPED_TOTAL,
        Unit::Count,
        "Dependency edges omitted because a referenced component was excluded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_use_prefix_and_suffix() {
        for name in [
            MODEL_IDENTIFICATIONS_TOTAL,
            MODEL_DETECTIONS_TOTAL,
            BOM_DOCUMENTS_TOTAL,
            BOM_COMPONENTS_TOTAL,
            BOM_DEPENDENCIES_DROPPED_TOTAL,
        ] {
            assert!(name.starts_with("mcp_audit_"), "{name}");
            assert!(name.ends_with("_total"), "{name}");
        }
    }

    #[test]
    fn describe_all_without_recorder_is_noop() {
        describe_all();
    }
}
