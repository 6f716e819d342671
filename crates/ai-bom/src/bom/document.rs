//! CycloneDX 1.6 AI-BOM 문서 구조
//!
//! JSON 직렬화는 이 구조를 그대로 덤프합니다. 역직렬화도 지원하므로
//! 생성된 문서를 다시 읽어 무결성을 검증할 수 있습니다.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AiBomError;

/// CycloneDX JSON 스키마 URL
pub const SCHEMA_URL: &str = "http://cyclonedx.org/schema/bom-1.6.schema.json";

/// CycloneDX 사양 버전
pub const SPEC_VERSION: &str = "1.6";

/// BOM 루트 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomDocument {
    /// JSON 스키마 URL
    #[serde(rename = "$schema")]
    pub schema: String,
    /// 항상 "CycloneDX"
    pub bom_format: String,
    /// 사양 버전
    pub spec_version: String,
    /// `urn:uuid:<uuid v4>`
    pub serial_number: String,
    /// 문서 버전
    pub version: u32,
    /// 메타데이터
    pub metadata: Metadata,
    /// 컴포넌트 (모델 먼저, 그 다음 MCP)
    pub components: Vec<Component>,
    /// 의존성 엣지
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// 문서 메타데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// 생성 시각 (RFC3339, UTC)
    pub timestamp: String,
    /// 생성 도구
    pub tools: Tools,
    /// 루트 환경 컴포넌트
    pub component: MetadataComponent,
}

/// 생성 도구 목록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tools {
    pub components: Vec<ToolComponent>,
}

/// 생성 도구 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolComponent {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub version: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReference>,
}

/// 루트 환경 컴포넌트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataComponent {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
    pub description: String,
}

/// 컴포넌트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    /// MCP 서버, 도구
    Application,
    /// AI 모델
    MachineLearningModel,
}

impl ComponentType {
    /// CycloneDX 타입 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::MachineLearningModel => "machine-learning-model",
        }
    }
}

/// BOM 컴포넌트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// 문서 내 고유 참조
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 이름/값 속성 (순서 유지)
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_card: Option<ModelCard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReference>,
}

impl Component {
    /// 이름으로 속성 값을 찾습니다.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// 공급자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
}

/// 이름/값 속성
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
        }
    }
}

/// 모델 카드 (키워드 휴리스틱으로 추론)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCard {
    pub model_architecture: String,
    pub model_parameters: ModelParameters,
    pub considerations: Considerations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Considerations {
    pub environmental_considerations: EnvironmentalConsiderations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalConsiderations {
    pub energy_consumption: String,
}

/// 외부 참조 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalReferenceType {
    /// 제공자 API 배포 지점
    Distribution,
    /// 프로젝트 웹사이트
    Website,
    /// 그 외 (MCP가 호출하는 API)
    Other,
}

impl ExternalReferenceType {
    /// CycloneDX 참조 타입 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::Website => "website",
            Self::Other => "other",
        }
    }
}

/// 외부 참조
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    #[serde(rename = "type")]
    pub reference_type: ExternalReferenceType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// 의존성 엣지
///
/// `depends_on`과 `provides` 중 하나만 채워집니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,
}

impl Dependency {
    /// `ref`와 모든 대상 참조를 순회합니다.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.depends_on
            .iter()
            .chain(self.provides.iter())
            .map(String::as_str)
    }
}

impl BomDocument {
    /// bom-ref로 컴포넌트를 찾습니다.
    pub fn component(&self, bom_ref: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.bom_ref == bom_ref)
    }

    /// 문서 무결성을 검증합니다.
    ///
    /// - `serialNumber`가 `urn:uuid:<uuid>` 형식
    /// - 모든 bom-ref가 문서 내에서 고유
    /// - 모든 의존성 엣지의 `ref`와 대상이 존재하는 컴포넌트
    pub fn validate(&self) -> Result<(), AiBomError> {
        let valid_serial = self
            .serial_number
            .strip_prefix("urn:uuid:")
            .is_some_and(|id| uuid::Uuid::parse_str(id).is_ok());
        if !valid_serial {
            return Err(AiBomError::InvalidSerialNumber(self.serial_number.clone()));
        }

        let mut refs = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if !refs.insert(component.bom_ref.as_str()) {
                return Err(AiBomError::DuplicateBomRef(component.bom_ref.clone()));
            }
        }

        for dep in &self.dependencies {
            for target in std::iter::once(dep.bom_ref.as_str()).chain(dep.targets()) {
                if !refs.contains(target) {
                    return Err(AiBomError::DanglingReference {
                        from: dep.bom_ref.clone(),
                        to: target.to_owned(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(bom_ref: &str) -> Component {
        Component {
            component_type: ComponentType::Application,
            bom_ref: bom_ref.to_owned(),
            name: bom_ref.to_owned(),
            version: None,
            supplier: None,
            description: None,
            properties: vec![Property::new("source", "test")],
            model_card: None,
            external_references: vec![],
        }
    }

    fn document(components: Vec<Component>, dependencies: Vec<Dependency>) -> BomDocument {
        BomDocument {
            schema: SCHEMA_URL.to_owned(),
            bom_format: "CycloneDX".to_owned(),
            spec_version: SPEC_VERSION.to_owned(),
            serial_number: "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79".to_owned(),
            version: 1,
            metadata: Metadata {
                timestamp: "2026-01-01T00:00:00.000Z".to_owned(),
                tools: Tools { components: vec![] },
                component: MetadataComponent {
                    component_type: ComponentType::Application,
                    name: "mcp-environment".to_owned(),
                    description: String::new(),
                },
            },
            components,
            dependencies,
        }
    }

    fn edge(from: &str, depends_on: &[&str]) -> Dependency {
        Dependency {
            bom_ref: from.to_owned(),
            depends_on: depends_on.iter().map(|s| (*s).to_owned()).collect(),
            provides: vec![],
        }
    }

    #[test]
    fn valid_document_passes() {
        let doc = document(
            vec![component("model:openai:gpt-4o"), component("mcp:chat")],
            vec![edge("model:openai:gpt-4o", &["mcp:chat"])],
        );
        doc.validate().unwrap();
    }

    #[test]
    fn duplicate_bom_ref_rejected() {
        let doc = document(vec![component("mcp:fs"), component("mcp:fs")], vec![]);
        let err = doc.validate().unwrap_err();
        assert!(matches!(err, AiBomError::DuplicateBomRef(ref r) if r == "mcp:fs"));
    }

    #[test]
    fn dangling_target_rejected() {
        let doc = document(
            vec![component("model:openai:gpt-4o")],
            vec![edge("model:openai:gpt-4o", &["mcp:gone"])],
        );
        let err = doc.validate().unwrap_err();
        assert!(matches!(err, AiBomError::DanglingReference { ref to, .. } if to == "mcp:gone"));
    }

    #[test]
    fn dangling_source_rejected() {
        let doc = document(vec![component("mcp:chat")], vec![edge("mcp:gone", &["mcp:chat"])]);
        assert!(matches!(
            doc.validate().unwrap_err(),
            AiBomError::DanglingReference { ref from, .. } if from == "mcp:gone"
        ));
    }

    #[test]
    fn malformed_serial_rejected() {
        let mut doc = document(vec![], vec![]);
        doc.serial_number = "urn:uuid:not-a-uuid".to_owned();
        assert!(matches!(
            doc.validate().unwrap_err(),
            AiBomError::InvalidSerialNumber(_)
        ));
        doc.serial_number = String::new();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn component_type_kebab_case() {
        let json = serde_json::to_string(&ComponentType::MachineLearningModel).unwrap();
        assert_eq!(json, "\"machine-learning-model\"");
        assert_eq!(ComponentType::MachineLearningModel.as_str(), "machine-learning-model");
    }

    #[test]
    fn dependency_omits_empty_lists() {
        let json = serde_json::to_value(edge("mcp:a", &[])).unwrap();
        assert_eq!(json, serde_json::json!({"ref": "mcp:a"}));
    }

    #[test]
    fn component_property_lookup() {
        let c = component("mcp:x");
        assert_eq!(c.property("source"), Some("test"));
        assert_eq!(c.property("missing"), None);
    }
}
