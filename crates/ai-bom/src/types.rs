//! AI-BOM 도메인 타입
//!
//! 스캔 결과([`ScanResult`]), 탐지된 모델([`DetectedModel`]),
//! API 디스크립터([`ApiDescriptor`]), 카탈로그 조회 결과([`ModelInfo`], [`ProviderInfo`]),
//! 출력 형식([`BomFormat`])을 정의합니다.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use mcp_audit_core::types::Hosting;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 모델 ID를 알 수 없을 때 사용하는 값
pub const UNKNOWN_MODEL_ID: &str = "unknown";

/// 제공자를 알 수 없을 때 사용하는 값
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// 카탈로그 조회 결과 (항상 새로 할당된 복사본)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// 표시 이름 (예: "GPT-4o")
    pub name: String,
    /// 제공자 (예: "OpenAI")
    pub provider: String,
    /// 호스팅 분류
    pub hosting: Hosting,
}

/// 엔드포인트 추론 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    /// 제공자 (예: "Azure OpenAI")
    pub provider: String,
    /// 호스팅 분류
    pub hosting: Hosting,
}

/// MCP 설정에서 탐지된 AI 모델
///
/// 생성 후에는 변경하지 않습니다. MCP 이름 부착 같은 변환은
/// [`DetectedModel::attached_to`]처럼 새 인스턴스를 반환합니다.
///
/// 외부 입력에서 역직렬화할 때 누락된 필드는 기본값으로 채워집니다
/// (`model_id` = "unknown", `provider` = "Unknown", `hosting` = unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedModel {
    /// 설정에서 발견된 원본 문자열 (예: "gpt-4o-2024-08-06")
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// 표시 이름. 비어 있으면 `model_id`를 사용합니다.
    #[serde(default)]
    pub model_name: String,
    /// 제공자
    #[serde(default = "default_provider")]
    pub provider: String,
    /// 호스팅 분류
    #[serde(default)]
    pub hosting: Hosting,
    /// 탐지 출처 (`env:<KEY>` 또는 `api:<url>`)
    #[serde(default)]
    pub source: String,
    /// 이 모델을 사용하는 MCP 이름 (부착 전에는 빈 문자열)
    #[serde(default)]
    pub mcp_name: String,
}

fn default_model_id() -> String {
    UNKNOWN_MODEL_ID.to_owned()
}

fn default_provider() -> String {
    UNKNOWN_PROVIDER.to_owned()
}

impl DetectedModel {
    /// 환경변수 값에서 식별된 모델을 생성합니다.
    pub fn from_env(key: &str, value: &str, info: ModelInfo) -> Self {
        Self {
            model_id: value.to_owned(),
            model_name: info.name,
            provider: info.provider,
            hosting: info.hosting,
            source: format!("env:{key}"),
            mcp_name: String::new(),
        }
    }

    /// API 엔드포인트에서 제공자만 추론된 모델을 생성합니다.
    pub fn from_endpoint(url: &str, info: ProviderInfo) -> Self {
        Self {
            model_id: UNKNOWN_MODEL_ID.to_owned(),
            model_name: format!("Unknown ({})", info.provider),
            provider: info.provider,
            hosting: info.hosting,
            source: format!("api:{url}"),
            mcp_name: String::new(),
        }
    }

    /// MCP 이름이 부착된 새 인스턴스를 반환합니다.
    pub fn attached_to(&self, mcp_name: &str) -> Self {
        Self {
            mcp_name: mcp_name.to_owned(),
            ..self.clone()
        }
    }

    /// 빈 값을 기본값으로 대체한 모델 ID
    pub fn id(&self) -> &str {
        if self.model_id.is_empty() {
            UNKNOWN_MODEL_ID
        } else {
            &self.model_id
        }
    }

    /// 표시 이름. 비어 있으면 모델 ID로 대체합니다.
    pub fn display_name(&self) -> &str {
        if self.model_name.is_empty() {
            self.id()
        } else {
            &self.model_name
        }
    }

    /// 빈 값을 기본값으로 대체한 제공자
    pub fn provider_name(&self) -> &str {
        if self.provider.is_empty() {
            UNKNOWN_PROVIDER
        } else {
            &self.provider
        }
    }

    /// 결정적 bom-ref: `model:<provider 소문자, 공백→하이픈>:<model_id>`
    pub fn bom_ref(&self) -> String {
        format!(
            "model:{}:{}",
            self.provider_name().to_lowercase().replace(' ', "-"),
            self.id()
        )
    }
}

/// 스캔 결과의 API 엔드포인트 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    /// 엔드포인트 URL
    #[serde(default)]
    pub url: String,
    /// 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// API 디스크립터
///
/// 객체 형태는 [`ApiEndpoint`]로, 그 외 값(문자열, 숫자 등)은 원본 그대로 보관하며
/// 매칭 시 문자열로 변환됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiDescriptor {
    /// `{ "url": ..., "description": ... }` 형태
    Endpoint(ApiEndpoint),
    /// 매핑이 아닌 값
    Raw(Value),
}

impl ApiDescriptor {
    /// URL만 가진 디스크립터를 생성합니다.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Endpoint(ApiEndpoint {
            url: url.into(),
            description: None,
        })
    }

    /// 매칭에 사용할 URL 문자열
    pub fn as_url(&self) -> Cow<'_, str> {
        match self {
            Self::Endpoint(endpoint) => Cow::Borrowed(endpoint.url.as_str()),
            Self::Raw(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Self::Raw(other) => Cow::Owned(other.to_string()),
        }
    }

    /// 설명 (없으면 `None`)
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Endpoint(endpoint) => endpoint.description.as_deref(),
            Self::Raw(_) => None,
        }
    }
}

/// 감사 대상 MCP 항목 하나의 스캔 결과
///
/// 외부 스캐너가 생성하며, 이 크레이트는 읽기만 합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// MCP 이름
    pub name: String,
    /// 설정 파일 경로 등 출처
    #[serde(default)]
    pub source: String,
    /// 서버 종류 (npm, python, docker 등)
    #[serde(default)]
    pub server_type: String,
    /// 발견 위치 (Claude Desktop, Cursor 등)
    #[serde(default)]
    pub found_in: String,
    /// 제공자
    #[serde(default)]
    pub provider: Option<String>,
    /// 기능 집합
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// 위험 플래그 집합
    #[serde(default)]
    pub risk_flags: BTreeSet<String>,
    /// API 엔드포인트 목록 (순서 유지)
    #[serde(default)]
    pub apis: Vec<ApiDescriptor>,
    /// 탐지된 모델
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<DetectedModel>,
    /// 외부 레지스트리에 등록된 MCP인지 여부
    #[serde(default)]
    pub is_known: bool,
    /// 레지스트리 검증 여부
    #[serde(default)]
    pub verified: bool,
    /// 레지스트리가 부여한 위험 등급
    #[serde(default)]
    pub registry_risk: Option<String>,
    /// MCP 설정의 환경변수 (설정 파일 순서 유지)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub env: Map<String, Value>,
}

impl ScanResult {
    /// 이름만 가진 스캔 결과를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 빈 값을 "Unknown"으로 대체한 제공자
    pub fn supplier(&self) -> &str {
        match self.provider.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => UNKNOWN_PROVIDER,
        }
    }
}

/// BOM 출력 형식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BomFormat {
    /// CycloneDX JSON (기본값)
    #[default]
    Json,
    /// 최소 CycloneDX XML
    Xml,
}

impl BomFormat {
    /// 문자열에서 형식을 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for BomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
