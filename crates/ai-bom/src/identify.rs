//! 모델 식별 -- 자유 형식 문자열/엔드포인트에서 모델과 제공자 추론
//!
//! [`ModelIdentifier`]는 네 단계를 고정된 순서로 적용하고 첫 번째 결과를 반환합니다.
//!
//! 1. **Exact**: 카탈로그 키와 정확히 일치
//! 2. **Prefix**: 입력이 카탈로그 키로 시작 (`gpt-4o-2024-08-06` → `gpt-4o`)
//! 3. **Substring**: 입력에 카탈로그 키가 포함 (`anthropic.claude-3-5-sonnet-v2:0`)
//! 4. **Keyword**: 모델 계열 키워드 포함 시 원본 문자열을 이름으로 합성
//!
//! 어느 단계에도 해당하지 않으면 제공자 "Unknown"의 일반 항목을 반환합니다.
//! 빈 문자열(공백만 있는 경우 포함)만 `None`입니다.
//!
//! [`ProviderInferencer`]는 엔드포인트 URL의 부분 문자열로 제공자를 추론합니다.

use std::fmt;

use mcp_audit_core::metrics as m;
use mcp_audit_core::types::Hosting;
use metrics::counter;
use tracing::debug;

use crate::catalog::ModelCatalog;
use crate::types::{ModelInfo, ProviderInfo, UNKNOWN_PROVIDER};

/// 식별에 성공한 매칭 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// 카탈로그 키와 정확히 일치
    Exact,
    /// 카탈로그 키로 시작
    Prefix,
    /// 카탈로그 키를 포함
    Substring,
    /// 모델 계열 키워드
    Keyword,
    /// 일반 항목 (제공자 미상)
    Generic,
}

impl MatchKind {
    /// 소문자 이름 (메트릭 레이블, 출력용)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Substring => "substring",
            Self::Keyword => "keyword",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 식별 결과와 매칭 단계
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// 식별된 모델 정보
    pub info: ModelInfo,
    /// 매칭 단계
    pub kind: MatchKind,
}

/// 식별 단계 하나
///
/// `normalized`는 공백을 제거하고 소문자로 변환한 입력, `original`은 호출자가 넘긴 원본입니다.
pub trait MatchTier: Send + Sync {
    /// 이 단계의 종류
    fn kind(&self) -> MatchKind;

    /// 매칭을 시도합니다.
    fn try_match(&self, catalog: &ModelCatalog, normalized: &str, original: &str)
    -> Option<ModelInfo>;
}

struct ExactTier;

impl MatchTier for ExactTier {
    fn kind(&self) -> MatchKind {
        MatchKind::Exact
    }

    fn try_match(&self, catalog: &ModelCatalog, normalized: &str, _original: &str) -> Option<ModelInfo> {
        catalog.get(normalized).map(|entry| entry.to_model_info())
    }
}

struct PrefixTier;

impl MatchTier for PrefixTier {
    fn kind(&self) -> MatchKind {
        MatchKind::Prefix
    }

    fn try_match(&self, catalog: &ModelCatalog, normalized: &str, _original: &str) -> Option<ModelInfo> {
        catalog
            .models()
            .find(|(key, _)| normalized.starts_with(key))
            .map(|(_, entry)| entry.to_model_info())
    }
}

struct SubstringTier;

impl MatchTier for SubstringTier {
    fn kind(&self) -> MatchKind {
        MatchKind::Substring
    }

    fn try_match(&self, catalog: &ModelCatalog, normalized: &str, _original: &str) -> Option<ModelInfo> {
        catalog
            .models()
            .find(|(key, _)| normalized.contains(key))
            .map(|(_, entry)| entry.to_model_info())
    }
}

/// 모델 계열 키워드 → (제공자, 호스팅)
static FAMILY_KEYWORDS: &[(&[&str], &str, Hosting)] = &[
    (&["llama", "lama"], "Meta", Hosting::Local),
    (&["mistral", "mixtral"], "Mistral AI", Hosting::Local),
    (&["claude"], "Anthropic", Hosting::Cloud),
    (&["gpt"], "OpenAI", Hosting::Cloud),
    (&["gemini", "gemma"], "Google", Hosting::Cloud),
    (&["qwen"], "Alibaba", Hosting::Local),
    (&["deepseek"], "DeepSeek", Hosting::Local),
];

struct KeywordTier;

impl MatchTier for KeywordTier {
    fn kind(&self) -> MatchKind {
        MatchKind::Keyword
    }

    fn try_match(&self, _catalog: &ModelCatalog, normalized: &str, original: &str) -> Option<ModelInfo> {
        FAMILY_KEYWORDS
            .iter()
            .find(|(keywords, _, _)| keywords.iter().any(|kw| normalized.contains(kw)))
            .map(|(_, provider, hosting)| ModelInfo {
                name: original.to_owned(),
                provider: (*provider).to_owned(),
                hosting: *hosting,
            })
    }
}

/// 기본 식별 단계 (적용 순서대로)
static DEFAULT_TIERS: [&dyn MatchTier; 4] = [&ExactTier, &PrefixTier, &SubstringTier, &KeywordTier];

/// 자유 형식 모델 문자열 식별기
pub struct ModelIdentifier {
    catalog: ModelCatalog,
    tiers: Vec<&'static dyn MatchTier>,
}

impl ModelIdentifier {
    /// 주어진 카탈로그와 기본 단계로 식별기를 생성합니다.
    pub fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }

    /// 내장 카탈로그를 사용하는 식별기
    pub fn builtin() -> Self {
        Self::new(ModelCatalog::builtin())
    }

    /// 사용하는 카탈로그
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// 모델 문자열을 식별합니다.
    ///
    /// 빈 문자열이면 `None`, 그 외에는 항상 결과를 반환합니다.
    pub fn identify(&self, model: &str) -> Option<ModelInfo> {
        self.identify_detailed(model).map(|id| id.info)
    }

    /// 모델 문자열을 식별하고 매칭 단계를 함께 반환합니다.
    pub fn identify_detailed(&self, model: &str) -> Option<Identification> {
        let normalized = model.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let found = self.tiers.iter().find_map(|tier| {
            tier.try_match(&self.catalog, &normalized, model)
                .map(|info| Identification {
                    info,
                    kind: tier.kind(),
                })
        });

        let identification = found.unwrap_or_else(|| Identification {
            info: ModelInfo {
                name: model.to_owned(),
                provider: UNKNOWN_PROVIDER.to_owned(),
                hosting: Hosting::Unknown,
            },
            kind: MatchKind::Generic,
        });

        counter!(m::MODEL_IDENTIFICATIONS_TOTAL, m::LABEL_TIER => identification.kind.as_str())
            .increment(1);
        debug!(
            model = %model,
            tier = %identification.kind,
            name = %identification.info.name,
            provider = %identification.info.provider,
            "model identified"
        );

        Some(identification)
    }
}

impl Default for ModelIdentifier {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 엔드포인트 URL 기반 제공자 추론기
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderInferencer {
    catalog: ModelCatalog,
}

impl ProviderInferencer {
    /// 주어진 카탈로그로 추론기를 생성합니다.
    pub fn new(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }

    /// 엔드포인트에서 제공자를 추론합니다.
    ///
    /// 소문자로 변환한 엔드포인트에 등록된 패턴이 포함되면 첫 번째 항목을 반환합니다.
    /// 빈 문자열이거나 일치하는 패턴이 없으면 `None`입니다.
    pub fn infer(&self, endpoint: &str) -> Option<ProviderInfo> {
        if endpoint.is_empty() {
            return None;
        }

        let lower = endpoint.to_lowercase();
        self.catalog
            .endpoints()
            .find(|(pattern, _)| lower.contains(pattern))
            .map(|(_, entry)| entry.to_provider_info())
    }
}

/// 내장 카탈로그로 모델 문자열을 식별합니다.
pub fn identify_model(model: &str) -> Option<ModelInfo> {
    ModelIdentifier::builtin().identify(model)
}

/// 내장 카탈로그로 엔드포인트의 제공자를 추론합니다.
pub fn infer_provider_from_endpoint(endpoint: &str) -> Option<ProviderInfo> {
    ProviderInferencer::default().infer(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identify(model: &str) -> Identification {
        ModelIdentifier::builtin()
            .identify_detailed(model)
            .expect("non-empty input must identify")
    }

    #[test]
    fn exact_match() {
        let id = identify("gpt-4o");
        assert_eq!(id.kind, MatchKind::Exact);
        assert_eq!(id.info.name, "GPT-4o");
        assert_eq!(id.info.provider, "OpenAI");
        assert_eq!(id.info.hosting, Hosting::Cloud);
    }

    #[test]
    fn exact_match_is_case_and_whitespace_insensitive() {
        let id = identify("  Claude-3-Opus \n");
        assert_eq!(id.kind, MatchKind::Exact);
        assert_eq!(id.info.name, "Claude 3 Opus");
    }

    #[test]
    fn dated_gpt_4o_prefers_specific_key() {
        let id = identify("gpt-4o-2024-08-06");
        assert_eq!(id.kind, MatchKind::Prefix);
        assert_eq!(id.info.name, "GPT-4o");
        assert_eq!(id.info.provider, "OpenAI");
        assert_eq!(id.info.hosting, Hosting::Cloud);
    }

    #[test]
    fn dated_gpt_4o_mini_is_not_shadowed() {
        let id = identify("gpt-4o-mini-2024-07-18");
        assert_eq!(id.info.name, "GPT-4o Mini");
    }

    #[test]
    fn ollama_style_tag_prefix() {
        let id = identify("llama3.1:8b");
        assert_eq!(id.kind, MatchKind::Prefix);
        assert_eq!(id.info.name, "Llama 3");
        assert_eq!(id.info.hosting, Hosting::Local);
    }

    #[test]
    fn bedrock_style_substring() {
        let id = identify("anthropic.claude-3-5-sonnet-20241022-v2:0");
        assert_eq!(id.kind, MatchKind::Substring);
        assert_eq!(id.info.name, "Claude 3.5 Sonnet");
        assert_eq!(id.info.provider, "Anthropic");
    }

    #[test]
    fn codellama_substring_beats_llama() {
        let id = identify("TheBloke/CodeLlama-13B-GGUF");
        assert_eq!(id.info.name, "Code Llama");
    }

    #[test]
    fn dolphin_is_not_phi() {
        let id = identify("cognitivecomputations/dolphin-2.9");
        assert_eq!(id.info.name, "Dolphin");
    }

    #[test]
    fn keyword_fallback_keeps_original_string() {
        let id = identify("TinyLama-1.1B");
        assert_eq!(id.kind, MatchKind::Keyword);
        assert_eq!(id.info.name, "TinyLama-1.1B");
        assert_eq!(id.info.provider, "Meta");
        assert_eq!(id.info.hosting, Hosting::Local);
    }

    #[test]
    fn generic_fallback() {
        let id = identify("my-private-model");
        assert_eq!(id.kind, MatchKind::Generic);
        assert_eq!(id.info.name, "my-private-model");
        assert_eq!(id.info.provider, "Unknown");
        assert_eq!(id.info.hosting, Hosting::Unknown);
    }

    #[test]
    fn empty_input_is_no_match() {
        let identifier = ModelIdentifier::builtin();
        assert!(identifier.identify("").is_none());
        assert!(identifier.identify("   ").is_none());
    }

    #[test]
    fn results_are_independent_copies() {
        let identifier = ModelIdentifier::builtin();
        let mut first = identifier.identify("gpt-4").unwrap();
        first.name.push_str("-mutated");
        let second = identifier.identify("gpt-4").unwrap();
        assert_eq!(second.name, "GPT-4");
    }

    #[test]
    fn every_result_has_non_empty_fields() {
        let identifier = ModelIdentifier::builtin();
        for input in ["x", "gpt", "yi", "ünïcödé", "-", "o1", "qwen2.5-coder:7b", "?!"] {
            let info = identifier.identify(input).unwrap();
            assert!(!info.name.is_empty(), "{input}");
            assert!(!info.provider.is_empty(), "{input}");
            assert!(!info.hosting.as_str().is_empty(), "{input}");
        }
    }

    #[test]
    fn identify_model_free_function() {
        let info = identify_model("mixtral-8x7b").unwrap();
        assert_eq!(info.provider, "Mistral AI");
    }

    #[test]
    fn infer_openai_endpoint() {
        let info = infer_provider_from_endpoint("https://API.OpenAI.com/v1/chat").unwrap();
        assert_eq!(info.provider, "OpenAI");
        assert_eq!(info.hosting, Hosting::Cloud);
    }

    #[test]
    fn infer_bedrock_before_generic_aws() {
        let info =
            infer_provider_from_endpoint("https://bedrock-runtime.us-east-1.amazonaws.com").unwrap();
        assert_eq!(info.provider, "AWS Bedrock");

        let info = infer_provider_from_endpoint("https://s3.amazonaws.com/bucket").unwrap();
        assert_eq!(info.provider, "AWS");
    }

    #[test]
    fn infer_local_endpoint() {
        let info = infer_provider_from_endpoint("http://localhost:11434/api").unwrap();
        assert_eq!(info.provider, "Local");
        assert_eq!(info.hosting, Hosting::Local);
    }

    #[test]
    fn infer_no_match() {
        assert!(infer_provider_from_endpoint("").is_none());
        assert!(infer_provider_from_endpoint("https://example.com").is_none());
    }
}
