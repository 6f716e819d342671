//! 모델 카탈로그 -- 정적 모델/엔드포인트 레지스트리
//!
//! 모든 테이블은 `'static` 슬라이스이며 순서가 의미를 가집니다.
//! 접두사/부분 문자열 매칭은 테이블 순서대로 시도하므로,
//! 다른 키를 부분 문자열로 포함하는 더 구체적인 키가 항상 먼저 옵니다
//! (예: `gpt-4o-mini` → `gpt-4o` → `gpt-4`).

use mcp_audit_core::types::Hosting;

use crate::types::{ModelInfo, ProviderInfo};

/// 카탈로그 모델 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// 표시 이름
    pub name: &'static str,
    /// 제공자
    pub provider: &'static str,
    /// 호스팅 분류
    pub hosting: Hosting,
}

impl CatalogEntry {
    const fn cloud(name: &'static str, provider: &'static str) -> Self {
        Self {
            name,
            provider,
            hosting: Hosting::Cloud,
        }
    }

    const fn local(name: &'static str, provider: &'static str) -> Self {
        Self {
            name,
            provider,
            hosting: Hosting::Local,
        }
    }

    /// 소유권을 가진 복사본을 만듭니다.
    pub fn to_model_info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.to_owned(),
            provider: self.provider.to_owned(),
            hosting: self.hosting,
        }
    }
}

/// 엔드포인트 패턴 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointEntry {
    /// 제공자
    pub provider: &'static str,
    /// 호스팅 분류
    pub hosting: Hosting,
}

impl EndpointEntry {
    const fn cloud(provider: &'static str) -> Self {
        Self {
            provider,
            hosting: Hosting::Cloud,
        }
    }

    const fn local() -> Self {
        Self {
            provider: "Local",
            hosting: Hosting::Local,
        }
    }

    /// 소유권을 가진 복사본을 만듭니다.
    pub fn to_provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            provider: self.provider.to_owned(),
            hosting: self.hosting,
        }
    }
}

/// 모델 이름 조각 → 카탈로그 항목
static MODELS: &[(&str, CatalogEntry)] = &[
    // OpenAI
    ("gpt-4o-mini", CatalogEntry::cloud("GPT-4o Mini", "OpenAI")),
    ("gpt-4o", CatalogEntry::cloud("GPT-4o", "OpenAI")),
    ("gpt-4-turbo", CatalogEntry::cloud("GPT-4 Turbo", "OpenAI")),
    ("gpt-4", CatalogEntry::cloud("GPT-4", "OpenAI")),
    ("gpt-3.5-turbo", CatalogEntry::cloud("GPT-3.5 Turbo", "OpenAI")),
    ("gpt-3.5", CatalogEntry::cloud("GPT-3.5", "OpenAI")),
    ("o1-mini", CatalogEntry::cloud("o1 Mini", "OpenAI")),
    ("o1-preview", CatalogEntry::cloud("o1 Preview", "OpenAI")),
    ("o1", CatalogEntry::cloud("o1", "OpenAI")),
    ("o3-mini", CatalogEntry::cloud("o3 Mini", "OpenAI")),
    ("chatgpt", CatalogEntry::cloud("ChatGPT", "OpenAI")),
    // Anthropic
    ("claude-3-5-sonnet", CatalogEntry::cloud("Claude 3.5 Sonnet", "Anthropic")),
    ("claude-3.5-sonnet", CatalogEntry::cloud("Claude 3.5 Sonnet", "Anthropic")),
    ("claude-3-5-haiku", CatalogEntry::cloud("Claude 3.5 Haiku", "Anthropic")),
    ("claude-3.5-haiku", CatalogEntry::cloud("Claude 3.5 Haiku", "Anthropic")),
    ("claude-3-opus", CatalogEntry::cloud("Claude 3 Opus", "Anthropic")),
    ("claude-3-sonnet", CatalogEntry::cloud("Claude 3 Sonnet", "Anthropic")),
    ("claude-3-haiku", CatalogEntry::cloud("Claude 3 Haiku", "Anthropic")),
    ("claude-2", CatalogEntry::cloud("Claude 2", "Anthropic")),
    ("claude-instant", CatalogEntry::cloud("Claude Instant", "Anthropic")),
    ("claude", CatalogEntry::cloud("Claude", "Anthropic")),
    // Meta
    ("llama-3.3", CatalogEntry::local("Llama 3.3", "Meta")),
    ("llama-3.2", CatalogEntry::local("Llama 3.2", "Meta")),
    ("llama-3.1", CatalogEntry::local("Llama 3.1", "Meta")),
    ("llama-3", CatalogEntry::local("Llama 3", "Meta")),
    ("llama3", CatalogEntry::local("Llama 3", "Meta")),
    ("llama-2", CatalogEntry::local("Llama 2", "Meta")),
    ("llama2", CatalogEntry::local("Llama 2", "Meta")),
    ("codellama", CatalogEntry::local("Code Llama", "Meta")),
    ("code-llama", CatalogEntry::local("Code Llama", "Meta")),
    ("llama", CatalogEntry::local("Llama", "Meta")),
    // Mistral AI
    ("mistral-large", CatalogEntry::cloud("Mistral Large", "Mistral AI")),
    ("mistral-medium", CatalogEntry::cloud("Mistral Medium", "Mistral AI")),
    ("mistral-small", CatalogEntry::cloud("Mistral Small", "Mistral AI")),
    ("mistral", CatalogEntry::local("Mistral", "Mistral AI")),
    ("mixtral", CatalogEntry::local("Mixtral", "Mistral AI")),
    ("codestral", CatalogEntry::cloud("Codestral", "Mistral AI")),
    ("pixtral", CatalogEntry::cloud("Pixtral", "Mistral AI")),
    // Google
    ("gemini-2.0", CatalogEntry::cloud("Gemini 2.0", "Google")),
    ("gemini-1.5-pro", CatalogEntry::cloud("Gemini 1.5 Pro", "Google")),
    ("gemini-1.5-flash", CatalogEntry::cloud("Gemini 1.5 Flash", "Google")),
    ("gemini-pro", CatalogEntry::cloud("Gemini Pro", "Google")),
    ("gemini-ultra", CatalogEntry::cloud("Gemini Ultra", "Google")),
    ("gemini", CatalogEntry::cloud("Gemini", "Google")),
    ("gemma-2", CatalogEntry::local("Gemma 2", "Google")),
    ("gemma", CatalogEntry::local("Gemma", "Google")),
    ("palm", CatalogEntry::cloud("PaLM", "Google")),
    // Cohere
    ("command-r-plus", CatalogEntry::cloud("Command R+", "Cohere")),
    ("command-r", CatalogEntry::cloud("Command R", "Cohere")),
    ("command", CatalogEntry::cloud("Command", "Cohere")),
    ("coral", CatalogEntry::cloud("Coral", "Cohere")),
    // DeepSeek, Alibaba, 01.AI
    ("deepseek-v3", CatalogEntry::cloud("DeepSeek V3", "DeepSeek")),
    ("deepseek-r1", CatalogEntry::cloud("DeepSeek R1", "DeepSeek")),
    ("deepseek", CatalogEntry::local("DeepSeek", "DeepSeek")),
    ("qwen-2.5", CatalogEntry::local("Qwen 2.5", "Alibaba")),
    ("qwen-2", CatalogEntry::local("Qwen 2", "Alibaba")),
    ("qwen", CatalogEntry::local("Qwen", "Alibaba")),
    ("yi-1.5", CatalogEntry::local("Yi 1.5", "01.AI")),
    ("yi", CatalogEntry::local("Yi", "01.AI")),
    // 기타 로컬 모델
    ("falcon", CatalogEntry::local("Falcon", "TII")),
    ("vicuna", CatalogEntry::local("Vicuna", "LMSYS")),
    ("openchat", CatalogEntry::local("OpenChat", "OpenChat")),
    ("neural-chat", CatalogEntry::local("Neural Chat", "Intel")),
    ("starling", CatalogEntry::local("Starling", "Berkeley")),
    ("zephyr", CatalogEntry::local("Zephyr", "HuggingFace")),
    ("solar", CatalogEntry::local("Solar", "Upstage")),
    ("nous-hermes", CatalogEntry::local("Nous Hermes", "Nous Research")),
    ("dolphin", CatalogEntry::local("Dolphin", "Cognitive Computations")),
    ("orca", CatalogEntry::local("Orca", "Microsoft")),
    ("wizard", CatalogEntry::local("WizardLM", "WizardLM")),
    ("starcoder", CatalogEntry::local("StarCoder", "BigCode")),
    ("codegen", CatalogEntry::local("CodeGen", "Salesforce")),
    // Microsoft Phi ("dolphin"이 "phi"를 포함하므로 마지막)
    ("phi-4", CatalogEntry::local("Phi-4", "Microsoft")),
    ("phi-3", CatalogEntry::local("Phi-3", "Microsoft")),
    ("phi-2", CatalogEntry::local("Phi-2", "Microsoft")),
    ("phi", CatalogEntry::local("Phi", "Microsoft")),
];

/// API 엔드포인트 부분 문자열 → 제공자
static ENDPOINTS: &[(&str, EndpointEntry)] = &[
    ("api.openai.com", EndpointEntry::cloud("OpenAI")),
    ("openai.azure.com", EndpointEntry::cloud("Azure OpenAI")),
    ("api.anthropic.com", EndpointEntry::cloud("Anthropic")),
    ("bedrock", EndpointEntry::cloud("AWS Bedrock")),
    ("amazonaws.com", EndpointEntry::cloud("AWS")),
    ("aiplatform.googleapis.com", EndpointEntry::cloud("Google Vertex AI")),
    ("generativelanguage.googleapis.com", EndpointEntry::cloud("Google AI")),
    ("api.mistral.ai", EndpointEntry::cloud("Mistral AI")),
    ("api.cohere.ai", EndpointEntry::cloud("Cohere")),
    ("api.together.xyz", EndpointEntry::cloud("Together AI")),
    ("api.groq.com", EndpointEntry::cloud("Groq")),
    ("api.deepseek.com", EndpointEntry::cloud("DeepSeek")),
    ("api.fireworks.ai", EndpointEntry::cloud("Fireworks AI")),
    ("api.replicate.com", EndpointEntry::cloud("Replicate")),
    ("api.perplexity.ai", EndpointEntry::cloud("Perplexity")),
    ("localhost", EndpointEntry::local()),
    ("127.0.0.1", EndpointEntry::local()),
    ("0.0.0.0", EndpointEntry::local()),
];

/// 모델 이름을 담는 것으로 알려진 환경변수 (대문자, 정확히 일치)
static MODEL_ENV_NAMES: &[&str] = &[
    "MODEL",
    "MODEL_NAME",
    "MODEL_ID",
    "LLM_MODEL",
    "AI_MODEL",
    "OPENAI_MODEL",
    "OPENAI_MODEL_NAME",
    "ANTHROPIC_MODEL",
    "CLAUDE_MODEL",
    "BEDROCK_MODEL_ID",
    "BEDROCK_MODEL",
    "AZURE_OPENAI_DEPLOYMENT",
    "AZURE_DEPLOYMENT_NAME",
    "AZURE_DEPLOYMENT",
    "OLLAMA_MODEL",
    "TOGETHER_MODEL",
    "GROQ_MODEL",
    "MISTRAL_MODEL",
    "COHERE_MODEL",
    "GOOGLE_MODEL",
    "GEMINI_MODEL",
    "VERTEX_MODEL",
    "MODEL_PATH",
    "GGUF_MODEL",
    "LLAMA_MODEL_PATH",
    "LLAMA_MODEL",
];

/// 모델 환경변수로 취급하는 키 접미사
static MODEL_ENV_SUFFIXES: &[&str] = &["_MODEL", "_MODEL_ID"];

/// 클라우드 제공자 → API 기본 URL (BOM 외부 참조용)
static PROVIDER_API_URLS: &[(&str, &str)] = &[
    ("OpenAI", "https://api.openai.com"),
    ("Anthropic", "https://api.anthropic.com"),
    ("Google", "https://generativelanguage.googleapis.com"),
    ("Mistral AI", "https://api.mistral.ai"),
    ("Cohere", "https://api.cohere.ai"),
    ("Azure OpenAI", "https://azure.openai.com"),
    ("AWS Bedrock", "https://bedrock.amazonaws.com"),
    ("Together AI", "https://api.together.xyz"),
    ("Groq", "https://api.groq.com"),
    ("DeepSeek", "https://api.deepseek.com"),
    ("Fireworks AI", "https://api.fireworks.ai"),
];

/// 읽기 전용 모델/엔드포인트 레지스트리
///
/// 프로세스 전역 정적 테이블을 참조하므로 복사 비용이 없습니다.
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalog {
    models: &'static [(&'static str, CatalogEntry)],
    endpoints: &'static [(&'static str, EndpointEntry)],
    env_names: &'static [&'static str],
    env_suffixes: &'static [&'static str],
    api_urls: &'static [(&'static str, &'static str)],
}

impl ModelCatalog {
    /// 내장 레지스트리
    pub const fn builtin() -> Self {
        Self {
            models: MODELS,
            endpoints: ENDPOINTS,
            env_names: MODEL_ENV_NAMES,
            env_suffixes: MODEL_ENV_SUFFIXES,
            api_urls: PROVIDER_API_URLS,
        }
    }

    /// 모델 키를 카탈로그 순서대로 순회합니다.
    pub fn models(&self) -> impl Iterator<Item = (&'static str, &'static CatalogEntry)> {
        self.models.iter().map(|(key, entry)| (*key, entry))
    }

    /// 모델 키 정확히 일치 조회 (키는 소문자)
    pub fn get(&self, key: &str) -> Option<&'static CatalogEntry> {
        self.models
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, entry)| entry)
    }

    /// 등록된 모델 키 수
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// 모델 테이블이 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// 엔드포인트 패턴을 순서대로 순회합니다.
    pub fn endpoints(&self) -> impl Iterator<Item = (&'static str, &'static EndpointEntry)> {
        self.endpoints.iter().map(|(pattern, entry)| (*pattern, entry))
    }

    /// 환경변수 키가 모델 이름을 담는 키인지 판단합니다.
    ///
    /// 대문자로 변환한 키가 명시 목록과 정확히 일치하거나 `_MODEL`/`_MODEL_ID`로 끝나면 참입니다.
    pub fn is_model_env_key(&self, key: &str) -> bool {
        let upper = key.to_uppercase();
        self.env_names.contains(&upper.as_str())
            || self
                .env_suffixes
                .iter()
                .any(|suffix| upper.ends_with(suffix))
    }

    /// 명시적으로 등록된 모델 환경변수 이름
    pub fn model_env_names(&self) -> &'static [&'static str] {
        self.env_names
    }

    /// 제공자 API 기본 URL (등록되지 않은 제공자는 `None`)
    pub fn provider_api_url(&self, provider: &str) -> Option<&'static str> {
        self.api_urls
            .iter()
            .find(|(name, _)| *name == provider)
            .map(|(_, url)| *url)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
