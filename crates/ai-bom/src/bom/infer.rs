//! 모델 카드 추론 휴리스틱
//!
//! 모델 ID, 표시 이름, 제공자의 키워드만 보고 버전/아키텍처/작업/에너지 등급을 정합니다.

use mcp_audit_core::types::Hosting;

/// 모델 ID에서 버전을 추출합니다.
///
/// `-`로 나눈 토큰 중 8자리 숫자가 있으면 `YYYY-MM-DD`로 반환하고,
/// 없으면 점을 포함한 숫자 토큰(예: `7.2`)을 그대로 반환합니다.
/// 둘 다 없으면 `"latest"`, 빈 ID는 `"unknown"`입니다.
pub fn extract_version(model_id: &str) -> String {
    if model_id.is_empty() {
        return "unknown".to_owned();
    }

    let parts: Vec<&str> = model_id.split('-').collect();

    if let Some(date) = parts
        .iter()
        .find(|p| p.len() == 8 && p.bytes().all(|b| b.is_ascii_digit()))
    {
        return format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..]);
    }

    if let Some(version) = parts.iter().find(|p| is_dotted_number(p)) {
        return (*version).to_owned();
    }

    "latest".to_owned()
}

/// 점을 하나 이상 포함하고 점을 제외한 나머지가 모두 숫자인지
fn is_dotted_number(token: &str) -> bool {
    let digits: Vec<u8> = token.bytes().filter(|b| *b != b'.').collect();
    token.contains('.') && !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// 표시 이름과 제공자에서 아키텍처를 추론합니다.
pub fn infer_architecture(model_name: &str, provider: &str) -> &'static str {
    let name = model_name.to_lowercase();

    if name.contains("llama") {
        "Llama Transformer"
    } else if name.contains("mistral") || name.contains("mixtral") {
        "Mistral/Mixtral Architecture"
    } else if name.contains("gpt") || provider == "OpenAI" {
        "GPT Transformer"
    } else if name.contains("claude") || provider == "Anthropic" {
        "Constitutional AI"
    } else if name.contains("gemini") || name.contains("gemma") {
        "Gemini/Gemma Architecture"
    } else if name.contains("qwen") {
        "Qwen Architecture"
    } else if name.contains("phi") {
        "Phi Architecture"
    } else {
        "Transformer"
    }
}

/// 표시 이름에서 주 작업을 추론합니다.
pub fn infer_task(model_name: &str) -> &'static str {
    let name = model_name.to_lowercase();

    if name.contains("code") {
        "code-generation"
    } else if name.contains("embed") {
        "text-embedding"
    } else if name.contains("vision") || name.contains("image") {
        "image-understanding"
    } else {
        "text-generation"
    }
}

/// 호스팅과 표시 이름에서 에너지 소비 등급을 추정합니다.
///
/// `mini`가 먼저 검사되므로 `Gemini` 계열 클라우드 모델은 항상 `"low"`입니다.
pub fn energy_class(hosting: Hosting, model_name: &str) -> &'static str {
    if hosting == Hosting::Local {
        return "variable-local";
    }

    let name = model_name.to_lowercase();
    if name.contains("mini") || name.contains("small") {
        "low"
    } else if name.contains("large") || name.contains("ultra") {
        "high"
    } else {
        "medium"
    }
}
