//! 도메인 타입: 시스템 전역에서 사용되는 공통 타입
//!
//! 위험 심각도와 모델 호스팅 분류처럼 여러 크레이트가 공유하는 값 타입을 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 위험 심각도
///
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Unknown < Low < Medium < High < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskSeverity {
    /// 판단 불가 (레지스트리에 없는 플래그 등)
    #[default]
    Unknown,
    /// 낮은 심각도
    Low,
    /// 중간 심각도
    Medium,
    /// 높은 심각도
    High,
    /// 치명적, 즉시 대응 필요
    Critical,
}

impl RiskSeverity {
    /// 표시 순서 (가장 심각한 것부터). `Unknown`은 포함하지 않습니다.
    pub const DESCENDING: [RiskSeverity; 4] = [
        RiskSeverity::Critical,
        RiskSeverity::High,
        RiskSeverity::Medium,
        RiskSeverity::Low,
    ];

    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }

    /// 소문자 이름 (레지스트리 키와 동일)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// 알 수 없는 문자열은 `Unknown`으로 역직렬화됩니다.
impl From<String> for RiskSeverity {
    fn from(s: String) -> Self {
        Self::from_str_loose(&s).unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 모델 호스팅 분류
///
/// 클라우드 서비스에서 실행되는지, 로컬에서 실행되는지를 나타냅니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hosting {
    /// 클라우드 API
    Cloud,
    /// 로컬 실행 (Ollama, llama.cpp 등)
    Local,
    /// 판단 불가
    #[default]
    #[serde(other)]
    Unknown,
}

impl Hosting {
    /// 소문자 이름 (BOM 속성 값으로 사용)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Local => "local",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Hosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(RiskSeverity::Critical > RiskSeverity::High);
        assert!(RiskSeverity::High > RiskSeverity::Medium);
        assert!(RiskSeverity::Medium > RiskSeverity::Low);
        assert!(RiskSeverity::Low > RiskSeverity::Unknown);
    }

    #[test]
    fn severity_from_str_loose() {
        assert_eq!(RiskSeverity::from_str_loose("CRITICAL"), Some(RiskSeverity::Critical));
        assert_eq!(RiskSeverity::from_str_loose(" high "), Some(RiskSeverity::High));
        assert_eq!(RiskSeverity::from_str_loose("med"), Some(RiskSeverity::Medium));
        assert_eq!(RiskSeverity::from_str_loose("unknown"), Some(RiskSeverity::Unknown));
        assert_eq!(RiskSeverity::from_str_loose("severe"), None);
    }

    #[test]
    fn severity_serde_lowercase() {
        let json = serde_json::to_string(&RiskSeverity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let parsed: RiskSeverity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, RiskSeverity::Medium);
        let other: RiskSeverity = serde_json::from_str("\"catastrophic\"").unwrap();
        assert_eq!(other, RiskSeverity::Unknown);
    }

    #[test]
    fn severity_deserialize_is_lenient_but_serialize_is_canonical() {
        let parsed: Vec<RiskSeverity> =
            serde_json::from_str(r#"["HIGH", "crit", "", "none"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                RiskSeverity::High,
                RiskSeverity::Critical,
                RiskSeverity::Unknown,
                RiskSeverity::Unknown
            ]
        );
        assert_eq!(serde_json::to_string(&RiskSeverity::Unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn hosting_display_and_serde() {
        assert_eq!(Hosting::Cloud.to_string(), "cloud");
        assert_eq!(Hosting::Local.to_string(), "local");
        assert_eq!(Hosting::Unknown.to_string(), "unknown");

        let parsed: Hosting = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, Hosting::Local);
        let other: Hosting = serde_json::from_str("\"edge\"").unwrap();
        assert_eq!(other, Hosting::Unknown);
    }
}
