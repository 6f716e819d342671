//! 에러 타입: 도메인별 에러 정의
//!
//! 위험 분류 조회, 모델 식별 같은 핵심 연산은 실패하지 않습니다
//! (알 수 없는 입력은 문서화된 기본값으로 귀결됩니다).
//! 여기 정의된 에러는 설정 로딩, BOM 문서 무결성, I/O에서만 발생합니다.

/// mcp-audit 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// BOM 문서 생성/검증 에러
    #[error("bom error: {0}")]
    Bom(#[from] BomError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// BOM 문서 에러
#[derive(Debug, thiserror::Error)]
pub enum BomError {
    /// 문서 무결성 위반 (중복 bom-ref, 존재하지 않는 참조)
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// 직렬화 실패
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// 입력(스캔 결과) 파싱 실패
    #[error("input parse failed: {0}")]
    InputParse(String),
}
