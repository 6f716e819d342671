//! AI-BOM 에러 타입
//!
//! [`AiBomError`]는 문서 무결성 위반과 입력/직렬화 실패를 나타냅니다.
//! 모델 식별과 위험 조회는 실패하지 않으므로 여기에 대응하는 변형이 없습니다.
//! `From<AiBomError> for AuditError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **문서 무결성**: `DuplicateBomRef`, `DanglingReference`, `InvalidSerialNumber`
//! - **직렬화**: `Serialization`
//! - **입력**: `InputParse`, `Io`, `FileTooBig`

use mcp_audit_core::error::{AuditError, BomError};

/// AI-BOM 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AiBomError {
    /// 같은 bom-ref를 가진 컴포넌트가 둘 이상 존재
    #[error("duplicate bom-ref: '{0}'")]
    DuplicateBomRef(String),

    /// 의존성 엣지가 문서에 없는 컴포넌트를 참조
    #[error("dependency '{from}' references missing component '{to}'")]
    DanglingReference {
        /// 엣지의 `ref`
        from: String,
        /// 존재하지 않는 대상 bom-ref
        to: String,
    },

    /// 문서 식별자가 `urn:uuid:<uuid>` 형식이 아님
    #[error("invalid serial number: '{0}'")]
    InvalidSerialNumber(String),

    /// JSON/XML 직렬화 실패
    #[error("bom serialization error: {0}")]
    Serialization(String),

    /// 스캔 결과 입력 파싱 실패
    #[error("scan input parse error: {path}: {reason}")]
    InputParse {
        /// 입력 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 입력 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: u64,
    },
}

impl From<AiBomError> for AuditError {
    fn from(err: AiBomError) -> Self {
        match err {
            AiBomError::DuplicateBomRef(_)
            | AiBomError::DanglingReference { .. }
            | AiBomError::InvalidSerialNumber(_) => {
                AuditError::Bom(BomError::InvalidDocument(err.to_string()))
            }
            AiBomError::Serialization(msg) => AuditError::Bom(BomError::Serialization(msg)),
            AiBomError::InputParse { .. } | AiBomError::FileTooBig { .. } => {
                AuditError::Bom(BomError::InputParse(err.to_string()))
            }
            AiBomError::Io { source, .. } => AuditError::Io(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_reference_display() {
        let err = AiBomError::DanglingReference {
            from: "model:openai:gpt-4o".to_owned(),
            to: "mcp:missing".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("model:openai:gpt-4o"));
        assert!(msg.contains("mcp:missing"));
    }

    #[test]
    fn duplicate_bom_ref_converts_to_invalid_document() {
        let err: AuditError = AiBomError::DuplicateBomRef("mcp:fs".to_owned()).into();
        assert!(matches!(err, AuditError::Bom(BomError::InvalidDocument(_))));
        assert!(err.to_string().contains("mcp:fs"));
    }

    #[test]
    fn input_parse_converts_to_input_parse() {
        let err: AuditError = AiBomError::InputParse {
            path: "results.json".to_owned(),
            reason: "expected array".to_owned(),
        }
        .into();
        assert!(matches!(err, AuditError::Bom(BomError::InputParse(_))));
    }

    #[test]
    fn io_error_converts_to_io() {
        let err: AuditError = AiBomError::Io {
            path: "/tmp/x".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
        .into();
        assert!(matches!(err, AuditError::Io(_)));
    }

    #[test]
    fn file_too_big_display() {
        let err = AiBomError::FileTooBig {
            path: "results.json".to_owned(),
            size: 90_000_000,
            max: 50_000_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("90000000"));
        assert!(msg.contains("50000000"));
    }
}
