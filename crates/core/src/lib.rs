#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod metrics;
pub mod risk;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{AuditError, BomError, ConfigError};

// 설정
pub use config::{AuditConfig, BomConfig, GeneralConfig};

// 위험 분류
pub use risk::{RiskFlagDefinition, RiskLevelDefinition, RiskTaxonomy};

// 도메인 타입
pub use types::{Hosting, RiskSeverity};
