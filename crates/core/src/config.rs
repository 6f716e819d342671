//! 설정 관리: mcp-audit.toml 파싱 및 런타임 설정
//!
//! [`AuditConfig`]는 모든 섹션의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`MCP_AUDIT_BOM_FORMAT=xml` 형식)
//! 3. 설정 파일 (`mcp-audit.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), mcp_audit_core::error::AuditError> {
//! use mcp_audit_core::config::AuditConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = AuditConfig::load("mcp-audit.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = AuditConfig::parse("[bom]\nformat = \"xml\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AuditError, ConfigError};

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_FILE: &str = "mcp-audit.toml";

/// mcp-audit 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// BOM 생성 설정
    #[serde(default)]
    pub bom: BomConfig,
}

impl AuditConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작합니다.
    ///
    /// 기본 경로(`mcp-audit.toml`)를 명시하지 않고 쓰는 CLI를 위한 진입점입니다.
    /// 파일이 존재하지만 잘못된 경우에는 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(AuditError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AuditError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                AuditError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, AuditError> {
        toml::from_str(toml_str).map_err(|e| {
            AuditError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `MCP_AUDIT_{SECTION}_{FIELD}`
    /// 예: `MCP_AUDIT_BOM_INCLUDE_MCPS=false`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "MCP_AUDIT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "MCP_AUDIT_GENERAL_LOG_FORMAT");

        // BOM
        override_string(&mut self.bom.format, "MCP_AUDIT_BOM_FORMAT");
        override_bool(&mut self.bom.include_mcps, "MCP_AUDIT_BOM_INCLUDE_MCPS");
        override_bool(&mut self.bom.detect_models, "MCP_AUDIT_BOM_DETECT_MODELS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AuditError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        let valid_bom_formats = ["json", "xml"];
        if !valid_bom_formats.contains(&self.bom.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "bom.format".to_owned(),
                reason: format!("must be one of: {}", valid_bom_formats.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// BOM 생성 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BomConfig {
    /// 출력 형식 (json, xml)
    pub format: String,
    /// MCP 서버를 application 컴포넌트로 포함할지 여부
    pub include_mcps: bool,
    /// 모델 정보가 없는 항목에 대해 env/API에서 모델 탐지를 수행할지 여부
    pub detect_models: bool,
}

impl Default for BomConfig {
    fn default() -> Self {
        Self {
            format: "json".to_owned(),
            include_mcps: true,
            detect_models: true,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}
