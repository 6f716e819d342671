//! mcp-audit.toml 통합 설정 테스트
//!
//! - mcp-audit.toml.example 파싱 테스트
//! - 파일 로딩 + 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use std::fs;

use mcp_audit_core::config::AuditConfig;
use mcp_audit_core::error::{AuditError, ConfigError};
use serial_test::serial;
use tempfile::TempDir;

// =============================================================================
// mcp-audit.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../mcp-audit.toml.example");
    let config = AuditConfig::parse(content).expect("example config should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let content = include_str!("../../../mcp-audit.toml.example");
    let from_file = AuditConfig::parse(content).expect("should parse");
    let from_code = AuditConfig::default();

    assert_eq!(from_file.general.log_level, from_code.general.log_level);
    assert_eq!(from_file.general.log_format, from_code.general.log_format);
    assert_eq!(from_file.bom.format, from_code.bom.format);
    assert_eq!(from_file.bom.include_mcps, from_code.bom.include_mcps);
    assert_eq!(from_file.bom.detect_models, from_code.bom.detect_models);
}

// =============================================================================
// 파일 로딩
// =============================================================================

#[tokio::test]
#[serial]
async fn load_applies_env_over_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("mcp-audit.toml");
    fs::write(
        &config_path,
        "[bom]\nformat = \"json\"\ninclude_mcps = true\n",
    )
    .expect("should write config");

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
    unsafe { std::env::set_var("MCP_AUDIT_BOM_FORMAT", "xml") };
    let result = AuditConfig::load(&config_path).await;
    unsafe { std::env::remove_var("MCP_AUDIT_BOM_FORMAT") };

    let config = result.expect("config should load");
    assert_eq!(config.bom.format, "xml");
    assert!(config.bom.include_mcps);
}

#[tokio::test]
#[serial]
async fn load_rejects_invalid_env_override() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("mcp-audit.toml");
    fs::write(&config_path, "").expect("should write config");

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
    unsafe { std::env::set_var("MCP_AUDIT_GENERAL_LOG_LEVEL", "chatty") };
    let result = AuditConfig::load(&config_path).await;
    unsafe { std::env::remove_var("MCP_AUDIT_GENERAL_LOG_LEVEL") };

    let err = result.expect_err("invalid override should fail validation");
    assert!(matches!(
        err,
        AuditError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn from_file_empty_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");
    fs::write(&config_path, "").expect("should write empty file");

    let config = AuditConfig::from_file(&config_path)
        .await
        .expect("empty file should load");
    assert_eq!(config.bom.format, "json");
}

#[tokio::test]
async fn from_file_malformed_fails() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[bom\nformat = \"json\"\n").expect("should write bad config");

    let err = AuditConfig::from_file(&config_path)
        .await
        .expect_err("malformed TOML should fail");
    assert!(matches!(
        err,
        AuditError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[tokio::test]
#[serial]
async fn load_or_default_reports_malformed_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("mcp-audit.toml");
    fs::write(&config_path, "[bom]\nformat = \"pdf\"\n").expect("should write config");

    let result = AuditConfig::load_or_default(&config_path).await;
    assert!(result.is_err(), "existing but invalid file must not fall back");
}
