//! 스캔 결과 입력 로딩
//!
//! 외부 스캐너가 만든 JSON을 [`ScanResult`] 목록으로 읽습니다.
//! 최상위가 배열이거나 `{"results": [...]}` 형태인 문서를 모두 받습니다.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AiBomError;
use crate::types::ScanResult;

/// 입력 파일 최대 크기 (50 MB)
pub const MAX_INPUT_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Deserialize)]
#[serde(untagged)]
enum ScanInput {
    List(Vec<ScanResult>),
    Wrapped { results: Vec<ScanResult> },
}

/// JSON 문자열을 스캔 결과 목록으로 파싱합니다.
///
/// `source`는 에러 메시지에 표시할 출처입니다.
pub fn parse_scan_results(content: &str, source: &str) -> Result<Vec<ScanResult>, AiBomError> {
    let input: ScanInput = serde_json::from_str(content).map_err(|e| AiBomError::InputParse {
        path: source.to_owned(),
        reason: e.to_string(),
    })?;

    let results = match input {
        ScanInput::List(results) | ScanInput::Wrapped { results } => results,
    };
    debug!(source, count = results.len(), "scan results parsed");
    Ok(results)
}

/// 파일에서 스캔 결과 목록을 읽습니다.
pub fn load_scan_results(path: &Path) -> Result<Vec<ScanResult>, AiBomError> {
    let path_str = path.display().to_string();

    let metadata = std::fs::metadata(path).map_err(|e| AiBomError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(AiBomError::FileTooBig {
            path: path_str,
            size: metadata.len(),
            max: MAX_INPUT_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| AiBomError::Io {
        path: path_str.clone(),
        source: e,
    })?;

    let results = parse_scan_results(&content, &path_str)?;
    info!(path = %path_str, count = results.len(), "scan results loaded");
    Ok(results)
}
