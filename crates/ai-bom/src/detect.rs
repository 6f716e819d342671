//! 설정 기반 모델 탐지
//!
//! MCP 설정의 환경변수와 API 목록에서 사용 중인 AI 모델을 최대 하나 탐지합니다.
//!
//! 1. 환경변수를 설정 순서대로 순회합니다. 값이 비어 있지 않은 문자열이고 키가
//!    모델 환경변수이면 값을 식별하여 `env:<KEY>` 출처로 즉시 반환합니다.
//! 2. 환경변수에서 찾지 못하면 API 목록을 순서대로 순회하여
//!    엔드포인트로 제공자를 추론하고 `api:<url>` 출처로 반환합니다.
//!
//! 반환된 모델의 `mcp_name`은 비어 있습니다. 호출자가
//! [`DetectedModel::attached_to`]로 부착합니다.

use mcp_audit_core::metrics as m;
use metrics::counter;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::catalog::ModelCatalog;
use crate::identify::{ModelIdentifier, ProviderInferencer};
use crate::types::{ApiDescriptor, DetectedModel, ScanResult};

/// 환경변수/API 목록 기반 모델 탐지기
pub struct ConfigModelDetector {
    catalog: ModelCatalog,
    identifier: ModelIdentifier,
    inferencer: ProviderInferencer,
}

impl ConfigModelDetector {
    /// 주어진 카탈로그로 탐지기를 생성합니다.
    pub fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            identifier: ModelIdentifier::new(catalog),
            inferencer: ProviderInferencer::new(catalog),
        }
    }

    /// 내장 카탈로그를 사용하는 탐지기
    pub fn builtin() -> Self {
        Self::new(ModelCatalog::builtin())
    }

    /// 환경변수와 API 목록에서 모델을 탐지합니다.
    ///
    /// 문자열이 아니거나 빈 값은 건너뜁니다. 모델 환경변수 키가 없거나 식별되지 않으면
    /// API 목록으로 넘어갑니다.
    pub fn detect(&self, env: &Map<String, Value>, apis: &[ApiDescriptor]) -> Option<DetectedModel> {
        self.detect_from_env(env)
            .or_else(|| self.detect_from_apis(apis))
    }

    /// 스캔 결과의 환경변수와 API 목록에서 모델을 탐지하고 MCP 이름을 부착합니다.
    pub fn detect_for(&self, result: &ScanResult) -> Option<DetectedModel> {
        self.detect(&result.env, &result.apis)
            .map(|model| model.attached_to(&result.name))
    }

    fn detect_from_env(&self, env: &Map<String, Value>) -> Option<DetectedModel> {
        for (key, value) in env {
            let Some(value) = value.as_str().filter(|v| !v.is_empty()) else {
                continue;
            };

            if !self.catalog.is_model_env_key(key) {
                continue;
            }

            match self.identifier.identify(value) {
                Some(info) => {
                    debug!(key = %key, model = %value, provider = %info.provider, "model detected from env");
                    counter!(m::MODEL_DETECTIONS_TOTAL, m::LABEL_SOURCE => "env").increment(1);
                    return Some(DetectedModel::from_env(key, value, info));
                }
                None => {
                    trace!(key = %key, "model env var did not identify a model");
                }
            }
        }
        None
    }

    fn detect_from_apis(&self, apis: &[ApiDescriptor]) -> Option<DetectedModel> {
        apis.iter().find_map(|api| {
            let url = api.as_url();
            self.inferencer.infer(&url).map(|info| {
                debug!(url = %url, provider = %info.provider, "provider inferred from api endpoint");
                counter!(m::MODEL_DETECTIONS_TOTAL, m::LABEL_SOURCE => "api").increment(1);
                DetectedModel::from_endpoint(&url, info)
            })
        })
    }
}

impl Default for ConfigModelDetector {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 내장 카탈로그로 모델을 탐지하고 `mcp_name`을 부착합니다.
pub fn detect_model_from_config(
    env: &Map<String, Value>,
    apis: &[ApiDescriptor],
    mcp_name: &str,
) -> Option<DetectedModel> {
    ConfigModelDetector::builtin()
        .detect(env, apis)
        .map(|model| model.attached_to(mcp_name))
}

/// 모델이 비어 있는 스캔 결과에 탐지된 모델을 부착합니다.
///
/// 이미 모델이 있는 결과는 그대로 둡니다. 부착된 결과 수를 반환합니다.
pub fn attach_detected_models(detector: &ConfigModelDetector, results: &mut [ScanResult]) -> usize {
    let mut attached = 0;
    for result in results.iter_mut().filter(|r| r.model.is_none()) {
        if let Some(model) = detector.detect_for(result) {
            result.model = Some(model);
            attached += 1;
        }
    }
    attached
}
