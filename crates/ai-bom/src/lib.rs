#![doc = include_str!("../README.md")]

pub mod bom;
pub mod catalog;
pub mod detect;
pub mod error;
pub mod identify;
pub mod input;
pub mod types;

// 에러
pub use error::AiBomError;

// 카탈로그 및 식별
pub use catalog::{CatalogEntry, EndpointEntry, ModelCatalog};
pub use identify::{
    Identification, MatchKind, MatchTier, ModelIdentifier, ProviderInferencer, identify_model,
    infer_provider_from_endpoint,
};

// 탐지
pub use detect::{ConfigModelDetector, attach_detected_models, detect_model_from_config};

// BOM
pub use bom::{BomBuilder, BomDocument, generate_bom};

// 입력
pub use input::{load_scan_results, parse_scan_results};

// 도메인 타입
pub use types::{
    ApiDescriptor, ApiEndpoint, BomFormat, DetectedModel, ModelInfo, ProviderInfo, ScanResult,
};
