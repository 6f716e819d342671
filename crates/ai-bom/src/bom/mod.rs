//! CycloneDX 1.6 AI-BOM 생성
//!
//! [`BomBuilder`]는 스캔 결과 목록을 받아 모델/MCP 컴포넌트와 의존성 그래프를 가진
//! [`BomDocument`]를 만듭니다.
//!
//! - 모델 컴포넌트는 bom-ref(`model:<provider>:<model_id>`)당 하나입니다.
//!   같은 모델을 여러 MCP가 사용하면 하나로 합치고 `mcp` 속성에 이름을 모두 기록합니다.
//! - MCP 컴포넌트의 bom-ref는 `mcp:<name>`이며, 이름이 겹치면 `#2`, `#3` 접미사를 붙입니다.
//! - 의존성은 모델 → MCP(`dependsOn`), MCP → 모델(`provides`) 양방향으로 기록합니다.
//!   MCP 컴포넌트를 제외하면 존재하지 않는 컴포넌트를 가리키는 엣지는 생략됩니다.
//!
//! 직렬화([`BomDocument::to_json`], [`BomDocument::to_xml`])는 항상 무결성 검증을 먼저 수행합니다.

pub mod document;
pub mod infer;
pub mod xml;

use std::collections::{HashMap, HashSet};

use chrono::{SecondsFormat, Utc};
use mcp_audit_core::metrics as m;
use mcp_audit_core::types::Hosting;
use metrics::counter;
use tracing::{debug, info, warn};

use crate::catalog::ModelCatalog;
use crate::error::AiBomError;
use crate::types::{BomFormat, DetectedModel, ScanResult};

pub use document::{
    BomDocument, Component, ComponentType, Dependency, ExternalReference, ExternalReferenceType,
    Property,
};

use document::{
    Considerations, EnvironmentalConsiderations, Metadata, MetadataComponent, ModelCard,
    ModelParameters, SCHEMA_URL, SPEC_VERSION, Supplier, ToolComponent, Tools,
};

/// BOM을 생성한 도구 이름
pub const TOOL_NAME: &str = "mcp-audit";

/// 도구 배포자
pub const TOOL_PUBLISHER: &str = "APIsec";

/// 도구 웹사이트
pub const TOOL_WEBSITE: &str = "https://github.com/apisec-inc/mcp-audit";

/// 스캔 결과 목록에서 AI-BOM 문서를 만드는 빌더
#[derive(Debug, Clone, Copy)]
pub struct BomBuilder {
    catalog: ModelCatalog,
    include_mcps: bool,
}

/// 같은 bom-ref를 공유하는 모델 사용처
struct ModelUsage {
    model: DetectedModel,
    bom_ref: String,
    mcp_names: Vec<String>,
    mcp_refs: Vec<String>,
}

impl BomBuilder {
    /// MCP 컴포넌트를 포함하는 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            catalog: ModelCatalog::builtin(),
            include_mcps: true,
        }
    }

    /// MCP 컴포넌트 포함 여부를 설정합니다.
    pub fn include_mcps(mut self, include: bool) -> Self {
        self.include_mcps = include;
        self
    }

    /// 외부 참조 URL 조회에 사용할 카탈로그를 설정합니다.
    pub fn catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// 문서를 생성하고 무결성을 검증합니다.
    pub fn build(&self, results: &[ScanResult]) -> Result<BomDocument, AiBomError> {
        let mcp_refs = assign_mcp_refs(results);
        let usages = collect_model_usages(results, &mcp_refs);

        let mut components = Vec::with_capacity(usages.len() + results.len());
        for usage in &usages {
            components.push(self.model_component(usage));
        }
        if self.include_mcps {
            for (result, bom_ref) in results.iter().zip(&mcp_refs) {
                components.push(mcp_component(result, bom_ref));
            }
        }

        let dependencies = self.dependencies(results, &mcp_refs, &usages);

        let model_count = usages.len();
        let mcp_count = components.len() - model_count;
        counter!(m::BOM_COMPONENTS_TOTAL, m::LABEL_COMPONENT_TYPE => ComponentType::MachineLearningModel.as_str())
            .increment(model_count as u64);
        counter!(m::BOM_COMPONENTS_TOTAL, m::LABEL_COMPONENT_TYPE => ComponentType::Application.as_str())
            .increment(mcp_count as u64);

        let doc = BomDocument {
            schema: SCHEMA_URL.to_owned(),
            bom_format: "CycloneDX".to_owned(),
            spec_version: SPEC_VERSION.to_owned(),
            serial_number: format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            version: 1,
            metadata: metadata(),
            components,
            dependencies,
        };

        doc.validate()?;

        info!(
            serial = %doc.serial_number,
            models = model_count,
            mcps = mcp_count,
            dependencies = doc.dependencies.len(),
            "ai-bom built"
        );

        Ok(doc)
    }

    fn model_component(&self, usage: &ModelUsage) -> Component {
        let model = &usage.model;
        let name = model.display_name();
        let provider = model.provider_name();
        let mcp_list = usage.mcp_names.join(", ");

        let description = match usage.mcp_names.len() {
            0 | 1 => format!("AI model used by {mcp_list} MCP"),
            _ => format!("AI model used by {mcp_list} MCPs"),
        };

        let external_references = if model.hosting == Hosting::Cloud {
            self.catalog
                .provider_api_url(provider)
                .map(|url| {
                    vec![ExternalReference {
                        reference_type: ExternalReferenceType::Distribution,
                        url: url.to_owned(),
                        comment: Some(format!("{provider} API endpoint")),
                    }]
                })
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        Component {
            component_type: ComponentType::MachineLearningModel,
            bom_ref: usage.bom_ref.clone(),
            name: name.to_owned(),
            version: Some(infer::extract_version(model.id())),
            supplier: Some(Supplier {
                name: provider.to_owned(),
            }),
            description: Some(description),
            properties: vec![
                Property::new("hosting", model.hosting.as_str()),
                Property::new("source", model.source.as_str()),
                Property::new("mcp", usage.mcp_names.join(",")),
            ],
            model_card: Some(ModelCard {
                model_architecture: infer::infer_architecture(name, provider).to_owned(),
                model_parameters: ModelParameters {
                    task: infer::infer_task(name).to_owned(),
                },
                considerations: Considerations {
                    environmental_considerations: EnvironmentalConsiderations {
                        energy_consumption: infer::energy_class(model.hosting, name).to_owned(),
                    },
                },
            }),
            external_references,
        }
    }

    fn dependencies(
        &self,
        results: &[ScanResult],
        mcp_refs: &[String],
        usages: &[ModelUsage],
    ) -> Vec<Dependency> {
        if !self.include_mcps {
            let dropped: usize = usages.iter().map(|u| u.mcp_refs.len()).sum::<usize>()
                + results.iter().filter(|r| r.model.is_some()).count();
            if dropped > 0 {
                warn!(
                    dropped,
                    "mcp components excluded, omitting dependency edges that reference them"
                );
                counter!(m::BOM_DEPENDENCIES_DROPPED_TOTAL).increment(dropped as u64);
            }
            return Vec::new();
        }

        let mut dependencies = Vec::new();

        for usage in usages {
            dependencies.push(Dependency {
                bom_ref: usage.bom_ref.clone(),
                depends_on: usage.mcp_refs.clone(),
                provides: Vec::new(),
            });
        }

        for (result, mcp_ref) in results.iter().zip(mcp_refs) {
            if let Some(model) = &result.model {
                dependencies.push(Dependency {
                    bom_ref: mcp_ref.clone(),
                    depends_on: Vec::new(),
                    provides: vec![model.bom_ref()],
                });
            }
        }

        dependencies
    }
}

impl Default for BomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 스캔 결과마다 고유한 MCP bom-ref를 할당합니다. 결과와 같은 순서입니다.
fn assign_mcp_refs(results: &[ScanResult]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(results.len());
    let mut refs = Vec::with_capacity(results.len());

    for result in results {
        let base = format!("mcp:{}", result.name);
        let mut candidate = base.clone();
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{base}#{n}");
            n += 1;
        }
        if candidate != base {
            debug!(name = %result.name, bom_ref = %candidate, "duplicate mcp name disambiguated");
        }
        used.insert(candidate.clone());
        refs.push(candidate);
    }

    refs
}

/// 모델을 bom-ref별로 묶습니다. 처음 등장한 순서를 유지합니다.
fn collect_model_usages(results: &[ScanResult], mcp_refs: &[String]) -> Vec<ModelUsage> {
    let mut usages: Vec<ModelUsage> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (result, mcp_ref) in results.iter().zip(mcp_refs) {
        let Some(model) = &result.model else {
            continue;
        };
        let model = model.attached_to(&result.name);
        let bom_ref = model.bom_ref();

        match index.get(&bom_ref) {
            Some(&i) => {
                let usage = &mut usages[i];
                usage.mcp_names.push(result.name.clone());
                usage.mcp_refs.push(mcp_ref.clone());
            }
            None => {
                index.insert(bom_ref.clone(), usages.len());
                usages.push(ModelUsage {
                    mcp_names: vec![result.name.clone()],
                    mcp_refs: vec![mcp_ref.clone()],
                    model,
                    bom_ref,
                });
            }
        }
    }

    usages
}

fn mcp_component(result: &ScanResult, bom_ref: &str) -> Component {
    let mut properties = vec![
        Property::new("source", result.source.as_str()),
        Property::new("server_type", result.server_type.as_str()),
        Property::new("found_in", result.found_in.as_str()),
    ];

    if result.is_known {
        properties.push(Property::new("registry_known", "true"));
        properties.push(Property::new(
            "registry_risk",
            result
                .registry_risk
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or("unknown"),
        ));
        properties.push(Property::new("verified", result.verified.to_string()));
    }

    if !result.risk_flags.is_empty() {
        properties.push(Property::new("risk_flags", join(&result.risk_flags)));
    }
    if !result.capabilities.is_empty() {
        properties.push(Property::new("capabilities", join(&result.capabilities)));
    }

    let external_references = result
        .apis
        .iter()
        .map(|api| {
            let url = api.as_url();
            ExternalReference {
                reference_type: ExternalReferenceType::Other,
                url: if url.is_empty() {
                    "unknown".to_owned()
                } else {
                    url.into_owned()
                },
                comment: Some(api.description().unwrap_or("API endpoint").to_owned()),
            }
        })
        .collect();

    Component {
        component_type: ComponentType::Application,
        bom_ref: bom_ref.to_owned(),
        name: result.name.clone(),
        version: None,
        supplier: Some(Supplier {
            name: result.supplier().to_owned(),
        }),
        description: Some(format!(
            "Model Context Protocol server ({})",
            result.server_type
        )),
        properties,
        model_card: None,
        external_references,
    }
}

fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn metadata() -> Metadata {
    Metadata {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        tools: Tools {
            components: vec![ToolComponent {
                component_type: ComponentType::Application,
                name: TOOL_NAME.to_owned(),
                publisher: Some(TOOL_PUBLISHER.to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                description: "MCP configuration security audit tool".to_owned(),
                external_references: vec![ExternalReference {
                    reference_type: ExternalReferenceType::Website,
                    url: TOOL_WEBSITE.to_owned(),
                    comment: None,
                }],
            }],
        },
        component: MetadataComponent {
            component_type: ComponentType::Application,
            name: "mcp-environment".to_owned(),
            description: "MCP-enabled AI development environment".to_owned(),
        },
    }
}

impl BomDocument {
    /// 무결성 검증 후 JSON(pretty)으로 직렬화합니다.
    pub fn to_json(&self) -> Result<String, AiBomError> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AiBomError::Serialization(format!("JSON serialization failed: {e}")))?;
        counter!(m::BOM_DOCUMENTS_TOTAL, m::LABEL_FORMAT => BomFormat::Json.as_str()).increment(1);
        Ok(content)
    }

    /// 무결성 검증 후 최소 XML로 직렬화합니다.
    pub fn to_xml(&self) -> Result<String, AiBomError> {
        self.validate()?;
        let content = xml::render(self);
        counter!(m::BOM_DOCUMENTS_TOTAL, m::LABEL_FORMAT => BomFormat::Xml.as_str()).increment(1);
        Ok(content)
    }

    /// 지정한 형식으로 직렬화합니다.
    pub fn render(&self, format: BomFormat) -> Result<String, AiBomError> {
        match format {
            BomFormat::Json => self.to_json(),
            BomFormat::Xml => self.to_xml(),
        }
    }
}

/// 스캔 결과에서 BOM을 생성해 바로 직렬화합니다.
pub fn generate_bom(
    results: &[ScanResult],
    format: BomFormat,
    include_mcps: bool,
) -> Result<String, AiBomError> {
    BomBuilder::new()
        .include_mcps(include_mcps)
        .build(results)?
        .render(format)
}
