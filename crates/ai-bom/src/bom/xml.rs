//! 최소 CycloneDX 1.6 XML 출력
//!
//! 메타데이터(타임스탬프, 도구), 컴포넌트(이름, 버전, 공급자, 설명, 속성),
//! 의존성(`dependsOn`, `provides`)만 매핑합니다. 스키마 전체를 지원하는 직렬화기가 아닙니다.
//! 텍스트와 속성 값의 `& < > " '`는 모두 엔티티로 치환됩니다.

use std::borrow::Cow;

use super::document::{BomDocument, Component, Dependency};

const XML_NAMESPACE: &str = "http://cyclonedx.org/schema/bom/1.6";

/// XML 특수 문자를 이스케이프합니다. 치환할 문자가 없으면 원본을 빌려 반환합니다.
pub fn xml_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// 문서를 XML 문자열로 변환합니다. 무결성 검증은 호출자가 수행합니다.
pub fn render(doc: &BomDocument) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_owned());
    lines.push(format!(
        r#"<bom xmlns="{XML_NAMESPACE}" serialNumber="{}" version="{}">"#,
        xml_escape(&doc.serial_number),
        doc.version
    ));

    lines.push("  <metadata>".to_owned());
    lines.push(format!(
        "    <timestamp>{}</timestamp>",
        xml_escape(&doc.metadata.timestamp)
    ));
    lines.push("    <tools>".to_owned());
    lines.push("      <components>".to_owned());
    for tool in &doc.metadata.tools.components {
        lines.push(format!(
            r#"        <component type="{}">"#,
            tool.component_type.as_str()
        ));
        if let Some(publisher) = &tool.publisher {
            lines.push(format!(
                "          <publisher>{}</publisher>",
                xml_escape(publisher)
            ));
        }
        lines.push(format!("          <name>{}</name>", xml_escape(&tool.name)));
        lines.push(format!("          <version>{}</version>", xml_escape(&tool.version)));
        if !tool.external_references.is_empty() {
            lines.push("          <externalReferences>".to_owned());
            for reference in &tool.external_references {
                lines.push(format!(
                    r#"            <reference type="{}"><url>{}</url></reference>"#,
                    reference.reference_type.as_str(),
                    xml_escape(&reference.url)
                ));
            }
            lines.push("          </externalReferences>".to_owned());
        }
        lines.push("        </component>".to_owned());
    }
    lines.push("      </components>".to_owned());
    lines.push("    </tools>".to_owned());
    let root = &doc.metadata.component;
    lines.push(format!(
        r#"    <component type="{}">"#,
        root.component_type.as_str()
    ));
    lines.push(format!("      <name>{}</name>", xml_escape(&root.name)));
    lines.push(format!(
        "      <description>{}</description>",
        xml_escape(&root.description)
    ));
    lines.push("    </component>".to_owned());
    lines.push("  </metadata>".to_owned());

    lines.push("  <components>".to_owned());
    for component in &doc.components {
        push_component(&mut lines, component);
    }
    lines.push("  </components>".to_owned());

    if !doc.dependencies.is_empty() {
        lines.push("  <dependencies>".to_owned());
        for dep in &doc.dependencies {
            push_dependency(&mut lines, dep);
        }
        lines.push("  </dependencies>".to_owned());
    }

    lines.push("</bom>".to_owned());
    lines.join("\n")
}

fn push_component(lines: &mut Vec<String>, component: &Component) {
    lines.push(format!(
        r#"    <component type="{}" bom-ref="{}">"#,
        component.component_type.as_str(),
        xml_escape(&component.bom_ref)
    ));
    lines.push(format!("      <name>{}</name>", xml_escape(&component.name)));
    if let Some(version) = component.version.as_deref().filter(|v| !v.is_empty()) {
        lines.push(format!("      <version>{}</version>", xml_escape(version)));
    }
    if let Some(supplier) = &component.supplier {
        lines.push(format!(
            "      <supplier><name>{}</name></supplier>",
            xml_escape(&supplier.name)
        ));
    }
    if let Some(description) = component.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!(
            "      <description>{}</description>",
            xml_escape(description)
        ));
    }
    if !component.properties.is_empty() {
        lines.push("      <properties>".to_owned());
        for prop in &component.properties {
            lines.push(format!(
                r#"        <property name="{}">{}</property>"#,
                xml_escape(&prop.name),
                xml_escape(&prop.value)
            ));
        }
        lines.push("      </properties>".to_owned());
    }
    lines.push("    </component>".to_owned());
}

fn push_dependency(lines: &mut Vec<String>, dep: &Dependency) {
    lines.push(format!(r#"    <dependency ref="{}">"#, xml_escape(&dep.bom_ref)));
    for target in &dep.depends_on {
        lines.push(format!(r#"      <dependency ref="{}"/>"#, xml_escape(target)));
    }
    for target in &dep.provides {
        lines.push(format!(r#"      <provides ref="{}"/>"#, xml_escape(target)));
    }
    lines.push("    </dependency>".to_owned());
}
