//! 위험 분류 체계: 위험 플래그와 위험 레벨의 정적 레지스트리
//!
//! [`RiskTaxonomy`]는 프로세스 전역의 읽기 전용 테이블을 감쌉니다.
//! 모든 조회는 실패하지 않으며, 등록되지 않은 이름은 `unknown` 정의로 귀결됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use mcp_audit_core::risk::RiskTaxonomy;
//! use mcp_audit_core::types::RiskSeverity;
//!
//! let taxonomy = RiskTaxonomy::builtin();
//! assert_eq!(taxonomy.severity_of("shell-access"), RiskSeverity::Critical);
//! assert_eq!(taxonomy.severity_of("made-up"), RiskSeverity::Unknown);
//! ```

use std::borrow::Cow;

use serde::Serialize;

use crate::types::RiskSeverity;

/// 위험 플래그 정의
///
/// `related`는 대칭이 보장되지 않습니다 (A→B가 있어도 B→A가 없을 수 있음).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFlagDefinition {
    /// 위험 설명
    pub explanation: Cow<'static, str>,
    /// 한 줄 조치 방법
    pub remediation: Cow<'static, str>,
    /// 심각도
    pub severity: RiskSeverity,
    /// 단계별 조치 (순서 있음)
    pub detailed_steps: &'static [&'static str],
    /// 관련 플래그 이름
    pub related: &'static [&'static str],
}

/// 위험 레벨 정의
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevelDefinition {
    /// 레벨 의미
    pub definition: &'static str,
    /// 판정 기준
    pub criteria: &'static str,
    /// 권장 조치
    pub remediation: &'static str,
    /// 표시 색상
    pub color: &'static str,
}

/// 위험 분류 레지스트리
///
/// 플래그 테이블과 레벨 테이블은 삽입 순서를 유지하며, 초기화 후 변경되지 않습니다.
#[derive(Debug, Clone, Copy)]
pub struct RiskTaxonomy {
    flags: &'static [(&'static str, RiskFlagDefinition)],
    levels: &'static [(RiskSeverity, RiskLevelDefinition)],
}

impl RiskTaxonomy {
    /// 내장 테이블로 구성된 레지스트리를 반환합니다.
    pub const fn builtin() -> Self {
        Self {
            flags: RISK_FLAGS,
            levels: RISK_LEVELS,
        }
    }

    /// 플래그 정의를 조회합니다.
    ///
    /// 등록되지 않은 플래그는 심각도 `unknown`, 빈 단계/관련 목록,
    /// 플래그 이름을 포함한 설명을 가진 일반 정의를 반환합니다.
    pub fn lookup(&self, flag: &str) -> RiskFlagDefinition {
        match self.flags.iter().find(|(name, _)| *name == flag) {
            Some((_, def)) => def.clone(),
            None => RiskFlagDefinition {
                explanation: Cow::Owned(format!("Unknown risk flag: {flag}")),
                remediation: Cow::Borrowed("Review MCP configuration and capabilities manually."),
                severity: RiskSeverity::Unknown,
                detailed_steps: &[],
                related: &[],
            },
        }
    }

    /// 플래그의 심각도를 반환합니다.
    pub fn severity_of(&self, flag: &str) -> RiskSeverity {
        self.lookup(flag).severity
    }

    /// 등록된 플래그인지 확인합니다.
    pub fn is_known(&self, flag: &str) -> bool {
        self.flags.iter().any(|(name, _)| *name == flag)
    }

    /// 등록된 모든 플래그 이름 (레지스트리 순서)
    pub fn all_flags(&self) -> Vec<&'static str> {
        self.flags.iter().map(|(name, _)| *name).collect()
    }

    /// 특정 심각도의 플래그 이름 (레지스트리 순서 유지)
    pub fn flags_by_severity(&self, severity: RiskSeverity) -> Vec<&'static str> {
        self.flags
            .iter()
            .filter(|(_, def)| def.severity == severity)
            .map(|(name, _)| *name)
            .collect()
    }

    /// critical → low 순서로 묶은 플래그 그룹. 빈 그룹은 제외됩니다.
    pub fn flags_grouped_by_severity(&self) -> Vec<(RiskSeverity, Vec<&'static str>)> {
        RiskSeverity::DESCENDING
            .iter()
            .map(|sev| (*sev, self.flags_by_severity(*sev)))
            .filter(|(_, flags)| !flags.is_empty())
            .collect()
    }

    /// 레벨 이름으로 정의를 조회합니다.
    ///
    /// 대소문자만 무시하고 레벨 이름과 정확히 일치해야 합니다.
    /// 별칭(`med`)이나 앞뒤 공백이 있으면 `unknown` 정의를 반환합니다.
    pub fn level(&self, level: &str) -> &'static RiskLevelDefinition {
        let key = level.to_lowercase();
        let severity = self
            .levels
            .iter()
            .map(|(sev, _)| *sev)
            .find(|sev| sev.as_str() == key)
            .unwrap_or(RiskSeverity::Unknown);
        self.level_for(severity)
    }

    /// 심각도에 해당하는 레벨 정의
    pub fn level_for(&self, severity: RiskSeverity) -> &'static RiskLevelDefinition {
        let levels: &'static [(RiskSeverity, RiskLevelDefinition)] = self.levels;
        levels
            .iter()
            .find(|(sev, _)| *sev == severity)
            .or_else(|| levels.iter().find(|(sev, _)| *sev == RiskSeverity::Unknown))
            .map(|(_, def)| def)
            .unwrap_or(&UNKNOWN_LEVEL)
    }
}

impl Default for RiskTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

const UNKNOWN_LEVEL: RiskLevelDefinition = RiskLevelDefinition {
    definition: "Risk level could not be determined.",
    criteria: "MCP not found in registry or insufficient information to assess.",
    remediation: "Review MCP source code and capabilities manually before use.",
    color: "gray",
};

static RISK_LEVELS: &[(RiskSeverity, RiskLevelDefinition)] = &[
    (
        RiskSeverity::Critical,
        RiskLevelDefinition {
            definition: "MCP has capabilities that could lead to full system compromise if exploited.",
            criteria: "Shell/command execution, root filesystem write access, or admin-level cloud credentials.",
            remediation: "Remove unless absolutely required. If required, isolate in sandboxed environment and restrict to specific users.",
            color: "red",
        },
    ),
    (
        RiskSeverity::High,
        RiskLevelDefinition {
            definition: "MCP can access or modify sensitive data or systems.",
            criteria: "Database access, cloud API access, filesystem write access, or credentials in config.",
            remediation: "Restrict permissions to minimum required. Rotate any exposed credentials. Review access regularly.",
            color: "orange",
        },
    ),
    (
        RiskSeverity::Medium,
        RiskLevelDefinition {
            definition: "MCP has elevated access but limited blast radius.",
            criteria: "Third-party SaaS API access, read-only filesystem access, or network access.",
            remediation: "Verify MCP is from trusted source. Ensure credentials are scoped to minimum required permissions.",
            color: "yellow",
        },
    ),
    (
        RiskSeverity::Low,
        RiskLevelDefinition {
            definition: "MCP has minimal system access.",
            criteria: "Read-only access to non-sensitive data or public APIs.",
            remediation: "Verify MCP is from trusted source. No immediate action required.",
            color: "green",
        },
    ),
    (RiskSeverity::Unknown, UNKNOWN_LEVEL),
];

static RISK_FLAGS: &[(&str, RiskFlagDefinition)] = &[
    (
        "shell-access",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP can execute shell commands on the host system. An attacker exploiting prompt injection could run arbitrary commands.",
            ),
            remediation: Cow::Borrowed(
                "Remove shell access MCP unless absolutely required. If needed, restrict to specific allowed commands using a wrapper.",
            ),
            severity: RiskSeverity::Critical,
            detailed_steps: &[
                "Remove shell access MCP unless absolutely required for your workflow.",
                "If shell access is required, create a wrapper that restricts execution to a specific allowlist of commands.",
                "Run the MCP in an isolated container or sandbox environment.",
                "Monitor and log all shell commands executed through the MCP.",
            ],
            related: &["filesystem-write", "admin-credentials"],
        },
    ),
    (
        "filesystem-access",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP can read and/or write files on the host system. Could leak sensitive files or modify system configuration.",
            ),
            remediation: Cow::Borrowed(
                "Restrict to specific directories. Use read-only mode if writes are not required. Never allow access to home directory or system paths.",
            ),
            severity: RiskSeverity::High,
            detailed_steps: &[
                "Restrict filesystem access to specific directories only.",
                "Use read-only mode if write access is not required.",
                "Never allow access to home directory (~), system paths (/etc, /usr), or sensitive directories (.ssh, .aws).",
                "Consider using a sandboxed directory for MCP file operations.",
            ],
            related: &["filesystem-write", "shell-access"],
        },
    ),
    (
        "filesystem-write",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP can write files to the host system. Could be used to modify configs, drop malware, or corrupt data.",
            ),
            remediation: Cow::Borrowed(
                "Remove write access unless absolutely required. Restrict to a specific sandboxed directory.",
            ),
            severity: RiskSeverity::Critical,
            detailed_steps: &[
                "Remove filesystem write access unless absolutely required.",
                "Restrict write access to a specific sandboxed directory.",
                "Implement file type restrictions (e.g., only allow .txt, .json).",
                "Monitor for unexpected file creation or modification.",
            ],
            related: &["filesystem-access", "shell-access"],
        },
    ),
    (
        "database-access",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP can query or modify database contents. Could leak sensitive data or corrupt records.",
            ),
            remediation: Cow::Borrowed(
                "Use read-only database credentials. Restrict to specific tables/schemas. Never use admin credentials.",
            ),
            severity: RiskSeverity::High,
            detailed_steps: &[
                "Use read-only database credentials if writes are not required.",
                "Restrict access to specific tables or schemas only.",
                "Never use admin or superuser credentials.",
                "Create a dedicated database user with minimum required permissions.",
                "Enable query logging for audit purposes.",
            ],
            related: &["secrets-detected", "admin-credentials"],
        },
    ),
    (
        "network-access",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP can make outbound network requests. Could be used for SSRF attacks or data exfiltration.",
            ),
            remediation: Cow::Borrowed(
                "Restrict to specific allowed domains/IPs. Monitor outbound traffic for anomalies.",
            ),
            severity: RiskSeverity::Medium,
            detailed_steps: &[
                "Restrict network access to specific allowed domains or IP addresses.",
                "Use a proxy or firewall to monitor and filter outbound requests.",
                "Block access to internal network ranges (10.x.x.x, 192.168.x.x, etc.).",
                "Monitor for unusual data transfer patterns.",
            ],
            related: &["secrets-detected"],
        },
    ),
    (
        "secrets-detected",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "API keys, tokens, or passwords are visible in the MCP configuration file.",
            ),
            remediation: Cow::Borrowed(
                "Immediately rotate the exposed credential. Move secrets to environment variables or a secrets manager. Never commit credentials to config files.",
            ),
            severity: RiskSeverity::Critical,
            detailed_steps: &[
                "IMMEDIATELY rotate the exposed credential.",
                "Move secrets to environment variables or a secrets manager.",
                "Update the MCP configuration to reference environment variables.",
                "Never commit credentials to configuration files.",
                "Review git history for any previously committed secrets.",
            ],
            related: &["admin-credentials"],
        },
    ),
    (
        "secrets-in-env",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "Environment variables in config appear to contain sensitive credentials.",
            ),
            remediation: Cow::Borrowed(
                "Rotate credentials if exposed. Use a secrets manager instead of plain environment variables where possible.",
            ),
            severity: RiskSeverity::High,
            detailed_steps: &[
                "Verify that environment variables are not logged or exposed.",
                "Consider using a secrets manager for sensitive credentials.",
                "Ensure config files with env references are not committed to version control.",
                "Rotate any credentials that may have been exposed.",
            ],
            related: &["secrets-detected"],
        },
    ),
    (
        "unverified-source",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP is not from a known/verified publisher. Its behavior and security posture are unknown.",
            ),
            remediation: Cow::Borrowed(
                "Review the MCP source code before use. Prefer official or verified MCPs when available. If custom, ensure security review.",
            ),
            severity: RiskSeverity::Medium,
            detailed_steps: &[
                "Review the MCP source code before deployment.",
                "Check for known vulnerabilities or security issues.",
                "Prefer official or verified MCPs from trusted publishers.",
                "If using a custom MCP, ensure it undergoes security review.",
                "Consider running unverified MCPs in an isolated environment.",
            ],
            related: &["local-binary"],
        },
    ),
    (
        "local-binary",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP runs a local binary or script. Its behavior is determined by the local file, which may have been modified.",
            ),
            remediation: Cow::Borrowed(
                "Verify the integrity of the local binary. Use checksums or signatures where possible. Ensure the binary has not been tampered with.",
            ),
            severity: RiskSeverity::Medium,
            detailed_steps: &[
                "Verify the integrity of the local binary using checksums.",
                "Ensure the binary has not been modified since deployment.",
                "Store binaries in a protected directory with restricted write access.",
                "Consider code-signing for internal MCP binaries.",
                "Review the source code if available.",
            ],
            related: &["unverified-source"],
        },
    ),
    (
        "inferred-capability",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This capability was detected from code patterns, not explicitly declared. Actual behavior may differ.",
            ),
            remediation: Cow::Borrowed(
                "Review MCP source code to confirm actual capabilities. Treat inferred capabilities as potential risks.",
            ),
            severity: RiskSeverity::Low,
            detailed_steps: &[
                "Review the MCP source code to confirm actual capabilities.",
                "Test the MCP in a sandbox to verify behavior.",
                "Treat inferred capabilities as potential risks until confirmed.",
            ],
            related: &[],
        },
    ),
    (
        "admin-credentials",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "MCP is configured with admin-level credentials, granting excessive permissions.",
            ),
            remediation: Cow::Borrowed(
                "Replace with scoped credentials that have minimum required permissions. Create a dedicated service account.",
            ),
            severity: RiskSeverity::Critical,
            detailed_steps: &[
                "Create a dedicated service account with minimum required permissions.",
                "Replace admin credentials with scoped credentials.",
                "Document the specific permissions required by the MCP.",
                "Implement credential rotation on a regular schedule.",
                "Enable audit logging for the service account.",
            ],
            related: &["secrets-detected", "database-access"],
        },
    ),
    (
        "duplicate-capability",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "Multiple MCPs provide the same capability, expanding attack surface unnecessarily.",
            ),
            remediation: Cow::Borrowed(
                "Remove duplicate MCPs. Consolidate to a single, trusted MCP for each capability.",
            ),
            severity: RiskSeverity::Low,
            detailed_steps: &[
                "Identify all MCPs providing the same capability.",
                "Choose the most trusted and well-maintained MCP.",
                "Remove duplicate MCPs to reduce attack surface.",
                "Document which MCP is approved for each capability.",
            ],
            related: &[],
        },
    ),
    (
        "remote-mcp",
        RiskFlagDefinition {
            explanation: Cow::Borrowed(
                "This MCP connects to a remote server via URL. Network availability and server security affect reliability.",
            ),
            remediation: Cow::Borrowed(
                "Verify the remote server is trusted and secure. Use HTTPS only. Consider fallback behavior if server is unavailable.",
            ),
            severity: RiskSeverity::Medium,
            detailed_steps: &[
                "Verify the remote server is from a trusted source.",
                "Ensure HTTPS is used for all connections.",
                "Validate SSL/TLS certificates.",
                "Consider what happens if the remote server is unavailable.",
                "Monitor for unexpected changes in server behavior.",
            ],
            related: &["network-access"],
        },
    ),
];
