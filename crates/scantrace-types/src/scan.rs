use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scan lifecycle status, as reported by the job service.
///
/// `queued → running → {completed | failed}`. Anything the client does not
/// recognize is carried as `Other` and treated as "keep polling", since the
/// status vocabulary belongs to the server and may grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScanStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl ScanStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => ScanStatus::Queued,
            "running" => ScanStatus::Running,
            "completed" => ScanStatus::Completed,
            "failed" => ScanStatus::Failed,
            other => ScanStatus::Other(other.to_string()),
        }
    }

    /// Terminal statuses end the polling loop; no further actions are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ScanStatus::Queued => "queued",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
            ScanStatus::Other(s) => s,
        }
    }
}

impl From<String> for ScanStatus {
    fn from(s: String) -> Self {
        ScanStatus::parse(&s)
    }
}

impl From<ScanStatus> for String {
    fn from(status: ScanStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final report submitted by the agent when a scan completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub findings: Vec<Finding>,
}

impl Report {
    /// True if any finding is severe enough to fail a CI gate.
    pub fn has_blocking_findings(&self) -> bool {
        self.findings.iter().any(|f| f.is_blocking())
    }
}

/// One reported vulnerability or issue. Shape is agent-controlled, so every
/// field is optional; extra fields are retained for JSON passthrough.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Finding {
    pub fn is_blocking(&self) -> bool {
        self.severity
            .as_deref()
            .map(|s| {
                let s = s.to_ascii_lowercase();
                s == "critical" || s == "high"
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!(ScanStatus::parse("queued"), ScanStatus::Queued);
        assert_eq!(ScanStatus::parse("running"), ScanStatus::Running);
        assert_eq!(ScanStatus::parse("completed"), ScanStatus::Completed);
        assert_eq!(ScanStatus::parse("failed"), ScanStatus::Failed);
    }

    #[test]
    fn test_unrecognized_status_is_not_terminal() {
        let status = ScanStatus::parse("paused");
        assert_eq!(status, ScanStatus::Other("paused".to_string()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_roundtrips_through_serde() {
        let status: ScanStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status, ScanStatus::Running);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"running\"");
    }

    #[test]
    fn test_finding_severity_gate() {
        let critical = Finding {
            severity: Some("Critical".to_string()),
            ..Default::default()
        };
        let low = Finding {
            severity: Some("low".to_string()),
            ..Default::default()
        };
        let missing = Finding::default();

        assert!(critical.is_blocking());
        assert!(!low.is_blocking());
        assert!(!missing.is_blocking());
    }

    #[test]
    fn test_report_deserializes_loose_findings() {
        let report: Report = serde_json::from_value(serde_json::json!({
            "summary": "two issues",
            "findings": [
                {"title": "SQLi", "severity": "high", "cwe": "CWE-89"},
                {"severity": "info"}
            ]
        }))
        .unwrap();

        assert_eq!(report.findings.len(), 2);
        assert!(report.has_blocking_findings());
        assert_eq!(report.findings[0].extra["cwe"], "CWE-89");
    }
}
