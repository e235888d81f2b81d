//! JSON invocation report
//!
//! --format json implementation

use serde::{Deserialize, Serialize};

use crate::allowlist::Allowlist;
use crate::invoker::InvocationOutcome;
use crate::router::{Diagnostic, Stream};

/// A routed diagnostic in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// The fixed warning header line
    pub header: String,
    /// Stream the diagnostic was written to ("informational" or "error")
    pub stream: String,
    /// Flagged arguments, verbatim
    pub arguments: Vec<String>,
    /// Whether this diagnostic alone failed the invocation
    pub causes_failure: bool,
}

/// Provenance of the allowlist used for classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAllowlist {
    /// "built-in", "inline", or the configuration file path
    pub source: String,
    /// Compiler release the allowlist was vetted against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,
}

/// Summary of the invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Exit code of the wrapped compiler
    pub compiler_exit_code: i32,
    /// Whether the invocation as a whole failed
    pub failed: bool,
}

/// Root JSON report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Allowlisted extra compiler arguments, in configured order
    pub safe_arguments: Vec<String>,
    /// Flagged extra compiler arguments, in configured order
    pub flagged_arguments: Vec<String>,
    /// The routed diagnostic, absent when nothing was flagged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<JsonDiagnostic>,
    /// Allowlist provenance
    pub allowlist: JsonAllowlist,
    /// Invocation summary
    pub summary: JsonSummary,
}

fn stream_name(stream: Stream) -> &'static str {
    match stream {
        Stream::Informational => "informational",
        Stream::Error => "error",
    }
}

fn json_diagnostic(diagnostic: &Diagnostic) -> JsonDiagnostic {
    JsonDiagnostic {
        header: diagnostic.header.to_string(),
        stream: stream_name(diagnostic.stream).to_string(),
        arguments: diagnostic.arguments.clone(),
        causes_failure: diagnostic.causes_failure,
    }
}

impl JsonReport {
    /// Build a report from a completed invocation
    pub fn from_outcome(outcome: &InvocationOutcome, allowlist: &Allowlist) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "flagward-json-v1".to_string(),
            safe_arguments: outcome.classification.safe.clone(),
            flagged_arguments: outcome.classification.flagged.clone(),
            diagnostic: outcome.diagnostic.as_ref().map(json_diagnostic),
            allowlist: JsonAllowlist {
                source: allowlist.source().to_string(),
                compiler_version: allowlist.compiler_version().map(String::from),
            },
            summary: JsonSummary {
                compiler_exit_code: outcome.compiler_exit_code,
                failed: outcome.failed,
            },
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classification;
    use crate::router::UNSAFE_ARGUMENTS_WARNING_HEADER;

    fn outcome_with(diagnostic: Option<Diagnostic>, failed: bool) -> InvocationOutcome {
        InvocationOutcome {
            compiler_exit_code: 0,
            classification: Classification {
                safe: vec!["-Xsafe".to_string()],
                flagged: diagnostic
                    .as_ref()
                    .map(|d| d.arguments.clone())
                    .unwrap_or_default(),
            },
            diagnostic,
            failed,
        }
    }

    #[test]
    fn test_report_without_diagnostic() {
        let report = JsonReport::from_outcome(&outcome_with(None, false), &Allowlist::built_in());

        assert_eq!(report.format, "flagward-json-v1");
        assert_eq!(report.safe_arguments, vec!["-Xsafe"]);
        assert!(report.flagged_arguments.is_empty());
        assert!(report.diagnostic.is_none());
        assert_eq!(report.allowlist.source, "built-in");
        assert!(!report.summary.failed);
    }

    #[test]
    fn test_report_with_escalated_diagnostic() {
        let diagnostic = Diagnostic {
            stream: Stream::Error,
            header: UNSAFE_ARGUMENTS_WARNING_HEADER,
            arguments: vec!["-Xunvetted".to_string()],
            causes_failure: true,
        };
        let report =
            JsonReport::from_outcome(&outcome_with(Some(diagnostic), true), &Allowlist::built_in());

        let json_diagnostic = report.diagnostic.unwrap();
        assert_eq!(json_diagnostic.stream, "error");
        assert_eq!(json_diagnostic.header, UNSAFE_ARGUMENTS_WARNING_HEADER);
        assert_eq!(json_diagnostic.arguments, vec!["-Xunvetted"]);
        assert!(json_diagnostic.causes_failure);
        assert!(report.summary.failed);
    }

    #[test]
    fn test_json_serialization() {
        let diagnostic = Diagnostic {
            stream: Stream::Informational,
            header: UNSAFE_ARGUMENTS_WARNING_HEADER,
            arguments: vec!["-Xunvetted".to_string()],
            causes_failure: false,
        };
        let report = JsonReport::from_outcome(
            &outcome_with(Some(diagnostic), false),
            &Allowlist::built_in(),
        );

        let json = report.to_json().unwrap();
        assert!(json.contains("\"format\": \"flagward-json-v1\""));
        assert!(json.contains("\"stream\": \"informational\""));
        assert!(json.contains("-Xunvetted"));
        assert!(json.contains("\"compiler_exit_code\": 0"));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let report = JsonReport::from_outcome(&outcome_with(None, false), &Allowlist::built_in());
        let json = serde_json::to_string(&report).unwrap();

        // Absent diagnostic and compiler_version are omitted entirely
        assert!(!json.contains("\"diagnostic\""));
        assert!(!json.contains("compiler_version"));
    }
}
