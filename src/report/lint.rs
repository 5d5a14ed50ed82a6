//! Linter v2 JSON report reading.
//!
//! ```json
//! { "Result": false, "Warnings": 1, "Errors": 1,
//!   "Violators": [ { "ViolatorAssetPath": "/Game/Maps/Main",
//!                    "Violations": [ { "RuleGroup": "Marketplace", "RuleTitle": "Naming",
//!                                      "RuleRecommendedAction": "Rename", "bIsError": true } ] } ] }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, UnrealCiError};
use crate::report::{EntryStatus, ReportEntry};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LintReport {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub warnings: Option<u64>,
    #[serde(default)]
    pub errors: Option<u64>,
    #[serde(default)]
    pub violators: Vec<Violator>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Violator {
    #[serde(default, alias = "ViolatorFullName", alias = "ViolatorAssetName")]
    pub violator_asset_path: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Violation {
    #[serde(default)]
    pub rule_group: String,
    #[serde(default, alias = "RuleName")]
    pub rule_title: String,
    #[serde(default)]
    pub rule_desc: String,
    #[serde(default, alias = "RecommendedAction")]
    pub rule_recommended_action: String,
    #[serde(default, rename = "bIsError")]
    pub is_error: Option<bool>,
    #[serde(default)]
    pub rule_severity: Option<String>,
}

impl Violation {
    pub fn status(&self) -> EntryStatus {
        let severity_error = self
            .rule_severity
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("error"));
        if self.is_error.unwrap_or(false) || severity_error {
            EntryStatus::Failed
        } else {
            EntryStatus::Warning
        }
    }

    fn message(&self) -> String {
        match (self.rule_desc.is_empty(), self.rule_recommended_action.is_empty()) {
            (false, false) => format!("{} {}", self.rule_desc, self.rule_recommended_action),
            (false, true) => self.rule_desc.clone(),
            (true, false) => self.rule_recommended_action.clone(),
            (true, true) => self.rule_title.clone(),
        }
    }
}

/// Parse a Linter v2 report from JSON text, tolerating a leading BOM.
pub fn parse_lint_json(text: &str) -> Result<LintReport> {
    serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| UnrealCiError::report(format!("invalid lint report: {}", e)))
}

/// Read a Linter v2 report from disk.
pub fn read_lint_report(path: &Path) -> Result<LintReport> {
    let text = fs::read_to_string(path).map_err(|e| {
        UnrealCiError::report(format!("cannot read lint report {}: {}", path.display(), e))
    })?;
    parse_lint_json(&text)
}

/// One entry per violation, in report order.
pub fn lint_entries(report: &LintReport) -> Vec<ReportEntry> {
    report
        .violators
        .iter()
        .flat_map(|violator| {
            violator.violations.iter().map(move |violation| {
                ReportEntry::new(violation.rule_title.clone(), violation.status())
                    .with_group(violation.rule_group.clone())
                    .with_message(violation.message())
                    .with_location(violator.violator_asset_path.clone())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "Result": false,
        "Warnings": 1,
        "Errors": 1,
        "Violators": [
            {
                "ViolatorAssetPath": "/Game/Maps/Main",
                "Violations": [
                    { "RuleGroup": "Marketplace", "RuleTitle": "Texture size", "RuleDesc": "Not a power of two.", "bIsError": true },
                    { "RuleGroup": "Naming", "RuleTitle": "Prefix", "RuleRecommendedAction": "Rename to BP_Main.", "bIsError": false }
                ]
            },
            { "ViolatorAssetPath": "/Game/Clean", "Violations": [] }
        ]
    }"#;

    #[test]
    fn test_lint_entries() {
        let report = parse_lint_json(REPORT).unwrap();
        let entries = lint_entries(&report);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Texture size");
        assert_eq!(entries[0].group, "Marketplace");
        assert_eq!(entries[0].status, EntryStatus::Failed);
        assert_eq!(entries[0].message, "Not a power of two.");
        assert_eq!(entries[0].location.as_deref(), Some("/Game/Maps/Main"));
        assert_eq!(entries[1].status, EntryStatus::Warning);
        assert_eq!(entries[1].message, "Rename to BP_Main.");
    }

    #[test]
    fn test_severity_string() {
        let violation: Violation =
            serde_json::from_str(r#"{ "RuleTitle": "x", "RuleSeverity": "Error" }"#).unwrap();
        assert_eq!(violation.status(), EntryStatus::Failed);
    }

    #[test]
    fn test_bom_and_empty_report() {
        let report = parse_lint_json("\u{feff}{}").unwrap();
        assert!(lint_entries(&report).is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_lint_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("invalid lint report"));
    }
}
