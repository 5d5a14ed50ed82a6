//! TeamCity service message rendering.

use std::collections::HashSet;

use crate::report::{EntryStatus, ReportEntry, ReportSummary};

/// Escape a value for use inside a `'...'` service message attribute.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => escaped.push_str("||"),
            '\'' => escaped.push_str("|'"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            '\u{0085}' => escaped.push_str("|x"),
            '\u{2028}' => escaped.push_str("|l"),
            '\u{2029}' => escaped.push_str("|p"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `##teamcity[name key='value' ...]`
pub fn message(name: &str, attributes: &[(&str, &str)]) -> String {
    let mut line = format!("##teamcity[{}", name);
    for (key, value) in attributes {
        line.push_str(&format!(" {}='{}'", key, escape(value)));
    }
    line.push(']');
    line
}

fn inspection_type_id(entry: &ReportEntry) -> String {
    if entry.group.is_empty() {
        entry.name.clone()
    } else {
        format!("{}.{}", entry.group, entry.name)
    }
}

/// Render lint entries as inspection messages, followed by statistics and,
/// when any entry failed, a build problem.
pub fn render_inspections(entries: &[ReportEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut declared = HashSet::new();

    for entry in entries {
        let type_id = inspection_type_id(entry);
        if declared.insert(type_id.clone()) {
            let category = if entry.group.is_empty() {
                "Lint"
            } else {
                entry.group.as_str()
            };
            lines.push(message(
                "inspectionType",
                &[
                    ("id", type_id.as_str()),
                    ("name", entry.name.as_str()),
                    ("description", entry.name.as_str()),
                    ("category", category),
                ],
            ));
        }

        let severity = match entry.status {
            EntryStatus::Failed => "ERROR",
            EntryStatus::Warning => "WARNING",
            EntryStatus::Passed | EntryStatus::Skipped => "INFO",
        };
        let file = entry.location.as_deref().unwrap_or("");
        lines.push(message(
            "inspection",
            &[
                ("typeId", type_id.as_str()),
                ("message", entry.message.as_str()),
                ("file", file),
                ("SEVERITY", severity),
            ],
        ));
    }

    let summary = ReportSummary::of(entries);
    lines.push(message(
        "buildStatisticValue",
        &[("key", "LintErrors"), ("value", summary.failed.to_string().as_str())],
    ));
    lines.push(message(
        "buildStatisticValue",
        &[("key", "LintWarnings"), ("value", summary.warnings.to_string().as_str())],
    ));

    if summary.failed > 0 {
        lines.push(message(
            "buildProblem",
            &[
                (
                    "description",
                    format!("Linter reported {} error(s)", summary.failed).as_str(),
                ),
                ("identity", "unreal-ci-lint"),
            ],
        ));
    }

    lines
}
