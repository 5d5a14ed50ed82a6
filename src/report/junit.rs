//! Unreal automation test output (`index.json`) to JUnit XML.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, UnrealCiError};
use crate::report::{EntryStatus, ReportEntry, ReportSummary};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutomationReport {
    #[serde(default)]
    pub succeeded: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub not_run: u64,
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub tests: Vec<AutomationTest>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutomationTest {
    #[serde(default)]
    pub test_display_name: String,
    #[serde(default)]
    pub full_test_path: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub entries: Vec<AutomationEntry>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutomationEntry {
    #[serde(default)]
    pub event: AutomationEvent,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub line_number: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct AutomationEvent {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

impl AutomationTest {
    fn status(&self) -> EntryStatus {
        match self.state.as_str() {
            "Success" => EntryStatus::Passed,
            "Fail" => EntryStatus::Failed,
            _ => EntryStatus::Skipped,
        }
    }

    /// Parent of the dotted test path, used as the JUnit class name.
    fn class_name(&self) -> &str {
        match self.full_test_path.rsplit_once('.') {
            Some((parent, _)) if !parent.is_empty() => parent,
            _ => &self.full_test_path,
        }
    }

    fn name(&self) -> &str {
        if self.test_display_name.is_empty() {
            &self.full_test_path
        } else {
            &self.test_display_name
        }
    }

    fn failure_message(&self) -> String {
        let errors: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.event.kind.eq_ignore_ascii_case("error"))
            .map(|entry| {
                if entry.filename.is_empty() || entry.line_number < 0 {
                    entry.event.message.clone()
                } else {
                    format!(
                        "{} ({}:{})",
                        entry.event.message, entry.filename, entry.line_number
                    )
                }
            })
            .collect();
        errors.join("\n")
    }
}

/// Parse automation output from JSON text, tolerating the BOM Unreal writes.
pub fn parse_automation_json(text: &str) -> Result<AutomationReport> {
    serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| UnrealCiError::report(format!("invalid automation report: {}", e)))
}

/// Read automation output from disk.
pub fn read_automation_report(path: &Path) -> Result<AutomationReport> {
    let text = fs::read_to_string(path).map_err(|e| {
        UnrealCiError::report(format!(
            "cannot read automation report {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_automation_json(&text)
}

/// One entry per test, in report order.
pub fn automation_entries(report: &AutomationReport) -> Vec<ReportEntry> {
    report
        .tests
        .iter()
        .map(|test| {
            let status = test.status();
            let message = match status {
                EntryStatus::Failed => {
                    let message = test.failure_message();
                    if message.is_empty() {
                        "Test failed".to_string()
                    } else {
                        message
                    }
                }
                _ => String::new(),
            };
            ReportEntry::new(test.name(), status)
                .with_group(test.class_name())
                .with_message(message)
                .with_duration(test.duration)
        })
        .collect()
}

/// XML 1.0 cannot carry most C0 control characters, even escaped.
fn strip_control_chars(value: &str) -> String {
    value
        .chars()
        .filter(|c| (*c as u32) >= 0x20 || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

fn xml_error(e: quick_xml::Error) -> UnrealCiError {
    UnrealCiError::report(format!("cannot render JUnit report: {}", e))
}

fn suite_start<'a>(tag: &'a str, name: &str, summary: &ReportSummary) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("name", name));
    start.push_attribute(("tests", summary.total.to_string().as_str()));
    start.push_attribute(("failures", summary.failed.to_string().as_str()));
    if tag == "testsuite" {
        start.push_attribute(("errors", "0"));
    }
    start.push_attribute(("skipped", summary.skipped.to_string().as_str()));
    start.push_attribute(("time", format!("{:.3}", summary.duration).as_str()));
    start
}

/// Render entries as a single-suite JUnit document.
pub fn render_junit(suite_name: &str, entries: &[ReportEntry]) -> Result<String> {
    let summary = ReportSummary::of(entries);
    let suite = strip_control_chars(suite_name);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(suite_start("testsuites", &suite, &summary)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(suite_start("testsuite", &suite, &summary)))
        .map_err(xml_error)?;

    for entry in entries {
        let mut testcase = BytesStart::new("testcase");
        testcase.push_attribute(("name", strip_control_chars(&entry.name).as_str()));
        testcase.push_attribute(("classname", strip_control_chars(&entry.group).as_str()));
        testcase.push_attribute(("time", format!("{:.3}", entry.duration).as_str()));

        match entry.status {
            EntryStatus::Failed => {
                let message = strip_control_chars(&entry.message);
                let headline = message.lines().next().unwrap_or("");
                let mut failure = BytesStart::new("failure");
                failure.push_attribute(("message", headline));

                writer.write_event(Event::Start(testcase)).map_err(xml_error)?;
                writer.write_event(Event::Start(failure)).map_err(xml_error)?;
                writer
                    .write_event(Event::Text(BytesText::new(&message)))
                    .map_err(xml_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new("failure")))
                    .map_err(xml_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new("testcase")))
                    .map_err(xml_error)?;
            }
            EntryStatus::Skipped => {
                writer.write_event(Event::Start(testcase)).map_err(xml_error)?;
                writer
                    .write_event(Event::Empty(BytesStart::new("skipped")))
                    .map_err(xml_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new("testcase")))
                    .map_err(xml_error)?;
            }
            EntryStatus::Passed | EntryStatus::Warning => {
                writer.write_event(Event::Empty(testcase)).map_err(xml_error)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("testsuite")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("testsuites")))
        .map_err(xml_error)?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    String::from_utf8(xml).map_err(|e| UnrealCiError::report(format!("cannot render JUnit report: {}", e)))
}

/// Convert the automation report at `json_path` into a JUnit file at `out_path`.
///
/// Parent directories of `out_path` are created as needed.
pub fn parse_test_output(json_path: &Path, out_path: &Path, suite_name: &str) -> Result<ReportSummary> {
    let report = read_automation_report(json_path)?;
    let entries = automation_entries(&report);
    let xml = render_junit(suite_name, &entries)?;

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out_path, xml)?;

    let summary = ReportSummary::of(&entries);
    tracing::info!(
        tests = summary.total,
        failed = summary.failed,
        out = %out_path.display(),
        "wrote JUnit report"
    );
    Ok(summary)
}
