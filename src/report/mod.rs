//! CI report conversion
//!
//! Both converters read a JSON document into [ReportEntry] values and render them
//! in a format the CI server understands:
//!
//! - [lint]: Linter v2 output → TeamCity inspection service messages
//! - [junit]: Unreal automation `index.json` → JUnit XML

pub mod entry;
pub mod junit;
pub mod lint;
pub mod teamcity;

pub use entry::{EntryStatus, ReportEntry, ReportSummary};
pub use junit::parse_test_output;

use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Print the lint report at `json_path` as TeamCity service messages to `out`.
///
/// Errors in the report do not fail the call; TeamCity fails the build through the
/// emitted `buildProblem` message.
pub fn parse_lint_report(json_path: &Path, out: &mut impl Write) -> Result<ReportSummary> {
    let report = lint::read_lint_report(json_path)?;
    let entries = lint::lint_entries(&report);

    for line in teamcity::render_inspections(&entries) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    let summary = ReportSummary::of(&entries);
    tracing::info!(
        errors = summary.failed,
        warnings = summary.warnings,
        "converted lint report"
    );
    Ok(summary)
}
