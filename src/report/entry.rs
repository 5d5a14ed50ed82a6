use std::fmt;

/// Outcome of one test or lint rule hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Passed,
    Failed,
    Warning,
    Skipped,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryStatus::Passed => "passed",
            EntryStatus::Failed => "failed",
            EntryStatus::Warning => "warning",
            EntryStatus::Skipped => "skipped",
        };
        write!(f, "{}", name)
    }
}

/// Common shape both report converters work from
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Test display name, or the lint rule title
    pub name: String,
    /// Grouping key: the test's parent path, or the lint rule group
    pub group: String,
    pub status: EntryStatus,
    pub message: String,
    /// Seconds, zero when the source has no timing
    pub duration: f64,
    /// Asset or file the entry points at, if any
    pub location: Option<String>,
}

impl ReportEntry {
    pub fn new(name: impl Into<String>, status: EntryStatus) -> Self {
        ReportEntry {
            name: name.into(),
            group: String::new(),
            status,
            message: String::new(),
            duration: 0.0,
            location: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Per-status totals of a report
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub skipped: usize,
    pub duration: f64,
}

impl ReportSummary {
    pub fn of(entries: &[ReportEntry]) -> Self {
        entries.iter().fold(ReportSummary::default(), |mut summary, entry| {
            summary.total += 1;
            summary.duration += entry.duration;
            match entry.status {
                EntryStatus::Passed => summary.passed += 1,
                EntryStatus::Failed => summary.failed += 1,
                EntryStatus::Warning => summary.warnings += 1,
                EntryStatus::Skipped => summary.skipped += 1,
            }
            summary
        })
    }
}
