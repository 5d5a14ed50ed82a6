use crate::error::ParseError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn version_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:([-+])([0-9A-Za-z][0-9A-Za-z.+-]*))?$",
            )
            .ok()
        })
        .as_ref()
}

/// How a label is joined to the numeric core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSeparator {
    /// `-label`, a pre-release marker
    PreRelease,
    /// `+label`, build metadata such as a task number
    Build,
}

impl LabelSeparator {
    pub fn as_char(self) -> char {
        match self {
            LabelSeparator::PreRelease => '-',
            LabelSeparator::Build => '+',
        }
    }
}

/// Free-form suffix of a version, kept with its separator so it prints back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub separator: LabelSeparator,
    pub text: String,
}

impl Label {
    pub fn pre_release(text: impl Into<String>) -> Self {
        Label {
            separator: LabelSeparator::PreRelease,
            text: text.into(),
        }
    }

    pub fn build(text: impl Into<String>) -> Self {
        Label {
            separator: LabelSeparator::Build,
            text: text.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.separator.as_char(), self.text)
    }
}

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub label: Option<Label>,
}

impl Version {
    /// Create a new version without a label
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            label: None,
        }
    }

    /// Same numeric core with `label` attached, replacing any existing one
    pub fn with_label(self, label: Label) -> Self {
        Version {
            label: Some(label),
            ..self
        }
    }

    /// Parse `MAJOR.MINOR.PATCH`, optionally followed by `-label` or `+label`.
    ///
    /// Components must be plain decimal numbers without leading zeros that fit in a `u32`,
    /// so that `Version::parse(s)?.to_string() == s` holds for every accepted input.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let captures = version_pattern()
            .and_then(|re| re.captures(input))
            .ok_or_else(|| ParseError::malformed_version(input))?;

        let component = |index: usize| -> Result<u32, ParseError> {
            captures[index]
                .parse::<u32>()
                .map_err(|_| ParseError::malformed_version(input))
        };

        let label = match (captures.get(4), captures.get(5)) {
            (Some(separator), Some(text)) => Some(Label {
                separator: if separator.as_str() == "+" {
                    LabelSeparator::Build
                } else {
                    LabelSeparator::PreRelease
                },
                text: text.as_str().to_string(),
            }),
            _ => None,
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            label,
        })
    }

    /// Lossy conversion used only for precedence comparisons.
    ///
    /// Labels that semver rejects (for example `-rc.01`) are dropped instead of failing.
    pub fn to_semver(&self) -> semver::Version {
        let mut version = semver::Version::new(
            u64::from(self.major),
            u64::from(self.minor),
            u64::from(self.patch),
        );
        if let Some(label) = &self.label {
            match label.separator {
                LabelSeparator::PreRelease => {
                    if let Some((pre, build)) = label.text.split_once('+') {
                        version.pre = semver::Prerelease::new(pre).unwrap_or_default();
                        version.build = semver::BuildMetadata::new(build).unwrap_or_default();
                    } else {
                        version.pre = semver::Prerelease::new(&label.text).unwrap_or_default();
                    }
                }
                LabelSeparator::Build => {
                    version.build = semver::BuildMetadata::new(&label.text).unwrap_or_default();
                }
            }
        }
        version
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(label) = &self.label {
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}
