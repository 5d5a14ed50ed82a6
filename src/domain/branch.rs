use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// The line of work a Perforce-style branch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Release,
    Development,
    Patch,
    Task,
}

impl BranchKind {
    /// Every kind with its lower-case branch prefix
    pub const ALL: [(BranchKind, &'static str); 4] = [
        (BranchKind::Release, "rel"),
        (BranchKind::Development, "dev"),
        (BranchKind::Patch, "patch"),
        (BranchKind::Task, "task"),
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            BranchKind::Release => "rel",
            BranchKind::Development => "dev",
            BranchKind::Patch => "patch",
            BranchKind::Task => "task",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BranchKind::Release => "release",
            BranchKind::Development => "development",
            BranchKind::Patch => "patch",
            BranchKind::Task => "task",
        };
        write!(f, "{}", name)
    }
}

/// A classified branch such as `rel0.2`, `dev0.1`, `patch4.3` or `task9.4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchToken {
    pub kind: BranchKind,
    pub major: u32,
    pub minor: u32,
}

impl BranchToken {
    pub fn new(kind: BranchKind, major: u32, minor: u32) -> Self {
        BranchToken { kind, major, minor }
    }

    /// Parse a branch name of the form `<prefix><major>.<minor>`.
    ///
    /// The prefix is matched case-insensitively, longest known prefix first. An unknown
    /// prefix is an error rather than a fallback to some default kind.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let lowered = input.to_lowercase();

        let mut prefixes = BranchKind::ALL;
        prefixes.sort_by_key(|(_, prefix)| std::cmp::Reverse(prefix.len()));

        let (kind, suffix) = prefixes
            .iter()
            .find_map(|(kind, prefix)| lowered.strip_prefix(prefix).map(|rest| (*kind, rest)))
            .ok_or_else(|| ParseError::unknown_branch_kind(input))?;

        let (major, minor) = suffix
            .split_once('.')
            .ok_or_else(|| ParseError::malformed_branch_suffix(input))?;

        Ok(BranchToken {
            kind,
            major: parse_component(major, input)?,
            minor: parse_component(minor, input)?,
        })
    }
}

fn parse_component(component: &str, input: &str) -> Result<u32, ParseError> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::malformed_branch_suffix(input));
    }
    component
        .parse::<u32>()
        .map_err(|_| ParseError::malformed_branch_suffix(input))
}

impl FromStr for BranchToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BranchToken::parse(s)
    }
}

impl fmt::Display for BranchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{}", self.kind.prefix(), self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_examples() {
        assert_eq!(
            BranchToken::parse("rel0.2").unwrap(),
            BranchToken::new(BranchKind::Release, 0, 2)
        );
        assert_eq!(
            BranchToken::parse("dev0.1").unwrap(),
            BranchToken::new(BranchKind::Development, 0, 1)
        );
        assert_eq!(
            BranchToken::parse("patch4.3").unwrap(),
            BranchToken::new(BranchKind::Patch, 4, 3)
        );
        assert_eq!(
            BranchToken::parse("task9.4").unwrap(),
            BranchToken::new(BranchKind::Task, 9, 4)
        );
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let token = BranchToken::parse("REL1.2").unwrap();
        assert_eq!(token.kind, BranchKind::Release);

        let token = BranchToken::parse("Patch0.7").unwrap();
        assert_eq!(token, BranchToken::new(BranchKind::Patch, 0, 7));
    }

    #[test]
    fn test_every_kind_parses() {
        for (kind, prefix) in BranchKind::ALL {
            for (major, minor) in [(0, 0), (1, 2), (12, 345)] {
                let input = format!("{}{}.{}", prefix, major, minor);
                let token = BranchToken::parse(&input).unwrap();
                assert_eq!(token, BranchToken::new(kind, major, minor));
                assert_eq!(token.to_string(), input);
            }
        }
    }

    #[test]
    fn test_unknown_prefix() {
        for input in ["main", "feature1.2", "1.2", "", "r1.2", "//depot/rel1.2"] {
            assert_eq!(
                BranchToken::parse(input),
                Err(ParseError::unknown_branch_kind(input)),
                "expected '{}' to have an unknown kind",
                input
            );
        }
    }

    #[test]
    fn test_malformed_suffix() {
        for input in [
            "rel", "rel1", "rel1.", "release1.0", "rel.2", "rel1.2.3", "dev-1.2", "task1.x", "patch 1.2",
            "dev99999999999.1",
        ] {
            assert_eq!(
                BranchToken::parse(input),
                Err(ParseError::malformed_branch_suffix(input)),
                "expected '{}' to have a malformed suffix",
                input
            );
        }
    }
}
