//! Line-preserving lookup and edit of a single `Key=Value` entry in an INI document.
//!
//! Only the bytes of the targeted value ever change; comments, ordering, blank lines,
//! line endings and a leading byte order mark pass through untouched.

use std::ops::Range;

const BOM: char = '\u{feff}';

/// Section and key that hold the project version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniKey {
    pub section: String,
    pub key: String,
}

impl IniKey {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        IniKey {
            section: section.into(),
            key: key.into(),
        }
    }
}

impl Default for IniKey {
    fn default() -> Self {
        IniKey::new(
            "/Script/EngineSettings.GeneralProjectSettings",
            "ProjectVersion",
        )
    }
}

/// What `set_value` had to do to store the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniEdit {
    Replaced,
    InsertedKey,
    AppendedSection,
}

struct Line<'a> {
    start: usize,
    end: usize,
    body: &'a str,
    has_newline: bool,
}

fn lines(contents: &str) -> impl Iterator<Item = Line<'_>> {
    let mut start = 0;
    contents.split_inclusive('\n').map(move |raw| {
        let line_start = start;
        start += raw.len();
        let has_newline = raw.ends_with('\n');
        let body = raw.strip_suffix('\n').unwrap_or(raw);
        let body = body.strip_suffix('\r').unwrap_or(body);
        Line {
            start: line_start,
            end: start,
            body,
            has_newline,
        }
    })
}

fn section_name(body: &str) -> Option<&str> {
    let trimmed = body.trim_start_matches(BOM).trim();
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

fn is_comment(body: &str) -> bool {
    let trimmed = body.trim_start();
    trimmed.starts_with(';') || trimmed.starts_with('#')
}

/// Byte range of the value inside `line`, if the line assigns `key`.
fn value_range(line: &Line<'_>, key: &str) -> Option<Range<usize>> {
    if is_comment(line.body) {
        return None;
    }
    let (name, _) = line.body.split_once('=')?;
    if !name.trim().eq_ignore_ascii_case(key) {
        return None;
    }

    let after_eq = name.len() + 1;
    let value = &line.body[after_eq..];
    let leading = value.len() - value.trim_start().len();
    let trailing = value.trim_end().len();
    let start = line.start + after_eq + leading;
    let end = line.start + after_eq + trailing.max(leading);
    Some(start..end)
}

enum Lookup {
    Found(Range<usize>),
    /// Section exists but lacks the key; offset just past its header line.
    MissingKey { after_header: usize, header_has_newline: bool },
    MissingSection,
}

fn lookup(contents: &str, target: &IniKey) -> Lookup {
    let mut header: Option<(usize, bool)> = None;
    let mut in_section = false;

    for line in lines(contents) {
        if let Some(name) = section_name(line.body) {
            in_section = name.eq_ignore_ascii_case(&target.section);
            if in_section && header.is_none() {
                header = Some((line.end, line.has_newline));
            }
            continue;
        }
        if in_section {
            if let Some(range) = value_range(&line, &target.key) {
                return Lookup::Found(range);
            }
        }
    }

    match header {
        Some((after_header, header_has_newline)) => Lookup::MissingKey {
            after_header,
            header_has_newline,
        },
        None => Lookup::MissingSection,
    }
}

/// Raw value of `target`, trimmed of surrounding whitespace.
pub fn get_value<'a>(contents: &'a str, target: &IniKey) -> Option<&'a str> {
    match lookup(contents, target) {
        Lookup::Found(range) => Some(&contents[range]),
        _ => None,
    }
}

/// Line terminator used by most lines of the document, `\n` when there are none.
pub fn line_ending(contents: &str) -> &'static str {
    let newlines = contents.matches('\n').count();
    let crlf = contents.matches("\r\n").count();
    if crlf > 0 && crlf * 2 >= newlines {
        "\r\n"
    } else {
        "\n"
    }
}

/// Return `contents` with `target` set to `value`.
pub fn set_value(contents: &str, target: &IniKey, value: &str) -> (String, IniEdit) {
    match lookup(contents, target) {
        Lookup::Found(range) => {
            let mut updated = String::with_capacity(contents.len() + value.len());
            updated.push_str(&contents[..range.start]);
            updated.push_str(value);
            updated.push_str(&contents[range.end..]);
            (updated, IniEdit::Replaced)
        }
        Lookup::MissingKey {
            after_header,
            header_has_newline,
        } => {
            let eol = line_ending(contents);
            let mut updated = String::with_capacity(contents.len() + target.key.len() + value.len() + 4);
            updated.push_str(&contents[..after_header]);
            if !header_has_newline {
                updated.push_str(eol);
            }
            updated.push_str(&target.key);
            updated.push('=');
            updated.push_str(value);
            updated.push_str(eol);
            updated.push_str(&contents[after_header..]);
            (updated, IniEdit::InsertedKey)
        }
        Lookup::MissingSection => {
            let eol = line_ending(contents);
            let mut updated = contents.to_string();
            let trimmed = contents.trim_start_matches(BOM);
            if !trimmed.is_empty() && !contents.ends_with('\n') {
                updated.push_str(eol);
            }
            if !trimmed.is_empty() {
                updated.push_str(eol);
            }
            updated.push('[');
            updated.push_str(&target.section);
            updated.push(']');
            updated.push_str(eol);
            updated.push_str(&target.key);
            updated.push('=');
            updated.push_str(value);
            updated.push_str(eol);
            (updated, IniEdit::AppendedSection)
        }
    }
}
