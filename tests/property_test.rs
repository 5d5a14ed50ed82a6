// tests/property_test.rs
use proptest::prelude::*;
use unreal_ci::domain::{BranchKind, BranchToken, Label, LabelSeparator, Version};
use unreal_ci::store::ini::{get_value, set_value};
use unreal_ci::store::{IniEdit, IniKey};
use unreal_ci::ParseError;

fn label() -> impl Strategy<Value = Option<Label>> {
    let separator = prop_oneof![Just(LabelSeparator::PreRelease), Just(LabelSeparator::Build)];
    proptest::option::of(
        (separator, "[0-9A-Za-z][0-9A-Za-z.+-]{0,15}")
            .prop_map(|(separator, text)| Label { separator, text }),
    )
}

fn version() -> impl Strategy<Value = Version> {
    (any::<u32>(), any::<u32>(), any::<u32>(), label()).prop_map(|(major, minor, patch, label)| {
        Version {
            major,
            minor,
            patch,
            label,
        }
    })
}

/// A non-header INI line that does not assign `ProjectVersion`.
fn unrelated_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9_.]{0,12}=[A-Za-z0-9 ._,()-]{0,16}",
        "; [A-Za-z0-9 =\\[\\]]{0,20}",
        Just(String::new()),
    ]
    .prop_filter("must not assign the version key", |line| {
        !line
            .split_once('=')
            .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("ProjectVersion"))
    })
}

fn join_lines(lines: &[String], eol: &str) -> String {
    lines.iter().map(|line| format!("{}{}", line, eol)).collect()
}

mod version_properties {
    use super::*;

    proptest! {
        #[test]
        fn prop_display_then_parse_is_identity(v in version()) {
            let text = v.to_string();
            prop_assert_eq!(Version::parse(&text), Ok(v));
        }

        #[test]
        fn prop_numeric_core_always_parses(major in any::<u32>(), minor in any::<u32>(), patch in any::<u32>()) {
            let text = format!("{}.{}.{}", major, minor, patch);
            prop_assert_eq!(Version::parse(&text), Ok(Version::new(major, minor, patch)));
        }
    }
}

mod branch_properties {
    use super::*;

    proptest! {
        #[test]
        fn prop_every_prefix_in_any_case(
            index in 0usize..4,
            major in any::<u32>(),
            minor in any::<u32>(),
            upper in prop::collection::vec(any::<bool>(), 5),
        ) {
            let (kind, prefix) = BranchKind::ALL[index];
            let cased: String = prefix
                .chars()
                .zip(upper.iter())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            let input = format!("{}{}.{}", cased, major, minor);

            prop_assert_eq!(BranchToken::parse(&input), Ok(BranchToken::new(kind, major, minor)));
        }

        #[test]
        fn prop_unknown_prefix_is_rejected(
            prefix in "[a-zA-Z]{1,8}",
            major in any::<u32>(),
            minor in any::<u32>(),
        ) {
            let lowered = prefix.to_ascii_lowercase();
            prop_assume!(!BranchKind::ALL.iter().any(|(_, known)| lowered.starts_with(known)));

            let input = format!("{}{}.{}", prefix, major, minor);
            prop_assert_eq!(
                BranchToken::parse(&input),
                Err(ParseError::unknown_branch_kind(&input))
            );
        }
    }
}

mod ini_properties {
    use super::*;

    proptest! {
        #[test]
        fn prop_set_value_touches_only_the_value(
            leading in prop::collection::vec(unrelated_line(), 0..6),
            inside_before in prop::collection::vec(unrelated_line(), 0..6),
            inside_after in prop::collection::vec(unrelated_line(), 0..6),
            trailing in prop::collection::vec(unrelated_line(), 0..6),
            crlf in any::<bool>(),
            old in version(),
            new in version(),
        ) {
            let eol = if crlf { "\r\n" } else { "\n" };
            let key = IniKey::default();

            let head = format!(
                "[Other]{eol}{}[{}]{eol}{}ProjectVersion=",
                join_lines(&leading, eol),
                key.section,
                join_lines(&inside_before, eol),
            );
            let tail = format!(
                "{eol}{}[Tail]{eol}{}",
                join_lines(&inside_after, eol),
                join_lines(&trailing, eol),
            );
            let contents = format!("{}{}{}", head, old, tail);
            let new_text = new.to_string();

            let old_text = old.to_string();
            prop_assert_eq!(get_value(&contents, &key), Some(old_text.as_str()));

            let (updated, edit) = set_value(&contents, &key, &new_text);
            prop_assert_eq!(edit, IniEdit::Replaced);
            prop_assert_eq!(&updated, &format!("{}{}{}", head, new_text, tail));
            prop_assert_eq!(get_value(&updated, &key), Some(new_text.as_str()));
        }
    }
}
