//! Properties of parsing and merging over generated preference files

use prefsync::directive::{match_directive, parse_with_defaults};
use prefsync::merge::merge;
use proptest::prelude::*;
use std::collections::HashMap;

fn verb() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("pref"),
        Just("defaultPref"),
        Just("lockPref"),
        Just("user_pref"),
        Just("sticky_pref"),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}(\\.[a-e]{1,2}){0,1}"
}

fn directive_line() -> impl Strategy<Value = String> {
    (verb(), key(), 0..50i32).prop_map(|(v, k, n)| format!("{}(\"{}\", {});", v, k, n))
}

/// Comment or blank lines that can never look like a directive
fn noise_line() -> impl Strategy<Value = String> {
    "[#/ a-z]{0,12}"
}

fn file_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![directive_line(), noise_line()], 0..20)
}

proptest! {
    #[test]
    fn conservation(baseline in file_lines(), existing in file_lines()) {
        let set = parse_with_defaults(&baseline.join("\n"));
        let result = merge(&set, existing);
        prop_assert_eq!(result.overridden_count + result.inserted_count, set.len());
    }

    #[test]
    fn last_occurrence_wins(lines in prop::collection::vec(directive_line(), 0..20)) {
        let set = parse_with_defaults(&lines.join("\n"));

        let mut expected: HashMap<String, String> = HashMap::new();
        for line in &lines {
            let (verb, key) = match_directive(line).unwrap();
            expected.insert(key.to_string(), line.replacen(verb, "pref", 1));
        }

        prop_assert_eq!(set.len(), expected.len());
        for (key, directive) in &set {
            prop_assert_eq!(&directive.key, key);
            prop_assert_eq!(Some(&directive.raw_line), expected.get(key));
        }
    }

    #[test]
    fn own_namespace_never_imported(
        lines in file_lines(),
        upper in prop::collection::vec(any::<bool>(), 8),
        suffix in "[a-z]{0,4}",
    ) {
        let marker: String = "prefsync"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let mut text = lines.join("\n");
        text.push_str(&format!("\nuser_pref(\"{}.{}\", 1);", marker, suffix));
        let set = parse_with_defaults(&text);
        prop_assert!(set.keys().all(|k| !k.to_lowercase().contains("prefsync")));
    }

    #[test]
    fn unrelated_lines_keep_position(baseline in file_lines(), existing in file_lines()) {
        let set = parse_with_defaults(&baseline.join("\n"));
        let result = merge(&set, existing.clone());

        prop_assert_eq!(result.merged_lines.len(), existing.len() + result.inserted_count);
        for (before, after) in existing.iter().zip(&result.merged_lines) {
            if before != after {
                let (_, key) = match_directive(before).unwrap();
                prop_assert_eq!(after, &set[key].raw_line);
            }
        }
    }

    #[test]
    fn merge_is_idempotent(baseline in file_lines(), existing in file_lines()) {
        let set = parse_with_defaults(&baseline.join("\n"));
        let first = merge(&set, existing);
        let second = merge(&set, first.merged_lines.clone());

        prop_assert_eq!(&second.merged_lines, &first.merged_lines);
        prop_assert_eq!(second.inserted_count, 0);
        prop_assert_eq!(second.overridden_count, set.len());
    }
}
