// tests/partition_props.rs

use proptest::prelude::*;
use neovide_start::args::{partition, FORK, NO_FORK, SEPARATOR};

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(FORK.to_string()),
        Just(NO_FORK.to_string()),
        Just("-".to_string()),
        Just("--grid".to_string()),
        "[a-z]{1,6}",
    ]
}

fn strings(forwarded: &[std::ffi::OsString]) -> Vec<String> {
    forwarded
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

proptest! {
    #[test]
    fn flags_are_stripped_and_order_kept(primary in proptest::collection::vec(token(), 0..12)) {
        let args = partition(primary.clone());

        let expected: Vec<String> = primary
            .iter()
            .filter(|a| *a != FORK && *a != NO_FORK)
            .cloned()
            .collect();
        prop_assert_eq!(strings(&args.forwarded), expected);

        let last = primary.iter().rev().find(|a| *a == FORK || *a == NO_FORK);
        prop_assert_eq!(args.detach, last.map(String::as_str) == Some(FORK));
    }

    #[test]
    fn nested_group_is_forwarded_verbatim(
        primary in proptest::collection::vec(token(), 0..6),
        nested in proptest::collection::vec(prop_oneof![token(), Just(SEPARATOR.to_string())], 0..6),
    ) {
        let mut raw = primary.clone();
        raw.push(SEPARATOR.to_string());
        raw.extend(nested.iter().cloned());

        let forwarded = strings(&partition(raw).forwarded);

        let mut expected: Vec<String> = primary
            .into_iter()
            .filter(|a| a != FORK && a != NO_FORK)
            .collect();
        if !nested.is_empty() {
            expected.push(SEPARATOR.to_string());
            expected.extend(nested);
        }
        prop_assert_eq!(forwarded, expected);
    }
}
