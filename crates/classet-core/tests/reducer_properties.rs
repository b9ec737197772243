//! Property tests for the state reducer.

use classet_core::{Spec, reduce, update};
use classet_model::{GroupKey, LabelSet, Schema, UpdateInstruction};
use proptest::prelude::*;

const LABELS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

fn sample_spec() -> Spec {
    Spec::new(
        &Schema::new()
            .with("a", "default")
            .with("b", "default")
            .with("c", None::<&str>)
            .with("d", 1)
            .with("e", 1)
            .with("f", None::<&str>)
            .with("g", "tone")
            .with("h", "tone"),
    )
}

fn label_subset() -> impl Strategy<Value = LabelSet> {
    proptest::collection::btree_set(proptest::sample::select(LABELS.to_vec()), 0..=LABELS.len())
        .prop_map(|labels| labels.into_iter().map(str::to_string).collect::<LabelSet>())
}

proptest! {
    #[test]
    fn enable_only_updates_are_idempotent(current in label_subset(), enable in label_subset()) {
        let spec = sample_spec();
        let none = LabelSet::new();
        let once = reduce(Some(&spec), &current, &enable, &none).unwrap();
        let twice = reduce(Some(&spec), &once, &enable, &none).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn disabled_labels_never_survive(
        current in label_subset(),
        enable in label_subset(),
        disable in label_subset(),
    ) {
        let spec = sample_spec();
        let next = reduce(Some(&spec), &current, &enable, &disable).unwrap();
        prop_assert!(next.is_disjoint(&disable));
    }

    #[test]
    fn enabling_one_group_member_leaves_only_that_member(
        current in label_subset(),
        pick in proptest::sample::select(vec!["d", "e", "g", "h"]),
    ) {
        let spec = sample_spec();
        let enable: LabelSet = [pick.to_string()].into_iter().collect();
        let next = reduce(Some(&spec), &current, &enable, &LabelSet::new()).unwrap();

        let group = spec.group_of(pick).unwrap().clone();
        let in_group: Vec<&String> = next
            .iter()
            .filter(|label| spec.group_of(label) == Some(&group))
            .collect();
        let expected = pick.to_string();
        prop_assert_eq!(in_group, vec![&expected]);
    }

    #[test]
    fn non_exclusive_labels_are_kept(current in label_subset(), enable in label_subset()) {
        let spec = sample_spec();
        let next = reduce(Some(&spec), &current, &enable, &LabelSet::new()).unwrap();
        for label in &current {
            let group = spec.group_of(label).unwrap();
            if matches!(group, GroupKey::Default | GroupKey::Ungrouped) {
                prop_assert!(next.contains(label));
            }
        }
    }

    #[test]
    fn clear_all_always_empties(current in label_subset()) {
        let spec = sample_spec();
        let next = update(Some(&spec), &current, vec![UpdateInstruction::ClearAll]).unwrap();
        prop_assert!(next.is_empty());
    }

    #[test]
    fn result_stays_within_schema(current in label_subset(), enable in label_subset()) {
        let spec = sample_spec();
        let next = reduce(Some(&spec), &current, &enable, &LabelSet::new()).unwrap();
        prop_assert!(next.is_subset(spec.valid_labels()));
    }
}
