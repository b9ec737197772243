//! Spec: the immutable index built once from a schema.

use std::collections::BTreeMap;

use classet_model::{
    ClassError, DuplicateLabels, GroupKey, Label, LabelSet, Result, Schema, SpecOptions,
};
use tracing::warn;

/// Validity, default, group, and precedence indexes over a schema.
///
/// Precedence is the declaration index, so no two labels share one. When a
/// label is declared twice and duplicates are allowed, its last declaration
/// supplies both its group and its precedence.
#[derive(Debug, Clone, Default)]
pub struct Spec {
    valid_labels: LabelSet,
    default_labels: LabelSet,
    label_to_group: BTreeMap<Label, GroupKey>,
    label_to_precedence: BTreeMap<Label, usize>,
    group_to_labels: BTreeMap<GroupKey, LabelSet>,
}

impl Spec {
    /// Build a spec with default options (last declaration wins).
    pub fn new(schema: &Schema) -> Self {
        let mut spec = Self::default();
        for (index, entry) in schema.entries().iter().enumerate() {
            if spec.label_to_group.contains_key(&entry.name) {
                warn!(label = %entry.name, index, "duplicate schema label, keeping last declaration");
            }
            spec.declare(index, &entry.name, &entry.group);
        }
        spec.finish();
        spec
    }

    /// Build a spec, honoring the duplicate-label policy in `options`.
    pub fn with_options(schema: &Schema, options: &SpecOptions) -> Result<Self> {
        if options.duplicate_labels == DuplicateLabels::Reject {
            let mut seen = LabelSet::new();
            for entry in schema {
                if !seen.insert(entry.name.clone()) {
                    return Err(ClassError::DuplicateLabel(entry.name.clone()));
                }
            }
        }
        Ok(Self::new(schema))
    }

    fn declare(&mut self, index: usize, name: &Label, group: &GroupKey) {
        self.label_to_group.insert(name.clone(), group.clone());
        self.label_to_precedence.insert(name.clone(), index);
    }

    fn finish(&mut self) {
        self.valid_labels = self.label_to_group.keys().cloned().collect();
        self.default_labels = self
            .label_to_group
            .iter()
            .filter(|(_, group)| group.is_default())
            .map(|(label, _)| label.clone())
            .collect();
        self.group_to_labels = self.group_labels(&self.valid_labels);
    }

    /// Fail with [`ClassError::UnknownLabel`] on the first label not in the schema.
    pub fn validate<I, S>(&self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            let label = label.as_ref();
            if !self.valid_labels.contains(label) {
                return Err(ClassError::UnknownLabel(label.to_string()));
            }
        }
        Ok(())
    }

    /// Group the given labels by their group key.
    ///
    /// Labels outside the schema are skipped.
    pub fn group_labels<'a, I>(&self, labels: I) -> BTreeMap<GroupKey, LabelSet>
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let mut groups: BTreeMap<GroupKey, LabelSet> = BTreeMap::new();
        for label in labels {
            if let Some(group) = self.label_to_group.get(label) {
                groups
                    .entry(group.clone())
                    .or_default()
                    .insert(label.clone());
            }
        }
        groups
    }

    pub fn is_valid(&self, label: &str) -> bool {
        self.valid_labels.contains(label)
    }

    pub fn valid_labels(&self) -> &LabelSet {
        &self.valid_labels
    }

    /// Labels seeded into every binding.
    pub fn default_labels(&self) -> &LabelSet {
        &self.default_labels
    }

    pub fn group_of(&self, label: &str) -> Option<&GroupKey> {
        self.label_to_group.get(label)
    }

    pub fn precedence_of(&self, label: &str) -> Option<usize> {
        self.label_to_precedence.get(label).copied()
    }

    /// Every label sharing `group`.
    pub fn labels_in_group(&self, group: &GroupKey) -> Option<&LabelSet> {
        self.group_to_labels.get(group)
    }

    /// Schema labels in precedence order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<(&str, usize)> = self
            .label_to_precedence
            .iter()
            .map(|(label, precedence)| (label.as_str(), *precedence))
            .collect();
        labels.sort_by_key(|(_, precedence)| *precedence);
        labels.into_iter().map(|(label, _)| label).collect()
    }

    pub fn len(&self) -> usize {
        self.valid_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use classet_model::label_set;

    use super::*;

    fn sample_schema() -> Schema {
        Schema::new()
            .with("a", "default")
            .with("b", "default")
            .with("c", None::<&str>)
            .with("d", 1)
            .with("e", 1)
            .with("f", None::<&str>)
    }

    #[test]
    fn indexes_defaults_and_groups() {
        let spec = Spec::new(&sample_schema());

        assert_eq!(spec.len(), 6);
        assert_eq!(spec.default_labels(), &label_set(["a", "b"]));
        assert_eq!(
            spec.labels_in_group(&GroupKey::Index(1)),
            Some(&label_set(["d", "e"]))
        );
        assert_eq!(
            spec.labels_in_group(&GroupKey::Ungrouped),
            Some(&label_set(["c", "f"]))
        );
        assert_eq!(spec.group_of("a"), Some(&GroupKey::Default));
    }

    #[test]
    fn precedence_follows_declaration_order() {
        let spec = Spec::new(&sample_schema());
        assert_eq!(spec.precedence_of("a"), Some(0));
        assert_eq!(spec.precedence_of("f"), Some(5));
        assert_eq!(spec.precedence_of("z"), None);
        assert_eq!(spec.labels(), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn validate_reports_first_unknown_label() {
        let spec = Spec::new(&sample_schema());
        assert!(spec.validate(["a", "e"]).is_ok());

        let err = spec.validate(["a", "y", "z"]).unwrap_err();
        assert!(matches!(err, ClassError::UnknownLabel(label) if label == "y"));
    }

    #[test]
    fn group_labels_only_covers_given_subset() {
        let spec = Spec::new(&sample_schema());
        let groups = spec.group_labels(&label_set(["d", "c", "zz"]));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get(&GroupKey::Index(1)), Some(&label_set(["d"])));
        assert_eq!(groups.get(&GroupKey::Ungrouped), Some(&label_set(["c"])));
    }

    #[test]
    fn duplicate_label_keeps_last_declaration() {
        let schema = Schema::new()
            .with("a", "default")
            .with("b", 1)
            .with("a", 1);
        let spec = Spec::new(&schema);

        assert!(spec.default_labels().is_empty());
        assert_eq!(spec.group_of("a"), Some(&GroupKey::Index(1)));
        assert_eq!(spec.precedence_of("a"), Some(2));
        assert_eq!(spec.labels(), vec!["b", "a"]);
        assert!(spec.labels_in_group(&GroupKey::Default).is_none());
    }

    #[test]
    fn strict_options_reject_duplicates() {
        let schema = Schema::new().with("a", "default").with("a", 1);
        let err = Spec::with_options(&schema, &SpecOptions::strict()).unwrap_err();
        assert!(matches!(err, ClassError::DuplicateLabel(label) if label == "a"));

        assert!(Spec::with_options(&schema, &SpecOptions::default()).is_ok());
    }

    #[test]
    fn string_and_integer_groups_are_separate() {
        let schema = Schema::new().with("x", "1").with("y", 1);
        let spec = Spec::new(&schema);
        assert_eq!(
            spec.labels_in_group(&GroupKey::Index(1)),
            Some(&label_set(["y"]))
        );
    }
}
