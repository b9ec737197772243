use std::collections::BTreeSet;

/// A class name. Identity is exact string equality.
pub type Label = String;

/// A set of enabled labels.
///
/// Ordered so that two runs over the same state always iterate identically.
pub type LabelSet = BTreeSet<Label>;

/// Collect any iterator of string-like values into a [`LabelSet`].
pub fn label_set<I, S>(labels: I) -> LabelSet
where
    I: IntoIterator<Item = S>,
    S: Into<Label>,
{
    labels.into_iter().map(Into::into).collect()
}
