//! Deterministic rendering of a class state.

use classet_model::LabelSet;

use crate::spec::Spec;

/// Labels of `state` in output order.
///
/// With a spec, labels come out in schema precedence order and any label the
/// schema does not declare follows the declared ones. Without a spec, labels
/// keep the set's own order.
pub fn ordered<'a>(spec: Option<&Spec>, state: &'a LabelSet) -> Vec<&'a str> {
    let mut labels: Vec<&str> = state.iter().map(String::as_str).collect();
    if let Some(spec) = spec {
        labels.sort_by_key(|label| {
            let precedence = spec.precedence_of(label);
            (precedence.is_none(), precedence)
        });
    }
    labels
}

/// Join [`ordered`] labels with single spaces.
pub fn serialize(spec: Option<&Spec>, state: &LabelSet) -> String {
    ordered(spec, state).join(" ")
}
