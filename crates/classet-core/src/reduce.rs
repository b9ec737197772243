//! The group-aware state reducer.

use classet_model::{LabelSet, Result, UpdateInstruction};
use tracing::debug;

use crate::normalize::{Normalized, normalize};
use crate::set_ops::{difference, union};
use crate::spec::Spec;

/// Compute the next state from `current`.
///
/// With a spec, every label in `enable` and `disable` must be declared, and
/// enabling a label in an exclusive group disables its siblings. Disables win
/// over enables. Without a spec, labels are free-form and never exclude each
/// other.
pub fn reduce(
    spec: Option<&Spec>,
    current: &LabelSet,
    enable: &LabelSet,
    disable: &LabelSet,
) -> Result<LabelSet> {
    let Some(spec) = spec else {
        return Ok(difference(&union(current, enable), disable));
    };

    spec.validate(enable)?;
    spec.validate(disable)?;

    let mut exclusions = LabelSet::new();
    for (group, enabling) in spec.group_labels(enable) {
        if !group.is_exclusive() {
            continue;
        }
        if let Some(siblings) = spec.labels_in_group(&group) {
            exclusions.extend(difference(siblings, &enabling));
        }
    }

    let disable = union(disable, &exclusions);
    Ok(difference(&union(current, enable), &disable))
}

/// Apply an already-normalized update.
pub fn apply(spec: Option<&Spec>, current: &LabelSet, update: &Normalized) -> Result<LabelSet> {
    match update {
        Normalized::Clear => Ok(LabelSet::new()),
        Normalized::Apply { enable, disable } => reduce(spec, current, enable, disable),
    }
}

/// Normalize `instructions` and apply them to `current`.
///
/// `current` is never modified; a failed update leaves the caller's state as it was.
pub fn update(
    spec: Option<&Spec>,
    current: &LabelSet,
    instructions: Vec<UpdateInstruction>,
) -> Result<LabelSet> {
    let normalized = normalize(current, instructions)?;
    let next = apply(spec, current, &normalized)?;
    debug!(
        before = current.len(),
        after = next.len(),
        schema_bound = spec.is_some(),
        "reduced class state"
    );
    Ok(next)
}
