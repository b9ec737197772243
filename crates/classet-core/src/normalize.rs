//! Turns a batch of update instructions into enable and disable sets.

use classet_model::{ClassError, LabelSet, Result, UpdateInstruction};
use tracing::trace;

/// Canonical form of one `set_classes` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Replace the state with the empty set.
    Clear,
    /// Enable and disable labels. The two sets are independent.
    Apply { enable: LabelSet, disable: LabelSet },
}

/// Normalize the instructions of one call against the current state.
///
/// A lone update function is called exactly once with `current` and its
/// result takes the place of the whole batch. An update function anywhere
/// else, or a clear-all alongside other instructions, is rejected.
pub fn normalize(current: &LabelSet, instructions: Vec<UpdateInstruction>) -> Result<Normalized> {
    let instructions = match <[UpdateInstruction; 1]>::try_from(instructions) {
        Ok([UpdateInstruction::UpdateFn(update)]) => match update(current) {
            UpdateInstruction::UpdateFn(_) => {
                return Err(ClassError::MalformedInstruction(
                    "an update function returned another update function".to_string(),
                ));
            }
            computed => vec![computed],
        },
        Ok([single]) => vec![single],
        Err(batch) => batch,
    };

    if let [UpdateInstruction::ClearAll] = instructions.as_slice() {
        trace!("normalized clear-all");
        return Ok(Normalized::Clear);
    }

    let mut enable = LabelSet::new();
    let mut disable = LabelSet::new();
    for instruction in instructions {
        match instruction {
            UpdateInstruction::Label(label) => {
                enable.insert(label);
            }
            UpdateInstruction::LabelList(labels) => enable.extend(labels),
            UpdateInstruction::LabelSet(labels) => enable.extend(labels),
            UpdateInstruction::ToggleMap(toggles) => {
                for (label, on) in toggles {
                    if on {
                        enable.insert(label);
                    } else {
                        disable.insert(label);
                    }
                }
            }
            UpdateInstruction::UpdateFn(_) => {
                return Err(ClassError::MalformedInstruction(
                    "an update function must be the only instruction in a call".to_string(),
                ));
            }
            UpdateInstruction::ClearAll => {
                return Err(ClassError::MalformedInstruction(
                    "clear-all cannot be combined with other instructions".to_string(),
                ));
            }
        }
    }

    trace!(?enable, ?disable, "normalized update");
    Ok(Normalized::Apply { enable, disable })
}
