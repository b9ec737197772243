//! Update instructions accepted by `set_classes`.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::{ClassError, Result};
use crate::label::{Label, LabelSet};

/// Computes an update from the state as it is right before the update.
pub type UpdateFn = Box<dyn FnOnce(&LabelSet) -> UpdateInstruction>;

/// One instruction in a `set_classes` call.
pub enum UpdateInstruction {
    /// Enable one label.
    Label(Label),
    /// Enable every label in the list.
    LabelList(Vec<Label>),
    /// Enable every label in the set.
    LabelSet(LabelSet),
    /// Enable labels mapped to `true`, disable labels mapped to `false`.
    ToggleMap(BTreeMap<Label, bool>),
    /// Derive the update from the current state. Must be the only instruction.
    UpdateFn(UpdateFn),
    /// Disable everything. Must be the only instruction.
    ClearAll,
}

impl UpdateInstruction {
    pub fn update_fn<F>(update: F) -> Self
    where
        F: FnOnce(&LabelSet) -> UpdateInstruction + 'static,
    {
        UpdateInstruction::UpdateFn(Box::new(update))
    }

    pub fn toggle<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<Label>,
    {
        UpdateInstruction::ToggleMap(
            entries
                .into_iter()
                .map(|(label, on)| (label.into(), on))
                .collect(),
        )
    }

    /// Parse one instruction from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Short name of the variant, for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            UpdateInstruction::Label(_) => "label",
            UpdateInstruction::LabelList(_) => "label list",
            UpdateInstruction::LabelSet(_) => "label set",
            UpdateInstruction::ToggleMap(_) => "toggle map",
            UpdateInstruction::UpdateFn(_) => "update function",
            UpdateInstruction::ClearAll => "clear all",
        }
    }
}

impl fmt::Debug for UpdateInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateInstruction::Label(label) => f.debug_tuple("Label").field(label).finish(),
            UpdateInstruction::LabelList(labels) => {
                f.debug_tuple("LabelList").field(labels).finish()
            }
            UpdateInstruction::LabelSet(labels) => f.debug_tuple("LabelSet").field(labels).finish(),
            UpdateInstruction::ToggleMap(map) => f.debug_tuple("ToggleMap").field(map).finish(),
            UpdateInstruction::UpdateFn(_) => f.write_str("UpdateFn(..)"),
            UpdateInstruction::ClearAll => f.write_str("ClearAll"),
        }
    }
}

impl From<&str> for UpdateInstruction {
    fn from(label: &str) -> Self {
        UpdateInstruction::Label(label.to_string())
    }
}

impl From<String> for UpdateInstruction {
    fn from(label: String) -> Self {
        UpdateInstruction::Label(label)
    }
}

impl From<Vec<Label>> for UpdateInstruction {
    fn from(labels: Vec<Label>) -> Self {
        UpdateInstruction::LabelList(labels)
    }
}

impl From<Vec<&str>> for UpdateInstruction {
    fn from(labels: Vec<&str>) -> Self {
        UpdateInstruction::LabelList(labels.into_iter().map(str::to_string).collect())
    }
}

impl From<LabelSet> for UpdateInstruction {
    fn from(labels: LabelSet) -> Self {
        UpdateInstruction::LabelSet(labels)
    }
}

impl From<BTreeMap<Label, bool>> for UpdateInstruction {
    fn from(map: BTreeMap<Label, bool>) -> Self {
        UpdateInstruction::ToggleMap(map)
    }
}

impl TryFrom<Value> for UpdateInstruction {
    type Error = ClassError;

    /// Strings enable a label, arrays of strings enable a list, objects of
    /// booleans toggle, and `null` clears. Anything else is rejected.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(UpdateInstruction::ClearAll),
            Value::String(label) => Ok(UpdateInstruction::Label(label)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(label) => Ok(label),
                    other => Err(ClassError::MalformedInstruction(format!(
                        "list entries must be strings, found {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(UpdateInstruction::LabelList),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(label, on)| match on {
                    Value::Bool(on) => Ok((label, on)),
                    other => Err(ClassError::MalformedInstruction(format!(
                        "toggle for {label} must be a boolean, found {other}"
                    ))),
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(UpdateInstruction::ToggleMap),
            other => Err(ClassError::MalformedInstruction(format!(
                "expected a label, a list, a toggle map, or null, found {other}"
            ))),
        }
    }
}
