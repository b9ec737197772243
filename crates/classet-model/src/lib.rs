//! Data model for classet: labels, group keys, schemas, and update instructions.

pub mod error;
pub mod group;
pub mod instruction;
pub mod label;
pub mod options;
pub mod schema;

pub use error::{ClassError, Result};
pub use group::GroupKey;
pub use instruction::{UpdateFn, UpdateInstruction};
pub use label::{Label, LabelSet, label_set};
pub use options::{DuplicateLabels, SpecOptions};
pub use schema::{Schema, SchemaEntry};
