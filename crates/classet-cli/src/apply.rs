//! Load a schema, acquire a binding, and replay updates against it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, info_span};

use classet_core::{Binder, Classes, acquire, ordered};
use classet_model::{Schema, SpecOptions, UpdateInstruction};

/// Inputs of one `apply` run.
#[derive(Debug, Clone, Default)]
pub struct ApplyRequest {
    /// JSON schema file. `None` runs schema-less.
    pub schema: Option<PathBuf>,
    /// Reject schemas that declare a label twice.
    pub strict: bool,
    /// Labels enabled at acquisition.
    pub init: Vec<String>,
    /// JSON instructions, one `set_classes` call each.
    pub updates: Vec<String>,
}

/// Final state of an `apply` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub schema_bound: bool,
    /// Enabled labels in serialization order.
    pub classes: Vec<String>,
    pub serialized: String,
}

/// Read a schema file and build a binder for it.
pub fn load_binder(path: &Path, strict: bool) -> Result<Binder> {
    let schema = Schema::from_path(path)
        .with_context(|| format!("load schema {}", path.display()))?;
    let options = if strict {
        SpecOptions::strict()
    } else {
        SpecOptions::default()
    };
    let binder = Binder::with_options(&schema, &options)
        .with_context(|| format!("build spec from {}", path.display()))?;
    info!(
        labels = binder.spec().len(),
        defaults = binder.spec().default_labels().len(),
        "loaded schema"
    );
    Ok(binder)
}

pub fn parse_update(json: &str) -> Result<UpdateInstruction> {
    UpdateInstruction::from_json_str(json).with_context(|| format!("parse update {json}"))
}

pub fn run_apply(request: &ApplyRequest) -> Result<ApplyOutcome> {
    let binder = request
        .schema
        .as_deref()
        .map(|path| load_binder(path, request.strict))
        .transpose()?;
    apply_updates(binder.as_ref(), &request.init, &request.updates)
}

/// Acquire with `init` and apply each update in order.
pub fn apply_updates(
    binder: Option<&Binder>,
    init: &[String],
    updates: &[String],
) -> Result<ApplyOutcome> {
    let span = info_span!("apply", schema_bound = binder.is_some(), updates = updates.len());
    let _guard = span.enter();

    let classes: Classes = match binder {
        Some(binder) => binder
            .acquire(init.iter().cloned())
            .context("acquire initial classes")?,
        None => acquire(init.iter().cloned()),
    };

    for (index, json) in updates.iter().enumerate() {
        let instruction = parse_update(json)?;
        debug!(index, kind = instruction.kind(), "applying update");
        classes
            .set_classes([instruction])
            .with_context(|| format!("apply update #{} {json}", index + 1))?;
    }

    let state = classes.classes();
    let labels = ordered(classes.spec(), &state);
    let outcome = ApplyOutcome {
        schema_bound: binder.is_some(),
        classes: labels.iter().map(|label| (*label).to_string()).collect(),
        serialized: labels.join(" "),
    };
    info!(enabled = outcome.classes.len(), "applied updates");
    Ok(outcome)
}
