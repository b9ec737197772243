use anyhow::Result;
use tracing::info_span;

use classet_cli::apply::{ApplyRequest, load_binder, run_apply};
use classet_cli::summary::{print_outcome, schema_table};

use crate::cli::{ApplyArgs, SchemaArgs};

pub fn run_apply_command(args: &ApplyArgs) -> Result<()> {
    let request = ApplyRequest {
        schema: args.schema.clone(),
        strict: args.strict,
        init: args.init.clone(),
        updates: args.updates.clone(),
    };
    let outcome = run_apply(&request)?;
    print_outcome(&outcome, args.json)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let span = info_span!("schema", path = %args.schema.display());
    let _guard = span.enter();
    let binder = load_binder(&args.schema, args.strict)?;
    println!("{}", schema_table(binder.spec()));
    Ok(())
}
