use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use classet_core::Spec;
use classet_model::GroupKey;

use crate::apply::ApplyOutcome;

/// Print the outcome of `apply`: the serialized state, or JSON.
pub fn print_outcome(outcome: &ApplyOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", outcome.serialized);
    }
    Ok(())
}

/// One row per schema label, in precedence order.
pub fn schema_table(spec: &Spec) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Precedence"),
        header_cell("Label"),
        header_cell("Group"),
        header_cell("Exclusive"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for label in spec.labels() {
        let precedence = spec.precedence_of(label).unwrap_or_default();
        let group = spec.group_of(label).cloned().unwrap_or(GroupKey::Ungrouped);
        table.add_row(vec![
            Cell::new(precedence),
            Cell::new(label),
            group_cell(&group),
            Cell::new(if group.is_exclusive() { "yes" } else { "no" }),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn group_cell(group: &GroupKey) -> Cell {
    let cell = Cell::new(group);
    match group {
        GroupKey::Default => cell.fg(Color::Green),
        GroupKey::Ungrouped => cell.add_attribute(Attribute::Dim),
        GroupKey::Name(_) | GroupKey::Index(_) => cell.fg(Color::Cyan),
    }
}
