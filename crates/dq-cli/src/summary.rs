//! Terminal summary tables for the `check` subcommand.

use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dq_model::{FieldKind, ValidationOutcome};

use crate::commands::CheckResult;

#[derive(Default)]
struct KindTally {
    checked: usize,
    valid: usize,
    invalid_format: usize,
    invalid_checksum: usize,
    unsupported: usize,
    ambiguous: usize,
}

pub fn print_check_summary(result: &CheckResult) {
    let mut tallies: BTreeMap<FieldKind, KindTally> = BTreeMap::new();
    for report in &result.reports {
        for (kind, field) in &report.fields {
            let tally = tallies.entry(*kind).or_default();
            tally.checked += 1;
            match &field.outcome {
                ValidationOutcome::Valid => tally.valid += 1,
                ValidationOutcome::InvalidFormat { .. } => tally.invalid_format += 1,
                ValidationOutcome::InvalidChecksum { .. } => tally.invalid_checksum += 1,
                ValidationOutcome::Unsupported { .. } => tally.unsupported += 1,
                ValidationOutcome::Ambiguous { .. } => tally.ambiguous += 1,
            }
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Checked"),
        header_cell("Valid"),
        header_cell("Bad format"),
        header_cell("Bad checksum"),
        header_cell("Unsupported"),
        header_cell("Ambiguous"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..=6 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    let mut totals = KindTally::default();
    for (kind, tally) in &tallies {
        totals.checked += tally.checked;
        totals.valid += tally.valid;
        totals.invalid_format += tally.invalid_format;
        totals.invalid_checksum += tally.invalid_checksum;
        totals.unsupported += tally.unsupported;
        totals.ambiguous += tally.ambiguous;
        table.add_row(tally_row(Cell::new(kind.as_str()), tally));
    }
    table.add_row(tally_row(
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        &totals,
    ));
    println!("{table}");

    let invalid = result.invalid_count();
    println!(
        "{} records checked, {} valid, {} invalid",
        result.reports.len(),
        result.reports.len() - invalid,
        invalid
    );
    if let Some(path) = &result.json_path {
        println!("Reports: {}", path.display());
    }

    print_failing_fields(result);
    print_duplicates(result);
}

fn tally_row(label: Cell, tally: &KindTally) -> Vec<Cell> {
    vec![
        label,
        Cell::new(tally.checked),
        count_cell(tally.valid, Color::Green),
        count_cell(tally.invalid_format, Color::Red),
        count_cell(tally.invalid_checksum, Color::Red),
        count_cell(tally.unsupported, Color::Yellow),
        count_cell(tally.ambiguous, Color::Yellow),
    ]
}

fn print_failing_fields(result: &CheckResult) {
    let mut rows = Vec::new();
    for (index, report) in result.reports.iter().enumerate() {
        for (kind, field) in &report.fields {
            if field.outcome.is_valid() {
                continue;
            }
            rows.push((index, *kind, field));
        }
    }
    if rows.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Field"),
        header_cell("Outcome"),
        header_cell("Reason"),
        header_cell("Normalized"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, kind, field) in rows {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(kind.as_str()),
            outcome_cell(&field.outcome),
            Cell::new(field.outcome.reason().unwrap_or("-")),
            Cell::new(&field.normalized),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_duplicates(result: &CheckResult) {
    if result.duplicates.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record A"),
        header_cell("Record B"),
        header_cell("Name A"),
        header_cell("Name B"),
        header_cell("Score"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for pair in &result.duplicates {
        table.add_row(vec![
            Cell::new(pair.left_index + 1),
            Cell::new(pair.right_index + 1),
            Cell::new(&pair.left_name),
            Cell::new(&pair.right_name),
            Cell::new(format!("{:.3}", pair.score))
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!();
    println!("Likely duplicates:");
    println!("{table}");
}

fn outcome_cell(outcome: &ValidationOutcome) -> Cell {
    let color = match outcome {
        ValidationOutcome::Valid => Color::Green,
        ValidationOutcome::InvalidFormat { .. } | ValidationOutcome::InvalidChecksum { .. } => {
            Color::Red
        }
        ValidationOutcome::Unsupported { .. } | ValidationOutcome::Ambiguous { .. } => {
            Color::Yellow
        }
    };
    Cell::new(outcome.label()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
