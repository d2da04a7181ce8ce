use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::CleanOutcome;

pub fn print_summary(outcome: &CleanOutcome) {
    println!("Dataset: {}", outcome.dataset);
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input rows"),
        header_cell("Output rows"),
        header_cell("Problems"),
    ]);
    apply_table_style(&mut table);
    let problems = outcome.report.len();
    table.add_row(vec![
        Cell::new(outcome.input_rows).set_alignment(CellAlignment::Right),
        Cell::new(outcome.output_rows).set_alignment(CellAlignment::Right),
        count_cell(problems),
    ]);
    println!("{table}");
    print_problem_table(outcome);
}

fn print_problem_table(outcome: &CleanOutcome) {
    if outcome.report.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rule"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for issue in &outcome.report.issues {
        table.add_row(vec![
            Cell::new(issue.rule()).fg(Color::Yellow),
            Cell::new(issue.to_string()),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn count_cell(count: usize) -> Cell {
    let cell = Cell::new(count).set_alignment(CellAlignment::Right);
    if count > 0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Green)
    }
}
