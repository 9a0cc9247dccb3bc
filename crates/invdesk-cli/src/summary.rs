use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use invdesk_model::{Notice, NoticeLevel};

use crate::commands::{BlurReport, DeleteOutcome, MaskReport, SelectionReport};

pub fn print_mask(report: &MaskReport) {
    println!("{}", mask_table(report));
    println!("Display: {}", report.display);
    if let Some(value) = &report.value {
        println!("Value: {value}");
    }
}

pub fn print_blur(report: &BlurReport) {
    println!("{}", report.display);
    if let Some(value) = &report.value {
        println!("Value: {value}");
    }
}

pub fn print_selection(report: &SelectionReport) {
    println!("{}", selection_table(report));
}

pub fn print_delete(outcome: &DeleteOutcome) {
    for notice in &outcome.report.notices {
        print_notice(notice);
    }
    if let Some(result) = &outcome.report.result {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Requested"), header_cell("Removed")]);
        apply_table_style(&mut table);
        let requested = result
            .requested
            .requested_count()
            .map_or_else(|| "all matching".to_string(), |n| n.to_string());
        let removed = match (&result.removed_ids, result.removed_count) {
            (Some(ids), _) => ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            (None, Some(count)) => count.to_string(),
            (None, None) => "unknown".to_string(),
        };
        let removed_cell = if result.ambiguous {
            Cell::new(removed).fg(Color::Yellow)
        } else {
            Cell::new(removed)
        };
        table.add_row(vec![Cell::new(requested), removed_cell]);
        println!("{table}");
    }
    if let Some(page) = &outcome.report.refreshed {
        let ids: Vec<String> = page.ids.iter().map(ToString::to_string).collect();
        println!("Page {}: {}", page.number, ids.join(", "));
    }
    print_selection(&outcome.selection);
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Error | NoticeLevel::Warning => eprintln!("{notice}"),
        NoticeLevel::Info | NoticeLevel::Success => println!("{notice}"),
    }
}

pub fn mask_table(report: &MaskReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Key"),
        header_cell("Display"),
        header_cell("Caret"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, step) in report.steps.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(step.key),
            Cell::new(&step.display),
            Cell::new(step.caret),
        ]);
    }
    table
}

pub fn selection_table(report: &SelectionReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("View"), header_cell(&report.view)]);
    apply_table_style(&mut table);
    table.add_row(vec![dim_cell("Mode"), Cell::new(report.mode)]);
    table.add_row(vec![dim_cell("Count"), Cell::new(&report.count)]);
    let ids = if report.ids.is_empty() {
        "-".to_string()
    } else {
        report.ids.join(", ")
    };
    table.add_row(vec![dim_cell("Ids"), Cell::new(ids)]);
    table.add_row(vec![
        dim_cell("Button"),
        match &report.button {
            Some(label) => Cell::new(label).fg(Color::Red).add_attribute(Attribute::Bold),
            None => dim_cell("hidden"),
        },
    ]);
    table.add_row(vec![dim_cell("Header"), Cell::new(report.header)]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
