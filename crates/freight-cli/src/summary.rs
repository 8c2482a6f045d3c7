//! Terminal summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use freight_core::RunOutput;
use freight_model::{FileStatus, MatchTier, ProductCategory};

pub fn print_summary(result: &RunOutput) {
    let report = &result.report;

    println!(
        "Files: {} read, {} skipped, {} failed",
        report.files_read, report.files_skipped, report.files_failed
    );
    println!(
        "Rows: {} extracted, {} rejected",
        report.rows_extracted, report.rows_rejected
    );
    if let Some((from, to)) = report.order_window {
        println!("Order window: {from} .. {to}");
    }

    print_file_table(result);
    print_match_table(result);
    print_basket_table(result);
    print_averages(result);

    if let Some(check) = &report.share_check
        && !check.ok
    {
        eprintln!("WARNING: category share sums failed the sanity check: {:?}", check.sums);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn print_file_table(result: &RunOutput) {
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Vendor"),
        header_cell("Status"),
    ]);
    for outcome in &result.report.files {
        let status = match &outcome.status {
            FileStatus::Read { rows } => Cell::new(format!("read ({rows} rows)")),
            FileStatus::Skipped { reason } => {
                Cell::new(format!("skipped: {reason}")).fg(Color::Yellow)
            }
            FileStatus::Failed { reason } => Cell::new(format!("failed: {reason}")).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&outcome.file),
            Cell::new(outcome.vendor),
            status,
        ]);
    }
    println!("{table}");
}

fn print_match_table(result: &RunOutput) {
    if result.report.match_tiers.is_empty() {
        return;
    }
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Vendor"),
        header_cell("Exact"),
        header_cell("Fuzzy high"),
        header_cell("Fuzzy low"),
        header_cell("Unmatched"),
        header_cell("Ambiguous"),
        header_cell("Match rate"),
        header_cell("Dups removed"),
    ]);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (vendor, tiers) in &result.report.match_tiers {
        let count = |tier: MatchTier| tiers.get(&tier).copied().unwrap_or(0);
        let rate = result
            .report
            .match_rate
            .get(vendor)
            .map(|rate| format!("{:.1}%", rate * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let dups = result
            .report
            .duplicates_removed
            .get(vendor)
            .copied()
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(vendor),
            Cell::new(count(MatchTier::Exact)),
            Cell::new(count(MatchTier::FuzzyHigh)),
            Cell::new(count(MatchTier::FuzzyLow)),
            Cell::new(count(MatchTier::Unmatched)),
            Cell::new(count(MatchTier::Ambiguous)),
            Cell::new(rate),
            Cell::new(dups),
        ]);
    }
    println!("{table}");
}

/// Top basket combinations, most common first.
fn print_basket_table(result: &RunOutput) {
    if result.aggregate.is_empty() {
        return;
    }
    const TOP: usize = 10;
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Basket"),
        header_cell("Orders"),
        header_cell("Share"),
        header_cell("Avg cost"),
        header_cell("Cost/product"),
    ]);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in result.aggregate.iter().take(TOP) {
        let basket: Vec<String> = ProductCategory::ALL
            .iter()
            .filter(|c| row.quantities.get(**c) > 0)
            .map(|c| format!("{}x {c}", row.quantities.get(*c)))
            .collect();
        let cost_per_product = row
            .cost_per_product
            .map(|cost| format!("${cost:.2}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(basket.join(" + ")),
            Cell::new(row.count_of_orders),
            Cell::new(format!("{:.1}%", row.orders_share * 100.0)),
            Cell::new(format!("${:.2}", row.avg_order_shipping_cost)),
            Cell::new(cost_per_product),
        ]);
    }
    if result.aggregate.len() > TOP {
        println!("{table}");
        println!("... and {} more basket combinations", result.aggregate.len() - TOP);
    } else {
        println!("{table}");
    }
}

fn print_averages(result: &RunOutput) {
    let Some(averages) = &result.averages else {
        return;
    };
    let mut table = styled_table();
    table.set_header(vec![header_cell("Category"), header_cell("Weighted avg cost")]);
    align_column(&mut table, 1, CellAlignment::Right);
    for (category, cost) in &averages.per_category {
        table.add_row(vec![Cell::new(category), Cell::new(format!("${cost:.2}"))]);
    }
    table.add_row(vec![
        Cell::new("order average").add_attribute(Attribute::Bold),
        Cell::new(format!("${:.2}", averages.order_average)).add_attribute(Attribute::Bold),
    ]);
    if let Some(blanket) = averages.blanket_average {
        table.add_row(vec![
            Cell::new("blanket average").add_attribute(Attribute::Bold),
            Cell::new(format!("${blanket:.2}")).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}
