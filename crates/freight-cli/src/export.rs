//! Output writers: the aggregate analysis CSV and the QC report JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use freight_model::{AggregateRow, ProductCategory, RunReport, WeightedAverages};

/// Writes the basket analysis table, most common baskets first.
pub fn write_aggregate_csv(
    path: &Path,
    rows: &[AggregateRow],
    averages: Option<&WeightedAverages>,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;

    let mut header: Vec<String> = ProductCategory::ALL
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    header.extend(
        [
            "count_of_orders",
            "orders_share",
            "avg_order_shipping_cost",
            "total_items_for_weighting",
            "cost_per_product",
            "blanket_units",
            "blanket_share",
        ]
        .map(String::from),
    );
    for category in ProductCategory::ALL {
        header.push(format!("{category}_units"));
        header.push(format!("{category}_share"));
    }
    writer.write_record(&header)?;

    for row in rows {
        let mut record: Vec<String> = ProductCategory::ALL
            .iter()
            .map(|c| row.quantities.get(*c).to_string())
            .collect();
        record.push(row.count_of_orders.to_string());
        record.push(format!("{:.6}", row.orders_share));
        record.push(format!("{:.2}", row.avg_order_shipping_cost));
        record.push(row.total_items_for_weighting.to_string());
        record.push(
            row.cost_per_product
                .map(|cost| format!("{cost:.4}"))
                .unwrap_or_default(),
        );
        record.push(row.blanket_units.to_string());
        record.push(format!("{:.6}", row.blanket_share));
        for category in ProductCategory::ALL {
            record.push(row.units(category).to_string());
            record.push(format!("{:.6}", row.share(category)));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    if let Some(averages) = averages {
        write_averages_csv(&path.with_file_name("weighted_averages.csv"), averages)?;
    }
    Ok(())
}

fn write_averages_csv(path: &Path, averages: &WeightedAverages) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["metric", "weighted_avg_cost"])?;
    for (category, cost) in &averages.per_category {
        writer.write_record([category.as_str(), &format!("{cost:.2}")])?;
    }
    writer.write_record(["order_average", &format!("{:.2}", averages.order_average)])?;
    if let Some(blanket) = averages.blanket_average {
        writer.write_record(["blanket_average", &format!("{blanket:.2}")])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the QC report for audit and downstream tooling.
pub fn write_report_json(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Resolves and creates the output directory.
pub fn prepare_output_dir(invoice_dir: &Path, requested: Option<&Path>) -> Result<PathBuf> {
    let dir = requested
        .map(Path::to_path_buf)
        .unwrap_or_else(|| invoice_dir.join("output"));
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
