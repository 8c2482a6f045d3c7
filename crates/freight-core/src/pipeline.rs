//! End-to-end run orchestration.
//!
//! Per-file extraction is order-independent and runs on scoped worker
//! threads against shared read-only field maps. Dedup, reconciliation,
//! and aggregation need the complete shipment set and the complete order
//! index, so they run strictly after the extraction barrier. A failed
//! order fetch aborts the run before any matching; partial aggregates are
//! never produced.

use std::collections::BTreeMap;

use tracing::{info, info_span, warn};

use freight_analysis::{
    AggregationConfig, check_share_sums, consolidate_orders, group_baskets, weighted_averages,
};
use freight_ingest::{DiscoveredFile, read_invoice_sheet};
use freight_map::VendorFieldMaps;
use freight_match::{
    DEFAULT_REVIEW_SAMPLE, DateRange, MatchConfig, OrderFeed, OrderFeedError, OrderIndex,
    match_shipment, summarize_matches,
};
use freight_model::{
    AggregateRow, FileOutcome, FileStatus, MatchResult, OrderRecord, RejectedRow, RunReport,
    ShipmentRecord, Vendor, WeightedAverages,
};

use crate::dedupe::dedupe_shipments;
use crate::error::{ExtractError, PipelineError};
use crate::extract::{ExtractOptions, SheetExtraction, extract_sheet};

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub extract: ExtractOptions,
    pub matching: MatchConfig,
    pub aggregation: AggregationConfig,
    /// Days added to each side of the invoice ship-date span when querying
    /// the order feed. Orders can precede their invoice by weeks.
    pub order_buffer_days: u64,
    pub review_sample_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            matching: MatchConfig::default(),
            aggregation: AggregationConfig::default(),
            order_buffer_days: 60,
            review_sample_limit: DEFAULT_REVIEW_SAMPLE,
        }
    }
}

/// Everything a completed run hands to the sink.
#[derive(Debug)]
pub struct RunOutput {
    pub aggregate: Vec<AggregateRow>,
    pub averages: Option<WeightedAverages>,
    pub matches: Vec<MatchResult>,
    pub rejects: Vec<RejectedRow>,
    pub report: RunReport,
}

/// Runs the full pipeline over the discovered files.
///
/// File failures are recorded and skipped; only an unusable order feed is
/// fatal. When no rows survive extraction the run still returns its report,
/// with an empty aggregate and no averages.
pub fn run_pipeline(
    files: &[DiscoveredFile],
    maps: &VendorFieldMaps,
    feed: &dyn OrderFeed,
    config: &PipelineConfig,
) -> Result<RunOutput, PipelineError> {
    let extraction = extract_files(files, maps, config);

    let mut report = RunReport {
        files: extraction.outcomes,
        files_read: 0,
        files_skipped: 0,
        files_failed: 0,
        rows_extracted: 0,
        rows_rejected: extraction.rejects.len(),
        rejects_by_field: BTreeMap::new(),
        duplicates_removed: BTreeMap::new(),
        match_tiers: BTreeMap::new(),
        match_rate: BTreeMap::new(),
        review_sample: Vec::new(),
        share_check: None,
        order_window: None,
    };
    for outcome in &report.files {
        match outcome.status {
            FileStatus::Read { .. } => report.files_read += 1,
            FileStatus::Skipped { .. } => report.files_skipped += 1,
            FileStatus::Failed { .. } => report.files_failed += 1,
        }
    }
    for reject in &extraction.rejects {
        *report.rejects_by_field.entry(reject.field).or_insert(0) += 1;
    }

    let deduped = dedupe_shipments(extraction.records);
    report.duplicates_removed = deduped.removed_by_vendor;
    report.rows_extracted = deduped.kept.len();

    if deduped.kept.is_empty() {
        warn!("no shipment rows survived extraction; skipping reconciliation");
        return Ok(RunOutput {
            aggregate: Vec::new(),
            averages: None,
            matches: Vec::new(),
            rejects: extraction.rejects,
            report,
        });
    }

    // Barrier passed: the consolidated set is complete. Fetch the full
    // order window before any matching.
    let window = invoice_window(&deduped.kept).buffered(config.order_buffer_days);
    report.order_window = Some((window.from, window.to));
    let orders = {
        let span = info_span!("order_feed", from = %window.from, to = %window.to);
        let _guard = span.enter();
        let orders = feed.fetch(window)?;
        if orders.is_empty() {
            return Err(PipelineError::OrderFeed(OrderFeedError::EmptyWindow(window)));
        }
        info!(orders = orders.len(), "order feed loaded");
        orders
    };

    let index = OrderIndex::build(orders, maps.all_reference_prefixes());
    let matches: Vec<MatchResult> = deduped
        .kept
        .iter()
        .map(|shipment| match_shipment(shipment, &index, &config.matching))
        .collect();

    let stats = summarize_matches(&matches, config.review_sample_limit);
    report.match_tiers = stats.tiers_by_vendor;
    report.match_rate = stats.match_rate_by_vendor;
    report.review_sample = stats.review_sample;

    let pairs = build_pairs(&deduped.kept, &matches, &index);
    let consolidated = consolidate_orders(&pairs, &config.aggregation);
    let aggregate = group_baskets(&consolidated, &config.aggregation);
    let averages = (!aggregate.is_empty()).then(|| weighted_averages(&aggregate));

    let share_check = check_share_sums(&aggregate);
    if !share_check.ok {
        warn!(sums = ?share_check.sums, "category share sums failed the sanity check");
    }
    report.share_check = Some(share_check);

    Ok(RunOutput {
        aggregate,
        averages,
        matches,
        rejects: extraction.rejects,
        report,
    })
}

struct ExtractionResults {
    outcomes: Vec<FileOutcome>,
    records: Vec<ShipmentRecord>,
    rejects: Vec<RejectedRow>,
}

/// Reads and extracts every usable file, one worker thread per file.
///
/// Workers share only immutable inputs; each returns its own outcome and
/// the spawning scope is the barrier.
fn extract_files(
    files: &[DiscoveredFile],
    maps: &VendorFieldMaps,
    config: &PipelineConfig,
) -> ExtractionResults {
    let alias_keys = maps.all_alias_keys();

    let mut outcomes = Vec::with_capacity(files.len());
    let mut jobs: Vec<&DiscoveredFile> = Vec::new();
    for file in files {
        if file.vendor == Vendor::Unknown {
            outcomes.push(FileOutcome {
                file: file.file_name().to_string(),
                vendor: file.vendor,
                status: FileStatus::Skipped {
                    reason: "no vendor keyword in file name".to_string(),
                },
            });
            continue;
        }
        if maps.get(file.vendor).is_none() {
            outcomes.push(FileOutcome {
                file: file.file_name().to_string(),
                vendor: file.vendor,
                status: FileStatus::Skipped {
                    reason: format!("no field map configured for {}", file.vendor),
                },
            });
            continue;
        }
        jobs.push(file);
    }

    let mut results: Vec<(String, Vendor, Result<SheetExtraction, ExtractError>)> =
        Vec::with_capacity(jobs.len());
    std::thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .iter()
            .map(|file| {
                let alias_keys = &alias_keys;
                let options = &config.extract;
                let map = maps
                    .get(file.vendor)
                    .expect("job list only holds mapped vendors");
                scope.spawn(move || {
                    let extraction = read_invoice_sheet(&file.path, file.vendor)
                        .map_err(ExtractError::from)
                        .and_then(|sheet| extract_sheet(&sheet, map, alias_keys, options));
                    (file.file_name().to_string(), file.vendor, extraction)
                })
            })
            .collect();
        for handle in handles {
            // A panicking worker is a bug, not a data problem; propagate.
            results.push(handle.join().expect("extraction worker panicked"));
        }
    });

    let mut records = Vec::new();
    let mut rejects = Vec::new();
    for (file, vendor, result) in results {
        match result {
            Ok(extraction) => {
                outcomes.push(FileOutcome {
                    file,
                    vendor,
                    status: FileStatus::Read {
                        rows: extraction.records.len(),
                    },
                });
                records.extend(extraction.records);
                rejects.extend(extraction.rejects);
            }
            Err(error) => {
                warn!(file = %file, %error, "file failed extraction; continuing");
                outcomes.push(FileOutcome {
                    file,
                    vendor,
                    status: FileStatus::Failed {
                        reason: error.to_string(),
                    },
                });
            }
        }
    }

    // Deterministic report order regardless of worker scheduling.
    outcomes.sort_by(|a, b| a.file.cmp(&b.file));
    ExtractionResults {
        outcomes,
        records,
        rejects,
    }
}

/// The ship-date span of the consolidated set.
fn invoice_window(records: &[ShipmentRecord]) -> DateRange {
    let mut from = records[0].ship_date;
    let mut to = records[0].ship_date;
    for record in records {
        from = from.min(record.ship_date);
        to = to.max(record.ship_date);
    }
    DateRange::new(from, to)
}

/// Joins matched shipments back to their order rows for aggregation.
fn build_pairs(
    shipments: &[ShipmentRecord],
    matches: &[MatchResult],
    index: &OrderIndex,
) -> Vec<(ShipmentRecord, MatchResult, OrderRecord)> {
    shipments
        .iter()
        .zip(matches)
        .filter_map(|(shipment, result)| {
            let order_id = result.order_id.as_deref()?;
            let order = index.find_by_id(order_id)?;
            Some((shipment.clone(), result.clone(), order.clone()))
        })
        .collect()
}
