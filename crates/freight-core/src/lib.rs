//! Pipeline core: extraction, deduplication, and run orchestration.
//!
//! Composes the ingestion, mapping, matching, and analysis crates into the
//! monthly batch run: raw invoice files in, aggregate cost table plus QC
//! report out.

pub mod dedupe;
pub mod error;
pub mod extract;
pub mod pipeline;

pub use dedupe::{DedupOutcome, dedupe_shipments};
pub use error::{ExtractError, PipelineError};
pub use extract::{ExtractOptions, SheetExtraction, extract_sheet};
pub use pipeline::{PipelineConfig, RunOutput, run_pipeline};
