use thiserror::Error;

use freight_ingest::IngestError;
use freight_match::OrderFeedError;
use freight_model::CanonicalField;

/// Why one file could not be extracted. File-level and non-fatal: the
/// pipeline records the reason and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no header row found in {file}")]
    HeaderNotFound { file: String },

    #[error("{file} is missing required columns: {}", format_fields(fields))]
    MissingRequiredField {
        file: String,
        fields: Vec<CanonicalField>,
    },

    #[error(transparent)]
    Read(#[from] IngestError),
}

fn format_fields(fields: &[CanonicalField]) -> String {
    let names: Vec<&str> = fields.iter().map(CanonicalField::as_str).collect();
    names.join(", ")
}

/// Run-level failures. Unlike extraction problems these abort the run:
/// reconciling against a missing or partial order set would produce
/// statistics that cannot be told apart from real data-quality issues.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    OrderFeed(#[from] OrderFeedError),
}
