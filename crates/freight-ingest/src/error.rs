use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading invoice files or scanning a directory. All of
/// these are file-level: the pipeline logs and continues.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
