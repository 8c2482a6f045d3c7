//! Invoice file discovery and vendor classification.

use std::path::{Path, PathBuf};

use tracing::warn;

use freight_model::Vendor;

use crate::detect::detect_vendor;
use crate::error::{IngestError, Result};

/// A discovered invoice file with its detected carrier.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub vendor: Vendor,
}

impl DiscoveredFile {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }
}

/// Lists invoice CSV files in a period directory, sorted by name, each
/// classified by vendor. Unknown-vendor files are returned too, so the
/// pipeline can record why it skips them rather than silently dropping them.
pub fn discover_invoice_files(dir: &Path) -> Result<Vec<DiscoveredFile>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        let vendor = detect_vendor(&name);
        if vendor == Vendor::Unknown {
            warn!(file = %name, "no vendor keyword in file name; file will be skipped");
        }
        files.push(DiscoveredFile { path, vendor });
    }

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in [
            "FDX_20250802_LOL509.csv",
            "UPS_LOL509_08022025.csv",
            "generic_report.csv",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), "a,b\n1,2\n").unwrap();
        }
        dir
    }

    #[test]
    fn discovers_csv_files_sorted_with_vendors() {
        let dir = seed_dir();
        let files = discover_invoice_files(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(DiscoveredFile::file_name).collect();
        assert_eq!(
            names,
            vec![
                "FDX_20250802_LOL509.csv",
                "UPS_LOL509_08022025.csv",
                "generic_report.csv",
            ]
        );
        assert_eq!(files[0].vendor, Vendor::Fedex);
        assert_eq!(files[1].vendor, Vendor::Ups);
        assert_eq!(files[2].vendor, Vendor::Unknown);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = discover_invoice_files(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
