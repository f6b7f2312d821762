//! Export module for ledgerdesk
//!
//! - CSV: general ledger postings (spreadsheet-compatible)
//! - JSON: journal plus ledger, machine-readable
//! - YAML: journal plus ledger, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

pub use self::csv::export_ledger_csv;
pub use json::{export_ledger_json, ExportMetadata, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_ledger_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "Unknown export format '{}'. Use csv, json or yaml",
                other
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
