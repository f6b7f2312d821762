//! YAML Export functionality
//!
//! Exports the journal and ledger to YAML for human reading.

use std::io::Write;

use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::export::json::LedgerExport;

/// Export the journal and ledger to YAML format
pub fn export_ledger_yaml<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerDeskResult<()> {
    let header = format!(
        "# ledgerdesk ledger export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| LedgerDeskError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| LedgerDeskError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::LedgerFilter;

    #[test]
    fn test_yaml_export_empty_journal() {
        let export = LedgerExport::new(Vec::new(), &LedgerFilter::default());
        let mut output = Vec::new();
        export_ledger_yaml(&export, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("# ledgerdesk ledger export"));

        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["schema_version"].as_str(), Some("1.0.0"));
        assert_eq!(value["metadata"]["entry_count"].as_u64(), Some(0));
        assert_eq!(value["metadata"]["in_balance"].as_bool(), Some(true));
    }
}
