//! General ledger CLI commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::AppContext;
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::export::{
    export_ledger_csv, export_ledger_json, export_ledger_yaml, ExportFormat, LedgerExport,
};
use crate::models::AccountCode;
use crate::reports::{GeneralLedger, LedgerFilter};
use crate::services::JournalService;

/// Filters shared by the ledger subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only this account code
    #[arg(short, long)]
    pub account: Option<AccountCode>,
    /// Case-insensitive search over account, reference and description
    #[arg(short, long)]
    pub search: Option<String>,
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl From<FilterArgs> for LedgerFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            account: args.account,
            start_date: args.from,
            end_date: args.to,
            search: args.search,
        }
    }
}

/// General ledger subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Show postings per account with running balances
    Show {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Export the journal and ledger to a file
    Export {
        /// Output file path
        path: PathBuf,
        /// csv, json or yaml; guessed from the file extension when omitted
        #[arg(short, long)]
        format: Option<ExportFormat>,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle a general ledger command
pub async fn handle_ledger_command(ctx: &AppContext, cmd: LedgerCommands) -> LedgerDeskResult<()> {
    let service = JournalService::new(&ctx.client, &ctx.settings.validation);

    match cmd {
        LedgerCommands::Show { filter } => {
            let filter = LedgerFilter::from(filter);
            if let (Some(from), Some(to)) = (filter.start_date, filter.end_date) {
                if from > to {
                    return Err(LedgerDeskError::Validation(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
            }

            let entries = service.list().await?;
            let ledger = GeneralLedger::generate(&entries, &filter);
            if let Some(code) = filter.account {
                ledger.account(code)?;
            }
            print!("{}", ledger.format_terminal());
        }

        LedgerCommands::Export {
            path,
            format,
            filter,
        } => {
            let format = format.unwrap_or_else(|| format_from_extension(&path));
            let entries = service.list().await?;
            let export = LedgerExport::new(entries, &LedgerFilter::from(filter));

            write_export(&export, format, &path)?;
            println!(
                "Exported {} entries ({} postings) as {} to {}",
                export.metadata.entry_count,
                export.metadata.posting_count,
                format,
                path.display()
            );
        }
    }

    Ok(())
}

fn format_from_extension(path: &Path) -> ExportFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse().ok())
        .unwrap_or(ExportFormat::Csv)
}

fn write_export(export: &LedgerExport, format: ExportFormat, path: &Path) -> LedgerDeskResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .map_err(|e| LedgerDeskError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => export_ledger_csv(&export.ledger, &mut writer)?,
        ExportFormat::Json => export_ledger_json(export, &mut writer, true)?,
        ExportFormat::Yaml => export_ledger_yaml(export, &mut writer)?,
    }

    std::io::Write::flush(&mut writer).map_err(|e| LedgerDeskError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::LedgerFilter;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(format_from_extension(Path::new("out.YML")), ExportFormat::Yaml);
        assert_eq!(format_from_extension(Path::new("out")), ExportFormat::Csv);
    }

    #[test]
    fn test_write_export_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("exports").join("ledger.json");
        let export = LedgerExport::new(Vec::new(), &LedgerFilter::default());

        write_export(&export, ExportFormat::Json, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"schema_version\""));
    }
}
