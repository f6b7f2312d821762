//! Document CLI commands
//!
//! Upload source documents for extraction and fetch stored documents.

use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use super::AppContext;
use crate::api::Progress;
use crate::display::format_extraction;
use crate::error::{LedgerDeskError, LedgerDeskResult};
use crate::services::{DirectorySink, DocumentService};

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentCommands {
    /// Upload a document and show the extracted journal entries
    Upload {
        /// Invoice, receipt or statement to process
        file: PathBuf,
        /// User id sent with the upload (defaults to the configured one)
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Download a stored document
    Fetch {
        /// Storage key returned by an upload
        key: String,
        /// Output file (defaults to document-KEY.pdf in the download directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a document command
pub async fn handle_document_command(
    ctx: &AppContext,
    cmd: DocumentCommands,
) -> LedgerDeskResult<()> {
    let service = DocumentService::new(&ctx.client, &ctx.blobs);
    let settings = &ctx.settings;

    match cmd {
        DocumentCommands::Upload { file, user_id } => {
            let user_id = user_id.unwrap_or_else(|| settings.user_id.clone());
            println!("Uploading {}...", file.display());

            let extraction = service.upload(&file, &user_id).await?;
            print!(
                "{}",
                format_extraction(&extraction, &settings.date_format, &settings.currency_code)
            );
        }

        DocumentCommands::Fetch { key, output } => {
            let (dir, file_name) = match output {
                Some(path) => {
                    let name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(str::to_string)
                        .ok_or_else(|| {
                            LedgerDeskError::Validation(format!(
                                "Invalid output path: {}",
                                path.display()
                            ))
                        })?;
                    let dir = path
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| PathBuf::from("."));
                    (dir, Some(name))
                }
                None => (settings.download_dir(&ctx.paths), None),
            };

            let sink = DirectorySink::new(dir);
            let saved = service
                .save(&key, file_name.as_deref(), &sink, report_progress)
                .await;
            eprintln!();

            let path = saved?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

fn report_progress(progress: Progress) {
    eprint!(
        "\rDownloading... {:>3.0}% ({} of {} bytes)",
        progress.percent(),
        progress.received,
        progress.total
    );
    let _ = std::io::stderr().flush();
}
