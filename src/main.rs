use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use ledgerdesk::cli::{
    handle_chat_command, handle_document_command, handle_entry_command, handle_ledger_command,
    AppContext, DocumentCommands, EntryCommands, LedgerCommands,
};
use ledgerdesk::config::{DeskPaths, Settings};

#[derive(Parser)]
#[command(
    name = "ledgerdesk",
    author = "Kaylee Beyene",
    version,
    about = "Terminal client for journal entries, the general ledger and the virtual CFO",
    long_about = "ledgerdesk talks to the accounting backend: it lists and creates \
                  journal entries (refusing unbalanced ones before they are sent), \
                  uploads documents for extraction, downloads stored documents, \
                  browses the general ledger and chats with the virtual CFO."
)]
struct Cli {
    /// Backend base URL (overrides the configured one)
    #[arg(long, global = true, env = "LEDGERDESK_API_URL")]
    api_url: Option<String>,

    /// More log output (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Journal entry commands
    #[command(subcommand, alias = "je")]
    Entry(EntryCommands),

    /// General ledger commands
    #[command(subcommand, alias = "gl")]
    Ledger(LedgerCommands),

    /// Document upload and download
    #[command(subcommand, alias = "doc")]
    Document(DocumentCommands),

    /// Ask the virtual CFO (interactive when no message is given)
    Chat {
        /// Question to ask
        message: Option<String>,
    },

    /// Write the default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ledgerdesk::logging::init(cli.verbose);

    let paths = DeskPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing ledgerdesk at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to {}", paths.settings_file().display());
            println!("Run 'ledgerdesk config' to review them.");
        }
        Some(Commands::Config) => {
            let api_url = cli.api_url.as_deref().unwrap_or(&settings.api_url);
            println!("ledgerdesk Configuration");
            println!("========================");
            println!("Data directory:     {}", paths.base_dir().display());
            println!("Settings file:      {}", paths.settings_file().display());
            println!("Download directory: {}", settings.download_dir(&paths).display());
            println!("Initialized:        {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  API URL:       {}", api_url);
            println!("  User ID:       {}", settings.user_id);
            println!("  Currency:      {}", settings.currency_code);
            println!("  Date format:   {}", settings.date_format);
            println!(
                "  Validation:    single-sided lines {}, non-negative amounts {}",
                on_off(settings.validation.single_sided_lines),
                on_off(settings.validation.non_negative_amounts)
            );
        }
        Some(Commands::Entry(cmd)) => {
            let ctx = AppContext::new(paths, settings, cli.api_url.as_deref())?;
            handle_entry_command(&ctx, cmd).await?;
        }
        Some(Commands::Ledger(cmd)) => {
            let ctx = AppContext::new(paths, settings, cli.api_url.as_deref())?;
            handle_ledger_command(&ctx, cmd).await?;
        }
        Some(Commands::Document(cmd)) => {
            let ctx = AppContext::new(paths, settings, cli.api_url.as_deref())?;
            handle_document_command(&ctx, cmd).await?;
        }
        Some(Commands::Chat { message }) => {
            let ctx = AppContext::new(paths, settings, cli.api_url.as_deref())?;
            handle_chat_command(&ctx, message).await?;
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
