use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docvault::cli::{handle_document_command, DocumentCommands};
use docvault::config::{paths::VaultPaths, settings::Settings};
use docvault::display::format_audit_entries;
use docvault::models::DocumentId;
use docvault::storage::Storage;

#[derive(Parser)]
#[command(
    name = "docvault",
    author = "Kaylee Beyene",
    version,
    about = "Encrypted, integrity-checked document storage",
    long_about = "docvault stores text documents encrypted with AES-256-GCM under a \
                  passphrase-derived key, keeps a SHA-256 digest of every document, \
                  and verifies each upload by decrypting what was written."
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Document commands
    #[command(subcommand, alias = "doc")]
    Document(DocumentCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show entries for this document
        #[arg(short, long)]
        document: Option<String>,
    },

    /// Initialize a new vault
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Document(cmd)) => {
            handle_document_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit, document }) => {
            let entries = match document {
                Some(id) => {
                    let mut entries = storage.audit.read_for_document(&DocumentId::parse(&id)?)?;
                    let start = entries.len().saturating_sub(limit);
                    entries.split_off(start)
                }
                None => storage.audit.read_recent(limit)?,
            };
            println!("{}", format_audit_entries(&entries).trim_end());
        }
        Some(Commands::Init) => {
            println!("Initializing docvault at: {}", paths.base_dir().display());
            docvault::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Set {} or enter your passphrase when prompted.", settings.passphrase_env);
            println!("Run 'docvault document upload <FILE> --owner <OWNER>' to store a document.");
        }
        Some(Commands::Config) => {
            println!("docvault Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Documents file:  {}", paths.documents_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Key derivation:      {}", settings.kdf.algorithm_name());
            println!("  KDF parameters:      {}", serde_json::to_string(&settings.kdf)?);
            println!("  Max upload size:     {} bytes", settings.upload.max_bytes);
            println!(
                "  Accepted extensions: {}",
                settings.upload.accepted_extensions.join(", ")
            );
            println!("  Passphrase variable: {}", settings.passphrase_env);
        }
        None => {
            println!("docvault - encrypted document storage");
            println!();
            println!("Run 'docvault --help' for usage information.");
        }
    }

    Ok(())
}
