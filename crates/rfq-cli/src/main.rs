//! CLI for RFQ field extraction and price-band suggestions.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, documents, process};

/// RFQ price bands - Extract fields from solicitations and suggest a price band
#[derive(Parser)]
#[command(name = "rfq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields and suggest a price band for a single file, without storing it
    Process(process::ProcessArgs),

    /// Store a file as a new solicitation
    Upload(documents::UploadArgs),

    /// List stored solicitations
    List,

    /// Show a solicitation with its extracted data and latest suggestion
    Show(documents::IdArgs),

    /// Run field extraction on a stored solicitation
    Extract(documents::IdArgs),

    /// Suggest a price band for an extracted solicitation
    Suggest(documents::IdArgs),

    /// Manually correct a solicitation
    Edit(documents::EditArgs),

    /// Show the audit trail of a solicitation
    Audit(documents::IdArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr, stdout carries command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Upload(args) => documents::upload(args, config_path).await,
        Commands::List => documents::list(config_path).await,
        Commands::Show(args) => documents::show(args, config_path).await,
        Commands::Extract(args) => documents::extract(args, config_path).await,
        Commands::Suggest(args) => documents::suggest(args, config_path).await,
        Commands::Edit(args) => documents::edit(args, config_path).await,
        Commands::Audit(args) => documents::audit(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
