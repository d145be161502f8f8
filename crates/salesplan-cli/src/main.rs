//! CLI application for sales plan OCR review and revenue summaries.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, confirm, fields, revenue, stores, suggest};

/// Sales plan tools - map scanned plan text to plan fields, summarize revenue
#[derive(Parser)]
#[command(name = "salesplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest plan fields for a batch of OCR tokens
    Match(suggest::MatchArgs),

    /// Suggest plan fields for many token files
    Batch(batch::BatchArgs),

    /// Review suggestions and write confirmed values into a plan
    Confirm(confirm::ConfirmArgs),

    /// Summarize a revenue log
    Revenue(revenue::RevenueArgs),

    /// Print the store directory grouped by store group
    Stores(stores::StoresArgs),

    /// List the plan field catalog
    Fields(fields::FieldsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Match(args) => suggest::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Confirm(args) => confirm::run(args, config_path).await,
        Commands::Revenue(args) => revenue::run(args, config_path).await,
        Commands::Stores(args) => stores::run(args).await,
        Commands::Fields(args) => fields::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
