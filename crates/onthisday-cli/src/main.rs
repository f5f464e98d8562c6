//! onthisday CLI - "On this day" memories for Immich
//!
//! One pass per invocation: search today's date in every past year, drop
//! excluded people and tags, and create one memory per year. Meant to be run
//! daily from cron or a systemd timer.

mod api;
mod config;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::ImmichClient;
use config::Config;

#[derive(Parser)]
#[command(name = "onthisday")]
#[command(about = "Create \"on this day\" memories on an Immich server", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./config.json, ./config.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build today's memories (default)
    Run(RunArgs),

    /// Show current configuration
    Config,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Date to build memories for, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Only report what would be created
    #[arg(long)]
    dry_run: bool,

    /// Skip deleting existing memories even if cleanupDaily is set
    #[arg(long)]
    no_cleanup: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Config) => show_config(cli.config.as_deref()),
        Some(Commands::Run(args)) => run(cli.config.as_deref(), args).await,
        None => run(cli.config.as_deref(), RunArgs::default()).await,
    }
}

async fn run(config_path: Option<&Path>, args: RunArgs) -> Result<()> {
    let (config, path) = Config::load(config_path)?;
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());

    info!("📅 On this day memories for {}", today.format("%A, %d %B %Y"));
    let printable = serde_json::to_string(&config.masked())?;
    info!(config = ?path, "Using config: {}", printable);

    let settings = config.run_settings(!args.no_cleanup, args.dry_run);
    let client = ImmichClient::new(&config.server_url, &config.api_key);

    let report = onthisday::run_memories_job(&client, &settings, today)
        .await
        .context("Memories run aborted")?;

    match &report.reconcile {
        Some(reconciled) => info!(
            "✅ Done: {} memories created, {} removed",
            reconciled.created.len(),
            reconciled.deleted
        ),
        None => info!("✅ Dry run done: {} memories would be created", report.buckets.len()),
    }

    Ok(())
}

fn show_config(config_path: Option<&Path>) -> Result<()> {
    let path = Config::resolve_path(config_path)?;
    let mut config = Config::load_from(&path, config_path.is_some())?;
    config.apply_env();
    let masked = config.masked();

    println!("{}", "Configuration".bold());
    println!("  Config file:     {}", path.display().to_string().cyan());
    println!("  Server URL:      {}", or_unset(&masked.server_url));
    println!("  API key:         {}", or_unset(&masked.api_key));
    println!(
        "  Excluded people: {}",
        list_or_none(masked.exclusions.excluded_people())
    );
    println!(
        "  Excluded tags:   {}",
        list_or_none(masked.exclusions.excluded_tags())
    );
    println!(
        "  Earliest year:   {}",
        masked.exclusions.earliest_year().to_string().green()
    );
    println!(
        "  Cleanup daily:   {}",
        if masked.cleanup_daily {
            "yes".green()
        } else {
            "no".dimmed()
        }
    );

    if let Err(e) = config.validate() {
        println!();
        println!("{} {}", "Warning:".yellow().bold(), e);
    }

    Ok(())
}

fn or_unset(value: &str) -> colored::ColoredString {
    if value.is_empty() {
        "(not set)".dimmed()
    } else {
        value.green()
    }
}

fn list_or_none(values: &[String]) -> colored::ColoredString {
    if values.is_empty() {
        "(none)".dimmed()
    } else {
        values.join(", ").green()
    }
}
