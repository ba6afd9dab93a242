use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use es_cli::commands::{equipment, import, intervals, record, status, summary};
use es_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(es_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = es_db::Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Record(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            let now = Local::now().naive_local();
            record::run(&mut out, &mut db, &config, args, now, Utc::now())?;
        }
        Some(Commands::Import(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            let stdin = io::stdin();
            let inserted = import::run(stdin.lock(), &mut out, &mut db, &config, args, Utc::now())?;
            tracing::debug!(inserted, "import finished");
        }
        Some(Commands::Intervals(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            intervals::run(&mut out, &db, &config, args)?;
        }
        Some(Commands::Summary(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            summary::run(&mut out, &db, &config, args)?;
        }
        Some(Commands::Status { equipment, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let now = Local::now().naive_local();
            status::run(&mut out, &db, &config, equipment.as_deref(), *json, now)?;
        }
        Some(Commands::Equipment) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            equipment::run(&mut out, &db)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    out.flush()?;
    Ok(())
}
