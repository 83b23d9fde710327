//! blockstats CLI
//!
//! Command-line interface for the blockstats service.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blockstats_api::{ApiConfig, ApiServer};
use blockstats_core::traits::StatRepository;
use blockstats_core::types::Stat;
use blockstats_store::FileStatRepository;

/// blockstats - cached aggregate block statistics
#[derive(Parser)]
#[command(name = "blockstats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4102")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// JSON stats snapshot to serve
        #[arg(long, env = "STATS_FILE")]
        stats_file: Option<PathBuf>,
    },

    /// Query the stats source once and print the result
    Stats {
        /// JSON stats snapshot to read
        #[arg(long, env = "STATS_FILE")]
        stats_file: PathBuf,
    },

    /// Write a stats snapshot
    Snapshot {
        /// Destination file
        #[arg(long, env = "STATS_FILE")]
        stats_file: PathBuf,
        /// Total number of blocks indexed
        #[arg(long)]
        total_blocks: u64,
        /// Number of proofs submitted
        #[arg(long)]
        num_proofs: Option<u64>,
        /// Number of verified blocks
        #[arg(long)]
        num_verified_blocks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "blockstats=debug,info"
    } else {
        "blockstats=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    match cli.command {
        Commands::Serve { port, bind, stats_file } => cmd_serve(port, &bind, stats_file).await,
        Commands::Stats { stats_file } => cmd_stats(stats_file).await,
        Commands::Snapshot {
            stats_file,
            total_blocks,
            num_proofs,
            num_verified_blocks,
        } => {
            let mut stat = Stat::new(total_blocks);
            stat.num_proofs = num_proofs;
            stat.num_verified_blocks = num_verified_blocks;
            cmd_snapshot(stats_file, stat).await
        }
    }
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str, stats_file: Option<PathBuf>) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if stats_file.is_some() {
        config.stats_file = stats_file;
    }

    info!(stats_file = ?config.stats_file, "Configuring stats source");
    let server = ApiServer::from_config(config).context("Failed to configure stats source")?;
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    println!("{}", "Starting blockstats API server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/stats", "Stats:".dimmed(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    server.run(addr).await.context("Server terminated")?;

    Ok(())
}

/// Read the stats source once
async fn cmd_stats(stats_file: PathBuf) -> Result<()> {
    let repo = FileStatRepository::new(&stats_file);
    let stat = repo
        .find_current_stats()
        .await
        .with_context(|| format!("Failed to read stats from {}", stats_file.display()))?;
    info!(total_blocks = stat.total_blocks, path = %stats_file.display(), "Read stats snapshot");

    println!("{}", serde_json::to_string_pretty(&stat)?);
    Ok(())
}

/// Write a stats snapshot
async fn cmd_snapshot(stats_file: PathBuf, stat: Stat) -> Result<()> {
    let repo = FileStatRepository::new(&stats_file);
    repo.save(&stat)
        .await
        .with_context(|| format!("Failed to write {}", stats_file.display()))?;
    info!(total_blocks = stat.total_blocks, path = %stats_file.display(), "Wrote stats snapshot");

    println!(
        "{} {} ({} blocks)",
        "Wrote snapshot".green().bold(),
        stats_file.display(),
        stat.total_blocks
    );
    Ok(())
}
