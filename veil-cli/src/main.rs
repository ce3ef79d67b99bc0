//! VEIL CLI
//!
//! Command-line interface for the VEIL stealth payment protocol.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use veil_api::{ApiConfig, ApiServer};
use veil_core::traits::AnnouncementLedger;
use veil_ens::DirectoryResolver;
use veil_registry::MemoryLedger;
use veil_stealth::{scan_announcement, ScanStats, StealthService};

/// VEIL - Stealth payments with a shielded note pool
#[derive(Parser)]
#[command(name = "veil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Digest backend (sha256 or keccak256)
    #[arg(long, global = true, env = "VEIL_DIGEST", default_value = "sha256")]
    digest: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, env = "BIND_ADDR", default_value = "0.0.0.0")]
        bind: IpAddr,
        /// JSON directory of published meta-addresses
        #[arg(long, env = "VEIL_DIRECTORY")]
        directory: Option<PathBuf>,
    },

    /// Resolve a name to a meta-address
    Resolve {
        /// Name to resolve
        name: String,
        /// JSON directory of published meta-addresses (random keys if absent)
        #[arg(long, env = "VEIL_DIRECTORY")]
        directory: Option<PathBuf>,
    },

    /// Run resolve → derive → scan → deposit → sweep in-process
    Demo {
        /// Recipient name
        #[arg(short, long, default_value = "alice.eth")]
        name: String,
        /// Amount to deposit
        #[arg(short, long, default_value = "5")]
        amount: u64,
        /// Sweep destination
        #[arg(short, long, default_value = "0xabc0000000000000000000000000000000000000")]
        to: String,
    },

    /// Run benchmarks
    Bench {
        /// Number of announcements to generate
        #[arg(short, long, default_value = "10000")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "veil=debug,info"
    } else {
        "veil=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind, directory } => {
            cmd_serve(&cli.digest, port, bind, directory).await
        }
        Commands::Resolve { name, directory } => cmd_resolve(&cli.digest, &name, directory).await,
        Commands::Demo { name, amount, to } => cmd_demo(&cli.digest, &name, amount, &to).await,
        Commands::Bench { count } => cmd_bench(&cli.digest, count).await,
    }
}

fn build_service(digest: &str, directory: Option<&PathBuf>) -> Result<StealthService> {
    let mut builder = StealthService::builder()
        .digest_name(digest)
        .context("Invalid digest backend")?;

    if let Some(path) = directory {
        let resolver = DirectoryResolver::load(path)
            .with_context(|| format!("Failed to load directory {}", path.display()))?;
        builder = builder.resolver(Arc::new(resolver));
    }

    Ok(builder.build())
}

/// Run API server
async fn cmd_serve(digest: &str, port: u16, bind: IpAddr, directory: Option<PathBuf>) -> Result<()> {
    println!("{}", "🚀 Starting VEIL API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("   {} {}", "Digest:".dimmed(), digest);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig {
        port,
        bind_addr: bind,
        digest: digest.to_string(),
        directory,
    };
    let addr = config.socket_addr();
    let server = ApiServer::new(config).context("Failed to configure server")?;

    server.run(addr).await?;

    Ok(())
}

/// Resolve name to meta-address
async fn cmd_resolve(digest: &str, name: &str, directory: Option<PathBuf>) -> Result<()> {
    println!("{} {}", "🔍 Resolving:".cyan().bold(), name);

    let service = build_service(digest, directory.as_ref())?;
    let meta = service
        .resolve(name)
        .await
        .context("Failed to resolve name")?;

    println!("\n{}", "✅ Resolved meta-address:".green().bold());
    println!("   {} {}", "Spend key:".dimmed(), meta.spend_key);
    println!("   {} {}", "View key:".dimmed(), meta.view_key);

    Ok(())
}

/// Walk one payment through the whole protocol
async fn cmd_demo(digest: &str, name: &str, amount: u64, to: &str) -> Result<()> {
    println!("{} {}", "🎬 VEIL demo for".cyan().bold(), name);
    let service = build_service(digest, None)?;

    println!("\n{}", "1. Resolving meta-address...".dimmed());
    let meta = service.resolve(name).await.context("Failed to resolve name")?;
    println!("   {} {}", "Spend key:".dimmed(), meta.spend_key);
    println!("   {} {}", "View key:".dimmed(), meta.view_key);

    println!("\n{}", "2. Deriving stealth address...".dimmed());
    let ann = service.derive(name, &meta).await.context("Derivation failed")?;
    println!("   {} {}", "Announcement:".dimmed(), ann.id);
    println!("   {} {}", "Address:".yellow(), ann.address);
    println!("   {} {}", "R:".dimmed(), ann.ephemeral_public);
    println!("   {} {}", "View tag:".dimmed(), ann.view_tag);

    println!("\n{}", "3. Scanning by view tag...".dimmed());
    let found = service
        .scan_tag(ann.view_tag, meta.view_key.as_bytes())
        .await
        .context("Scan failed")?;
    println!("   ✓ {} matching announcement(s)", found.len());

    println!("\n{}", "4. Depositing...".dimmed());
    let note = service
        .deposit(ann.id, i128::from(amount))
        .await
        .context("Deposit failed")?;
    println!("   {} {}", "Note:".dimmed(), note.id);
    println!("   {} {}", "Commitment:".dimmed(), note.commitment);

    print_state(&service)?;

    println!("\n{}", "5. Sweeping...".dimmed());
    let outcome = service
        .sweep(&meta.view_key.to_hex(), to)
        .await
        .context("Sweep failed")?;
    if outcome.is_empty() {
        println!("   {}", veil_core::constants::EMPTY_SWEEP_MESSAGE.yellow());
    } else {
        println!(
            "   {} {} from note(s) {:?}",
            "✅ Swept".green(),
            outcome.swept_total,
            outcome.spent_note_ids
        );
        for transfer in &outcome.transfers {
            println!("   → {} {}", transfer.to, transfer.value);
        }
    }

    print_state(&service)?;
    Ok(())
}

fn print_state(service: &StealthService) -> Result<()> {
    let state = service.state();
    println!("\n{}", "📋 Pool state (JSON):".yellow().bold());
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Run benchmarks
async fn cmd_bench(digest: &str, count: usize) -> Result<()> {
    println!("{} {} announcements", "📊 Benchmarking with".cyan().bold(), count);
    let ledger = Arc::new(MemoryLedger::with_capacity(count));
    let service = StealthService::builder()
        .digest_name(digest)
        .context("Invalid digest backend")?
        .ledger(ledger.clone())
        .build();

    // Resolve keys
    println!("\n{}", "1. Resolving keys...".dimmed());
    let ours = service.resolve("bench.eth").await?;
    let stranger = service.resolve("stranger.eth").await?;

    // Create announcements
    println!("\n{}", "2. Deriving announcements...".dimmed());
    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("   [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut expected = 0usize;
    for i in 0..count {
        // Mix of our payments and random ones
        if i % 100 == 0 {
            service.derive("bench.eth", &ours).await?;
            expected += 1;
        } else {
            let other = service.resolve("other.eth").await?;
            service.derive("other.eth", &other).await?;
        }
        pb.inc(1);
    }
    pb.finish();
    println!("   ✓ Derived {} announcements: {:?}", count, start.elapsed());

    let announcements = ledger
        .snapshot()
        .await
        .context("Failed to snapshot ledger")?;

    // Scan
    println!("\n{}", "3. Scanning...".dimmed());
    let mut results = Vec::with_capacity(2);
    for (label, key) in [("owner", &ours.view_key), ("stranger", &stranger.view_key)] {
        let start = Instant::now();
        let mut stats = ScanStats::new();
        for ann in &announcements {
            stats.record(scan_announcement(service.digest(), ann, key.as_bytes()));
        }
        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(label, ?stats, "Scan finished");
        results.push((label, stats));
    }

    println!("\n{}", "📈 Results:".green().bold());
    for (label, stats) in &results {
        println!(
            "   {:<9} {} tag matches, {} discoveries, {:.1}% filtered, {:.0} announcements/sec",
            label,
            stats.view_tag_matches,
            stats.discoveries,
            stats.filter_efficiency(),
            stats.rate()
        );
    }

    let distribution = ledger.stats();
    if let Some((tag, hits)) = distribution.most_common() {
        println!("   Most common view tag: {} ({} announcements)", tag, hits);
    }
    println!(
        "   View tag chi-squared: {:.1} (255 degrees of freedom)",
        distribution.chi_squared()
    );

    let found = results[0].1.discoveries as usize;
    if found == expected {
        println!("   {} All expected payments found!", "✅".green());
    } else {
        println!("   {} Expected {}, found {}", "❌".red(), expected, found);
    }

    Ok(())
}
