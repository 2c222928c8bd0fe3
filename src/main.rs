//! Data-Grab main entry point
//!
//! This is the command-line interface that starts the scraping and conversion server.

use anyhow::Context;
use clap::Parser;
use data_grab::config::{load_or_default, validate, Config};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Data-Grab: scrape websites into tables and convert CSV files
///
/// Serves a small web UI and JSON API for bounded-depth crawls and for
/// converting uploaded CSV files to xlsx, pdf, json or html.
#[derive(Parser, Debug)]
#[command(name = "data-grab")]
#[command(version)]
#[command(about = "Web scraper and table converter server", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `server.bind-address`
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration, print the effective settings and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Default configuration is invalid".to_string(),
    })?;

    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
        validate(&config).context("Invalid --bind address")?;
    }

    if cli.check_config {
        print_config(&config);
        return Ok(());
    }

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;

    data_grab::server::serve(&config, listener)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("data_grab=info,tower_http=info,warn"),
                1 => EnvFilter::new("data_grab=debug,tower_http=debug,info"),
                2 => EnvFilter::new("data_grab=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_config(config: &Config) {
    println!("=== Data-Grab Configuration ===\n");

    println!("Server:");
    println!("  Bind address: {}", config.server.bind_address);
    println!("  Max upload size: {} bytes", config.server.max_upload_bytes);

    println!("\nCrawler:");
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);
    println!("  Default tags: {}", config.crawler.default_tags.join(", "));

    println!("\nOutput:");
    println!("  Filename prefix: {}", config.output.filename_prefix);
}
