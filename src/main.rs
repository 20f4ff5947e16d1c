//! Docscout main entry point
//!
//! Command-line interface for crawling API documentation sites and querying
//! the stored results.

use clap::{Parser, Subcommand};
use docscout::config::{load_config, Config};
use docscout::query;
use docscout::storage::Storage;
use docscout::{Crawler, JsonStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Docscout: a polite crawler for API documentation sites
#[derive(Parser, Debug)]
#[command(name = "docscout")]
#[command(version)]
#[command(about = "Crawl API documentation sites and extract endpoints and schemas", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when absent)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory for stored page documents (overrides config)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a documentation site and store extracted records
    Crawl {
        /// Base URL to start crawling from
        url: String,

        /// Maximum number of pages to visit (overrides config)
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Search stored endpoints by path or description substring
    Search {
        /// Case-insensitive query string
        query: String,
    },

    /// List endpoints extracted from one stored page
    Endpoints {
        /// URL of the stored page
        url: String,
    },

    /// List schemas extracted from one stored page
    Schemas {
        /// URL of the stored page
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.data_dir));
    let store = JsonStore::new(&data_dir)?;

    match cli.command {
        Command::Crawl { url, max_pages } => handle_crawl(store, &config, &url, max_pages).await,
        Command::Search { query } => handle_search(&store, &query),
        Command::Endpoints { url } => handle_endpoints(&store, &url),
        Command::Schemas { url } => handle_schemas(&store, &url),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docscout=info,warn"),
            1 => EnvFilter::new("docscout=debug,info"),
            2 => EnvFilter::new("docscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn handle_crawl(
    store: JsonStore,
    config: &Config,
    url: &str,
    max_pages: Option<usize>,
) -> anyhow::Result<()> {
    let crawler = Crawler::new(Arc::new(store), config)?;

    match crawler.crawl(url, max_pages).await {
        Ok(summary) => {
            println!("Crawl complete: {} pages visited", summary.pages_visited);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

fn handle_search(store: &dyn Storage, query_str: &str) -> anyhow::Result<()> {
    let matches = query::search_endpoints(store, query_str)?;

    if matches.is_empty() {
        println!("No endpoints matching '{}'", query_str);
        return Ok(());
    }

    println!("{} endpoints matching '{}':\n", matches.len(), query_str);
    for m in matches {
        println!("  {} {}", m.endpoint.method, m.endpoint.path);
        if !m.endpoint.description.is_empty() {
            println!("    {}", m.endpoint.description);
        }
        println!("    from {}", m.page_url);
    }

    Ok(())
}

fn handle_endpoints(store: &dyn Storage, url: &str) -> anyhow::Result<()> {
    match query::endpoints_for_url(store, url)? {
        None => println!("No stored page for {}", url),
        Some(endpoints) if endpoints.is_empty() => {
            println!("No endpoints extracted from {}", url)
        }
        Some(endpoints) => {
            println!("{} endpoints from {}:\n", endpoints.len(), url);
            for endpoint in endpoints {
                println!("  {} {}", endpoint.method, endpoint.path);
                for param in &endpoint.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    println!("    param {} {}{}", param.name, param.type_name, required);
                }
                for response in &endpoint.responses {
                    println!("    response {} {}", response.code, response.description);
                }
            }
        }
    }

    Ok(())
}

fn handle_schemas(store: &dyn Storage, url: &str) -> anyhow::Result<()> {
    match query::schemas_for_url(store, url)? {
        None => println!("No stored page for {}", url),
        Some(schemas) if schemas.is_empty() => {
            println!("No schemas extracted from {}", url)
        }
        Some(schemas) => {
            println!("{} schemas from {}:\n", schemas.len(), url);
            for schema in schemas {
                println!("  {}", schema.name);
                for property in &schema.properties {
                    let required = if property.required { " (required)" } else { "" };
                    println!(
                        "    {} {}{}",
                        property.name, property.type_name, required
                    );
                }
            }
        }
    }

    Ok(())
}
