//! bgcrawl CLI
//!
//! Local execution entry point for the board game catalog crawler.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bgcrawl::{
    error::Result,
    models::Config,
    pipeline,
    services::weight,
    utils::http,
};

/// bgcrawl - ranked board game catalog crawler
#[derive(Parser, Debug)]
#[command(name = "bgcrawl", version, about = "Ranked board game catalog crawler")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl N listing pages and merge detail metadata
    Crawl {
        /// Number of listing pages to fetch (100 games per page)
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Write records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a single game by identifier
    Game {
        /// Numeric game identifier
        id: u32,
    },

    /// Scrape the weight stats object from a game page
    Weight {
        /// Numeric game identifier
        id: u32,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl { pages, output } => {
            log::info!("Crawling {pages} listing page(s)...");
            let records = pipeline::run_crawl(&config, pages).await?;
            log::info!("Collected {} records", records.len());

            let json = serde_json::to_string_pretty(&records)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!("Records written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Command::Game { id } => {
            log::info!("Fetching game {id}...");
            let record = pipeline::run_single(&config, id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Weight { id } => {
            log::info!("Fetching weight stats for game {id}...");
            let client = http::create_client(&config.crawler)?;
            match weight::fetch_game_weight(&client, &config.game_page, id).await? {
                Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
                None => log::warn!("No embedded stats object found for game {id}"),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {e}");
                return Err(e);
            }
            log::info!("Config OK");
        }
    }

    Ok(())
}
