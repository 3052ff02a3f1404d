use std::path::PathBuf;

use clap::Parser;
use nf_core::Result;
use nf_ingest::sources::countries::country_name;
use nf_ingest::sources::newsapi::{API_CATEGORIES, API_COUNTRIES};
use nf_ingest::sources::default_feeds;
use nf_ingest::FetchOptions;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "News ingestion pipeline", long_about = None)]
struct Cli {
    /// Storage backend: sqlite or memory
    #[arg(long, default_value = "sqlite")]
    storage: String,

    /// Database file for the sqlite backend
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// NewsData.io API key; NEWSDATA_API_KEY is used when omitted
    #[arg(long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch news articles from the configured sources
    Fetch {
        /// Fetch only from syndication feeds
        #[arg(long)]
        feeds_only: bool,
        /// Fetch only from the news API
        #[arg(long)]
        api_only: bool,
    },
    /// List the configured feeds and the API request matrix
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            feeds_only,
            api_only,
        } => {
            let storage = nf_storage::create_storage(&cli.storage, cli.db_path.as_deref()).await?;
            info!("💾 Storage initialized (using {})", cli.storage);

            let api_key = cli
                .api_key
                .or_else(|| std::env::var("NEWSDATA_API_KEY").ok());

            let options = FetchOptions {
                feeds: !api_only,
                api: !feeds_only,
            };

            println!("Starting news fetch...");
            let summary = nf_ingest::run(storage, api_key, options).await?;
            if options.feeds {
                println!("Added {} articles from feeds", summary.feed_added);
            }
            if options.api {
                println!("Added {} articles from the news API", summary.api_added);
            }
            println!("\nTotal articles added: {}", summary.total());
        }
        Commands::Sources => {
            println!("Feeds:");
            for feed in default_feeds() {
                println!("  {:12} {:12} {}", feed.source, feed.category, feed.url);
            }
            println!("\nAPI categories: {}", API_CATEGORIES.join(", "));
            println!("API countries:");
            for code in API_COUNTRIES {
                println!("  {:3} {}", code, country_name(code).unwrap_or("?"));
            }
        }
    }

    Ok(())
}
