//! Storyline Server - serves interactive fiction books over HTTP.
//!
//! Loads the book dataset once at startup, then answers page queries until
//! interrupted. Startup fails without serving if the content cannot be loaded.

use clap::Parser;
use std::path::PathBuf;
use storyline_server::{StorylineConfig, init_tracing, load_state, serve};
use tracing::{debug, info};

/// Command-line arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "storyline-server")]
#[command(about = "Storyline Server - Branching interactive fiction over HTTP")]
#[command(version)]
struct Args {
    /// Path to server configuration file
    #[arg(short, long, env = "STORYLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the books JSON file
    #[arg(long)]
    books: Option<PathBuf>,

    /// Path to the dictionary JSON file
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Index of the introduction book
    #[arg(long)]
    introduction: Option<usize>,

    /// Load and validate content, then exit without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StorylineConfig::from_file(path)?,
        None => StorylineConfig::default(),
    };
    let mut config = config.with_env()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(books) = args.books {
        config.content.books_path = books;
    }
    if let Some(dictionary) = args.dictionary {
        config.content.dictionary_path = Some(dictionary);
    }
    if let Some(introduction) = args.introduction {
        config.content.introduction_book = Some(introduction);
    }

    init_tracing(config.logging.format)?;
    info!("Starting Storyline Server");
    if let Err(e) = dotenv {
        debug!(error = %e, "No .env file loaded");
    }
    info!(config_file = ?args.config, "Configuration loaded");

    if args.check {
        let state = load_state(&config)?;
        info!(
            books = state.catalog.book_count(),
            listed = state.catalog.list_books().len(),
            introduction = ?state.catalog.introduction_route(),
            words = state.dictionary.len(),
            "Content validation complete"
        );
        return Ok(());
    }

    serve(config).await?;
    Ok(())
}
