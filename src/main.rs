//! # chainradar
//!
//! A crypto news digest: collects English and Korean news, summarizes each
//! item by ranking its sentences, tags it with keywords, groups the batch
//! into topics, and writes the edition as JSON and Markdown.
//!
//! ## Usage
//!
//! ```sh
//! chainradar -j ./json -m ./markdown
//! ```
//!
//! ## Architecture
//!
//! Each render runs the same steps:
//! 1. **Ingestion**: documents from every enabled source, or from `--documents`
//! 2. **Analysis**: summary and keywords per document, topics across the batch
//! 3. **Output**: JSON edition file and Markdown news cards
//!
//! With `--watch`, renders repeat on an interval and share the feed and
//! article-body caches.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod cli;
mod config;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod text;
mod utils;

use cli::Cli;
use config::Config;
use models::{Document, FrontPage};
use outputs::{json, markdown};
use scrapers::NewsDesk;
use text::keywords::Keywords;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("chainradar starting up");

    let args = Cli::parse();
    debug!(?args.json_output_dir, ?args.markdown_output_dir, ?args.watch, "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(token) = &args.cryptopanic_token {
        config.sources.cryptopanic_token = token.clone();
    }

    for dir in [&args.json_output_dir, &args.markdown_output_dir] {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable (fix perms or choose a different path)");
            return Err(e);
        }
    }

    let keywords = Keywords::select(
        config.keywords.embeddings,
        config.keywords.max_features,
        config.keywords.min_text_chars,
    );
    let desk = NewsDesk::new(&config)?;

    loop {
        let start_time = std::time::Instant::now();
        render(&args, &config, &keywords, &desk).await?;
        let elapsed = start_time.elapsed();
        info!(?elapsed, millis = elapsed.as_millis() as u64, "Render complete");

        let Some(secs) = args.watch else {
            break;
        };
        info!(secs, "Waiting for next render");
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }

    Ok(())
}

/// One edition: ingest, analyse, write.
#[instrument(level = "info", skip_all)]
async fn render(
    args: &Cli,
    config: &Config,
    keywords: &Keywords,
    desk: &NewsDesk,
) -> Result<(), Box<dyn Error>> {
    let documents = match &args.documents {
        Some(path) => load_documents(path).await?,
        None => desk.load_news_all().await,
    };
    if documents.is_empty() {
        warn!("No documents to analyse; writing an empty edition");
    }

    let articles = pipeline::analyze(documents, config, keywords);
    let front_page = FrontPage::stamped(Local::now().naive_local(), keywords.strategy(), articles);
    info!(
        time_of_day = %front_page.time_of_day,
        local_date = %front_page.local_date,
        articles = front_page.articles.len(),
        topics = front_page.topic_count(),
        "FrontPage built"
    );

    if let Err(e) = json::write_frontpage(&front_page, &args.json_output_dir).await {
        error!(error = %e, "Failed to write JSON");
    }
    if let Err(e) = markdown::write_markdown(&front_page, &args.markdown_output_dir).await {
        error!(error = %e, "Failed to write Markdown");
    }
    Ok(())
}

/// Read a JSON array of documents from `path`.
#[instrument(level = "info")]
async fn load_documents(path: &str) -> Result<Vec<Document>, Box<dyn Error>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let documents: Vec<Document> = serde_json::from_str(&raw)?;
    info!(count = documents.len(), "Loaded documents from file");
    Ok(documents)
}
