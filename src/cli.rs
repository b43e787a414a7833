//! Command-line interface definitions for chainradar.
//!
//! All arguments can be provided via command-line flags; the CryptoPanic
//! token can also come from the environment.

use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # One render from live sources
/// chainradar -j ./json -m ./markdown
///
/// # Analyse a saved batch of documents instead of fetching
/// chainradar -j ./json -m ./markdown -d ./documents.json
///
/// # Re-render every ten minutes, reusing cached feeds and bodies
/// chainradar -j ./json -m ./markdown -c ./config.yaml --watch 600
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the JSON edition files
    #[arg(short, long)]
    pub json_output_dir: String,

    /// Output directory for the Markdown edition files
    #[arg(short, long)]
    pub markdown_output_dir: String,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON array of documents to analyse instead of fetching news
    #[arg(short, long)]
    pub documents: Option<String>,

    /// CryptoPanic API token (overrides the config file)
    #[arg(long, env = "CRYPTOPANIC_TOKEN")]
    pub cryptopanic_token: Option<String>,

    /// Re-render every SECS seconds instead of exiting after one render
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,
}
