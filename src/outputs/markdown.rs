//! Markdown news cards for a rendered edition.
//!
//! Articles are grouped under one heading per topic, topics in ascending
//! label order and articles in their original order. Each card carries the
//! title, source, language, keywords and summary.

use crate::models::{AnalyzedArticle, FrontPage};
use crate::utils::upcase;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Path of the Markdown file: `{markdown_output_dir}/{date}_{time_of_day}.md`.
pub fn edition_path(front_page: &FrontPage, markdown_output_dir: &str) -> PathBuf {
    Path::new(markdown_output_dir).join(format!(
        "{}_{}.md",
        front_page.local_date, front_page.time_of_day
    ))
}

/// Render the whole edition.
pub fn front_page_to_markdown(front_page: &FrontPage) -> Result<String, std::fmt::Error> {
    let mut md = String::new();
    writeln!(
        md,
        "# {} edition, {}\n",
        upcase(&front_page.time_of_day),
        front_page.local_date
    )?;
    writeln!(
        md,
        "_Updated {} · {} articles · {} topics · keywords by {}_\n",
        front_page.local_time,
        front_page.articles.len(),
        front_page.topic_count(),
        front_page.keyword_strategy
    )?;

    if front_page.articles.is_empty() {
        writeln!(md, "No news right now.")?;
        return Ok(md);
    }

    let mut by_topic: BTreeMap<usize, Vec<&AnalyzedArticle>> = BTreeMap::new();
    for article in &front_page.articles {
        by_topic.entry(article.topic).or_default().push(article);
    }

    for (topic, articles) in by_topic {
        writeln!(md, "## Topic {}\n", topic + 1)?;
        for article in articles {
            write_card(&mut md, article)?;
        }
    }
    Ok(md)
}

fn write_card(md: &mut String, article: &AnalyzedArticle) -> std::fmt::Result {
    let doc = &article.document;
    match &doc.origin_url {
        Some(url) => writeln!(md, "### [{}]({})\n", doc.title, url)?,
        None => writeln!(md, "### {}\n", doc.title)?,
    }
    writeln!(md, "**Source:** {} · **Language:** {}\n", doc.source, doc.language)?;
    if !article.keywords.is_empty() {
        writeln!(md, "**Keywords:** {}\n", article.keywords.join(", "))?;
    }
    writeln!(md, "{}\n", article.summary)?;
    writeln!(md, "---\n")
}

/// Render and write the edition, replacing any earlier file for it.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_markdown(
    front_page: &FrontPage,
    markdown_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let md = front_page_to_markdown(front_page)?;
    fs::create_dir_all(markdown_output_dir).await?;
    let path = edition_path(front_page, markdown_output_dir);
    fs::write(&path, md).await?;
    info!(path = %path.display(), "Wrote FrontPage Markdown");
    Ok(path)
}
