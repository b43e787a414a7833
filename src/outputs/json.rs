//! JSON output for a rendered edition.
//!
//! Files are organized by date with edition names:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```
//!
//! A later render of the same edition overwrites the earlier file.

use crate::models::FrontPage;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `front_page` under `json_output_dir`.
pub fn frontpage_path(front_page: &FrontPage, json_output_dir: &str) -> PathBuf {
    Path::new(json_output_dir)
        .join(&front_page.local_date)
        .join(format!("{}.json", front_page.time_of_day))
}

/// Write a [`FrontPage`] to `{json_output_dir}/{date}/{time_of_day}.json`,
/// creating the date directory when needed.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_frontpage(
    front_page: &FrontPage,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string(front_page)?;
    let path = frontpage_path(front_page, json_output_dir);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = front_page.articles.len(), "Wrote JSON file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyzedArticle, Document, Language};

    fn front_page() -> FrontPage {
        FrontPage {
            local_date: "2025-05-06".to_string(),
            time_of_day: "morning".to_string(),
            local_time: "07:15:00".to_string(),
            keyword_strategy: "tfidf".to_string(),
            articles: vec![AnalyzedArticle {
                document: Document::new("BTC up", "Cointelegraph", "BTC up today", Language::En),
                summary: "BTC up today".to_string(),
                keywords: vec!["btc".to_string()],
                topic: 0,
            }],
        }
    }

    #[test]
    fn test_frontpage_path() {
        let path = frontpage_path(&front_page(), "/srv/json");
        assert_eq!(path, PathBuf::from("/srv/json/2025-05-06/morning.json"));
    }

    #[tokio::test]
    async fn test_write_frontpage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();

        let path = write_frontpage(&front_page(), out).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let read: FrontPage = serde_json::from_str(&raw).unwrap();

        assert_eq!(read.local_date, "2025-05-06");
        assert_eq!(read.articles.len(), 1);
        assert_eq!(read.articles[0].document.language, Language::En);
    }

    #[tokio::test]
    async fn test_write_frontpage_overwrites_same_edition() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();

        let mut page = front_page();
        write_frontpage(&page, out).await.unwrap();
        page.articles.clear();
        let path = write_frontpage(&page, out).await.unwrap();

        let read: FrontPage = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(read.articles.is_empty());
    }
}
