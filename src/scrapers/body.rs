//! Article body extraction for arbitrary news pages.
//!
//! News sites have heterogeneous markup, so this is a best-effort
//! heuristic: try a fixed list of content containers in priority order and
//! take the first one with enough text; otherwise glue together every
//! `<p>` on the page, capped in length.

use super::get_text;
use crate::text::char_len;
use crate::utils::truncate_chars;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

/// Content containers, highest priority first.
const BODY_SELECTORS: &[&str] = &[
    "article",
    ".article-body",
    ".article-content",
    ".content",
    "#article",
    ".post-content",
];

static SELECTORS: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    BODY_SELECTORS
        .iter()
        .map(|s| (*s, Selector::parse(s).unwrap()))
        .collect()
});

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Length gates for [`BodyExtractor::extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyExtractor {
    /// A container must hold more than this many characters to be used.
    pub min_chars: usize,
    /// Cap on the paragraph fallback, in characters.
    pub fallback_max_chars: usize,
}

impl Default for BodyExtractor {
    fn default() -> Self {
        Self {
            min_chars: 150,
            fallback_max_chars: 2000,
        }
    }
}

impl BodyExtractor {
    /// Pull the article text out of an HTML document.
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        for (name, selector) in SELECTORS.iter() {
            // only the first match of each selector is considered
            let Some(element) = document.select(selector).next() else {
                continue;
            };
            let text = element_text(element, " ");
            if char_len(&text) > self.min_chars {
                debug!(selector = name, chars = char_len(&text), "Body matched selector");
                return text;
            }
        }

        // text nodes within a paragraph and the paragraphs themselves are both space-joined
        let paragraphs = document
            .select(&PARAGRAPH)
            .map(|p| element_text(p, " "))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(chars = char_len(&paragraphs), "No selector matched; using paragraph fallback");
        truncate_chars(&paragraphs, self.fallback_max_chars).to_string()
    }

    /// Fetch `url` and extract its body. Any failure yields `""`.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch(&self, client: &Client, url: &str) -> String {
        match get_text(client, url).await {
            Ok(html) => self.extract(&html),
            Err(e) => {
                warn!(error = %e, "Article body fetch failed");
                String::new()
            }
        }
    }
}

/// Text nodes of `element`, trimmed, empty ones dropped, joined by `sep`.
pub fn element_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::test_support::serve;
    use axum::{Router, http::StatusCode, routing::get};
    use std::time::Duration;

    fn client(timeout: Duration) -> Client {
        Client::builder().timeout(timeout).build().unwrap()
    }

    fn article_text() -> String {
        "Bitcoin miners expanded capacity again this quarter. ".repeat(4)[..200].to_string()
    }

    #[test]
    fn test_article_element_wins() {
        let body = article_text();
        let html = format!(
            "<html><body><nav>Home News</nav><article>{body}</article><p>footer</p></body></html>"
        );
        assert_eq!(BodyExtractor::default().extract(&html), body.trim());
    }

    #[test]
    fn test_short_article_falls_through_to_next_selector() {
        let long = "x".repeat(160);
        let html = format!(
            "<article>too short</article><div class=\"content\"><span>{long}</span></div>"
        );
        assert_eq!(BodyExtractor::default().extract(&html), long);
    }

    #[test]
    fn test_nested_text_joined_with_spaces() {
        let html = format!(
            "<div class=\"article-body\"><h2>Headline</h2><p>{}</p></div>",
            "word ".repeat(40)
        );
        let out = BodyExtractor::default().extract(&html);
        assert!(out.starts_with("Headline word word"));
    }

    #[test]
    fn test_paragraph_fallback() {
        let html = (1..=5)
            .map(|i| format!("<p>Paragraph number {i}.</p>"))
            .collect::<String>();
        let out = BodyExtractor::default().extract(&format!("<html><body>{html}</body></html>"));
        assert_eq!(
            out,
            "Paragraph number 1. Paragraph number 2. Paragraph number 3. Paragraph number 4. Paragraph number 5."
        );
    }

    #[test]
    fn test_paragraph_inline_markup_space_joined() {
        let html = "<html><body><p>Bitcoin <b>rallied</b> past <a href='#'>$100k</a>.</p><p>Ether <i>followed</i></p></body></html>";
        let out = BodyExtractor::default().extract(html);
        assert_eq!(out, "Bitcoin rallied past $100k . Ether followed");
    }

    #[test]
    fn test_paragraph_fallback_truncated() {
        let para = "가".repeat(900);
        let html = format!("<p>{para}</p><p>{para}</p><p>{para}</p>");
        let out = BodyExtractor::default().extract(&html);
        assert_eq!(char_len(&out), 2000);
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let out = BodyExtractor::default().extract("<div><p>unclosed <b>tags<article");
        assert!(out.len() < 100);
        assert_eq!(BodyExtractor::default().extract(""), "");
    }

    #[tokio::test]
    async fn test_fetch_extracts_article() {
        let body = article_text();
        let page = format!("<html><body><article>{body}</article></body></html>");
        let app = Router::new().route("/news", get(move || async move { axum::response::Html(page) }));
        let addr = serve(app).await;

        let out = BodyExtractor::default()
            .fetch(&client(Duration::from_secs(2)), &format!("http://{addr}/news"))
            .await;
        assert_eq!(out, body.trim());
    }

    #[tokio::test]
    async fn test_fetch_timeout_gives_empty() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "<article>late</article>"
            }),
        );
        let addr = serve(app).await;

        let out = BodyExtractor::default()
            .fetch(&client(Duration::from_millis(200)), &format!("http://{addr}/slow"))
            .await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_fetch_error_status_gives_empty() {
        let app = Router::new().route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, "<article>not here</article>") }),
        );
        let addr = serve(app).await;

        let out = BodyExtractor::default()
            .fetch(&client(Duration::from_secs(2)), &format!("http://{addr}/gone"))
            .await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_gives_empty() {
        let out = BodyExtractor::default()
            .fetch(&client(Duration::from_secs(1)), "http://127.0.0.1:9/nothing")
            .await;
        assert_eq!(out, "");
    }
}
