//! RSS 2.0 items: title, link, and description, via the `rss` crate.

use ::rss::{Channel, Item};
use std::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    /// Raw description; often contains HTML.
    pub description: String,
}

impl From<&Item> for RssItem {
    fn from(item: &Item) -> Self {
        let field = |value: Option<&str>| value.unwrap_or_default().trim().to_string();
        Self {
            title: field(item.title()),
            link: field(item.link()),
            description: field(item.description()),
        }
    }
}

/// Parse every `<item>` in `xml`, in document order.
pub fn parse_items(xml: &str) -> Result<Vec<RssItem>, Box<dyn Error>> {
    let channel = Channel::read_from(xml.as_bytes())?;
    Ok(channel.items().iter().map(RssItem::from).collect())
}
