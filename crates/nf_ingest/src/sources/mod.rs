//! Source adapters and their candidate record shapes.
//!
//! Each adapter yields raw candidates as an explicit tagged variant with
//! optional fields, consumed by the adapter-specific normalization
//! functions in [`crate::normalize`].

use chrono::{DateTime, Utc};

pub mod countries;
pub mod feeds;
pub mod newsapi;

/// One configured syndication feed.
#[derive(Debug, Clone)]
pub struct FeedSpec {
    pub url: String,
    pub source: String,
    pub category: String,
}

impl FeedSpec {
    pub fn new(url: &str, source: &str, category: &str) -> Self {
        Self {
            url: url.to_string(),
            source: source.to_string(),
            category: category.to_string(),
        }
    }
}

/// The default feed table. Immutable configuration data, injected into the
/// feed adapter at construction.
pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec::new("http://feeds.bbci.co.uk/news/rss.xml", "BBC", "World"),
        FeedSpec::new("https://techcrunch.com/feed/", "TechCrunch", "Technology"),
        FeedSpec::new("http://rss.cnn.com/rss/edition.rss", "CNN", "World"),
        FeedSpec::new("https://www.espn.com/espn/rss/news", "ESPN", "Sports"),
        FeedSpec::new("https://www.theguardian.com/world/rss", "Guardian", "World"),
    ]
}

/// Raw candidate from a syndication feed. Title and link are validated
/// non-empty at the adapter; entries missing either never become
/// candidates.
#[derive(Debug, Clone)]
pub struct FeedCandidate {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    pub category_id: Option<i64>,
}

/// Raw candidate from the news API. Link is validated non-empty at the
/// adapter; a missing title is resolved to "Untitled" by the normalizer.
#[derive(Debug, Clone)]
pub struct ApiCandidate {
    pub title: Option<String>,
    pub link: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub pub_date: Option<String>,
    pub source: String,
    pub category_id: Option<i64>,
    pub country: String,
}

/// A raw, un-normalized record, tagged by its originating adapter.
#[derive(Debug, Clone)]
pub enum Candidate {
    Feed(FeedCandidate),
    Api(ApiCandidate),
}

impl Candidate {
    /// The canonical dedup identity of this candidate.
    pub fn link(&self) -> &str {
        match self {
            Candidate::Feed(c) => &c.link,
            Candidate::Api(c) => &c.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feeds_table() {
        let feeds = default_feeds();
        assert_eq!(feeds.len(), 5);
        assert!(feeds.iter().any(|f| f.source == "BBC"));
        assert!(feeds.iter().all(|f| f.url.starts_with("http")));
    }
}
