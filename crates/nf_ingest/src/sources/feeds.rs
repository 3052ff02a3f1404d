//! Syndication feed adapter: fetches each configured feed, parses it
//! permissively, and yields the most recent entries as raw candidates.

use std::time::Duration;

use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use nf_core::sanitize::slugify;
use nf_core::{ArticleStore, Error, Result};
use reqwest::Client;
use tracing::{debug, warn};

use super::{Candidate, FeedCandidate, FeedSpec};

/// Cap on entries taken per feed.
pub const PER_FEED_LIMIT: usize = 20;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "newsflow/0.1";

pub struct FeedSource {
    client: Client,
    specs: Vec<FeedSpec>,
}

impl FeedSource {
    pub fn new(specs: Vec<FeedSpec>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, specs })
    }

    /// Collect candidates from every configured feed. A feed that cannot be
    /// fetched or parsed is skipped whole; it never aborts the run.
    pub async fn collect(&self, store: &dyn ArticleStore) -> Vec<Candidate> {
        let mut out = Vec::new();
        for spec in &self.specs {
            let bytes = match self.fetch(&spec.url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Error fetching feed {}: {}", spec.url, e);
                    continue;
                }
            };
            let candidates = ingest_document(&bytes, spec, store).await;
            debug!("{}: {} candidates", spec.source, candidates.len());
            out.extend(candidates);
        }
        out
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Feed(format!(
                "feed fetch failed with status {}",
                status
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Parse one fetched feed document and yield its candidates. Malformed
/// documents and category failures skip this feed only.
pub async fn ingest_document(
    bytes: &[u8],
    spec: &FeedSpec,
    store: &dyn ArticleStore,
) -> Vec<Candidate> {
    let feed = match parser::parse(bytes) {
        Ok(feed) => feed,
        Err(e) => {
            warn!("Error parsing feed {}: {}", spec.url, e);
            return Vec::new();
        }
    };

    let category_id = match store
        .get_or_create_category(&spec.category, &slugify(&spec.category))
        .await
    {
        Ok(category) => Some(category.id),
        Err(e) => {
            warn!("Error resolving category {}: {}", spec.category, e);
            return Vec::new();
        }
    };

    feed_candidates(&feed, spec, category_id)
}

/// Map up to [`PER_FEED_LIMIT`] entries onto candidates. Entries missing a
/// non-empty title or link are silently skipped.
pub fn feed_candidates(feed: &Feed, spec: &FeedSpec, category_id: Option<i64>) -> Vec<Candidate> {
    feed.entries
        .iter()
        .take(PER_FEED_LIMIT)
        .filter_map(|entry| {
            let title = entry
                .title
                .as_ref()
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty())?;
            let link = entry
                .links
                .first()
                .map(|l| l.href.trim().to_string())
                .filter(|l| !l.is_empty())?;
            Some(Candidate::Feed(FeedCandidate {
                title,
                link,
                summary: entry.summary.as_ref().map(|t| t.content.clone()),
                content: entry.content.as_ref().and_then(|c| c.body.clone()),
                image_url: entry_image(entry),
                published: entry.published,
                source: spec.source.clone(),
                category_id,
            }))
        })
        .collect()
}

/// Image extraction tries, in order: embedded media attachment, media
/// thumbnail, then an image-typed link relation.
fn entry_image(entry: &Entry) -> Option<String> {
    if let Some(url) = entry
        .media
        .iter()
        .flat_map(|m| m.content.iter())
        .find_map(|c| c.url.as_ref().map(|u| u.to_string()))
    {
        return Some(url);
    }
    if let Some(thumbnail) = entry.media.iter().flat_map(|m| m.thumbnails.iter()).next() {
        return Some(thumbnail.image.uri.clone());
    }
    entry
        .links
        .iter()
        .find(|l| {
            l.media_type
                .as_deref()
                .map_or(false, |t| t.starts_with("image"))
        })
        .map(|l| l.href.clone())
}
