//! NewsData.io adapter: one paginated request per (category, country)
//! pair, rate-governed, with every pair isolated from the others.

use std::time::Duration;

use nf_core::{ArticleStore, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ApiCandidate, Candidate};
use crate::governor::RateGovernor;

/// Topical categories requested from the API.
pub const API_CATEGORIES: &[&str] = &[
    "technology",
    "sports",
    "business",
    "entertainment",
    "health",
    "science",
];

/// Countries requested for every category.
pub const API_COUNTRIES: &[&str] = &["us", "gb", "in", "ca", "au", "de", "fr", "jp", "cn", "br"];

const DEFAULT_ENDPOINT: &str = "https://newsdata.io/api/1/news";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "newsflow/0.1";

/// Source display name when the API names neither source_name nor
/// source_id.
const SOURCE_FALLBACK: &str = "NewsData.io";

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub results: Vec<ApiResult>,
}

/// One result entry as the API serves it; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

pub struct NewsApiSource {
    client: Client,
    api_key: String,
    endpoint: String,
    categories: Vec<String>,
    countries: Vec<String>,
    governor: RateGovernor,
}

impl NewsApiSource {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            categories: API_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            countries: API_COUNTRIES.iter().map(|s| s.to_string()).collect(),
            governor: RateGovernor::default(),
        })
    }

    /// Collect candidates over the whole category x country product. Every
    /// request is rate-governed and isolated: one failing pair never stops
    /// subsequent pairs.
    pub async fn collect(&mut self, store: &dyn ArticleStore) -> Vec<Candidate> {
        let mut out = Vec::new();
        let categories = self.categories.clone();
        let countries = self.countries.clone();
        for category in &categories {
            for country in &countries {
                self.governor.pause().await;
                let fetched = self.request(category, country).await;
                self.absorb(fetched, category, country, store, &mut out).await;
            }
        }
        out
    }

    async fn request(&self, category: &str, country: &str) -> Result<ApiEnvelope> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("category", category),
                ("country", country),
                ("language", "en"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            return Err(Error::Api(format!("request failed with status {}", status)));
        }
        Ok(response.json::<ApiEnvelope>().await?)
    }

    /// Fold one request's outcome into the batch. Rate-limit signals raise
    /// the governor's next pause; everything else that fails is logged and
    /// dropped for this pair only.
    pub(crate) async fn absorb(
        &mut self,
        fetched: Result<ApiEnvelope>,
        category: &str,
        country: &str,
        store: &dyn ArticleStore,
        out: &mut Vec<Candidate>,
    ) {
        match fetched {
            Ok(envelope) if envelope.status == "success" => {
                let name = capitalize(category);
                let category_id = match store.get_or_create_category(&name, category).await {
                    Ok(c) => Some(c.id),
                    Err(e) => {
                        warn!("Error resolving category {}: {}", name, e);
                        return;
                    }
                };
                let candidates = api_candidates(envelope.results, category_id, country);
                debug!("{}/{}: {} candidates", category, country, candidates.len());
                out.extend(candidates);
            }
            Ok(envelope) => warn!(
                "API returned status {:?} for {}/{}",
                envelope.status, category, country
            ),
            Err(Error::RateLimited) => {
                warn!("Rate limit hit for {}/{}; extending backoff", category, country);
                self.governor.throttle();
            }
            Err(e) => warn!("Error fetching {}/{}: {}", category, country, e),
        }
    }
}

/// Map result entries onto candidates, recording the request's country on
/// each. Entries without a link are dropped.
pub fn api_candidates(
    results: Vec<ApiResult>,
    category_id: Option<i64>,
    country: &str,
) -> Vec<Candidate> {
    results
        .into_iter()
        .filter_map(|result| {
            let link = result
                .link
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())?
                .to_string();
            let source = result
                .source_name
                .clone()
                .or_else(|| result.source_id.clone())
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| SOURCE_FALLBACK.to_string());
            Some(Candidate::Api(ApiCandidate {
                title: result.title,
                link,
                description: result.description,
                content: result.content,
                image_url: result
                    .image_url
                    .or(result.image)
                    .filter(|u| !u.trim().is_empty()),
                pub_date: result.pub_date,
                source,
                category_id,
                country: country.to_string(),
            }))
        })
        .collect()
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governor::BACKOFF_DELAY;
    use nf_storage::MemoryStorage;

    fn success_envelope() -> ApiEnvelope {
        serde_json::from_str(
            r#"{
                "status": "success",
                "results": [
                    {"link": "http://example.com/1", "title": "One",
                     "pubDate": "2024-01-15 10:30:00", "source_id": "example"},
                    {"title": "No link, dropped"},
                    {"link": "http://example.com/2", "source_name": "Example News",
                     "image": "http://example.com/i.png"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_envelope_decode() {
        let envelope = success_envelope();
        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.results.len(), 3);
        assert_eq!(envelope.results[0].pub_date.as_deref(), Some("2024-01-15 10:30:00"));
    }

    #[test]
    fn test_api_candidates_require_link_and_record_country() {
        let candidates = api_candidates(success_envelope().results, Some(7), "gb");
        assert_eq!(candidates.len(), 2);
        for candidate in &candidates {
            match candidate {
                Candidate::Api(c) => {
                    assert_eq!(c.country, "gb");
                    assert_eq!(c.category_id, Some(7));
                }
                other => panic!("unexpected candidate: {:?}", other),
            }
        }
    }

    #[test]
    fn test_source_name_preference() {
        let candidates = api_candidates(success_envelope().results, None, "us");
        match (&candidates[0], &candidates[1]) {
            (Candidate::Api(a), Candidate::Api(b)) => {
                assert_eq!(a.source, "example");
                assert_eq!(b.source, "Example News");
                assert_eq!(b.image_url.as_deref(), Some("http://example.com/i.png"));
            }
            other => panic!("unexpected candidates: {:?}", other),
        }
    }

    #[test]
    fn test_missing_source_falls_back() {
        let results = vec![ApiResult {
            link: Some("http://example.com/3".into()),
            ..Default::default()
        }];
        match &api_candidates(results, None, "us")[0] {
            Candidate::Api(c) => assert_eq!(c.source, SOURCE_FALLBACK),
            other => panic!("unexpected candidate: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_throttles_and_processing_continues() {
        let storage = MemoryStorage::new().await.unwrap();
        let mut source = NewsApiSource::new("test-key").unwrap();
        let mut out = Vec::new();

        source
            .absorb(Err(Error::RateLimited), "technology", "us", &storage, &mut out)
            .await;
        assert!(out.is_empty());
        assert_eq!(source.governor.current_delay(), BACKOFF_DELAY);

        // The next pair still yields its candidates.
        source
            .absorb(Ok(success_envelope()), "technology", "gb", &storage, &mut out)
            .await;
        assert_eq!(out.len(), 2);
    }

    #[tokio::test]
    async fn test_non_success_envelope_is_skipped() {
        let storage = MemoryStorage::new().await.unwrap();
        let mut source = NewsApiSource::new("test-key").unwrap();
        let mut out = Vec::new();

        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        source
            .absorb(Ok(envelope), "sports", "us", &storage, &mut out)
            .await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_absorb_creates_capitalized_category() {
        let storage = MemoryStorage::new().await.unwrap();
        let mut source = NewsApiSource::new("test-key").unwrap();
        let mut out = Vec::new();

        source
            .absorb(Ok(success_envelope()), "technology", "us", &storage, &mut out)
            .await;

        let category = storage
            .get_or_create_category("Technology", "technology")
            .await
            .unwrap();
        match &out[0] {
            Candidate::Api(c) => assert_eq!(c.category_id, Some(category.id)),
            other => panic!("unexpected candidate: {:?}", other),
        }
    }
}
