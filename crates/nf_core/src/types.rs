use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for title and description text, applied after sanitization.
pub const TEXT_MAX: usize = 500;

/// Title used when a source omits one.
pub const UNTITLED: &str = "Untitled";

/// A stored news article. Created only by the ingestion pipeline and never
/// mutated afterwards; `link` is the global dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub source: String,
    pub category_id: Option<i64>,
    /// ISO country code; set only for API-sourced articles.
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for an article; ids and bookkeeping timestamps are
/// assigned by the storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub source: String,
    pub category_id: Option<i64>,
    pub country: Option<String>,
}

/// News category, created lazily on first use by the source adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
