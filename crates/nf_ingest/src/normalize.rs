//! Pure mapping from raw candidates onto the canonical article shape.

use chrono::{DateTime, Utc};
use nf_core::dates::{self, RawDate};
use nf_core::sanitize::{clean_text, truncate};
use nf_core::types::{NewArticle, TEXT_MAX, UNTITLED};

use crate::sources::{ApiCandidate, Candidate, FeedCandidate};

/// Map a candidate onto an insert payload. `now` is the ingestion-time
/// instant used when the source timestamp is absent or unparsable.
pub fn normalize(candidate: Candidate, now: DateTime<Utc>) -> NewArticle {
    match candidate {
        Candidate::Feed(c) => normalize_feed(c, now),
        Candidate::Api(c) => normalize_api(c, now),
    }
}

fn normalize_feed(c: FeedCandidate, now: DateTime<Utc>) -> NewArticle {
    NewArticle {
        title: clean_title(Some(&c.title)),
        description: clean_text(&[c.summary.as_deref(), c.content.as_deref()]),
        link: c.link,
        published_at: dates::resolve(c.published.map(RawDate::Instant), now),
        image_url: c.image_url,
        source: c.source,
        category_id: c.category_id,
        country: None,
    }
}

fn normalize_api(c: ApiCandidate, now: DateTime<Utc>) -> NewArticle {
    NewArticle {
        title: clean_title(c.title.as_deref()),
        description: clean_text(&[c.description.as_deref(), c.content.as_deref()]),
        link: c.link,
        published_at: dates::resolve(c.pub_date.map(RawDate::Text), now),
        image_url: c.image_url,
        source: c.source,
        category_id: c.category_id,
        country: Some(c.country),
    }
}

fn clean_title(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => truncate(title, TEXT_MAX),
        None => UNTITLED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn api_candidate() -> ApiCandidate {
        ApiCandidate {
            title: None,
            link: "http://example.com/a".to_string(),
            description: None,
            content: None,
            image_url: None,
            pub_date: None,
            source: "Example".to_string(),
            category_id: Some(1),
            country: "us".to_string(),
        }
    }

    #[test]
    fn test_missing_title_becomes_untitled() {
        let now = Utc::now();
        let article = normalize(Candidate::Api(api_candidate()), now);
        assert_eq!(article.title, UNTITLED);
        assert_eq!(article.country.as_deref(), Some("us"));
    }

    #[test]
    fn test_long_title_is_truncated() {
        let mut candidate = api_candidate();
        candidate.title = Some("t".repeat(600));
        let article = normalize(Candidate::Api(candidate), Utc::now());
        assert_eq!(article.title.chars().count(), TEXT_MAX);
    }

    #[test]
    fn test_description_stripped_and_bounded() {
        let mut candidate = api_candidate();
        candidate.description = Some(format!("<p>{}</p>", "d".repeat(700)));
        let article = normalize(Candidate::Api(candidate), Utc::now());
        let description = article.description.unwrap();
        assert_eq!(description.chars().count(), TEXT_MAX);
        assert!(!description.contains('<'));
    }

    #[test]
    fn test_content_is_description_fallback() {
        let mut candidate = api_candidate();
        candidate.content = Some("body text".to_string());
        let article = normalize(Candidate::Api(candidate), Utc::now());
        assert_eq!(article.description.as_deref(), Some("body text"));
    }

    #[test]
    fn test_iso_pub_date_parsed() {
        let mut candidate = api_candidate();
        candidate.pub_date = Some("2024-01-15T10:30:00Z".to_string());
        let article = normalize(Candidate::Api(candidate), Utc::now());
        assert_eq!(
            article.published_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_unparsable_pub_date_falls_back_to_now() {
        let now = Utc::now();
        let mut candidate = api_candidate();
        candidate.pub_date = Some("not a timestamp".to_string());
        let article = normalize(Candidate::Api(candidate), now);
        assert_eq!(article.published_at, now);
    }

    #[test]
    fn test_feed_candidate_carries_instant_and_no_country() {
        let published = Utc.with_ymd_and_hms(2023, 7, 1, 8, 0, 0).unwrap();
        let candidate = FeedCandidate {
            title: "Feed title".to_string(),
            link: "http://example.com/f".to_string(),
            summary: Some("<b>sum</b>".to_string()),
            content: None,
            image_url: None,
            published: Some(published),
            source: "BBC".to_string(),
            category_id: Some(2),
        };
        let article = normalize(Candidate::Feed(candidate), Utc::now());
        assert_eq!(article.published_at, published);
        assert_eq!(article.description.as_deref(), Some("sum"));
        assert_eq!(article.country, None);
        assert_eq!(article.category_id, Some(2));
    }
}
