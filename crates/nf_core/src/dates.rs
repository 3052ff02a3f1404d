//! Timestamp normalization for heterogeneous source formats.
//!
//! Sources hand us anything from a structured time tuple to a loosely
//! formatted string. Everything resolves to a UTC instant; a timestamp that
//! cannot be parsed resolves to the supplied fallback (ingestion time)
//! instead of rejecting the article.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A source-specific timestamp representation, tagged by shape.
#[derive(Debug, Clone)]
pub enum RawDate {
    /// Struct-of-fields tuple: year, month, day, hour, minute, second.
    /// Missing trailing components are treated as zero.
    Parts(Vec<u32>),
    /// ISO-8601, RFC 2822, or a loosely formatted string.
    Text(String),
    /// Already parsed upstream (e.g. by the feed parser).
    Instant(DateTime<Utc>),
}

/// Naive formats tried after the offset-carrying parsers; results are
/// assumed UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Build an instant from a time tuple, treating missing trailing components
/// as zero. Returns `None` for invalid calendar values.
pub fn from_parts(parts: &[u32]) -> Option<DateTime<Utc>> {
    if parts.is_empty() {
        return None;
    }
    let mut p = [0u32; 6];
    for (slot, value) in p.iter_mut().zip(parts.iter()) {
        *slot = *value;
    }
    Utc.with_ymd_and_hms(p[0] as i32, p[1], p[2], p[3], p[4], p[5])
        .single()
}

/// Parse a textual timestamp, most structured format first. A naive result
/// (no offset) is assumed UTC.
pub fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Resolve a raw timestamp to a UTC instant, falling back to `fallback`
/// when the representation is absent or unparsable.
pub fn resolve(raw: Option<RawDate>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    match raw {
        Some(RawDate::Parts(parts)) => from_parts(&parts).unwrap_or(fallback),
        Some(RawDate::Text(text)) => parse_lenient(&text).unwrap_or(fallback),
        Some(RawDate::Instant(instant)) => instant,
        None => fallback,
    }
}
