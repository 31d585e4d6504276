//! Normalization of raw GDELT article entries into [`HeadlineRecord`]s.

use chrono::{NaiveDate, NaiveDateTime};
use hindex_core::HeadlineRecord;

use crate::types::GdeltArticle;

/// Parse the assorted `seendate` shapes GDELT emits into a calendar date.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYYMMDD HHMMSS` (with `T`/`Z`
/// stripped), `YYYY-MM-DD`, and `YYYYMMDD`. Anything else resolves to the
/// caller-supplied fallback date — the fallback is an explicit argument so
/// parsing stays deterministic with no hidden clock.
#[must_use]
pub fn parse_seen_date(raw: &str, fallback: NaiveDate) -> NaiveDate {
    let cleaned = raw.trim().replace('Z', "").replace('T', " ");
    if cleaned.is_empty() {
        return fallback;
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y%m%d %H%M%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(&cleaned, format) {
            return datetime.date();
        }
    }
    for format in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return date;
        }
    }

    fallback
}

/// Turn one raw article into a [`HeadlineRecord`].
///
/// Entries missing a usable title, URL, or domain are rejected rather than
/// coerced; the domain is lowercased on the way in.
#[must_use]
pub fn normalize_article(article: &GdeltArticle, fallback_date: NaiveDate) -> Option<HeadlineRecord> {
    let title = article.title.as_deref().unwrap_or("").trim();
    let url = article.url.as_deref().unwrap_or("").trim();
    let domain = article.domain.as_deref().unwrap_or("").trim();

    if title.is_empty() || url.is_empty() || domain.is_empty() {
        return None;
    }

    let observed_date = parse_seen_date(
        article.seen_date.as_deref().unwrap_or(""),
        fallback_date,
    );

    Some(HeadlineRecord {
        title: title.to_string(),
        source_domain: domain.to_lowercase(),
        observed_date,
    })
}
