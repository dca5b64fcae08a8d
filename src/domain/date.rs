use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

/// Normalize a feed-supplied date to UTC, falling back to the current time
/// when the string is empty or matches neither ISO-8601 nor RFC-2822.
pub fn normalize_date(raw: &str) -> DateTime<Utc> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Utc::now();
    }

    match parse_date(raw) {
        Some(parsed) => parsed,
        None => {
            warn!(raw, "Unparseable published date, using current time");
            Utc::now()
        }
    }
}

/// ISO-8601 is only attempted for strings shaped like it; RFC-2822 is the fallback
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if looks_like_iso8601(raw) {
        if let Some(parsed) = parse_iso8601(raw) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn looks_like_iso8601(raw: &str) -> bool {
    raw.contains('T') || raw.contains('-')
}

fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let with_offset = match raw.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_offset) {
        return Some(dt.with_timezone(&Utc));
    }

    // Basic-format offset (+0200) or seconds omitted
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // No offset at all: read as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
