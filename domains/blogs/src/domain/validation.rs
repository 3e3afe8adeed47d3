//! Path parameter parsing for blog lookups

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::error::BlogError;

/// Calendar date format accepted by date queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a blog post id; anything that is not a UUID is `InvalidIdentifier`
pub fn parse_blog_id(raw: &str) -> Result<Uuid, BlogError> {
    Uuid::parse_str(raw).map_err(|_| BlogError::InvalidIdentifier(raw.to_string()))
}

/// Half-open UTC window `[midnight, midnight + 24h)` for a `YYYY-MM-DD` date
pub fn day_window(raw: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), BlogError> {
    // chrono accepts single-digit months and days; the format is fixed-width
    if raw.len() != 10 {
        return Err(BlogError::InvalidDateFormat(raw.to_string()));
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| BlogError::InvalidDateFormat(raw.to_string()))?;

    let start = date.and_time(NaiveTime::MIN).and_utc();
    Ok((start, start + Duration::days(1)))
}
