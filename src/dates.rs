//! Lenient parsing of frontmatter dates.
//!
//! Authors write dates in whatever shape their editor produces. The formats
//! below cover everything seen in practice; anything else is "unparseable",
//! which the engine treats as the earliest possible moment rather than an error.
//!
//! | Input | Interpretation |
//! |-------|----------------|
//! | `2024-03-01` | midnight UTC |
//! | `2024-03-01T09:30:00Z`, `2024-03-01T09:30:00+02:00` | RFC 3339, converted to UTC |
//! | `2024-03-01T09:30:00`, `2024-03-01 09:30:00`, `2024-03-01T09:30` | naive, taken as UTC |
//! | `2024/03/01` | midnight UTC |
//! | `March 1, 2024`, `Mar 1, 2024` | midnight UTC |

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Parse a raw frontmatter date into a comparable UTC timestamp.
///
/// Returns `None` for empty or unrecognized input.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
