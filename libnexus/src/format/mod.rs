//! Display helpers for sizes and tag dates.

use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use humansize::{BINARY, format_size as humansize_format};


/// Layout used by the registry in `Last-Modified` headers.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a byte count with binary units (KiB, MiB).
///
/// # Examples
///
/// ```
/// use libnexus::format::format_size;
///
/// assert_eq!(format_size(3 * 1024 * 1024), "3 MiB");
/// ```
pub fn format_size(size_bytes: u64) -> String {
    humansize_format(size_bytes, BINARY)
}

/// Formats a tag date the way the registry reports it,
/// e.g. `Mon, 02 Jan 2006 15:04:05 GMT`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(HTTP_DATE_FORMAT).to_string()
}

/// Formats a date relative to now ("3 days ago").
pub fn format_age(date: &DateTime<Utc>) -> String {
    date.humanize()
}
