//! Display formatting helpers

use chrono::{DateTime, Local, NaiveDateTime};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable byte size using 1024-based units.
///
/// Values are rounded to two decimals and trailing zeros are dropped,
/// so 1536 bytes render as `1.5 KB` and 1024 as `1 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    while exponent < SIZE_UNITS.len() - 1 && bytes >= 1024u64.pow(exponent as u32 + 1) {
        exponent += 1;
    }

    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;

    format!("{} {}", rounded, SIZE_UNITS[exponent])
}

/// Format an upload timestamp as e.g. `Jan 5, 2024, 02:30 PM`.
///
/// Timestamps with an offset are shown in local time; naive timestamps
/// are already local and are shown as-is. Anything unparseable is echoed.
pub fn format_date(date: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y, %I:%M %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date, pattern) {
            return naive.format(DISPLAY).to_string();
        }
    }

    date.to_string()
}

/// Icon class for a document, keyed by its extension
pub fn file_icon(filename: &str) -> &'static str {
    match super::file_extension(filename).as_deref() {
        Some("pdf") => "fas fa-file-pdf",
        Some("docx") => "fas fa-file-word",
        Some("txt") => "fas fa-file-alt",
        Some("csv") => "fas fa-file-csv",
        _ => "fas fa-file",
    }
}
