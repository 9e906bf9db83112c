//! Formatting utilities for file sizes, dates, and status messages.

/// Format file size for display (e.g., "1.2K", "3.4M").
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}G", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}M", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}K", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a JavaScript timestamp (milliseconds since epoch) as YYYY-MM-DD.
///
/// Properly calculates year/month/day accounting for leap years.
pub fn format_date_iso(timestamp_ms: f64) -> String {
    let days = (timestamp_ms.max(0.0) / 86_400_000.0) as i64;
    let mut year = 1970i64;
    let mut remaining_days = days;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let days_in_months: [i64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for days_in_month in days_in_months.iter() {
        if remaining_days < *days_in_month {
            break;
        }
        remaining_days -= days_in_month;
        month += 1;
    }

    let day = remaining_days + 1;
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Check if a year is a leap year.
fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// "1 image", "3 images".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Summary shown after a pick (e.g., "12 images · 4.2M of 40 files").
pub fn format_summary(images: usize, image_bytes: u64, files: usize) -> String {
    format!(
        "{} · {} of {}",
        pluralize(images, "image"),
        format_size(image_bytes),
        pluralize(files, "file")
    )
}
