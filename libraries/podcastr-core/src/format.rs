//! Display formatting for durations and publish dates

use chrono::{DateTime, Utc};

/// Format a second count as `HH:MM:SS`
///
/// Hours are not wrapped, so a 100 hour value renders as `100:00:00`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format a publish date as `22 Jan 21`
pub fn format_published_date(published_at: &DateTime<Utc>) -> String {
    published_at.format("%-d %b %y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_is_padded() {
        assert_eq!(format_duration(0), "00:00:00");
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(3599), "00:59:59");
    }

    #[test]
    fn hours_roll_over() {
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3981), "01:06:21");
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn published_date_is_short_form() {
        let date = Utc.with_ymd_and_hms(2021, 1, 8, 12, 0, 0).unwrap();
        assert_eq!(format_published_date(&date), "8 Jan 21");
    }
}
