//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date for display (like "January 1, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Display form of a raw front-matter date; unparseable input is shown as-is
pub fn display_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => match crate::content::parse_date_string(raw) {
            Some(date) => full_date(&date),
            None => raw.to_string(),
        },
        None => String::new(),
    }
}

/// Format a date in RFC 3339 (Atom, JSON Feed, sitemap)
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc3339()
}

/// Format a date in RFC 2822 (RSS)
pub fn date_rfc2822<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_full_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(full_date(&date), "January 5, 2024");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(Some("2024-06-01")), "June 1, 2024");
        assert_eq!(display_date(Some("someday")), "someday");
        assert_eq!(display_date(None), "");
    }

    #[test]
    fn test_feed_formats() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(date_xml(&date), "2024-06-01T00:00:00+00:00");
        let rss = date_rfc2822(&date);
        assert!(rss.starts_with("Sat, "));
        assert!(rss.ends_with("Jun 2024 00:00:00 +0000"));
    }
}
