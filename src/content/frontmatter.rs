//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a post or page.
///
/// Nothing here is validated: a missing title, date or description stays
/// `None` and renders as an empty value downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// ISO-8601 date (`2024-06-01` or a full timestamp)
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub categories: Vec<String>,
    /// Drafts are unlisted but still reachable by exact slug
    pub draft: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if trimmed.starts_with("---") {
            return Self::parse_yaml(trimmed);
        }

        // No front-matter found
        (FrontMatter::default(), content)
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Closing fence directly after the opening one: empty block
        if let Some(remaining) = rest.strip_prefix("---") {
            return (FrontMatter::default(), remaining.trim_start_matches(['\n', '\r']));
        }

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                // Malformed metadata is not fatal; fields simply come out
                // missing, except a draft stays unpublished
                tracing::warn!("Failed to parse YAML front-matter: {}", e);
                let fm = FrontMatter {
                    draft: draft_line(yaml_content),
                    ..FrontMatter::default()
                };
                (fm, remaining)
            }
        }
    }

    /// Parse the date field
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_string)
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Whether a block that failed to parse still has a top-level `draft: true`
fn draft_line(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        line.strip_prefix("draft:")
            .map(|value| {
                let value = value.split('#').next().unwrap_or_default().trim();
                matches!(value, "true" | "True" | "TRUE" | "yes")
            })
            .unwrap_or(false)
    })
}

/// Parse a date string in various formats.
///
/// Values without an offset are taken as UTC, so `2024-01-01` is midnight UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: First post
categories:
  - Web Development
  - Next.js
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.date, Some("2024-01-15".to_string()));
        assert_eq!(fm.categories, vec!["Web Development", "Next.js"]);
        assert!(!fm.draft);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_draft_flag() {
        let content = "---\ntitle: Secret\ndraft: true\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content);
        assert!(fm.draft);
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_single_string_category() {
        let content = "---\ntitle: One\ncategories: Rust\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.categories, vec!["Rust"]);
    }

    #[test]
    fn test_missing_fields_stay_empty() {
        let content = "---\ndate: 2024-01-01\n---\nText";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(fm.title_or_empty(), "");
        assert!(fm.categories.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_not_fatal() {
        let content = "---\ntitle: [unclosed\n---\nStill here";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "Still here");
    }

    #[test]
    fn test_malformed_yaml_keeps_draft() {
        let content = "---\ntitle: [unclosed\ndraft: true # wip\n---\nSecret";
        let (fm, remaining) = FrontMatter::parse(content);
        assert!(fm.draft);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, "Secret");

        let content = "---\ntitle: [unclosed\n  draft: true\n---\nNested";
        let (fm, _) = FrontMatter::parse(content);
        assert!(!fm.draft);
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Just markdown");
        assert_eq!(fm.title, None);
        assert_eq!(remaining, "# Just markdown");
    }

    #[test]
    fn test_unclosed_fence_is_content() {
        let content = "---\ntitle: nope\nno closing fence";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_extra_fields_kept() {
        let content = "---\ntitle: X\nimage: /cover.png\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(
            fm.extra.get("image").and_then(|v| v.as_str()),
            Some("/cover.png")
        );
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date_string("2024-06-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T00:00:00+00:00");

        let dt = parse_date_string("2024-06-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "08:30");

        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");

        assert!(parse_date_string("not a date").is_none());
    }
}
