//! JSON Feed 1.1 serialization

use anyhow::Result;
use serde::Serialize;

use super::FeedSource;
use crate::helpers::date_xml;

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    icon: &'a str,
    favicon: &'a str,
    language: &'a str,
    authors: Vec<JsonAuthor<'a>>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
}

pub fn render(source: &FeedSource) -> Result<String> {
    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &source.title,
        home_page_url: &source.link,
        feed_url: &source.feed_links.json,
        description: &source.description,
        icon: &source.favicon,
        favicon: &source.favicon,
        language: &source.language,
        authors: vec![JsonAuthor {
            name: &source.author.name,
            url: &source.author.link,
        }],
        items: source
            .items
            .iter()
            .map(|item| JsonItem {
                id: &item.id,
                url: &item.link,
                title: &item.title,
                summary: &item.description,
                date_published: item.date.as_ref().map(date_xml),
                tags: item.categories.iter().map(|c| c.term.as_str()).collect(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&feed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::build_feed_source;
    use crate::feed::tests::{sample_config, sample_posts};

    #[test]
    fn test_json_feed_structure() {
        let source = build_feed_source(&sample_config(), &sample_posts(), 2024);
        let body = render(&source).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert!(value["version"].as_str().unwrap().contains("jsonfeed.org"));
        assert_eq!(value["title"], "Example Blog");

        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert!(item["title"].is_string());
            assert!(item["url"].is_string());
        }
        assert_eq!(items[0]["url"], "https://blog.example.com/posts/summer");
        assert_eq!(items[0]["date_published"], "2024-06-01T00:00:00+00:00");
        assert_eq!(items[0]["tags"][1], "Next.js");
    }
}
