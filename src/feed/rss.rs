//! RSS 2.0 serialization

use super::FeedSource;
use crate::helpers::{date_rfc2822, escape_xml};

pub fn render(source: &FeedSource) -> String {
    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&source.title)));
    feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&source.link)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&source.description)
    ));
    feed.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&source.language)
    ));
    feed.push_str(&format!(
        "    <copyright>{}</copyright>\n",
        escape_xml(&source.copyright)
    ));
    if let Some(latest) = source.items.iter().filter_map(|i| i.date).max() {
        feed.push_str(&format!(
            "    <lastBuildDate>{}</lastBuildDate>\n",
            date_rfc2822(&latest)
        ));
    }
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(&source.feed_links.rss2)
    ));

    for item in &source.items {
        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&item.title)));
        feed.push_str(&format!("      <link>{}</link>\n", escape_xml(&item.link)));
        feed.push_str(&format!("      <guid>{}</guid>\n", escape_xml(&item.id)));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&item.description)
        ));
        if let Some(date) = &item.date {
            feed.push_str(&format!("      <pubDate>{}</pubDate>\n", date_rfc2822(date)));
        }
        for category in &item.categories {
            feed.push_str(&format!(
                "      <category>{}</category>\n",
                escape_xml(&category.name)
            ));
        }
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::build_feed_source;
    use crate::feed::tests::{sample_config, sample_posts};

    #[test]
    fn test_rss_structure() {
        let source = build_feed_source(&sample_config(), &sample_posts(), 2024);
        let xml = render(&source);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<rss"));
        assert_eq!(xml.matches("<item>").count(), 2);
        assert_eq!(xml.matches("<title>").count(), 3);
        assert!(xml.contains("<link>https://blog.example.com/posts/summer</link>"));
        assert!(xml.contains("<title>Summer &lt;notes&gt;</title>"));
        assert!(xml.contains("<description>Notes &amp; experiments</description>"));
        assert!(xml.contains("<category>Next.js</category>"));
        assert!(xml.contains("<pubDate>"));
    }

    #[test]
    fn test_empty_rss() {
        let source = build_feed_source(&sample_config(), &[], 2024);
        let xml = render(&source);
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
        assert!(!xml.contains("<lastBuildDate>"));
    }
}
