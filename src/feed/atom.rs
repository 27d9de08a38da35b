//! Atom 1.0 serialization

use chrono::Utc;

use super::FeedSource;
use crate::helpers::{date_xml, escape_xml};

pub fn render(source: &FeedSource) -> String {
    // Feed-level <updated> is the newest item, or now for an empty feed
    let updated = source
        .items
        .iter()
        .filter_map(|i| i.date)
        .max()
        .unwrap_or_else(Utc::now);

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str(&format!("  <id>{}</id>\n", escape_xml(&source.id)));
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&source.title)));
    feed.push_str(&format!(
        "  <subtitle>{}</subtitle>\n",
        escape_xml(&source.description)
    ));
    feed.push_str(&format!("  <updated>{}</updated>\n", date_xml(&updated)));
    feed.push_str(&format!(
        "  <link rel=\"alternate\" href=\"{}\"/>\n",
        escape_xml(&source.link)
    ));
    feed.push_str(&format!(
        "  <link rel=\"self\" href=\"{}\"/>\n",
        escape_xml(&source.feed_links.atom)
    ));
    feed.push_str(&format!("  <icon>{}</icon>\n", escape_xml(&source.favicon)));
    feed.push_str(&format!("  <rights>{}</rights>\n", escape_xml(&source.copyright)));
    feed.push_str(&format!(
        "  <author>\n    <name>{}</name>\n    <uri>{}</uri>\n  </author>\n",
        escape_xml(&source.author.name),
        escape_xml(&source.author.link)
    ));

    for item in &source.items {
        let date = item.date.map(|d| date_xml(&d)).unwrap_or_else(|| date_xml(&updated));
        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&item.title)));
        feed.push_str(&format!("    <id>{}</id>\n", escape_xml(&item.id)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", escape_xml(&item.link)));
        feed.push_str(&format!("    <published>{}</published>\n", date));
        feed.push_str(&format!("    <updated>{}</updated>\n", date));
        feed.push_str(&format!(
            "    <summary type=\"html\">{}</summary>\n",
            escape_xml(&item.description)
        ));
        for category in &item.categories {
            feed.push_str(&format!(
                "    <category term=\"{}\" label=\"{}\"/>\n",
                escape_xml(&category.term),
                escape_xml(&category.name)
            ));
        }
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::build_feed_source;
    use crate::feed::tests::{sample_config, sample_posts};

    #[test]
    fn test_atom_structure() {
        let source = build_feed_source(&sample_config(), &sample_posts(), 2024);
        let xml = render(&source);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<feed"));
        assert_eq!(xml.matches("<entry>").count(), 2);
        assert!(xml.contains("<updated>2024-06-01T00:00:00+00:00</updated>"));
        assert!(xml.contains(r#"<link href="https://blog.example.com/posts/new-year"/>"#));
        assert!(xml.contains(r#"<category term="Life" label="Life"/>"#));
        assert!(xml.contains("<rights>© 2024 Ada Lovelace</rights>"));
    }
}
