//! Markdown rendering with syntax highlighting

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::escape_html;

lazy_static! {
    /// Loaded on first use, shared by every renderer in the process
    static ref HIGHLIGHTER: Highlighter = Highlighter::load();
}

/// Which color scheme a code block is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn class(&self) -> &'static str {
        match self {
            ThemeMode::Light => "code-light",
            ThemeMode::Dark => "code-dark",
        }
    }
}

/// Syntax and theme definitions
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    fn load() -> Self {
        tracing::debug!("Loading syntax highlighter");
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// The process-wide instance
    pub fn global() -> &'static Highlighter {
        &HIGHLIGHTER
    }

    /// Whether a fence label names a known language
    pub fn supports(&self, lang: &str) -> bool {
        self.syntax_set.find_syntax_by_token(lang).is_some()
    }

    /// Highlight `code` as `lang` with the named theme.
    ///
    /// Unknown languages are highlighted as plain text. If the theme is
    /// missing or highlighting fails, the code is returned escaped in a
    /// bare `<pre>`.
    pub fn highlight(&self, code: &str, lang: &str, theme_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme_set.themes.get(theme_name) else {
            tracing::warn!("Unknown highlight theme {:?}, rendering plain code", theme_name);
            return plain_block(code);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::warn!("Failed to highlight {} code block: {}", lang, e);
                plain_block(code)
            }
        }
    }
}

/// Markdown renderer with light and dark syntax highlighting
pub struct MarkdownRenderer {
    light_theme: String,
    dark_theme: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the default themes
    pub fn new() -> Self {
        Self::with_config(&HighlightConfig::default())
    }

    /// Create with the configured themes
    pub fn with_config(config: &HighlightConfig) -> Self {
        Self {
            light_theme: config.light_theme.clone(),
            dark_theme: config.dark_theme.clone(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is stripped before this point
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(label) => fence_language(&label),
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block in both color schemes
    pub fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let highlighter = Highlighter::global();
        format!(
            r#"<figure class="code-block" data-lang="{lang}"><div class="{light_class}">{light}</div><div class="{dark_class}">{dark}</div></figure>"#,
            lang = escape_html(lang),
            light_class = ThemeMode::Light.class(),
            light = highlighter.highlight(code, lang, &self.light_theme),
            dark_class = ThemeMode::Dark.class(),
            dark = highlighter.highlight(code, lang, &self.dark_theme),
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Language of a fence label such as `rust` or `ts title="x.ts"`
fn fence_language(label: &str) -> Option<String> {
    let lang = label
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or("")
        .trim();
    if lang.is_empty() {
        None
    } else {
        Some(lang.to_string())
    }
}

fn plain_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_html(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block_in_both_themes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"data-lang="rust""#));
        assert!(html.contains("code-light"));
        assert!(html.contains("code-dark"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```klingon-script\nqapla'\n```")
            .unwrap();
        assert!(html.contains(r#"data-lang="klingon-script""#));
        assert!(html.contains("qapla"));
    }

    #[test]
    fn test_unknown_theme_renders_plain() {
        let renderer = MarkdownRenderer::with_config(&HighlightConfig {
            light_theme: "does-not-exist".to_string(),
            dark_theme: "does-not-exist".to_string(),
        });
        let html = renderer.highlight_code("<b>x</b>", Some("html"));
        assert!(html.contains("<pre><code>&lt;b&gt;x&lt;/b&gt;</code></pre>"));
    }

    #[test]
    fn test_indented_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Text\n\n    let x = 1;\n").unwrap();
        assert!(html.contains(r#"data-lang="text""#));
    }

    #[test]
    fn test_inline_components_pass_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("Before\n\n<TweetEmbed id=\"123\" />\n\nAfter")
            .unwrap();
        assert!(html.contains("<TweetEmbed id=\"123\" />"));
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), Some("rust".to_string()));
        assert_eq!(fence_language("ts title=\"a.ts\""), Some("ts".to_string()));
        assert_eq!(fence_language("rust,ignore"), Some("rust".to_string()));
        assert_eq!(fence_language(""), None);
    }

    #[test]
    fn test_highlighter_is_shared() {
        assert!(std::ptr::eq(Highlighter::global(), Highlighter::global()));
        assert!(Highlighter::global().supports("rust"));
    }
}
