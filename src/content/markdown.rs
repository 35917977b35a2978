//! Markdown rendering with syntax highlighting
//!
//! Post bodies are MDX: Markdown with embedded HTML/JSX-like elements. The
//! `HolographicQuote` component becomes a styled blockquote; every other
//! embedded element is passed through untouched for the browser.

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

const HOLOGRAPHIC_QUOTE: &str = r#"<blockquote class="holographic-quote not-prose">"#;

lazy_static! {
    static ref HOLOGRAPHIC_QUOTE_OPEN: Regex =
        Regex::new(r"<HolographicQuote(?:\s[^>]*)?>").unwrap();
    static ref HOLOGRAPHIC_QUOTE_CLOSE: Regex = Regex::new(r"</HolographicQuote\s*>").unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

/// Image being collected between its start and end events
struct PendingImage {
    url: String,
    title: String,
    alt: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create with a specific syntect theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut image: Option<PendingImage> = None;

        for event in parser {
            if let Some((lang, content)) = code_block.as_mut() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlight_code(content, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    Event::Text(text) => content.push_str(&text),
                    _ => {}
                }
                continue;
            }

            if let Some(pending) = image.as_mut() {
                match event {
                    Event::End(TagEnd::Image) => {
                        let figure = image_figure(pending);
                        events.push(Event::Html(CowStr::from(figure)));
                        image = None;
                    }
                    Event::Text(text) | Event::Code(text) => pending.alt.push_str(&text),
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some(PendingImage {
                        url: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                    });
                }
                Event::Html(html) => events.push(Event::Html(expand_components(html))),
                Event::InlineHtml(html) => {
                    events.push(Event::InlineHtml(expand_components(html)))
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace custom component tags with the markup they stand for
fn expand_components(html: CowStr<'_>) -> CowStr<'_> {
    if !html.contains("HolographicQuote") {
        return html;
    }
    let expanded = HOLOGRAPHIC_QUOTE_OPEN.replace_all(&html, HOLOGRAPHIC_QUOTE);
    let expanded = HOLOGRAPHIC_QUOTE_CLOSE.replace_all(&expanded, "</blockquote>");
    CowStr::from(expanded.into_owned())
}

/// Images are shown full width with their alt text as a caption
fn image_figure(image: &PendingImage) -> String {
    let title = if image.title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(&image.title))
    };
    format!(
        r#"<div class="post-image"><img src="{src}" alt="{alt}"{title} loading="lazy" /><p class="post-image-caption">{alt}</p></div>"#,
        src = html_escape(&image.url),
        alt = html_escape(&image.alt),
        title = title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Witaj\n\nTo jest test.").unwrap();
        assert!(html.contains("<h1>Witaj</h1>"));
        assert!(html.contains("<p>To jest test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_holographic_quote_becomes_blockquote() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("<HolographicQuote>\n\nSygnał\n\n</HolographicQuote>\n")
            .unwrap();
        assert!(html.contains(r#"<blockquote class="holographic-quote not-prose">"#));
        assert!(html.contains("<p>Sygnał</p>"));
        assert!(html.contains("</blockquote>"));
        assert!(!html.contains("HolographicQuote"));
    }

    #[test]
    fn test_other_embedded_markup_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("<div className=\"terminal\">\n\n**ALERT**\n\n</div>\n")
            .unwrap();
        assert!(html.contains(r#"<div className="terminal">"#));
        assert!(html.contains("<strong>ALERT</strong>"));
    }

    #[test]
    fn test_image_with_caption() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("![Operator przy konsoli](/images/operator.jpg)")
            .unwrap();
        assert!(html.contains(r#"src="/images/operator.jpg""#));
        assert!(html.contains(r#"alt="Operator przy konsoli""#));
        assert!(html.contains(r#"<p class="post-image-caption">Operator przy konsoli</p>"#));
    }
}
