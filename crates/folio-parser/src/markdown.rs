//! Markdown rendering using pulldown-cmark.

use std::path::Path;

use folio_core::{
    error::CoreError,
    frontmatter::{PostFrontmatter, parse_frontmatter},
};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use thiserror::Error;

use crate::syntax::SyntaxHighlighter;

/// Longest derived excerpt, in characters.
const EXCERPT_CHARS: usize = 160;

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse frontmatter.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] CoreError),
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// A parsed post source.
#[derive(Debug, Clone)]
pub struct ParsedPost {
    /// Parsed frontmatter.
    pub frontmatter: PostFrontmatter,

    /// Rendered HTML body.
    pub html: String,

    /// Raw markdown body, without frontmatter.
    pub raw: String,

    /// Plain text of the first paragraph, truncated.
    pub excerpt: String,
}

/// Markdown parser with syntax highlighting support.
#[derive(Debug)]
pub struct MarkdownParser {
    highlighter: SyntaxHighlighter,
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self {
            highlighter: SyntaxHighlighter::default(),
            options,
        }
    }

    /// Create a parser with a custom syntax theme.
    pub fn with_theme(theme: &str) -> Self {
        let mut parser = Self::new();
        parser.highlighter.set_theme(theme);
        parser
    }

    /// Parse a post source with frontmatter.
    pub fn parse(&self, content: &str, path: &Path) -> Result<ParsedPost> {
        let (frontmatter, body) = parse_frontmatter(content, path)?;
        let (html, excerpt) = self.render(&body);

        Ok(ParsedPost {
            frontmatter,
            html,
            raw: body,
            excerpt,
        })
    }

    /// Render a markdown body, returning the HTML and a derived excerpt.
    pub fn render(&self, body: &str) -> (String, String) {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut excerpt = String::new();
        let mut in_first_paragraph = false;
        let mut excerpt_done = false;

        for event in Parser::new_ext(body, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code_block.take() {
                        let highlighted = self.highlighter.highlight(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, source)) = code_block.as_mut() {
                        source.push_str(&text);
                    }
                }
                event => {
                    match &event {
                        Event::Start(Tag::Paragraph) if !excerpt_done => in_first_paragraph = true,
                        Event::End(TagEnd::Paragraph) if in_first_paragraph => {
                            in_first_paragraph = false;
                            excerpt_done = !excerpt.trim().is_empty();
                        }
                        Event::Text(text) | Event::Code(text) if in_first_paragraph => {
                            excerpt.push_str(text);
                        }
                        Event::SoftBreak | Event::HardBreak if in_first_paragraph => {
                            excerpt.push(' ');
                        }
                        _ => {}
                    }
                    events.push(event);
                }
            }
        }

        let mut out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());

        (out, truncate_at_word_boundary(excerpt.trim(), EXCERPT_CHARS))
    }
}

/// Truncate text at a word boundary, respecting UTF-8 character boundaries.
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let truncated = &text[..cut];

    match truncated.rfind(' ') {
        Some(space) => format!("{}...", &truncated[..space]),
        None => format!("{truncated}..."),
    }
}
