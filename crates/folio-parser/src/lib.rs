//! Folio Parser Library
//!
//! Renders markdown post sources (frontmatter + body) to HTML.

pub mod markdown;
pub mod syntax;

pub use markdown::{MarkdownError, MarkdownParser, ParsedPost, Result, truncate_at_word_boundary};
pub use syntax::SyntaxHighlighter;
