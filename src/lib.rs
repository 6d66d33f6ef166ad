//! Markdown-to-HTML conversion for static site generation.
//!
//! The core pipeline splits a document into blank-line-delimited blocks,
//! classifies each block (heading, fenced code, quote, lists, pipe table,
//! paragraph), parses inline spans (strong, emphasis, code, links, images)
//! and assembles everything under a single `<div>` root that renders to an
//! HTML string. A thin page-generation layer on top handles titles,
//! template substitution and static-asset copying.

mod block;
mod config;
mod error;
mod html;
mod inline;
mod page;
mod parser;
mod table;

pub use block::{BlockType, block_type, split_blocks};
pub use config::Config;
pub use error::{BuildError, ParseError};
pub use html::HtmlNode;
pub use inline::{InlineNode, parse_inline};
pub use page::{copy_recursive, extract_title, generate_page, generate_pages};
pub use table::Alignment;

/// Parse a markdown document into an HTML node tree rooted at a `<div>`.
///
/// Malformed block structure never errors (it falls back to paragraphs);
/// the only failure is an unterminated inline delimiter.
pub fn parse_document(text: &str) -> Result<HtmlNode, ParseError> {
    parser::parse_document(text)
}

/// Render an HTML node tree to a string.
///
/// # Panics
///
/// Panics on structurally invalid trees: a parent with no tag or no
/// children, or a leaf without content. See [`HtmlNode::render`].
pub fn render(node: &HtmlNode) -> String {
    node.render()
}

/// Convert markdown to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String, ParseError> {
    Ok(parse_document(markdown)?.render())
}
