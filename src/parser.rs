use std::sync::LazyLock;

use regex::Regex;

use crate::block::{
    BlockType, HEADING_LINE, ORDERED_ITEM, QUOTE_LINE, UNORDERED_ITEM, block_type, split_blocks,
};
use crate::error::ParseError;
use crate::html::HtmlNode;
use crate::inline::{InlineNode, parse_inline};
use crate::table;

/// Interior of a fenced block: everything after the opening fence line
/// (which may carry a language hint) up to the closing fence.
static FENCE_INTERIOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)`{3}[^\n]*\n?(.*?)`{3}").expect("fence interior pattern"));

/// Parse a markdown document into an HTML tree under a synthetic `<div>`
/// root, one child per block. Malformed block structure falls back to
/// paragraphs; the only error is an unterminated inline delimiter.
pub fn parse_document(text: &str) -> Result<HtmlNode, ParseError> {
    let text = text.replace("\r\n", "\n");
    let mut children = Vec::new();
    for block in split_blocks(&text) {
        children.push(block_to_node(block)?);
    }
    Ok(HtmlNode::parent("div", children))
}

fn block_to_node(block: &str) -> Result<HtmlNode, ParseError> {
    match block_type(block) {
        BlockType::Paragraph => paragraph(block),
        BlockType::Heading { level } => heading(block, level),
        BlockType::Code => Ok(code_block(block)),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => unordered_list(block),
        BlockType::OrderedList { start } => ordered_list(block, start),
        BlockType::Table => table::to_node(block),
    }
}

/// Inline-parse text and convert the spans to HTML nodes.
pub(crate) fn inline_children(text: &str) -> Result<Vec<HtmlNode>, ParseError> {
    Ok(parse_inline(text)?.iter().map(InlineNode::to_html).collect())
}

fn paragraph(block: &str) -> Result<HtmlNode, ParseError> {
    // Soft-wrapped lines collapse to single spaces.
    let flat = block.replace('\n', " ");
    Ok(HtmlNode::parent("p", inline_children(&flat)?))
}

fn heading(block: &str, level: u8) -> Result<HtmlNode, ParseError> {
    let mut children = Vec::new();
    for line in block.lines() {
        let caps = HEADING_LINE
            .captures(line)
            .expect("block classified as heading");
        let text = caps.get(2).map_or("", |m| m.as_str());
        children.extend(inline_children(strip_closing_hashes(text))?);
    }
    Ok(HtmlNode::parent(&format!("h{level}"), children))
}

/// Drop an ignored trailing run of `#`. The run only counts as a closing
/// marker when a space separates it from the text; without one it is part
/// of the heading, so `# C#` keeps its hash.
fn strip_closing_hashes(text: &str) -> &str {
    let trimmed = text.trim_end();
    let without = trimmed.trim_end_matches('#');
    if without.len() < trimmed.len() && without.ends_with(' ') {
        without.trim_end()
    } else {
        trimmed
    }
}

fn code_block(block: &str) -> HtmlNode {
    // The interior is verbatim: no inline parsing, no trimming.
    let interior = FENCE_INTERIOR
        .captures(block)
        .expect("block classified as fenced code")
        .get(1)
        .map_or("", |m| m.as_str());
    HtmlNode::parent("pre", vec![HtmlNode::leaf("code", interior)])
}

fn quote(block: &str) -> Result<HtmlNode, ParseError> {
    let stripped: Vec<&str> = block
        .lines()
        .map(|line| {
            QUOTE_LINE
                .captures(line)
                .expect("block classified as quote")
                .get(1)
                .map_or("", |m| m.as_str())
        })
        .collect();
    Ok(HtmlNode::parent(
        "blockquote",
        inline_children(&stripped.join("\n"))?,
    ))
}

fn unordered_list(block: &str) -> Result<HtmlNode, ParseError> {
    let mut items = Vec::new();
    for line in block.lines() {
        let caps = UNORDERED_ITEM
            .captures(line)
            .expect("block classified as unordered list");
        items.push(list_item(caps.get(1).map_or("", |m| m.as_str()))?);
    }
    Ok(HtmlNode::parent("ul", items))
}

fn ordered_list(block: &str, start: u64) -> Result<HtmlNode, ParseError> {
    let mut items = Vec::new();
    for line in block.lines() {
        let caps = ORDERED_ITEM
            .captures(line)
            .expect("block classified as ordered list");
        items.push(list_item(caps.get(2).map_or("", |m| m.as_str()))?);
    }
    let attrs = if start == 1 {
        Vec::new()
    } else {
        vec![("start".to_string(), start.to_string())]
    };
    Ok(HtmlNode::parent_with_attrs("ol", items, attrs))
}

fn list_item(content: &str) -> Result<HtmlNode, ParseError> {
    let children = inline_children(content)?;
    Ok(if children.is_empty() {
        HtmlNode::leaf("li", "")
    } else {
        HtmlNode::parent("li", children)
    })
}
