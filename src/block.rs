use std::sync::LazyLock;

use regex::Regex;

use crate::table;

/// Structural classification of one blank-line-delimited block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading { level: u8 },
    Code,
    Quote,
    UnorderedList,
    OrderedList { start: u64 },
    Table,
}

/// One heading line: up to 3 leading spaces, 1-6 `#`, at least one space,
/// then the text. Seven or more `#` or a missing space fail the match.
pub(crate) static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(#{1,6}) +(.*)$").expect("heading pattern"));

/// A fenced code region: opening and closing triple-backtick markers.
static FENCED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)`{3}.*?`{3}").expect("fence pattern"));

pub(crate) static QUOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}> ?(.*)$").expect("quote pattern"));

/// `- ` then content; a bare `-` (block trimming may eat the trailing
/// space) is an empty item.
pub(crate) static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-(?: (.*))?$").expect("unordered item pattern"));

pub(crate) static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s(.+)$").expect("ordered item pattern"));

/// Split a document into blank-line-delimited blocks, trimmed, with empty
/// results discarded. Callers normalize line endings first.
pub fn split_blocks(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block by strict first-match over the documented patterns.
/// Anything that matches nothing is a paragraph; classification never fails.
pub fn block_type(text: &str) -> BlockType {
    if text.is_empty() {
        return BlockType::Paragraph;
    }
    if let Some(level) = heading_level(text) {
        return BlockType::Heading { level };
    }
    if FENCED.is_match(text) {
        return BlockType::Code;
    }
    if text.lines().all(|line| QUOTE_LINE.is_match(line)) {
        return BlockType::Quote;
    }
    if text.lines().all(|line| UNORDERED_ITEM.is_match(line)) {
        return BlockType::UnorderedList;
    }
    if let Some(start) = ordered_start(text) {
        return BlockType::OrderedList { start };
    }
    if table::is_table(text) {
        return BlockType::Table;
    }
    BlockType::Paragraph
}

/// Heading level if every line of the block is a heading line; the level
/// comes from the first line's marker.
fn heading_level(text: &str) -> Option<u8> {
    let mut level = None;
    for line in text.lines() {
        let caps = HEADING_LINE.captures(line)?;
        if level.is_none() {
            level = caps.get(1).map(|m| m.as_str().len() as u8);
        }
    }
    level
}

/// First item's number if every line is an ordered-list item and the
/// numbers run strictly consecutively from that first number.
fn ordered_start(text: &str) -> Option<u64> {
    let mut start = None;
    let mut next = 0;
    for line in text.lines() {
        let caps = ORDERED_ITEM.captures(line)?;
        let num: u64 = caps.get(1)?.as_str().parse().ok()?;
        match start {
            None => {
                start = Some(num);
                next = num.checked_add(1)?;
            }
            Some(_) => {
                if num != next {
                    return None;
                }
                next = next.checked_add(1)?;
            }
        }
    }
    start
}

#[cfg(test)]
mod tests {
    use super::{BlockType, block_type, split_blocks};
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_blank_lines() {
        let md = "\nThis is **bolded** paragraph\n\nThis is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line\n\n- This is a list\n- with items\n";
        assert_eq!(
            split_blocks(md),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line",
                "- This is a list\n- with items",
            ]
        );
    }

    #[test]
    fn extra_blank_lines_produce_no_empty_blocks() {
        let md = "  \n\n  block1  \n\n\n\n  block2  \n\n";
        assert_eq!(split_blocks(md), vec!["block1", "block2"]);
    }

    #[test]
    fn whitespace_only_input_yields_nothing() {
        assert_eq!(split_blocks(""), Vec::<&str>::new());
        assert_eq!(split_blocks("   \n\n   \n "), Vec::<&str>::new());
    }

    #[test]
    fn heading_levels() {
        assert_eq!(block_type("# x"), BlockType::Heading { level: 1 });
        assert_eq!(block_type("### x"), BlockType::Heading { level: 3 });
        assert_eq!(block_type("###### x"), BlockType::Heading { level: 6 });
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        assert_eq!(block_type("####### x"), BlockType::Paragraph);
    }

    #[test]
    fn hash_without_space_is_not_a_heading() {
        assert_eq!(block_type("#x"), BlockType::Paragraph);
    }

    #[test]
    fn heading_requires_every_line_to_match() {
        assert_eq!(block_type("# a\nplain text"), BlockType::Paragraph);
        assert_eq!(block_type("# a\n## b"), BlockType::Heading { level: 1 });
    }

    #[test]
    fn fenced_code() {
        assert_eq!(block_type("```\ncode\n```"), BlockType::Code);
        assert_eq!(block_type("```rust\nlet x = 1;\n```"), BlockType::Code);
    }

    #[test]
    fn unterminated_fence_is_a_paragraph() {
        assert_eq!(block_type("```\ncode"), BlockType::Paragraph);
    }

    #[test]
    fn quote_requires_every_line() {
        assert_eq!(block_type("> a\n> b"), BlockType::Quote);
        assert_eq!(block_type("> a\nb"), BlockType::Paragraph);
        assert_eq!(block_type("   > indented"), BlockType::Quote);
    }

    #[test]
    fn unordered_list() {
        assert_eq!(block_type("- one\n- two"), BlockType::UnorderedList);
        assert_eq!(block_type("- one\ntwo"), BlockType::Paragraph);
        assert_eq!(block_type("-one"), BlockType::Paragraph);
    }

    #[test]
    fn empty_unordered_item_is_allowed() {
        assert_eq!(block_type("- one\n- "), BlockType::UnorderedList);
        assert_eq!(block_type("- one\n-"), BlockType::UnorderedList);
    }

    #[test]
    fn ordered_list_must_be_consecutive() {
        assert_eq!(block_type("1. a\n2. b"), BlockType::OrderedList { start: 1 });
        assert_eq!(block_type("1. a\n3. b"), BlockType::Paragraph);
    }

    #[test]
    fn ordered_list_may_start_anywhere() {
        assert_eq!(
            block_type("2. a\n3. b\n4. c"),
            BlockType::OrderedList { start: 2 }
        );
    }

    #[test]
    fn table_requires_matching_column_counts() {
        assert_eq!(block_type("| A | B |\n| --- | --- |"), BlockType::Table);
        assert_eq!(block_type("| A | B |\n| --- |"), BlockType::Paragraph);
    }

    #[test]
    fn classification_is_idempotent_under_trimming() {
        for block in ["# x", "> a\n> b", "- one\n- two", "1. a\n2. b", "plain"] {
            assert_eq!(block_type(block), block_type(block.trim()));
        }
    }
}
