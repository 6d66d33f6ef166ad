use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::html::HtmlNode;
use crate::parser::inline_children;

/// Horizontal alignment of one table column, taken from the delimiter row.
/// Left is the default and is never emitted as an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn attrs(self) -> Vec<(String, String)> {
        let value = match self {
            Alignment::Left => return Vec::new(),
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        vec![("align".to_string(), value.to_string())]
    }
}

static DELIMITER_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("delimiter cell pattern"));

/// Whether a block has valid table structure: a pipe-delimited header row
/// followed by a delimiter row with the same cell count.
pub fn is_table(text: &str) -> bool {
    parse_structure(text).is_some()
}

/// Render a table block. The caller has already classified it.
pub fn to_node(block: &str) -> Result<HtmlNode, ParseError> {
    let (header, alignments, body) =
        parse_structure(block).expect("block classified as table");
    let columns = header.len();

    let mut head_cells = Vec::with_capacity(columns);
    for (cell, align) in header.iter().zip(&alignments) {
        head_cells.push(cell_node("th", cell, *align)?);
    }
    let thead = HtmlNode::parent("thead", vec![HtmlNode::parent("tr", head_cells)]);

    let mut rows = Vec::with_capacity(body.len());
    for line in body {
        let mut cells = split_row(line.trim());
        // Short rows are right-padded with empty cells, long rows truncated.
        cells.resize(columns, String::new());
        let mut tds = Vec::with_capacity(columns);
        for (cell, align) in cells.iter().zip(&alignments) {
            tds.push(cell_node("td", cell, *align)?);
        }
        rows.push(HtmlNode::parent("tr", tds));
    }

    let mut sections = vec![thead];
    if !rows.is_empty() {
        sections.push(HtmlNode::parent("tbody", rows));
    }
    Ok(HtmlNode::parent("table", sections))
}

type Structure<'a> = (Vec<String>, Vec<Alignment>, Vec<&'a str>);

fn parse_structure(text: &str) -> Option<Structure<'_>> {
    let mut lines = text.lines();
    let header_line = lines.next()?.trim();
    let delimiter_line = lines.next()?.trim();
    if !is_row(header_line) || !is_row(delimiter_line) {
        return None;
    }
    let header = split_row(header_line);
    let delimiters = split_row(delimiter_line);
    if delimiters.len() != header.len() {
        return None;
    }
    let alignments = delimiters
        .iter()
        .map(|cell| alignment_of(cell))
        .collect::<Option<Vec<_>>>()?;
    Some((header, alignments, lines.collect()))
}

fn is_row(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

fn alignment_of(cell: &str) -> Option<Alignment> {
    if !DELIMITER_CELL.is_match(cell) {
        return None;
    }
    Some(match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (false, true) => Alignment::Right,
        _ => Alignment::Left,
    })
}

/// Split a row on `|` separators. A pipe preceded by a backslash, or inside
/// a backtick-delimited code span, is literal. Outer pipes are dropped and
/// cells trimmed.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_code = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                cell.push('|');
            }
            '`' => {
                in_code = !in_code;
                cell.push('`');
            }
            '|' if !in_code => {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_string());
    if cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    cells
}

fn cell_node(tag: &str, text: &str, align: Alignment) -> Result<HtmlNode, ParseError> {
    let children = inline_children(text)?;
    Ok(if children.is_empty() {
        HtmlNode::leaf_with_attrs(tag, "", align.attrs())
    } else {
        HtmlNode::parent_with_attrs(tag, children, align.attrs())
    })
}
