use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::html::HtmlNode;

/// A span of inline content within a block.
///
/// Only `Strong` and `Emphasis` nest; every other variant is a leaf whose
/// text is never re-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Plain(String),
    Strong(Vec<InlineNode>),
    Emphasis(Vec<InlineNode>),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Strong,
    Emphasis,
    Code,
}

/// Kinds that can hold children on the open-span stack.
#[derive(Debug, Clone, Copy)]
enum WrapKind {
    Strong,
    Emphasis,
}

/// Inline delimiters, checked in order at every scan position. The
/// two-character markers come first so `**` is never read as two emphasis
/// openers and ```` `` ```` allows a literal backtick inside a code span.
const DELIMITERS: &[(&str, SpanKind)] = &[
    ("**", SpanKind::Strong),
    ("``", SpanKind::Code),
    ("_", SpanKind::Emphasis),
    ("*", SpanKind::Emphasis),
    ("`", SpanKind::Code),
];

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^()]*)\)").expect("image pattern"));

// The URL may contain one level of balanced parentheses. Plain segments
// exclude `(` so an opening paren is always consumed by the balanced
// group, never left for the final closer to cut short.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]\(([^()\s]*(?:\([^)]*\)[^()\s]*)*)\)").expect("link pattern")
});

/// Parse a flat text string into inline nodes.
///
/// Three passes: delimiter resolution (strong/emphasis/code), then image
/// extraction, then link extraction. Emphasis resolves first so that link
/// text containing markers is not corrupted by matches across link
/// boundaries.
pub fn parse_inline(text: &str) -> Result<Vec<InlineNode>, ParseError> {
    let nodes = resolve_delimiters(text)?;
    let nodes = split_images(nodes);
    Ok(split_links(nodes))
}

/// Pass 1: resolve formatting delimiters with an explicit stack.
///
/// Each stack frame owns the parent's partially-built child list; `done` is
/// always the child list of the innermost open span. A marker matching the
/// innermost open delimiter closes it; any other marker opens a new span.
fn resolve_delimiters(text: &str) -> Result<Vec<InlineNode>, ParseError> {
    let mut done: Vec<InlineNode> = Vec::new();
    let mut stack: Vec<(&str, WrapKind, Vec<InlineNode>)> = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        // A backslash escapes the following marker character.
        if rest.starts_with('\\') {
            let mut chars = rest.chars();
            chars.next();
            if let Some(ch) = chars.next() {
                if matches!(ch, '*' | '_' | '`' | '\\') {
                    buf.push(ch);
                    i += 1 + ch.len_utf8();
                    continue;
                }
            }
        }

        // Close the innermost open span if its delimiter repeats here.
        if stack.last().is_some_and(|(d, _, _)| rest.starts_with(d)) {
            if !buf.is_empty() {
                done.push(InlineNode::Plain(std::mem::take(&mut buf)));
            }
            if let Some((delim, kind, parent)) = stack.pop() {
                let children = std::mem::replace(&mut done, parent);
                done.push(match kind {
                    WrapKind::Strong => InlineNode::Strong(children),
                    WrapKind::Emphasis => InlineNode::Emphasis(children),
                });
                i += delim.len();
            }
            continue;
        }

        if let Some(&(delim, kind)) = DELIMITERS.iter().find(|(d, _)| rest.starts_with(d)) {
            if !buf.is_empty() {
                done.push(InlineNode::Plain(std::mem::take(&mut buf)));
            }
            i += delim.len();
            match kind {
                // Code spans are verbatim: nothing nests inside them, so
                // take everything up to the matching closer in one step.
                SpanKind::Code => {
                    let Some(end) = text[i..].find(delim) else {
                        return Err(ParseError::UnterminatedDelimiter(delim.to_string()));
                    };
                    done.push(InlineNode::Code(text[i..i + end].to_string()));
                    i += end + delim.len();
                }
                SpanKind::Strong => {
                    stack.push((delim, WrapKind::Strong, std::mem::take(&mut done)));
                }
                SpanKind::Emphasis => {
                    stack.push((delim, WrapKind::Emphasis, std::mem::take(&mut done)));
                }
            }
            continue;
        }

        if let Some(ch) = rest.chars().next() {
            buf.push(ch);
            i += ch.len_utf8();
        }
    }

    if let Some((delim, _, _)) = stack.last() {
        return Err(ParseError::UnterminatedDelimiter((*delim).to_string()));
    }
    if !buf.is_empty() {
        done.push(InlineNode::Plain(buf));
    }
    Ok(done)
}

/// Pass 2: extract `![alt](url)` images from plain text, recursing into
/// strong/emphasis children. Other leaves pass through untouched.
fn split_images(nodes: Vec<InlineNode>) -> Vec<InlineNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            InlineNode::Strong(children) => out.push(InlineNode::Strong(split_images(children))),
            InlineNode::Emphasis(children) => {
                out.push(InlineNode::Emphasis(split_images(children)));
            }
            InlineNode::Plain(text) => {
                split_plain(&text, &IMAGE, false, &mut out, |alt, url| {
                    InlineNode::Image { alt, url }
                });
            }
            other => out.push(other),
        }
    }
    out
}

/// Pass 3: extract `[text](url)` links, skipping image syntax (`![`).
fn split_links(nodes: Vec<InlineNode>) -> Vec<InlineNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            InlineNode::Strong(children) => out.push(InlineNode::Strong(split_links(children))),
            InlineNode::Emphasis(children) => {
                out.push(InlineNode::Emphasis(split_links(children)));
            }
            InlineNode::Plain(text) => {
                split_plain(&text, &LINK, true, &mut out, |text, url| {
                    InlineNode::Link { text, url }
                });
            }
            other => out.push(other),
        }
    }
    out
}

/// Split `text` around every match of `pattern`, pushing plain segments and
/// extracted nodes in left-to-right order. Empty plain segments are omitted.
fn split_plain(
    text: &str,
    pattern: &Regex,
    skip_banged: bool,
    out: &mut Vec<InlineNode>,
    make: impl Fn(String, String) -> InlineNode,
) {
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        // Image syntax is not a link.
        if skip_banged && text[..whole.start()].ends_with('!') {
            continue;
        }
        if whole.start() > last {
            out.push(InlineNode::Plain(text[last..whole.start()].to_string()));
        }
        let label = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let url = caps.get(2).map_or("", |m| m.as_str()).to_string();
        out.push(make(label, url));
        last = whole.end();
    }
    if last < text.len() {
        out.push(InlineNode::Plain(text[last..].to_string()));
    }
}

impl InlineNode {
    /// Convert this span to the HTML node it renders as.
    ///
    /// A wrapper holding exactly one plain child collapses to a tagged leaf,
    /// and an empty wrapper becomes a leaf with empty content, so the
    /// renderer never sees a childless parent for well-formed input.
    pub fn to_html(&self) -> HtmlNode {
        match self {
            InlineNode::Plain(text) => HtmlNode::text(text.clone()),
            InlineNode::Strong(children) => wrap("b", children),
            InlineNode::Emphasis(children) => wrap("i", children),
            InlineNode::Code(text) => HtmlNode::leaf("code", text.clone()),
            InlineNode::Link { text, url } => HtmlNode::leaf_with_attrs(
                "a",
                text.clone(),
                vec![("href".to_string(), url.clone())],
            ),
            InlineNode::Image { alt, url } => HtmlNode::leaf_with_attrs(
                "img",
                "",
                vec![
                    ("src".to_string(), url.clone()),
                    ("alt".to_string(), alt.clone()),
                ],
            ),
        }
    }
}

fn wrap(tag: &str, children: &[InlineNode]) -> HtmlNode {
    match children {
        [] => HtmlNode::leaf(tag, ""),
        [InlineNode::Plain(text)] => HtmlNode::leaf(tag, text.clone()),
        _ => HtmlNode::parent(tag, children.iter().map(InlineNode::to_html).collect()),
    }
}
