/// A node in the rendered HTML tree.
///
/// Content and attribute values are emitted verbatim; callers are
/// responsible for supplying pre-sanitized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Literal text, optionally wrapped in a tag. A leaf with no tag renders
    /// as its raw content.
    Leaf {
        tag: Option<String>,
        content: Option<String>,
        attrs: Vec<(String, String)>,
    },
    /// An element whose content is entirely its children.
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Vec<(String, String)>,
    },
}

impl HtmlNode {
    /// A bare text leaf with no wrapping tag.
    pub fn text(content: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            content: Some(content.into()),
            attrs: Vec::new(),
        }
    }

    /// A tagged leaf with literal content.
    pub fn leaf(tag: &str, content: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            content: Some(content.into()),
            attrs: Vec::new(),
        }
    }

    pub fn leaf_with_attrs(
        tag: &str,
        content: impl Into<String>,
        attrs: Vec<(String, String)>,
    ) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            content: Some(content.into()),
            attrs,
        }
    }

    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.to_string(),
            children,
            attrs: Vec::new(),
        }
    }

    pub fn parent_with_attrs(
        tag: &str,
        children: Vec<HtmlNode>,
        attrs: Vec<(String, String)>,
    ) -> Self {
        HtmlNode::Parent {
            tag: tag.to_string(),
            children,
            attrs,
        }
    }

    /// Render this node and everything below it to an HTML string.
    ///
    /// # Panics
    ///
    /// Panics on structurally invalid nodes: a parent with an empty tag or
    /// no children, or a leaf without content. These indicate a bug in the
    /// code that built the tree, not bad document input.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        match self {
            HtmlNode::Leaf { tag, content, attrs } => {
                let Some(content) = content else {
                    panic!("leaf node without content: {self:?}");
                };
                match tag {
                    None => out.push_str(content),
                    Some(tag) => {
                        out.push('<');
                        out.push_str(tag);
                        write_attrs(attrs, out);
                        out.push('>');
                        out.push_str(content);
                        out.push_str("</");
                        out.push_str(tag);
                        out.push('>');
                    }
                }
            }
            HtmlNode::Parent { tag, children, attrs } => {
                assert!(!tag.is_empty(), "parent node without a tag");
                assert!(!children.is_empty(), "parent node <{tag}> has no children");
                out.push('<');
                out.push_str(tag);
                write_attrs(attrs, out);
                out.push('>');
                for child in children {
                    child.write(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn write_attrs(attrs: &[(String, String)], out: &mut String) {
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
