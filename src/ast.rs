mod inlines;
mod lists;
mod ser;

pub use inlines::{
    INLINE_DELIMITERS, SpanKind, TextSpan, extract_images, extract_links, parse_inlines, span_to_node,
    split_spans_delimiter, split_spans_image, split_spans_link, text_to_spans,
};
pub use lists::{ListKind, is_ordered_list, is_unordered_list, list_to_node};

use crate::ParseError;

/// Ordered `key=value` attribute pairs attached to an [`HtmlNode`].
pub type Attributes = Vec<(String, String)>;

/// Element tree produced by the converter.
///
/// A [`HtmlNode::Leaf`] carries literal text (and renders as bare text when it has no tag),
/// while a [`HtmlNode::Parent`] wraps one or more child nodes. Both are rendered to HTML via
/// [`std::fmt::Display`].
///
/// Build parents through [`HtmlNode::parent`]; deserialized trees go through the same check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ser::RawHtmlNode")
)]
pub enum HtmlNode {
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Attributes,
    },
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Attributes,
    },
}

impl HtmlNode {
    /// Untagged leaf, rendered as its raw value.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf { tag: None, value: value.into(), attrs: Vec::new() }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf { tag: Some(tag.into()), value: value.into(), attrs: Vec::new() }
    }

    /// Build a container node.
    ///
    /// Fails with [`ParseError::InvalidNode`] when `tag` is empty or `children` is empty.
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Result<Self, ParseError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(ParseError::InvalidNode("parent node must have a tag".into()));
        }
        if children.is_empty() {
            return Err(ParseError::InvalidNode(format!("<{tag}> must have children")));
        }
        Ok(HtmlNode::Parent { tag, children, attrs: Vec::new() })
    }

    /// Append an attribute, keeping insertion order.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attrs, .. } | HtmlNode::Parent { attrs, .. } => attrs.push((key.into(), value.into())),
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
            HtmlNode::Parent { tag, .. } => Some(tag.as_str()),
        }
    }

    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Parent { children, .. } => children,
        }
    }

    pub fn attrs(&self) -> &[(String, String)] {
        match self {
            HtmlNode::Leaf { attrs, .. } | HtmlNode::Parent { attrs, .. } => attrs,
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

fn write_attrs(f: &mut std::fmt::Formatter<'_>, attrs: &[(String, String)]) -> std::fmt::Result {
    for (key, value) in attrs {
        write!(f, " {key}={value}")?;
    }
    Ok(())
}

impl std::fmt::Display for HtmlNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HtmlNode::Leaf { tag: None, value, .. } => write!(f, "{value}"),
            HtmlNode::Leaf { tag: Some(tag), value, attrs } => {
                write!(f, "<{tag}")?;
                write_attrs(f, attrs)?;
                write!(f, ">{value}</{tag}>")
            }
            HtmlNode::Parent { tag, children, attrs } => {
                write!(f, "<{tag}")?;
                write_attrs(f, attrs)?;
                write!(f, ">")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{tag}>")
            }
        }
    }
}

/// Syntax kind of a markdown block, decided by [`crate::block_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BlockKind::Heading => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
            BlockKind::Paragraph => "paragraph",
        };
        f.write_str(name)
    }
}
