//! Serialization support for the tree types.
//!
//! When the `serde` feature is enabled, [`HtmlNode`](crate::HtmlNode), [`TextSpan`](crate::TextSpan),
//! [`SpanKind`](crate::SpanKind), [`BlockKind`](crate::BlockKind), [`ListKind`](crate::ListKind) and
//! [`Page`](crate::Page) implement [`serde::Serialize`] and [`serde::Deserialize`] via derive macros.
//! A deserialized [`HtmlNode`](crate::HtmlNode) parent is validated like one built with
//! [`HtmlNode::parent`](crate::HtmlNode::parent), so an empty tag or child list is rejected.
//!
//! ## Example
//!
//! ```ignore
//! use marktree::{parse, HtmlNode};
//!
//! let tree = parse("# Heading\n\nParagraph text.").unwrap();
//! let json = serde_json::to_string_pretty(&tree).unwrap();
//! let back: HtmlNode = serde_json::from_str(&json).unwrap();
//! assert_eq!(tree, back);
//! ```

#[cfg(feature = "serde")]
use crate::{Attributes, HtmlNode, ParseError};

/// Wire shape of [`HtmlNode`], checked on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub enum RawHtmlNode {
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

#[cfg(feature = "serde")]
impl TryFrom<RawHtmlNode> for HtmlNode {
    type Error = ParseError;

    fn try_from(raw: RawHtmlNode) -> Result<Self, Self::Error> {
        match raw {
            RawHtmlNode::Leaf { tag, value, attrs } => Ok(HtmlNode::Leaf { tag, value, attrs }),
            RawHtmlNode::Parent { tag, children, attrs } => {
                let node = HtmlNode::parent(tag, children)?;
                Ok(attrs.into_iter().fold(node, |node, (key, value)| node.with_attr(key, value)))
            }
        }
    }
}
