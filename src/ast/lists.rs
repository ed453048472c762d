use crate::{HtmlNode, ParseError, parse_inlines};

/// List flavor of a list block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Every line starts with `"- "`.
pub fn is_unordered_list(block: &str) -> bool {
    block.lines().all(|line| line.starts_with("- "))
}

/// Line `i` starts with `"{i + 1}. "`, so numbering must run 1, 2, 3... without gaps.
pub fn is_ordered_list(block: &str) -> bool {
    block
        .lines()
        .enumerate()
        .all(|(i, line)| strip_ordered_marker(line, i + 1).is_some())
}

fn strip_ordered_marker(line: &str, number: usize) -> Option<&str> {
    line.strip_prefix(number.to_string().as_str())?.strip_prefix(". ")
}

fn strip_list_marker(line: &str, index: usize, kind: ListKind) -> Option<&str> {
    match kind {
        ListKind::Unordered => line.strip_prefix("- "),
        ListKind::Ordered => strip_ordered_marker(line, index + 1),
    }
}

/// Convert a list block into a `ul`/`ol` node with one `li` per line.
pub fn list_to_node(block: &str, kind: ListKind) -> Result<HtmlNode, ParseError> {
    let items = block
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let content = strip_list_marker(line, i, kind)
                .ok_or_else(|| ParseError::InvalidNode(format!("line {} is not a list item: {line:?}", i + 1)))?;
            HtmlNode::parent("li", parse_inlines(content)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    HtmlNode::parent(kind.tag(), items)
}
