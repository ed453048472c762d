//! Two-phase markdown to HTML converter built on a small typed node tree.
//!
//! A document is split into blank-line separated blocks, each block is classified
//! ([`block_kind`]) and converted into [`HtmlNode`]s ([`block_to_nodes`]), and inline content is
//! cut into [`TextSpan`]s by a fixed sequence of delimiter passes followed by image and link
//! extraction ([`text_to_spans`]). The per-block nodes are wrapped in a single root `div`
//! returned by [`parse`] and rendered by [`html_of`].
//!
//! The grammar is deliberately small: no nested emphasis, no HTML escaping, and ordered lists
//! must be numbered from 1 without gaps.
//!
//! ```
//! let html = marktree::html_of("# Hello\n\nSome **bold** text.").unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p>Some <b>bold</b> text.</p></div>");
//! ```

mod ast;
pub mod error;
pub use ast::{
    Attributes, BlockKind, HtmlNode, INLINE_DELIMITERS, ListKind, SpanKind, TextSpan, extract_images, extract_links,
    is_ordered_list, is_unordered_list, list_to_node, parse_inlines, span_to_node, split_spans_delimiter,
    split_spans_image, split_spans_link, text_to_spans,
};
pub use error::ParseError;

use std::borrow::Cow;

/// Appended to a paragraph line that ends in two or more whitespace characters.
const LINE_BREAK: &str = "<br />";

/// Title and rendered body of one markdown page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    pub title: String,
    pub html: String,
}

fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `(level, text)` for a `#`-style heading line, with the text trimmed.
fn heading_prefix(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level < 1 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    rest.starts_with(char::is_whitespace).then(|| (level, rest.trim()))
}

/// `(open, close)` backtick fence lengths when the block is a fenced code block.
///
/// The closing fence is the whole trailing backtick run and must be at least as long as the
/// opening one, so a backtick written directly before the closing fence belongs to the fence.
fn fence_len(block: &str) -> Option<(usize, usize)> {
    let open = block.bytes().take_while(|&b| b == b'`').count();
    let close = block.bytes().rev().take_while(|&b| b == b'`').count();
    (open >= 3 && close >= open).then_some((open, close))
}

/// Drop blank leading lines and trailing whitespace, keeping the first line's indentation.
fn strip_fence_padding(s: &str) -> &str {
    let s = s.trim_end();
    let lead = s.len() - s.trim_start().len();
    match s[..lead].rfind('\n') {
        Some(nl) => &s[nl + 1..],
        None => &s[lead..],
    }
}

fn push_block(blocks: &mut Vec<String>, lines: &mut Vec<&str>) {
    let block = lines.join("\n");
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
    lines.clear();
}

/// Split a document into trimmed, non-empty blocks separated by one or more blank lines.
pub fn markdown_to_blocks(input: &str) -> Vec<String> {
    let text = normalize_newlines(input);
    let mut blocks = Vec::new();
    let mut lines = Vec::new();

    for line in text.split('\n') {
        if is_blank(line) {
            push_block(&mut blocks, &mut lines);
        } else {
            lines.push(line);
        }
    }
    push_block(&mut blocks, &mut lines);
    blocks
}

/// Classify a block. Rules are tried in order and the first match wins, so a block that
/// almost fits a list or heading falls back to [`BlockKind::Paragraph`].
pub fn block_kind(block: &str) -> BlockKind {
    if is_blank(block) {
        return BlockKind::Paragraph;
    }

    let first = block.lines().next().unwrap_or_default();
    if heading_prefix(first).is_some() {
        BlockKind::Heading
    } else if fence_len(block).is_some() {
        BlockKind::Code
    } else if block.lines().all(|line| line.starts_with('>')) {
        BlockKind::Quote
    } else if is_unordered_list(block) {
        BlockKind::UnorderedList
    } else if is_ordered_list(block) {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    }
}

/// Heading node, followed by a paragraph when the block continues past the heading line.
fn heading_to_nodes(block: &str) -> Result<Vec<HtmlNode>, ParseError> {
    let (first, rest) = match block.split_once('\n') {
        Some((first, rest)) => (first, rest.trim()),
        None => (block, ""),
    };
    let (level, text) =
        heading_prefix(first).ok_or_else(|| ParseError::InvalidNode(format!("not a heading line: {first:?}")))?;

    let mut nodes = vec![HtmlNode::parent(format!("h{level}"), parse_inlines(text)?)?];
    if !rest.is_empty() {
        nodes.push(paragraph_to_node(rest)?);
    }
    Ok(nodes)
}

fn code_to_node(block: &str) -> Result<HtmlNode, ParseError> {
    let (open, close) =
        fence_len(block).ok_or_else(|| ParseError::InvalidNode("code block without a fence".into()))?;
    let inner = block.get(open..block.len() - close).unwrap_or_default();
    HtmlNode::parent("pre", vec![HtmlNode::leaf("code", strip_fence_padding(inner))])
}

fn quote_to_node(block: &str) -> Result<HtmlNode, ParseError> {
    let text = block
        .lines()
        .map(|line| line.trim_start_matches('>').trim_start())
        .collect::<Vec<_>>()
        .join(" ");
    HtmlNode::parent("blockquote", parse_inlines(&text)?)
}

fn paragraph_to_node(block: &str) -> Result<HtmlNode, ParseError> {
    let mut children = Vec::new();
    for line in block.lines() {
        let line = line.trim_start();
        let content = line.trim_end();
        let line: Cow<'_, str> = if line[content.len()..].chars().count() >= 2 {
            Cow::Owned(format!("{content}{LINE_BREAK}"))
        } else {
            Cow::Borrowed(line)
        };
        children.extend(parse_inlines(&line)?);
    }
    HtmlNode::parent("p", children)
}

/// Convert one block into its HTML nodes. Heading blocks may produce two nodes.
pub fn block_to_nodes(block: &str) -> Result<Vec<HtmlNode>, ParseError> {
    let kind = block_kind(block);
    tracing::trace!(%kind, "Classified block");

    match kind {
        BlockKind::Heading => heading_to_nodes(block),
        BlockKind::Code => Ok(vec![code_to_node(block)?]),
        BlockKind::Quote => Ok(vec![quote_to_node(block)?]),
        BlockKind::UnorderedList => Ok(vec![list_to_node(block, ListKind::Unordered)?]),
        BlockKind::OrderedList => Ok(vec![list_to_node(block, ListKind::Ordered)?]),
        BlockKind::Paragraph => Ok(vec![paragraph_to_node(block)?]),
    }
}

/// Parse a markdown document into a root `div` [`HtmlNode`].
///
/// Any inline syntax error aborts the whole document with a [`ParseError`]; no partial tree is
/// returned. A container left without children (an empty document, a paragraph made only of
/// delimiters, an empty list item) fails with [`ParseError::InvalidNode`].
pub fn parse(input: &str) -> Result<HtmlNode, ParseError> {
    let blocks = markdown_to_blocks(input);
    tracing::debug!(blocks = blocks.len(), "Split markdown into blocks");

    let mut children = Vec::new();
    for block in &blocks {
        children.extend(block_to_nodes(block)?);
    }
    HtmlNode::parent("div", children)
}

/// Render a markdown document to an HTML string.
pub fn html_of(input: &str) -> Result<String, ParseError> {
    Ok(parse(input)?.to_html())
}

/// Text of the first `#`-style heading line of any level.
///
/// Whitespace around the title is trimmed, so `"## Sub title  "` yields `"Sub title"`.
pub fn extract_title(input: &str) -> Result<String, ParseError> {
    let text = normalize_newlines(input);
    text.lines()
        .find_map(|line| heading_prefix(line).map(|(_, title)| title.to_string()))
        .ok_or(ParseError::MissingTitle)
}

/// Title and HTML for a page, failing when the document has no heading.
pub fn page_of(input: &str) -> Result<Page, ParseError> {
    let title = extract_title(input)?;
    let html = html_of(input)?;
    Ok(Page { title, html })
}
