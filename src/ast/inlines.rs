use crate::{HtmlNode, ParseError};

/// Formatting carried by a [`TextSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    /// Links and images are the only kinds that point somewhere.
    pub fn has_url(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

impl std::fmt::Display for SpanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpanKind::Plain => "text",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        };
        f.write_str(name)
    }
}

/// One run of inline content, the intermediate form between markdown text and HTML leaves.
///
/// For links `text` is the anchor text, for images it is the alt text. `url` is set exactly
/// when the kind is [`SpanKind::Link`] or [`SpanKind::Image`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSpan {
    pub text: String,
    pub kind: SpanKind,
    pub url: Option<String>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SpanKind::Plain, url: None }
    }

    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self { text: text.into(), kind, url: None }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SpanKind::Link, url: Some(url.into()) }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self { text: alt.into(), kind: SpanKind::Image, url: Some(url.into()) }
    }
}

impl std::fmt::Display for TextSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.url {
            Some(url) => write!(f, "TextSpan({:?}, {}, {url:?})", self.text, self.kind),
            None => write!(f, "TextSpan({:?}, {})", self.text, self.kind),
        }
    }
}

/// Delimiter passes in the order they are applied.
///
/// Longer markers run first so `**` is never read as two `*`, and code spans are cut out before
/// the single-character emphasis markers see their contents.
pub const INLINE_DELIMITERS: &[(&str, SpanKind)] = &[
    ("**", SpanKind::Bold),
    ("__", SpanKind::Bold),
    ("`", SpanKind::Code),
    ("*", SpanKind::Italic),
    ("_", SpanKind::Italic),
];

/// Split every plain span on `delimiter`, turning the enclosed runs into `kind` spans.
///
/// Spans that already carry a kind pass through untouched. An odd number of delimiters in a
/// plain span fails with [`ParseError::UnmatchedDelimiter`].
pub fn split_spans_delimiter(
    spans: Vec<TextSpan>, delimiter: &'static str, kind: SpanKind,
) -> Result<Vec<TextSpan>, ParseError> {
    if kind.has_url() {
        return Err(ParseError::InvalidSpan { kind, reason: "delimiter passes cannot produce references" });
    }

    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }

        let pieces: Vec<&str> = span.text.split(delimiter).collect();
        if pieces.len() % 2 == 0 {
            tracing::debug!(delimiter, text = %span.text, "Unmatched inline delimiter");
            return Err(ParseError::UnmatchedDelimiter { delimiter, text: span.text.clone() });
        }

        for (i, piece) in pieces.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            let piece_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(TextSpan::new(piece, piece_kind));
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
struct Reference<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

/// Match `[label](url)` with `open` at the `[`. Neither part may contain its own brackets.
fn scan_reference(text: &str, open: usize) -> Option<(&str, &str, usize)> {
    let bytes = text.as_bytes();
    let mut close = open + 1;
    while close < bytes.len() && bytes[close] != b'[' && bytes[close] != b']' {
        close += 1;
    }
    if bytes.get(close) != Some(&b']') || bytes.get(close + 1) != Some(&b'(') {
        return None;
    }

    let mut end = close + 2;
    while end < bytes.len() && bytes[end] != b'(' && bytes[end] != b')' {
        end += 1;
    }
    if bytes.get(end) != Some(&b')') {
        return None;
    }
    Some((&text[open + 1..close], &text[close + 2..end], end + 1))
}

fn find_references(text: &str, image: bool) -> Vec<Reference<'_>> {
    let bytes = text.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let open = if image {
            (bytes[i] == b'!' && bytes.get(i + 1) == Some(&b'[')).then_some(i + 1)
        } else {
            (bytes[i] == b'[' && (i == 0 || bytes[i - 1] != b'!')).then_some(i)
        };

        if let Some((label, url, end)) = open.and_then(|open| scan_reference(text, open)) {
            refs.push(Reference { start: i, end, label, url });
            i = end;
            continue;
        }
        i += 1;
    }
    refs
}

/// All `![alt](url)` occurrences in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    find_references(text, true).into_iter().map(|r| (r.label, r.url)).collect()
}

/// All `[anchor](url)` occurrences in `text` that are not images.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    find_references(text, false).into_iter().map(|r| (r.label, r.url)).collect()
}

fn split_references(spans: Vec<TextSpan>, image: bool) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }

        let refs = find_references(&span.text, image);
        if refs.is_empty() {
            out.push(span);
            continue;
        }

        let mut cursor = 0;
        for r in refs {
            if r.start > cursor {
                out.push(TextSpan::plain(&span.text[cursor..r.start]));
            }
            out.push(if image { TextSpan::image(r.label, r.url) } else { TextSpan::link(r.label, r.url) });
            cursor = r.end;
        }
        if cursor < span.text.len() {
            out.push(TextSpan::plain(&span.text[cursor..]));
        }
    }
    out
}

/// Cut `![alt](url)` references out of plain spans.
pub fn split_spans_image(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_references(spans, true)
}

/// Cut `[anchor](url)` references out of plain spans. Run after [`split_spans_image`].
pub fn split_spans_link(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_references(spans, false)
}

/// Full inline pipeline: every delimiter pass, then images, then links.
pub fn text_to_spans(text: &str) -> Result<Vec<TextSpan>, ParseError> {
    let mut spans = vec![TextSpan::plain(text)];
    for &(delimiter, kind) in INLINE_DELIMITERS {
        spans = split_spans_delimiter(spans, delimiter, kind)?;
    }
    let spans = split_spans_image(spans);
    Ok(split_spans_link(spans))
}

/// Map a span to the HTML leaf that renders it.
pub fn span_to_node(span: &TextSpan) -> Result<HtmlNode, ParseError> {
    let node = match (span.kind, span.url.as_deref()) {
        (SpanKind::Plain, None) => HtmlNode::text(&span.text),
        (SpanKind::Bold, None) => HtmlNode::leaf("b", &span.text),
        (SpanKind::Italic, None) => HtmlNode::leaf("i", &span.text),
        (SpanKind::Code, None) => HtmlNode::leaf("code", &span.text),
        (SpanKind::Link, Some(url)) => HtmlNode::leaf("a", &span.text).with_attr("href", url),
        (SpanKind::Image, Some(url)) => HtmlNode::leaf("img", "").with_attr("src", url).with_attr("alt", &span.text),
        (kind, Some(_)) => return Err(ParseError::InvalidSpan { kind, reason: "unexpected url" }),
        (kind, None) => return Err(ParseError::InvalidSpan { kind, reason: "missing url" }),
    };
    Ok(node)
}

/// Parse inline markdown into HTML leaves.
pub fn parse_inlines(text: &str) -> Result<Vec<HtmlNode>, ParseError> {
    text_to_spans(text)?.iter().map(span_to_node).collect()
}
