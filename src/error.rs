use thiserror::Error;

use crate::SpanKind;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("invalid markdown syntax: no matching `{delimiter}` delimiter in {text:?}")]
    UnmatchedDelimiter { delimiter: &'static str, text: String },
    #[error("no heading line found to use as the page title")]
    MissingTitle,
    #[error("invalid node: {0}")]
    InvalidNode(String),
    #[error("invalid {kind} span: {reason}")]
    InvalidSpan { kind: SpanKind, reason: &'static str },
}
