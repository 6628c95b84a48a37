//! Parse errors for tokenization and tree building.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    UnexpectedEof,
    InvalidTagName,
    MalformedAttribute,
    DuplicateAttribute,
    UnexpectedEndTag,
    MismatchedEndTag,
    MultipleRoots,
    NoRootElement,
    TextOutsideRoot,
    /// Comment, processing instruction or doctype under `UnsupportedPolicy::Reject`.
    UnsupportedConstruct,
}

impl ParseErrorCode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnexpectedEof => "unexpected end of input",
            Self::InvalidTagName => "invalid tag name",
            Self::MalformedAttribute => "malformed attribute",
            Self::DuplicateAttribute => "duplicate attribute",
            Self::UnexpectedEndTag => "end tag without matching start tag",
            Self::MismatchedEndTag => "end tag does not match open element",
            Self::MultipleRoots => "more than one root element",
            Self::NoRootElement => "document has no root element",
            Self::TextOutsideRoot => "character data outside the root element",
            Self::UnsupportedConstruct => "unsupported markup construct",
        }
    }
}

/// A parse failure and the byte offset where it was detected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(code: ParseErrorCode, position: usize) -> Self {
        Self { code, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.code.label(), self.position)
    }
}

impl std::error::Error for ParseError {}
