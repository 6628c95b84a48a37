//! Streaming element events.
//!
//! Character data is attached to the surrounding events instead of being
//! surfaced on its own: `Start` carries the text before the first child and
//! `End` carries the tail that follows the end tag. The reader holds the stack
//! of open element names and one token of lookahead, nothing else.

use crate::document::Attributes;
use crate::error::{ParseError, ParseErrorCode};
use crate::tokenizer::{Token, Tokenizer};

/// What to do with comments, processing instructions and doctypes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Skip them; their content never reaches text or tails.
    #[default]
    Ignore,
    /// Fail with `ParseErrorCode::UnsupportedConstruct`.
    Reject,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseConfig {
    pub unsupported: UnsupportedPolicy,
}

impl ParseConfig {
    pub fn strict() -> Self {
        Self {
            unsupported: UnsupportedPolicy::Reject,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlEvent {
    Start {
        name: String,
        attributes: Attributes,
        text: Option<String>,
    },
    End {
        name: String,
        tail: Option<String>,
    },
}

impl XmlEvent {
    pub fn name(&self) -> &str {
        match self {
            XmlEvent::Start { name, .. } | XmlEvent::End { name, .. } => name,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, XmlEvent::Start { .. })
    }
}

// Tokens that survive the unsupported-construct filter.
enum Markup {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    End(String),
    Text(String),
}

fn is_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

pub struct EventReader<'a> {
    tokenizer: Tokenizer<'a>,
    config: ParseConfig,
    input_len: usize,
    open: Vec<String>,
    peeked: Option<(usize, Markup)>,
    pending_end: Option<String>,
    root_closed: bool,
    finished: bool,
}

impl<'a> EventReader<'a> {
    pub fn new(input: &'a str, config: ParseConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            config,
            input_len: input.len(),
            open: Vec::new(),
            peeked: None,
            pending_end: None,
            root_closed: false,
            finished: false,
        }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn next_markup(&mut self) -> Result<Option<(usize, Markup)>, ParseError> {
        if let Some(peeked) = self.peeked.take() {
            return Ok(Some(peeked));
        }
        loop {
            let start = self.tokenizer.offset();
            let Some(token) = self.tokenizer.next().transpose()? else {
                return Ok(None);
            };
            let kind = match token {
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    return Ok(Some((
                        start,
                        Markup::Start {
                            name,
                            attributes,
                            self_closing,
                        },
                    )));
                }
                Token::EndTag(name) => return Ok(Some((start, Markup::End(name)))),
                Token::Text(text) => return Ok(Some((start, Markup::Text(text)))),
                Token::XmlDeclaration(_) => continue,
                Token::Comment(_) => "comment",
                Token::ProcessingInstruction(_) => "processing instruction",
                Token::Doctype(_) => "doctype",
            };
            match self.config.unsupported {
                UnsupportedPolicy::Ignore => {
                    log::debug!(target: "markup.events", "skipping {kind} at byte {start}");
                }
                UnsupportedPolicy::Reject => {
                    return Err(ParseError::new(
                        ParseErrorCode::UnsupportedConstruct,
                        start,
                    ));
                }
            }
        }
    }

    /// Concatenate character data up to the next tag.
    fn collect_text(&mut self) -> Result<Option<String>, ParseError> {
        let mut text: Option<String> = None;
        while let Some((start, markup)) = self.next_markup()? {
            match markup {
                Markup::Text(chunk) => {
                    if !chunk.is_empty() {
                        text.get_or_insert_with(String::new).push_str(&chunk);
                    }
                }
                other => {
                    self.peeked = Some((start, other));
                    break;
                }
            }
        }
        Ok(text)
    }

    fn close(&mut self, name: String) -> Result<XmlEvent, ParseError> {
        self.open.pop();
        let tail = if self.open.is_empty() {
            self.root_closed = true;
            None
        } else {
            self.collect_text()?
        };
        Ok(XmlEvent::End { name, tail })
    }

    /// Only whitespace and skipped constructs may follow the root element.
    fn check_epilogue(&mut self) -> Result<(), ParseError> {
        while let Some((start, markup)) = self.next_markup()? {
            let code = match markup {
                Markup::Text(text) if is_whitespace(&text) => continue,
                Markup::Text(_) => ParseErrorCode::TextOutsideRoot,
                Markup::Start { .. } => ParseErrorCode::MultipleRoots,
                Markup::End(_) => ParseErrorCode::UnexpectedEndTag,
            };
            return Err(ParseError::new(code, start));
        }
        Ok(())
    }

    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        if let Some(name) = self.pending_end.take() {
            return self.close(name).map(Some);
        }
        if self.root_closed {
            self.check_epilogue()?;
            return Ok(None);
        }
        loop {
            let Some((start, markup)) = self.next_markup()? else {
                let code = if self.open.is_empty() {
                    ParseErrorCode::NoRootElement
                } else {
                    ParseErrorCode::UnexpectedEof
                };
                return Err(ParseError::new(code, self.input_len));
            };
            match markup {
                // Text inside elements is consumed by `collect_text`, so this
                // is always prolog text.
                Markup::Text(text) => {
                    if is_whitespace(&text) {
                        continue;
                    }
                    return Err(ParseError::new(ParseErrorCode::TextOutsideRoot, start));
                }
                Markup::Start {
                    name,
                    attributes,
                    self_closing,
                } => {
                    self.open.push(name.clone());
                    let text = if self_closing {
                        self.pending_end = Some(name.clone());
                        None
                    } else {
                        self.collect_text()?
                    };
                    return Ok(Some(XmlEvent::Start {
                        name,
                        attributes: attributes.into_iter().collect(),
                        text,
                    }));
                }
                Markup::End(name) => {
                    let code = match self.open.last() {
                        None => ParseErrorCode::UnexpectedEndTag,
                        Some(open) if *open != name => ParseErrorCode::MismatchedEndTag,
                        Some(_) => return self.close(name).map(Some),
                    };
                    return Err(ParseError::new(code, start));
                }
            }
        }
    }
}

impl Iterator for EventReader<'_> {
    type Item = Result<XmlEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => {
                log::trace!(target: "markup.events", "{event:?}");
                Some(Ok(event))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
