//! Lazy XML tokenizer.
//!
//! Supported name characters: ASCII alphanumerics, `- _ . :`, and any
//! non-ASCII character. Names are case-preserving.
//!
//! Known limitations (intentional):
//! - No DTD processing; a doctype (including an internal subset) is surfaced
//!   as a single `Token::Doctype`.
//! - Unquoted attribute values are accepted leniently.
//! - CDATA sections are surfaced as plain `Token::Text`.
use crate::entities::decode_entities;
use crate::error::{ParseError, ParseErrorCode};
use memchr::{memchr, memmem};

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";
const PI_START: &str = "<?";
const PI_END: &str = "?>";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    XmlDeclaration(String),
    Doctype(String),
    ProcessingInstruction(String),
    Comment(String),
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':') || b >= 0x80
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

/// Pull-based tokenizer over a complete input string.
///
/// Invariant: slices are cut only at ASCII structural bytes or at the end of
/// runs of name bytes; since bytes >= 0x80 are always consumed as a whole run,
/// every slice endpoint is a UTF-8 char boundary.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    /// Byte offset of the next unread input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn error(&mut self, code: ParseErrorCode, position: usize) -> ParseError {
        self.failed = true;
        ParseError::new(code, position)
    }

    /// Consume a delimited section and return its body.
    fn delimited(&mut self, open: &str, close: &str) -> Result<&'a str, ParseError> {
        let input = self.input;
        let body_start = self.pos + open.len();
        let rest = &input[body_start..];
        let Some(end) = memmem::find(rest.as_bytes(), close.as_bytes()) else {
            return Err(self.error(ParseErrorCode::UnexpectedEof, input.len()));
        };
        self.pos = body_start + end + close.len();
        Ok(&rest[..end])
    }

    fn scan_name(&self, start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut j = start;
        while j < bytes.len() && is_name_byte(bytes[j]) {
            j += 1;
        }
        debug_assert!(self.input.is_char_boundary(j));
        j
    }

    fn skip_whitespace(&self, mut k: usize) -> usize {
        let bytes = self.input.as_bytes();
        while k < bytes.len() && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        k
    }

    fn doctype(&mut self) -> Result<Token, ParseError> {
        // Internal subsets may contain '>' inside brackets.
        let input = self.input;
        let bytes = input.as_bytes();
        let start = self.pos + 2;
        let mut depth = 0usize;
        let mut k = start;
        while k < bytes.len() {
            match bytes[k] {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    let body = input[start..k].trim().to_string();
                    self.pos = k + 1;
                    return Ok(Token::Doctype(body));
                }
                _ => {}
            }
            k += 1;
        }
        Err(self.error(ParseErrorCode::UnexpectedEof, bytes.len()))
    }

    fn end_tag(&mut self) -> Result<Token, ParseError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let start = self.pos + 2;
        let j = self.scan_name(start);
        if j == start {
            return Err(self.error(ParseErrorCode::InvalidTagName, start));
        }
        let name = input[start..j].to_string();
        let k = self.skip_whitespace(j);
        if k >= bytes.len() {
            return Err(self.error(ParseErrorCode::UnexpectedEof, k));
        }
        if bytes[k] != b'>' {
            return Err(self.error(ParseErrorCode::InvalidTagName, k));
        }
        self.pos = k + 1;
        Ok(Token::EndTag(name))
    }

    fn start_tag(&mut self) -> Result<Token, ParseError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let len = bytes.len();
        let start = self.pos + 1;
        let j = self.scan_name(start);
        if j == start {
            return Err(self.error(ParseErrorCode::InvalidTagName, start));
        }
        let name = input[start..j].to_string();
        let mut attributes: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;
        let mut k = j;

        loop {
            k = self.skip_whitespace(k);
            if k >= len {
                return Err(self.error(ParseErrorCode::UnexpectedEof, k));
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    k += 2;
                    break;
                }
                return Err(self.error(ParseErrorCode::MalformedAttribute, k));
            }

            let name_start = k;
            k = self.scan_name(k);
            if name_start == k {
                return Err(self.error(ParseErrorCode::MalformedAttribute, k));
            }
            let attribute_name = &input[name_start..k];
            k = self.skip_whitespace(k);
            if k >= len || bytes[k] != b'=' {
                return Err(self.error(ParseErrorCode::MalformedAttribute, name_start));
            }
            k = self.skip_whitespace(k + 1);
            if k >= len {
                return Err(self.error(ParseErrorCode::UnexpectedEof, k));
            }

            let value = if bytes[k] == b'"' || bytes[k] == b'\'' {
                let quote = bytes[k];
                let vstart = k + 1;
                let Some(rel) = memchr(quote, &bytes[vstart..]) else {
                    return Err(self.error(ParseErrorCode::UnexpectedEof, len));
                };
                k = vstart + rel + 1;
                decode_entities(&input[vstart..vstart + rel])
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                debug_assert!(input.is_char_boundary(k));
                decode_entities(&input[vstart..k])
            };

            if attributes.iter().any(|(n, _)| n == attribute_name) {
                return Err(self.error(ParseErrorCode::DuplicateAttribute, name_start));
            }
            attributes.push((attribute_name.to_string(), value));
        }

        self.pos = k;
        Ok(Token::StartTag {
            name,
            attributes,
            self_closing,
        })
    }

    fn next_token(&mut self) -> Option<Result<Token, ParseError>> {
        let input = self.input;
        let bytes = input.as_bytes();
        if self.failed || self.pos >= bytes.len() {
            return None;
        }

        if bytes[self.pos] != b'<' {
            let start = self.pos;
            let end = memchr(b'<', &bytes[start..]).map_or(bytes.len(), |rel| start + rel);
            self.pos = end;
            return Some(Ok(Token::Text(decode_entities(&input[start..end]))));
        }

        let rest = &input[self.pos..];
        let token = if rest.starts_with(COMMENT_START) {
            self.delimited(COMMENT_START, COMMENT_END)
                .map(|body| Token::Comment(body.to_string()))
        } else if rest.starts_with(CDATA_START) {
            self.delimited(CDATA_START, CDATA_END)
                .map(|body| Token::Text(body.to_string()))
        } else if rest.starts_with(PI_START) {
            self.delimited(PI_START, PI_END).map(|body| {
                let is_declaration = body
                    .get(..3)
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml"))
                    && body[3..].chars().next().is_none_or(char::is_whitespace);
                if is_declaration {
                    Token::XmlDeclaration(body.to_string())
                } else {
                    Token::ProcessingInstruction(body.to_string())
                }
            })
        } else if starts_with_ignore_ascii_case_at(bytes, self.pos, b"<!doctype") {
            self.doctype()
        } else if rest.starts_with("</") {
            self.end_tag()
        } else {
            self.start_tag()
        };

        if let Ok(token) = &token {
            log::trace!(target: "markup.tokenizer", "token: {token:?}");
        }
        Some(token)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a complete input, stopping at the first error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Tokenizer::new(input).collect()
}
