//! Path expressions: the dot/bracket notation used for flattened keys.
//!
//! A path is a sequence of [`Segment`]s. Rendering follows Jinja2 attribute
//! and subscript syntax so that a rendered path can be pasted straight into
//! a template expression:
//!
//! | Segment                   | Rendered            |
//! |---------------------------|---------------------|
//! | first key                 | `name` (verbatim)   |
//! | identifier key            | `.name`             |
//! | any other key             | `['auto-negotiate']`|
//! | sequence index            | `[0]`               |

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex"));

/// Returns true if `key` can be rendered as a bare `.key` segment.
pub fn is_identifier(key: &str) -> bool {
    IDENTIFIER.is_match(key)
}

/// One step of a path into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl Segment {
    /// Append this segment's rendering to `out`.
    ///
    /// `first` marks the segment that starts the path; a first key is written
    /// verbatim, without a leading dot or brackets.
    pub fn write_to(&self, out: &mut String, first: bool) {
        match self {
            Segment::Key(key) => write_key(out, key, first),
            Segment::Index(index) => write_index(out, *index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Append `key` to `out`: verbatim when it starts the path, as `.key` when it
/// is an identifier, otherwise as `['key']`.
///
/// Inside brackets `'` and `\` are backslash-escaped, so `it's` renders as
/// `['it\'s']` rather than the unparseable `['it's']`.
pub(crate) fn write_key(out: &mut String, key: &str, first: bool) {
    if first {
        out.push_str(key);
    } else if is_identifier(key) {
        out.push('.');
        out.push_str(key);
    } else {
        out.push_str("['");
        for c in key.chars() {
            if c == '\'' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push_str("']");
    }
}

pub(crate) fn write_index(out: &mut String, index: usize) {
    out.push('[');
    out.push_str(&index.to_string());
    out.push(']');
}

/// A parsed path expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Return a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// The segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Whether this path addresses the root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse a rendered path expression.
    ///
    /// Accepts a leading bare name, `.name`, `[0]`, `['quoted']` and
    /// `["quoted"]`. Inside quotes a backslash escapes the next character.
    /// The empty string parses to the root path.
    pub fn parse(input: &str) -> Result<Self> {
        Parser { input, pos: 0 }.parse()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for segment in &self.segments {
            // Empty leading keys write nothing, so the next key still starts the path.
            let first = out.is_empty();
            segment.write_to(&mut out, first);
        }
        f.write_str(&out)
    }
}

impl std::str::FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse(mut self) -> Result<Path> {
        let mut segments = Vec::new();

        if !matches!(self.peek(), None | Some(b'.') | Some(b'[')) {
            segments.push(Segment::Key(self.name().to_string()));
        }

        while let Some(byte) = self.peek() {
            match byte {
                b'.' => {
                    self.pos += 1;
                    let name = self.name();
                    if name.is_empty() {
                        return Err(self.error("expected a key after '.'"));
                    }
                    segments.push(Segment::Key(name.to_string()));
                }
                b'[' => {
                    self.pos += 1;
                    let segment = match self.peek() {
                        Some(quote @ (b'\'' | b'"')) => self.quoted(quote)?,
                        Some(b'0'..=b'9') => self.index()?,
                        _ => return Err(self.error("expected an index or a quoted key")),
                    };
                    if self.peek() != Some(b']') {
                        return Err(self.error("expected ']'"));
                    }
                    self.pos += 1;
                    segments.push(segment);
                }
                _ => return Err(self.error("expected '.' or '['")),
            }
        }

        Ok(Path { segments })
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn name(&mut self) -> &'a str {
        let input = self.input;
        let rest = &input[self.pos..];
        let len = rest.find(['.', '[']).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn index(&mut self) -> Result<Segment> {
        let input = self.input;
        let rest = &input[self.pos..];
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let index = rest[..len]
            .parse::<usize>()
            .map_err(|e| self.error(&format!("invalid index: {}", e)))?;
        self.pos += len;
        Ok(Segment::Index(index))
    }

    fn quoted(&mut self, quote: u8) -> Result<Segment> {
        let start = self.pos;
        self.pos += 1;
        let mut key = String::new();
        let mut escaped = false;
        let input = self.input;

        for (offset, c) in input[self.pos..].char_indices() {
            if escaped {
                key.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote as char {
                self.pos += offset + 1;
                return Ok(Segment::Key(key));
            } else {
                key.push(c);
            }
        }

        self.pos = start;
        Err(self.error("unterminated quoted key"))
    }

    fn error(&self, message: &str) -> Error {
        Error::invalid_path(self.input, self.pos, message)
    }
}
