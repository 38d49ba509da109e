//! Scanner: turns a byte slice into lexical units, one at a time.
//!
//! What it does
//! - Skips whitespace, classifies the next rune and consumes exactly one
//!   token: punctuation, a `true`/`false` literal, a numeral run or a quoted
//!   string.
//! - Hands out every scalar token as a borrowed, unmodified slice of the input
//!   (quotes included for strings). Escapes are validated and measured but
//!   never resolved here.
//! - Keeps a single pending token so callers can peek before consuming.
//!
//! Positions
//! - `pos` advances by one per rune consumed, whitespace included. An escape
//!   sequence is one rune.
//! - `byte_pos` advances by the exact number of source bytes consumed.
//!
//! Invariants
//! - The cursor only moves forward. Peeking scans ahead once and parks the
//!   result in `pending`; it never rewinds.
//! - Errors are positioned at the rune where scanning stopped.

use crate::{
    error::{Error, ErrorKind},
    escape,
    options::ExtractOptions,
    token::{Kind, Position, Token},
};

/// A token together with its *preceding slice*: the remaining input starting
/// at the token's first byte.
///
/// The preceding slice of an opening bracket, truncated to its closing
/// bracket, is the span of the whole composite.
pub type Lexed<'a> = (Token<'a>, &'a [u8]);

/// A lexical scanner over a JSON byte buffer with one token of lookahead.
///
/// ```rust
/// use jsonpick::{Kind, Scanner};
///
/// let mut scanner = Scanner::new(b"[ true ]");
/// let (open, _) = scanner.next_token().unwrap();
/// assert_eq!(open.kind, Kind::OpenBracket);
///
/// let (peeked, _) = scanner.peek().unwrap();
/// let (consumed, _) = scanner.next_token().unwrap();
/// assert_eq!(peeked, consumed);
/// assert_eq!(consumed.value, b"true");
/// assert_eq!(consumed.position.pos, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a [u8],
    position: Position,
    options: ExtractOptions,
    pending: Option<Lexed<'a>>,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with default options.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ExtractOptions::default())
    }

    /// Creates a scanner with the given options.
    #[must_use]
    pub fn with_options(data: &'a [u8], options: ExtractOptions) -> Self {
        Self {
            rest: data,
            position: Position::default(),
            options,
            pending: None,
            done: false,
        }
    }

    /// Position of the cursor. A peeked token has already been scanned past.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Input not yet scanned. A peeked token is no longer part of it.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }

    /// Scans the next token without consuming it.
    ///
    /// Repeated peeks return the same token until [`next_token`] takes it.
    ///
    /// # Errors
    ///
    /// Same as [`next_token`].
    ///
    /// [`next_token`]: Scanner::next_token
    pub fn peek(&mut self) -> Result<Lexed<'a>, Error> {
        if let Some(lexed) = self.pending {
            return Ok(lexed);
        }
        let lexed = self.scan()?;
        self.pending = Some(lexed);
        Ok(lexed)
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Unexpected`] at end of input, on a rune no token can
    ///   start with, a misspelled literal, a numeral without digits or with a
    ///   second separator, an unterminated string, or a malformed escape.
    /// - [`ErrorKind::InvalidRune`] on bytes that are not UTF-8 and on `\u`
    ///   or `\U` escapes outside the Unicode scalar values.
    /// - [`ErrorKind::WrongQuote`] on an escaped single quote.
    pub fn next_token(&mut self) -> Result<Lexed<'a>, Error> {
        match self.pending.take() {
            Some(lexed) => Ok(lexed),
            None => self.scan(),
        }
    }

    fn scan(&mut self) -> Result<Lexed<'a>, Error> {
        self.skip_whitespace()?;
        let before = self.rest;
        let start = self.position;
        let Some(&first) = before.first() else {
            return Err(ErrorKind::Unexpected.at(start));
        };

        let kind = if let Some(kind) = Kind::punctuation(first) {
            self.advance(1, 1);
            kind
        } else {
            match first {
                b't' => {
                    self.expect_literal(b"true")?;
                    Kind::Bool
                }
                b'f' => {
                    self.expect_literal(b"false")?;
                    Kind::Bool
                }
                b'-' | b'0'..=b'9' => self.scan_numeral()?,
                b'"' => {
                    self.scan_string()?;
                    Kind::String
                }
                _ => return Err(self.unexpected_at(0)),
            }
        };

        let len = before.len() - self.rest.len();
        let value = if kind.is_scalar() {
            &before[..len]
        } else {
            &before[..0]
        };
        Ok((
            Token {
                kind,
                value,
                position: start,
            },
            before,
        ))
    }

    #[inline]
    fn advance(&mut self, bytes: usize, runes: usize) {
        self.rest = &self.rest[bytes..];
        self.position = self.position.advanced(runes, bytes);
    }

    /// Error for the rune `offset` ASCII bytes past the cursor: `InvalidRune`
    /// if it does not decode, `Unexpected` otherwise (end of input included).
    fn unexpected_at(&self, offset: usize) -> Error {
        let at = self.position.advanced(offset, offset);
        match self.rest.get(offset..) {
            Some(tail) if tail.first().is_some_and(|&b| b >= 0x80) => {
                match bstr::decode_utf8(tail) {
                    (Some(_), _) => ErrorKind::Unexpected.at(at),
                    (None, _) => ErrorKind::InvalidRune.at(at),
                }
            }
            _ => ErrorKind::Unexpected.at(at),
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), Error> {
        while let Some(&b) = self.rest.first() {
            if b < 0x80 {
                let space = if self.options.allow_unicode_whitespace {
                    char::from(b).is_whitespace()
                } else {
                    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
                };
                if !space {
                    break;
                }
                self.advance(1, 1);
                continue;
            }
            match bstr::decode_utf8(self.rest) {
                (None, _) => return Err(ErrorKind::InvalidRune.at(self.position)),
                (Some(ch), size) if self.options.allow_unicode_whitespace && ch.is_whitespace() => {
                    self.advance(size, 1);
                }
                (Some(_), _) => break,
            }
        }
        Ok(())
    }

    fn expect_literal(&mut self, literal: &[u8]) -> Result<(), Error> {
        match literal
            .iter()
            .zip(self.rest)
            .position(|(expected, actual)| expected != actual)
        {
            Some(offset) => Err(self.unexpected_at(offset)),
            None if self.rest.len() < literal.len() => Err(self.unexpected_at(self.rest.len())),
            None => {
                self.advance(literal.len(), literal.len());
                Ok(())
            }
        }
    }

    /// Scans a numeral: an optional `-`, then digits with at most one `.` or
    /// `,` anywhere among them, and reports whether a separator was seen.
    ///
    /// `-.5`, `-,5` and a trailing `1.` at end of input are accepted; only a
    /// run without any digit is rejected.
    fn scan_numeral(&mut self) -> Result<Kind, Error> {
        let bytes = self.rest;
        let mut i = usize::from(bytes[0] == b'-');
        let mut digits = 0usize;
        let mut separator = false;
        let digit_at = |j: usize| bytes.get(j).is_some_and(u8::is_ascii_digit);

        while let Some(&b) = bytes.get(i) {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' => {
                    if separator {
                        return Err(self.unexpected_at(i));
                    }
                    if bytes.get(i + 1).is_some() && !digit_at(i + 1) {
                        return Err(self.unexpected_at(i + 1));
                    }
                    separator = true;
                }
                // A comma not followed by a digit is structural.
                b',' if self.options.allow_decimal_comma && !separator && digit_at(i + 1) => {
                    separator = true;
                }
                _ => break,
            }
            i += 1;
        }

        if digits == 0 {
            return Err(self.unexpected_at(i));
        }
        self.advance(i, i);
        Ok(if separator { Kind::Float } else { Kind::Int })
    }

    fn scan_string(&mut self) -> Result<(), Error> {
        // opening quote
        self.advance(1, 1);
        loop {
            match self.rest.first() {
                None => return Err(ErrorKind::Unexpected.at(self.position)),
                Some(b'"') => {
                    self.advance(1, 1);
                    return Ok(());
                }
                Some(_) => self.scan_char()?,
            }
        }
    }

    /// Consumes one logical character of string content.
    fn scan_char(&mut self) -> Result<(), Error> {
        match self.rest[0] {
            c if c >= 0x80 => match bstr::decode_utf8(self.rest) {
                (Some(_), size) => self.advance(size, 1),
                (None, _) => return Err(ErrorKind::InvalidRune.at(self.position)),
            },
            b'\\' => {
                let (_, width) =
                    escape::decode(&self.rest[1..]).map_err(|kind| kind.at(self.position))?;
                self.advance(1 + width, 1);
            }
            _ => self.advance(1, 1),
        }
        Ok(())
    }
}

/// Yields tokens until the input holds only whitespace. Stops after the first
/// error.
impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.pending.is_none() {
            if let Err(err) = self.skip_whitespace() {
                self.done = true;
                return Some(Err(err));
            }
            if self.rest.is_empty() {
                self.done = true;
                return None;
            }
        }
        let next = self.next_token().map(|(token, _)| token);
        self.done = next.is_err();
        Some(next)
    }
}
