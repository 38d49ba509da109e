//! Backslash escapes inside quoted strings.
//!
//! The grammar is wider than JSON's: besides `\" \\ \b \f \n \r \t` and
//! four-digit `\u`, it accepts `\a`, `\v`, two-digit hex `\x`, eight-digit
//! `\U` and three-digit octal `\0`..`\377`. The scanner only validates escapes
//! and measures them; resolving them is left to [`unquote`] and
//! [`key_matches`], which borrow from the source whenever they can.

use alloc::{borrow::Cow, vec::Vec};

use crate::error::ErrorKind;

/// The value an escape sequence stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped {
    /// A Unicode scalar value (single-character escapes, `\u`, `\U`).
    Char(char),
    /// A raw byte (`\x` and octal escapes). May not be valid UTF-8 on its own.
    Byte(u8),
}

impl Escaped {
    /// Writes the resolved bytes into `buf` and returns them.
    pub fn encode(self, buf: &mut [u8; 4]) -> &[u8] {
        match self {
            Self::Char(ch) => ch.encode_utf8(buf).as_bytes(),
            Self::Byte(b) => {
                buf[0] = b;
                &buf[..1]
            }
        }
    }
}

/// Decodes the escape that follows a backslash.
///
/// `input` starts right after the `\`. Returns the escaped value and the
/// number of bytes it occupies in `input` (the backslash not included).
pub(crate) fn decode(input: &[u8]) -> Result<(Escaped, usize), ErrorKind> {
    let Some(&c) = input.first() else {
        return Err(ErrorKind::Unexpected);
    };
    let simple = |ch: char| -> Result<(Escaped, usize), ErrorKind> {
        Ok((Escaped::Char(ch), 1))
    };
    match c {
        b'a' => simple('\x07'),
        b'b' => simple('\x08'),
        b'f' => simple('\x0C'),
        b'n' => simple('\n'),
        b'r' => simple('\r'),
        b't' => simple('\t'),
        b'v' => simple('\x0B'),
        b'\\' => simple('\\'),
        b'"' => simple('"'),
        b'x' => {
            let v = hex(&input[1..], 2)?;
            let byte = u8::try_from(v).map_err(|_| ErrorKind::Unexpected)?;
            Ok((Escaped::Byte(byte), 3))
        }
        b'u' | b'U' => {
            let n = if c == b'u' { 4 } else { 8 };
            let v = hex(&input[1..], n)?;
            let ch = char::from_u32(v).ok_or(ErrorKind::InvalidRune)?;
            Ok((Escaped::Char(ch), 1 + n))
        }
        b'0'..=b'7' => {
            let mut v = u32::from(c - b'0');
            for j in 1..3 {
                match input.get(j) {
                    Some(&d @ b'0'..=b'7') => v = (v << 3) | u32::from(d - b'0'),
                    _ => return Err(ErrorKind::Unexpected),
                }
            }
            let byte = u8::try_from(v).map_err(|_| ErrorKind::Unexpected)?;
            Ok((Escaped::Byte(byte), 3))
        }
        b'\'' => Err(ErrorKind::WrongQuote),
        _ => Err(ErrorKind::Unexpected),
    }
}

fn hex(input: &[u8], n: usize) -> Result<u32, ErrorKind> {
    let digits = input.get(..n).ok_or(ErrorKind::Unexpected)?;
    digits.iter().try_fold(0u32, |acc, &d| {
        char::from(d)
            .to_digit(16)
            .map(|x| (acc << 4) | x)
            .ok_or(ErrorKind::Unexpected)
    })
}

/// A piece of string content: either a run of literal source bytes or one
/// resolved escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// Source bytes without backslashes, borrowed as written.
    Literal(&'a [u8]),
    /// One escape sequence.
    Escaped(Escaped),
}

/// Iterator over the [`Piece`]s of a quoted string's content.
#[derive(Debug, Clone)]
pub struct Pieces<'a> {
    rest: &'a [u8],
}

impl<'a> Pieces<'a> {
    /// Splits a quoted string span (quotes included) into pieces.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Unexpected`] if `quoted` is not wrapped in double quotes.
    pub fn new(quoted: &'a [u8]) -> Result<Self, ErrorKind> {
        let rest = quoted
            .strip_prefix(b"\"")
            .and_then(|q| q.strip_suffix(b"\""))
            .ok_or(ErrorKind::Unexpected)?;
        Ok(Self { rest })
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Result<Piece<'a>, ErrorKind>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.iter().position(|&b| b == b'\\') {
            Some(0) => match decode(&self.rest[1..]) {
                Ok((escaped, width)) => {
                    self.rest = &self.rest[1 + width..];
                    Some(Ok(Piece::Escaped(escaped)))
                }
                Err(kind) => {
                    self.rest = &[];
                    Some(Err(kind))
                }
            },
            Some(end) => {
                let (literal, rest) = self.rest.split_at(end);
                self.rest = rest;
                Some(Ok(Piece::Literal(literal)))
            }
            None => {
                let literal = core::mem::take(&mut self.rest);
                Some(Ok(Piece::Literal(literal)))
            }
        }
    }
}

/// Resolves the escapes of a quoted string span and strips its quotes.
///
/// Borrows from `quoted` when the content has no escapes. The result may not
/// be valid UTF-8 when `\x` or octal escapes produce high bytes.
///
/// # Errors
///
/// The same [`ErrorKind`]s the scanner reports for a malformed escape, or
/// [`ErrorKind::Unexpected`] if `quoted` is not wrapped in double quotes.
pub fn unquote(quoted: &[u8]) -> Result<Cow<'_, [u8]>, ErrorKind> {
    let mut pieces = Pieces::new(quoted)?;
    let first = match pieces.next().transpose()? {
        None => return Ok(Cow::Borrowed(&quoted[1..1])),
        Some(first) => first,
    };
    if let (Piece::Literal(literal), true) = (first, pieces.rest.is_empty()) {
        return Ok(Cow::Borrowed(literal));
    }
    let mut out = Vec::with_capacity(quoted.len());
    let mut buf = [0u8; 4];
    for piece in core::iter::once(Ok(first)).chain(pieces) {
        match piece? {
            Piece::Literal(literal) => out.extend_from_slice(literal),
            Piece::Escaped(escaped) => out.extend_from_slice(escaped.encode(&mut buf)),
        }
    }
    Ok(Cow::Owned(out))
}

/// Compares the resolved content of a quoted string span with `key` without
/// allocating.
///
/// # Errors
///
/// Same as [`unquote`].
pub fn key_matches(quoted: &[u8], key: &[u8]) -> Result<bool, ErrorKind> {
    let mut expected = key;
    let mut buf = [0u8; 4];
    for piece in Pieces::new(quoted)? {
        let bytes = match piece? {
            Piece::Literal(literal) => literal,
            Piece::Escaped(escaped) => escaped.encode(&mut buf),
        };
        match expected.strip_prefix(bytes) {
            Some(rest) => expected = rest,
            None => return Ok(false),
        }
    }
    Ok(expected.is_empty())
}
