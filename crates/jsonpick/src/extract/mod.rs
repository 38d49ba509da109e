//! Extractor: finds a value by key path and delimits its span.
//!
//! Overview
//! - Path-skip descends one object per path segment. Fields are visited in
//!   source order; a key is compared after resolving its escapes, and the value
//!   of every non-matching field is delimited (and so fully validated) before
//!   moving on.
//! - Delimiting a value pulls tokens from the [`Scanner`], recursing into
//!   nested objects and arrays. A scalar's span is its token; a composite's
//!   span runs from the opening bracket through the matching closing bracket,
//!   interior whitespace included.
//! - Anything after the extracted value is never scanned.

use crate::{
    error::{Error, ErrorKind},
    escape,
    options::ExtractOptions,
    scanner::Scanner,
    token::{Kind, Position, Token},
};

/// A delimited value: its type tag, its span in the original input and where
/// that span starts.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawValue<'a> {
    /// One of the value kinds: string, int, float, bool, object or array.
    pub kind: Kind,
    /// The exact source text of the value, borrowed from the input.
    pub value: &'a [u8],
    /// Position of the first byte of `value`.
    pub position: Position,
}

impl<'a> From<Token<'a>> for RawValue<'a> {
    fn from(token: Token<'a>) -> Self {
        Self {
            kind: token.kind,
            value: token.value,
            position: token.position,
        }
    }
}

/// Extracts one value from a JSON buffer.
///
/// An extractor is single-use: [`Extractor::extract`] consumes it.
#[derive(Debug, Clone)]
pub struct Extractor<'a> {
    data: &'a [u8],
    scanner: Scanner<'a>,
    max_depth: usize,
    depth: usize,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor with default options.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, ExtractOptions::default())
    }

    /// Creates an extractor with the given options.
    #[must_use]
    pub fn with_options(data: &'a [u8], options: ExtractOptions) -> Self {
        Self {
            data,
            scanner: Scanner::with_options(data, options),
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Follows `path` through nested objects and delimits the value found
    /// there. An empty path delimits the top-level value.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::EmptyInput`] if the input has zero length.
    /// - [`ErrorKind::WrongPath`] if a segment is not a key of its object.
    /// - [`ErrorKind::UnexpectedLexeme`] if a token of the wrong kind shows up,
    ///   e.g. a path segment is applied to something other than an object.
    /// - [`ErrorKind::DepthLimitExceeded`] on nesting beyond
    ///   [`ExtractOptions::max_depth`].
    /// - Any scanner error met on the way.
    pub fn extract(mut self, path: &[&str]) -> Result<RawValue<'a>, Error> {
        trace!("extract: {} bytes, path {:?}", self.data.len(), path);
        if self.data.is_empty() {
            return Err(ErrorKind::EmptyInput.at(Position::default()));
        }
        let result = self.skip_path(path).and_then(|()| self.parse_value());
        if let Err(err) = &result {
            trace!("extract failed: {err}");
        }
        result
    }

    fn skip_path(&mut self, path: &[&str]) -> Result<(), Error> {
        for segment in path {
            self.skip_to_field(segment.as_bytes())?;
            trace!("descended into {segment:?} at {:?}", self.scanner.position());
        }
        Ok(())
    }

    /// Consumes an opening brace and the fields before `segment`, leaving the
    /// scanner right after the matching field's colon.
    fn skip_to_field(&mut self, segment: &[u8]) -> Result<(), Error> {
        self.expect(Kind::OpenCurly)?;
        let (mut key, _) = self.scanner.next_token()?;
        if key.kind == Kind::CloseCurly {
            return Err(ErrorKind::WrongPath.at(key.position));
        }
        loop {
            if key.kind != Kind::String {
                return Err(ErrorKind::UnexpectedLexeme.at(key.position));
            }
            self.expect(Kind::Colon)?;
            if escape::key_matches(key.value, segment).map_err(|kind| kind.at(key.position))? {
                return Ok(());
            }
            self.parse_value()?;

            let (token, _) = self.scanner.next_token()?;
            match token.kind {
                Kind::Comma => key = self.scanner.next_token()?.0,
                Kind::CloseCurly => return Err(ErrorKind::WrongPath.at(token.position)),
                _ => return Err(ErrorKind::UnexpectedLexeme.at(token.position)),
            }
        }
    }

    fn expect(&mut self, kind: Kind) -> Result<Token<'a>, Error> {
        let (token, _) = self.scanner.next_token()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ErrorKind::UnexpectedLexeme.at(token.position))
        }
    }

    fn parse_value(&mut self) -> Result<RawValue<'a>, Error> {
        let (token, before) = self.scanner.next_token()?;
        match token.kind {
            Kind::String | Kind::Int | Kind::Float | Kind::Bool => Ok(token.into()),
            Kind::OpenCurly => self.parse_object(token, before),
            Kind::OpenBracket => self.parse_array(token, before),
            _ => Err(ErrorKind::UnexpectedLexeme.at(token.position)),
        }
    }

    /// The opening brace has been consumed.
    fn parse_object(&mut self, open: Token<'a>, before: &'a [u8]) -> Result<RawValue<'a>, Error> {
        self.enter(open)?;
        let (mut key, mut after) = self.scanner.next_token()?;
        if key.kind != Kind::CloseCurly {
            loop {
                if key.kind != Kind::String {
                    return Err(ErrorKind::UnexpectedLexeme.at(key.position));
                }
                self.expect(Kind::Colon)?;
                self.parse_value()?;

                let (token, rest) = self.scanner.next_token()?;
                match token.kind {
                    Kind::Comma => key = self.scanner.next_token()?.0,
                    Kind::CloseCurly => {
                        after = rest;
                        break;
                    }
                    _ => return Err(ErrorKind::UnexpectedLexeme.at(token.position)),
                }
            }
        }
        Ok(self.close(Kind::Object, open, before, after))
    }

    /// The opening bracket has been consumed.
    fn parse_array(&mut self, open: Token<'a>, before: &'a [u8]) -> Result<RawValue<'a>, Error> {
        self.enter(open)?;
        if self.scanner.peek()?.0.kind == Kind::CloseBracket {
            let (_, after) = self.scanner.next_token()?;
            return Ok(self.close(Kind::Array, open, before, after));
        }
        loop {
            self.parse_value()?;
            let (token, after) = self.scanner.next_token()?;
            match token.kind {
                Kind::Comma => {}
                Kind::CloseBracket => return Ok(self.close(Kind::Array, open, before, after)),
                _ => return Err(ErrorKind::UnexpectedLexeme.at(token.position)),
            }
        }
    }

    fn enter(&mut self, open: Token<'a>) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(ErrorKind::DepthLimitExceeded.at(open.position));
        }
        self.depth += 1;
        Ok(())
    }

    /// `before` starts at the opening bracket and `after` at the closing one.
    fn close(
        &mut self,
        kind: Kind,
        open: Token<'a>,
        before: &'a [u8],
        after: &'a [u8],
    ) -> RawValue<'a> {
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(
            after.first().copied(),
            Some(if kind == Kind::Object { b'}' } else { b']' }),
            "Internal error: composite span does not end on its closing bracket"
        );
        self.depth -= 1;
        RawValue {
            kind,
            value: &before[..before.len() - after.len() + 1],
            position: open.position,
        }
    }
}

/// Extracts the value at `path`, returning its kind, span and position.
///
/// # Errors
///
/// See [`Extractor::extract`].
pub fn extract<'a>(data: &'a [u8], path: &[&str]) -> Result<RawValue<'a>, Error> {
    Extractor::new(data).extract(path)
}

/// Returns the kind and the raw span of the value at `path`.
///
/// The span is a sub-slice of `data`; nothing is copied.
///
/// ```rust
/// use jsonpick::{ErrorKind, Kind, get_raw_value};
///
/// let (kind, span) = get_raw_value(b"   123.123    ", &[]).unwrap();
/// assert_eq!((kind, span), (Kind::Float, &b"123.123"[..]));
///
/// let err = get_raw_value(br#"{"x":1,"y":2}"#, &["z"]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::WrongPath);
/// assert_eq!(err.to_string(), "Pos: 12. Error: wrong path");
/// ```
///
/// # Errors
///
/// See [`Extractor::extract`].
pub fn get_raw_value<'a>(data: &'a [u8], path: &[&str]) -> Result<(Kind, &'a [u8]), Error> {
    extract(data, path).map(|raw| (raw.kind, raw.value))
}
