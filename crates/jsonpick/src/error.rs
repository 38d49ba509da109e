use thiserror::Error;

use crate::token::Position;

/// The reason an extraction failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input buffer has zero length.
    #[error("JSON is empty")]
    EmptyInput,
    /// A character, literal or end of input did not fit the grammar.
    #[error("unexpected symbol or end of JSON")]
    Unexpected,
    /// Bytes that do not decode to a Unicode scalar value, or an escape
    /// naming an invalid code point.
    #[error("cannot parse next rune")]
    InvalidRune,
    /// A backslash-escaped single quote.
    #[error("wrong quotation")]
    WrongQuote,
    /// A path segment was not found among an object's fields.
    #[error("wrong path")]
    WrongPath,
    /// A well-formed token of the wrong kind for its position.
    #[error("unexpected lexeme")]
    UnexpectedLexeme,
    /// A typed conversion was asked for a value of another kind.
    #[error("wrong value type")]
    WrongValueType,
    /// A numeral does not fit the requested numeric type.
    #[error("invalid number")]
    InvalidNumber,
    /// Objects and arrays are nested deeper than
    /// [`ExtractOptions::max_depth`](crate::ExtractOptions::max_depth).
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
}

impl ErrorKind {
    /// Attaches a position to this kind.
    #[must_use]
    pub const fn at(self, position: Position) -> Error {
        Error {
            kind: self,
            position,
        }
    }
}

/// An extraction error together with where in the input it was detected.
///
/// Rendered as `Pos: <rune position>. Error: <message>`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("Pos: {}. Error: {kind}", .position.pos)]
pub struct Error {
    kind: ErrorKind,
    position: Position,
}

impl Error {
    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where it went wrong, in both coordinate systems.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Rune index of the failure.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.position.pos
    }

    /// Byte offset of the failure.
    #[must_use]
    pub const fn byte_pos(&self) -> usize {
        self.position.byte_pos
    }
}
