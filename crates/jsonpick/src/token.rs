use core::fmt;

/// The type tag of a lexical unit or of an extracted value.
///
/// Punctuation kinds only come out of the [`Scanner`](crate::Scanner).
/// [`Kind::Object`] and [`Kind::Array`] are never produced by the scanner:
/// they tag a fully delimited composite span returned by the
/// [`Extractor`](crate::Extractor).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `{`
    OpenCurly,
    /// `}`
    CloseCurly,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A quoted string, quotes included in the span.
    String,
    /// A numeral without a decimal separator.
    Int,
    /// A numeral with a decimal separator.
    Float,
    /// `true` or `false`.
    Bool,
    /// A delimited `{ ... }` span.
    Object,
    /// A delimited `[ ... ]` span.
    Array,
}

impl Kind {
    /// Maps a punctuation byte to its kind.
    #[must_use]
    pub const fn punctuation(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Self::OpenCurly),
            b'}' => Some(Self::CloseCurly),
            b'[' => Some(Self::OpenBracket),
            b']' => Some(Self::CloseBracket),
            b':' => Some(Self::Colon),
            b',' => Some(Self::Comma),
            _ => None,
        }
    }

    /// Returns `true` for the kinds that carry a scalar value.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Float | Self::Bool)
    }

    /// Returns `true` for the kinds a complete JSON value can have.
    #[must_use]
    pub const fn is_value(self) -> bool {
        self.is_scalar() || matches!(self, Self::Object | Self::Array)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::OpenCurly => "{",
            Self::CloseCurly => "}",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in the input counted in two coordinate systems.
///
/// `pos` counts runes and `byte_pos` counts raw bytes. They agree on ASCII
/// input without escapes and drift apart on multi-byte runes and escape
/// sequences: a six-byte `\u` escape inside a string adds 1 to `pos` and 6 to
/// `byte_pos`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Rune index.
    pub pos: usize,
    /// Byte offset.
    pub byte_pos: usize,
}

impl Position {
    /// Creates a position from a rune index and a byte offset.
    #[must_use]
    pub const fn new(pos: usize, byte_pos: usize) -> Self {
        Self { pos, byte_pos }
    }

    #[inline]
    pub(crate) const fn advanced(self, runes: usize, bytes: usize) -> Self {
        Self {
            pos: self.pos + runes,
            byte_pos: self.byte_pos + bytes,
        }
    }
}

/// A lexical unit emitted by the [`Scanner`](crate::Scanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What was scanned.
    pub kind: Kind,
    /// The unmodified source text of a scalar (quotes included for strings).
    /// Empty for punctuation.
    pub value: &'a [u8],
    /// Where the token starts.
    pub position: Position,
}
