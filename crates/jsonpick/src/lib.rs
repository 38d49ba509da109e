//! A zero-copy JSON tokenizer and value extractor.
//!
//! Given a byte buffer holding a JSON document and an optional path of object
//! keys, `jsonpick` returns the exact byte span of the addressed value. No
//! document tree is built and the input is never copied: every returned value
//! is a sub-slice of the caller's buffer.
//!
//! ```rust
//! use jsonpick::{Kind, get_raw_value};
//!
//! let doc = br#"{"user": {"name": "ann", "tags": [1, 2]}, "ok": true}"#;
//!
//! let (kind, span) = get_raw_value(doc, &["user", "tags"]).unwrap();
//! assert_eq!(kind, Kind::Array);
//! assert_eq!(span, b"[1, 2]");
//!
//! let (kind, span) = get_raw_value(doc, &["ok"]).unwrap();
//! assert_eq!(kind, Kind::Bool);
//! assert_eq!(span, b"true");
//! ```
//!
//! The accepted grammar is deliberately looser than RFC 8259: a decimal comma
//! is accepted in numerals, a separator may directly follow the sign or end
//! the numeral (`-.5`, `1.`) and strings may use `\x`, octal, `\a`, `\v` and `\U`
//! escapes. See [`ExtractOptions`] to narrow it.
//!
//! In one respect the grammar is narrower: objects and arrays nested deeper
//! than [`ExtractOptions::max_depth`] (512 by default) fail with
//! [`ErrorKind::DepthLimitExceeded`], even when the document is otherwise
//! well-formed.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)*) => {
        log::trace!($($arg)*)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

mod error;
mod escape;
mod extract;
mod options;
mod scanner;
mod token;
mod typed;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorKind};
pub use escape::{Escaped, Piece, Pieces, key_matches, unquote};
pub use extract::{Extractor, RawValue, extract, get_raw_value};
pub use options::ExtractOptions;
pub use scanner::{Lexed, Scanner};
pub use token::{Kind, Position, Token};
pub use typed::{
    FloatValue, SignedInt, UnsignedInt, get_bool, get_bytes, get_float, get_int, get_string,
    get_uint,
};
