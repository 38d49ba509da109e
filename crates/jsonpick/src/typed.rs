//! Typed conversions layered on [`extract`].
//!
//! Each `get_*` function extracts once and converts the raw span. The same
//! conversions are available on a [`RawValue`] that was already extracted.
//! Numbers stored as strings (`"42"`) are accepted by the numeric helpers.

use alloc::{borrow::Cow, string::String};
use core::str::FromStr;

use crate::{
    error::{Error, ErrorKind},
    escape,
    extract::{RawValue, extract},
    token::Kind,
};

mod sealed {
    pub trait Sealed {}
}

/// Signed integer types produced by [`get_int`].
pub trait SignedInt: sealed::Sealed + FromStr {}

/// Unsigned integer types produced by [`get_uint`].
pub trait UnsignedInt: sealed::Sealed + FromStr {}

/// Floating-point types produced by [`get_float`].
pub trait FloatValue: sealed::Sealed + FromStr {}

macro_rules! impl_numeric {
    ($trait:ident: $($t:ty),+) => {
        $(
            impl sealed::Sealed for $t {}
            impl $trait for $t {}
        )+
    };
}

impl_numeric!(SignedInt: i8, i16, i32, i64, i128, isize);
impl_numeric!(UnsignedInt: u8, u16, u32, u64, u128, usize);
impl_numeric!(FloatValue: f32, f64);

fn utf8(bytes: Cow<'_, [u8]>) -> Result<Cow<'_, str>, ErrorKind> {
    match bytes {
        Cow::Borrowed(b) => core::str::from_utf8(b)
            .map(Cow::Borrowed)
            .map_err(|_| ErrorKind::InvalidRune),
        Cow::Owned(b) => String::from_utf8(b)
            .map(Cow::Owned)
            .map_err(|_| ErrorKind::InvalidRune),
    }
}

impl<'a> RawValue<'a> {
    fn fail(&self, kind: ErrorKind) -> Error {
        kind.at(self.position)
    }

    /// Numeral text, looking through the quotes of a string.
    fn numeral(&self, allow_float: bool) -> Result<Cow<'a, str>, Error> {
        let bytes = match self.kind {
            Kind::Int => Cow::Borrowed(self.value),
            Kind::Float if allow_float => Cow::Borrowed(self.value),
            Kind::String => escape::unquote(self.value).map_err(|kind| self.fail(kind))?,
            _ => return Err(self.fail(ErrorKind::WrongValueType)),
        };
        utf8(bytes).map_err(|_| self.fail(ErrorKind::InvalidNumber))
    }

    fn parse<T: FromStr>(&self, text: &str) -> Result<T, Error> {
        text.parse()
            .map_err(|_| self.fail(ErrorKind::InvalidNumber))
    }

    /// Converts an int (or a string holding one) to a signed integer.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::WrongValueType`] for other kinds, [`ErrorKind::InvalidNumber`]
    /// if the text does not fit `T`.
    pub fn to_int<T: SignedInt>(&self) -> Result<T, Error> {
        self.parse(&self.numeral(false)?)
    }

    /// Converts an int (or a string holding one) to an unsigned integer.
    ///
    /// # Errors
    ///
    /// Same as [`RawValue::to_int`]; negative numbers are
    /// [`ErrorKind::InvalidNumber`].
    pub fn to_uint<T: UnsignedInt>(&self) -> Result<T, Error> {
        self.parse(&self.numeral(false)?)
    }

    /// Converts an int or a float (or a string holding one) to a float. A
    /// decimal comma is read as a point.
    ///
    /// # Errors
    ///
    /// Same as [`RawValue::to_int`].
    pub fn to_float<T: FloatValue>(&self) -> Result<T, Error> {
        let text = self.numeral(true)?;
        if text.contains(',') {
            self.parse(&text.replace(',', "."))
        } else {
            self.parse(&text)
        }
    }

    /// Converts a bool.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::WrongValueType`] for other kinds.
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self.kind {
            Kind::Bool => Ok(self.value.first() == Some(&b't')),
            _ => Err(self.fail(ErrorKind::WrongValueType)),
        }
    }

    /// Resolves a string's escapes and strips its quotes. Borrows when the
    /// string has no escapes.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::WrongValueType`] for other kinds.
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>, Error> {
        match self.kind {
            Kind::String => escape::unquote(self.value).map_err(|kind| self.fail(kind)),
            _ => Err(self.fail(ErrorKind::WrongValueType)),
        }
    }

    /// Like [`RawValue::to_bytes`], then checks the result is UTF-8.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::WrongValueType`] for other kinds, [`ErrorKind::InvalidRune`]
    /// when `\x` or octal escapes leave invalid UTF-8 behind.
    pub fn to_str(&self) -> Result<Cow<'a, str>, Error> {
        utf8(self.to_bytes()?).map_err(|kind| self.fail(kind))
    }
}

/// Extracts the value at `path` as a signed integer.
///
/// ```rust
/// let n: i32 = jsonpick::get_int(br#"{"n": -42, "s": "7"}"#, &["n"]).unwrap();
/// assert_eq!(n, -42);
/// let s: i8 = jsonpick::get_int(br#"{"n": -42, "s": "7"}"#, &["s"]).unwrap();
/// assert_eq!(s, 7);
/// ```
///
/// # Errors
///
/// Extraction errors, then see [`RawValue::to_int`].
pub fn get_int<T: SignedInt>(data: &[u8], path: &[&str]) -> Result<T, Error> {
    extract(data, path)?.to_int()
}

/// Extracts the value at `path` as an unsigned integer.
///
/// # Errors
///
/// Extraction errors, then see [`RawValue::to_uint`].
pub fn get_uint<T: UnsignedInt>(data: &[u8], path: &[&str]) -> Result<T, Error> {
    extract(data, path)?.to_uint()
}

/// Extracts the value at `path` as a float.
///
/// # Errors
///
/// Extraction errors, then see [`RawValue::to_float`].
pub fn get_float<T: FloatValue>(data: &[u8], path: &[&str]) -> Result<T, Error> {
    extract(data, path)?.to_float()
}

/// Extracts the value at `path` as a bool.
///
/// # Errors
///
/// Extraction errors, then see [`RawValue::to_bool`].
pub fn get_bool(data: &[u8], path: &[&str]) -> Result<bool, Error> {
    extract(data, path)?.to_bool()
}

/// Extracts the string at `path` with its escapes resolved, as bytes.
///
/// # Errors
///
/// Extraction errors, then see [`RawValue::to_bytes`].
pub fn get_bytes<'a>(data: &'a [u8], path: &[&str]) -> Result<Cow<'a, [u8]>, Error> {
    extract(data, path)?.to_bytes()
}

/// Extracts the string at `path` with its escapes resolved.
///
/// ```rust
/// use std::borrow::Cow;
///
/// let doc = br#"{"plain": "hello world", "escaped": "tab\there"}"#;
/// assert!(matches!(jsonpick::get_string(doc, &["plain"]), Ok(Cow::Borrowed("hello world"))));
/// assert_eq!(jsonpick::get_string(doc, &["escaped"]).unwrap(), "tab\there");
/// ```
///
/// # Errors
///
/// Extraction errors, then see [`RawValue::to_str`].
pub fn get_string<'a>(data: &'a [u8], path: &[&str]) -> Result<Cow<'a, str>, Error> {
    extract(data, path)?.to_str()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use alloc::vec;

    use super::*;
    use crate::token::Position;

    #[test]
    fn parses_every_integer_width() {
        let data = b"123";
        assert_eq!(get_int::<isize>(data, &[]).unwrap(), 123);
        assert_eq!(get_int::<i8>(data, &[]).unwrap(), 123i8);
        assert_eq!(get_int::<i16>(data, &[]).unwrap(), 123i16);
        assert_eq!(get_int::<i32>(data, &[]).unwrap(), 123i32);
        assert_eq!(get_int::<i64>(data, &[]).unwrap(), 123i64);
        assert_eq!(get_int::<i128>(data, &[]).unwrap(), 123i128);
        assert_eq!(get_uint::<usize>(data, &[]).unwrap(), 123);
        assert_eq!(get_uint::<u8>(data, &[]).unwrap(), 123u8);
        assert_eq!(get_uint::<u16>(data, &[]).unwrap(), 123u16);
        assert_eq!(get_uint::<u32>(data, &[]).unwrap(), 123u32);
        assert_eq!(get_uint::<u64>(data, &[]).unwrap(), 123u64);
        assert_eq!(get_uint::<u128>(data, &[]).unwrap(), 123u128);
    }

    #[test]
    fn integer_out_of_range() {
        let err = get_int::<i8>(b" 300", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
        assert_eq!(err.position(), Position::new(1, 1));
        assert_eq!(
            get_uint::<u32>(b"-1", &[]).unwrap_err().kind(),
            ErrorKind::InvalidNumber
        );
    }

    #[test]
    fn numeric_strings_are_unwrapped() {
        let data = br#"{"i": "-17", "f": "2,5", "bad": "x1"}"#;
        assert_eq!(get_int::<i64>(data, &["i"]).unwrap(), -17);
        assert_eq!(get_float::<f64>(data, &["f"]).unwrap(), 2.5);
        assert_eq!(
            get_int::<i64>(data, &["bad"]).unwrap_err().kind(),
            ErrorKind::InvalidNumber
        );
    }

    #[test]
    fn parses_floats() {
        assert_eq!(get_float::<f32>(b"123.123", &[]).unwrap(), 123.123f32);
        assert_eq!(get_float::<f64>(b"123.123", &[]).unwrap(), 123.123f64);
        assert_eq!(get_float::<f64>(b"-123,56", &[]).unwrap(), -123.56);
        assert_eq!(get_float::<f64>(b"7", &[]).unwrap(), 7.0);
        assert_eq!(get_float::<f64>(b"-.5", &[]).unwrap(), -0.5);
        assert_eq!(get_float::<f64>(b"-,25", &[]).unwrap(), -0.25);
        assert_eq!(get_float::<f64>(b"1.", &[]).unwrap(), 1.0);
    }

    #[test]
    fn int_helpers_reject_floats() {
        let err = get_int::<i64>(b"[1.5]", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongValueType);
        let err = get_int::<i64>(br#"{"a": 1.5}"#, &["a"]).unwrap_err();
        assert_eq!(err.position(), Position::new(6, 6));
    }

    #[test]
    fn parses_bools() {
        assert!(get_bool(b"true", &[]).unwrap());
        assert!(!get_bool(b"false", &[]).unwrap());
        assert_eq!(
            get_bool(b"\"true\"", &[]).unwrap_err().kind(),
            ErrorKind::WrongValueType
        );
        assert_eq!(get_bool(b"1", &[]).unwrap_err().kind(), ErrorKind::WrongValueType);
    }

    #[test]
    fn parses_strings() {
        let data = br#"   "hello world"    "#;
        let value = get_string(data, &[]).unwrap();
        assert!(matches!(value, Cow::Borrowed("hello world")));

        let data = b"{\"k\": \"a\\u263Ab\\101\\n\"}";
        assert_eq!(get_string(data, &["k"]).unwrap(), "a\u{263A}bA\n");

        assert_eq!(
            get_string(b"{}", &[]).unwrap_err().kind(),
            ErrorKind::WrongValueType
        );
    }

    #[test]
    fn high_byte_escapes_are_bytes_not_text() {
        let data = b"\"\\xFF\\377\"";
        assert_eq!(get_bytes(data, &[]).unwrap().into_owned(), vec![0xFF, 0xFF]);
        assert_eq!(
            get_string(data, &[]).unwrap_err().kind(),
            ErrorKind::InvalidRune
        );
    }

    #[test]
    fn extraction_errors_pass_through() {
        assert_eq!(get_int::<i32>(b"", &[]).unwrap_err().kind(), ErrorKind::EmptyInput);
        assert_eq!(
            get_bool(br#"{"a": true}"#, &["b"]).unwrap_err().kind(),
            ErrorKind::WrongPath
        );
    }
}
