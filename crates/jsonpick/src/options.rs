/// Configuration for the [`Scanner`](crate::Scanner) and the
/// [`Extractor`](crate::Extractor).
///
/// The defaults accept the permissive grammar: any Unicode whitespace between
/// tokens and a decimal comma in numerals.
///
/// # Examples
///
/// ```rust
/// use jsonpick::{ExtractOptions, Extractor, Kind};
///
/// let options = ExtractOptions {
///     allow_decimal_comma: false,
///     ..Default::default()
/// };
/// let raw = Extractor::with_options(b"[1,2]", options).extract(&[]).unwrap();
/// assert_eq!(raw.kind, Kind::Array);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Whether any code point with the Unicode `White_Space` property separates
    /// tokens. When `false`, only space, tab, line feed and carriage return do.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_unicode_whitespace: bool,

    /// Whether `,` followed by a digit is read as a decimal separator, so that
    /// `-123,56` scans as one float.
    ///
    /// A comma that is not directly followed by a digit, or that follows an
    /// earlier separator, always ends the numeral. Note that with this on,
    /// `[1,2]` holds the single float `1,2`.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_decimal_comma: bool,

    /// Maximum nesting of objects and arrays while delimiting a value.
    ///
    /// # Default
    ///
    /// `512`
    pub max_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: true,
            allow_decimal_comma: true,
            max_depth: 512,
        }
    }
}
