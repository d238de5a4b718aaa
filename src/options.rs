//! Configuration options for encoding and decoding.
//!
//! This module provides types to customize the codec:
//!
//! - [`EncodeOptions`]: indentation unit, float formatting policy, depth bound
//! - [`DecodeOptions`]: depth bound and duplicate-key policy
//! - [`FloatFormat`]: how `Float` values are rendered
//! - [`DuplicateKeys`]: what the decoder does with a repeated key
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, EncodeOptions, FloatFormat};
//!
//! let value = toon!({ "price": 9.5 });
//!
//! // Fixed two fraction digits
//! let options = EncodeOptions::new().with_float_format(FloatFormat::Decimals(2));
//! assert_eq!(encode_with_options(&value, &options).unwrap(), "price: 9.50");
//!
//! // Four-space indentation for nested blocks
//! let options = EncodeOptions::new().with_indent(4);
//! let text = encode_with_options(&toon!({ "a": { "b": 1 } }), &options).unwrap();
//! assert_eq!(text, "a:\n    b: 1");
//! ```

/// Default bound on container nesting, shared by the encoder and decoder.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Float rendering policy.
///
/// - **Shortest**: default, the shortest text that parses back to the same bits
/// - **Decimals**: a fixed number of fraction digits (at least one)
///
/// # Examples
///
/// ```rust
/// use toon_codec::FloatFormat;
///
/// assert_eq!(FloatFormat::Shortest.format(0.1), "0.1");
/// assert_eq!(FloatFormat::Shortest.format(2.0), "2.0");
/// assert_eq!(FloatFormat::Decimals(3).format(2.0), "2.000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FloatFormat {
    #[default]
    Shortest,
    Decimals(usize),
}

impl FloatFormat {
    /// Renders a finite float under this policy.
    ///
    /// The result always carries a `.` or an exponent so it is never read
    /// back as an integer. Non-finite inputs are the caller's concern (the
    /// encoder writes them as `null`).
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            // `Debug` is the shortest round-trip form and keeps `.0` on
            // integral values, switching to exponent form at the extremes.
            FloatFormat::Shortest => format!("{:?}", value),
            FloatFormat::Decimals(digits) => format!("{:.*}", (*digits).max(1), value),
        }
    }
}

/// Decoder policy for a key that appears twice in one map block.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_with_options, DecodeOptions, DuplicateKeys};
///
/// assert!(toon_codec::decode("a: 1\na: 2").is_err());
///
/// let options = DecodeOptions::new().with_duplicate_keys(DuplicateKeys::LastWins);
/// let value = decode_with_options("a: 1\na: 2", &options).unwrap();
/// assert_eq!(value.get("a").and_then(|v| v.as_i64()), Some(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    #[default]
    Reject,
    LastWins,
}

/// Configuration options for encoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{EncodeOptions, FloatFormat};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_float_format(FloatFormat::Decimals(2))
///     .with_max_depth(16);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub indent: usize,
    pub float_format: FloatFormat,
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            float_format: FloatFormat::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (2-space indent, shortest floats, depth 100).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::EncodeOptions;
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert_eq!(options.max_depth, 100);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level. Values below 1 are
    /// treated as 1 when encoding.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the float rendering policy.
    #[must_use]
    pub fn with_float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }

    /// Sets the maximum container nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Configuration options for decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: usize,
    pub duplicate_keys: DuplicateKeys,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_keys: DuplicateKeys::default(),
        }
    }
}

impl DecodeOptions {
    /// Creates default options (depth 100, duplicate keys rejected).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum container nesting depth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::{decode_with_options, DecodeOptions};
    ///
    /// let options = DecodeOptions::new().with_max_depth(2);
    /// assert!(decode_with_options("a:\n  b:\n    c: 1", &options).is_err());
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the duplicate-key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, duplicate_keys: DuplicateKeys) -> Self {
        self.duplicate_keys = duplicate_keys;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_floats_keep_a_fraction_or_exponent() {
        assert_eq!(FloatFormat::Shortest.format(3.0), "3.0");
        assert_eq!(FloatFormat::Shortest.format(-0.5), "-0.5");
        assert_eq!(FloatFormat::Shortest.format(1e300), "1e300");
        assert_eq!(FloatFormat::Shortest.format(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_decimals_never_drop_the_fraction() {
        assert_eq!(FloatFormat::Decimals(0).format(3.7), "3.7");
        assert_eq!(FloatFormat::Decimals(2).format(1.23456), "1.23");
    }

    #[test]
    fn test_builders() {
        let options = DecodeOptions::new()
            .with_max_depth(5)
            .with_duplicate_keys(DuplicateKeys::LastWins);
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.duplicate_keys, DuplicateKeys::LastWins);

        let options = EncodeOptions::new().with_max_depth(3).with_indent(0);
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.indent, 0);
    }
}
