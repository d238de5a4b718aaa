//! # toon_codec
//!
//! A canonical codec for TOON (Token-Oriented Object Notation), a compact,
//! indentation-based text format for maps, lists and scalars.
//!
//! ## What does TOON look like?
//!
//! ```text
//! name: Alice
//! tags: admin, ops
//! address:
//!   city: Paris
//!   zip: "75001"
//! matrix:
//!   - 1, 2
//!   - 3, 4
//! ```
//!
//! Nesting is expressed with indentation instead of braces, lists of scalars
//! sit on one line, and strings are only quoted when they would otherwise be
//! read back as something else.
//!
//! ## Key Features
//!
//! - **Canonical**: one text per value, so `encode(decode(encode(v))) == encode(v)`
//! - **Lossless**: `decode(encode(v)) == v` for every finite, depth-bounded value
//! - **Typed or dynamic**: work with [`Value`] trees or any `Serialize` /
//!   `Deserialize` type
//! - **Positioned errors**: decode failures carry a line, a column and an [`ErrorKind`]
//! - **Bounded**: nesting depth is capped in both directions (default 100)
//!
//! ## Quick Start
//!
//! ### Dynamic values
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "llm"]
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "name: Alice\nage: 30\ntags: rust, llm");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! ### Typed data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Logging
//!
//! The codec emits [`tracing`] events: `debug` at every encode and decode,
//! `trace` as the decoder opens and closes blocks. No subscriber is
//! installed by the library.
//!
//! ## Format Reference
//!
//! See the [`grammar`] module for the complete format description.

pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod value;

pub use de::{Decoder, ValueDeserializer};
pub use error::{Error, ErrorKind, ParseError, Result};
pub use map::ToonMap;
pub use options::{DecodeOptions, DuplicateKeys, EncodeOptions, FloatFormat, DEFAULT_MAX_DEPTH};
pub use ser::{Encoder, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

/// Encodes a [`Value`] as TOON text with default options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let text = encode(&toon!({ "items": [1, 2, 3] })).unwrap();
/// assert_eq!(text, "items: 1, 2, 3");
/// ```
///
/// # Errors
///
/// Returns [`Error::MaxDepthExceeded`] if the value nests deeper than 100 levels.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a [`Value`] as TOON text with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode_with_options, toon, EncodeOptions};
///
/// let options = EncodeOptions::new().with_indent(3);
/// let text = encode_with_options(&toon!({ "a": { "b": true } }), &options).unwrap();
/// assert_eq!(text, "a:\n   b: true");
/// ```
///
/// # Errors
///
/// Returns [`Error::MaxDepthExceeded`] if the value nests deeper than
/// `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<String> {
    debug!(
        indent = options.indent,
        max_depth = options.max_depth,
        "encoding value"
    );
    let text = Encoder::new(options).encode(value)?;
    debug!(bytes = text.len(), "encoded value");
    Ok(text)
}

/// Decodes TOON text into a [`Value`] with default options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, toon};
///
/// let value = decode("items: 1, 2, 3, 4, 5").unwrap();
/// assert_eq!(value, toon!({ "items": [1, 2, 3, 4, 5] }));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] describing the first malformed line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str) -> Result<Value> {
    decode_with_options(text, &DecodeOptions::default())
}

/// Decodes TOON text into a [`Value`] with custom options.
///
/// # Errors
///
/// Returns [`Error::Parse`] describing the first malformed line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> Result<Value> {
    Decoder::new(options).decode(text)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_map());
/// ```
///
/// # Errors
///
/// Returns an error if the value nests deeper than 100 levels, has map keys
/// that are not strings, integers or booleans, or repeats a key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new(DEFAULT_MAX_DEPTH))
}

/// Convert a [`Value`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{from_value, toon};
///
/// let pair: (String, Vec<u8>) = from_value(toon!(["id", [1, 2]])).unwrap();
/// assert_eq!(pair, ("id".to_string(), vec![1, 2]));
/// ```
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to a TOON string.
///
/// # Examples
///
/// ```rust
/// use toon_codec::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (see [`to_value`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a TOON string with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{to_string_with_options, EncodeOptions, FloatFormat};
///
/// let options = EncodeOptions::new().with_float_format(FloatFormat::Decimals(1));
/// assert_eq!(to_string_with_options(&vec![1.26, 2.0], &options).unwrap(), "1.3, 2.0");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented or nests deeper than
/// `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = value.serialize(ValueSerializer::new(options.max_depth))?;
    encode_with_options(&value, options)
}

/// Serialize any `T: Serialize` to a writer in TOON format.
///
/// # Examples
///
/// ```rust
/// use toon_codec::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
/// assert_eq!(buffer, b"a, b");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer in TOON format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOON text.
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or does not match `T`.
/// Parse errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &DecodeOptions::default())
}

/// Deserialize an instance of type `T` from TOON text with custom options.
///
/// # Errors
///
/// Returns an error if the input is not valid TOON or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from an I/O stream of TOON.
///
/// # Examples
///
/// ```rust
/// use toon_codec::from_reader;
/// use std::collections::BTreeMap;
/// use std::io::Cursor;
///
/// let map: BTreeMap<String, i64> = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(map.get("y"), Some(&2));
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// TOON, or the data does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or do
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
