//! TOON encoding.
//!
//! This module turns a [`Value`] tree into canonical TOON text, and any
//! `T: Serialize` into a [`Value`] through [`ValueSerializer`].
//!
//! ## Layout
//!
//! - **Map entries**: `key: <inline>`, or `key:` followed by an indented block
//! - **Inline values**: scalars, `[]`, `{}` and lists of scalars (`1, 2, 3`)
//! - **Block lists**: one `- ` item per line, or a bare `-` followed by an
//!   indented block for nested containers
//! - **One-element lists**: written with a trailing comma (`5,`)
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let value = toon!({
//!     "matrix": [[1, 2], [3, 4]],
//!     "tags": ["a", "b"]
//! });
//! assert_eq!(
//!     encode(&value).unwrap(),
//!     "matrix:\n  - 1, 2\n  - 3, 4\ntags: a, b"
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use toon_codec::{Encoder, EncodeOptions, Value};
//!
//! let options = EncodeOptions::new();
//! let encoder = Encoder::new(&options);
//! let text = encoder.encode(&Value::List(vec![Value::Int(5)])).unwrap();
//! assert_eq!(text, "5,");
//! ```

use crate::scalar::{write_key, write_scalar};
use crate::{EncodeOptions, Error, Result, ToonMap, Value};
use serde::{ser, Serialize};

/// Writes `Value` trees as canonical TOON text.
///
/// The output has no trailing newline and depends only on the value and the
/// options: equal inputs always produce identical text.
pub struct Encoder<'a> {
    out: String,
    options: &'a EncodeOptions,
    unit: usize,
}

impl<'a> Encoder<'a> {
    #[must_use]
    pub fn new(options: &'a EncodeOptions) -> Self {
        Encoder {
            out: String::new(),
            options,
            unit: options.indent.max(1),
        }
    }

    /// Consumes the encoder and renders `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaxDepthExceeded`] when containers nest deeper than
    /// `options.max_depth`.
    pub fn encode(mut self, value: &Value) -> Result<String> {
        match value {
            Value::Map(map) if !map.is_empty() => {
                self.enter(1)?;
                self.write_entries(map, 0, 1)?;
            }
            Value::List(items) if !is_inline(value) => {
                self.enter(1)?;
                self.write_items(items, 0, 1)?;
            }
            _ => self.write_inline(value, 1)?,
        }
        Ok(self.out)
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(Error::MaxDepthExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn start_line(&mut self, level: usize) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out
            .extend(std::iter::repeat(' ').take(level * self.unit));
    }

    /// `depth` is the depth `value` occupies if it is a container.
    fn write_inline(&mut self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::List(items) if !items.is_empty() => {
                self.enter(depth)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    write_scalar(&mut self.out, item, self.options.float_format);
                }
                if items.len() == 1 {
                    self.out.push(',');
                }
            }
            Value::List(_) | Value::Map(_) => {
                self.enter(depth)?;
                write_scalar(&mut self.out, value, self.options.float_format);
            }
            _ => write_scalar(&mut self.out, value, self.options.float_format),
        }
        Ok(())
    }

    fn write_child(&mut self, value: &Value, level: usize, depth: usize) -> Result<()> {
        if is_inline(value) {
            self.out.push(' ');
            return self.write_inline(value, depth);
        }
        self.enter(depth)?;
        match value {
            Value::Map(map) => self.write_entries(map, level + 1, depth),
            Value::List(items) => self.write_items(items, level + 1, depth),
            _ => Ok(()),
        }
    }

    fn write_entries(&mut self, map: &ToonMap, level: usize, depth: usize) -> Result<()> {
        for (key, value) in map.iter() {
            self.start_line(level);
            write_key(&mut self.out, key);
            self.out.push(':');
            self.write_child(value, level, depth + 1)?;
        }
        Ok(())
    }

    fn write_items(&mut self, items: &[Value], level: usize, depth: usize) -> Result<()> {
        for item in items {
            self.start_line(level);
            self.out.push('-');
            self.write_child(item, level, depth + 1)?;
        }
        Ok(())
    }
}

/// Scalars, empty containers and lists of scalars fit on one line.
fn is_inline(value: &Value) -> bool {
    match value {
        Value::List(items) => items.iter().all(Value::is_scalar),
        Value::Map(map) => map.is_empty(),
        _ => true,
    }
}

/// Converts `Serialize` types into [`Value`] trees.
///
/// Nesting is bounded by `max_depth`, which also stops values that recurse
/// without end through shared pointers.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::{ValueSerializer, Value};
///
/// let value = vec![1, 2].serialize(ValueSerializer::new(8)).unwrap();
/// assert_eq!(value, Value::List(vec![Value::Int(1), Value::Int(2)]));
///
/// let nested = vec![vec![vec![0]]];
/// assert!(nested.serialize(ValueSerializer::new(2)).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ValueSerializer {
    depth: usize,
    max_depth: usize,
}

impl ValueSerializer {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        ValueSerializer {
            depth: 0,
            max_depth,
        }
    }

    fn child(self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(Error::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(ValueSerializer {
            depth,
            max_depth: self.max_depth,
        })
    }

    fn to_value<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }
}

pub struct SerializeVec {
    items: Vec<Value>,
    inner: ValueSerializer,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: ToonMap,
    current_key: Option<String>,
    inner: ValueSerializer,
    variant: Option<&'static str>,
}

/// Wraps an enum payload as the single-key map `{variant: payload}`.
fn wrap_variant(variant: &'static str, payload: Value) -> Value {
    let mut map = ToonMap::with_capacity(1);
    map.insert(variant.to_string(), payload);
    Value::Map(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Ok(Value::Float(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        self.child()?;
        Ok(Value::List(
            v.iter().map(|&b| Value::Int(i64::from(b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let payload = self.child()?.to_value(value)?;
        Ok(wrap_variant(variant, payload))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        SerializeVec::new(self, len.unwrap_or(0), None)
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        SerializeVec::new(self, len, None)
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        SerializeVec::new(self, len, None)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        SerializeVec::new(self.child()?, len, Some(variant))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        SerializeMap::new(self, len.unwrap_or(0), None)
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        SerializeMap::new(self, len, None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        SerializeMap::new(self.child()?, len, Some(variant))
    }
}

impl SerializeVec {
    fn new(outer: ValueSerializer, len: usize, variant: Option<&'static str>) -> Result<Self> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len),
            inner: outer.child()?,
            variant,
        })
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(self.inner.to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let list = Value::List(self.items);
        match self.variant {
            Some(variant) => wrap_variant(variant, list),
            None => list,
        }
    }
}

impl SerializeMap {
    fn new(outer: ValueSerializer, len: usize, variant: Option<&'static str>) -> Result<Self> {
        Ok(SerializeMap {
            map: ToonMap::with_capacity(len),
            current_key: None,
            inner: outer.child()?,
            variant,
        })
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        let value = self.inner.to_value(value)?;
        self.map.try_insert(key, value)
    }

    fn finish(self) -> Value {
        let map = Value::Map(self.map);
        match self.variant {
            Some(variant) => wrap_variant(variant, map),
            None => map,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match self.inner.to_value(key)? {
            Value::String(s) => s,
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "map key {:?}; keys must be strings, integers or booleans",
                    other
                )))
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}
