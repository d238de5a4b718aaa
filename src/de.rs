//! TOON decoding.
//!
//! This module provides the [`Decoder`] that parses TOON text into a
//! [`Value`] tree, and the [`ValueDeserializer`] that feeds a `Value` into
//! any `Deserialize` type.
//!
//! ## Overview
//!
//! - **Line oriented**: every non-blank line is an entry (`key: ...`), a list
//!   item (`- ...`) or a bare inline value
//! - **Indentation driven**: a deeper line opens the block of the entry above
//!   it, a shallower line closes blocks until the widths match
//! - **Iterative**: open blocks live on an explicit frame stack, so deeply
//!   nested input cannot exhaust the native stack
//! - **Positioned errors**: every failure names its line and column
//!
//! ## Usage
//!
//! ```rust
//! use toon_codec::{decode, toon};
//!
//! let text = "user:\n  name: Ada\n  langs: en, fr\nactive: true";
//! let value = decode(text).unwrap();
//! assert_eq!(
//!     value,
//!     toon!({ "user": { "name": "Ada", "langs": ["en", "fr"] }, "active": true })
//! );
//! ```

use crate::error::ParseError;
use crate::options::DuplicateKeys;
use crate::scalar::{self, parse_inline, scan_quoted, ScanError};
use crate::{DecodeOptions, Error, ErrorKind, Result, ToonMap, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};
use tracing::{debug, trace};

/// Parses TOON text into [`Value`] trees.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Decoder, DecodeOptions, ErrorKind};
///
/// let options = DecodeOptions::new();
/// let decoder = Decoder::new(&options);
///
/// let err = decoder.decode("a:\n  b: 1\n c: 2").unwrap_err();
/// assert_eq!(err.kind(), Some(ErrorKind::UnexpectedIndentation));
/// assert_eq!(err.as_parse_error().map(|e| e.line), Some(3));
/// ```
pub struct Decoder<'a> {
    options: &'a DecodeOptions,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(options: &'a DecodeOptions) -> Self {
        Decoder { options }
    }

    /// Parses a complete document.
    ///
    /// An empty (or all-blank) document is `Null`. A document holding one
    /// unindented line that is neither an entry nor an item is that line's
    /// inline value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the line, column and [`ErrorKind`] of the
    /// first problem. No partial tree is returned.
    pub fn decode(&self, input: &str) -> Result<Value> {
        let lines: Vec<SourceLine<'_>> = input
            .lines()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| SourceLine {
                number: i + 1,
                text: text.trim_end(),
            })
            .collect();
        debug!(bytes = input.len(), lines = lines.len(), "decoding document");

        if let [line] = lines.as_slice() {
            let indent = measure_indent(line)?;
            if indent == 0 {
                let kind = classify(line.text, 0).map_err(|e| line.scan_error(e))?;
                if let LineKind::Bare { at } = kind {
                    return self.inline(line, at, 1);
                }
            }
        }

        let mut parser = Parser {
            options: self.options,
            lines: &lines,
            stack: Vec::new(),
        };
        for index in 0..lines.len() {
            parser.step(index)?;
        }
        parser.finish()
    }

    fn inline(&self, line: &SourceLine<'_>, at: usize, depth: usize) -> Result<Value> {
        inline_value(self.options, line, at, depth)
    }
}

struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

impl SourceLine<'_> {
    fn error(&self, kind: ErrorKind, offset: usize, msg: &str) -> ParseError {
        let col = self.text[..offset].chars().count() + 1;
        ParseError::new(kind, self.number, col, msg, self.text)
    }

    fn scan_error(&self, err: ScanError) -> Error {
        let mut parse = self.error(err.kind, err.offset, &err.msg);
        parse.token = err.token;
        parse.into()
    }
}

fn measure_indent(line: &SourceLine<'_>) -> Result<usize> {
    let indent = line.text.len() - line.text.trim_start_matches(' ').len();
    if line.text[indent..].starts_with(char::is_whitespace) {
        return Err(line
            .error(
                ErrorKind::UnexpectedIndentation,
                indent,
                "indentation must use spaces only",
            )
            .into());
    }
    Ok(indent)
}

/// A classified line. Offsets are byte positions in the line.
enum LineKind {
    /// `key:` with the value (if any) starting at `rest_at`
    Field {
        key: String,
        key_at: usize,
        rest_at: usize,
    },
    /// `-` or `- value`
    Item { rest_at: Option<usize> },
    Bare { at: usize },
}

fn classify(text: &str, indent: usize) -> std::result::Result<LineKind, ScanError> {
    let content = &text[indent..];
    if content == "-" {
        return Ok(LineKind::Item { rest_at: None });
    }
    if content.starts_with("- ") {
        let rest_at = indent + 2;
        let rest = &text[rest_at..];
        let value_at = rest_at + (rest.len() - rest.trim_start().len());
        if let Some((_, colon)) = key_end(text, value_at)? {
            return Err(ScanError {
                kind: ErrorKind::UnexpectedCharacter,
                offset: colon,
                msg: "map entries of a list item go on indented lines below a bare `-`"
                    .to_string(),
                token: Some(":".to_string()),
            });
        }
        return Ok(LineKind::Item {
            rest_at: Some(rest_at),
        });
    }
    Ok(match key_end(text, indent)? {
        Some((key, colon)) => LineKind::Field {
            key,
            key_at: indent,
            rest_at: colon + 1,
        },
        None => LineKind::Bare { at: indent },
    })
}

/// Reads a key starting at `text[at]`, returning it with the offset of its `:`.
fn key_end(text: &str, at: usize) -> std::result::Result<Option<(String, usize)>, ScanError> {
    let content = &text[at..];
    if content.starts_with('"') {
        let (key, end) = scan_quoted(text, at)?;
        return Ok(text[end..].starts_with(':').then_some((key, end)));
    }
    for (i, ch) in content.char_indices() {
        match ch {
            ':' if i == 0 => {
                return Err(ScanError {
                    kind: ErrorKind::UnexpectedCharacter,
                    offset: at,
                    msg: "missing key before `:`".to_string(),
                    token: Some(":".to_string()),
                })
            }
            ':' => return Ok(Some((content[..i].trim_end().to_string(), at + i))),
            ',' | '"' => break,
            _ => {}
        }
    }
    Ok(None)
}

fn inline_value(
    options: &DecodeOptions,
    line: &SourceLine<'_>,
    at: usize,
    depth: usize,
) -> Result<Value> {
    let value = parse_inline(line.text, at).map_err(|e| line.scan_error(e))?;
    if !value.is_scalar() && depth > options.max_depth {
        return Err(line
            .error(
                ErrorKind::MaxDepthExceeded,
                at,
                &format!("nesting deeper than {} levels", options.max_depth),
            )
            .into());
    }
    Ok(value)
}

enum Block {
    Map {
        entries: ToonMap,
        pending: Option<String>,
    },
    List {
        items: Vec<Value>,
        pending: bool,
    },
}

impl Block {
    fn for_line(kind: &LineKind) -> Self {
        match kind {
            LineKind::Field { .. } => Block::Map {
                entries: ToonMap::new(),
                pending: None,
            },
            LineKind::Item { .. } | LineKind::Bare { .. } => Block::List {
                items: Vec::new(),
                pending: false,
            },
        }
    }

    fn is_pending(&self) -> bool {
        match self {
            Block::Map { pending, .. } => pending.is_some(),
            Block::List { pending, .. } => *pending,
        }
    }

    /// Stores a closed nested block in the slot left open by its header line.
    fn fill(&mut self, value: Value) {
        match self {
            Block::Map { entries, pending } => {
                if let Some(key) = pending.take() {
                    entries.insert(key, value);
                }
            }
            Block::List { items, pending } => {
                if std::mem::take(pending) {
                    items.push(value);
                }
            }
        }
    }

    fn into_value(self) -> Value {
        match self {
            Block::Map { entries, .. } => Value::Map(entries),
            Block::List { items, .. } => Value::List(items),
        }
    }
}

struct Frame {
    indent: usize,
    block: Block,
    /// Index of the line whose nested block this frame is waiting for.
    opened_by: Option<usize>,
}

struct Parser<'a, 'src> {
    options: &'a DecodeOptions,
    lines: &'a [SourceLine<'src>],
    stack: Vec<Frame>,
}

impl Parser<'_, '_> {
    fn step(&mut self, index: usize) -> Result<()> {
        let lines = self.lines;
        let line = &lines[index];
        let indent = measure_indent(line)?;
        let kind = classify(line.text, indent).map_err(|e| line.scan_error(e))?;
        self.align(index, indent, &kind)?;
        self.apply(index, kind)
    }

    /// Opens or closes blocks so the top frame sits at `indent`.
    fn align(&mut self, index: usize, indent: usize, kind: &LineKind) -> Result<()> {
        let lines = self.lines;
        let line = &lines[index];
        let Some(top) = self.stack.last() else {
            if indent > 0 {
                return Err(line
                    .error(
                        ErrorKind::UnexpectedIndentation,
                        0,
                        "first line must not be indented",
                    )
                    .into());
            }
            return self.open(index, indent, kind);
        };

        if indent > top.indent {
            if !top.block.is_pending() {
                return Err(line
                    .error(
                        ErrorKind::UnexpectedIndentation,
                        indent,
                        "indented line does not follow a `key:` or `-` header",
                    )
                    .into());
            }
            return self.open(index, indent, kind);
        }

        if let Some(opened_by) = top.opened_by {
            return Err(line
                .error(
                    ErrorKind::UnexpectedIndentation,
                    indent,
                    &format!(
                        "expected an indented block for line {}",
                        lines[opened_by].number
                    ),
                )
                .into());
        }

        while self.stack.last().map_or(false, |frame| indent < frame.indent) {
            self.close(line.number)?;
        }
        match self.stack.last() {
            Some(frame) if frame.indent == indent => Ok(()),
            _ => Err(line
                .error(
                    ErrorKind::UnexpectedIndentation,
                    indent,
                    &format!("indentation of {} matches no open block", indent),
                )
                .into()),
        }
    }

    fn open(&mut self, index: usize, indent: usize, kind: &LineKind) -> Result<()> {
        let depth = self.stack.len() + 1;
        let lines = self.lines;
        let line = &lines[index];
        if depth > self.options.max_depth {
            return Err(line
                .error(
                    ErrorKind::MaxDepthExceeded,
                    indent,
                    &format!("nesting deeper than {} levels", self.options.max_depth),
                )
                .into());
        }
        trace!(line = line.number, indent, depth, "open block");
        self.stack.push(Frame {
            indent,
            block: Block::for_line(kind),
            opened_by: None,
        });
        Ok(())
    }

    fn close(&mut self, line_number: usize) -> Result<()> {
        let frame = self.stack.pop();
        let parent = self.stack.last_mut();
        match (frame, parent) {
            (Some(frame), Some(parent)) => {
                trace!(line = line_number, indent = frame.indent, "close block");
                parent.block.fill(frame.block.into_value());
                parent.opened_by = None;
                Ok(())
            }
            _ => Err(Error::custom("closed a block with no parent")),
        }
    }

    fn apply(&mut self, index: usize, kind: LineKind) -> Result<()> {
        let lines = self.lines;
        let line = &lines[index];
        let depth = self.stack.len();
        let duplicate_keys = self.options.duplicate_keys;
        let value = match &kind {
            LineKind::Field { rest_at, .. } if !line.text[*rest_at..].trim().is_empty() => {
                Some(inline_value(self.options, line, *rest_at, depth + 1)?)
            }
            LineKind::Item { rest_at: Some(at) } | LineKind::Bare { at } => {
                Some(inline_value(self.options, line, *at, depth + 1)?)
            }
            _ => None,
        };

        let Some(frame) = self.stack.last_mut() else {
            return Err(Error::custom("no open block"));
        };
        match (kind, &mut frame.block) {
            (LineKind::Field { key, key_at, .. }, Block::Map { entries, pending }) => {
                if duplicate_keys == DuplicateKeys::Reject && entries.contains_key(&key) {
                    return Err(line
                        .error(
                            ErrorKind::DuplicateKey,
                            key_at,
                            &format!("key {:?} already defined in this block", key),
                        )
                        .with_token(&key)
                        .into());
                }
                match value {
                    Some(value) => {
                        entries.insert(key, value);
                    }
                    None => {
                        *pending = Some(key);
                        frame.opened_by = Some(index);
                    }
                }
            }
            (LineKind::Item { .. } | LineKind::Bare { .. }, Block::List { items, pending }) => {
                match value {
                    Some(value) => items.push(value),
                    None => {
                        *pending = true;
                        frame.opened_by = Some(index);
                    }
                }
            }
            (kind, _) => {
                let msg = match kind {
                    LineKind::Field { .. } => "map entry in a list block",
                    _ => "list item in a map block",
                };
                return Err(line.error(ErrorKind::MixedBlock, frame.indent, msg).into());
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Value> {
        let lines = self.lines;
        if let Some(opened_by) = self.stack.last().and_then(|frame| frame.opened_by) {
            let line = &lines[opened_by];
            return Err(line
                .error(
                    ErrorKind::UnexpectedEndOfInput,
                    line.text.len(),
                    "input ended before the nested block",
                )
                .into());
        }
        let last_line = lines.last().map_or(0, |line| line.number);
        while self.stack.len() > 1 {
            self.close(last_line)?;
        }
        Ok(self
            .stack
            .pop()
            .map_or(Value::Null, |frame| frame.block.into_value()))
    }
}

/// Feeds a [`Value`] into any `Deserialize` type.
///
/// Numeric targets also accept strings holding a number literal, so
/// `"42"` deserializes into an `i32`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::{ValueDeserializer, Value};
///
/// let port = u16::deserialize(ValueDeserializer::new(Value::from("8080"))).unwrap();
/// assert_eq!(port, 8080);
/// ```
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn into_number(self) -> Result<Value> {
        match self.value {
            Value::String(s) => scalar::parse_number(&s),
            other => Ok(other),
        }
    }
}

macro_rules! deserialize_number {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                ValueDeserializer::new(self.into_number()?).deserialize_any(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    deserialize_number! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32
        deserialize_f32 deserialize_f64
    }

    /// Large `u64` values are stored as floats; whole ones convert back.
    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.into_number()? {
            Value::Float(f) if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => {
                visitor.visit_u64(f as u64)
            }
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Map(map) if map.len() == 1 => match map.into_iter().next() {
                Some((variant, value)) => visitor.visit_enum(EnumDeserializer { variant, value }),
                None => Err(Error::custom("expected enum variant")),
            },
            other => Err(Error::custom(format!(
                "expected enum variant name or single-key map, found {:?}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i128 u128 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(items: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: ToonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(MapKeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Map keys are always text; numeric and boolean key types parse it.
struct MapKeyDeserializer {
    key: String,
}

impl<'de> de::Deserializer<'de> for MapKeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.key.as_str() {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            _ => visitor.visit_string(self.key),
        }
    }

    deserialize_number! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_f32 deserialize_f64
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf option unit unit_struct
        seq tuple tuple_struct map struct enum identifier ignored_any
    }
}

impl MapKeyDeserializer {
    fn into_number(self) -> Result<Value> {
        scalar::parse_number(&self.key)
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn decode(text: &str) -> Result<Value> {
        Decoder::new(&DecodeOptions::default()).decode(text)
    }

    fn parse_error(text: &str) -> ParseError {
        match decode(text) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }

    fn list(items: Vec<Value>) -> Value {
        Value::List(items)
    }

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn test_documents_of_one_line() {
        assert_eq!(decode("").unwrap(), Value::Null);
        assert_eq!(decode("\n  \n").unwrap(), Value::Null);
        assert_eq!(decode("null").unwrap(), Value::Null);
        assert_eq!(decode("42").unwrap(), Value::Int(42));
        assert_eq!(decode("\"42\"").unwrap(), Value::from("42"));
        assert_eq!(decode("[]").unwrap(), list(vec![]));
        assert_eq!(decode("{}").unwrap(), map(vec![]));
        assert_eq!(decode("7,").unwrap(), list(vec![Value::Int(7)]));
        assert_eq!(decode("a: 1").unwrap(), map(vec![("a", Value::Int(1))]));
        assert_eq!(decode("- x").unwrap(), list(vec![Value::from("x")]));
    }

    #[test]
    fn test_nested_blocks() {
        let text = "a:\n  b:\n    c: 1\n  d: 2\ne: 3";
        assert_eq!(
            decode(text).unwrap(),
            map(vec![
                ("a", map(vec![("b", map(vec![("c", Value::Int(1))])), ("d", Value::Int(2))])),
                ("e", Value::Int(3)),
            ])
        );
    }

    #[test]
    fn test_list_items() {
        let text = "- 1, 2\n-\n  k: v\n-\n  - 3,\n  - []\n- {}";
        assert_eq!(
            decode(text).unwrap(),
            list(vec![
                list(vec![Value::Int(1), Value::Int(2)]),
                map(vec![("k", Value::from("v"))]),
                list(vec![list(vec![Value::Int(3)]), list(vec![])]),
                map(vec![]),
            ])
        );
    }

    #[test]
    fn test_quoted_keys_and_crlf() {
        let text = "\"a: b\": 1\r\n\"\": \"\"\r\n\"- x\": -\r\n";
        assert_eq!(
            decode(text).unwrap(),
            map(vec![
                ("a: b", Value::Int(1)),
                ("", Value::from("")),
                ("- x", Value::from("-")),
            ])
        );
    }

    #[test]
    fn test_any_indent_width() {
        let text = "a:\n    b:\n       c: 1\n    d: 2";
        let value = decode(text).unwrap();
        assert_eq!(
            value.get("a").and_then(|a| a.get("d")),
            Some(&Value::Int(2))
        );
    }

    #[test]
    fn test_indentation_errors() {
        let err = parse_error("a: 1\n  b: 2");
        assert_eq!(err.kind, ErrorKind::UnexpectedIndentation);
        assert_eq!((err.line, err.col), (2, 3));

        let err = parse_error("a:\n    b: 1\n  c: 2");
        assert_eq!(err.kind, ErrorKind::UnexpectedIndentation);
        assert_eq!(err.line, 3);

        let err = parse_error("a:\nb: 1");
        assert_eq!(err.kind, ErrorKind::UnexpectedIndentation);
        assert_eq!(err.line, 2);

        let err = parse_error("a:\n\tb: 1");
        assert_eq!(err.kind, ErrorKind::UnexpectedIndentation);
        assert_eq!(err.col, 1);

        let err = parse_error("  a: 1");
        assert_eq!(err.kind, ErrorKind::UnexpectedIndentation);
    }

    #[test]
    fn test_missing_block_at_end() {
        let err = parse_error("a: 1\nb:");
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.line, 2);

        let err = parse_error("- 1\n-");
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_mixed_block() {
        let err = parse_error("a: 1\n- 2");
        assert_eq!(err.kind, ErrorKind::MixedBlock);
        assert_eq!(err.line, 2);

        let err = parse_error("x:\n  - 1\n  y: 2");
        assert_eq!(err.kind, ErrorKind::MixedBlock);
    }

    #[test]
    fn test_entry_after_dash_is_rejected() {
        let err = parse_error("- key: v");
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
        assert_eq!((err.line, err.col), (1, 6));

        let err = parse_error("items:\n  - 1\n  -  \"k\": 2");
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
        assert_eq!((err.line, err.col), (3, 9));

        assert_eq!(
            decode("- \"key: v\"\n-\n  key: v").unwrap(),
            list(vec![Value::from("key: v"), map(vec![("key", Value::from("v"))])])
        );
    }

    #[test]
    fn test_duplicate_keys() {
        let err = parse_error("a: 1\nb: 2\na: 3");
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
        assert_eq!(err.line, 3);
        assert_eq!(err.token.as_deref(), Some("a"));

        let options = DecodeOptions::new().with_duplicate_keys(DuplicateKeys::LastWins);
        let value = Decoder::new(&options)
            .decode("a: 1\nb: 2\na:\n  c: 3")
            .unwrap();
        assert_eq!(
            value,
            map(vec![("a", map(vec![("c", Value::Int(3))])), ("b", Value::Int(2))])
        );
    }

    #[test]
    fn test_token_errors_are_positioned() {
        let err = parse_error("k: \"abc");
        assert_eq!(err.kind, ErrorKind::UnterminatedQuotedString);
        assert_eq!((err.line, err.col), (1, 4));

        let err = parse_error("a: 1\nk: \"a\\x\"");
        assert_eq!(err.kind, ErrorKind::InvalidEscapeSequence);
        assert_eq!((err.line, err.col), (2, 6));

        let err = parse_error("k: 1, , 2");
        assert_eq!(err.kind, ErrorKind::EmptyToken);
        assert_eq!(err.col, 7);

        let err = parse_error("k: \"a\" b");
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);

        let err = parse_error(": 1");
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
        assert_eq!(err.context, ": 1");
    }

    #[test]
    fn test_columns_count_characters() {
        let err = parse_error("ключ: \"знач");
        assert_eq!(err.kind, ErrorKind::UnterminatedQuotedString);
        assert_eq!(err.col, 7);
    }

    #[test]
    fn test_depth_bound() {
        let options = DecodeOptions::new().with_max_depth(2);
        let decoder = Decoder::new(&options);
        assert!(decoder.decode("a:\n  b: 1").is_ok());
        assert!(decoder.decode("a: 1, 2").is_ok());

        let err = decoder.decode("a:\n  b:\n    c: 1").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::MaxDepthExceeded));

        let err = decoder.decode("a:\n  b: []").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::MaxDepthExceeded));

        let options = DecodeOptions::new().with_max_depth(0);
        assert!(Decoder::new(&options).decode("[]").is_err());
        assert!(Decoder::new(&options).decode("5").is_ok());
    }

    #[test]
    fn test_deep_input_does_not_overflow() {
        let mut text = String::new();
        for level in 0..300 {
            text.push_str(&" ".repeat(level));
            text.push_str("k:\n");
        }
        text.push_str(&" ".repeat(300));
        text.push_str("k: 1");
        let err = decode(&text).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::MaxDepthExceeded));
    }

    #[test]
    fn test_value_deserializer_coerces_numeric_strings() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Port {
            port: u16,
            ratio: f32,
        }

        let value = map(vec![("port", Value::from("8080")), ("ratio", Value::Int(1))]);
        let port = Port::deserialize(ValueDeserializer::new(value)).unwrap();
        assert_eq!(port, Port { port: 8080, ratio: 1.0 });

        let err = i32::deserialize(ValueDeserializer::new(Value::from("eight"))).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidNumberLiteral));
    }

    #[test]
    fn test_value_deserializer_large_u64() {
        let value = Value::Float(18_000_000_000_000_000_000.0);
        let n = u64::deserialize(ValueDeserializer::new(value)).unwrap();
        assert_eq!(n, 18_000_000_000_000_000_000);
    }

    #[test]
    fn test_map_keys_parse_as_numbers() {
        use std::collections::BTreeMap;
        let value = map(vec![("1", Value::from("one")), ("20", Value::from("twenty"))]);
        let parsed = BTreeMap::<u32, String>::deserialize(ValueDeserializer::new(value)).unwrap();
        assert_eq!(parsed.get(&20).map(String::as_str), Some("twenty"));
    }
}
