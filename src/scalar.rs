//! Scalar tokens: type inference, quoting and escaping.
//!
//! Every leaf of a document passes through here. The encoder asks
//! [`needs_quotes`] whether a string can be written bare, and the decoder
//! classifies bare tokens with [`infer_scalar`]. The two are defined in terms
//! of each other, so any string written bare infers back as a string.
//!
//! ## Inference order
//!
//! 1. `null`
//! 2. `true` / `false`
//! 3. integer literal (`[+-]?[0-9]+`) that fits in an `i64`
//! 4. float literal (`[+-]?[0-9]+(.[0-9]+)?([eE][+-]?[0-9]+)?`) with a finite value
//! 5. anything else is a string
//!
//! ```rust
//! use toon_codec::scalar::{infer_scalar, needs_quotes};
//! use toon_codec::Value;
//!
//! assert_eq!(infer_scalar("42"), Value::Int(42));
//! assert_eq!(infer_scalar("1.5e3"), Value::Float(1500.0));
//! assert_eq!(infer_scalar("1e999"), Value::String("1e999".to_string()));
//! assert!(needs_quotes("123"));
//! assert!(!needs_quotes("hello world"));
//! ```

use crate::error::{Error, ErrorKind, Result};
use crate::options::FloatFormat;
use crate::{ToonMap, Value};

const SPECIAL_CHARS: [char; 7] = [':', ',', '\n', '\r', '\t', '"', '\\'];

/// Classifies an unquoted token. Surrounding whitespace is ignored.
#[must_use]
pub fn infer_scalar(token: &str) -> Value {
    let token = token.trim();
    match token {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => number_literal(token).unwrap_or_else(|| Value::String(token.to_string())),
    }
}

/// Parses a token that must be a number.
///
/// # Errors
///
/// Returns [`Error::InvalidNumberLiteral`] when the token is not an integer
/// or a finite float literal.
///
/// # Examples
///
/// ```rust
/// use toon_codec::scalar::parse_number;
/// use toon_codec::{ErrorKind, Value};
///
/// assert_eq!(parse_number(" -7 ").unwrap(), Value::Int(-7));
/// assert_eq!(parse_number("0.25").unwrap(), Value::Float(0.25));
/// let err = parse_number("12abc").unwrap_err();
/// assert_eq!(err.kind(), Some(ErrorKind::InvalidNumberLiteral));
/// ```
pub fn parse_number(token: &str) -> Result<Value> {
    number_literal(token.trim()).ok_or_else(|| Error::InvalidNumberLiteral {
        token: token.to_string(),
    })
}

fn number_literal(token: &str) -> Option<Value> {
    if is_integer_literal(token) {
        if let Ok(i) = token.parse::<i64>() {
            return Some(Value::Int(i));
        }
    }
    if is_float_literal(token) {
        if let Ok(f) = token.parse::<f64>() {
            if f.is_finite() {
                return Some(Value::Float(f));
            }
        }
    }
    None
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn is_integer_literal(s: &str) -> bool {
    let digits = strip_sign(s);
    !digits.is_empty() && leading_digits(digits) == digits.len()
}

fn is_float_literal(s: &str) -> bool {
    let rest = strip_sign(s);
    let int_len = leading_digits(rest);
    if int_len == 0 {
        return false;
    }
    let mut rest = &rest[int_len..];
    if let Some(fraction) = rest.strip_prefix('.') {
        let frac_len = leading_digits(fraction);
        if frac_len == 0 {
            return false;
        }
        rest = &fraction[frac_len..];
    }
    if let Some(exponent) = rest.strip_prefix(['e', 'E']) {
        let exponent = strip_sign(exponent);
        let exp_len = leading_digits(exponent);
        if exp_len == 0 {
            return false;
        }
        rest = &exponent[exp_len..];
    }
    rest.is_empty()
}

/// Returns `true` if a string value must be quoted to survive a round trip.
///
/// # Examples
///
/// ```rust
/// use toon_codec::scalar::needs_quotes;
///
/// assert!(needs_quotes(""));
/// assert!(needs_quotes("true"));
/// assert!(needs_quotes(" padded"));
/// assert!(needs_quotes("a, b"));
/// assert!(needs_quotes("- item"));
/// assert!(needs_quotes("[]"));
/// assert!(!needs_quotes("[content]"));
/// assert!(!needs_quotes("こんにちは"));
/// ```
#[must_use]
pub fn needs_quotes(s: &str) -> bool {
    needs_key_quotes(s) || s == "[]" || s == "{}" || !matches!(infer_scalar(s), Value::String(_))
}

/// Returns `true` if a map key must be quoted. Keys are never type-inferred,
/// so `null` or `42` stay bare.
#[must_use]
pub fn needs_key_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.contains(SPECIAL_CHARS)
        || s == "-"
        || s.starts_with("- ")
}

pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

pub(crate) fn write_string(out: &mut String, s: &str) {
    if needs_quotes(s) {
        write_quoted(out, s);
    } else {
        out.push_str(s);
    }
}

pub(crate) fn write_key(out: &mut String, key: &str) {
    if needs_key_quotes(key) {
        write_quoted(out, key);
    } else {
        out.push_str(key);
    }
}

/// Writes a scalar token. Non-finite floats have no literal and become `null`.
pub(crate) fn write_scalar(out: &mut String, value: &Value, float_format: FloatFormat) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) if f.is_finite() => out.push_str(&float_format.format(*f)),
        Value::Float(_) => out.push_str("null"),
        Value::String(s) => write_string(out, s),
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::Map(map) if map.is_empty() => out.push_str("{}"),
        Value::List(_) | Value::Map(_) => {}
    }
}

/// A tokenizing failure at a byte offset of the scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScanError {
    pub kind: ErrorKind,
    pub offset: usize,
    pub msg: String,
    pub token: Option<String>,
}

impl ScanError {
    fn new(kind: ErrorKind, offset: usize, msg: &str) -> Self {
        ScanError {
            kind,
            offset,
            msg: msg.to_string(),
            token: None,
        }
    }

    fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Reads the quoted token starting at `line[start]`, which must be `"`.
///
/// Returns the unescaped text and the byte offset just past the closing quote.
pub(crate) fn scan_quoted(line: &str, start: usize) -> std::result::Result<(String, usize), ScanError> {
    let body = start + 1;
    let mut out = String::new();
    let mut chars = line[body..].char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Ok((out, body + i + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, other)) => {
                    let sequence = format!("\\{}", other);
                    return Err(ScanError::new(
                        ErrorKind::InvalidEscapeSequence,
                        body + i,
                        &format!("unknown escape sequence `{}`", sequence),
                    )
                    .with_token(&sequence));
                }
                None => break,
            },
            _ => out.push(ch),
        }
    }
    Err(ScanError::new(
        ErrorKind::UnterminatedQuotedString,
        start,
        "missing closing quote before end of line",
    )
    .with_token(&line[start..]))
}

fn skip_whitespace(line: &str, pos: usize) -> usize {
    let rest = &line[pos..];
    pos + (rest.len() - rest.trim_start().len())
}

/// Parses the inline value occupying `line[start..]`.
///
/// `[]` and `{}` on their own are the empty containers. Otherwise the text
/// is split on commas outside quotes: a single token is a scalar, and two or
/// more tokens (or one token with a trailing comma) form a list.
pub(crate) fn parse_inline(line: &str, start: usize) -> std::result::Result<Value, ScanError> {
    match line[start..].trim() {
        "[]" => return Ok(Value::List(Vec::new())),
        "{}" => return Ok(Value::Map(ToonMap::new())),
        _ => {}
    }

    let mut tokens = Vec::new();
    let mut saw_comma = false;
    let mut pos = skip_whitespace(line, start);
    while pos < line.len() {
        if line[pos..].starts_with(',') {
            return Err(ScanError::new(ErrorKind::EmptyToken, pos, "empty list element"));
        }
        let end = if line[pos..].starts_with('"') {
            let (text, after) = scan_quoted(line, pos)?;
            tokens.push(Value::String(text));
            let after = skip_whitespace(line, after);
            if after < line.len() && !line[after..].starts_with(',') {
                let stray = line[after..].chars().next().map(String::from).unwrap_or_default();
                return Err(ScanError::new(
                    ErrorKind::UnexpectedCharacter,
                    after,
                    "expected `,` or end of line after quoted string",
                )
                .with_token(&stray));
            }
            after
        } else {
            let end = line[pos..].find(',').map_or(line.len(), |i| pos + i);
            tokens.push(infer_scalar(&line[pos..end]));
            end
        };
        if end >= line.len() {
            break;
        }
        // `end` sits on a comma
        saw_comma = true;
        pos = skip_whitespace(line, end + 1);
    }

    match tokens.len() {
        0 => Err(ScanError::new(ErrorKind::EmptyToken, start, "missing value")),
        1 if !saw_comma => Ok(tokens.remove(0)),
        _ => Ok(Value::List(tokens)),
    }
}
