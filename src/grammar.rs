//! TOON Format Reference
//!
//! This module documents the format as implemented by this library. It
//! contains no code.
//!
//! # Overview
//!
//! A document is a sequence of lines. Structure comes from indentation:
//! a line that ends a map entry with `:` (or a list item with a bare `-`)
//! owns the more deeply indented lines that follow it. There are no braces,
//! brackets or closing tokens.
//!
//! # Values
//!
//! | Kind | Text | Example |
//! |------|------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` / `false` | `active: true` |
//! | Integer | `[+-]?[0-9]+`, fits in `i64` | `count: -42` |
//! | Float | `[+-]?[0-9]+(.[0-9]+)?([eE][+-]?[0-9]+)?` | `ratio: 0.25`, `tiny: 1.5e-7` |
//! | String | bare or `"quoted"` | `name: Alice` |
//! | Empty list | `[]` | `tags: []` |
//! | Empty map | `{}` | `meta: {}` |
//!
//! Floats are written in their shortest round-trip form and always carry a
//! `.` or an exponent (`2.0`, `1e300`), so they never read back as integers.
//! NaN and infinities have no literal and are written as `null`.
//!
//! # Maps
//!
//! ```text
//! name: Alice
//! address:
//!   city: Paris
//!   zip: "75001"
//! ```
//!
//! Entries keep their insertion order. A key is written bare unless it is
//! empty, has leading or trailing whitespace, contains one of
//! `:` `,` `"` `\` or a newline, carriage return or tab, or is `-` or starts
//! with `- `. Keys are never type-inferred: `null: 1` has the key `"null"`.
//!
//! # Lists
//!
//! A list whose elements are all scalars is written inline, comma-separated:
//!
//! ```text
//! items: 1, 2, 3
//! single: 5,
//! ```
//!
//! The trailing comma marks a one-element list, so `single: 5,` is a list
//! while `single: 5` is an integer.
//!
//! Any other list is a block of items, one per line:
//!
//! ```text
//! matrix:
//!   - 1, 2, 3
//!   - 4, 5, 6
//! people:
//!   -
//!     name: Ada
//!   -
//!     name: Alan
//! ```
//!
//! An item holding a scalar or an inline list is `- value`. An item holding
//! a non-empty map or a block list is a bare `-` with the block indented
//! below it. Lists of lists stay lists. A map entry never shares a line
//! with `-`, so `- key: value` is an error.
//!
//! # Strings
//!
//! A string is written bare unless it would be misread. It is quoted when it:
//!
//! - is empty
//! - has leading or trailing whitespace
//! - contains `:` `,` `"` `\`, a newline, a carriage return or a tab
//! - reads as `null`, `true`, `false` or a number (`"42"`, `"1e5"`)
//! - is exactly `[]` or `{}`
//! - is `-` or starts with `- `
//!
//! Inside quotes the escapes are `\\`, `\"`, `\n`, `\r` and `\t`. Any other
//! backslash sequence is an error. Non-ASCII text is never escaped.
//!
//! Brackets are ordinary characters: `[content]` and `{a}` are bare strings.
//!
//! # Documents
//!
//! - An empty document is `null`.
//! - A document of one unindented line that is neither `key: ...` nor
//!   `- ...` is that line's inline value, so `42`, `"text"`, `a, b` and `[]`
//!   are complete documents.
//! - Otherwise the document is a map (if its first line is an entry) or a
//!   list (if its first line is an item).
//! - Output never ends with a newline.
//!
//! # Decoding Rules
//!
//! - Blank lines are skipped and `\r\n` line endings are accepted.
//! - Indentation is spaces only. Any width works as long as siblings agree.
//! - A line may be indented deeper than the previous one only when that line
//!   was `key:` or `-` with nothing after it.
//! - A shallower line must line up with an enclosing block.
//! - One block holds either map entries or list items, never both.
//! - A repeated key in one map is an error unless last-wins is configured.
//! - Nesting is limited to 100 levels by default. The root container is
//!   level 1.
//!
//! # Errors
//!
//! Decoding errors report a 1-based line and character column, the kind
//! of failure and the offending line:
//!
//! | Kind | Cause |
//! |------|-------|
//! | `UnexpectedIndentation` | width matches no open block, tab indent, missing nested block |
//! | `UnterminatedQuotedString` | no closing `"` before end of line |
//! | `InvalidEscapeSequence` | backslash followed by an unsupported character |
//! | `DuplicateKey` | key repeated in one map |
//! | `UnexpectedEndOfInput` | input ends right after `key:` or `-` |
//! | `MaxDepthExceeded` | nesting beyond the configured limit |
//! | `InvalidNumberLiteral` | a number was required but the token is not one |
//! | `UnexpectedCharacter` | text after a closing quote, line starting with `:`, `- key: value` |
//! | `MixedBlock` | entries and items in one block |
//! | `EmptyToken` | empty element in a comma-separated list |
