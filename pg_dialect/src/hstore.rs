//! Hstore key-value codec
//!
//! An unordered map from string keys to optional string values, matching the
//! backend's `hstore` column type. An absent value encodes SQL NULL for that
//! key, never an empty string. The codec is driven by the value's own
//! marshal/unmarshal contract; the row materializer never invokes it
//! directly.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::errors::DialectError;
use crate::value::PgValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hstore(HashMap<String, Option<String>>);

impl Hstore {
    pub fn new() -> Self {
        Hstore(HashMap::new())
    }

    /// Encode into the hstore wire text, or `None` for SQL NULL.
    ///
    /// An empty map encodes as SQL NULL, not as an empty-but-present map.
    /// Keys are emitted in sorted order so the output is canonical.
    pub fn to_wire(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }

        let mut keys: Vec<&String> = self.0.keys().collect();
        keys.sort();

        let mut out = String::new();
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            push_quoted(&mut out, key);
            out.push_str("=>");
            match &self.0[*key] {
                Some(value) => push_quoted(&mut out, value),
                None => out.push_str("NULL"),
            }
        }
        Some(out)
    }

    /// Decode a raw driver value into this map.
    ///
    /// A value that parses to an empty map leaves the destination unchanged.
    /// A non-empty parse fully replaces the destination: valid entries become
    /// owned string copies, NULL entries become `None` for their key.
    pub fn scan(&mut self, value: &PgValue) -> Result<(), DialectError> {
        let text = match value {
            PgValue::Null => return Ok(()),
            PgValue::Text(s) => s.as_str(),
            PgValue::Bytes(b) => std::str::from_utf8(b)
                .map_err(|e| DialectError::MalformedHstore(format!("not utf-8: {}", e)))?,
            other => return Err(DialectError::mismatch("hstore text", other.kind_name())),
        };

        let parsed = parse_wire(text)?;
        if parsed.is_empty() {
            return Ok(());
        }
        self.0 = parsed;
        Ok(())
    }
}

impl Deref for Hstore {
    type Target = HashMap<String, Option<String>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Hstore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, Option<String>>> for Hstore {
    fn from(map: HashMap<String, Option<String>>) -> Self {
        Hstore(map)
    }
}

impl From<&Hstore> for PgValue {
    fn from(h: &Hstore) -> Self {
        match h.to_wire() {
            Some(text) => PgValue::Text(text),
            None => PgValue::Null,
        }
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// Parse hstore wire text like `"a"=>"1", "b"=>NULL` into a map.
fn parse_wire(text: &str) -> Result<HashMap<String, Option<String>>, DialectError> {
    let mut map = HashMap::new();
    let mut chars = text.chars().peekable();

    loop {
        skip_whitespace(&mut chars);
        if chars.peek().is_none() {
            break;
        }

        let key = parse_quoted(&mut chars)?;

        skip_whitespace(&mut chars);
        if chars.next() != Some('=') || chars.next() != Some('>') {
            return Err(DialectError::MalformedHstore(format!(
                "expected => after key {:?}",
                key
            )));
        }
        skip_whitespace(&mut chars);

        let value = match chars.peek() {
            Some('"') => Some(parse_quoted(&mut chars)?),
            _ => {
                let word: String = chars
                    .by_ref()
                    .take_while(|c| !c.is_whitespace() && *c != ',')
                    .collect();
                if word.eq_ignore_ascii_case("null") {
                    None
                } else {
                    return Err(DialectError::MalformedHstore(format!(
                        "unexpected value token {:?}",
                        word
                    )));
                }
            }
        };
        map.insert(key, value);

        skip_whitespace(&mut chars);
        match chars.peek() {
            Some(',') => {
                chars.next();
            }
            Some(_) | None => {}
        }
    }

    Ok(map)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String, DialectError> {
    if chars.next() != Some('"') {
        return Err(DialectError::MalformedHstore(
            "expected opening quote".to_string(),
        ));
    }
    let mut out = String::new();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => {
                    return Err(DialectError::MalformedHstore(
                        "dangling escape".to_string(),
                    ))
                }
            },
            Some('"') => return Ok(out),
            Some(other) => out.push(other),
            None => {
                return Err(DialectError::MalformedHstore(
                    "unterminated quoted string".to_string(),
                ))
            }
        }
    }
}
