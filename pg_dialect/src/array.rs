//! Array literal encode/decode
//!
//! PostgreSQL transports arrays of scalars as brace-delimited,
//! comma-separated literal text. Encoding covers the integer, float, and
//! string families; decoding covers only integers (which arrive from the
//! driver already decoded as a numeric sequence) and strings (which arrive
//! as literal text). Float decode is intentionally unsupported and leaves
//! the destination at its default.

use crate::errors::DialectError;
use crate::kind::ElemKind;
use crate::value::PgValue;

/// Encode an integer sequence as an array literal, e.g. `{1,2,3}`.
pub fn encode_int_array(items: &[i64]) -> String {
    match items {
        [] => "{}".to_string(),
        [only] => format!("{{{}}}", only),
        _ => {
            let mut out = String::from("{");
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&v.to_string());
            }
            out.push('}');
            out
        }
    }
}

/// Encode a float sequence as an array literal, e.g. `{1.5,2.25}`.
///
/// Values are formatted in plain decimal notation, never exponential.
pub fn encode_float_array(items: &[f64]) -> String {
    match items {
        [] => "{}".to_string(),
        [only] => format!("{{{}}}", only),
        _ => {
            let mut out = String::from("{");
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&v.to_string());
            }
            out.push('}');
            out
        }
    }
}

/// Encode a string sequence as an array literal, e.g. `{"a","b"}`.
///
/// Elements are wrapped in double quotes without escaping embedded quote or
/// comma characters; values containing either will corrupt the literal.
pub fn encode_text_array(items: &[String]) -> String {
    match items {
        [] => "{}".to_string(),
        [only] => format!("{{\"{}\"}}", only),
        _ => {
            let mut out = String::from("{");
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                out.push_str(v);
                out.push('"');
            }
            out.push('}');
            out
        }
    }
}

/// Parse an array literal into its string elements.
///
/// Accepts both quoted (`{"a b","c"}`) and bare (`{abc, def}`) elements.
/// Quoted elements may escape `"` and `\` with a backslash; bare elements
/// are trimmed of surrounding whitespace.
pub fn decode_text_array(raw: &[u8]) -> Result<Vec<String>, DialectError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| DialectError::MalformedArray(format!("not utf-8: {}", e)))?;
    let trimmed = text.trim();

    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| DialectError::MalformedArray(format!("missing braces in {:?}", trimmed)))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut elements = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => {
                        return Err(DialectError::MalformedArray(
                            "dangling escape at end of literal".to_string(),
                        ))
                    }
                },
                '"' => in_quotes = false,
                other => current.push(other),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                elements.push(finish_element(&mut current, &mut quoted));
            }
            other => current.push(other),
        }
    }
    if in_quotes {
        return Err(DialectError::MalformedArray(
            "unterminated quoted element".to_string(),
        ));
    }
    elements.push(finish_element(&mut current, &mut quoted));
    Ok(elements)
}

fn finish_element(current: &mut String, quoted: &mut bool) -> String {
    let element = if *quoted {
        current.clone()
    } else {
        current.trim().to_string()
    };
    current.clear();
    *quoted = false;
    element
}

/// Resolve a deferred sequence-field capture against the target element kind.
///
/// Returns `Ok(None)` when the field should be left at its default: the raw
/// value is SQL NULL, the element kind is a float (decode unsupported), or
/// an integer target did not receive a numeric sequence from the driver.
pub fn decode_array(raw: &PgValue, elem: ElemKind) -> Result<Option<PgValue>, DialectError> {
    match elem {
        ElemKind::Text => match raw {
            PgValue::Null => Ok(None),
            PgValue::Bytes(buf) => Ok(Some(PgValue::TextSeq(decode_text_array(buf)?))),
            PgValue::Text(text) => Ok(Some(PgValue::TextSeq(decode_text_array(text.as_bytes())?))),
            PgValue::TextSeq(items) => Ok(Some(PgValue::TextSeq(items.clone()))),
            other => Err(DialectError::mismatch("array literal text", other.kind_name())),
        },
        _ if elem.is_integer() => match raw {
            // Integer arrays come back from the driver as a generic numeric
            // sequence; the element-wise widening copy into the concrete
            // target type happens in the field setter.
            PgValue::IntSeq(items) => Ok(Some(PgValue::IntSeq(items.clone()))),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}
