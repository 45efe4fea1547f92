use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use serde_json::value::RawValue;
use serde_json::{Map, Number, Value};

use crate::errors::{ErrorKind, VellumError, VellumResult};

/// Decodes a JSON payload keeping every numeric literal exactly as written.
///
/// Numbers are held as their decimal text, never as `f64`, so that bound
/// checks on 64-bit integers see the digits the client sent.
pub fn decode_value(payload: &[u8]) -> VellumResult<Value> {
    serde_json::from_slice(payload).map_err(|err| {
        VellumError::new(&format!("malformed JSON payload: {}", err), ErrorKind::EncodingError)
    })
}

/// Decodes a payload that must be a JSON object.
pub fn decode_object(payload: &[u8]) -> VellumResult<Map<String, Value>> {
    match decode_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(VellumError::new(
            &format!("expected a JSON object, but got {}", json_type_name(&other)),
            ErrorKind::EncodingError,
        )),
    }
}

/// Returns the JSON-schema name of the value's type.
///
/// Numbers always report `number`; `integer` is only ever an expected type.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether the number's decimal literal denotes a whole number.
pub fn is_integral(number: &Number) -> bool {
    integral_value(&number.to_string()).is_some()
}

/// Exact integer analysis of a JSON number literal.
///
/// Returns `None` when the literal has a non-zero fractional part,
/// `Some(None)` when it is whole but does not fit in `i128`, and
/// `Some(Some(v))` otherwise. `1.0`, `1e3` and `-0` are whole.
pub fn integral_value(literal: &str) -> Option<Option<i128>> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..])?),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    // position of the decimal point inside `digits` after applying the exponent
    let point = (int_part.len() as i64).saturating_add(exponent);
    let split = point.clamp(0, digits.len() as i64) as usize;
    if digits[split..].iter().any(|d| *d != b'0') {
        return None;
    }

    let whole = &digits[..split];
    let first_significant = whole.iter().position(|d| *d != b'0');
    let significant = match first_significant {
        Some(pos) => &whole[pos..],
        None => return Some(Some(0)),
    };
    let trailing_zeros = (point - split as i64).max(0) as u64;
    if significant.len() as u64 + trailing_zeros > 39 {
        return Some(None);
    }

    let mut value: i128 = 0;
    for d in significant {
        value = match value.checked_mul(10).and_then(|v| v.checked_add((d - b'0') as i128)) {
            Some(v) => v,
            None => return Some(None),
        };
    }
    for _ in 0..trailing_zeros {
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return Some(None),
        };
    }
    Some(Some(if negative { -value } else { value }))
}

// Exponents beyond `i64` saturate: only their sign matters from there on.
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|d| d.is_ascii_digit()) {
        return None;
    }
    Some(match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

/// Returns the JSON type name of an undecoded value from its first token.
pub fn raw_type_name(raw: &RawValue) -> &'static str {
    match raw.get().trim_start().as_bytes().first() {
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'"') => "string",
        Some(b't') | Some(b'f') => "boolean",
        Some(b'n') => "null",
        _ => "number",
    }
}

/// Splits an undecoded JSON object into its members, leaving the member
/// values undecoded.
pub fn decode_raw_object(raw: &RawValue) -> VellumResult<IndexMap<String, Box<RawValue>>> {
    Ok(serde_json::from_str(raw.get())?)
}

/// Splits an undecoded JSON array into its undecoded items.
pub fn decode_raw_array(raw: &RawValue) -> VellumResult<Vec<Box<RawValue>>> {
    Ok(serde_json::from_str(raw.get())?)
}

/// Encodes raw bytes the way byte fields travel inside documents.
pub fn encode_bytes(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}

/// Decodes a byte field's base64 text.
pub fn decode_bytes(encoded: &str) -> Option<Vec<u8>> {
    STANDARD.decode(encoded).ok()
}
