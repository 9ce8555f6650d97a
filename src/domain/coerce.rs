//! Coercion from a raw [`ConfigValue`] to the typed results handed out by the
//! accessor.
//!
//! Numeric targets share one rule: text is parsed as a general decimal number
//! first and then narrowed, so `"3.0"` is a valid integer and `"3.9"` truncates
//! to `3`. Numbers are narrowed directly. Anything else is a coercion error.

use crate::domain::error::CoercionError;
use crate::domain::value::ConfigValue;

/// Text is true only when it equals `"true"` ignoring ASCII case; any other
/// text is false rather than an error.
pub fn to_bool(value: &ConfigValue) -> Result<bool, CoercionError> {
    match value {
        ConfigValue::Text(s) => Ok(s.eq_ignore_ascii_case("true")),
        ConfigValue::Bool(b) => Ok(*b),
        ConfigValue::Int(_) | ConfigValue::Float(_) => {
            Err(CoercionError::mismatch("boolean", value))
        }
    }
}

/// Integers wrap to 32 bits; floats truncate toward zero and saturate, with
/// NaN mapping to zero.
pub fn to_i32(value: &ConfigValue) -> Result<i32, CoercionError> {
    match value {
        ConfigValue::Text(s) => Ok(parse_decimal(s)? as i32),
        ConfigValue::Int(n) => Ok(*n as i32),
        ConfigValue::Float(x) => Ok(*x as i32),
        ConfigValue::Bool(_) => Err(CoercionError::mismatch("int", value)),
    }
}

pub fn to_i64(value: &ConfigValue) -> Result<i64, CoercionError> {
    match value {
        ConfigValue::Text(s) => Ok(parse_decimal(s)? as i64),
        ConfigValue::Int(n) => Ok(*n),
        ConfigValue::Float(x) => Ok(*x as i64),
        ConfigValue::Bool(_) => Err(CoercionError::mismatch("long", value)),
    }
}

pub fn to_f32(value: &ConfigValue) -> Result<f32, CoercionError> {
    match value {
        ConfigValue::Text(s) => Ok(parse_decimal(s)? as f32),
        ConfigValue::Int(n) => Ok(*n as f32),
        ConfigValue::Float(x) => Ok(*x as f32),
        ConfigValue::Bool(_) => Err(CoercionError::mismatch("float", value)),
    }
}

pub fn to_f64(value: &ConfigValue) -> Result<f64, CoercionError> {
    match value {
        ConfigValue::Text(s) => parse_decimal(s),
        ConfigValue::Int(n) => Ok(*n as f64),
        ConfigValue::Float(x) => Ok(*x),
        ConfigValue::Bool(_) => Err(CoercionError::mismatch("double", value)),
    }
}

/// Every variant has a textual form, so this never fails.
pub fn to_text(value: &ConfigValue) -> String {
    value.to_string()
}

/// Parses text with the JVM's floating-point literal grammar: control
/// characters and spaces are trimmed, `NaN` and `Infinity` must be spelled
/// exactly, hex literals need a binary exponent, and a single trailing
/// `f`/`F`/`d`/`D` is ignored.
fn parse_decimal(s: &str) -> Result<f64, CoercionError> {
    let malformed = || CoercionError::Number {
        text: s.to_string(),
    };
    let trimmed = s.trim_matches(|c: char| c <= ' ');
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = match unsigned {
        "NaN" => f64::NAN,
        "Infinity" => f64::INFINITY,
        _ => {
            let body = unsigned
                .strip_suffix(['f', 'F', 'd', 'D'])
                .unwrap_or(unsigned);
            if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
                parse_hex(hex).ok_or_else(malformed)?
            } else if !body.is_empty()
                && body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
                && body
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
            {
                body.parse::<f64>().map_err(|_| malformed())?
            } else {
                return Err(malformed());
            }
        }
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// `hex` is the part after `0x`: hex digits with an optional point, then a
/// mandatory `p`/`P` exponent.
fn parse_hex(hex: &str) -> Option<f64> {
    let (mantissa, exponent) = hex.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let mut value = 0.0_f64;
    for c in whole.chars().chain(fraction.chars()) {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let scale = exponent.checked_sub(4 * i32::try_from(fraction.len()).ok()?)?;
    Some(value * 2.0_f64.powi(scale))
}
