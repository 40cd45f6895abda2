//! Fixed string converters used by the typed accessors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ConversionError;

pub fn parse_i32(s: &str) -> Result<i32, ConversionError> {
    Ok(s.parse()?)
}

pub fn parse_i64(s: &str) -> Result<i64, ConversionError> {
    Ok(s.parse()?)
}

pub fn parse_u64(s: &str) -> Result<u64, ConversionError> {
    Ok(s.parse()?)
}

pub fn parse_f64(s: &str) -> Result<f64, ConversionError> {
    Ok(s.parse()?)
}

/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
pub fn parse_bool(s: &str) -> Result<bool, ConversionError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConversionError::Bool(s.to_string())),
    }
}

/// Splits on `,` verbatim. Elements are not trimmed and commas cannot be escaped.
pub fn parse_strings(s: &str) -> Result<Vec<String>, ConversionError> {
    Ok(s.split(',').map(str::to_string).collect())
}

pub fn parse_json<T: DeserializeOwned>(s: &str) -> Result<T, ConversionError> {
    Ok(serde_json::from_str(s)?)
}

/// Shortest decimal form that parses back to the same value.
pub fn format_f64(value: f64) -> String {
    value.to_string()
}

pub fn format_strings<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(",")
}

/// Compact JSON, no whitespace between tokens.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
