//! Typed getters and setters over the process environment.
//!
//! Every getter reads through [`ProcessEnv`]. Setters write through immediately;
//! there is no buffering and nothing is rolled back.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::convert;
use super::{ConversionError, EnvSource, EnvStore, FallbackError, ProcessEnv};
use crate::Error;

/// Returns the value of `key`, or an empty string when it is not set.
pub fn get(key: &str) -> String {
    ProcessEnv.var(key).unwrap_or_default()
}

/// Returns the value of `key` if it is set.
pub fn lookup(key: &str) -> Option<String> {
    ProcessEnv.var(key)
}

/// Returns the value of `key`, or `default` when it is not set.
pub fn get_or(key: &str, default: &str) -> String {
    ProcessEnv.var(key).unwrap_or_else(|| default.to_string())
}

/// Sets `key` to `value` in the process environment.
pub fn set(key: &str, value: impl AsRef<str>) -> Result<(), Error> {
    ProcessEnv.set_var(key, value.as_ref())
}

/// Unsets `key` in the process environment.
pub fn remove(key: &str) {
    ProcessEnv.remove_var(key);
}

/// Reads `key` and runs it through `convert`.
///
/// An unset variable is converted as the empty string. The converter's error
/// is returned as is.
pub fn get_with<T, E, F>(key: &str, convert: F) -> Result<T, E>
where
    F: FnOnce(&str) -> Result<T, E>,
{
    convert(&get(key))
}

/// Like [`get_with`], but panics when the conversion fails.
///
/// Meant for startup code where a bad variable is fatal.
pub fn must_get_with<T, E, F>(key: &str, convert: F) -> T
where
    E: Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    match get_with(key, convert) {
        Ok(value) => value,
        Err(err) => panic!("environment variable {key}: {err}"),
    }
}

/// Reads `key` and runs it through `convert`, falling back to `default`.
///
/// When `key` is not set, `default` is returned and `convert` is never called.
/// When the conversion fails, the error carries `default` along with the
/// converter's error.
pub fn get_with_or<T, E, F>(key: &str, convert: F, default: T) -> Result<T, FallbackError<T, E>>
where
    F: FnOnce(&str) -> Result<T, E>,
{
    match ProcessEnv.var(key) {
        Some(raw) => convert(&raw).map_err(|err| FallbackError::new(default, err)),
        None => Ok(default),
    }
}

macro_rules! typed_accessors {
    ($ty:ty, $parse:path, $get:ident, $must_get:ident, $get_or:ident) => {
        #[doc = concat!("Reads `key` as `", stringify!($ty), "`.")]
        pub fn $get(key: &str) -> Result<$ty, ConversionError> {
            get_with(key, $parse)
        }

        #[doc = concat!("Reads `key` as `", stringify!($ty), "`, panicking on failure.")]
        pub fn $must_get(key: &str) -> $ty {
            must_get_with(key, $parse)
        }

        #[doc = concat!("Reads `key` as `", stringify!($ty), "`, or `default` when unset.")]
        pub fn $get_or(key: &str, default: $ty) -> Result<$ty, FallbackError<$ty, ConversionError>> {
            get_with_or(key, $parse, default)
        }
    };
}

typed_accessors!(i32, convert::parse_i32, get_i32, must_get_i32, get_i32_or);
typed_accessors!(i64, convert::parse_i64, get_i64, must_get_i64, get_i64_or);
typed_accessors!(u64, convert::parse_u64, get_u64, must_get_u64, get_u64_or);
typed_accessors!(f64, convert::parse_f64, get_f64, must_get_f64, get_f64_or);
typed_accessors!(bool, convert::parse_bool, get_bool, must_get_bool, get_bool_or);
typed_accessors!(
    Vec<String>,
    convert::parse_strings,
    get_strings,
    must_get_strings,
    get_strings_or
);

/// Reads `key` as JSON.
pub fn get_json<T: DeserializeOwned>(key: &str) -> Result<T, ConversionError> {
    get_with(key, convert::parse_json)
}

/// Reads `key` as JSON, panicking on failure.
pub fn must_get_json<T: DeserializeOwned>(key: &str) -> T {
    must_get_with(key, convert::parse_json)
}

/// Reads `key` as JSON, or `default` when unset.
pub fn get_json_or<T: DeserializeOwned>(
    key: &str,
    default: T,
) -> Result<T, FallbackError<T, ConversionError>> {
    get_with_or(key, convert::parse_json, default)
}

/// Writes `value` in decimal.
pub fn set_i32(key: &str, value: i32) -> Result<(), Error> {
    set(key, value.to_string())
}

/// Writes `value` in decimal.
pub fn set_i64(key: &str, value: i64) -> Result<(), Error> {
    set(key, value.to_string())
}

/// Writes `value` in decimal.
pub fn set_u64(key: &str, value: u64) -> Result<(), Error> {
    set(key, value.to_string())
}

/// Writes the shortest decimal form that parses back to `value`.
pub fn set_f64(key: &str, value: f64) -> Result<(), Error> {
    set(key, convert::format_f64(value))
}

/// Writes `true` or `false`.
pub fn set_bool(key: &str, value: bool) -> Result<(), Error> {
    set(key, value.to_string())
}

/// Joins `values` with `,`. Elements containing a comma will not split back the same way.
pub fn set_strings<S: AsRef<str>>(key: &str, values: &[S]) -> Result<(), Error> {
    set(key, convert::format_strings(values))
}

/// Writes `value` as compact JSON.
pub fn set_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), Error> {
    set(key, convert::format_json(value)?)
}
