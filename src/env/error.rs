use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Failure of one of the built-in string converters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    #[error("invalid boolean: {0:?}")]
    Bool(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A conversion failed on a variable that was set.
///
/// Carries the caller's default alongside the converter's error so the caller
/// can decide whether to continue with the default.
pub struct FallbackError<T, E> {
    value: T,
    source: E,
}

impl<T, E> FallbackError<T, E> {
    pub(crate) fn new(value: T, source: E) -> Self {
        Self { value, source }
    }

    /// The default that was supplied to the getter.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the error, keeping only the default.
    pub fn into_value(self) -> T {
        self.value
    }

    /// The converter's error, unmodified.
    pub fn error(&self) -> &E {
        &self.source
    }

    /// Splits into the default and the converter's error.
    pub fn into_parts(self) -> (T, E) {
        (self.value, self.source)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for FallbackError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackError")
            .field("value", &self.value)
            .field("source", &self.source)
            .finish()
    }
}

impl<T, E: fmt::Display> fmt::Display for FallbackError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (falling back to default)", self.source)
    }
}

impl<T, E> std::error::Error for FallbackError<T, E>
where
    T: fmt::Debug,
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
