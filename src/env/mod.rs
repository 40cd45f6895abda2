//! Environment access: lookup sources and typed accessors.

mod accessor;
pub mod convert;
mod error;
mod source;

pub use accessor::*;
pub use error::{ConversionError, FallbackError};
pub use source::{EnvSource, EnvStore, ProcessEnv};
