//! Load `.env` files, read and write typed environment variables, and expand
//! `${KEY|FALLBACK|default}` placeholders.

mod decode;
pub mod env;
mod error;
mod expand;
mod loader;

pub use decode::{must_unmarshal, unmarshal, Decoder};
pub use env::{
    get, get_bool, get_bool_or, get_f64, get_f64_or, get_i32, get_i32_or, get_i64, get_i64_or,
    get_json, get_json_or, get_or, get_strings, get_strings_or, get_u64, get_u64_or, get_with,
    get_with_or, lookup, must_get_bool, must_get_f64, must_get_i32, must_get_i64, must_get_json,
    must_get_strings, must_get_u64, must_get_with, remove, set, set_bool, set_f64, set_i32,
    set_i64, set_json, set_strings, set_u64, ConversionError, EnvSource, EnvStore, FallbackError,
    ProcessEnv,
};
pub use error::Error;
pub use expand::{expand, expand_with, Placeholder};
pub use loader::{load, load_dotenv, load_override, parse_reader, Entries, Loader};
