//! Decoding the process environment into a typed struct.

use config::{Config, Environment};
use serde::de::DeserializeOwned;

use crate::Error;

/// Builder for decoding environment variables into `T: Deserialize`.
///
/// Variable names are lower-cased after the prefix is removed, so field
/// `port` matches `PORT` (or `APP_PORT` with prefix `APP`). Values are parsed
/// on demand into whatever type the field asks for.
///
/// ## Example
///
/// ```no_run
/// use dragon_env::Decoder;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Database {
///     host: String,
///     port: u16,
/// }
///
/// #[derive(Deserialize)]
/// struct AppConfig {
///     database: Database,
/// }
///
/// // With APP__DATABASE__HOST=localhost and APP__DATABASE__PORT=5432
/// let config: AppConfig = Decoder::new()
///     .prefix("APP")
///     .separator("__")
///     .decode()?;
/// # Ok::<(), dragon_env::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use = "decoders do nothing until .decode() is called"]
pub struct Decoder {
    prefix: Option<String>,
    separator: Option<String>,
    list_separator: Option<String>,
    list_keys: Vec<String>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only consider variables starting with `prefix`.
    ///
    /// The prefix is joined to the rest of the name by the separator, or `_`
    /// when none is set.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Separator between nesting levels, e.g. `__` for `DATABASE__HOST`.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Split values on `separator` into sequences.
    pub fn list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = Some(separator.into());
        self
    }

    /// Restrict list splitting to `key` (lower-case, dotted path). May be
    /// called repeatedly.
    pub fn list_key(mut self, key: impl Into<String>) -> Self {
        self.list_keys.push(key.into());
        self
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T, Error> {
        let mut source = Environment::default().try_parsing(true);

        if let Some(prefix) = &self.prefix {
            source = source.prefix(prefix);
        }
        if let Some(separator) = &self.separator {
            source = source.separator(separator).prefix_separator(separator);
        }
        if let Some(separator) = &self.list_separator {
            source = source.list_separator(separator);
        }
        for key in &self.list_keys {
            source = source.with_list_parse_key(key);
        }

        let config = Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Decodes the whole process environment into `T`.
pub fn unmarshal<T: DeserializeOwned>() -> Result<T, Error> {
    Decoder::new().decode()
}

/// Like [`unmarshal`], but panics when decoding fails.
pub fn must_unmarshal<T: DeserializeOwned>() -> T {
    match unmarshal() {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
