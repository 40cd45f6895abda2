use std::collections::HashMap;

use crate::Error;

/// Read access to a set of environment variables.
///
/// A key is considered set whenever `var` returns `Some`, including `Some("")`.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    fn contains(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}

/// Write access on top of [`EnvSource`].
pub trait EnvStore: EnvSource {
    fn set_var(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Every key currently set.
    fn keys(&self) -> Vec<String>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// The environment of the running process.
///
/// Reads and writes go straight to `std::env`. Nothing is synchronized: callers
/// mutating the environment from several threads must coordinate themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        if !is_valid_key(key) {
            return None;
        }
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvStore for ProcessEnv {
    fn set_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if !is_valid_key(key) {
            return Err(Error::InvalidKey(key.to_string()));
        }
        if value.contains('\0') {
            return Err(Error::InvalidValue(key.to_string()));
        }
        std::env::set_var(key, value);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        std::env::vars_os()
            .map(|(k, _)| k.to_string_lossy().into_owned())
            .collect()
    }
}

impl ProcessEnv {
    /// Unsets `key`. Invalid names are ignored.
    pub fn remove_var(&mut self, key: &str) {
        if is_valid_key(key) {
            std::env::remove_var(key);
        }
    }
}

// std::env panics on these instead of returning an error.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        self.get(key).cloned()
    }
}

impl EnvStore for HashMap<String, String> {
    fn set_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::InvalidKey(key.to_string()));
        }
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }
}
