use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::file::read_env_file;
use crate::env::{EnvStore, ProcessEnv};
use crate::expand::expand_with;
use crate::Error;

#[derive(Debug)]
struct EnvFile {
    path: PathBuf,
    required: bool,
}

/// Builder for loading dotenv files into an environment.
///
/// Files are applied in registration order and entries in file order. Every
/// raw value goes through [`expand_with`] against the target environment
/// before it is written, so a value may refer to keys set earlier in the same
/// load.
///
/// By default loading is non-destructive: keys that were already set when
/// loading started are left alone. A key introduced by one file may still be
/// replaced by a later file. With [`override_existing`](Self::override_existing)
/// every entry is written unconditionally.
///
/// Loading stops at the first file that fails. Values written from earlier
/// files stay in place.
///
/// ## Example
///
/// ```no_run
/// use dragon_env::Loader;
///
/// Loader::new()
///     .with_file(".env", true)
///     .with_file(".env.local", false)
///     .load()?;
/// # Ok::<(), dragon_env::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "loaders do nothing until .load() is called"]
pub struct Loader {
    files: Vec<EnvFile>,
    override_existing: bool,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dotenv file to be loaded.
    ///
    /// If `required` is `true`, loading fails when the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.files.push(EnvFile {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Replace keys that are already set instead of keeping them.
    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    /// Loads all files into the process environment.
    pub fn load(self) -> Result<(), Error> {
        self.load_into(&mut ProcessEnv)
    }

    /// Loads all files into `store`.
    pub fn load_into<S: EnvStore + ?Sized>(self, store: &mut S) -> Result<(), Error> {
        let protected: HashSet<String> = if self.override_existing {
            HashSet::new()
        } else {
            store.keys().into_iter().collect()
        };

        for file in self.files {
            let Some(entries) = read_env_file(&file.path, file.required)? else {
                debug!(path = %file.path.display(), "optional env file not found, skipping");
                continue;
            };

            let mut applied = 0usize;
            for (key, raw) in entries {
                if protected.contains(&key) {
                    trace!(%key, "keeping existing value");
                    continue;
                }
                let value = expand_with(&raw, &*store);
                store.set_var(&key, &value)?;
                applied += 1;
            }

            debug!(
                path = %file.path.display(),
                applied,
                override_existing = self.override_existing,
                "loaded env file"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_non_destructive_keeps_existing() {
        let file = env_file("K=x\nNEW=n\n");
        let mut store = HashMap::from([("K".to_string(), "y".to_string())]);

        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut store)
            .unwrap();

        assert_eq!(store["K"], "y");
        assert_eq!(store["NEW"], "n");
    }

    #[test]
    fn test_override_replaces_existing() {
        let file = env_file("K='${BASE|x}-1'\n");
        let mut store = HashMap::from([("K".to_string(), "y".to_string())]);

        Loader::new()
            .with_file(file.path(), true)
            .override_existing(true)
            .load_into(&mut store)
            .unwrap();

        assert_eq!(store["K"], "x-1");
    }

    #[test]
    fn test_values_see_earlier_entries() {
        let file = env_file("USER=root\nDSN='${USER}@${HOST|localhost}'\n");
        let mut store = HashMap::new();

        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut store)
            .unwrap();

        assert_eq!(store["DSN"], "root@localhost");
    }

    #[test]
    fn test_unquoted_and_double_quoted_defaults_expand() {
        let file = env_file("U=${DRAGON_ENV_LOADER_A|default}\nD=\"${DRAGON_ENV_LOADER_A|default}\"\n");

        let mut empty = HashMap::new();
        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut empty)
            .unwrap();
        assert_eq!(empty["U"], "default");
        assert_eq!(empty["D"], "default");

        let mut store = HashMap::from([("DRAGON_ENV_LOADER_A".to_string(), "store".to_string())]);
        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut store)
            .unwrap();
        assert_eq!(store["U"], "store");
        assert_eq!(store["D"], "store");
    }

    #[test]
    fn test_plain_reference_resolves_against_target_store() {
        let file = env_file("K=${DRAGON_ENV_LOADER_ONLY_IN_STORE}\n");
        let mut store = HashMap::from([(
            "DRAGON_ENV_LOADER_ONLY_IN_STORE".to_string(),
            "store".to_string(),
        )]);

        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut store)
            .unwrap();

        assert_eq!(store["K"], "store");
    }

    #[test]
    fn test_escaped_vertical_in_unquoted_value() {
        let file = env_file("K=${A\\|B|fallback\\|value}\n");
        let mut store = HashMap::from([("A|B".to_string(), "piped".to_string())]);

        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut store)
            .unwrap();
        assert_eq!(store["K"], "piped");

        let mut empty = HashMap::new();
        Loader::new()
            .with_file(file.path(), true)
            .load_into(&mut empty)
            .unwrap();
        assert_eq!(empty["K"], "fallback|value");
    }

    #[test]
    fn test_later_file_replaces_key_from_earlier_file() {
        let first = env_file("K=first\n");
        let second = env_file("K=second\n");
        let mut store = HashMap::new();

        Loader::new()
            .with_file(first.path(), true)
            .with_file(second.path(), true)
            .load_into(&mut store)
            .unwrap();

        assert_eq!(store["K"], "second");
    }

    #[test]
    fn test_failure_keeps_earlier_files() {
        let good = env_file("A=1\n");
        let bad = env_file("INVALID_LINE_WITHOUT_EQUALS\n");
        let mut store = HashMap::new();

        let result = Loader::new()
            .with_file(good.path(), true)
            .with_file(bad.path(), true)
            .load_into(&mut store);

        assert!(matches!(result, Err(Error::Dotenv { .. })));
        assert_eq!(store["A"], "1");
    }

    #[test]
    fn test_optional_missing_file_is_skipped() {
        let file = env_file("A=1\n");
        let mut store = HashMap::new();

        Loader::new()
            .with_file("/nonexistent/path/.env", false)
            .with_file(file.path(), true)
            .load_into(&mut store)
            .unwrap();

        assert_eq!(store["A"], "1");
    }

    #[test]
    fn test_required_missing_file_fails() {
        let mut store = HashMap::new();
        let result = Loader::new()
            .with_file("/nonexistent/path/.env", true)
            .load_into(&mut store);

        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
