//! Loading dotenv files into the environment.

mod builder;
mod file;

use std::path::Path;

pub use builder::Loader;
pub use file::{parse_reader, Entries};

use crate::Error;

/// Loads `paths` into the process environment without replacing keys that
/// are already set.
///
/// With no paths at all, `.env` in the working directory is loaded.
pub fn load<I, P>(paths: I) -> Result<(), Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let loader = required_files(Loader::new(), paths);
    if loader.is_empty() {
        return load_dotenv();
    }
    loader.load()
}

/// Loads `paths` into the process environment, replacing existing keys.
///
/// Unlike [`load`], an empty `paths` loads nothing.
pub fn load_override<I, P>(paths: I) -> Result<(), Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    required_files(Loader::new().override_existing(true), paths).load()
}

/// Loads `.env` from the working directory without replacing existing keys.
pub fn load_dotenv() -> Result<(), Error> {
    Loader::new().with_file(".env", true).load()
}

fn required_files<I, P>(loader: Loader, paths: I) -> Loader
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .fold(loader, |loader, path| loader.with_file(path, true))
}
