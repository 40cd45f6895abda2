//! Reading dotenv files.
//!
//! Line syntax (keys, quoting, comments) is delegated to `dotenvy`, with its
//! own `$` substitution switched off so every value comes back raw. Nothing
//! here touches the environment.

use std::io::Read;
use std::path::Path;

use crate::Error;

/// Raw `(key, value)` pairs in file order.
pub type Entries = Vec<(String, String)>;

/// Parses dotenv content from `reader` without applying it.
///
/// Placeholders are returned untouched, e.g. `K=${A|default}` yields
/// `("K", "${A|default}")`.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Entries, Error> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_raw(&contents).map_err(Error::Parse)
}

/// Reads and parses a dotenv file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
pub(crate) fn read_env_file(path: &Path, required: bool) -> Result<Option<Entries>, Error> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return if required {
                Err(Error::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            };
        }
        Err(e) => {
            return Err(Error::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    parse_raw(&contents)
        .map(Some)
        .map_err(|e| Error::Dotenv {
            path: path.to_path_buf(),
            source: e,
        })
}

fn parse_raw(contents: &str) -> Result<Entries, dotenvy::Error> {
    let escaped = escape_substitutions(contents);
    dotenvy::from_read_iter(escaped.as_bytes()).collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
    Comment,
}

/// Rewrites dotenv content so that `dotenvy` hands values back verbatim.
///
/// Outside single quotes `$` becomes `\$` and `\|` becomes `\\|`, which the
/// reader unescapes back to `$` and `\|`. Single-quoted text and comments are
/// copied as is; quote state is tracked only so those spans are recognised.
fn escape_substitutions(input: &str) -> String {
    let mut output = String::with_capacity(input.len() + input.len() / 8);
    let mut state = Quote::None;
    let mut prev = '\n';
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match state {
            Quote::Single => {
                if ch == '\'' {
                    state = Quote::None;
                }
                output.push(ch);
            }
            Quote::Comment => {
                if ch == '\n' {
                    state = Quote::None;
                }
                output.push(ch);
            }
            Quote::None | Quote::Double => match ch {
                '$' => output.push_str("\\$"),
                '\\' => match chars.next() {
                    Some('|') => output.push_str("\\\\|"),
                    Some(next) => {
                        output.push(ch);
                        output.push(next);
                    }
                    None => output.push(ch),
                },
                '"' if state == Quote::Double => {
                    state = Quote::None;
                    output.push(ch);
                }
                '"' => {
                    state = Quote::Double;
                    output.push(ch);
                }
                '\'' if state == Quote::None => {
                    state = Quote::Single;
                    output.push(ch);
                }
                '#' if state == Quote::None && prev.is_whitespace() => {
                    state = Quote::Comment;
                    output.push(ch);
                }
                _ => output.push(ch),
            },
        }
        prev = ch;
    }

    output
}
