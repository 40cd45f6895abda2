//! Placeholder expansion for environment values.
//!
//! Supports `${KEY}`, `${KEY|default}` and `${KEY1|KEY2|...|default}`.
//! Candidate keys are tried in order and the first one that is set wins,
//! even if its value is empty. When none is set the default is used, or the
//! empty string if there is no default.
//!
//! Some special cases:
//! - `${KEY|}` falls back to the empty string.
//! - `${|default}` is always `default`, and `${|}` is always empty.
//! - `\|` is a literal `|` inside a key or the default, e.g.
//!   `${KEY\|_SUFFIX|default}` looks up `KEY|_SUFFIX`.
//!
//! Expansion never fails. Text outside placeholders, a lone `$`, and an
//! unclosed `${` are copied through unchanged. Placeholders do not nest: the
//! first `}` closes the body.

use std::iter::Peekable;
use std::str::Chars;

use crate::env::{EnvSource, ProcessEnv};

/// Expands every placeholder in `template` against the process environment.
///
/// ```
/// std::env::set_var("DRAGON_DOC_HOST", "db.internal");
/// let url = dragon_env::expand("postgres://${DRAGON_DOC_HOST}:${DRAGON_DOC_PORT|5432}");
/// assert_eq!(url, "postgres://db.internal:5432");
/// ```
pub fn expand(template: &str) -> String {
    expand_with(template, &ProcessEnv)
}

/// Expands every placeholder in `template` against `env`.
pub fn expand_with<S: EnvSource + ?Sized>(template: &str, env: &S) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();
            match consume_until(&mut chars, '}') {
                Ok(body) => result.push_str(&Placeholder::parse(&body).resolve(env)),
                Err(partial) => {
                    result.push_str("${");
                    result.push_str(&partial);
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Consumes characters up to and including `delim`.
///
/// Returns the text before `delim`, or everything consumed if it never appears.
fn consume_until(chars: &mut Peekable<Chars<'_>>, delim: char) -> Result<String, String> {
    let mut collected = String::new();
    for ch in chars.by_ref() {
        if ch == delim {
            return Ok(collected);
        }
        collected.push(ch);
    }
    Err(collected)
}

/// The parsed body of a `${...}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    keys: Vec<String>,
    default: Option<String>,
}

impl Placeholder {
    /// Parses a placeholder body, the text between `${` and `}`.
    ///
    /// Any unescaped `|` makes the last segment the default value. Without one
    /// the whole body is a single candidate key.
    pub fn parse(body: &str) -> Self {
        let body = body.trim();
        let (body, mut has_default) = match body.strip_prefix('|') {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        let mut keys = Vec::new();
        let mut current = String::new();
        let mut chars = body.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\\' if chars.peek() == Some(&'|') => {
                    chars.next();
                    current.push('|');
                }
                '|' => {
                    keys.push(std::mem::take(&mut current));
                    has_default = true;
                }
                _ => current.push(ch),
            }
        }

        if has_default {
            Self {
                keys,
                default: Some(current),
            }
        } else {
            Self {
                keys: vec![current],
                default: None,
            }
        }
    }

    /// Candidate keys in lookup order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The default value, if the body had an unescaped `|`.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Value of the first candidate key set in `env`, else the default, else "".
    pub fn resolve<S: EnvSource + ?Sized>(&self, env: &S) -> String {
        self.keys
            .iter()
            .filter(|key| !key.is_empty())
            .find_map(|key| env.var(key))
            .or_else(|| self.default.clone())
            .unwrap_or_default()
    }
}
