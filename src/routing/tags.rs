//! Endpoint annotations.
//!
//! # Responsibilities
//! - Hold the key/value annotations attached to a service root or field
//! - Parse the compact `key:"value"` annotation syntax
//! - Coalescing lookup over alias keys (`version`, `v`)
//!
//! # Design Decisions
//! - Parsing is lenient: a malformed tail ends parsing, earlier pairs are kept
//! - Duplicate keys are allowed; lookups return the first occurrence

use std::fmt;

/// Ordered key/value annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pairs: Vec<(String, String)>,
}

impl Tags {
    /// Create an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse annotations written as `url:"/ping" version:"2"`.
    pub fn parse(raw: &str) -> Self {
        let mut pairs = Vec::new();
        let mut rest = raw;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let key_len = rest
                .find(|c: char| c == ':' || c == '"' || c <= ' ' || c == '\u{7f}')
                .unwrap_or(rest.len());
            if key_len == 0 || !rest[key_len..].starts_with(":\"") {
                tracing::debug!(annotation = %raw, "Malformed annotation tail ignored");
                break;
            }
            let key = &rest[..key_len];
            rest = &rest[key_len + 2..];

            let Some((value, consumed)) = scan_quoted(rest) else {
                tracing::debug!(annotation = %raw, "Unterminated annotation value ignored");
                break;
            };
            pairs.push((key.to_string(), value));
            rest = &rest[consumed..];
        }

        Self { pairs }
    }

    /// Append an annotation.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// First value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value among `aliases`, in alias order.
    pub fn coalesce(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Reads a quoted value (opening quote already consumed).
/// Returns the unescaped value and the bytes consumed including the closing quote.
fn scan_quoted(input: &str) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Some((value, idx + 1)),
            '\\' => match chars.next()? {
                (_, 'n') => value.push('\n'),
                (_, 't') => value.push('\t'),
                (_, other) => value.push(other),
            },
            other => value.push(other),
        }
    }

    None
}

impl From<&str> for Tags {
    fn from(raw: &str) -> Self {
        Tags::parse(raw)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{:?}", key, value)?;
        }
        Ok(())
    }
}
