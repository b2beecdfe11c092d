//! Route path assembly.
//!
//! Paths are built from annotations with `clean_url`, then translated to
//! the engine's capture syntax with `engine_path`: `:id` becomes `{id}` and
//! a trailing `*rest` becomes `{*rest}`. Engine-style captures pass through.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static SLASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").expect("static pattern is valid"));

/// Join path pieces into a rooted route path.
///
/// Empty and `-` pieces are skipped; runs of `/` collapse to one.
pub fn clean_url(pieces: &[&str]) -> String {
    let mut buffer = String::from("/");

    for piece in pieces {
        if !piece.is_empty() && *piece != "-" {
            buffer.push('/');
            buffer.push_str(piece);
        }
    }

    SLASH_RUNS.replace_all(&buffer, "/").into_owned()
}

/// A route path segment the engine cannot register.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("capture segment `{0}` has no name")]
    UnnamedCapture(String),

    #[error("catch-all segment `{0}` must be the last segment")]
    CatchAllNotLast(String),

    #[error("segment `{0}` is not a valid capture")]
    MalformedCapture(String),
}

/// Translate a cleaned path into the engine's route syntax.
pub fn engine_path(path: &str) -> Result<String, PathError> {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);
    let mut translated = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let segment = if let Some(name) = segment.strip_prefix(':') {
            format!("{{{}}}", name)
        } else if let Some(name) = segment.strip_prefix('*') {
            format!("{{*{}}}", name)
        } else {
            segment.to_string()
        };

        check_capture(&segment, i == last)?;
        translated.push(segment);
    }

    Ok(translated.join("/"))
}

fn check_capture(segment: &str, is_last: bool) -> Result<(), PathError> {
    if !segment.contains(['{', '}']) {
        return Ok(());
    }

    let inner = segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|inner| !inner.contains(['{', '}']))
        .ok_or_else(|| PathError::MalformedCapture(segment.to_string()))?;

    let (name, catch_all) = match inner.strip_prefix('*') {
        Some(name) => (name, true),
        None => (inner, false),
    };
    if name.is_empty() {
        return Err(PathError::UnnamedCapture(segment.to_string()));
    }
    if catch_all && !is_last {
        return Err(PathError::CatchAllNotLast(segment.to_string()));
    }

    Ok(())
}
