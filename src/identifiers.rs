//! Legal, unique identifiers for feature syntax.
//!
//! Both kern class names and production glyph names share the same shape
//! rules: at most 31 characters drawn from `[A-Za-z0-9_.]`. This module
//! holds the filtering and the collision resolution used by both.

use crate::Ufo2FeaError;
use std::collections::HashSet;

/// Longest identifier makeotf accepts.
pub const MAX_NAME_LENGTH: usize = 31;

/// Used when nothing of the original name survives filtering.
pub const FALLBACK_NAME: &str = "noTransPossible";

/// Collision retries before giving up. Reaching it means the collision set
/// is corrupt.
pub(crate) const MAX_UNIQUE_ATTEMPTS: usize = 100_000;

/// Characters allowed in class and glyph names.
pub fn is_valid_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Filters `raw_suffix` down to characters accepted by `allowed`, truncates it
/// so that `prefix + suffix` fits in `max_length`, and makes the result unique
/// against `existing`.
///
/// Collisions are resolved by appending the smallest counter (starting at 1)
/// that yields a free name, eating into the suffix when the counter would
/// overflow `max_length`.
pub fn legalize_identifier(
    raw_suffix: &str,
    prefix: &str,
    allowed: fn(char) -> bool,
    max_length: usize,
    existing: &HashSet<String>,
) -> Result<String, Ufo2FeaError> {
    let room = max_length.saturating_sub(prefix.chars().count());
    let mut suffix: String = raw_suffix.chars().filter(|&c| allowed(c)).take(room).collect();
    if suffix.is_empty() {
        suffix = FALLBACK_NAME.chars().take(room).collect();
    }
    make_unique(&format!("{prefix}{suffix}"), max_length, "", existing)
}

/// Returns `name` if it is free, otherwise the first of `name<sep>1`,
/// `name<sep>2`, ... that is not in `existing`, truncating `name` so that the
/// result stays within `max_length` characters.
pub(crate) fn make_unique(
    name: &str,
    max_length: usize,
    separator: &str,
    existing: &HashSet<String>,
) -> Result<String, Ufo2FeaError> {
    if !existing.contains(name) {
        return Ok(name.to_string());
    }
    for counter in 1..MAX_UNIQUE_ATTEMPTS {
        let tail = format!("{separator}{counter}");
        let keep = max_length.saturating_sub(tail.len());
        let candidate: String = name.chars().take(keep).chain(tail.chars()).collect();
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(Ufo2FeaError::UniqueNameExhausted {
        name: name.to_string(),
    })
}
