//! Key pattern helpers
//!
//! Literal key components that end up inside an eviction pattern must not
//! be interpreted as wildcards.

use crate::constants::GLOB_SPECIAL_CHARS;

/// Escape every glob metacharacter so `literal` only matches itself
///
/// # Example
///
/// ```
/// use flowcache_domain::escape_glob;
///
/// assert_eq!(escape_glob("GET:/workflows?page=[1]"), r"GET:/workflows\?page=\[1\]");
/// assert_eq!(escape_glob("plain"), "plain");
/// ```
pub fn escape_glob(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if GLOB_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
