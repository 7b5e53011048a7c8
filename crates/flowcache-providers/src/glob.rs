//! Key pattern matching
//!
//! Compiles the key pattern dialect (`*`, `?`, `[...]`, `\` escapes) into a
//! matcher. `*` crosses the `:` separator, the same way Redis `SCAN MATCH`
//! treats keys.

use flowcache_domain::error::{Error, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Compile a key pattern
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for malformed patterns (for example an
/// unclosed character class).
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::invalid_argument(format!("Invalid key pattern '{pattern}': {e}")))
}
