//! Cache key construction
//!
//! Keys have the shape `namespace:prefix:discriminator`. Patterns built here
//! escape the literal namespace and prefix so that only the wildcard part
//! is interpreted by the glob dialect.

use flowcache_domain::constants::KEY_SEPARATOR;
use flowcache_domain::error::Result;
use flowcache_domain::ports::KeyStrategy;
use flowcache_domain::value_objects::escape_glob;
use serde_json::Value;
use std::fmt::Write as _;

/// Deterministic builder for namespaced keys
///
/// # Example
///
/// ```
/// use flowcache_infrastructure::cache::KeyBuilder;
///
/// let keys = KeyBuilder::new("app");
/// assert_eq!(keys.key("workflows", "42"), "app:workflows:42");
/// assert_eq!(keys.pattern("workflows"), "app:workflows:*");
/// assert_eq!(keys.namespace_pattern(), "app:*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBuilder {
    namespace: String,
}

impl KeyBuilder {
    /// Create a builder for `namespace`
    pub fn new<S: Into<String>>(namespace: S) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The namespace every key starts with
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Join a prefix and a discriminator without the namespace
    pub fn join(prefix: &str, discriminator: &str) -> String {
        format!("{prefix}{KEY_SEPARATOR}{discriminator}")
    }

    /// `namespace:prefix:discriminator`
    pub fn key(&self, prefix: &str, discriminator: &str) -> String {
        self.qualify(&Self::join(prefix, discriminator))
    }

    /// `namespace:relative`
    pub fn qualify(&self, relative: &str) -> String {
        format!("{}{KEY_SEPARATOR}{relative}", self.namespace)
    }

    /// Every key under `prefix`: `namespace:prefix:*`
    pub fn pattern(&self, prefix: &str) -> String {
        format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}*",
            escape_glob(&self.namespace),
            escape_glob(prefix)
        )
    }

    /// Scope a relative glob to the namespace; the glob itself is kept as is
    pub fn qualify_pattern(&self, relative_pattern: &str) -> String {
        format!(
            "{}{KEY_SEPARATOR}{relative_pattern}",
            escape_glob(&self.namespace)
        )
    }

    /// Every key of the namespace: `namespace:*`
    pub fn namespace_pattern(&self) -> String {
        self.qualify_pattern("*")
    }
}

/// Canonical JSON encoding
///
/// Object keys are sorted recursively and no whitespace is emitted, so
/// equal values always encode to equal strings regardless of insertion
/// order.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // A string always serializes through Display
                let _ = write!(out, "{}", Value::String(key.clone()));
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

/// Default key strategy: canonical JSON of the call arguments
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalJsonKeys;

impl KeyStrategy for CanonicalJsonKeys {
    fn build_key(&self, args: &Value) -> Result<String> {
        Ok(canonical_json(args))
    }
}
