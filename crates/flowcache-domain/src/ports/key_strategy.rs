//! Cache Key Strategy Port
//!
//! Method-cache wrappers turn call arguments into the discriminator part
//! of a cache key through this port. The default implementation lives in
//! the infrastructure layer (canonical JSON); callers can plug a closure.

use crate::error::Result;
use serde_json::Value;

/// Builds the discriminator of a cache key from serialized call arguments
///
/// Implementations must be deterministic: equal argument values must always
/// produce equal keys.
///
/// # Example
///
/// ```
/// use flowcache_domain::KeyStrategy;
/// use serde_json::json;
///
/// let by_id = |args: &serde_json::Value| args["id"].as_str().unwrap_or_default().to_string();
/// assert_eq!(by_id.build_key(&json!({"id": "wf-1"})).unwrap(), "wf-1");
/// ```
pub trait KeyStrategy: Send + Sync {
    /// Build the key discriminator for the given arguments
    fn build_key(&self, args: &Value) -> Result<String>;
}

impl<F> KeyStrategy for F
where
    F: Fn(&Value) -> String + Send + Sync,
{
    fn build_key(&self, args: &Value) -> Result<String> {
        Ok(self(args))
    }
}
