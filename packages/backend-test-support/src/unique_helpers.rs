//! Unique names for test isolation.

use ulid::Ulid;

/// A unique logical database name, `{prefix}_{ulid}` in lowercase, safe to
/// use as a MongoDB database name (under 64 bytes for short prefixes).
///
/// ```
/// use backend_test_support::unique_helpers::unique_db_name;
///
/// let name = unique_db_name("health");
/// assert!(name.starts_with("health_"));
/// assert!(!name.contains('-'));
/// ```
pub fn unique_db_name(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new().to_string().to_lowercase())
}
