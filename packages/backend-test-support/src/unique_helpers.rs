//! Unique names so tests sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{uuid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("hangout");
/// assert!(a.starts_with("hangout-"));
/// assert_ne!(a, unique_str("hangout"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
