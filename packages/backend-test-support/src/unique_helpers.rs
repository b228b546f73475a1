//! Test helpers for generating unique test data
//!
//! ULID suffixes keep data from separate tests apart when they share a store.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("game");
/// let id2 = unique_str("game");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player name: `{prefix} {last 6 ulid chars}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_player_name;
///
/// let name = unique_player_name("Alice");
/// assert!(name.starts_with("Alice "));
/// assert_eq!(name.len(), "Alice ".len() + 6);
/// ```
pub fn unique_player_name(prefix: &str) -> String {
    let id = Ulid::new().to_string();
    format!("{} {}", prefix, &id[id.len() - 6..])
}
