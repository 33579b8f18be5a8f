use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::MultiValueMap;
use crate::client::error::ApiClientError;

/// Read-only multi-valued map, as exposed for default cookies.
pub type ReadOnlyMultiValueMap = ReadOnlyMap<Vec<String>>;

/// Shared, insertion-ordered map that refuses mutation.
///
/// Cloning is cheap: clones share the same backing storage, and every value is
/// kept behind its own [`Arc`] so a shallow copy of the map still points at the
/// same values.
///
/// `insert`, `remove` and `clear` exist only to reject the attempt with
/// [`ApiClientError::UnsupportedOperation`].
///
/// # Example
///
/// ```rust
/// use petstore_client::{ApiClientError, ReadOnlyMap};
///
/// let map = ReadOnlyMap::from_iter([("answer", 42)]);
/// assert_eq!(map.get("answer"), Some(&42));
///
/// let result = map.insert("question", 0);
/// assert!(matches!(result, Err(ApiClientError::UnsupportedOperation { operation: "insert" })));
/// ```
pub struct ReadOnlyMap<V> {
    entries: Arc<IndexMap<String, Arc<V>>>,
}

impl<V> ReadOnlyMap<V> {
    pub(in crate::client) fn from_shared(entries: IndexMap<String, Arc<V>>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Shallow copy of the entries: values are shared, not cloned.
    pub(in crate::client) fn to_shared(&self) -> IndexMap<String, Arc<V>> {
        self.entries.as_ref().clone()
    }

    /// Returns the value registered under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key).map(Arc::as_ref)
    }

    /// Returns the shared value registered under `key`.
    pub fn get_shared(&self, key: &str) -> Option<&Arc<V>> {
        self.entries.get(key)
    }

    /// Checks if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks if both maps share the same backing storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Always fails: the map is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiClientError::UnsupportedOperation`].
    pub fn insert(&self, key: impl Into<String>, value: V) -> Result<Option<V>, ApiClientError> {
        let _ = (key, value);
        Err(ApiClientError::UnsupportedOperation {
            operation: "insert",
        })
    }

    /// Always fails: the map is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiClientError::UnsupportedOperation`].
    pub fn remove(&self, key: &str) -> Result<Option<V>, ApiClientError> {
        let _ = key;
        Err(ApiClientError::UnsupportedOperation {
            operation: "remove",
        })
    }

    /// Always fails: the map is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiClientError::UnsupportedOperation`].
    pub fn clear(&self) -> Result<(), ApiClientError> {
        Err(ApiClientError::UnsupportedOperation { operation: "clear" })
    }
}

impl ReadOnlyMap<Vec<String>> {
    /// The first value under `key`.
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Serializes the entries into a single `Cookie` header value:
    /// `name1=value1; name2=value2`.
    pub fn to_cookie_header(&self) -> String {
        self.iter()
            .flat_map(|(name, values)| values.iter().map(move |value| format!("{name}={value}")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<V> Clone for ReadOnlyMap<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for ReadOnlyMap<V> {
    fn default() -> Self {
        Self::from_shared(IndexMap::new())
    }
}

impl<V: fmt::Debug> fmt::Debug for ReadOnlyMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for ReadOnlyMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.entries == other.entries
    }
}

impl<V> From<IndexMap<String, V>> for ReadOnlyMap<V> {
    fn from(entries: IndexMap<String, V>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<MultiValueMap> for ReadOnlyMap<Vec<String>> {
    fn from(map: MultiValueMap) -> Self {
        map.into_entries().into()
    }
}

impl<K, V> FromIterator<(K, V)> for ReadOnlyMap<V>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), Arc::new(value)))
            .collect();
        Self::from_shared(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies() -> ReadOnlyMultiValueMap {
        MultiValueMap::new()
            .add("session_id", "abc123")
            .add("tracking", "a")
            .add("tracking", "b")
            .into()
    }

    #[test]
    fn test_lookup_and_iteration() {
        let map = cookies();

        assert_eq!(map.len(), 2);
        assert!(map.contains_key("tracking"));
        assert!(!map.contains_key("Tracking"));
        assert_eq!(map.get_first("session_id"), Some("abc123"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["session_id", "tracking"]);
    }

    #[test]
    fn test_mutation_is_rejected() {
        let map = cookies();

        let result = map.insert("user_id", vec!["456".to_string()]);
        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedOperation { operation: "insert" })
        ));

        let result = map.remove("tracking");
        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedOperation { operation: "remove" })
        ));

        let result = map.clear();
        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedOperation { operation: "clear" })
        ));

        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_clone_shares_storage() {
        let map = cookies();
        let other = map.clone();

        assert!(map.ptr_eq(&other));
        assert!(!map.ptr_eq(&cookies()));
        assert_eq!(map, cookies());
    }

    #[test]
    fn test_shallow_copy_shares_values() {
        let map = cookies();
        let copy = ReadOnlyMap::from_shared(map.to_shared());

        assert!(!map.ptr_eq(&copy));
        let original = map.get_shared("tracking").expect("tracking is present");
        let copied = copy.get_shared("tracking").expect("tracking is present");
        assert!(Arc::ptr_eq(original, copied));
    }

    #[test]
    fn test_to_cookie_header() {
        let cookies = ReadOnlyMultiValueMap::from(
            MultiValueMap::new()
                .add("session_id", "abc123")
                .add("user_id", "456"),
        );

        insta::assert_snapshot!(cookies.to_cookie_header(), @"session_id=abc123; user_id=456");
        assert_eq!(ReadOnlyMultiValueMap::default().to_cookie_header(), "");
    }

    #[test]
    fn test_debug_output() {
        let map = ReadOnlyMap::from_iter([("a", 1), ("b", 2)]);
        insta::assert_snapshot!(format!("{map:?}"), @r#"{"a": 1, "b": 2}"#);
    }
}
