use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered map from a name to an ordered list of values.
///
/// Used to assemble default headers, default cookies and query parameters.
/// Names keep their insertion order, and so do the values under a name. Names
/// are compared exactly; the builder folds header names when it takes them.
///
/// # Example
///
/// ```rust
/// use petstore_client::MultiValueMap;
///
/// let headers = MultiValueMap::new()
///     .add("Accept", "application/json")
///     .add("Accept", "application/xml")
///     .add("X-Request-ID", "abc-123");
///
/// assert_eq!(headers.len(), 2);
/// assert_eq!(headers.get_first("Accept"), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiValueMap {
    entries: IndexMap<String, Vec<String>>,
}

impl MultiValueMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name` and returns the map.
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a value under `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replaces all values under `name`.
    pub fn insert_all<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.entries.insert(name.into(), values);
    }

    /// All values under `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// The first value under `name`.
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Checks if `name` is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over names and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(in crate::client) fn into_entries(self) -> IndexMap<String, Vec<String>> {
        self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for MultiValueMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut result = Self::new();
        for (name, value) in iter {
            result.push(name, value);
        }
        result
    }
}
