use std::fmt;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderName, HeaderValue};

use super::MultiValueMap;
use crate::client::error::ApiClientError;

/// Read-only view of the headers added to every request.
///
/// Backed by an [`http::HeaderMap`], so header names are case-insensitive:
/// `User-Agent` and `user-agent` name the same header, and values added under
/// either spelling end up under that one header, in insertion order.
///
/// Like [`ReadOnlyMap`](super::ReadOnlyMap), clones share the same storage and
/// `insert`, `remove` and `clear` are rejected.
///
/// # Example
///
/// ```rust
/// use petstore_client::{MultiValueMap, ReadOnlyHeaders};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let headers = ReadOnlyHeaders::try_from(
///     MultiValueMap::new()
///         .add("Accept", "application/json")
///         .add("accept", "application/xml"),
/// )?;
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.get_first("ACCEPT"), Some("application/json"));
/// assert_eq!(headers.get_all("Accept"), vec!["application/json", "application/xml"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ReadOnlyHeaders {
    headers: Arc<HeaderMap>,
}

impl ReadOnlyHeaders {
    /// The first value of the header `name`, if it is visible ASCII.
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// All the visible ASCII values of the header `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Checks if the header `name` is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Iterates over the distinct header names, lowercased.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(HeaderName::as_str)
    }

    /// Iterates over every header line.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.headers.iter()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.headers.keys_len()
    }

    /// Checks if there is no header.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Checks if both views share the same backing storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.headers, &other.headers)
    }

    /// The underlying header map.
    pub fn as_header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Owned copy of the headers, ready to be merged into a request.
    pub fn to_header_map(&self) -> HeaderMap {
        self.headers.as_ref().clone()
    }

    /// Always fails: the headers are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiClientError::UnsupportedOperation`].
    pub fn insert(&self, name: &str, value: &str) -> Result<Option<HeaderValue>, ApiClientError> {
        let _ = (name, value);
        Err(ApiClientError::UnsupportedOperation {
            operation: "insert",
        })
    }

    /// Always fails: the headers are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiClientError::UnsupportedOperation`].
    pub fn remove(&self, name: &str) -> Result<Option<HeaderValue>, ApiClientError> {
        let _ = name;
        Err(ApiClientError::UnsupportedOperation {
            operation: "remove",
        })
    }

    /// Always fails: the headers are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiClientError::UnsupportedOperation`].
    pub fn clear(&self) -> Result<(), ApiClientError> {
        Err(ApiClientError::UnsupportedOperation { operation: "clear" })
    }
}

impl From<HeaderMap> for ReadOnlyHeaders {
    fn from(headers: HeaderMap) -> Self {
        Self {
            headers: Arc::new(headers),
        }
    }
}

impl TryFrom<MultiValueMap> for ReadOnlyHeaders {
    type Error = ApiClientError;

    fn try_from(map: MultiValueMap) -> Result<Self, Self::Error> {
        let mut headers = HeaderMap::with_capacity(map.len());

        for (name, values) in map.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            for value in values {
                headers.append(name.clone(), HeaderValue::from_str(value)?);
            }
        }

        Ok(headers.into())
    }
}

impl fmt::Debug for ReadOnlyHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.headers.as_ref(), f)
    }
}

impl PartialEq for ReadOnlyHeaders {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.headers == other.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> ReadOnlyHeaders {
        MultiValueMap::new()
            .add("User-Agent", "Java-SDK")
            .add("Accept", "application/json")
            .add("Accept", "application/xml")
            .try_into()
            .expect("valid headers")
    }

    #[test]
    fn test_lookup_ignores_case() {
        let headers = headers();

        assert_eq!(headers.get_first("user-agent"), Some("Java-SDK"));
        assert_eq!(headers.get_first("USER-AGENT"), Some("Java-SDK"));
        assert!(headers.contains_key("accept"));
        assert_eq!(headers.keys().collect::<Vec<_>>(), vec!["user-agent", "accept"]);
    }

    #[test]
    fn test_names_differing_in_case_are_merged() {
        let headers = ReadOnlyHeaders::try_from(
            MultiValueMap::new()
                .add("Accept", "a")
                .add("X-Request-ID", "abc-123")
                .add("accept", "b"),
        )
        .expect("valid headers");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get_all("Accept"), vec!["a", "b"]);
        assert_eq!(headers.iter().count(), 3);
    }

    #[test]
    fn test_mutation_is_rejected() {
        let headers = headers();

        let result = headers.insert("X-Custom", "value");
        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedOperation { operation: "insert" })
        ));

        let result = headers.remove("Accept");
        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedOperation { operation: "remove" })
        ));

        let result = headers.clear();
        assert!(matches!(
            result,
            Err(ApiClientError::UnsupportedOperation { operation: "clear" })
        ));

        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_clone_shares_storage() {
        let view = headers();
        let other = view.clone();

        assert!(view.ptr_eq(&other));
        assert!(!view.ptr_eq(&headers()));
        assert_eq!(view, headers());
    }

    #[test]
    fn test_to_header_map() {
        let header_map = headers().to_header_map();

        assert_eq!(header_map.len(), 3);
        assert_eq!(header_map[http::header::USER_AGENT], "Java-SDK");
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let result = ReadOnlyHeaders::try_from(MultiValueMap::new().add("Invalid Header", "x"));

        assert!(matches!(result, Err(ApiClientError::InvalidHeaderName(_))));
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let result = ReadOnlyHeaders::try_from(MultiValueMap::new().add("X-Custom", "a\nb"));

        assert!(matches!(result, Err(ApiClientError::InvalidHeaderValue(_))));
    }
}
