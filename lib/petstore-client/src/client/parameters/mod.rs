//! Collections carried by the client configuration.
//!
//! - [`MultiValueMap`] - owned, ordered, multi-valued map used to assemble
//!   default headers, default cookies and query parameters
//! - [`ReadOnlyHeaders`] - shared, case-insensitive view of the default
//!   headers, backed by an `http::HeaderMap`
//! - [`ReadOnlyMap`] - shared view that supports lookup and iteration but
//!   rejects every mutation with [`ApiClientError::UnsupportedOperation`]
//!
//! [`ApiClientError::UnsupportedOperation`]: crate::ApiClientError::UnsupportedOperation

mod multi_value;
pub use self::multi_value::MultiValueMap;

mod headers;
pub use self::headers::ReadOnlyHeaders;

mod read_only;
pub use self::read_only::{ReadOnlyMap, ReadOnlyMultiValueMap};
