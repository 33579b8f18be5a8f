//! # Pet Store Client
//!
//! Immutable configuration for the Pet Store API client.
//!
//! This crate assembles the configuration an HTTP transport needs to talk to
//! the Pet Store service:
//! - **[`ApiClientBuilder`]** - persistent builder: every method returns a new
//!   builder with one setting replaced, the receiver stays untouched
//! - **[`ApiClient`]** - the immutable configuration produced by the builder
//!
//! ## Quick Start
//!
//! ```rust
//! use petstore_client::{ApiClient, HttpBasicAuth, MultiValueMap};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::builder()
//!     .base_path("https://petstore.example.com/v2")
//!     .default_cookies(MultiValueMap::new().add("session_id", "abc123"))
//!     .basic_auth(HttpBasicAuth::new("my-username", "my-password"))?
//!     .build();
//!
//! assert_eq!(client.base_path(), "https://petstore.example.com/v2");
//! assert_eq!(client.default_cookies().to_cookie_header(), "session_id=abc123");
//! # Ok(())
//! # }
//! ```
//!
//! ## Authentications
//!
//! The registry maps a scheme name to an [`Authentication`]. The default
//! registry declares the schemes of the Pet Store service without credentials:
//!
//! | Scheme            | Kind                                    |
//! |-------------------|-----------------------------------------|
//! | `api_key`         | API key in the `api_key` header         |
//! | `api_key_query`   | API key in the `api_key_query` query    |
//! | `http_basic_test` | HTTP Basic                              |
//! | `petstore_auth`   | OAuth                                   |
//!
//! Credentials are installed by kind: [`ApiClientBuilder::basic_auth`] replaces
//! the entry holding a Basic authentication, whatever its name. Asking for a
//! kind that is not registered is an error:
//!
//! ```rust
//! use petstore_client::{ApiClient, ApiClientError, HttpBearerAuth};
//!
//! let result = ApiClient::builder().bearer_auth(HttpBearerAuth::new("token"));
//! assert!(matches!(result, Err(ApiClientError::MissingAuthentication { .. })));
//! ```
//!
//! ## Read-only Collections
//!
//! The registry and the default cookies are exposed as [`ReadOnlyMap`]s, the
//! default headers as [`ReadOnlyHeaders`], whose names are case-insensitive.
//! Lookups work as usual; mutations are rejected:
//!
//! ```rust
//! use petstore_client::{ApiClient, ApiClientError, HttpBasicAuth};
//!
//! let client = ApiClient::builder().build();
//! let result = client
//!     .authentications()
//!     .insert("my_auth", HttpBasicAuth::default().into());
//!
//! assert!(matches!(result, Err(ApiClientError::UnsupportedOperation { .. })));
//! assert_eq!(client.default_headers().get_first("user-agent"), Some("Java-SDK"));
//! ```
//!
//! ## Dates
//!
//! Dates use RFC 3339 with milliseconds in UTC unless another [`DateFormat`]
//! is configured. The formatter is shared with the client: changing its time
//! zone after `build` affects the client too.
//!
//! ```rust
//! use petstore_client::{ApiClient, DateFormat, parse_time_zone};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let format = DateFormat::with_pattern("%Y-%m-%dT%H:%M:%S%:z")?
//!     .with_time_zone(parse_time_zone("GMT+10")?);
//! let client = ApiClient::builder().date_format(format.clone()).build();
//!
//! let date = client.parse_date("2015-11-07T03:49:09Z")?;
//! assert_eq!(client.format_date(&date), "2015-11-07T13:49:09+10:00");
//!
//! format.set_time_zone(parse_time_zone("GMT+11")?);
//! assert_eq!(client.format_date(&date), "2015-11-07T14:49:09+11:00");
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` when building and replacing
//! authentications, `warn` on a failed replacement). Credentials are never
//! logged. Install a subscriber such as `tracing-subscriber` to see them.

mod client;

pub use self::client::{
    ApiClient, ApiClientBuilder, ApiClientError, ApiKeyAuth, ApiKeyLocation, AuthParams,
    Authentication, AuthenticationError, AuthenticationKind, Authentications, DEFAULT_BASE_PATH,
    DEFAULT_USER_AGENT, DateFormat, DatePattern, HttpBasicAuth, HttpBearerAuth, MultiValueMap,
    OAuth, ReadOnlyHeaders, ReadOnlyMap, ReadOnlyMultiValueMap, SecureString, parse_time_zone,
};
