use chrono::{DateTime, Utc};

mod builder;
pub use self::builder::{ApiClientBuilder, DEFAULT_BASE_PATH, DEFAULT_USER_AGENT};

mod parameters;
pub use self::parameters::{MultiValueMap, ReadOnlyHeaders, ReadOnlyMap, ReadOnlyMultiValueMap};

mod auth;
pub use self::auth::{
    ApiKeyAuth, ApiKeyLocation, AuthParams, Authentication, AuthenticationError,
    AuthenticationKind, HttpBasicAuth, HttpBearerAuth, OAuth, SecureString,
};

mod date_format;
pub use self::date_format::{DateFormat, DatePattern, parse_time_zone};

mod error;
pub use self::error::ApiClientError;

/// Read-only registry of authentications, keyed by scheme name.
pub type Authentications = ReadOnlyMap<Authentication>;

/// Immutable configuration of a Pet Store API client.
///
/// Created with [`ApiClientBuilder`]. The collections are read-only views
/// shared with the builder that produced the client; the date formatter is a
/// shared handle, so changing its time zone after `build` is visible here.
///
/// # Example
///
/// ```rust
/// use petstore_client::ApiClient;
///
/// let client = ApiClient::builder().base_path("base-path").build();
///
/// assert_eq!(client.base_path(), "base-path");
/// assert!(client.authentications().contains_key("http_basic_test"));
/// ```
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`; it can be shared across threads as-is.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_path: String,
    transport: reqwest::Client,
    authentications: Authentications,
    default_headers: ReadOnlyHeaders,
    default_cookies: ReadOnlyMultiValueMap,
    date_format: DateFormat,
    debugging: bool,
}

// Create
impl ApiClient {
    /// Creates a builder holding the default configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Creates the default HTTP transport.
    pub fn build_transport() -> reqwest::Client {
        reqwest::Client::new()
    }
}

// Accessors
impl ApiClient {
    /// The base URL every request path is appended to.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The HTTP transport.
    pub fn transport(&self) -> &reqwest::Client {
        &self.transport
    }

    /// The authentication registry.
    pub fn authentications(&self) -> &Authentications {
        &self.authentications
    }

    /// The authentication registered under `name`.
    pub fn authentication(&self, name: &str) -> Option<&Authentication> {
        self.authentications.get(name)
    }

    /// The headers added to every request; names are case-insensitive.
    pub fn default_headers(&self) -> &ReadOnlyHeaders {
        &self.default_headers
    }

    /// The cookies added to every request.
    pub fn default_cookies(&self) -> &ReadOnlyMultiValueMap {
        &self.default_cookies
    }

    /// The date formatter.
    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    /// Whether HTTP exchanges should be logged.
    pub fn is_debugging(&self) -> bool {
        self.debugging
    }
}

// Helpers
impl ApiClient {
    /// Formats a date with the configured formatter.
    pub fn format_date(&self, date: &DateTime<Utc>) -> String {
        self.date_format.format(date)
    }

    /// Parses a date with the configured formatter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidDate`] if the input cannot be parsed.
    pub fn parse_date(&self, input: &str) -> Result<DateTime<Utc>, ApiClientError> {
        self.date_format.parse(input)
    }

    /// Collects the credentials of the named schemes, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::UnknownAuthentication`] for a name missing
    /// from the registry, or [`ApiClientError::Authentication`] if credentials
    /// cannot be encoded.
    pub fn auth_params(&self, auth_names: &[&str]) -> Result<AuthParams, ApiClientError> {
        let mut params = AuthParams::default();

        for name in auth_names {
            let authentication = self.authentication(name).ok_or_else(|| {
                ApiClientError::UnknownAuthentication {
                    name: (*name).to_string(),
                }
            })?;
            authentication.apply_to_params(&mut params)?;
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<ApiClient>();
    }

    #[test]
    fn test_default_user_agent_ignores_case() {
        let client = ApiClient::builder().build();

        assert_eq!(client.default_headers().get_first("user-agent"), Some("Java-SDK"));
        assert_eq!(client.default_headers().get_first("User-Agent"), Some("Java-SDK"));
    }

    #[test]
    fn test_auth_params_without_credentials_is_empty() {
        let client = ApiClient::builder().build();

        let params = client
            .auth_params(&["api_key", "api_key_query", "http_basic_test", "petstore_auth"])
            .expect("default schemes are registered");

        assert!(params.headers.is_empty());
        assert!(params.query.is_empty());
        assert!(params.cookies.is_empty());
    }

    #[test]
    fn test_auth_params_applies_named_schemes_only() {
        let client = ApiClient::builder()
            .api_key_auth(ApiKeyAuth::new(ApiKeyLocation::Query, "api_key_query").with_api_key("k"))
            .expect("API key authentication is registered")
            .basic_auth(HttpBasicAuth::new("user", "pass"))
            .expect("Basic authentication is registered")
            .build();

        // the first API key entry (`api_key`) now carries the query key
        let params = client
            .auth_params(&["api_key"])
            .expect("api_key is registered");
        assert_eq!(params.query.get_first("api_key_query"), Some("k"));
        assert!(params.headers.is_empty());

        let params = client
            .auth_params(&["http_basic_test"])
            .expect("http_basic_test is registered");
        assert_eq!(params.headers[http::header::AUTHORIZATION], "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_auth_params_unknown_scheme() {
        let client = ApiClient::builder().build();

        let result = client.auth_params(&["missing"]);

        let Err(error) = result else {
            panic!("expected an unknown authentication error");
        };
        insta::assert_snapshot!(error, @"Authentication undefined: missing");
    }
}
