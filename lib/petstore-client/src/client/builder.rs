use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, USER_AGENT};
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::auth::{ApiKeyAuth, ApiKeyLocation, HttpBasicAuth, HttpBearerAuth, OAuth};
use super::date_format::DateFormat;
use super::parameters::{MultiValueMap, ReadOnlyHeaders, ReadOnlyMultiValueMap};
use super::{ApiClient, ApiClientError, Authentication, Authentications};

/// Base path of the Pet Store service.
pub const DEFAULT_BASE_PATH: &str = "http://petstore.swagger.io:80/v2";

/// Value of the default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = "Java-SDK";

/// Immutable builder for [`ApiClient`] values.
///
/// Every configuration method borrows the builder and returns a new one with
/// exactly one field replaced; the receiver is left untouched, so a builder
/// can serve as the common base of several configurations. Collections are
/// shared between the builders, never copied.
///
/// # Default Configuration
///
/// - **Base path**: `http://petstore.swagger.io:80/v2`
/// - **Transport**: a fresh client from [`ApiClient::build_transport`]
/// - **Authentications**: `api_key` (API key in the `api_key` header),
///   `api_key_query` (API key in the `api_key_query` query parameter),
///   `http_basic_test` (Basic, no credentials), `petstore_auth` (OAuth, no token)
/// - **Default headers**: `User-Agent: Java-SDK`
/// - **Default cookies**: none
/// - **Date format**: RFC 3339 with milliseconds, UTC
/// - **Debugging**: off
///
/// # Example
///
/// ```rust
/// use petstore_client::{ApiClient, HttpBasicAuth};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base = ApiClient::builder().base_path("https://petstore.example.com/v2");
///
/// let anonymous = base.build();
/// let authenticated = base
///     .basic_auth(HttpBasicAuth::new("my-username", "my-password"))?
///     .debugging(true)
///     .build();
///
/// assert_eq!(anonymous.base_path(), authenticated.base_path());
/// assert!(!anonymous.is_debugging());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    base_path: String,
    transport: reqwest::Client,
    authentications: Authentications,
    default_headers: ReadOnlyHeaders,
    default_cookies: ReadOnlyMultiValueMap,
    date_format: DateFormat,
    debugging: bool,
}

impl ApiClientBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the `ApiClient` holding the current configuration.
    ///
    /// The client shares the collections and the date formatter of the builder.
    pub fn build(&self) -> ApiClient {
        debug!(
            base_path = %self.base_path,
            authentications = ?self.authentications.keys().collect::<Vec<_>>(),
            default_headers = self.default_headers.len(),
            default_cookies = self.default_cookies.len(),
            debugging = self.debugging,
            "building API client"
        );

        ApiClient {
            base_path: self.base_path.clone(),
            transport: self.transport.clone(),
            authentications: self.authentications.clone(),
            default_headers: self.default_headers.clone(),
            default_cookies: self.default_cookies.clone(),
            date_format: self.date_format.clone(),
            debugging: self.debugging,
        }
    }

    /// Sets the base URL every request path is appended to.
    ///
    /// The value is stored as given.
    #[must_use]
    pub fn base_path(&self, base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..self.clone()
        }
    }

    /// Sets the HTTP transport.
    #[must_use]
    pub fn transport(&self, transport: reqwest::Client) -> Self {
        Self {
            transport,
            ..self.clone()
        }
    }

    /// Replaces the whole authentication registry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use indexmap::IndexMap;
    /// use petstore_client::{ApiClient, Authentication, HttpBasicAuth};
    ///
    /// let mut authentications = IndexMap::new();
    /// authentications.insert(
    ///     "http_basic_test".to_string(),
    ///     Authentication::from(HttpBasicAuth::new("my-username", "my-password")),
    /// );
    ///
    /// let client = ApiClient::builder().authentications(authentications).build();
    /// assert_eq!(client.authentications().len(), 1);
    /// ```
    #[must_use]
    pub fn authentications(&self, authentications: impl Into<Authentications>) -> Self {
        Self {
            authentications: authentications.into(),
            ..self.clone()
        }
    }

    /// Sets the headers added to every request.
    ///
    /// Header names are case-insensitive: values added under `Accept` and
    /// `accept` end up under the same header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidHeaderName`] or
    /// [`ApiClientError::InvalidHeaderValue`] if an entry is not a valid HTTP
    /// header.
    pub fn default_headers(
        &self,
        default_headers: MultiValueMap,
    ) -> Result<Self, ApiClientError> {
        Ok(Self {
            default_headers: ReadOnlyHeaders::try_from(default_headers)?,
            ..self.clone()
        })
    }

    /// Sets the cookies added to every request.
    #[must_use]
    pub fn default_cookies(&self, default_cookies: impl Into<ReadOnlyMultiValueMap>) -> Self {
        Self {
            default_cookies: default_cookies.into(),
            ..self.clone()
        }
    }

    /// Sets the date formatter.
    ///
    /// The formatter is shared, not copied: later changes to its time zone are
    /// visible through the built client.
    #[must_use]
    pub fn date_format(&self, date_format: DateFormat) -> Self {
        Self {
            date_format,
            ..self.clone()
        }
    }

    /// Enables or disables debugging of the HTTP exchanges.
    #[must_use]
    pub fn debugging(&self, debugging: bool) -> Self {
        Self {
            debugging,
            ..self.clone()
        }
    }

    /// Installs Basic credentials in the registry entry holding a Basic authentication.
    ///
    /// With the default registry, this updates `http_basic_test`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::MissingAuthentication`] if no Basic
    /// authentication is registered.
    pub fn basic_auth(&self, basic_auth: HttpBasicAuth) -> Result<Self, ApiClientError> {
        self.replace_authentication(basic_auth)
    }

    /// Installs a bearer token in the registry entry holding a Bearer authentication.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::MissingAuthentication`] if no Bearer
    /// authentication is registered; the default registry has none.
    pub fn bearer_auth(&self, bearer_auth: HttpBearerAuth) -> Result<Self, ApiClientError> {
        self.replace_authentication(bearer_auth)
    }

    /// Installs an API key in the first registry entry holding an API key authentication.
    ///
    /// With the default registry, this updates `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::MissingAuthentication`] if no API key
    /// authentication is registered.
    pub fn api_key_auth(&self, api_key_auth: ApiKeyAuth) -> Result<Self, ApiClientError> {
        self.replace_authentication(api_key_auth)
    }

    /// Installs an OAuth token in the registry entry holding an OAuth authentication.
    ///
    /// With the default registry, this updates `petstore_auth`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::MissingAuthentication`] if no OAuth
    /// authentication is registered.
    pub fn oauth(&self, oauth: OAuth) -> Result<Self, ApiClientError> {
        self.replace_authentication(oauth)
    }

    /// Replaces the first registry entry of the same kind as `authentication`.
    ///
    /// Entries are scanned in registration order and matched on their kind,
    /// not on their name. The scheme name is kept, the other entries are
    /// shared with this builder, and nothing is ever inserted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::MissingAuthentication`] if the registry holds
    /// no authentication of that kind.
    pub fn replace_authentication(
        &self,
        authentication: impl Into<Authentication>,
    ) -> Result<Self, ApiClientError> {
        let authentication = authentication.into();
        let kind = authentication.kind();

        let mut entries = self.authentications.to_shared();
        let Some((name, slot)) = entries
            .iter_mut()
            .find(|(_, current)| current.kind() == kind)
        else {
            warn!(%kind, "no authentication of this kind to replace");
            return Err(ApiClientError::MissingAuthentication { kind });
        };

        debug!(scheme = %name, %kind, "replacing authentication");
        *slot = Arc::new(authentication);

        Ok(Self {
            authentications: Authentications::from_shared(entries),
            ..self.clone()
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            transport: ApiClient::build_transport(),
            authentications: default_authentications(),
            default_headers: HeaderMap::from_iter([(
                USER_AGENT,
                HeaderValue::from_static(DEFAULT_USER_AGENT),
            )])
            .into(),
            default_cookies: ReadOnlyMultiValueMap::default(),
            date_format: DateFormat::rfc3339(),
            debugging: false,
        }
    }
}

fn default_authentications() -> Authentications {
    let mut authentications = IndexMap::new();
    authentications.insert(
        "api_key".to_string(),
        Authentication::from(ApiKeyAuth::new(ApiKeyLocation::Header, "api_key")),
    );
    authentications.insert(
        "api_key_query".to_string(),
        Authentication::from(ApiKeyAuth::new(ApiKeyLocation::Query, "api_key_query")),
    );
    authentications.insert(
        "http_basic_test".to_string(),
        Authentication::from(HttpBasicAuth::default()),
    );
    authentications.insert(
        "petstore_auth".to_string(),
        Authentication::from(OAuth::default()),
    );
    authentications.into()
}
