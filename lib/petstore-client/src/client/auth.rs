use std::fmt;

use base64::Engine;
use http::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::parameters::MultiValueMap;

/// Credentials that cannot be written into an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthenticationError {
    /// The bearer token is not a valid `Authorization` header value.
    #[display("Bearer token contains invalid characters: {message}")]
    InvalidBearerToken {
        /// Why the header value was refused.
        message: String,
    },

    /// The Basic username does not fit in an `Authorization` header.
    #[display("Basic auth username contains invalid characters: {message}")]
    InvalidUsername {
        /// Why the header value was refused.
        message: String,
    },

    /// The Basic password does not fit in an `Authorization` header.
    #[display("Basic auth password contains invalid characters: {message}")]
    InvalidPassword {
        /// Why the header value was refused.
        message: String,
    },

    /// The parameter name of a header-located API key is not a header name.
    #[display("Invalid API key header name '{header_name}': {message}")]
    InvalidHeaderName {
        /// The configured parameter name.
        header_name: String,
        /// Why the name was refused.
        message: String,
    },

    /// The API key, with its prefix, is not a valid header value.
    #[display("API key contains invalid characters: {message}")]
    InvalidApiKey {
        /// Why the header value was refused.
        message: String,
    },
}

/// Password, token or API key held by an authentication.
///
/// The buffer is wiped on drop. `Debug` prints `[REDACTED]` and `Display`
/// keeps at most the first and last four characters, so a registry can be
/// logged without leaking credentials.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Wraps a credential.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// The clear-text credential, for writing it into a request.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares the credential with `other` without exposing it.
    pub fn equals_str(&self, other: &str) -> bool {
        self.0 == other
    }

    fn masked(value: &str) -> String {
        let chars = value.chars().collect::<Vec<_>>();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let head = chars[..4].iter().collect::<String>();
        let tail = chars[chars.len() - 4..].iter().collect::<String>();
        format!("{head}...{tail}")
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString([REDACTED])")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::masked(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl Serialize for SecureString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecureString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Outgoing request parameters that credentials are written into.
///
/// The transport merges these into the actual request.
#[derive(Debug, Clone, Default)]
pub struct AuthParams {
    /// Query string parameters.
    pub query: MultiValueMap,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Cookies.
    pub cookies: MultiValueMap,
}

/// The variant tag of an [`Authentication`].
///
/// Registry replacement matches on this tag, never on the scheme name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AuthenticationKind {
    /// HTTP Basic authentication.
    #[display("Basic")]
    Basic,
    /// HTTP Bearer authentication.
    #[display("Bearer")]
    Bearer,
    /// API key authentication.
    #[display("ApiKey")]
    ApiKey,
    /// OAuth access token authentication.
    #[display("OAuth")]
    OAuth,
}

/// Where an API key is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// In an HTTP header.
    #[display("header")]
    Header,
    /// In a query parameter.
    #[display("query")]
    Query,
    /// In a cookie.
    #[display("cookie")]
    Cookie,
}

/// HTTP Basic authentication (RFC 7617).
///
/// Adds `Authorization: Basic <base64(username:password)>` once a username or
/// a password is set.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpBasicAuth {
    username: Option<String>,
    password: Option<SecureString>,
}

impl HttpBasicAuth {
    /// Creates Basic credentials.
    pub fn new(username: impl Into<String>, password: impl Into<SecureString>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<SecureString>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// The configured username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The configured password, if any.
    pub fn password(&self) -> Option<&SecureString> {
        self.password.as_ref()
    }

    fn apply_to_params(&self, params: &mut AuthParams) -> Result<(), AuthenticationError> {
        if self.username.is_none() && self.password.is_none() {
            return Ok(());
        }

        let username = self.username.as_deref().unwrap_or_default();
        if username.contains(':') {
            return Err(AuthenticationError::InvalidUsername {
                message: "Username cannot contain colon (:) character".to_string(),
            });
        }
        let password = self.password.as_ref().map(SecureString::as_str).unwrap_or_default();

        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        let value = HeaderValue::from_str(&format!("Basic {credentials}")).map_err(|err| {
            AuthenticationError::InvalidPassword {
                message: err.to_string(),
            }
        })?;
        params.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

impl fmt::Debug for HttpBasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn default_bearer_scheme() -> String {
    "Bearer".to_string()
}

/// HTTP Bearer authentication (RFC 6750).
///
/// Adds `Authorization: <scheme> <token>` once a token is set.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpBearerAuth {
    #[serde(default = "default_bearer_scheme")]
    scheme: String,
    #[serde(default)]
    token: Option<SecureString>,
}

impl HttpBearerAuth {
    /// Creates a bearer authentication with the given token.
    pub fn new(token: impl Into<SecureString>) -> Self {
        Self::default().with_token(token)
    }

    /// Overrides the scheme written before the token.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<SecureString>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The scheme, `Bearer` by default.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The configured token, if any.
    pub fn token(&self) -> Option<&SecureString> {
        self.token.as_ref()
    }

    fn apply_to_params(&self, params: &mut AuthParams) -> Result<(), AuthenticationError> {
        let Some(token) = &self.token else {
            return Ok(());
        };

        let value = HeaderValue::from_str(&format!("{} {}", self.scheme, token.as_str()))
            .map_err(|err| AuthenticationError::InvalidBearerToken {
                message: err.to_string(),
            })?;
        params.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

impl Default for HttpBearerAuth {
    fn default() -> Self {
        Self {
            scheme: default_bearer_scheme(),
            token: None,
        }
    }
}

impl fmt::Debug for HttpBearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBearerAuth")
            .field("scheme", &self.scheme)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// API key authentication, carried in a header, a query parameter or a cookie.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyAuth {
    location: ApiKeyLocation,
    param_name: String,
    #[serde(default)]
    api_key: Option<SecureString>,
    #[serde(default)]
    api_key_prefix: Option<String>,
}

impl ApiKeyAuth {
    /// Creates an API key authentication without a key yet.
    pub fn new(location: ApiKeyLocation, param_name: impl Into<String>) -> Self {
        Self {
            location,
            param_name: param_name.into(),
            api_key: None,
            api_key_prefix: None,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<SecureString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets a prefix written before the key, e.g. `Token`.
    #[must_use]
    pub fn with_api_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_key_prefix = Some(prefix.into());
        self
    }

    /// Where the key is carried.
    pub fn location(&self) -> ApiKeyLocation {
        self.location
    }

    /// Name of the header, query parameter or cookie.
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// The configured key, if any.
    pub fn api_key(&self) -> Option<&SecureString> {
        self.api_key.as_ref()
    }

    /// The configured prefix, if any.
    pub fn api_key_prefix(&self) -> Option<&str> {
        self.api_key_prefix.as_deref()
    }

    fn apply_to_params(&self, params: &mut AuthParams) -> Result<(), AuthenticationError> {
        let Some(api_key) = &self.api_key else {
            return Ok(());
        };

        let value = match &self.api_key_prefix {
            Some(prefix) => format!("{prefix} {}", api_key.as_str()),
            None => api_key.as_str().to_string(),
        };

        match self.location {
            ApiKeyLocation::Query => params.query.push(self.param_name.clone(), value),
            ApiKeyLocation::Cookie => params.cookies.push(self.param_name.clone(), value),
            ApiKeyLocation::Header => {
                let name = HeaderName::from_bytes(self.param_name.as_bytes()).map_err(|err| {
                    AuthenticationError::InvalidHeaderName {
                        header_name: self.param_name.clone(),
                        message: err.to_string(),
                    }
                })?;
                let value = HeaderValue::from_str(&value).map_err(|err| {
                    AuthenticationError::InvalidApiKey {
                        message: err.to_string(),
                    }
                })?;
                params.headers.insert(name, value);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("location", &self.location)
            .field("param_name", &self.param_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_prefix", &self.api_key_prefix)
            .finish()
    }
}

/// OAuth authentication with an externally acquired access token.
///
/// Adds `Authorization: Bearer <token>` once a token is set.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuth {
    access_token: Option<SecureString>,
}

impl OAuth {
    /// Creates an OAuth authentication with the given access token.
    pub fn new(access_token: impl Into<SecureString>) -> Self {
        Self {
            access_token: Some(access_token.into()),
        }
    }

    /// The configured access token, if any.
    pub fn access_token(&self) -> Option<&SecureString> {
        self.access_token.as_ref()
    }

    fn apply_to_params(&self, params: &mut AuthParams) -> Result<(), AuthenticationError> {
        let Some(token) = &self.access_token else {
            return Ok(());
        };

        let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|err| {
            AuthenticationError::InvalidBearerToken {
                message: err.to_string(),
            }
        })?;
        params.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

impl fmt::Debug for OAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Authentication strategy registered under a scheme name.
///
/// # Examples
///
/// ```rust
/// use petstore_client::{ApiKeyAuth, ApiKeyLocation, Authentication, AuthenticationKind, HttpBasicAuth};
///
/// let auth = Authentication::from(HttpBasicAuth::new("user", "pass"));
/// assert_eq!(auth.kind(), AuthenticationKind::Basic);
///
/// let auth = Authentication::from(
///     ApiKeyAuth::new(ApiKeyLocation::Header, "X-API-Key").with_api_key("secret-key"),
/// );
/// assert_eq!(auth.kind(), AuthenticationKind::ApiKey);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Authentication {
    /// HTTP Basic authentication.
    Basic(HttpBasicAuth),
    /// HTTP Bearer authentication.
    Bearer(HttpBearerAuth),
    /// API key authentication.
    ApiKey(ApiKeyAuth),
    /// OAuth access token authentication.
    #[serde(rename = "oauth")]
    OAuth(OAuth),
}

impl Authentication {
    /// The variant tag of this authentication.
    pub fn kind(&self) -> AuthenticationKind {
        match self {
            Self::Basic(_) => AuthenticationKind::Basic,
            Self::Bearer(_) => AuthenticationKind::Bearer,
            Self::ApiKey(_) => AuthenticationKind::ApiKey,
            Self::OAuth(_) => AuthenticationKind::OAuth,
        }
    }

    /// Writes the credentials into the outgoing parameters.
    ///
    /// Strategies without credentials leave the parameters untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` if the credentials cannot be encoded as
    /// HTTP header names or values.
    pub fn apply_to_params(&self, params: &mut AuthParams) -> Result<(), AuthenticationError> {
        match self {
            Self::Basic(auth) => auth.apply_to_params(params),
            Self::Bearer(auth) => auth.apply_to_params(params),
            Self::ApiKey(auth) => auth.apply_to_params(params),
            Self::OAuth(auth) => auth.apply_to_params(params),
        }
    }

    /// Returns the Basic credentials if this is a Basic authentication.
    pub fn as_basic(&self) -> Option<&HttpBasicAuth> {
        match self {
            Self::Basic(auth) => Some(auth),
            _ => None,
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(auth) => match auth.username() {
                Some(username) => write!(f, "Basic (username: {username})"),
                None => write!(f, "Basic"),
            },
            Self::Bearer(auth) => match auth.token() {
                Some(token) => write!(f, "{} {token}", auth.scheme()),
                None => write!(f, "{}", auth.scheme()),
            },
            Self::ApiKey(auth) => match auth.api_key() {
                Some(key) => write!(f, "ApiKey ({} {}: {key})", auth.location(), auth.param_name()),
                None => write!(f, "ApiKey ({} {})", auth.location(), auth.param_name()),
            },
            Self::OAuth(auth) => match auth.access_token() {
                Some(token) => write!(f, "OAuth {token}"),
                None => write!(f, "OAuth"),
            },
        }
    }
}
