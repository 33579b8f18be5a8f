use super::auth::{AuthenticationError, AuthenticationKind};

/// Errors that can occur when configuring or reading an `ApiClient`.
///
/// Every variant is propagated to the caller; the builder never recovers from
/// a misconfiguration on its own.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// No entry of the requested authentication kind exists in the registry.
    ///
    /// Occurs when replacing an authentication (e.g. `basic_auth`) on a builder
    /// whose registry holds no scheme of the same kind.
    #[display("No {kind} authentication configured!")]
    #[from(skip)]
    MissingAuthentication {
        /// The kind of the authentication that could not be installed.
        kind: AuthenticationKind,
    },

    /// An authentication scheme name is not present in the registry.
    #[display("Authentication undefined: {name}")]
    #[from(skip)]
    UnknownAuthentication {
        /// The requested scheme name.
        name: String,
    },

    /// Attempt to mutate a read-only view.
    ///
    /// Occurs when calling `insert`, `remove` or `clear` on the maps exposed
    /// by the builder or the client.
    #[display("Unsupported operation '{operation}': the collection is read-only")]
    #[from(skip)]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The input cannot be parsed as a date with the configured format.
    #[display("Invalid date '{input}': {error}")]
    #[from(skip)]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// The underlying parsing error.
        error: chrono::ParseError,
    },

    /// The date pattern contains unsupported format specifiers.
    #[display("Invalid date pattern '{pattern}'")]
    #[from(skip)]
    InvalidDatePattern {
        /// The rejected pattern.
        pattern: String,
    },

    /// The time zone identifier is not a fixed offset we understand.
    #[display("Invalid time zone '{input}'")]
    #[from(skip)]
    InvalidTimeZone {
        /// The rejected identifier.
        input: String,
    },

    /// Invalid HTTP header name in the default headers.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value in the default headers.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// Authentication credentials could not be applied.
    Authentication(AuthenticationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ApiClientError>();
        assert_sync::<ApiClientError>();
    }

    #[test]
    fn test_missing_authentication_message() {
        let error = ApiClientError::MissingAuthentication {
            kind: AuthenticationKind::Bearer,
        };
        insta::assert_snapshot!(error, @"No Bearer authentication configured!");
    }

    #[test]
    fn test_unsupported_operation_message() {
        let error = ApiClientError::UnsupportedOperation { operation: "insert" };
        insta::assert_snapshot!(error, @"Unsupported operation 'insert': the collection is read-only");
    }

    #[test]
    fn test_authentication_error_converts() {
        let error = ApiClientError::from(AuthenticationError::InvalidUsername {
            message: "contains colon".to_string(),
        });
        assert!(matches!(error, ApiClientError::Authentication(_)));
    }
}
