//! Standard errors used by all functions in the crate.

use crate::credentials::ApiFamily;
use std::{error::Error as StdError, fmt};

/// Message returned by the API when a payment is declined by the card issuer.
static DECLINE_MESSAGE: &str = "DECLINE";

/// Error collecting all possible failures of the Beanstream client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error returned by a Beanstream API endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// No response was received from the server.
    #[error("{0}")]
    ConnectionError(#[from] ConnectionError),
    /// A request or response body could not be (de)serialized.
    #[error("Invalid JSON payload: {0}")]
    JsonError(#[from] serde_json::Error),
    /// The request URL could not be assembled from the configured environment.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The API key for the requested API family was never configured.
    #[error("No API key configured for the {0} API")]
    MissingCredentials(ApiFamily),
    /// The client could not be built from the given configuration.
    #[error("Invalid client configuration: {0}")]
    Configuration(String),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl Error {
    /// Returns the [`ApiError`] carried by this error, if the server answered with one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::ApiError(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this error is a declined payment that can be shown to the end user as-is.
    pub fn is_user_error(&self) -> bool {
        self.api_error().map_or(false, ApiError::is_user_error)
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::ConnectionError(e.into()),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Classification of an [`ApiError`], derived from the HTTP status code of the response.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ApiErrorKind {
    /// Malformed call, unknown resource, unsupported method or media type, or an unsupported redirect.
    InvalidRequest,
    /// Bad credentials.
    Unauthorized,
    /// The request was valid but rejected by business logic (e.g. a decline, or a void after a return).
    BusinessRuleViolation,
    /// Authenticated but not permitted.
    Forbidden,
    /// Failure on the server side.
    InternalServerError,
    /// Any other non-success status.
    Unknown,
}

impl ApiErrorKind {
    /// Maps an HTTP status code to the kind of error it represents.
    pub fn from_status(status: u16) -> Self {
        match status {
            302 | 400 | 404 | 405 | 415 => ApiErrorKind::InvalidRequest,
            401 => ApiErrorKind::Unauthorized,
            402 => ApiErrorKind::BusinessRuleViolation,
            403 => ApiErrorKind::Forbidden,
            500..=599 => ApiErrorKind::InternalServerError,
            _ => ApiErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiErrorKind::InvalidRequest => "invalid request",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::BusinessRuleViolation => "business rule violation",
            ApiErrorKind::Forbidden => "forbidden",
            ApiErrorKind::InternalServerError => "internal server error",
            ApiErrorKind::Unknown => "unknown error",
        };
        write!(f, "{}", s)
    }
}

/// Beanstream HTTP APIs error.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub struct ApiError {
    /// What went wrong, derived from `http_status_code`.
    pub kind: ApiErrorKind,
    /// Beanstream error code, as returned by the server. `0` if the server did not send one.
    pub code: i64,
    /// Beanstream error category, as returned by the server. `0` if the server did not send one.
    pub category: i64,
    /// A message that can be displayed to the user.
    pub message: String,
    /// HTTP status returned by the server.
    pub http_status_code: u16,
}

impl ApiError {
    /// Builds a new error, deriving its kind from the HTTP status code.
    ///
    /// Redirects (3-D Secure and IOP flows) are not supported, so a `302` gets a note prepended to its message.
    pub fn new(code: i64, category: i64, message: impl Into<String>, http_status_code: u16) -> Self {
        let mut message = message.into();
        if http_status_code == 302 {
            message = format!(
                "Redirection for IOP and 3dSecure not supported by the Beanstream client yet. {}",
                message
            );
        }

        Self {
            kind: ApiErrorKind::from_status(http_status_code),
            code,
            category,
            message,
            http_status_code,
        }
    }

    /// Whether this error is a declined payment.
    ///
    /// The API reports declines through the generic `402` path, so the message is the only discriminant.
    pub fn is_user_error(&self) -> bool {
        self.message == DECLINE_MESSAGE
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Beanstream HTTP error {} ({}): {}",
            self.http_status_code, self.kind, self.message
        )?;

        if self.code != 0 || self.category != 0 {
            write!(f, " [code {}, category {}]", self.code, self.category)?;
        }

        Ok(())
    }
}

/// Category of a failure that prevented any HTTP response from being received.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ConnectionFailure {
    /// The connection or the request timed out.
    Timeout,
    /// The connection dropped before the request completed.
    ConnectionBroken,
    /// The server certificate could not be verified.
    Certificate,
    /// DNS resolution or socket connection failed.
    Socket,
    /// Anything else.
    Unexpected,
}

impl ConnectionFailure {
    /// Classifies a transport error.
    pub fn classify(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            ConnectionFailure::Timeout
        } else if mentions_certificate(e) {
            ConnectionFailure::Certificate
        } else if e.is_connect() {
            ConnectionFailure::Socket
        } else if e.is_request() || e.is_body() {
            ConnectionFailure::ConnectionBroken
        } else {
            ConnectionFailure::Unexpected
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ConnectionFailure::Timeout => "Could not connect to Beanstream",
            ConnectionFailure::ConnectionBroken => {
                "The connection to the server broke before the request completed."
            }
            ConnectionFailure::Certificate => {
                "Could not verify Beanstream's SSL certificate. \
                 Please make sure that your network is not intercepting certificates."
            }
            ConnectionFailure::Socket => {
                "Unexpected error communicating when trying to connect to Beanstream."
            }
            ConnectionFailure::Unexpected => "Unexpected error communicating with Beanstream.",
        }
    }
}

// TLS failures surface as connect errors; only the source chain tells them apart.
fn mentions_certificate(e: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = e.source();
    while let Some(err) = source {
        if err.to_string().to_lowercase().contains("certificate") {
            return true;
        }
        source = err.source();
    }
    false
}

/// Error raised when no response could be obtained from the Beanstream servers.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct ConnectionError {
    /// What kind of network failure occurred.
    pub failure: ConnectionFailure,
    /// Human readable description, embedding the underlying transport error.
    pub message: String,
    /// The underlying transport error.
    #[source]
    pub source: reqwest::Error,
}

impl From<reqwest::Error> for ConnectionError {
    fn from(source: reqwest::Error) -> Self {
        let failure = ConnectionFailure::classify(&source);
        let message = format!(
            "{}\n\n(Network error: {})",
            failure.description(),
            full_error_text(&source)
        );

        Self {
            failure,
            message,
            source,
        }
    }
}

// reqwest's `Display` stops at the outermost error; the interesting part is usually further down.
fn full_error_text(e: &reqwest::Error) -> String {
    let mut text = e.to_string();
    let mut source: Option<&(dyn StdError + 'static)> = e.source();
    while let Some(err) = source {
        let s = err.to_string();
        if !text.contains(&s) {
            text.push_str(": ");
            text.push_str(&s);
        }
        source = err.source();
    }
    text
}
