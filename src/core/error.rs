use thiserror::Error;

/// The internal error type for fallible operations in this crate.
///
/// Provider calls propagate `EcError` with `?`; the public fetch boundary folds it
/// into a [`FetchResult`](crate::FetchResult) so callers never see it escape.
#[derive(Debug, Error)]
pub enum EcError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received from the provider was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The cookie/crumb session could not be established.
    #[error("Authentication error: {0}")]
    Auth(String),
}
