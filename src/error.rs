//! Error handling tools

use std::{
    convert::Infallible,
    fmt,
    error::Error as StdError
};

use crate::{
    headers::{InvalidHeaderName, InvalidHeaderValue, ToStrError},
    http::StatusCode
};

pub(crate) type BoxError = Box<
    dyn StdError
    + Send
    + Sync
>;

/// Generic error produced by request and response helpers
#[derive(Debug)]
pub struct Error {
    /// HTTP status code
    pub status: StatusCode,

    /// Inner error object
    pub(crate) inner: BoxError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl From<Infallible> for Error {
    fn from(infallible: Infallible) -> Error {
        match infallible {}
    }
}

impl From<serde_json::Error> for Error {
    #[inline]
    fn from(err: serde_json::Error) -> Error {
        Self::client_error(err)
    }
}

impl From<serde_urlencoded::de::Error> for Error {
    #[inline]
    fn from(err: serde_urlencoded::de::Error) -> Error {
        Self::client_error(err)
    }
}

impl From<hyper::http::Error> for Error {
    #[inline]
    fn from(err: hyper::http::Error) -> Self {
        Self::server_error(err)
    }
}

impl From<hyper::http::uri::InvalidUri> for Error {
    #[inline]
    fn from(err: hyper::http::uri::InvalidUri) -> Self {
        Self::client_error(err)
    }
}

impl From<InvalidHeaderName> for Error {
    #[inline]
    fn from(err: InvalidHeaderName) -> Self {
        Self::client_error(err)
    }
}

impl From<InvalidHeaderValue> for Error {
    #[inline]
    fn from(err: InvalidHeaderValue) -> Self {
        Self::client_error(err)
    }
}

impl From<ToStrError> for Error {
    #[inline]
    fn from(err: ToStrError) -> Self {
        Self::client_error(err)
    }
}

impl Error {
    /// Creates an internal server error
    #[inline]
    pub fn server_error(err: impl Into<BoxError>) -> Self {
        Self::from_parts(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// Creates a client error
    #[inline]
    pub fn client_error(err: impl Into<BoxError>) -> Self {
        Self::from_parts(StatusCode::BAD_REQUEST, err)
    }

    /// Creates [`Error`] from status code and underlying error
    #[inline]
    pub fn from_parts(status: StatusCode, err: impl Into<BoxError>) -> Self {
        Self { status, inner: err.into() }
    }

    /// Unwraps the inner error
    pub fn into_inner(self) -> BoxError {
        self.inner
    }

    /// Unwraps the error into a tuple of status code and underlying error
    pub fn into_parts(self) -> (StatusCode, BoxError) {
        (self.status, self.inner)
    }

    /// Check if the status is within 500-599.
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Check if the status is within 400-499.
    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }
}
