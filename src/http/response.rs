//! HTTP response utilities

use std::borrow::Cow;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::Error,
    headers::{self, AsHeaderName, HeaderMap, HeaderValue, CONTENT_TYPE},
    http::{Response, StatusCode, Version},
    json
};

/// Represents an HTTP response with a fully buffered body
///
/// This is both the envelope a [`ResponseRecorder`](super::ResponseRecorder)
/// produces and the value result-returning handlers build.
///
/// See [`Response`]
pub struct HttpResponse {
    inner: Response<Bytes>
}

impl std::fmt::Debug for HttpResponse {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .field("headers", self.headers())
            .field("body", &self.text())
            .finish()
    }
}

/// Represents a result of HTTP request that could be
/// either [`HttpResponse`] or [`Error`]
pub type HttpResult = Result<HttpResponse, Error>;

impl From<Response<Bytes>> for HttpResponse {
    #[inline]
    fn from(inner: Response<Bytes>) -> Self {
        Self { inner }
    }
}

impl From<HttpResponse> for Response<Bytes> {
    #[inline]
    fn from(resp: HttpResponse) -> Self {
        resp.into_inner()
    }
}

impl HttpResponse {
    /// Creates a response from its status, headers and body
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let mut inner = Response::new(body.into());
        *inner.status_mut() = status;
        *inner.headers_mut() = headers;
        Self { inner }
    }

    /// Creates a response with the given status and an empty body
    #[inline]
    pub fn empty(status: StatusCode) -> Self {
        Self::from_parts(status, HeaderMap::new(), Bytes::new())
    }

    /// Creates a `200 OK` response with a JSON body
    #[inline]
    pub fn json<T: Serialize + ?Sized>(value: &T) -> HttpResult {
        Self::json_with_status(StatusCode::OK, value)
    }

    /// Creates a response with the given status and a JSON body
    pub fn json_with_status<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> HttpResult {
        let body = json::encode(value)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self::from_parts(status, headers, body))
    }

    /// Creates a `200 OK` response with a plain text body
    pub fn text_plain(text: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        Self::from_parts(StatusCode::OK, headers, text.into())
    }

    /// Returns the status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Represents a version of the HTTP spec.
    #[inline]
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the associated HTTP header map.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Returns a mutable reference to the associated HTTP header map.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    /// Returns the first value of the `name` header as `&str`.
    #[inline]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        headers::get_str(self.headers(), name)
    }

    /// Returns every value of the `name` header in the order they were written.
    #[inline]
    pub fn header_values<K: AsHeaderName>(&self, name: K) -> Vec<&str> {
        headers::get_all_str(self.headers(), name)
    }

    /// Returns the raw response body.
    #[inline]
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body())
    }

    /// Deserializes the body as a JSON document of type `T`.
    #[inline]
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, Error> {
        json::decode(self.body())
    }

    /// Checks whether the `Content-Type` header describes a JSON payload.
    #[inline]
    pub fn is_json(&self) -> bool {
        headers::is_json(self.headers())
    }

    /// Unwraps the inner response
    #[inline]
    pub fn into_inner(self) -> Response<Bytes> {
        self.inner
    }

    /// Splits the response into status, headers and body
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        let (parts, body) = self.inner.into_parts();
        (parts.status, parts.headers, body)
    }
}
