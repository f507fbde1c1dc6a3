//! HTTP request utilities

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{
    error::Error,
    headers::{self, AsHeaderName, HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE},
    http::{Method, Request, Uri, Version},
    json
};

/// Wraps an inbound [`Request`] with a fully buffered body
pub struct HttpRequest {
    /// Inner [`Request`]
    inner: Request<Bytes>
}

impl std::fmt::Debug for HttpRequest {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", self.method())
            .field("uri", self.uri())
            .field("body_len", &self.body().len())
            .finish()
    }
}

impl From<Request<Bytes>> for HttpRequest {
    #[inline]
    fn from(inner: Request<Bytes>) -> Self {
        Self { inner }
    }
}

impl From<HttpRequest> for Request<Bytes> {
    #[inline]
    fn from(req: HttpRequest) -> Self {
        req.into_inner()
    }
}

impl HttpRequest {
    /// Creates a synthetic HTTP/1.1 request for the given method and target.
    ///
    /// When `body` is present it is treated as a JSON document:
    /// `Content-Type: application/json` is added unless `headers` already
    /// carries one, and `Content-Length` is set to the body size.
    pub(crate) fn synthetic(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Option<Bytes>
    ) -> Self {
        let has_body = body.is_some();
        let mut inner = Request::new(body.unwrap_or_default());

        *inner.method_mut() = method;
        *inner.uri_mut() = uri;
        *inner.version_mut() = Version::HTTP_11;

        let req_headers = inner.headers_mut();
        req_headers.extend(headers);

        if has_body {
            if !req_headers.contains_key(CONTENT_TYPE) {
                req_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            let len = inner.body().len();
            inner.headers_mut().insert(CONTENT_LENGTH, HeaderValue::from(len));
        }

        Self { inner }
    }

    /// Returns a reference to the associated HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the associated URI.
    #[inline]
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the path part of the request target.
    #[inline]
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Returns the raw query string, if any.
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.inner.uri().query()
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

    /// Returns the first value of the `name` header as `&str`.
    #[inline]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        headers::get_str(self.headers(), name)
    }

    /// Returns the raw request body. Empty when no body was sent.
    #[inline]
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Deserializes the request body as a JSON document of type `T`.
    ///
    /// # Example
    /// ```
    /// use serde::Deserialize;
    /// use volga_endpoint_test::{http::StatusCode, HttpRequest, ResponseRecorder};
    ///
    /// #[derive(Deserialize)]
    /// struct NewUser {
    ///     name: String,
    /// }
    ///
    /// fn create_user(res: &mut ResponseRecorder, req: HttpRequest) {
    ///     let result = req
    ///         .json::<NewUser>()
    ///         .and_then(|user| res.respond_json(StatusCode::CREATED, &user.name));
    ///
    ///     if let Err(err) = result {
    ///         res.write_status(err.status);
    ///     }
    /// }
    /// ```
    #[inline]
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        json::decode(self.body())
    }

    /// Deserializes the URL-encoded query string into `T`.
    ///
    /// A request without a query string is treated as an empty one.
    #[inline]
    pub fn query_args<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_urlencoded::from_str(self.query().unwrap_or_default())
            .map_err(Error::from)
    }

    /// Unwraps the inner request
    #[inline]
    pub fn into_inner(self) -> Request<Bytes> {
        self.inner
    }

    /// Consumes the request and returns the body
    #[inline]
    pub fn into_body(self) -> Bytes {
        self.inner.into_body()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde::Deserialize;
    use super::HttpRequest;
    use crate::headers::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
    use crate::http::{Method, Version};

    #[derive(Deserialize)]
    struct Paging {
        page: u32,
        size: Option<u32>,
    }

    fn request(method: Method, target: &str, body: Option<&'static str>) -> HttpRequest {
        HttpRequest::synthetic(
            method,
            target.parse().unwrap(),
            HeaderMap::new(),
            body.map(|body| Bytes::from_static(body.as_bytes()))
        )
    }

    #[test]
    fn it_creates_request_without_body() {
        let req = request(Method::GET, "/users?page=2", None);

        assert_eq!(*req.method(), Method::GET);
        assert_eq!(req.path(), "/users");
        assert_eq!(req.query(), Some("page=2"));
        assert_eq!(req.version(), Version::HTTP_11);
        assert!(req.body().is_empty());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
        assert!(req.headers().get(CONTENT_LENGTH).is_none());
    }

    #[test]
    fn it_creates_request_with_json_body() {
        let req = request(Method::POST, "/users", Some(r#"{"name":"x"}"#));

        assert_eq!(req.header(CONTENT_TYPE), Some("application/json"));
        assert_eq!(req.header(CONTENT_LENGTH), Some("12"));
        assert_eq!(&req.body()[..], br#"{"name":"x"}"#);
    }

    #[test]
    fn it_keeps_explicit_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));

        let req = HttpRequest::synthetic(
            Method::PUT,
            "/users/1".parse().unwrap(),
            headers,
            Some(Bytes::from_static(b"{}"))
        );

        assert_eq!(req.header(CONTENT_TYPE), Some("application/vnd.api+json"));
    }

    #[test]
    fn it_keeps_extra_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer token"));

        let req = HttpRequest::synthetic(Method::GET, "/".parse().unwrap(), headers, None);

        assert_eq!(req.header(AUTHORIZATION), Some("Bearer token"));
    }

    #[test]
    fn it_reads_json_body() {
        #[derive(Deserialize)]
        struct NewUser {
            name: String,
        }

        let req = request(Method::POST, "/users", Some(r#"{"name":"x"}"#));
        let user: NewUser = req.json().unwrap();

        assert_eq!(user.name, "x");
    }

    #[test]
    fn it_fails_to_read_json_from_empty_body() {
        let req = request(Method::GET, "/users", None);

        assert!(req.json::<u32>().unwrap_err().is_client_error());
    }

    #[test]
    fn it_reads_query_args() {
        let req = request(Method::GET, "/users?page=3&size=10", None);
        let paging: Paging = req.query_args().unwrap();

        assert_eq!(paging.page, 3);
        assert_eq!(paging.size, Some(10));
    }

    #[test]
    fn it_fails_to_read_missing_query_args() {
        let req = request(Method::GET, "/users", None);

        assert!(req.query_args::<Paging>().is_err());
    }
}
