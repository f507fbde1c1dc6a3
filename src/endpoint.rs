//! Declarative JSON endpoint test cases
//!
//! An [`EndpointTest`] describes one HTTP interaction: which request goes in,
//! which handler processes it and what should come out. Running it builds a
//! synthetic request, calls the handler once with a [`ResponseRecorder`],
//! decodes the recorded JSON body and hands everything to the expectations.

use std::fmt::{self, Debug, Formatter};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    context::{CaseContext, TestContext},
    headers::{HeaderMap, HeaderName, HeaderValue},
    http::{Handler, HttpRequest, HttpResponse, Method, ResponseRecorder, Uri},
    json
};

/// Assertions run against the recorded response and its decoded body
type Expectations<'a, Res> = Box<
    dyn FnOnce(&mut CaseContext<'_>, &HttpResponse, Res)
    + 'a
>;

/// A test case that executes an endpoint handler in-process and runs
/// assertions against its JSON response.
///
/// `Req` is the type of the request body, serialized as JSON when present.
/// `Res` is the type the response body is decoded into; it is inferred from
/// the expectations closure. If decoding fails, the failure is reported and
/// the expectations receive `Res::default()`, so status and header checks
/// still run.
///
/// A case runs exactly once: [`run`](Self::run) consumes it.
///
/// # Example
/// ```
/// use serde::{Deserialize, Serialize};
/// use volga_endpoint_test::{
///     http::StatusCode,
///     AssertContext, EndpointTest, HttpRequest, ResponseRecorder
/// };
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct User {
///     id: u32,
/// }
///
/// fn get_user(res: &mut ResponseRecorder, _req: HttpRequest) {
///     res.respond_json(StatusCode::OK, &User { id: 42 }).unwrap();
/// }
///
/// let mut ctx = AssertContext::new();
///
/// EndpointTest::get("get user", "/users/42", get_user, |ctx, res, user: User| {
///     ctx.check_eq("status", res.status(), StatusCode::OK);
///     ctx.check_eq("id", user.id, 42);
/// })
/// .run(&mut ctx);
///
/// ctx.finish();
/// ```
pub struct EndpointTest<'a, Req, Res> {
    name: String,
    path: String,
    method: Method,
    request_body: Option<Req>,
    headers: HeaderMap,
    handler: Box<dyn Handler + 'a>,
    expectations: Expectations<'a, Res>,
}

impl<Req, Res> Debug for EndpointTest<'_, Req, Res> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointTest")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("has_body", &self.request_body.is_some())
            .finish()
    }
}

impl<'a, Res> EndpointTest<'a, (), Res> {
    /// Creates a `GET` test case without a request body
    pub fn get<H, E>(
        name: impl Into<String>,
        path: impl Into<String>,
        handler: H,
        expectations: E
    ) -> Self
    where
        H: Handler + 'a,
        E: FnOnce(&mut CaseContext<'_>, &HttpResponse, Res) + 'a
    {
        Self::new(Method::GET, name, path, None, handler, expectations)
    }

    /// Creates a `DELETE` test case without a request body
    pub fn delete<H, E>(
        name: impl Into<String>,
        path: impl Into<String>,
        handler: H,
        expectations: E
    ) -> Self
    where
        H: Handler + 'a,
        E: FnOnce(&mut CaseContext<'_>, &HttpResponse, Res) + 'a
    {
        Self::new(Method::DELETE, name, path, None, handler, expectations)
    }
}

impl<'a, Req, Res> EndpointTest<'a, Req, Res> {
    /// Creates a test case for an arbitrary HTTP method
    pub fn new<H, E>(
        method: Method,
        name: impl Into<String>,
        path: impl Into<String>,
        request_body: Option<Req>,
        handler: H,
        expectations: E
    ) -> Self
    where
        H: Handler + 'a,
        E: FnOnce(&mut CaseContext<'_>, &HttpResponse, Res) + 'a
    {
        Self {
            name: name.into(),
            path: path.into(),
            method,
            request_body,
            headers: HeaderMap::new(),
            handler: Box::new(handler),
            expectations: Box::new(expectations),
        }
    }

    /// Creates a `POST` test case with `request_body` sent as JSON
    pub fn post<H, E>(
        name: impl Into<String>,
        path: impl Into<String>,
        request_body: Req,
        handler: H,
        expectations: E
    ) -> Self
    where
        H: Handler + 'a,
        E: FnOnce(&mut CaseContext<'_>, &HttpResponse, Res) + 'a
    {
        Self::new(Method::POST, name, path, Some(request_body), handler, expectations)
    }

    /// Creates a `PUT` test case with `request_body` sent as JSON
    pub fn put<H, E>(
        name: impl Into<String>,
        path: impl Into<String>,
        request_body: Req,
        handler: H,
        expectations: E
    ) -> Self
    where
        H: Handler + 'a,
        E: FnOnce(&mut CaseContext<'_>, &HttpResponse, Res) + 'a
    {
        Self::new(Method::PUT, name, path, Some(request_body), handler, expectations)
    }

    /// Creates a `PATCH` test case with `request_body` sent as JSON
    pub fn patch<H, E>(
        name: impl Into<String>,
        path: impl Into<String>,
        request_body: Req,
        handler: H,
        expectations: E
    ) -> Self
    where
        H: Handler + 'a,
        E: FnOnce(&mut CaseContext<'_>, &HttpResponse, Res) + 'a
    {
        Self::new(Method::PATCH, name, path, Some(request_body), handler, expectations)
    }

    /// Appends a header to the request.
    ///
    /// Multiple values for the same header are sent in the order they were added.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns the test case name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the request target
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the HTTP method
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request body, if any
    #[inline]
    pub fn request_body(&self) -> Option<&Req> {
        self.request_body.as_ref()
    }

    /// Returns the extra request headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<Req, Res> EndpointTest<'_, Req, Res>
where
    Req: Serialize,
    Res: DeserializeOwned + Default
{
    /// Runs the test case, reporting every failure to `ctx`.
    ///
    /// - An invalid request target or a request body that cannot be serialized
    ///   is reported and the run stops; the handler and the expectations are
    ///   not called.
    /// - A response body that cannot be decoded into `Res` is reported and the
    ///   expectations are still called with `Res::default()`.
    ///
    /// The handler is called synchronously and has no deadline: a handler that
    /// never returns blocks the run.
    pub fn run(self, ctx: &mut dyn TestContext) {
        let Self {
            name,
            path,
            method,
            request_body,
            headers,
            handler,
            expectations
        } = self;

        let mut ctx = CaseContext::new(&name, ctx);

        #[cfg(feature = "tracing")]
        tracing::debug!(case = %name, %method, %path, "running endpoint test");

        let uri = match path.parse::<Uri>() {
            Ok(uri) => uri,
            Err(err) => {
                ctx.fail(format!("invalid request target {path:?}: {err}"));
                return;
            }
        };

        let body = match request_body.as_ref().map(json::encode).transpose() {
            Ok(body) => body,
            Err(err) => {
                ctx.fail(format!("error writing request body: {err}"));
                return;
            }
        };

        let request = HttpRequest::synthetic(method, uri, headers, body);
        let mut recorder = ResponseRecorder::new();
        handler.call(&mut recorder, request);
        let response = recorder.finish();

        #[cfg(feature = "tracing")]
        tracing::trace!(case = %name, status = %response.status(), "handler responded");

        let decoded = match json::decode_first::<Res>(response.body()) {
            Ok(decoded) => decoded,
            Err(err) => {
                ctx.fail(format!("failed deserializing response body: {err}"));
                Res::default()
            }
        };

        expectations(&mut ctx, &response, decoded);
    }
}
