//! Request handler contract

use crate::http::{HttpRequest, HttpResponse, HttpResult, ResponseRecorder};

/// Describes an HTTP request handler under test.
///
/// A handler receives a response-writing sink and the inbound request and
/// writes the status, headers and body to the sink before returning.
///
/// Every `Fn(&mut ResponseRecorder, HttpRequest)` is a handler, so plain
/// functions can be passed as is:
///
/// ```
/// use volga_endpoint_test::{Handler, HttpRequest, ResponseRecorder};
///
/// fn health(res: &mut ResponseRecorder, _req: HttpRequest) {
///     res.write_bytes(b"{\"status\":\"up\"}");
/// }
///
/// fn assert_handler<H: Handler>(_: H) {}
/// assert_handler(health);
/// ```
pub trait Handler {
    /// Handles `req`, writing the response into `res`
    fn call(&self, res: &mut ResponseRecorder, req: HttpRequest);
}

impl<F> Handler for F
where
    F: Fn(&mut ResponseRecorder, HttpRequest)
{
    #[inline]
    fn call(&self, res: &mut ResponseRecorder, req: HttpRequest) {
        self(res, req)
    }
}

/// Represents a handler function that returns its response as a value
/// instead of writing it into the sink.
///
/// See [`from_fn`]
pub struct Func<F> {
    func: F
}

impl<F> std::fmt::Debug for Func<F> {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Func(..)")
    }
}

/// Wraps a result-returning function into a [`Handler`].
///
/// `Ok(response)` is written into the sink as is. `Err(error)` is written
/// as an `application/problem+json` body with the error's status code.
///
/// # Example
/// ```
/// use serde::Serialize;
/// use volga_endpoint_test::{from_fn, HttpRequest, HttpResponse};
///
/// #[derive(Serialize)]
/// struct User {
///     id: u32,
/// }
///
/// let handler = from_fn(|_req: HttpRequest| HttpResponse::json(&User { id: 42 }));
/// # let _ = handler;
/// ```
#[inline]
pub fn from_fn<F>(func: F) -> Func<F>
where
    F: Fn(HttpRequest) -> HttpResult
{
    Func { func }
}

impl<F> Handler for Func<F>
where
    F: Fn(HttpRequest) -> HttpResult
{
    fn call(&self, res: &mut ResponseRecorder, req: HttpRequest) {
        let response = match (self.func)(req) {
            Ok(response) => response,
            Err(err) => problem(err)
        };
        res.write_response(response);
    }
}

/// Renders an error as a [Problem Details](https://www.rfc-editor.org/rfc/rfc9457) response
fn problem(err: crate::error::Error) -> HttpResponse {
    use crate::headers::{HeaderMap, HeaderValue, CONTENT_TYPE};

    let status = err.status;
    let body = serde_json::json!({
        "type": problem_type_url(status.as_u16()),
        "title": status.canonical_reason().unwrap_or("unknown status code"),
        "status": status.as_u16(),
        "detail": err.to_string(),
    });

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/problem+json"));

    HttpResponse::from_parts(status, headers, body.to_string())
}

fn problem_type_url(status: u16) -> String {
    let minor = if status < 500 { 5 } else { 6 };
    let suffix = (status % 100) + 1;
    match status {
        421 => "https://tools.ietf.org/html/rfc9110#section-15.5.20".into(),
        422 => "https://tools.ietf.org/html/rfc9110#section-15.5.21".into(),
        426 => "https://tools.ietf.org/html/rfc9110#section-15.5.22".into(),
        _ => format!("https://tools.ietf.org/html/rfc9110#section-15.{minor}.{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::Value;
    use super::{from_fn, problem_type_url, Handler};
    use crate::error::Error;
    use crate::headers::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
    use crate::http::{HttpRequest, HttpResponse, Method, ResponseRecorder, StatusCode};

    fn request() -> HttpRequest {
        HttpRequest::synthetic(Method::GET, "/test".parse().unwrap(), HeaderMap::new(), None::<Bytes>)
    }

    fn echo_path(res: &mut ResponseRecorder, req: HttpRequest) {
        res.write_bytes(req.path().as_bytes());
    }

    #[test]
    fn it_calls_fn_handler() {
        let mut recorder = ResponseRecorder::new();
        Handler::call(&echo_path, &mut recorder, request());

        assert_eq!(recorder.finish().text(), "/test");
    }

    #[test]
    fn it_writes_ok_result() {
        let handler = from_fn(|_req: HttpRequest| Ok(HttpResponse::text_plain("pong")));
        let mut recorder = ResponseRecorder::new();
        handler.call(&mut recorder, request());

        let response = recorder.finish();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text(), "pong");
    }

    #[test]
    fn it_writes_error_result_as_problem() {
        let handler = from_fn(|_req: HttpRequest| Err(Error::client_error("name is required")));
        let mut recorder = ResponseRecorder::new();
        handler.call(&mut recorder, request());

        let response = recorder.finish();
        let problem: Value = response.json_body().unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.header(CONTENT_TYPE), Some("application/problem+json"));
        assert!(response.is_json());
        assert_eq!(problem["status"], 400);
        assert_eq!(problem["title"], "Bad Request");
        assert_eq!(problem["detail"], "name is required");
        assert_eq!(problem["type"], "https://tools.ietf.org/html/rfc9110#section-15.5.1");
    }

    #[test]
    fn it_maps_header_errors_raised_with_question_mark() {
        let handler = from_fn(|req: HttpRequest| {
            let tenant = req.headers()
                .get("x-tenant")
                .map(|value| value.to_str())
                .transpose()?
                .unwrap_or("default");
            let name = HeaderName::from_bytes(tenant.as_bytes())?;
            let value = HeaderValue::from_str(tenant)?;

            let mut headers = HeaderMap::new();
            headers.insert(name, value);
            Ok(HttpResponse::from_parts(StatusCode::NO_CONTENT, headers, ""))
        });

        let mut headers = HeaderMap::new();
        headers.insert("x-tenant", HeaderValue::from_static("not a name"));
        let req = HttpRequest::synthetic(Method::GET, "/test".parse().unwrap(), headers, None);

        let mut recorder = ResponseRecorder::new();
        handler.call(&mut recorder, req);
        let response = recorder.finish();
        let problem: Value = response.json_body().unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(problem["detail"], "invalid HTTP header name");

        let mut recorder = ResponseRecorder::new();
        handler.call(&mut recorder, request());
        let response = recorder.finish();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.header("default"), Some("default"));
    }

    #[test]
    fn it_resolves_problem_type_urls() {
        assert_eq!(problem_type_url(404), "https://tools.ietf.org/html/rfc9110#section-15.5.5");
        assert_eq!(problem_type_url(422), "https://tools.ietf.org/html/rfc9110#section-15.5.21");
        assert_eq!(problem_type_url(500), "https://tools.ietf.org/html/rfc9110#section-15.6.1");
        assert_eq!(problem_type_url(503), "https://tools.ietf.org/html/rfc9110#section-15.6.4");
    }
}
