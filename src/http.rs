//! Base HTTP tools

// Re-exporting HTTP status codes, method, uri and version from hyper/http
pub use hyper::{
    http::{Method, Uri, Version},
    StatusCode,
};

pub(crate) use hyper::{Request, Response};

pub use handler::{from_fn, Func, Handler};
pub use recorder::ResponseRecorder;
pub use request::HttpRequest;
pub use response::{HttpResponse, HttpResult};

pub mod handler;
pub mod recorder;
pub mod request;
pub mod response;
