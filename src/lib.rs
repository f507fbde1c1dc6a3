//! # Volga Endpoint Test
//!
//! > Declarative, in-process test cases for JSON HTTP handlers.
//!
//! An [`EndpointTest`] describes one HTTP interaction (method, path,
//! optional typed request body, the handler under test and typed
//! assertions) and runs it without touching the network:
//!
//! 1. a synthetic request is built and its body serialized as JSON;
//! 2. the handler is called once with a [`ResponseRecorder`];
//! 3. the recorded body is decoded into the response type;
//! 4. the expectations run against the response and the decoded value.
//!
//! Failures never propagate as errors. They are reported to a
//! [`TestContext`] such as [`AssertContext`], which fails the test when
//! it goes out of scope.
//!
//! ## Example
//! ```
//! use serde::{Deserialize, Serialize};
//! use volga_endpoint_test::{
//!     http::StatusCode,
//!     AssertContext, EndpointTest, HttpRequest, ResponseRecorder
//! };
//!
//! #[derive(Serialize, Deserialize)]
//! struct NewUser {
//!     name: String,
//! }
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Created {
//!     ok: bool,
//! }
//!
//! fn create_user(res: &mut ResponseRecorder, req: HttpRequest) {
//!     let created = req.json::<NewUser>().is_ok();
//!     res.respond_json(StatusCode::CREATED, &Created { ok: created }).unwrap();
//! }
//!
//! let mut ctx = AssertContext::new();
//!
//! EndpointTest::post(
//!     "create user",
//!     "/users",
//!     NewUser { name: "x".into() },
//!     create_user,
//!     |ctx, res, body: Created| {
//!         ctx.check_eq("status", res.status(), StatusCode::CREATED);
//!         ctx.check(body.ok, "user was not created");
//!     }
//! )
//! .run(&mut ctx);
//! ```

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]
#![warn(missing_docs)]

pub mod context;
pub mod endpoint;
pub mod error;
pub mod headers;
pub mod http;
pub mod json;

pub use crate::context::{AssertContext, CaseContext, Failure, Failures, TestContext};
pub use crate::endpoint::EndpointTest;
pub use crate::error::Error;
pub use crate::http::{
    from_fn,
    Handler,
    HttpRequest,
    HttpResponse,
    HttpResult,
    ResponseRecorder,
};
