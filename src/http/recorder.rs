//! In-memory response writer that records what a handler sends

use std::io;
use bytes::BytesMut;
use serde::Serialize;

use crate::{
    error::Error,
    headers::{HeaderMap, HeaderValue, CONTENT_TYPE},
    http::{HttpResponse, StatusCode},
    json
};

/// A response-capturing sink handed to the handler under test.
///
/// The recorder mimics a real response writer:
///
/// - the status defaults to `200 OK`;
/// - the first call to [`write_status`](Self::write_status) commits the status
///   and takes a snapshot of the headers, later calls are ignored;
/// - writing body bytes before any status commits `200 OK`;
/// - header changes made after the commit are not part of the recorded response.
///
/// It also implements [`io::Write`], so encoders that stream into a writer
/// can write the body directly.
///
/// # Example
/// ```
/// use volga_endpoint_test::{http::StatusCode, ResponseRecorder};
///
/// let mut recorder = ResponseRecorder::new();
/// recorder.respond_json(StatusCode::CREATED, &[1, 2, 3]).unwrap();
///
/// let response = recorder.finish();
/// assert_eq!(response.status(), StatusCode::CREATED);
/// assert_eq!(response.text(), "[1,2,3]");
/// ```
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    committed_headers: Option<HeaderMap>,
    body: BytesMut,
}

impl ResponseRecorder {
    /// Creates an empty recorder
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the headers that will be sent with the status.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a mutable reference to the headers that will be sent with the status.
    ///
    /// Changes made after the status has been committed are not recorded.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Commits the response status together with the current headers.
    ///
    /// Only the first call has an effect.
    pub fn write_status(&mut self, status: StatusCode) {
        if let Some(_committed) = self.status {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "superfluous write_status({status}) call, {_committed} has already been written"
            );
            return;
        }

        self.status = Some(status);
        self.committed_headers = Some(self.headers.clone());
    }

    /// Appends bytes to the body, committing `200 OK` if no status was written yet.
    ///
    /// Returns the number of bytes written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        if self.status.is_none() {
            self.write_status(StatusCode::OK);
        }

        self.body.extend_from_slice(bytes);
        bytes.len()
    }

    /// Serializes `value` as JSON and appends it to the body.
    ///
    /// `Content-Type: application/json` is set when no content type
    /// has been set and the status is not committed yet.
    pub fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        let bytes = json::encode(value)?;
        if !self.is_committed() && !self.headers.contains_key(CONTENT_TYPE) {
            self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        self.write_bytes(&bytes);
        Ok(())
    }

    /// Writes a complete JSON response: content type, `status` and body.
    pub fn respond_json<T: Serialize + ?Sized>(&mut self, status: StatusCode, value: &T) -> Result<(), Error> {
        let bytes = json::encode(value)?;
        if !self.headers.contains_key(CONTENT_TYPE) {
            self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        self.write_status(status);
        self.write_bytes(&bytes);
        Ok(())
    }

    /// Returns the status that has been written, or `200 OK` if none yet.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Returns `true` once the status has been written.
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    /// Returns the bytes written to the body so far.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Copies a complete response into the recorder.
    pub(crate) fn write_response(&mut self, response: HttpResponse) {
        let (status, headers, body) = response.into_parts();
        self.headers.extend(headers);
        self.write_status(status);
        self.write_bytes(&body);
    }

    /// Finishes recording and returns the captured response.
    pub fn finish(mut self) -> HttpResponse {
        if self.status.is_none() {
            self.write_status(StatusCode::OK);
        }

        let Self { status, headers, committed_headers, body } = self;

        HttpResponse::from_parts(
            status.unwrap_or(StatusCode::OK),
            committed_headers.unwrap_or(headers),
            body.freeze()
        )
    }
}

impl io::Write for ResponseRecorder {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
