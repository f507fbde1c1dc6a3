//! Tools for HTTP headers

// Re-exporting HeaderMap, HeaderValue and some headers from hyper
pub use hyper::{
    header::{
        AsHeaderName,
        InvalidHeaderName,
        InvalidHeaderValue,
        ToStrError,
        ACCEPT,
        AUTHORIZATION,
        CACHE_CONTROL,
        CONTENT_LENGTH, CONTENT_TYPE,
        ETAG,
        LOCATION,
        SET_COOKIE,
    },
    http::{HeaderName, HeaderValue},
    HeaderMap
};

/// Returns the first value of the `name` header as `&str`.
///
/// Returns `None` if the header is missing or its value is not visible ASCII.
#[inline]
pub fn get_str<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Option<&str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

/// Returns every value of the `name` header in the order they were added.
///
/// Values that are not visible ASCII are skipped.
pub fn get_all_str<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Vec<&str> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect()
}

/// Checks whether the `Content-Type` header describes a JSON payload,
/// either `application/json` or any `application/*+json` media type.
pub fn is_json(headers: &HeaderMap) -> bool {
    get_str(headers, CONTENT_TYPE)
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|mime| {
            mime.type_() == mime::APPLICATION
                && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
        })
}
