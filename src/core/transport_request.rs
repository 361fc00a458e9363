//! # Transport Request
//!
//! This module contains the `TransportRequest` struct.
//!
//! This struct holds the assembled parts of one outgoing request. It is
//! intended to be used by the [`tracewire`] crate.
//!
//! [`tracewire`]: ../index.html

/// This struct represents the assembled parts of one outgoing request.
///
/// Implementations of the [`RequestTransport`] trait fill one of these in
/// while the caller configures the request, then hand the finished value to
/// their HTTP client when the response is requested. The recording transport
/// keeps the same value as its capture record, which is what makes captured
/// requests comparable in tests.
///
/// [`RequestTransport`]: ../transport/trait.RequestTransport.html
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TransportRequest {
    /// URL the request is addressed to
    pub url: String,

    /// method to use for the request
    ///
    /// Stored verbatim; tokens the HTTP client cannot represent are rejected
    /// when the request is sent.
    pub method: String,

    /// MIME type of the request body
    ///
    /// An empty value means the `Content-Type` header is omitted.
    pub content_type: String,

    /// headers to be sent with the request, in the order they were added
    ///
    /// Repeated names accumulate rather than overwrite.
    pub headers: Vec<(String, String)>,

    /// body to be sent with the request
    ///
    /// `None` means the body stream was never obtained, `Some` carries the
    /// bytes written to it.
    pub body: Option<Vec<u8>>,
}

impl Default for TransportRequest {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: "GET".into(),
            content_type: String::new(),
            headers: Vec::new(),
            body: None,
        }
    }
}

impl TransportRequest {
    /// Create a request addressed to `url` with the default `GET` method.
    pub fn new<S>(url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
