//! # Transport module
//!
//! This module contains the [`Transport`] and [`RequestTransport`] traits.
//!
//! You can implement these traits for your own types, or use one of the
//! provided features to use a transport library.

use super::{transport_response::TransportResponse, TracewireError};
use std::io::Write;

/// This trait is used to open requests toward a collector.
///
/// A transport mints one [`RequestTransport`] per logical HTTP call. The
/// component shipping events holds a transport and never touches a concrete
/// HTTP client, which is what makes it testable against the recording
/// transport.
///
/// You can implement this trait for your own types, or use one of the
/// provided features to use a transport library.
///
/// # Examples
/// ```
/// use tracewire::core::{RequestTransport, TracewireError, Transport, TransportResponse};
///
/// struct MyTransport;
/// # struct MyRequest(tracewire::core::TransportRequest);
///
/// impl Transport for MyTransport {
///     fn request(&self, path: &str) -> Box<dyn RequestTransport> {
///         // Mint your request object here
/// #       Box::new(MyRequest(tracewire::core::TransportRequest::new(path)))
///     }
/// }
/// #
/// # #[async_trait::async_trait]
/// # impl RequestTransport for MyRequest {
/// #     fn content_type(&self) -> &str {
/// #         &self.0.content_type
/// #     }
/// #     fn set_content_type(&mut self, content_type: &str) {
/// #         self.0.content_type = content_type.into();
/// #     }
/// #     fn method(&self) -> &str {
/// #         &self.0.method
/// #     }
/// #     fn set_method(&mut self, method: &str) {
/// #         self.0.method = method.into();
/// #     }
/// #     fn add_header(&mut self, name: &str, value: &str) {
/// #         self.0.headers.push((name.into(), value.into()));
/// #     }
/// #     fn request_stream(&mut self) -> Result<&mut dyn std::io::Write, TracewireError> {
/// #         let stream: &mut dyn std::io::Write = self.0.body.insert(Vec::new());
/// #         Ok(stream)
/// #     }
/// #     async fn response(self: Box<Self>) -> Result<TransportResponse, TracewireError> {
/// #         Ok(TransportResponse::default())
/// #     }
/// # }
/// ```
pub trait Transport: Send + Sync {
    /// Open one request for the collector endpoint at `path`.
    ///
    /// How the path resolves to a full URL is up to the implementation; the
    /// reqwest transport joins it onto its configured hostname while the
    /// recording transport keeps it verbatim. The returned request starts as
    /// a `GET` with no headers and no body.
    fn request(&self, path: &str) -> Box<dyn RequestTransport>;
}

/// This trait is used to describe one outgoing request under construction
/// and its eventual response.
///
/// A request starts as a `GET` with no headers and no body. The caller may
/// adjust the method and content type, append headers and write the body
/// through the stream obtained from [`request_stream`], in any order.
/// Implementations are free to stage the whole request in memory and only
/// touch the wire once [`response`] is called.
///
/// Requests are single-use by construction. The terminal [`response`] call
/// takes the boxed request by value and the mutators take `&mut self`, so
/// completing a request twice or configuring it after completion does not
/// compile.
///
/// [`request_stream`]: RequestTransport::request_stream
/// [`response`]: RequestTransport::response
#[async_trait::async_trait]
pub trait RequestTransport: Send {
    /// MIME type of the request body, empty when none was set.
    fn content_type(&self) -> &str;

    /// Set the MIME type of the request body.
    ///
    /// The value is mapped to the `Content-Type` header when the request is
    /// sent. An empty value omits the header.
    fn set_content_type(&mut self, content_type: &str);

    /// HTTP verb of the request.
    fn method(&self) -> &str;

    /// Set the HTTP verb of the request.
    ///
    /// Any token is accepted and stored verbatim. Tokens the underlying HTTP
    /// client cannot represent are rejected when the request is sent.
    fn set_method(&mut self, method: &str);

    /// Append one header to the request.
    ///
    /// Repeated names accumulate rather than overwrite and the order of
    /// addition is preserved, which matches HTTP multi-value header
    /// semantics.
    fn add_header(&mut self, name: &str, value: &str);

    /// Obtain the writable body stream of the request.
    ///
    /// The stream may be obtained at most once per request. Bytes written to
    /// it travel as the request body when the request completes; a request
    /// whose stream was never obtained is sent without a body.
    ///
    /// # Errors
    /// Returns [`TracewireError::TransportStateError`] if the stream was
    /// already obtained for this request.
    fn request_stream(&mut self) -> Result<&mut dyn Write, TracewireError>;

    /// Send the request and resolve once the collector has replied.
    ///
    /// Consumes the request.
    ///
    /// # Errors
    /// Returns [`TracewireError::NetworkError`] if the collector cannot be
    /// reached, [`TracewireError::ProtocolError`] if its reply cannot be
    /// understood and [`TracewireError::ConfigurationError`] if a request
    /// part cannot be realized on the wire.
    async fn response(self: Box<Self>) -> Result<TransportResponse, TracewireError>;
}

#[cfg(feature = "blocking")]
pub mod blocking {
    //! # Blocking transport module
    //!
    //! This module contains the [`Transport`] and [`RequestTransport`]
    //! traits.
    //!
    //! You can implement these traits for your own types, or use one of the
    //! provided features to use a transport library.
    //!
    //! These traits are used for blocking requests.

    use crate::core::{TracewireError, TransportResponse};
    use std::io::Write;

    /// This trait is used to open requests toward a collector.
    ///
    /// A transport mints one [`RequestTransport`] per logical HTTP call.
    ///
    /// This trait is used for blocking requests.
    ///
    /// # Examples
    /// ```
    /// use tracewire::core::blocking::{RequestTransport, Transport};
    /// use tracewire::core::{TracewireError, TransportResponse};
    ///
    /// struct MyTransport;
    /// # struct MyRequest(tracewire::core::TransportRequest);
    ///
    /// impl Transport for MyTransport {
    ///     fn request(&self, path: &str) -> Box<dyn RequestTransport> {
    ///         // Mint your request object here
    /// #       Box::new(MyRequest(tracewire::core::TransportRequest::new(path)))
    ///     }
    /// }
    /// #
    /// # impl RequestTransport for MyRequest {
    /// #     fn content_type(&self) -> &str {
    /// #         &self.0.content_type
    /// #     }
    /// #     fn set_content_type(&mut self, content_type: &str) {
    /// #         self.0.content_type = content_type.into();
    /// #     }
    /// #     fn method(&self) -> &str {
    /// #         &self.0.method
    /// #     }
    /// #     fn set_method(&mut self, method: &str) {
    /// #         self.0.method = method.into();
    /// #     }
    /// #     fn add_header(&mut self, name: &str, value: &str) {
    /// #         self.0.headers.push((name.into(), value.into()));
    /// #     }
    /// #     fn request_stream(&mut self) -> Result<&mut dyn std::io::Write, TracewireError> {
    /// #         let stream: &mut dyn std::io::Write = self.0.body.insert(Vec::new());
    /// #         Ok(stream)
    /// #     }
    /// #     fn response(self: Box<Self>) -> Result<TransportResponse, TracewireError> {
    /// #         Ok(TransportResponse::default())
    /// #     }
    /// # }
    /// ```
    pub trait Transport {
        /// Open one request for the collector endpoint at `path`.
        ///
        /// The returned request starts as a `GET` with no headers and no
        /// body.
        fn request(&self, path: &str) -> Box<dyn RequestTransport>;
    }

    /// This trait is used to describe one outgoing request under
    /// construction and its eventual response.
    ///
    /// This trait is used for blocking requests; [`response`] blocks the
    /// calling thread until the collector has replied. Everything else works
    /// as described on the async [`RequestTransport`].
    ///
    /// [`response`]: RequestTransport::response
    /// [`RequestTransport`]: crate::core::RequestTransport
    pub trait RequestTransport {
        /// MIME type of the request body, empty when none was set.
        fn content_type(&self) -> &str;

        /// Set the MIME type of the request body.
        fn set_content_type(&mut self, content_type: &str);

        /// HTTP verb of the request.
        fn method(&self) -> &str;

        /// Set the HTTP verb of the request.
        fn set_method(&mut self, method: &str);

        /// Append one header to the request.
        ///
        /// Repeated names accumulate rather than overwrite and the order of
        /// addition is preserved.
        fn add_header(&mut self, name: &str, value: &str);

        /// Obtain the writable body stream of the request.
        ///
        /// # Errors
        /// Returns [`TracewireError::TransportStateError`] if the stream was
        /// already obtained for this request.
        fn request_stream(&mut self) -> Result<&mut dyn Write, TracewireError>;

        /// Send the request and block until the collector has replied.
        ///
        /// Consumes the request.
        ///
        /// # Errors
        /// Returns [`TracewireError::NetworkError`] if the collector cannot
        /// be reached, [`TracewireError::ProtocolError`] if its reply cannot
        /// be understood and [`TracewireError::ConfigurationError`] if a
        /// request part cannot be realized on the wire.
        fn response(self: Box<Self>) -> Result<TransportResponse, TracewireError>;
    }
}
