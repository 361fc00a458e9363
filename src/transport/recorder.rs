//! # Recording Transport Implementation
//!
//! This module contains the [`TransportRecorder`] struct.
//! It is an in-memory stand-in for a real collector: every completed request
//! is recorded for later inspection and replies come from a caller-provided
//! script. It is intended to be used in tests of components that ship events
//! through the [`tracewire`] transport contracts.
//!
//! It requires the [`recorder` feature] to be enabled.
//!
//! [`TransportRecorder`]: ./struct.TransportRecorder.html
//! [`tracewire`]: ../index.html
//! [`recorder` feature]: ../index.html#features

use crate::core::{
    error::TracewireError::{self, TransportStateError},
    RequestTransport, Transport, TransportRequest, TransportResponse,
};
use log::debug;
use spin::{Mutex, RwLock};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

/// State shared between all clones of one recorder and the requests it mints.
#[derive(Debug, Default)]
struct RecorderShared {
    requests: RwLock<Vec<TransportRequest>>,
    script: Mutex<VecDeque<Result<TransportResponse, TracewireError>>>,
}

impl RecorderShared {
    /// Record the finished request and produce the next scripted reply.
    ///
    /// The request is recorded even when the scripted reply is a failure, so
    /// tests can assert what was about to go on the wire. An exhausted script
    /// yields `200` with no body.
    fn complete(&self, request: TransportRequest) -> Result<TransportResponse, TracewireError> {
        debug!("recorded {} {}", request.method, request.url);
        self.requests.write().push(request);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ok_response()))
    }
}

fn ok_response() -> TransportResponse {
    TransportResponse {
        status: 200,
        ..Default::default()
    }
}

/// In-memory transport that records requests and replies from a script.
///
/// The recorder exists so components shipping events through the transport
/// contracts can be exercised without network I/O. Hand a clone to the
/// component under test and keep the original around to script replies with
/// [`respond_with`] and [`fail_with`] and to inspect captures with
/// [`requests`] and [`last_request`]. All clones share the capture log and
/// the script.
///
/// Completed requests are recorded verbatim, so header order and repeated
/// header names survive into the capture. An exhausted (or never filled)
/// script yields `200` with no body, so capture-only tests need no
/// scripting. The endpoint path given to [`Transport::request`] is kept as
/// the captured URL.
///
/// # Examples
/// ```
/// use tracewire::core::Transport;
/// use tracewire::transport::TransportRecorder;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), tracewire::core::TracewireError> {
/// let recorder = TransportRecorder::new();
///
/// let mut request = recorder.request("/api/events/raw");
/// request.set_method("POST");
/// request.response().await?;
///
/// assert_eq!(recorder.last_request().unwrap().method, "POST");
/// # Ok(())
/// # }
/// ```
///
/// [`respond_with`]: TransportRecorder::respond_with
/// [`fail_with`]: TransportRecorder::fail_with
/// [`requests`]: TransportRecorder::requests
/// [`last_request`]: TransportRecorder::last_request
#[derive(Clone, Debug, Default)]
pub struct TransportRecorder {
    shared: Arc<RecorderShared>,
}

impl TransportRecorder {
    /// Create a recorder with an empty capture log and an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one canned response.
    ///
    /// Scripted entries are consumed in the order they were queued, one per
    /// completed request.
    pub fn respond_with(&self, response: TransportResponse) {
        self.shared.script.lock().push_back(Ok(response));
    }

    /// Queue one failure.
    ///
    /// Scripted entries are consumed in the order they were queued, one per
    /// completed request.
    pub fn fail_with(&self, error: TracewireError) {
        self.shared.script.lock().push_back(Err(error));
    }

    /// All completed requests, in completion order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.shared.requests.read().clone()
    }

    /// The most recently completed request, if any.
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.shared.requests.read().last().cloned()
    }
}

impl Transport for TransportRecorder {
    fn request(&self, path: &str) -> Box<dyn RequestTransport> {
        Box::new(RecorderRequest {
            shared: Arc::clone(&self.shared),
            request: TransportRequest::new(path),
            stream_taken: false,
        })
    }
}

/// One outgoing request minted by [`TransportRecorder`].
///
/// Nothing is recorded until the terminal call completes the request, so
/// dropping an unfinished request leaves no trace in the capture log.
#[derive(Debug)]
pub struct RecorderRequest {
    shared: Arc<RecorderShared>,
    request: TransportRequest,
    stream_taken: bool,
}

#[async_trait::async_trait]
impl RequestTransport for RecorderRequest {
    fn content_type(&self) -> &str {
        &self.request.content_type
    }

    fn set_content_type(&mut self, content_type: &str) {
        self.request.content_type = content_type.into();
    }

    fn method(&self) -> &str {
        &self.request.method
    }

    fn set_method(&mut self, method: &str) {
        self.request.method = method.into();
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.request.headers.push((name.into(), value.into()));
    }

    fn request_stream(&mut self) -> Result<&mut dyn Write, TracewireError> {
        if self.stream_taken {
            return Err(TransportStateError(
                "request body stream already taken".into(),
            ));
        }
        self.stream_taken = true;
        let stream: &mut dyn Write = self.request.body.insert(Vec::new());
        Ok(stream)
    }

    async fn response(self: Box<Self>) -> Result<TransportResponse, TracewireError> {
        let RecorderRequest {
            shared, request, ..
        } = *self;
        shared.complete(request)
    }
}

#[cfg(feature = "blocking")]
pub mod blocking {
    //! # Recording Transport Blocking Implementation
    //!
    //! This module contains the [`TransportRecorder`] struct.
    //! It is the counterpart of the async recorder for code driving the
    //! blocking transport contracts.
    //!
    //! It requires the [`recorder` and `blocking` features] to be enabled.
    //!
    //! [`TransportRecorder`]: ./struct.TransportRecorder.html
    //! [`recorder` and `blocking` features]: ../index.html#features

    use super::RecorderShared;
    use crate::core::{
        error::TracewireError::TransportStateError, TracewireError, TransportRequest,
        TransportResponse,
    };
    use std::io::Write;
    use std::sync::Arc;

    /// In-memory transport that records requests and replies from a script.
    ///
    /// Works like the async [`TransportRecorder`] but mints requests for the
    /// blocking transport contracts. All clones share the capture log and
    /// the script.
    ///
    /// # Examples
    /// ```
    /// use tracewire::core::blocking::{RequestTransport as _, Transport as _};
    /// use tracewire::transport::recorder::blocking::TransportRecorder;
    ///
    /// # fn main() -> Result<(), tracewire::core::TracewireError> {
    /// let recorder = TransportRecorder::new();
    ///
    /// let mut request = recorder.request("/api/events/raw");
    /// request.set_method("POST");
    /// request.response()?;
    ///
    /// assert_eq!(recorder.last_request().unwrap().method, "POST");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`TransportRecorder`]: ../struct.TransportRecorder.html
    #[derive(Clone, Debug, Default)]
    pub struct TransportRecorder {
        shared: Arc<RecorderShared>,
    }

    impl TransportRecorder {
        /// Create a recorder with an empty capture log and an empty script.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue one canned response.
        ///
        /// Scripted entries are consumed in the order they were queued, one
        /// per completed request.
        pub fn respond_with(&self, response: TransportResponse) {
            self.shared.script.lock().push_back(Ok(response));
        }

        /// Queue one failure.
        ///
        /// Scripted entries are consumed in the order they were queued, one
        /// per completed request.
        pub fn fail_with(&self, error: TracewireError) {
            self.shared.script.lock().push_back(Err(error));
        }

        /// All completed requests, in completion order.
        pub fn requests(&self) -> Vec<TransportRequest> {
            self.shared.requests.read().clone()
        }

        /// The most recently completed request, if any.
        pub fn last_request(&self) -> Option<TransportRequest> {
            self.shared.requests.read().last().cloned()
        }
    }

    impl crate::core::blocking::Transport for TransportRecorder {
        fn request(&self, path: &str) -> Box<dyn crate::core::blocking::RequestTransport> {
            Box::new(RecorderRequest {
                shared: Arc::clone(&self.shared),
                request: TransportRequest::new(path),
                stream_taken: false,
            })
        }
    }

    /// One outgoing request minted by the blocking [`TransportRecorder`].
    #[derive(Debug)]
    pub struct RecorderRequest {
        shared: Arc<RecorderShared>,
        request: TransportRequest,
        stream_taken: bool,
    }

    impl crate::core::blocking::RequestTransport for RecorderRequest {
        fn content_type(&self) -> &str {
            &self.request.content_type
        }

        fn set_content_type(&mut self, content_type: &str) {
            self.request.content_type = content_type.into();
        }

        fn method(&self) -> &str {
            &self.request.method
        }

        fn set_method(&mut self, method: &str) {
            self.request.method = method.into();
        }

        fn add_header(&mut self, name: &str, value: &str) {
            self.request.headers.push((name.into(), value.into()));
        }

        fn request_stream(&mut self) -> Result<&mut dyn Write, TracewireError> {
            if self.stream_taken {
                return Err(TransportStateError(
                    "request body stream already taken".into(),
                ));
            }
            self.stream_taken = true;
            let stream: &mut dyn Write = self.request.body.insert(Vec::new());
            Ok(stream)
        }

        fn response(self: Box<Self>) -> Result<TransportResponse, TracewireError> {
            let RecorderRequest {
                shared, request, ..
            } = *self;
            shared.complete(request)
        }
    }

}

#[cfg(test)]
mod should {
    use super::*;
    use test_case::test_case;

    #[test_case("POST" ; "standard verb")]
    #[test_case("PURGE" ; "nonstandard verb")]
    #[test_case("batch-send" ; "arbitrary token")]
    fn return_configured_method(method: &str) {
        let recorder = TransportRecorder::new();
        let mut request = recorder.request("/api/events/raw");

        assert_eq!(request.method(), "GET");
        request.set_method(method);
        assert_eq!(request.method(), method);
    }

    #[test]
    fn return_configured_content_type() {
        let recorder = TransportRecorder::new();
        let mut request = recorder.request("/api/events/raw");

        assert_eq!(request.content_type(), "");
        request.set_content_type("text/plain");
        assert_eq!(request.content_type(), "text/plain");
    }

    #[tokio::test]
    async fn record_request_parts() {
        let recorder = TransportRecorder::new();
        recorder.respond_with(TransportResponse {
            status: 200,
            ..Default::default()
        });

        let mut request = recorder.request("/api/events/raw");
        request.set_method("POST");
        request.set_content_type("application/json");
        request.add_header("X-Api-Key", "abc123");
        request
            .request_stream()
            .unwrap()
            .write_all(b"{\"events\":[]}")
            .unwrap();

        let response = request.response().await.unwrap();

        assert_eq!(response.status, 200);
        let recorded = recorder.last_request().unwrap();
        assert_eq!(recorded.url, "/api/events/raw");
        assert_eq!(recorded.method, "POST");
        assert_eq!(recorded.content_type, "application/json");
        assert_eq!(
            recorded.headers,
            vec![("X-Api-Key".to_string(), "abc123".to_string())]
        );
        assert_eq!(recorded.body.as_deref(), Some(&b"{\"events\":[]}"[..]));
    }

    #[tokio::test]
    async fn preserve_header_order() {
        let recorder = TransportRecorder::new();

        let mut request = recorder.request("/api/events/raw");
        request.add_header("X-Tag", "alpha");
        request.add_header("X-Tag", "beta");
        request.add_header("X-Other", "gamma");
        request.response().await.unwrap();

        let recorded = recorder.last_request().unwrap();
        assert_eq!(
            recorded.headers,
            vec![
                ("X-Tag".to_string(), "alpha".to_string()),
                ("X-Tag".to_string(), "beta".to_string()),
                ("X-Other".to_string(), "gamma".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn record_absent_body_without_stream() {
        let recorder = TransportRecorder::new();

        let response = recorder.request("/api/events/raw").response().await.unwrap();

        assert_eq!(response.status, 200);
        assert!(recorder.last_request().unwrap().body.is_none());
    }

    #[tokio::test]
    async fn record_empty_body_when_stream_unused() {
        let recorder = TransportRecorder::new();

        let mut request = recorder.request("/api/events/raw");
        request.request_stream().unwrap();
        request.response().await.unwrap();

        assert_eq!(recorder.last_request().unwrap().body.as_deref(), Some(&b""[..]));
    }

    #[tokio::test]
    async fn pop_scripted_responses_in_order() {
        let recorder = TransportRecorder::new();
        recorder.respond_with(TransportResponse {
            status: 503,
            ..Default::default()
        });
        recorder.fail_with(TracewireError::NetworkError("connection reset".into()));

        let first = recorder.request("/api/events/raw").response().await.unwrap();
        let second = recorder.request("/api/events/raw").response().await;
        let third = recorder.request("/api/events/raw").response().await.unwrap();

        assert_eq!(first.status, 503);
        assert!(matches!(second, Err(TracewireError::NetworkError(_))));
        assert_eq!(third.status, 200);
        assert_eq!(recorder.requests().len(), 3);
    }

    #[tokio::test]
    async fn share_state_between_clones() {
        let recorder = TransportRecorder::new();
        let handed_out = recorder.clone();

        handed_out.request("/api/events/raw").response().await.unwrap();

        assert_eq!(recorder.requests().len(), 1);
    }

    #[test]
    fn leave_no_trace_for_dropped_requests() {
        let recorder = TransportRecorder::new();

        let mut request = recorder.request("/api/events/raw");
        request.set_method("POST");
        drop(request);

        assert!(recorder.requests().is_empty());
    }
}
