//! # Tracewire
//!
//! HTTP request transport for components that ship diagnostic events to a
//! remote collector.
//!
//! The component doing the shipping, a trace listener or a log appender,
//! talks to a [`Transport`], which mints one [`RequestTransport`] per
//! logical HTTP call. Two implementations ship with the crate:
//! [`TransportReqwest`] exchanges the request over the wire using the
//! [`reqwest`](https://docs.rs/reqwest) crate, and [`TransportRecorder`]
//! records completed requests in memory and replies from a script, which
//! keeps the shipping component testable without network I/O.
//!
//! A request is configured in place and consumed by its terminal call, so a
//! completed request can be neither reconfigured nor sent twice.
//!
//! # Examples
//!
//! ```
//! use tracewire::{Transport, TransportRecorder};
//! # use std::io::Write;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = TransportRecorder::new();
//! let transport = recorder.clone();
//!
//! let mut request = transport.request("/api/events/raw");
//! request.set_method("POST");
//! request.set_content_type("application/json");
//! request.add_header("X-Api-Key", "abc123");
//! request.request_stream()?.write_all(b"{\"events\":[]}")?;
//!
//! let response = request.response().await?;
//! assert_eq!(response.status, 200);
//!
//! let shipped = recorder.last_request().expect("one request completed");
//! assert_eq!(shipped.method, "POST");
//! assert_eq!(shipped.body.as_deref(), Some(&b"{\"events\":[]}"[..]));
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! The `tracewire` crate is split into features:
//!
//! * `reqwest`: exchange requests over HTTP using the
//!   [`reqwest`](https://docs.rs/reqwest) crate. Enabled by default.
//! * `blocking`: blocking variants of the transport contracts. Enabled by
//!   default.
//! * `recorder`: in-memory recording transport for tests. Enabled by
//!   default.
//! * `full`: all of the above.

#![deny(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    rustdoc::broken_intra_doc_links
)]
#![allow(clippy::doc_markdown)]
#![forbid(unsafe_code)]

pub use crate::core::{
    RequestTransport, TracewireError, Transport, TransportRequest, TransportResponse,
};
pub mod core;

pub use crate::transport::middleware::{TransportMiddleware, TransportMiddlewareBuilder};
#[cfg(feature = "recorder")]
pub use crate::transport::recorder::TransportRecorder;
#[cfg(feature = "reqwest")]
pub use crate::transport::reqwest::TransportReqwest;
pub mod transport;

pub(crate) const TRANSPORT_ID: &str = "tracewire-rust";
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");
