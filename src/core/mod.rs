//! # Tracewire Core
//!
//! Core functionality of the tracewire transport layer.
//!
//! The `core` module contains the transport contracts and the value types
//! they exchange. It is intended to be used by the [`tracewire`] crate.
//!
//! [`tracewire`]: ../index.html

pub use error::TracewireError;
pub mod error;

pub use transport::{RequestTransport, Transport};
pub mod transport;

#[cfg(feature = "blocking")]
pub use transport::blocking;

pub use transport_request::TransportRequest;
pub mod transport_request;

pub use transport_response::TransportResponse;
pub mod transport_response;

pub(crate) mod utils;
