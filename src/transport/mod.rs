//! # Transport Providers Module
//!
//! This module contains the transport implementations that ship with the
//! crate. It is intended to be used by the [`tracewire`] crate.
//!
//! [`tracewire`]: ../index.html

#[cfg(feature = "reqwest")]
pub use self::reqwest::TransportReqwest;
#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "recorder")]
pub use self::recorder::TransportRecorder;
#[cfg(feature = "recorder")]
pub mod recorder;

pub use self::middleware::{TransportMiddleware, TransportMiddlewareBuilder};
pub mod middleware;
