//! # Error types
//!
//! This module contains the error types for the [`tracewire`] crate.
//!
//! [`tracewire`]: ../index.html

/// Tracewire error type
///
/// This type is used to represent errors that can occur while a request is
/// prepared and exchanged with a collector. It is used as the error type for
/// the [`Result`] type.
///
/// # Examples
/// ```
/// use tracewire::core::TracewireError;
///
/// fn ship() -> Result<(), TracewireError> {
///   Ok(())
/// }
///
/// ship().map_err(|e| match e {
///   TracewireError::NetworkError(_) => println!("Network error"),
///   TracewireError::TransportStateError(_) => println!("Transport state error"),
///   _ => println!("Other error"),
/// });
/// ```
///
/// [`Result`]: https://doc.rust-lang.org/std/result/enum.Result.html
#[derive(thiserror::Error, Debug)]
pub enum TracewireError {
    /// this error is returned when the collector cannot be reached or the
    /// exchange fails on the wire
    #[error("Network error: {0}")]
    NetworkError(String),

    /// this error is returned when a request object is driven outside its
    /// lifecycle, e.g. its body stream is requested twice
    #[error("Transport state error: {0}")]
    TransportStateError(String),

    /// this error is returned when the collector replies in a way the
    /// transport cannot make sense of
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// this error is returned when a request part cannot be realized on the
    /// wire, e.g. an invalid method token or header name
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
