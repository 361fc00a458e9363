//! This module contains the `TransportResponse` struct.
//!
//! This struct is used to represent the response a collector produced for one
//! request. It is the success type of the [`RequestTransport`] terminal call.
//!
//! [`RequestTransport`]: ../transport/trait.RequestTransport.html

use std::collections::HashMap;

/// This struct is used to represent the response a collector produced for one
/// request. It is the success type of the [`RequestTransport`] terminal call.
///
/// [`RequestTransport`]: ../transport/trait.RequestTransport.html
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TransportResponse {
    /// status code of the response
    pub status: u16,

    /// headers of the response
    ///
    /// Names are kept in the casing the HTTP client reports, and repeated
    /// names keep the last value.
    pub headers: HashMap<String, String>,

    /// body of the response
    pub body: Option<Vec<u8>>,
}
