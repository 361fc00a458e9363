//! # Transport Middleware Module
//!
//! This module contains the [`TransportMiddleware`] struct. It decorates any
//! transport with the standing headers a collector expects on every request.

use crate::core::utils::headers::{API_KEY, REQUEST_ID, USER_AGENT};
use crate::core::{RequestTransport, Transport};
use crate::{TRANSPORT_ID, VERSION};
use derive_builder::Builder;
use uuid::Uuid;

/// Transport decorator that stamps standing headers on every minted request.
///
/// The component shipping events usually holds one of these around the real
/// transport so every request carries the collector API key and an
/// identifiable `User-Agent`. The optional request id makes individual calls
/// traceable through the collector's own diagnostics. Stamped headers come
/// first; headers added by the caller follow in their order of addition.
///
/// # Examples
/// ```
/// use tracewire::transport::{TransportMiddlewareBuilder, TransportRecorder};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = TransportMiddlewareBuilder::default()
///     .with_transport(TransportRecorder::new())
///     .with_api_key("abc123")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Debug)]
#[builder(pattern = "owned", setter(prefix = "with"))]
pub struct TransportMiddleware<T> {
    /// Decorated transport that actually exchanges the requests.
    pub transport: T,

    /// API key stamped as `X-Api-Key` on every request, when set.
    #[builder(setter(into, strip_option), default)]
    pub api_key: Option<String>,

    /// Value stamped as `User-Agent` on every request.
    #[builder(setter(into), default = "default_user_agent()")]
    pub user_agent: String,

    /// Whether to stamp a fresh `X-Request-Id` UUID on every request.
    #[builder(default)]
    pub include_request_id: bool,
}

fn default_user_agent() -> String {
    format!("{}/{}", TRANSPORT_ID, VERSION)
}

impl<T> TransportMiddleware<T> {
    fn stamp<F>(&self, mut add_header: F)
    where
        F: FnMut(&str, &str),
    {
        if let Some(api_key) = &self.api_key {
            add_header(API_KEY, api_key);
        }
        add_header(USER_AGENT, &self.user_agent);
        if self.include_request_id {
            add_header(REQUEST_ID, &Uuid::new_v4().to_string());
        }
    }
}

impl<T> Transport for TransportMiddleware<T>
where
    T: Transport,
{
    fn request(&self, path: &str) -> Box<dyn RequestTransport> {
        let mut request = self.transport.request(path);
        self.stamp(|name, value| request.add_header(name, value));
        request
    }
}

#[cfg(feature = "blocking")]
impl<T> crate::core::blocking::Transport for TransportMiddleware<T>
where
    T: crate::core::blocking::Transport,
{
    fn request(&self, path: &str) -> Box<dyn crate::core::blocking::RequestTransport> {
        let mut request = self.transport.request(path);
        self.stamp(|name, value| request.add_header(name, value));
        request
    }
}
