//! # Reqwest Transport Implementation
//!
//! This module contains the [`TransportReqwest`] struct.
//! It is used to exchange requests with a collector using the [`reqwest`]
//! crate. It is intended to be used by the [`tracewire`] crate.
//!
//! It requires the [`reqwest` feature] to be enabled.
//!
//! [`TransportReqwest`]: ./struct.TransportReqwest.html
//! [`reqwest`]: https://docs.rs/reqwest
//! [`tracewire`]: ../index.html
//! [`reqwest` feature]: ../index.html#features

use crate::core::{
    error::{
        TracewireError,
        TracewireError::{ConfigurationError, NetworkError, ProtocolError, TransportStateError},
    },
    RequestTransport, Transport, TransportRequest, TransportResponse,
};
use bytes::Bytes;
use log::info;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::io::Write;

/// This struct is used to exchange requests with a collector using the
/// [`reqwest`] crate. It mints one [`ReqwestRequest`] per logical HTTP call
/// and owns the connection configuration.
///
/// Connection concerns such as timeouts, proxies or TLS options have no
/// per-request surface. Configure them on the [`reqwest`] client handed to
/// [`TransportReqwest::with_client`].
///
/// [`reqwest`]: https://docs.rs/reqwest
#[derive(Clone, Debug)]
pub struct TransportReqwest {
    reqwest_client: reqwest::Client,

    /// The hostname to use for requests.
    /// It is used as the base URL for all requests.
    ///
    /// It defaults to `http://localhost:5341/`.
    /// # Examples
    /// ```
    /// use tracewire::transport::TransportReqwest;
    ///
    /// let transport = {
    ///    let mut transport = TransportReqwest::default();
    ///    transport.hostname = "https://collector.example.com/".into();
    ///    transport
    /// };
    /// ```
    pub hostname: String,
}

impl Transport for TransportReqwest {
    fn request(&self, path: &str) -> Box<dyn RequestTransport> {
        Box::new(ReqwestRequest {
            client: self.reqwest_client.clone(),
            request: TransportRequest::new(prepare_url(&self.hostname, path)),
            stream_taken: false,
        })
    }
}

impl Default for TransportReqwest {
    fn default() -> Self {
        Self {
            reqwest_client: reqwest::Client::default(),
            hostname: "http://localhost:5341/".into(),
        }
    }
}

impl TransportReqwest {
    /// Create a new [`TransportReqwest`] instance.
    ///
    /// It provides a default [`reqwest`] client using
    /// [`reqwest::Client::default()`] and a default hostname of
    /// `http://localhost:5341`.
    ///
    /// # Example
    /// ```
    /// use tracewire::transport::TransportReqwest;
    ///
    /// let transport = TransportReqwest::new();
    /// ```
    ///
    /// [`TransportReqwest`]: ./struct.TransportReqwest.html
    /// [`reqwest`]: https://docs.rs/reqwest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`TransportReqwest`] instance over a preconfigured
    /// [`reqwest`] client.
    ///
    /// This is the place to apply connection settings such as timeouts,
    /// which deliberately have no per-request surface.
    ///
    /// # Example
    /// ```
    /// use tracewire::transport::TransportReqwest;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = reqwest::Client::builder()
    ///     .timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    ///
    /// let transport = TransportReqwest::with_client(client);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`TransportReqwest`]: ./struct.TransportReqwest.html
    /// [`reqwest`]: https://docs.rs/reqwest
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            reqwest_client: client,
            ..Default::default()
        }
    }

    /// set the custom hostname for request
    pub fn set_hostname<S>(&mut self, hostname: S)
    where
        S: Into<String>,
    {
        self.hostname = hostname.into();
    }
}

/// One outgoing request minted by [`TransportReqwest`].
///
/// The request is staged in memory while the caller configures it and only
/// touches the wire once [`RequestTransport::response`] is called.
#[derive(Debug)]
pub struct ReqwestRequest {
    client: reqwest::Client,
    request: TransportRequest,
    stream_taken: bool,
}

#[async_trait::async_trait]
impl RequestTransport for ReqwestRequest {
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
        let ReqwestRequest {
            client, request, ..
        } = *self;

        let method = prepare_method(&request.method)?;
        let headers = prepare_headers(&request)?;
        info!("{} {}", method, request.url);

        let mut builder = client.request(method, request.url.as_str()).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let result = builder.send().await.map_err(classify)?;

        let status = result.status();
        let headers = copy_headers(result.headers());
        result
            .bytes()
            .await
            .map_err(classify)
            .and_then(|bytes| create_result(status, headers, bytes))
    }
}

fn prepare_method(method: &str) -> Result<Method, TracewireError> {
    Method::from_bytes(method.as_bytes())
        .map_err(|e| ConfigurationError(format!("invalid method {:?}: {}", method, e)))
}

fn prepare_headers(request: &TransportRequest) -> Result<HeaderMap, TracewireError> {
    let mut headers = HeaderMap::new();
    if !request.content_type.is_empty() {
        let value = HeaderValue::from_str(&request.content_type)
            .map_err(|e| ConfigurationError(format!("invalid content type: {}", e)))?;
        headers.insert(CONTENT_TYPE, value);
    }
    for (name, value) in &request.headers {
        let header_name = HeaderName::try_from(name.as_str())
            .map_err(|e| ConfigurationError(format!("invalid header name {:?}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ConfigurationError(format!("invalid value for header {:?}: {}", name, e)))?;
        headers.append(header_name, header_value);
    }
    Ok(headers)
}

fn prepare_url(hostname: &str, path: &str) -> String {
    match (hostname.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", hostname, &path[1..]),
        (false, false) => format!("{}/{}", hostname, path),
        _ => format!("{}{}", hostname, path),
    }
}

fn classify(error: reqwest::Error) -> TracewireError {
    if error.is_builder() {
        ConfigurationError(error.to_string())
    } else if error.is_decode() || error.is_body() {
        ProtocolError(error.to_string())
    } else {
        NetworkError(error.to_string())
    }
}

fn copy_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn create_result(
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Bytes,
) -> Result<TransportResponse, TracewireError> {
    Ok(TransportResponse {
        status: status.as_u16(),
        headers,
        body: (!body.is_empty()).then(|| body.to_vec()),
    })
}

#[cfg(feature = "blocking")]
pub mod blocking {
    //! # Reqwest Transport Blocking Implementation
    //!
    //! This module contains the [`TransportReqwest`] struct.
    //! It is used to exchange requests with a collector using the [`reqwest`]
    //! crate. It is intended to be used by the [`tracewire`] crate.
    //!
    //! It requires the [`reqwest` and `blocking` features] to be enabled.
    //!
    //! [`TransportReqwest`]: ./struct.TransportReqwest.html
    //! [`reqwest`]: https://docs.rs/reqwest
    //! [`tracewire`]: ../index.html
    //! [`reqwest` and `blocking` features]: ../index.html#features

    use super::{
        classify, copy_headers, create_result, prepare_headers, prepare_method, prepare_url,
    };
    use crate::core::{
        error::TracewireError::TransportStateError, TracewireError, TransportRequest,
        TransportResponse,
    };
    use log::info;
    use std::io::Write;

    /// This struct is used to exchange requests with a collector using the
    /// [`reqwest`] crate. It mints one [`ReqwestRequest`] per logical HTTP
    /// call and blocks the calling thread while the exchange runs.
    ///
    /// It requires the [`reqwest` and `blocking` features] to be enabled.
    ///
    /// [`reqwest`]: https://docs.rs/reqwest
    /// [`reqwest` and `blocking` features]: ../index.html#features
    #[derive(Clone, Debug)]
    pub struct TransportReqwest {
        reqwest_client: reqwest::blocking::Client,

        /// The hostname to use for requests.
        /// It is used as the base URL for all requests.
        ///
        /// It defaults to `http://localhost:5341/`.
        /// # Examples
        /// ```
        /// use tracewire::transport::reqwest::blocking::TransportReqwest;
        ///
        /// let transport = {
        ///    let mut transport = TransportReqwest::default();
        ///    transport.hostname = "https://collector.example.com/".into();
        ///    transport
        /// };
        /// ```
        pub hostname: String,
    }

    impl crate::core::blocking::Transport for TransportReqwest {
        fn request(&self, path: &str) -> Box<dyn crate::core::blocking::RequestTransport> {
            Box::new(ReqwestRequest {
                client: self.reqwest_client.clone(),
                request: TransportRequest::new(prepare_url(&self.hostname, path)),
                stream_taken: false,
            })
        }
    }

    impl Default for TransportReqwest {
        fn default() -> Self {
            Self {
                reqwest_client: reqwest::blocking::Client::default(),
                hostname: "http://localhost:5341/".into(),
            }
        }
    }

    impl TransportReqwest {
        /// Create a new [`TransportReqwest`] instance.
        ///
        /// It provides a default [`reqwest`] client using
        /// [`reqwest::blocking::Client::default()`] and a default hostname of
        /// `http://localhost:5341`.
        ///
        /// # Example
        /// ```
        /// use tracewire::transport::reqwest::blocking::TransportReqwest;
        ///
        /// let transport = TransportReqwest::new();
        /// ```
        ///
        /// [`TransportReqwest`]: ./struct.TransportReqwest.html
        /// [`reqwest`]: https://docs.rs/reqwest
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a [`TransportReqwest`] instance over a preconfigured
        /// [`reqwest`] blocking client.
        ///
        /// [`TransportReqwest`]: ./struct.TransportReqwest.html
        /// [`reqwest`]: https://docs.rs/reqwest
        pub fn with_client(client: reqwest::blocking::Client) -> Self {
            Self {
                reqwest_client: client,
                ..Default::default()
            }
        }

        /// set the custom hostname for request
        pub fn set_hostname<S>(&mut self, hostname: S)
        where
            S: Into<String>,
        {
            self.hostname = hostname.into();
        }
    }

    /// One outgoing request minted by the blocking [`TransportReqwest`].
    ///
    /// The request is staged in memory while the caller configures it and
    /// only touches the wire once the terminal call runs.
    #[derive(Debug)]
    pub struct ReqwestRequest {
        client: reqwest::blocking::Client,
        request: TransportRequest,
        stream_taken: bool,
    }

    impl crate::core::blocking::RequestTransport for ReqwestRequest {
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
            let ReqwestRequest {
                client, request, ..
            } = *self;

            let method = prepare_method(&request.method)?;
            let headers = prepare_headers(&request)?;
            info!("{} {}", method, request.url);

            let mut builder = client.request(method, request.url.as_str()).headers(headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let result = builder.send().map_err(classify)?;

            let status = result.status();
            let headers = copy_headers(result.headers());
            result
                .bytes()
                .map_err(classify)
                .and_then(|bytes| create_result(status, headers, bytes))
        }
    }

}
