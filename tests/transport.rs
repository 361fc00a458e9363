//! Integration tests for the shipped transport implementations.

use std::io::Write;

use tracewire::core::TracewireError;
use tracewire::transport::{TransportMiddlewareBuilder, TransportRecorder, TransportReqwest};
use tracewire::{RequestTransport as _, Transport, TransportResponse};

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Initialize the logger.
///
/// Takes the value of `TEST_LOG` env var, uses `tracewire=trace` by default.
/// Initializes `env_logger` in test mode.
fn init_log() {
    let val = std::env::var("TEST_LOG").unwrap_or_else(|_| "tracewire=trace".to_owned());
    let env = env_logger::Env::default().default_filter_or(val);
    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

#[tokio::test]
async fn ship_events_to_collector() -> Result<(), Box<dyn std::error::Error>> {
    init_log();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/raw"))
        .and(header("x-api-key", "abc123"))
        .and(header("content-type", "application/json"))
        .and(body_string("{\"events\":[]}".to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .mount(&server)
        .await;

    let transport = {
        let mut transport = TransportReqwest::new();
        transport.set_hostname(server.uri());
        transport
    };

    let mut request = transport.request("/api/events/raw");
    request.set_method("POST");
    request.set_content_type("application/json");
    request.add_header("X-Api-Key", "abc123");
    request.request_stream()?.write_all(b"{\"events\":[]}")?;

    let response = request.response().await?;

    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_deref(), Some(&b"{\"ok\":true}"[..]));
    Ok(())
}

#[tokio::test]
async fn ship_events_through_middleware() -> Result<(), Box<dyn std::error::Error>> {
    init_log();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/raw"))
        .and(header("x-api-key", "abc123"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let transport = TransportMiddlewareBuilder::default()
        .with_transport({
            let mut transport = TransportReqwest::new();
            transport.set_hostname(server.uri());
            transport
        })
        .with_api_key("abc123")
        .with_include_request_id(true)
        .build()?;

    let mut request = transport.request("/api/events/raw");
    request.set_method("POST");

    assert_eq!(request.response().await?.status, 201);
    Ok(())
}

#[tokio::test]
async fn record_shipment_for_inspection() -> Result<(), Box<dyn std::error::Error>> {
    init_log();

    let recorder = TransportRecorder::new();
    recorder.respond_with(TransportResponse {
        status: 200,
        ..Default::default()
    });

    let transport = recorder.clone();
    let mut request = transport.request("/api/events/raw");
    request.set_method("POST");
    request.set_content_type("application/json");
    request.add_header("X-Api-Key", "abc123");
    request.request_stream()?.write_all(b"{\"events\":[]}")?;

    let response = request.response().await?;
    assert_eq!(response.status, 200);

    let shipped = recorder.last_request().expect("one request recorded");
    assert_eq!(shipped.url, "/api/events/raw");
    assert_eq!(shipped.method, "POST");
    assert_eq!(shipped.content_type, "application/json");
    assert_eq!(
        shipped.headers,
        vec![("X-Api-Key".to_string(), "abc123".to_string())]
    );
    assert_eq!(shipped.body.as_deref(), Some(&b"{\"events\":[]}"[..]));
    Ok(())
}

#[tokio::test]
async fn drive_blocking_transport_on_worker_thread() -> Result<(), Box<dyn std::error::Error>> {
    init_log();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/describe"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    tokio::task::spawn_blocking(move || -> Result<(), TracewireError> {
        use tracewire::core::blocking::{RequestTransport as _, Transport as _};

        let transport = {
            let mut transport = tracewire::transport::reqwest::blocking::TransportReqwest::new();
            transport.set_hostname(server.uri());
            transport
        };

        let response = transport.request("/api/events/describe").response()?;
        assert_eq!(response.status, 200);
        assert_eq!(response.body.as_deref(), Some(&b"pong"[..]));
        Ok(())
    })
    .await??;
    Ok(())
}

#[tokio::test]
async fn replay_scripted_failures() -> Result<(), Box<dyn std::error::Error>> {
    init_log();

    let recorder = TransportRecorder::new();
    recorder.fail_with(TracewireError::NetworkError("connection reset".into()));

    let failed = recorder.request("/api/events/raw").response().await;
    assert!(matches!(failed, Err(TracewireError::NetworkError(_))));

    let recovered = recorder.request("/api/events/raw").response().await?;
    assert_eq!(recovered.status, 200);
    assert_eq!(recorder.requests().len(), 2);
    Ok(())
}
