#![cfg(feature = "reqwest")]

mod common;

use axum::{
    body::Body,
    extract::Query,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use clientlog::{
    EventKind, HttpClient, HttpLogger, LogLevels, LoggedClient, LoggerConfig, MessageFormatter,
    Severity,
};
use common::{record_id, RecordingSink};
use http::StatusCode;
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: u16,
}

// Test server handlers
async fn status_handler(Query(query): Query<StatusQuery>) -> impl IntoResponse {
    let status = StatusCode::from_u16(query.status).unwrap_or(StatusCode::BAD_REQUEST);
    let mut builder = Response::builder()
        .status(status)
        .header("content-type", "text/plain");
    if status.is_redirection() {
        builder = builder.header("location", "/");
    }
    builder.body(Body::from("clientlog")).unwrap()
}

async fn echo_handler(body: Bytes) -> impl IntoResponse {
    format!("Echo: {}", String::from_utf8_lossy(&body))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/", get(status_handler))
        .route("/echo", axum::routing::post(echo_handler));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn no_redirects() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn routed_levels() -> LogLevels {
    use clientlog::StatusClass::*;
    LogLevels::default()
        .with(EventKind::Request, Severity::Debug)
        .with(EventKind::Response(Success), Severity::Info)
        .with(EventKind::Response(Redirection), Severity::Notice)
        .with(EventKind::Response(ClientError), Severity::Warning)
        .with(EventKind::Response(ServerError), Severity::Error)
        .with(EventKind::Error, Severity::Critical)
}

#[tokio::test]
async fn test_live_responses_are_routed_by_status() {
    let addr = spawn_server().await;
    let sink = RecordingSink::new();
    let client = LoggedClient::new(
        no_redirects(),
        HttpLogger::new(sink.clone()).with_levels(routed_levels()),
    );

    for (status, severity) in [
        (200, Severity::Info),
        (302, Severity::Notice),
        (404, Severity::Warning),
        (503, Severity::Error),
    ] {
        let request = http::Request::get(format!("http://{addr}/?status={status}"))
            .body(Bytes::new())
            .unwrap();
        let response = client.send(request).await.unwrap();
        assert_eq!(response.status().as_u16(), status);
        assert_eq!(response.body(), "clientlog");

        let records = sink.get(severity);
        let record = records.last().unwrap();
        let id = record_id(record);
        assert_eq!(
            record,
            &client.logger().formatter().response(&response, id)
        );
    }

    let requests = sink.get(Severity::Debug);
    assert_eq!(requests.len(), 4);
    assert!(requests[0].contains(&format!("GET http://{addr}/?status=200 HTTP/1.1\n")));
    assert!(sink.get(Severity::Critical).is_empty());
}

#[tokio::test]
async fn test_live_request_body_is_logged_and_sent() {
    let addr = spawn_server().await;
    let sink = RecordingSink::new();
    let client = LoggedClient::new(
        no_redirects(),
        HttpLogger::new(sink.clone()).with_id_generator(|| "live".to_string()),
    );

    let request = http::Request::post(format!("http://{addr}/echo"))
        .header("content-type", "text/plain")
        .body(Bytes::from_static(b"Hello, World!"))
        .unwrap();
    let response = client.send(request).await.unwrap();
    assert_eq!(response.body(), "Echo: Hello, World!");

    let records = sink.get(Severity::Info);
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0],
        format!("Request live\nPOST http://{addr}/echo HTTP/1.1\ncontent-type: text/plain\n\nHello, World!")
    );
    assert!(records[1].starts_with("Response live\nHTTP/1.1 200 OK\n"));
    assert!(records[1].ends_with("\n\nEcho: Hello, World!"));
}

#[tokio::test]
async fn test_connection_failure_is_logged_and_returned() {
    // Grab a free port, then close it again
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sink = RecordingSink::new();
    let client = LoggedClient::new(
        reqwest::Client::new(),
        HttpLogger::new(sink.clone()).with_levels(routed_levels()),
    );

    let request = http::Request::get(format!("http://{addr}/?status=200"))
        .body(Bytes::new())
        .unwrap();
    let error = client.send(request).await.unwrap_err();
    assert!(error.is_connect() || error.is_request());

    let critical = sink.get(Severity::Critical);
    assert_eq!(critical.len(), 1);
    let id = record_id(&critical[0]);
    assert_eq!(critical[0], format!("Connection {id}\nError: {error}"));

    let requests = sink.get(Severity::Debug);
    assert_eq!(requests.len(), 1);
    assert_eq!(record_id(&requests[0]), id);
}

#[tokio::test]
async fn test_logger_built_from_config() {
    let addr = spawn_server().await;
    let sink = RecordingSink::new();
    let config = LoggerConfig::from_toml_str(
        r#"
        id_format = "uuid"
        host_header = true

        [levels]
        request = "alert"
        response-4xx = "off"
        "#,
    )
    .unwrap();
    let client = LoggedClient::new(no_redirects(), config.into_logger(sink.clone()));

    let request = http::Request::get(format!("http://{addr}/?status=418"))
        .body(Bytes::new())
        .unwrap();
    let response = client.send(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);

    let alerts = sink.get(Severity::Alert);
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains(&format!("\nhost: 127.0.0.1:{}\n", addr.port())));
    assert!(uuid::Uuid::parse_str(record_id(&alerts[0])).is_ok());
    assert_eq!(sink.total(), 1);
}

/// Serves one connection with a hand-written response line
async fn spawn_raw_server(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut read = 0;
        while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf[read..]).await.unwrap();
            if n == 0 {
                break;
            }
            read += n;
        }
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_custom_reason_phrase_is_logged() {
    let addr = spawn_raw_server("HTTP/1.1 200 Everything Fine\r\ncontent-length: 2\r\n\r\nok").await;
    let sink = RecordingSink::new();
    let client = LoggedClient::new(
        no_redirects(),
        HttpLogger::new(sink.clone()).with_id_generator(|| "p1".to_string()),
    );

    let request = http::Request::get(format!("http://{addr}/"))
        .body(Bytes::new())
        .unwrap();
    let response = client.send(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), "ok");

    let records = sink.get(Severity::Info);
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[1],
        "Response p1\nHTTP/1.1 200 Everything Fine\ncontent-length: 2\n\nok"
    );
}

#[tokio::test]
async fn test_canonical_reason_phrase_is_kept() {
    let addr = spawn_raw_server("HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n").await;
    let sink = RecordingSink::new();
    let client = LoggedClient::new(
        no_redirects(),
        HttpLogger::new(sink.clone()).with_id_generator(|| "p2".to_string()),
    );

    let request = http::Request::get(format!("http://{addr}/"))
        .body(Bytes::new())
        .unwrap();
    let response = client.send(request).await.unwrap();
    assert!(response.extensions().get::<clientlog::ReasonPhrase>().is_none());
    assert!(sink.get(Severity::Info)[1].starts_with("Response p2\nHTTP/1.1 404 Not Found\n"));
}
