use axum::{
    body::Body,
    extract::Query,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use clientlog::{
    ClientLoggerLayer, EventKind, HttpClient, HttpLogger, LogLevels, LoggedClient, Severity,
    StatusClass, TracingSink,
};
use serde::Deserialize;
use std::time::Duration;
use tokio::{net::TcpListener, time::sleep};
use tower::{service_fn, ServiceBuilder, ServiceExt};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: u16,
}

// Handlers for our demo server
async fn status_handler(Query(query): Query<StatusQuery>) -> impl IntoResponse {
    let status = axum::http::StatusCode::from_u16(query.status)
        .unwrap_or(axum::http::StatusCode::BAD_REQUEST);
    Response::builder()
        .status(status)
        .header("content-type", "text/plain")
        .body(Body::from(format!("you asked for {status}")))
        .unwrap()
}

async fn echo_handler(body: Bytes) -> impl IntoResponse {
    sleep(Duration::from_millis(50)).await; // Simulate some work
    format!("Echo: {}", String::from_utf8_lossy(&body))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let app = Router::new()
        .route("/status", get(status_handler))
        .route("/echo", post(echo_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    info!("Demo server listening on http://{addr}");
    tokio::spawn(async move { axum::serve(listener, app).await });

    let levels = LogLevels::default()
        .with(EventKind::Request, Severity::Debug)
        .with(EventKind::Response(StatusClass::ClientError), Severity::Warning)
        .with(EventKind::Response(StatusClass::ServerError), Severity::Error)
        .with(EventKind::Error, Severity::Critical);
    let client = LoggedClient::new(
        reqwest::Client::new(),
        HttpLogger::new(TracingSink).with_levels(levels),
    );

    for status in [200, 404, 500] {
        let request = http::Request::get(format!("http://{addr}/status?status={status}"))
            .body(Bytes::new())?;
        let response = client.send(request).await?;
        info!("GET /status?status={status} -> {}", response.status());
    }

    let request = http::Request::post(format!("http://{addr}/echo"))
        .header("content-type", "text/plain")
        .body(Bytes::from("Hello from client"))?;
    client.send(request).await?;

    // Nothing listens on port 9 here; the error record goes out at critical
    let request = http::Request::get("http://127.0.0.1:9/").body(Bytes::new())?;
    if let Err(e) = client.send(request).await {
        info!("Transport error handed back unchanged: {e}");
    }

    // The same logger shape as a tower layer around any service
    let service = ServiceBuilder::new()
        .layer(ClientLoggerLayer::new(HttpLogger::new(TracingSink)))
        .service(service_fn(|request: http::Request<String>| async move {
            Ok::<_, std::io::Error>(http::Response::new(request.into_body()))
        }));
    service
        .oneshot(http::Request::post("/loopback").body("ping".to_string())?)
        .await?;

    Ok(())
}
