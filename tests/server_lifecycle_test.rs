//! Integration tests for serving over TCP and graceful shutdown

use quotebook::config::ServerSettings;
use quotebook::server::serve;
use quotebook::storage::{KeyAllocator, PartitionedEngine, Storage};
use quotebook::QuoteService;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::time::{timeout, Duration};

fn service() -> QuoteService {
    let storage = Arc::new(Storage::new(Box::new(PartitionedEngine::new(2))));
    QuoteService::new(storage, Arc::new(KeyAllocator::new()))
}

/// Send one HTTP/1.1 request and return the raw response
async fn roundtrip(addr: std::net::SocketAddr, request: String) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("Failed to connect");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to write request");

    let mut response = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("Timed out reading response")
        .expect("Failed to read response");
    String::from_utf8(response).expect("Response is not UTF-8")
}

#[tokio::test]
async fn test_serve_and_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let settings = ServerSettings {
        shutdown_timeout_secs: 2,
        ..ServerSettings::default()
    };
    let server = tokio::spawn(async move {
        serve(listener, &settings, service(), async {
            let _ = stop_rx.await;
        })
        .await
    });

    let body = r#"{"author":"Carl Sagan","quote":"We are made of star-stuff"}"#;
    let response = roundtrip(
        addr,
        format!(
            "POST /quotes HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 201"), "unexpected response: {}", response);
    assert!(response.contains(r#""id":"1""#));

    let response = roundtrip(
        addr,
        "GET /quotes/1 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"), "unexpected response: {}", response);
    assert!(response.contains("star-stuff"));

    stop_tx.send(()).unwrap();
    let result = timeout(Duration::from_secs(5), server)
        .await
        .expect("Server did not stop")
        .expect("Server task panicked");
    assert!(result.is_ok());

    assert!(TcpStream::connect(addr).await.is_err());
}
