// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use yare::parameterized;

#[parameterized(
    not_found = { RemoteError::NotFound, true },
    bad_request = { RemoteError::Status { status: 400, body: String::new() }, true },
    unauthorized = { RemoteError::Status { status: 401, body: String::new() }, true },
    server_error = { RemoteError::Status { status: 500, body: String::new() }, false },
    unavailable = { RemoteError::Status { status: 503, body: String::new() }, false },
    timeout = { RemoteError::Timeout(Duration::from_secs(1)), false },
    refused = { RemoteError::Request("connection refused".into()), false },
    bad_body = { RemoteError::Decode("eof".into()), false },
)]
fn test_is_rejection(error: RemoteError, expected: bool) {
    assert_eq!(error.is_rejection(), expected);
}

#[tokio::test(start_paused = true)]
async fn test_bounded_times_out() {
    let limit = Duration::from_millis(250);
    let result: RemoteResult<()> = bounded(limit, std::future::pending()).await;

    assert!(matches!(result, Err(RemoteError::Timeout(d)) if d == limit));
}

#[tokio::test]
async fn test_bounded_passes_result_through() {
    let result = bounded(Duration::from_secs(1), async { Ok(7) }).await;
    assert_eq!(result.unwrap(), 7);
}

fn config_for(base: &str) -> Config {
    Config {
        backend_url: base.to_string(),
        token: Some("secret".to_string()),
        ..Config::default()
    }
}

#[test]
fn test_urls_are_composed_from_config() {
    let remote = HttpRemote::new(&config_for("http://catalog.test:3001/")).unwrap();

    assert_eq!(remote.health_url(), "http://catalog.test:3001/health");
    assert_eq!(remote.movie_url(4), "http://catalog.test:3001/api/movies/4");
}

/// Accepts one connection, answers with `status` and `body`, and returns
/// the request head it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (base, handle)
}

#[tokio::test]
async fn test_health_returns_body() {
    let (base, server) = serve_once("200 OK", r#"{"status":"OK"}"#).await;
    let remote = HttpRemote::new(&config_for(&base)).unwrap();

    let body = remote.health().await.unwrap();

    assert_eq!(body["status"], "OK");
    let request = server.await.unwrap();
    assert!(request.starts_with("GET /health "), "{request}");
}

#[tokio::test]
async fn test_list_sends_query_and_token() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"data":[{"id":3,"title":"Heat","rating":"8.3"}],"total":1,"page":2,"limit":5}"#,
    )
    .await;
    let remote = HttpRemote::new(&config_for(&base)).unwrap();
    let query = MovieQuery {
        genre: Some("Crime".to_string()),
        ..MovieQuery::page(2, 5)
    };

    let page = remote.list_movies(&query).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].rating, 8.3);
    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /api/movies?page=2&limit=5&genre=crime "), "{request}");
    assert!(request.contains("authorization: bearer secret"), "{request}");
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (base, _server) = serve_once("404 Not Found", r#"{"error":"Movie not found"}"#).await;
    let remote = HttpRemote::new(&config_for(&base)).unwrap();

    let result = remote.delete_movie(9).await;

    assert!(matches!(result, Err(RemoteError::NotFound)));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let (base, _server) = serve_once("500 Internal Server Error", "boom").await;
    let remote = HttpRemote::new(&config_for(&base)).unwrap();

    let result = remote.update_movie(1, &MoviePatch::default()).await;

    match result {
        Err(RemoteError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let (base, _server) = serve_once("201 Created", "[1,2,3]").await;
    let remote = HttpRemote::new(&config_for(&base)).unwrap();

    let result = remote.create_movie(&MoviePatch::default()).await;

    assert!(matches!(result, Err(RemoteError::Decode(_))));
}

#[tokio::test]
async fn test_refused_connection_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let remote = HttpRemote::new(&config_for(&base)).unwrap();

    let result = remote.health().await;

    assert!(matches!(result, Err(RemoteError::Request(_))));
}
