//! HTTP access for the source adapters.
//!
//! The adapters talk to the network only through the [`Fetch`] trait, so the
//! pagination walker and the whole pipeline can run against an in-memory
//! implementation in tests. [`HttpFetcher`] is the `reqwest`-backed one used
//! by the binary.
//!
//! No retry or timeout layer: a failed request aborts the run and a hung
//! request hangs it.

use crate::error::{Error, Result};
use crate::models::Credentials;
use crate::utils::truncate_for_log;
use reqwest::{Client, RequestBuilder};
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Plain GET access returning the response body as text.
pub trait Fetch {
    /// Unauthenticated GET.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// GET with HTTP Basic authentication.
    async fn fetch_with_auth(&self, url: &str, credentials: &Credentials) -> Result<String>;
}

/// [`Fetch`] implementation over a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<String> {
        let t0 = Instant::now();
        let response = request.send().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;
        let elapsed_ms = t0.elapsed().as_millis();

        if status.as_u16() >= 300 {
            warn!(%url, %status, elapsed_ms, "Request failed");
            return Err(Error::Request {
                url: url.to_string(),
                status,
                body: truncate_for_log(&body, 300),
            });
        }

        debug!(%url, %status, bytes = body.len(), elapsed_ms, "Fetched");
        Ok(body)
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String> {
        self.send(url, self.client.get(url)).await
    }

    #[instrument(level = "info", skip_all, fields(%url, username = %credentials.username))]
    async fn fetch_with_auth(&self, url: &str, credentials: &Credentials) -> Result<String> {
        let request = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.api_key));
        self.send(url, request).await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeFetcher;
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one canned HTTP response on a loopback port and hand
    /// back the raw request head.
    async fn one_shot_server(response: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{addr}/feed"), rx)
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let (url, _rx) = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        )
        .await;

        let body = HttpFetcher::new().fetch(&url).await.unwrap();
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_request_error() {
        let (url, _rx) = one_shot_server(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
        )
        .await;

        let err = HttpFetcher::new().fetch(&url).await.unwrap_err();
        match err {
            Error::Request { status, body, .. } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_with_auth_sends_basic_header() {
        let (url, rx) = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 7\r\nConnection: close\r\n\r\n<feed/>",
        )
        .await;
        let creds = Credentials {
            username: "alice".to_string(),
            api_key: "secret".to_string(),
        };

        let body = HttpFetcher::new().fetch_with_auth(&url, &creds).await.unwrap();
        assert_eq!(body, "<feed/>");

        // base64("alice:secret")
        let head = rx.await.unwrap().to_lowercase();
        assert!(head.contains("authorization: basic ywxpy2u6c2vjcmv0"));
    }

    #[tokio::test]
    async fn test_transport_error_on_unreachable_host() {
        // Nothing listens on the discard port in a test environment.
        let fetcher = HttpFetcher::new();
        let err = fetcher.fetch("http://127.0.0.1:9/items").await.unwrap_err();
        match err {
            Error::Transport { url, .. } => assert_eq!(url, "http://127.0.0.1:9/items"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fake_fetcher_records_auth_identity() {
        let fetcher = FakeFetcher::new().with("https://h/feed", "<feed/>");
        let creds = Credentials {
            username: "alice".to_string(),
            api_key: "key".to_string(),
        };

        let body = fetcher.fetch_with_auth("https://h/feed", &creds).await.unwrap();
        assert_eq!(body, "<feed/>");

        let err = fetcher.fetch("https://h/missing").await.unwrap_err();
        assert!(matches!(err, Error::Request { status, .. } if status.as_u16() == 404));

        let requests = fetcher.requests();
        assert_eq!(requests[0].username.as_deref(), Some("alice"));
        assert_eq!(requests[1].username, None);
    }
}
