//! RabbitMQ Management HTTP API client.
//!
//! Issues exactly one authenticated GET per sensor run and hands back the
//! JSON body untouched. Retrying is left to PRTG's own scan interval.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prtg_rabbitmq::{Credentials, Fetcher, ResourceKind, ResourceRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = Fetcher::builder().build()?;
//!     let request = ResourceRequest::new(
//!         "localhost:15672",
//!         Credentials::new("guest", "guest"),
//!         ResourceKind::Queue,
//!         "%2F",
//!         "orders",
//!     );
//!
//!     let queue = fetcher.fetch(&request).await?;
//!     println!("messages: {}", queue["messages"]);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{ResourceRequest, SensorError};

/// Fetches single resources from the management API.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new builder for configuring the fetcher.
    pub fn builder() -> FetcherBuilder {
        FetcherBuilder::default()
    }

    /// GET the resource described by `request` and parse the body as JSON.
    pub async fn fetch(&self, request: &ResourceRequest) -> Result<Value, SensorError> {
        let url = request.url()?;
        debug!(%url, user = %request.credentials.user, "Fetching resource");

        let response = self
            .client
            .get(&url)
            .basic_auth(&request.credentials.user, Some(&request.credentials.password))
            .send()
            .await
            .map_err(|e| SensorError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(%status, "Management API responded");

        if !status.is_success() {
            return Err(SensorError::HttpStatus {
                status: status.to_string(),
            });
        }

        // Decode failures are Parse, a body cut short is Transport.
        response.json::<Value>().await.map_err(SensorError::from)
    }
}

/// Builder for Fetcher.
#[derive(Debug, Default)]
pub struct FetcherBuilder {
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl FetcherBuilder {
    /// Set a request timeout. Without one the platform default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> Result<Fetcher, SensorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.no_proxy {
            builder = builder.no_proxy();
        }

        Ok(Fetcher {
            client: builder.build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Credentials, ResourceKind};
    use crate::test_support::{closed_port, serve_once, serve_raw};

    fn fetcher() -> Fetcher {
        Fetcher::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    fn request(addr: &str, kind: ResourceKind, name: &str) -> ResourceRequest {
        ResourceRequest::new(addr, Credentials::new("guest", "guest"), kind, "%2F", name)
    }

    #[tokio::test]
    async fn test_fetch_exchange_request_shape() {
        let (addr, server) = serve_once("200 OK", r#"{"name":"amq.direct"}"#).await;

        let payload = fetcher()
            .fetch(&request(&addr, ResourceKind::Exchange, "amq.direct"))
            .await
            .unwrap();
        assert_eq!(payload["name"], "amq.direct");

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(raw.starts_with("get /api/exchanges/%2f/amq.direct http/1.1\r\n"));
        // base64("guest:guest")
        assert!(raw.contains("authorization: basic z3vlc3q6z3vlc3q="));
    }

    #[tokio::test]
    async fn test_fetch_queue() {
        let (addr, server) = serve_once("200 OK", r#"{"messages":12,"consumers":1}"#).await;

        let payload = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, "orders"))
            .await
            .unwrap();
        assert_eq!(payload["messages"], 12);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/queues/%2F/orders HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let (addr, _server) = serve_once("404 Not Found", r#"{"error":"Object Not Found"}"#).await;

        let err = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, "missing"))
            .await
            .unwrap_err();
        match err {
            SensorError::HttpStatus { status } => assert_eq!(status, "404 Not Found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unauthorized() {
        let (addr, _server) = serve_once("401 Unauthorized", "{}").await;

        let err = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, "orders"))
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::HttpStatus { ref status } if status.starts_with("401")));
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let (addr, _server) = serve_once("200 OK", "<html>not json</html>").await;

        let err = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, "orders"))
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let addr = closed_port().await;

        let err = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, "orders"))
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_truncated_body_is_transport() {
        let (addr, _server) = serve_raw(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"messages\":"
                .to_string(),
        )
        .await;

        let err = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, "orders"))
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::Transport(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_dot_segment_never_leaves_the_resource() {
        // Nothing listens here; the request must fail before connecting.
        let addr = closed_port().await;

        let err = fetcher()
            .fetch(&request(&addr, ResourceKind::Queue, ".."))
            .await
            .unwrap_err();
        assert!(matches!(err, SensorError::InvalidSegment(ref s) if s == ".."));
    }
}
