use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use crate::gateway::{BackendGateway, GatewayError};
use crate::models::payload::Payload;
use crate::models::portfolio::{PortfolioSummary, RecentPage, SaveResponse};

const PORTFOLIO_PATH: &str = "/api/portfolio";
const DOWNLOAD_PATH: &str = "/api/portfolio/download";

/// reqwest-backed gateway. Cloning is cheap; the connection pool is shared.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns any non-2xx response into `GatewayError::Status`.
async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Backend returned {}: {}", status, body);
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn save_portfolio(&self, payload: &Payload) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url(PORTFOLIO_PATH))
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await?;
        let saved: SaveResponse = serde_json::from_slice(&body)?;
        info!(id = %saved.id, "Portfolio saved");
        Ok(saved.id)
    }

    async fn download_document(&self, payload: &Payload) -> Result<Bytes, GatewayError> {
        let response = self
            .client
            .post(self.url(DOWNLOAD_PATH))
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let document = response.bytes().await?;
        debug!(size = document.len(), "Document received");
        Ok(document)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<PortfolioSummary>, GatewayError> {
        let response = self
            .client
            .get(self.url(PORTFOLIO_PATH))
            .query(&[("limit", limit)])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await?;
        let page: RecentPage = serde_json::from_slice(&body)?;
        debug!(count = page.items.len(), "Recent portfolios listed");
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::assemble_payload;
    use crate::models::profile::{FormState, ProfileField};
    use httpmock::prelude::*;
    use serde_json::json;

    fn gateway(server: &MockServer) -> HttpGateway {
        HttpGateway::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    fn payload() -> Payload {
        assemble_payload(
            &FormState::default()
                .with_field(ProfileField::Name, "Jane Doe")
                .with_field(ProfileField::Skills, "Rust, Go"),
        )
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let gw = HttpGateway::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(gw.base_url(), "http://localhost:8000");
        assert_eq!(gw.url(PORTFOLIO_PATH), "http://localhost:8000/api/portfolio");
    }

    #[tokio::test]
    async fn test_save_posts_payload_and_returns_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/portfolio")
                .header("content-type", "application/json")
                .body_includes(r#""name":"Jane Doe""#)
                .body_includes(r#""skills":["Rust","Go"]"#);
            then.status(201).json_body(json!({"id": "abc123"}));
        });

        let id = gateway(&server).save_portfolio(&payload()).await.unwrap();

        assert_eq!(id, "abc123");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_save_non_success_is_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/portfolio");
            then.status(500).body("boom");
        });

        let err = gateway(&server).save_portfolio(&payload()).await.unwrap_err();
        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/portfolio");
            then.status(200).body("not json");
        });

        let err = gateway(&server).save_portfolio(&payload()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_download_returns_raw_bytes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/portfolio/download");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html>cv</html>");
        });

        let doc = gateway(&server).download_document(&payload()).await.unwrap();

        assert_eq!(&doc[..], b"<html>cv</html>");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_recent_sends_limit() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/portfolio")
                .query_param("limit", "6");
            then.status(200).json_body(json!({
                "items": [{"name": "Jane", "title": "Dev", "skills": ["Rust"]}]
            }));
        });

        let items = gateway(&server).list_recent(6).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.as_deref(), Some("Jane"));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let gw = HttpGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = gw.list_recent(6).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
