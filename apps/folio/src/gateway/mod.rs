//! Backend Gateway: every call to the portfolio service goes through the
//! `BackendGateway` trait.
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::payload::Payload;
use crate::models::portfolio::PortfolioSummary;

pub mod http;

pub use http::HttpGateway;

/// Number of portfolios requested for the recent list.
pub const RECENT_LIMIT: usize = 6;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Creates or updates a portfolio and returns the server-assigned id.
    async fn save_portfolio(&self, payload: &Payload) -> Result<String, GatewayError>;

    /// Generates the CV document for `payload` and returns its raw bytes.
    async fn download_document(&self, payload: &Payload) -> Result<Bytes, GatewayError>;

    /// Lists the most recently saved portfolios, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<PortfolioSummary>, GatewayError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::*;

    /// Scripted gateway for editor tests. Each call records the payload it
    /// received and replays the configured outcome.
    #[derive(Default)]
    pub(crate) struct FakeGateway {
        pub save_id: Option<String>,
        pub document: Option<Bytes>,
        pub recent: Option<Vec<PortfolioSummary>>,
        pub calls: Mutex<Vec<(&'static str, Option<Payload>)>>,
    }

    impl FakeGateway {
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().iter().map(|(c, _)| *c).collect()
        }

        pub fn last_payload(&self) -> Option<Payload> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find_map(|(_, p)| p.clone())
        }

        fn server_error() -> GatewayError {
            GatewayError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            }
        }
    }

    #[async_trait]
    impl BackendGateway for FakeGateway {
        async fn save_portfolio(&self, payload: &Payload) -> Result<String, GatewayError> {
            self.calls.lock().unwrap().push(("save", Some(payload.clone())));
            self.save_id.clone().ok_or_else(Self::server_error)
        }

        async fn download_document(&self, payload: &Payload) -> Result<Bytes, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push(("download", Some(payload.clone())));
            self.document.clone().ok_or_else(Self::server_error)
        }

        async fn list_recent(&self, _limit: usize) -> Result<Vec<PortfolioSummary>, GatewayError> {
            self.calls.lock().unwrap().push(("recent", None));
            self.recent.clone().ok_or_else(Self::server_error)
        }
    }
}
