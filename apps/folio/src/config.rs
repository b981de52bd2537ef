use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

/// Port the backend listens on when only the origin is known.
pub const DEFAULT_BACKEND_PORT: u16 = 8000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub origin: String,
    pub backend_url: String,
    pub download_dir: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let origin = std::env::var("FOLIO_ORIGIN").unwrap_or_else(|_| "http://localhost".to_string());
        let backend_override = std::env::var("FOLIO_BACKEND_URL").ok();

        Ok(Config {
            backend_url: resolve_backend_url(backend_override.as_deref(), &origin)?,
            origin,
            download_dir: std::env::var("FOLIO_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            request_timeout: Duration::from_secs(
                std::env::var("FOLIO_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("FOLIO_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Re-resolves the backend URL with a command-line override. A blank
    /// override falls back to the configured origin.
    pub fn apply_backend_override(&mut self, backend_url: &str) -> Result<()> {
        self.backend_url = resolve_backend_url(Some(backend_url), &self.origin)?;
        Ok(())
    }
}

/// Picks the backend base URL: an explicit, non-blank override wins;
/// otherwise the origin's scheme and host are kept and the port is replaced
/// with the default backend port.
pub fn resolve_backend_url(backend_override: Option<&str>, origin: &str) -> Result<String> {
    if let Some(url) = backend_override.map(str::trim).filter(|u| !u.is_empty()) {
        return Ok(url.trim_end_matches('/').to_string());
    }

    let origin = Url::parse(origin).with_context(|| format!("Invalid origin '{origin}'"))?;
    let host = origin
        .host_str()
        .with_context(|| format!("Origin '{origin}' has no host"))?;
    Ok(format!("{}://{}:{}", origin.scheme(), host, DEFAULT_BACKEND_PORT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        assert_eq!(
            resolve_backend_url(Some("https://api.example.com/"), "http://localhost").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_blank_override_falls_back_to_origin() {
        assert_eq!(
            resolve_backend_url(Some("  "), "https://folio.dev:5173/builder").unwrap(),
            "https://folio.dev:8000"
        );
    }

    #[test]
    fn test_origin_without_port() {
        assert_eq!(
            resolve_backend_url(None, "http://localhost").unwrap(),
            "http://localhost:8000"
        );
    }

    fn config_for(origin: &str) -> Config {
        Config {
            origin: origin.to_string(),
            backend_url: resolve_backend_url(None, origin).unwrap(),
            download_dir: PathBuf::from("."),
            request_timeout: Duration::from_secs(30),
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_blank_flag_override_uses_configured_origin() {
        let mut config = config_for("https://folio.dev:5173");
        config.apply_backend_override(" ").unwrap();
        assert_eq!(config.backend_url, "https://folio.dev:8000");

        config.apply_backend_override("http://10.0.0.5:9000/").unwrap();
        assert_eq!(config.backend_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_bad_origin_is_an_error() {
        assert!(resolve_backend_url(None, "not a url").is_err());
    }
}
