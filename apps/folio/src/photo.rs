use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, warn};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Identifies one photo selection. Later selections get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhotoTicket(u64);

/// Tracks which photo selection is current so that a slow read from an
/// earlier selection cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct PhotoSlot {
    latest: u64,
    pending: bool,
}

impl PhotoSlot {
    /// Registers a new selection and returns its ticket.
    pub fn select(&mut self) -> PhotoTicket {
        self.latest += 1;
        self.pending = true;
        PhotoTicket(self.latest)
    }

    /// Whether a read for the newest selection is still running.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Decides whether a finished read may be applied. Only the newest
    /// selection's result is accepted, and only when it succeeded.
    pub fn accept(&mut self, ticket: PhotoTicket, result: Result<String, std::io::Error>) -> Option<String> {
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "Discarding stale photo read");
            return None;
        }
        self.pending = false;
        match result {
            Ok(data_url) => Some(data_url),
            Err(e) => {
                warn!("Photo read failed: {e}");
                None
            }
        }
    }
}

/// Guesses the image MIME type from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",
        _ => FALLBACK_MIME,
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}

/// Reads an image file and inlines it as a base64 data URL.
pub async fn read_as_data_url(path: &Path) -> Result<String, std::io::Error> {
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), size = bytes.len(), "Photo read");
    Ok(encode_data_url(mime_for(path), &bytes))
}
