//! Error types for the asset and input boundaries.
//!
//! The slide pipeline itself never fails; these cover image generation,
//! cache directory I/O, glyph rasterisation and proposal decoding.

use std::path::PathBuf;
use thiserror::Error;

use crate::retry::Retryable;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Rate limited by image provider")]
    RateLimited,

    #[error("Connection to image provider failed: {0}")]
    Connection(String),

    #[error("Image provider server error (status: {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Image request rejected (status: {status}): {message}")]
    Client { status: u16, message: String },

    #[error("Unexpected image provider response: {0}")]
    InvalidResponse(String),
}

impl Retryable for GenerationError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited
                | GenerationError::Connection(_)
                | GenerationError::Server { .. }
        )
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            let status = status.as_u16();
            return match status {
                429 => GenerationError::RateLimited,
                500..=599 => GenerationError::Server {
                    status,
                    message: e.to_string(),
                },
                _ => GenerationError::Client {
                    status,
                    message: e.to_string(),
                },
            };
        }
        if e.is_decode() {
            GenerationError::InvalidResponse(e.to_string())
        } else {
            GenerationError::Connection(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("SVG parse failed: {0}")]
    Parse(String),

    #[error("Cannot allocate a {0}x{0} pixmap")]
    Pixmap(u32),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("Invalid proposal JSON: {0}")]
    Json(#[from] serde_json::Error),
}
