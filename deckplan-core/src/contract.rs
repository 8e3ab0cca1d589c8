//! # contract: pluggable backends for asset production
//!
//! The caches own policy (keys, eviction, TTL, retries); the work of turning a
//! request into bytes sits behind these traits so that real clients and test
//! doubles are interchangeable.
//!
//! - [`ImageGenerator`]: network image generation. One call is one attempt;
//!   retrying is the caller's concern.
//! - [`Rasterizer`]: SVG source to PNG bytes at a given square pixel size.
//!
//! Both traits are annotated for `mockall`, exported behind the
//! `test-export-mocks` feature for downstream crates.

use async_trait::async_trait;
use mockall::automock;

use crate::error::{GenerationError, RasterError};

/// Produces an encoded image for a text prompt.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Performs a single generation attempt.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError>;
}

/// Rasterises an SVG document into PNG bytes.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, svg: &str, pixels: u32) -> Result<Vec<u8>, RasterError>;
}
