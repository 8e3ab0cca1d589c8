//! `ImageGenerator` backed by an OpenAI-compatible images endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::contract::ImageGenerator;
use crate::error::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct GenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

pub struct OpenAiImageClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    size: String,
}

impl OpenAiImageClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
        })
    }

    /// Reads `OPENAI_API_KEY` and optional `OPENAI_BASE_URL`.
    pub fn new_from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|e| {
            tracing::error!(error = ?e, "OPENAI_API_KEY missing in environment");
            e
        })?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        info!(base_url = %base_url, "Initialised image client from environment");
        Ok(Self::new(api_key, base_url)?)
    }

    pub fn with_model(mut self, model: impl Into<String>, size: impl Into<String>) -> Self {
        self.model = model.into();
        self.size = size.into();
        self
    }
}

fn classify_status(status: reqwest::StatusCode, body: String) -> GenerationError {
    let code = status.as_u16();
    match code {
        429 => GenerationError::RateLimited,
        500..=599 => GenerationError::Server {
            status: code,
            message: body,
        },
        _ => GenerationError::Client {
            status: code,
            message: body,
        },
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        let url = format!("{}/images/generations", self.base_url);
        debug!(url = %url, model = %self.model, "Requesting image generation");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&GenerationRequest {
                model: &self.model,
                prompt,
                n: 1,
                size: &self.size,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Image generation request failed");
            return Err(classify_status(status, body));
        }

        let parsed: GenerationResponse = response.json().await?;
        let image_url = parsed
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| GenerationError::InvalidResponse("no image url in response".into()))?;

        let download = self.http.get(&image_url).send().await?;
        let status = download.status();
        if !status.is_success() {
            let body = download.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }
        let bytes = download.bytes().await?;
        info!(bytes = bytes.len(), "Downloaded generated image");
        Ok(bytes.to_vec())
    }
}
