//! AI agent client - the HTTP boundary to the backend that answers users.
//!
//! Two endpoints: `POST {agent_url}/text` with a JSON body and
//! `POST {agent_url}/image` with a multipart body. Both answer with the
//! response envelope the interpreter walks.

use std::time::Duration;

use reqwest::multipart;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Caption sent with a photo when the user did not provide one.
pub const DEFAULT_IMAGE_MESSAGE: &str = "This is the profile image";

/// JSON body for the text endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextRequest {
    pub from: String,
    #[serde(rename = "userMessage")]
    pub user_message: String,
}

impl TextRequest {
    pub fn new(from: i64, text: &str) -> Self {
        Self {
            from: from.to_string(),
            user_message: text.to_string(),
        }
    }
}

/// Multipart body for the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub from: String,
    pub user_message: String,
    pub image: Vec<u8>,
}

impl ImageRequest {
    /// An absent or empty caption falls back to [`DEFAULT_IMAGE_MESSAGE`].
    pub fn new(from: i64, caption: Option<&str>, image: Vec<u8>) -> Self {
        let user_message = match caption {
            Some(caption) if !caption.is_empty() => caption.to_string(),
            _ => DEFAULT_IMAGE_MESSAGE.to_string(),
        };
        Self {
            from: from.to_string(),
            user_message,
            image,
        }
    }
}

#[derive(Debug)]
pub enum AgentError {
    Http(String),
    Api(String),
    Parse(String),
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::Http(e) => write!(f, "HTTP error: {e}"),
            AgentError::Api(e) => write!(f, "API error: {e}"),
            AgentError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for AgentError {}

/// Client for the AI agent service.
pub struct AgentClient {
    base_url: String,
    http: reqwest::Client,
}

impl AgentClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { base_url, http }
    }

    /// Send a user's text message to the agent.
    pub async fn send_text(&self, request: &TextRequest) -> Result<Value, AgentError> {
        info!("Sending text to agent for user {}", request.from);

        let response = self
            .http
            .post(format!("{}/text", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::Http(e.to_string()))?;

        Self::read_envelope(response).await
    }

    /// Send a user's photo to the agent as a multipart upload.
    pub async fn send_image(&self, request: ImageRequest) -> Result<Value, AgentError> {
        info!(
            "Sending image to agent for user {} ({} bytes)",
            request.from,
            request.image.len()
        );

        let image = multipart::Part::bytes(request.image)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| AgentError::Http(e.to_string()))?;
        let form = multipart::Form::new()
            .text("from", request.from)
            .text("userMessage", request.user_message)
            .part("image", image);

        let response = self
            .http
            .post(format!("{}/image", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AgentError::Http(e.to_string()))?;

        Self::read_envelope(response).await
    }

    async fn read_envelope(response: reqwest::Response) -> Result<Value, AgentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!("{status}: {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Http(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| AgentError::Parse(e.to_string()))
    }
}
