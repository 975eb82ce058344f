//! Client for the chat-completion AI gateway.
//!
//! One outbound request per diagnosis, no retry. An attached image travels
//! as a data-URL `image_url` part inside a multi-part user message.

use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug)]
pub enum GatewayError {
    /// AI_GATEWAY_API_KEY was not configured on the server
    MissingCredential,
    /// Upstream returned HTTP 429
    RateLimited,
    /// Upstream returned HTTP 402
    QuotaExceeded,
    /// Any other transport or non-success status failure
    Upstream(String),
    /// 200 reply without a usable message content
    EmptyResponse,
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::MissingCredential => {
                write!(f, "AI_GATEWAY_API_KEY is not configured")
            }
            GatewayError::RateLimited => write!(f, "gateway rate limit exceeded"),
            GatewayError::QuotaExceeded => write!(f, "gateway quota exceeded"),
            GatewayError::Upstream(msg) => write!(f, "gateway error: {}", msg),
            GatewayError::EmptyResponse => write!(f, "no response text from gateway"),
        }
    }
}

impl std::error::Error for GatewayError {}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    ImageUrl { image_url: ImageUrl },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GatewayClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            url: config.gateway_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Sends one chat-completion request and returns the raw reply text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        image: Option<(&str, &str)>,
    ) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;

        let request = build_request(&self.model, system_prompt, user_prompt, image);
        debug!("Calling AI gateway at {} (model {})", self.url, self.model);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("invalid gateway reply: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }
}

fn build_request<'a>(
    model: &'a str,
    system_prompt: &'a str,
    user_prompt: &'a str,
    image: Option<(&str, &str)>,
) -> ChatRequest<'a> {
    let user_content = match image {
        Some((mime, data)) => MessageContent::Parts(vec![
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{}", mime, data),
                },
            },
            ContentPart::Text { text: user_prompt },
        ]),
        None => MessageContent::Text(user_prompt),
    };

    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(system_prompt),
            },
            ChatMessage {
                role: "user",
                content: user_content,
            },
        ],
    }
}

fn error_for_status(status: StatusCode, body: String) -> GatewayError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => GatewayError::QuotaExceeded,
        _ => GatewayError::Upstream(format!("status {}: {}", status, body)),
    }
}
