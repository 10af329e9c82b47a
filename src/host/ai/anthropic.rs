//! Anthropic Messages API client.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeError, Result};
use crate::core::Completion;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 8192;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<MessageParam<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub async fn complete(
    http: &reqwest::Client,
    model: &str,
    instructions: &str,
    input: &str,
    api_key: &str,
) -> Result<Completion> {
    let request = MessagesRequest {
        model,
        max_tokens: MAX_TOKENS,
        messages: vec![MessageParam {
            role: "user",
            content: input,
        }],
        system: (!instructions.is_empty()).then_some(instructions),
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        "x-api-key",
        HeaderValue::from_str(api_key)
            .map_err(|_| BridgeError::ApiKeyMissing("anthropic".to_string()))?,
    );
    headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

    let response = http
        .post(API_URL)
        .headers(headers)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BridgeError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let reply: MessagesReply = response.json().await?;
    let content = reply
        .content
        .iter()
        .map(|block| block.text.as_str())
        .find(|text| !text.is_empty())
        .ok_or_else(|| BridgeError::Response("no content text in response".to_string()))?;

    Ok(Completion {
        content: content.to_string(),
    })
}
