//! OpenAI Responses API client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeError, Result};
use crate::core::Completion;

const API_URL: &str = "https://api.openai.com/v1/responses";

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

/// Output items carry a `type` tag; only message items have content, so
/// anything else (reasoning, tool calls) deserializes to an empty list.
#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
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
    let request = ResponsesRequest {
        model,
        input,
        instructions: (!instructions.is_empty()).then_some(instructions),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| BridgeError::ApiKeyMissing("openai".to_string()))?,
    );

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

    let reply: ResponsesReply = response.json().await?;
    let content = reply
        .output
        .iter()
        .flat_map(|item| &item.content)
        .map(|content| content.text.as_str())
        .find(|text| !text.is_empty())
        .ok_or_else(|| BridgeError::Response("no output text in response".to_string()))?;

    Ok(Completion {
        content: content.to_string(),
    })
}
