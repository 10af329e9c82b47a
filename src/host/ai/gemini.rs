//! Google Gemini generateContent API client.

use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeError, Result};
use crate::core::Completion;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
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
    // No separate instructions field in this API; prepend them to the prompt.
    let prompt = if instructions.is_empty() {
        input.to_string()
    } else {
        format!("{instructions}\n\n{input}")
    };

    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
    };

    let url = format!("{API_BASE}/{model}:generateContent");
    let response = http
        .post(&url)
        .header("x-goog-api-key", api_key)
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

    let reply: GenerateReply = response.json().await?;
    let content = reply
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| &content.parts)
        .map(|part| part.text.as_str())
        .find(|text| !text.is_empty())
        .ok_or_else(|| BridgeError::Response("no candidate text in response".to_string()))?;

    Ok(Completion {
        content: content.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Fix this.\n\nteh text".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Fix this.\n\nteh text");
    }

    #[test]
    fn reply_parses_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Bonjour"}], "role": "model"}, "finishReason": "STOP"}
            ],
            "usageMetadata": {"promptTokenCount": 4}
        }"#;
        let reply: GenerateReply = serde_json::from_str(json).unwrap();
        let text = reply
            .candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| &content.parts)
            .find(|part| !part.text.is_empty())
            .map(|part| part.text.as_str());
        assert_eq!(text, Some("Bonjour"));
    }

    #[test]
    fn reply_without_candidates_parses_to_empty() {
        let reply: GenerateReply = serde_json::from_str("{}").unwrap();
        assert!(reply.candidates.is_empty());
    }
}
