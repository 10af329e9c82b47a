//! Typed, non-streaming HTTP clients for the supported provider APIs.

mod anthropic;
mod gemini;
mod openai;

use crate::bridge::{BridgeError, Result};
use crate::core::Completion;

/// Run a single completion against the named provider.
pub(super) async fn complete(
    http: &reqwest::Client,
    provider_id: &str,
    model: &str,
    instructions: &str,
    input: &str,
    api_key: &str,
) -> Result<Completion> {
    match provider_id {
        "openai" => openai::complete(http, model, instructions, input, api_key).await,
        "google-gemini" => gemini::complete(http, model, instructions, input, api_key).await,
        "anthropic" => anthropic::complete(http, model, instructions, input, api_key).await,
        other => Err(BridgeError::UnsupportedProvider(other.to_string())),
    }
}
