use crate::error::{AnalyzeError, Result};
use crate::types::ClientConfig;
use reqwest::Client;
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

/// A chat reply from Ollama: the generated text plus the full response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// `message.content` of the response.
    pub description: String,
    /// The whole JSON object returned by `/api/chat`.
    pub raw: Value,
}

/// Send one user message with an attached image to Ollama's `/api/chat`.
///
/// The image is read from disk and sent base64-encoded. The request is not
/// streamed and is not retried.
///
/// # Errors
///
/// Returns an error if:
/// - The image file cannot be read
/// - The Ollama endpoint is unreachable
/// - The server answers with a non-success status (e.g. unknown model)
/// - The body is not JSON or has no `message.content` string
pub async fn chat_with_image(
    client: &Client,
    config: &ClientConfig,
    model: &str,
    prompt: &str,
    image_path: &Path,
) -> Result<ChatReply> {
    let image_b64 = read_image_base64(image_path)?;
    chat_with_image_base64(client, config, model, prompt, &image_b64).await
}

/// Same as [`chat_with_image`] for an image already held in memory as base64.
pub async fn chat_with_image_base64(
    client: &Client,
    config: &ClientConfig,
    model: &str,
    prompt: &str,
    image_b64: &str,
) -> Result<ChatReply> {
    let body = json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": prompt,
            "images": [image_b64],
        }],
        "stream": false,
    });

    let url = format!("{}/api/chat", config.endpoint);
    debug!(%url, model, image_bytes = image_b64.len(), "sending chat request");

    let mut req = client.post(&url).json(&body);
    if let Some(timeout) = config.timeout {
        req = req.timeout(timeout);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| AnalyzeError::Connection(config.endpoint.clone(), e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        return Err(AnalyzeError::Ollama(status, text));
    }

    let raw: Value = resp
        .json()
        .await
        .map_err(|e| AnalyzeError::InvalidResponse(e.to_string()))?;

    let description = extract_content(&raw)?;
    debug!(chars = description.len(), "received chat response");

    Ok(ChatReply { description, raw })
}

/// Pull `message.content` out of a chat response.
pub fn extract_content(response: &Value) -> Result<String> {
    response
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or(AnalyzeError::MissingContent)
}

fn read_image_base64(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AnalyzeError::ImageRead(format!("{}: {}", path.display(), e)))?;
    Ok(base64::Engine::encode(
        &base64::engine::general_purpose::STANDARD,
        &bytes,
    ))
}
