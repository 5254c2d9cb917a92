//! Gemini image editing client
//!
//! Sends the current image (base64 payload + MIME type) together with the
//! edit instruction to the Gemini `generateContent` endpoint and extracts
//! the generated image from the first candidate. The response payload is
//! returned as base64 without a data URI prefix; the caller re-wraps it
//! with the MIME type of the submitted image.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AiConfig;
use crate::error::EditError;

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: AiConfig,
    client: Client,
    base_url: String,
}

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

/// Gemini content structure
#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

/// Gemini content part: either text or inline image data
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

/// Inline binary payload within a content part
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

/// Gemini generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_modalities: Vec<String>,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// Gemini candidate response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Gemini response content
#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

/// Gemini response part (text parts deserialize with no inline data)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponsePart {
    #[serde(default)]
    inline_data: Option<GeminiInlineData>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: AiConfig) -> Result<Self, EditError> {
        if config.api_key.is_empty() {
            return Err(EditError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(EditError::Http)?;

        let base_url = "https://generativelanguage.googleapis.com/v1beta/models".to_string();

        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    /// Submit an image plus an instruction, returning the base64 payload of
    /// the newly generated image (no data URI prefix)
    pub async fn edit_image(
        &self,
        payload: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, EditError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart {
                        text: None,
                        inline_data: Some(GeminiInlineData {
                            mime_type: mime_type.to_string(),
                            data: payload.to_string(),
                        }),
                    },
                    GeminiPart {
                        text: Some(prompt.to_string()),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: GeminiGenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.config.model, self.config.api_key
        );

        println!(
            "🤖 Sending edit request to {} ({} chars of prompt)",
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(EditError::Http)?;

        let status = response.status();
        let response_text = response.text().await.map_err(EditError::Http)?;

        if !status.is_success() {
            eprintln!("⚠️  Gemini API error: {} - {}", status, response_text);
            return Err(EditError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| EditError::MalformedResponse(e.to_string()))?;

        extract_image(gemini_response)
    }
}

/// Pull the generated image payload out of a parsed response
fn extract_image(response: GeminiResponse) -> Result<String, EditError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| EditError::MalformedResponse("no candidates in response".to_string()))?;

    let content = match candidate.content {
        Some(content) => content,
        None => {
            // A refusal arrives as a candidate with a finish reason and no content
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "unknown".to_string());
            return Err(EditError::MalformedResponse(format!(
                "candidate has no content ({reason})"
            )));
        }
    };

    content
        .parts
        .into_iter()
        .find_map(|part| part.inline_data)
        .map(|inline| inline.data)
        .ok_or_else(|| EditError::MalformedResponse("no image part in response".to_string()))
}
