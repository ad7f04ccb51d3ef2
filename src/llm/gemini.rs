//! Native Gemini `generateContent` client.
//!
//! Images travel as base64 `inlineData` parts after the text prompt, in the
//! order they appear in the request.

use super::{
    client::LlmClient,
    types::{GenerateRequest, GenerateResponse, ImagePart, Usage},
};
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        let base_url = config
            .base_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| GEMINI_API_BASE.to_string());

        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
        }
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(request: &GenerateRequest) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(request.images.len() + 1);
        parts.push(ContentPart::Text {
            text: request.prompt.clone(),
        });
        parts.extend(request.images.iter().map(ContentPart::from));

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let body = Self::build_body(&request);

        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            image_count = request.images.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse response: {}", e)))?;

        let text = api_response.text()?;
        let usage = api_response.usage_metadata.map(Usage::from);

        debug!(text_len = text.len(), "Received Gemini response");

        Ok(GenerateResponse {
            text,
            model: api_response.model_version.unwrap_or_else(|| self.model.clone()),
            usage,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl From<&ImagePart> for ContentPart {
    fn from(image: &ImagePart) -> Self {
        ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.to_base64(),
            },
        }
    }
}

impl From<UsageMetadata> for Usage {
    fn from(usage: UsageMetadata) -> Self {
        Usage {
            prompt_tokens: usage.prompt_token_count,
            completion_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        }
    }
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> Result<String> {
        let Some(candidate) = self.candidates.first() else {
            let reason = self
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.as_deref())
                .unwrap_or("no candidates returned");
            return Err(Error::llm(format!("Gemini returned no answer: {}", reason)));
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(Error::llm(format!(
                "Gemini returned no text (finish reason: {})",
                reason
            )));
        }

        Ok(text)
    }
}
