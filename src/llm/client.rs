use super::{gemini::GeminiClient, types::*};
use crate::{
    Error, Result,
    config::{LlmConfig, LlmProvider},
};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

pub fn create_client(config: LlmConfig) -> Arc<dyn LlmClient> {
    match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(config)),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(config)),
    }
}

/// Client for OpenAI-compatible chat completion endpoints, including the
/// compatibility layer Gemini exposes under `/v1beta/openai`.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if let Some(base_url) = config.base_url.filter(|url| !url.is_empty()) {
            openai_config = openai_config.with_api_base(base_url);
        }

        let client = Client::with_config(openai_config);

        Self {
            client,
            model: config.model,
        }
    }

    fn build_message(request: &GenerateRequest) -> Result<openai_types::ChatCompletionRequestMessage> {
        let mut parts = Vec::with_capacity(request.images.len() + 1);

        parts.push(openai_types::ChatCompletionRequestUserMessageContentPart::Text(
            openai_types::ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(request.prompt.clone())
                .build()?,
        ));

        for image in &request.images {
            let image_url = openai_types::ImageUrlArgs::default()
                .url(image.to_data_url())
                .build()?;
            parts.push(openai_types::ChatCompletionRequestUserMessageContentPart::ImageUrl(
                openai_types::ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()?,
            ));
        }

        let message = openai_types::ChatCompletionRequestUserMessageArgs::default()
            .content(openai_types::ChatCompletionRequestUserMessageContent::Array(parts))
            .build()?;

        Ok(message.into())
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        debug!(
            "Creating chat completion with {} images",
            request.images.len()
        );

        let message = Self::build_message(&request)?;

        let openai_request = openai_types::CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .temperature(request.temperature)
            .build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::llm("Response contained no text"))?;

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(GenerateResponse {
            text,
            model: response.model,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart,
    };

    fn create_test_config() -> LlmConfig {
        LlmConfig {
            provider: LlmProvider::OpenAi,
            base_url: Some("https://api.openai.com/v1".to_string()),
            api_key: "test-api-key".to_string(),
            model: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiClient::new(create_test_config());
        assert_eq!(client.model, "gpt-4o");
    }

    #[test]
    fn test_message_puts_prompt_before_images() {
        let request = GenerateRequest {
            prompt: "Describe".to_string(),
            images: vec![
                ImagePart::new("image/png", vec![1, 2, 3]),
                ImagePart::new("image/jpeg", vec![4, 5, 6]),
            ],
            temperature: 0.4,
        };

        let message = OpenAiClient::build_message(&request).unwrap();
        let ChatCompletionRequestMessage::User(user) = message else {
            panic!("expected a user message");
        };
        let ChatCompletionRequestUserMessageContent::Array(parts) = user.content else {
            panic!("expected multipart content");
        };

        assert_eq!(parts.len(), 3);
        assert!(matches!(
            &parts[0],
            ChatCompletionRequestUserMessageContentPart::Text(text) if text.text == "Describe"
        ));
        assert!(matches!(
            &parts[1],
            ChatCompletionRequestUserMessageContentPart::ImageUrl(image)
                if image.image_url.url == "data:image/png;base64,AQID"
        ));
        assert!(matches!(
            &parts[2],
            ChatCompletionRequestUserMessageContentPart::ImageUrl(image)
                if image.image_url.url.starts_with("data:image/jpeg;base64,")
        ));
    }

    #[test]
    fn test_create_client_accepts_both_providers() {
        let _openai = create_client(create_test_config());
        let _gemini = create_client(LlmConfig::default());
    }
}
