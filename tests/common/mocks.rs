use async_trait::async_trait;
use bodycomp_estimator::{
    Error, Result,
    llm::{GenerateRequest, GenerateResponse, LlmClient, Usage},
};
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
    reply: std::result::Result<String, String>,
}

impl MockLlmClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Ok(text.into()),
        }
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Err(error.into()),
        }
    }

    pub fn get_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            Ok(text) => Ok(GenerateResponse {
                text: text.clone(),
                model: "mock-model".to_string(),
                usage: Some(Usage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                }),
            }),
            Err(error) => Err(Error::llm(error.clone())),
        }
    }
}
