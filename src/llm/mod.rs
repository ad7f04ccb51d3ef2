mod client;
mod gemini;
mod types;

pub use client::{LlmClient, OpenAiClient, create_client};
pub use gemini::{GEMINI_API_BASE, GeminiClient};
pub use types::{GenerateRequest, GenerateResponse, ImagePart, Usage};
