use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// A single multimodal generation call: one text prompt followed by images.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub images: Vec<ImagePart>,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: String,
    pub model: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ImagePart {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_part_data_url() {
        let part = ImagePart::new("image/png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(part.to_base64(), "iVBORw==");
        assert_eq!(part.to_data_url(), "data:image/png;base64,iVBORw==");
    }
}
