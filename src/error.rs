use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures of the external inference call, whatever their cause.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, Self::Llm(_) | Self::Network(_) | Self::OpenAi(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_render_message_verbatim() {
        let err = Error::missing_input("Please upload both front and side images.");
        assert_eq!(err.to_string(), "Please upload both front and side images.");
        assert!(!err.is_upstream_error());
    }

    #[test]
    fn test_llm_errors_are_upstream() {
        let err = Error::llm("quota exceeded");
        assert!(err.is_upstream_error());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
