use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoutError {
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
