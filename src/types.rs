use std::path::PathBuf;
use std::time::Duration;

/// Ollama server address used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Vision model used when neither the CLI nor `config.yaml` names one.
pub const DEFAULT_MODEL: &str = "gemma3:4b";

/// Prompt sent when the user does not supply one.
pub const DEFAULT_PROMPT: &str = "Describe this image in detail.";

/// Connection settings for the Ollama client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Ollama API endpoint (e.g., "http://localhost:11434")
    pub endpoint: String,
    /// Request timeout. `None` waits until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::default().endpoint(endpoint)
    }

    /// Set the Ollama endpoint. A trailing `/` is dropped.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A single image + prompt pair to send to a vision model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub image_path: PathBuf,
    pub model: String,
    pub prompt: String,
}

impl AnalysisRequest {
    pub fn new(
        image_path: impl Into<PathBuf>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}
