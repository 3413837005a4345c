use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while analyzing an image.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Image file not found at '{}'", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Failed to read image: {0}")]
    ImageRead(String),

    #[error("Cannot connect to Ollama at {0}: {1}")]
    Connection(String, String),

    #[error("Ollama returned HTTP {0}: {1}")]
    Ollama(u16, String),

    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),

    #[error("Ollama response has no message content")]
    MissingContent,

    #[error("Failed to write analysis to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize analysis: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzeError {
    /// True for failures that happen while talking to the inference service
    /// or handling its answer, as opposed to a bad input path.
    pub fn is_inference_failure(&self) -> bool {
        !matches!(self, AnalyzeError::ImageNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_is_not_an_inference_failure() {
        let err = AnalyzeError::ImageNotFound(PathBuf::from("nope.jpg"));
        assert!(!err.is_inference_failure());
        assert_eq!(err.to_string(), "Image file not found at 'nope.jpg'");
    }

    #[test]
    fn service_errors_are_inference_failures() {
        assert!(AnalyzeError::Ollama(404, "model not found".into()).is_inference_failure());
        assert!(AnalyzeError::MissingContent.is_inference_failure());
        assert!(
            AnalyzeError::Connection("http://localhost:11434".into(), "refused".into())
                .is_inference_failure()
        );
    }
}
