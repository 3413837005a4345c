//! # vlm-analyze
//!
//! Send a local image plus a text prompt to an Ollama vision model, print
//! the answer, and keep the request/response pair as a timestamped JSON
//! record.
//!
//! ## Features
//!
//! - **Single-shot chat** against `/api/chat` with a base64-encoded image
//! - **`config.yaml` defaults** for the model, with CLI overrides
//! - **JSON records** in `outputs/<image>_analysis_<YYYYMMDD_HHMMSS>.json`,
//!   never overwriting an earlier record from the same second
//! - **Works with any Ollama vision model** (gemma3, llava, minicpm-v, qwen2.5vl, etc.)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vlm_analyze::{analyze_image, AnalysisRequest, ClientConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = reqwest::Client::new();
//!     let config = ClientConfig::default();
//!     let request = AnalysisRequest::new(
//!         "photo.jpg",
//!         "gemma3:4b",
//!         "Describe this image in detail.",
//!     );
//!
//!     let outcome = analyze_image(&client, &config, &request, Path::new("outputs")).await?;
//!     println!("{}", outcome.record.description);
//!     println!("saved to {}", outcome.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod record;
pub mod types;

// Re-export main types at crate root
pub use analyzer::{
    analyze_image, ensure_image_exists, request_analysis, Analysis, AnalysisOutcome,
};
pub use client::{chat_with_image, chat_with_image_base64, ChatReply};
pub use config::{load_config, AppConfig, ConfigError};
pub use error::{AnalyzeError, Result};
pub use record::{write_record, AnalysisRecord};
pub use types::{AnalysisRequest, ClientConfig, DEFAULT_MODEL, DEFAULT_PROMPT};
