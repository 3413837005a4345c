use crate::client;
use crate::error::{AnalyzeError, Result};
use crate::record::{self, AnalysisRecord};
use crate::types::{AnalysisRequest, ClientConfig};
use chrono::{DateTime, Local};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub record: AnalysisRecord,
    pub output_path: PathBuf,
}

/// A model answer that has not been written to disk yet.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub record: AnalysisRecord,
    captured_at: DateTime<Local>,
}

impl Analysis {
    /// Persist the record under `output_dir`, creating the directory if needed.
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        let stamp = record::file_stamp(&self.captured_at);
        let output_path = record::write_record(output_dir, &self.record, &stamp)?;

        info!(
            image = %self.record.image_path,
            model = %self.record.model_used,
            output = %output_path.display(),
            "analysis saved"
        );

        Ok(output_path)
    }
}

/// Analyze one image and persist the result under `output_dir`.
///
/// The image must exist before anything else happens: a missing file returns
/// [`AnalyzeError::ImageNotFound`] without contacting Ollama or touching
/// `output_dir`.
pub async fn analyze_image(
    client: &Client,
    config: &ClientConfig,
    request: &AnalysisRequest,
    output_dir: &Path,
) -> Result<AnalysisOutcome> {
    ensure_image_exists(&request.image_path)?;

    let analysis = request_analysis(client, config, request).await?;
    let output_path = analysis.save(output_dir)?;

    Ok(AnalysisOutcome {
        record: analysis.record,
        output_path,
    })
}

/// Ask the model about the image and build the record, without writing it.
///
/// Callers are expected to have run [`ensure_image_exists`]; an unreadable
/// image surfaces here as [`AnalyzeError::ImageRead`].
pub async fn request_analysis(
    client: &Client,
    config: &ClientConfig,
    request: &AnalysisRequest,
) -> Result<Analysis> {
    let reply = client::chat_with_image(
        client,
        config,
        &request.model,
        &request.prompt,
        &request.image_path,
    )
    .await?;

    let captured_at = Local::now();
    Ok(Analysis {
        record: AnalysisRecord::new(request, reply, &captured_at),
        captured_at,
    })
}

/// Fail early when the input image is missing.
pub fn ensure_image_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AnalyzeError::ImageNotFound(path.to_path_buf()))
    }
}
