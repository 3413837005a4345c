//! The JSON record written for every successful analysis.
//!
//! Records land in `<output_dir>/<image stem>_analysis_<YYYYMMDD_HHMMSS>.json`.
//! Two analyses of the same image within one second never overwrite each
//! other: the later one gets a `_1`, `_2`, ... suffix.

use crate::client::ChatReply;
use crate::error::{AnalyzeError, Result};
use crate::types::AnalysisRequest;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Stem used when the image path has no usable file name.
const FALLBACK_STEM: &str = "image";

/// Persisted request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Local capture time, ISO-8601 with microseconds.
    pub timestamp: String,
    pub image_path: String,
    pub model_used: String,
    pub prompt: String,
    pub description: String,
    /// Unmodified `/api/chat` response body.
    pub full_response: Value,
}

impl AnalysisRecord {
    pub fn new(
        request: &AnalysisRequest,
        reply: ChatReply,
        captured_at: &DateTime<Local>,
    ) -> Self {
        Self {
            timestamp: iso_timestamp(captured_at),
            image_path: request.image_path.to_string_lossy().into_owned(),
            model_used: request.model.clone(),
            prompt: request.prompt.clone(),
            description: reply.description,
            full_response: reply.raw,
        }
    }

    /// Serialize with 4-space indentation. Non-ASCII text is written as-is.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// `2025-03-01T14:05:09.123456`
pub fn iso_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// `20250301_140509`
pub fn file_stamp(at: &DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Base name of the image without its final extension.
pub fn image_stem(image_path: &Path) -> String {
    image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string())
}

/// File name for the record of `image_path`; `attempt > 0` adds a suffix.
pub fn output_file_name(image_path: &Path, stamp: &str, attempt: u32) -> String {
    let stem = image_stem(image_path);
    if attempt == 0 {
        format!("{}_analysis_{}.json", stem, stamp)
    } else {
        format!("{}_analysis_{}_{}.json", stem, stamp, attempt)
    }
}

/// Write `record` into `dir`, creating the directory if needed.
///
/// Returns the path of the new file. Existing files are never replaced.
pub fn write_record(dir: &Path, record: &AnalysisRecord, stamp: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| AnalyzeError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let json = record.to_pretty_json()?;
    let image_path = Path::new(&record.image_path);

    let mut attempt = 0;
    loop {
        let path = dir.join(output_file_name(image_path, stamp, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(&json).map_err(|source| AnalyzeError::Write {
                    path: path.clone(),
                    source,
                })?;
                debug!(path = %path.display(), bytes = json.len(), "wrote analysis record");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "output file exists, trying next suffix");
                attempt += 1;
            }
            Err(source) => return Err(AnalyzeError::Write { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_record() -> AnalysisRecord {
        AnalysisRecord {
            timestamp: "2025-03-01T14:05:09.000000".into(),
            image_path: "photos/café.jpg".into(),
            model_used: "gemma3:4b".into(),
            prompt: "Descreva esta imagem em detalhes.".into(),
            description: "Um cão sentado na grama.".into(),
            full_response: json!({"message": {"content": "Um cão sentado na grama."}}),
        }
    }

    #[test]
    fn timestamps_use_expected_formats() {
        let at = Local.with_ymd_and_hms(2025, 3, 1, 14, 5, 9).unwrap();
        assert_eq!(iso_timestamp(&at), "2025-03-01T14:05:09.000000");
        assert_eq!(file_stamp(&at), "20250301_140509");
    }

    #[test]
    fn file_name_strips_only_last_extension() {
        assert_eq!(
            output_file_name(Path::new("dir/photo.jpg"), "20250301_140509", 0),
            "photo_analysis_20250301_140509.json"
        );
        assert_eq!(
            output_file_name(Path::new("archive.tar.gz"), "20250301_140509", 0),
            "archive.tar_analysis_20250301_140509.json"
        );
        assert_eq!(
            output_file_name(Path::new("noext"), "20250301_140509", 2),
            "noext_analysis_20250301_140509_2.json"
        );
    }

    #[test]
    fn stem_falls_back_for_pathless_input() {
        assert_eq!(image_stem(Path::new("/")), "image");
        assert_eq!(image_stem(Path::new("..")), "image");
    }

    #[test]
    fn pretty_json_keeps_field_order_and_unicode() {
        let text = String::from_utf8(sample_record().to_pretty_json().unwrap()).unwrap();
        assert!(text.contains("Um cão sentado na grama."));
        assert!(text.contains("\n    \"timestamp\""));

        let order: Vec<usize> = [
            "timestamp",
            "image_path",
            "model_used",
            "prompt",
            "description",
            "full_response",
        ]
        .iter()
        .map(|k| text.find(&format!("\"{}\"", k)).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn write_creates_directory_and_never_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("outputs");
        let record = sample_record();

        let first = write_record(&dir, &record, "20250301_140509").unwrap();
        let second = write_record(&dir, &record, "20250301_140509").unwrap();

        assert_eq!(
            first.file_name().unwrap(),
            "café_analysis_20250301_140509.json"
        );
        assert_eq!(
            second.file_name().unwrap(),
            "café_analysis_20250301_140509_1.json"
        );

        let parsed: AnalysisRecord =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(parsed, record);
    }
}
