//! HTTP boundary for the analysis pipeline.
//!
//! Input validation (missing fields, empty filename, non-PDF upload) happens
//! here, before any extraction work. The upload is spooled to a scope-bound
//! temp file that is removed on every exit path when the handle drops.

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::analysis::{run_analysis, AnalysisResult};
use crate::document::DocumentReader;
use crate::errors::AppError;
use crate::state::AppState;

const REQUIRED_FIELDS_MSG: &str = "file and job_description are required";
const UNSUPPORTED_FORMAT_MSG: &str = "Only PDF resumes are supported for full analysis";

/// POST /analyze — multipart fields `file` (PDF upload) and `job_description`
/// (plain text).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                upload = Some((filename, bytes.to_vec()));
            }
            "job_description" => {
                job_description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::MissingInput(REQUIRED_FIELDS_MSG.to_string()))?;
    let job_description =
        job_description.ok_or_else(|| AppError::MissingInput(REQUIRED_FIELDS_MSG.to_string()))?;

    if filename.is_empty() {
        return Err(AppError::EmptyFilename);
    }
    let extension = filename.rsplit('.').next().unwrap_or_default().to_lowercase();
    if extension != "pdf" {
        return Err(AppError::UnsupportedFormat(UNSUPPORTED_FORMAT_MSG.to_string()));
    }

    let mut spool = tempfile::NamedTempFile::new()?;
    spool.write_all(&bytes)?;
    spool.flush()?;

    let reader = DocumentReader::open(spool.path())
        .map_err(|e| AppError::DocumentUnreadable(e.to_string()))?;
    let pages = reader.pages();
    info!(
        filename = %filename,
        pages = pages.len(),
        jd_bytes = job_description.len(),
        "analyzing resume upload"
    );

    let result = run_analysis(&pages, &job_description, state.tagger.as_ref());
    Ok(Json(result))
}
