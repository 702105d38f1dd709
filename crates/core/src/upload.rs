use crate::models::UploadFile;
use crate::selection::{check_document_count, MAX_DOCUMENTS, MIN_DOCUMENTS};
use crate::traits::AnalysisService;
use crate::{ServiceError, UploadError};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A file the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Identifier for later lookups; in practice the original file name.
    pub outline_id: String,
    pub file_name: String,
    pub checksum: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: ServiceError,
}

/// Outcome of a sequential batch upload.
///
/// Files listed in `uploaded` stay registered with the service even when a
/// later file fails.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub uploaded: Vec<UploadedDocument>,
    pub failure: Option<UploadFailure>,
    /// Files never attempted because an earlier one failed.
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_result(self) -> Result<Vec<UploadedDocument>, UploadError> {
        match self.failure {
            Some(failure) => Err(UploadError::Service(failure.error)),
            None => Ok(self.uploaded),
        }
    }
}

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();

    files.sort_unstable();
    files
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub async fn read_upload_file(path: &Path) -> Result<UploadFile, UploadError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| UploadError::MissingFileName(path.display().to_string()))?
        .to_string();
    let bytes = tokio::fs::read(path).await?;

    Ok(UploadFile { file_name, bytes })
}

pub async fn upload_one<S>(service: &S, file: &UploadFile) -> Result<UploadedDocument, ServiceError>
where
    S: AnalysisService + Send + Sync + ?Sized,
{
    info!(file = %file.file_name, bytes = file.bytes.len(), "uploading pdf");
    let receipt = service.ingest_pdf(file).await?;

    Ok(UploadedDocument {
        outline_id: receipt.outline_id,
        file_name: file.file_name.clone(),
        checksum: digest_bytes(&file.bytes),
        uploaded_at: Utc::now(),
    })
}

/// Checks the batch size, then reads every file before any request is sent.
pub async fn prepare_batch(paths: &[PathBuf]) -> Result<Vec<UploadFile>, UploadError> {
    check_batch_size(paths.len())?;

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_upload_file(path).await?);
    }
    Ok(files)
}

/// Uploads files one at a time, in order, stopping at the first failure.
pub async fn upload_batch<S>(service: &S, files: &[UploadFile]) -> Result<BatchReport, UploadError>
where
    S: AnalysisService + Send + Sync + ?Sized,
{
    check_batch_size(files.len())?;

    let mut report = BatchReport::default();
    let mut remaining = files.iter();

    for file in remaining.by_ref() {
        match upload_one(service, file).await {
            Ok(document) => report.uploaded.push(document),
            Err(error) => {
                warn!(file = %file.file_name, %error, "batch upload stopped");
                report.failure = Some(UploadFailure {
                    file_name: file.file_name.clone(),
                    error,
                });
                break;
            }
        }
    }

    report.skipped = remaining.map(|file| file.file_name.clone()).collect();
    info!(
        uploaded = report.uploaded.len(),
        skipped = report.skipped.len(),
        complete = report.is_complete(),
        "batch upload finished"
    );
    Ok(report)
}

fn check_batch_size(count: usize) -> Result<(), UploadError> {
    check_document_count(count).map_err(|_| UploadError::BatchSize {
        count,
        min: MIN_DOCUMENTS,
        max: MAX_DOCUMENTS,
    })
}
