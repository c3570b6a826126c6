//! File acceptance at the resume upload boundary.
//!
//! Exactly one non-empty PDF or plain-text file may be submitted. Everything
//! else is rejected here, before the backend is contacted.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;

use crate::errors::ValidationError;

pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";

/// A file the user picked, not yet checked.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// The accepted resume kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Pdf,
    PlainText,
}

impl ResumeKind {
    pub fn mime(self) -> &'static str {
        match self {
            ResumeKind::Pdf => PDF_MIME,
            ResumeKind::PlainText => TEXT_MIME,
        }
    }

    fn from_content_type(content_type: &str) -> Option<Self> {
        // Drop parameters such as `; charset=utf-8`
        let essence = content_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Some(ResumeKind::Pdf),
            TEXT_MIME => Some(ResumeKind::PlainText),
            _ => None,
        }
    }

    fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(ResumeKind::Pdf),
            "txt" => Some(ResumeKind::PlainText),
            _ => None,
        }
    }
}

/// A validated resume, ready for `/api/analyze-resume`.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub kind: ResumeKind,
    pub bytes: Bytes,
}

impl UploadCandidate {
    /// Reads a file from disk, guessing its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let content_type = ResumeKind::from_file_name(&file_name).map(|k| k.mime().to_string());

        Ok(Self {
            file_name,
            content_type,
            bytes: Bytes::from(bytes),
        })
    }

    fn kind(&self) -> Option<ResumeKind> {
        match &self.content_type {
            Some(ct) => ResumeKind::from_content_type(ct),
            None => ResumeKind::from_file_name(&self.file_name),
        }
    }
}

/// Accepts exactly one non-empty PDF or plain-text file.
pub fn select_resume(mut candidates: Vec<UploadCandidate>) -> Result<ResumeFile, ValidationError> {
    if candidates.len() > 1 {
        return Err(ValidationError::MultipleFiles);
    }
    let candidate = candidates.pop().ok_or(ValidationError::NoFile)?;

    let kind = candidate.kind().ok_or(ValidationError::UnsupportedType)?;

    if candidate.bytes.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    Ok(ResumeFile {
        file_name: candidate.file_name,
        kind,
        bytes: candidate.bytes,
    })
}
