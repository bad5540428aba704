//! Upload selections and multipart request payloads.

use crate::endpoint::Endpoint;
use crate::error::{AuditorError, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// MIME type used when the extension gives no hint.
const FALLBACK_MIME: &str = "application/octet-stream";

/// A file the user picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    mime_type: String,
    bytes: Bytes,
}

impl FileUpload {
    /// Creates an upload from in-memory bytes, guessing the MIME type from the name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string();
        Self { file_name, mime_type, bytes: bytes.into() }
    }

    /// Reads an upload from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AuditorError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid filename: {}", path.display()),
                ))
            })?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Named file parts sent as one multipart body.
///
/// A `reqwest` form can only be sent once, so [`RequestPayload::to_form`]
/// builds a new one per request while the file bytes stay shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPayload {
    parts: Vec<(String, FileUpload)>,
}

impl RequestPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `uploads` with the field names `endpoint` expects, in order.
    pub fn for_endpoint(endpoint: Endpoint, uploads: impl IntoIterator<Item = FileUpload>) -> Self {
        endpoint
            .fields()
            .iter()
            .zip(uploads)
            .fold(Self::new(), |payload, (field, upload)| payload.with_file(*field, upload))
    }

    /// Adds a file under `field`, replacing an earlier part with the same name.
    #[must_use]
    pub fn with_file(mut self, field: impl Into<String>, upload: FileUpload) -> Self {
        let field = field.into();
        self.parts.retain(|(name, _)| *name != field);
        self.parts.push((field, upload));
        self
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Builds a fresh multipart form for one request.
    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (field, upload) in &self.parts {
            let part = Part::stream_with_length(upload.bytes.clone(), upload.bytes.len() as u64)
                .file_name(upload.file_name.clone())
                .mime_str(&upload.mime_type)
                .map_err(|e| AuditorError::Request(format!("Failed to set MIME type: {}", e)))?;
            form = form.part(field.clone(), part);
        }
        Ok(form)
    }
}
