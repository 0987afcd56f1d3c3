use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use axum::extract::Multipart;
use tempfile::NamedTempFile;

use crate::infrastructure::observability::sanitize_filename;

use super::error::ApiError;

/// A multipart upload: the `file` part spooled to disk plus any text fields.
pub struct Upload {
    file: NamedTempFile,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: u64,
    fields: HashMap<String, String>,
}

impl Upload {
    /// Reads every part of the form. The file part is written to a
    /// temporary file that keeps the uploaded extension, or
    /// `default_suffix` when the client sent no file name.
    pub async fn read(mut multipart: Multipart, default_suffix: &str) -> Result<Self, ApiError> {
        let mut file: Option<(NamedTempFile, Option<String>, Option<String>, u64)> = None;
        let mut fields = HashMap::new();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name != "file" {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read field {name}: {e}")))?;
                fields.insert(name, value);
                continue;
            }

            let filename = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .map(str::trim)
                .filter(|ct| !ct.is_empty())
                .map(str::to_string);
            let suffix = match filename.as_deref() {
                Some(f) => extension_suffix(f),
                None => default_suffix.to_string(),
            };

            let mut temp = tempfile::Builder::new()
                .prefix("upload-")
                .suffix(&suffix)
                .tempfile()
                .map_err(|e| ApiError::internal(format!("Failed to create temporary file: {e}")))?;

            let mut size = 0u64;
            while let Some(chunk) = field
                .chunk()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?
            {
                temp.write_all(&chunk)
                    .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?;
                size += chunk.len() as u64;
            }
            temp.flush()
                .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?;

            tracing::debug!(
                filename = %sanitize_filename(filename.as_deref().unwrap_or_default()),
                content_type = content_type.as_deref().unwrap_or("unknown"),
                bytes = size,
                "File upload received"
            );
            file = Some((temp, filename, content_type, size));
        }

        let (file, filename, content_type, size) =
            file.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

        Ok(Self {
            file,
            filename,
            content_type,
            size,
            fields,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn display_name(&self) -> String {
        sanitize_filename(self.filename.as_deref().unwrap_or_default())
    }

    /// Deletes the temporary file, logging instead of failing the request.
    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %e, "Could not delete temporary file");
        }
    }
}

fn extension_suffix(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}
