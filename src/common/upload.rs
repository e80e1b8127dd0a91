use crate::common::error::{AppError, Result};
use crate::config::settings::PosterPolicy;
use axum::extract::multipart::Field;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tracing::{debug, error};

/// A file part of a multipart request, buffered in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lower-cased extension with its leading dot, `None` when the name has none.
    /// A bare `.jpg` counts as a `.jpg` file.
    pub fn extension(&self) -> Option<String> {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        match base.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(format!(".{}", ext.to_lowercase())),
            _ => None,
        }
    }
}

/// Reads a file field chunk by chunk into memory.
pub async fn read_file_field(mut field: Field<'_>) -> Result<UploadedFile> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let mut buffer = BytesMut::new();

    while let Some(chunk) = field.next().await {
        match chunk {
            Ok(c) => buffer.extend_from_slice(&c),
            Err(e) => {
                error!("Stream error while reading {}: {}", file_name, e);
                return Err(e.into());
            }
        }
    }

    debug!("Buffered upload {} ({} bytes)", file_name, buffer.len());
    Ok(UploadedFile {
        file_name,
        data: buffer.freeze(),
    })
}

/// Checks extension first, then size. Content is never inspected.
pub fn validate_poster(policy: &PosterPolicy, poster: &UploadedFile) -> Result<()> {
    let allowed = poster
        .extension()
        .is_some_and(|ext| policy.allowed_extensions.iter().any(|a| *a == ext));

    if !allowed {
        return Err(AppError::invalid(format!(
            "unsupported extension: only {} posters are allowed",
            policy.allowed_extensions.join(", ")
        )));
    }

    if poster.len() > policy.max_size {
        return Err(AppError::invalid(format!(
            "poster too large: max allowed size is {} bytes",
            policy.max_size
        )));
    }

    Ok(())
}

/// Content type guessed from the image signature.
pub fn sniff_image_type(data: &[u8]) -> mime::Mime {
    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

    if data.starts_with(PNG_SIGNATURE) {
        mime::IMAGE_PNG
    } else if data.starts_with(JPEG_SIGNATURE) {
        mime::IMAGE_JPEG
    } else {
        mime::APPLICATION_OCTET_STREAM
    }
}
