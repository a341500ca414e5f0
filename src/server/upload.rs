use super::error::ApiError;
use crate::{config::UploadConfig, relay::Upload};
use axum::{
    body::Bytes,
    extract::multipart::{Field, Multipart, MultipartError},
    http::StatusCode,
};
use tracing::debug;

/// Multipart field that carries the audio file.
pub const AUDIO_FIELD: &str = "audio";

/// Lower-cased extension of the last path component, without the dot.
pub fn extension_of(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

pub fn check_format(filename: &str, allowed: &[String]) -> Result<(), ApiError> {
    let extension = extension_of(filename);
    if !extension.is_empty() && allowed.iter().any(|f| f.eq_ignore_ascii_case(&extension)) {
        return Ok(());
    }
    Err(ApiError::UnsupportedFormat {
        extension,
        allowed: allowed.to_vec(),
    })
}

/// Pulls the audio file out of the form, enforcing format and size limits.
///
/// The format is checked before any file bytes are read. Reading stops as
/// soon as the file grows past `max_file_size`.
pub async fn read_upload(mut multipart: Multipart, limits: &UploadConfig) -> Result<Upload, ApiError> {
    let max = limits.max_file_size;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            debug!("Skipping form field {:?}", field.name());
            continue;
        }
        // A plain value named "audio" is not a file
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        check_format(&filename, &limits.allowed_formats)?;
        let data = read_limited(field, max).await?;

        return Ok(Upload { filename, data });
    }

    Err(ApiError::MissingFile)
}

async fn read_limited(mut field: Field<'_>, max: u64) -> Result<Bytes, ApiError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, max))? {
        if (data.len() + chunk.len()) as u64 > max {
            return Err(ApiError::FileTooLarge { limit: max });
        }
        data.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(data))
}

fn multipart_error(err: MultipartError, max: u64) -> ApiError {
    debug!("Multipart read failed: {}", err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::FileTooLarge { limit: max }
    } else {
        ApiError::MalformedRequest
    }
}
