use crate::domain::models::{CoordinateInput, ImageInput};
use base64::Engine as _;
use std::path::Path;

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("both latitude and longitude are required")]
    MissingInput,
    #[error("coordinates out of range (lat -90 to 90, lng -180 to 180): {0}, {1}")]
    OutOfRange(String, String),
    #[error("image exceeds the 10 MiB limit: {0} bytes")]
    TooLarge(u64),
    #[error("not a supported image file: {0}")]
    UnsupportedType(String),
    #[error("failed to read image: {0}")]
    ReadError(String),
}

/// Parses a raw latitude/longitude pair. Both fields must be non-empty,
/// finite and inside the geographic bounds.
pub fn validate_coordinates(
    raw_lat: &str,
    raw_lng: &str,
) -> Result<CoordinateInput, ValidationError> {
    let raw_lat = raw_lat.trim();
    let raw_lng = raw_lng.trim();
    if raw_lat.is_empty() || raw_lng.is_empty() {
        return Err(ValidationError::MissingInput);
    }
    match (raw_lat.parse::<f64>(), raw_lng.parse::<f64>()) {
        (Ok(latitude), Ok(longitude))
            if latitude.is_finite()
                && longitude.is_finite()
                && (-90.0..=90.0).contains(&latitude)
                && (-180.0..=180.0).contains(&longitude) =>
        {
            Ok(CoordinateInput {
                latitude,
                longitude,
            })
        }
        _ => Err(ValidationError::OutOfRange(
            raw_lat.to_string(),
            raw_lng.to_string(),
        )),
    }
}

/// Checks the size bound before touching content, then reads the file once
/// (no retry), sniffs the format for the MIME type and builds the preview
/// data URL.
pub fn validate_image(path: &Path) -> Result<ImageInput, ValidationError> {
    let meta =
        std::fs::metadata(path).map_err(|e| ValidationError::ReadError(e.to_string()))?;
    if meta.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge(meta.len()));
    }
    let bytes = std::fs::read(path).map_err(|e| ValidationError::ReadError(e.to_string()))?;
    let format = image::guess_format(&bytes)
        .map_err(|_| ValidationError::UnsupportedType(path.display().to_string()))?;
    let mime_type = format.to_mime_type().to_string();
    let preview = format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    );
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageInput {
        file_name,
        mime_type,
        size_bytes: bytes.len() as u64,
        bytes,
        preview,
    })
}
