//! Error types.
//!
//! Two tiers: [`AssetError`] is per-image and always recovered at the draw
//! site; [`ExportError`] is a total failure and means no image was produced.

use thiserror::Error;

/// Failure to resolve or decode a single image reference.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The source has nothing under this reference.
    #[error("asset not found: {0}")]
    NotFound(String),
    /// The source failed while reading the bytes.
    #[error("failed to read asset {reference}: {source}")]
    Io {
        reference: String,
        #[source]
        source: std::io::Error,
    },
    /// The bytes are not a decodable image.
    #[error("failed to decode asset {reference}: {source}")]
    Decode {
        reference: String,
        #[source]
        source: image::ImageError,
    },
    /// Decoded to a zero-sized image.
    #[error("asset {0} decoded to an empty image")]
    EmptyImage(String),
}

/// Export-level failure: no image is produced.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The raster surface could not be allocated.
    #[error("cannot allocate a {width}x{height} render target")]
    Surface { width: u32, height: u32 },
    /// The background template is mandatory.
    #[error("background template unavailable: {0}")]
    Background(#[source] AssetError),
    /// PNG encoding of the finished surface failed.
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Invalid export configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Font data that could not be parsed.
#[derive(Debug, Error)]
#[error("unparsable font data: {0}")]
pub struct FontError(#[from] pub ttf_parser::FaceParsingError);
