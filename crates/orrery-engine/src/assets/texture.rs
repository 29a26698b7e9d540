use std::path::Path;

use thiserror::Error;

use crate::device::TextureData;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has zero size")]
    Empty,
}

/// Reads an image file (BMP or PNG) and converts it to RGBA8.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData, TextureError> {
    let bytes = std::fs::read(path)?;
    decode_texture(&bytes)
}

/// Decodes an in-memory image, detecting the format from its header.
pub fn decode_texture(bytes: &[u8]) -> Result<TextureData, TextureError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty);
    }

    Ok(TextureData {
        width,
        height,
        rgba: image.into_raw(),
    })
}
