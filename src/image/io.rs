//! Decode/encode collaborators for [`PixelBuffer`].
//!
//! - `decode_image` / `decode_bytes`: read PNG/JPEG/WebP/etc. into RGBA8.
//! - `encode_image`: write a buffer back out; JPEG honors the quality scalar.
use super::PixelBuffer;
use crate::error::Error;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// Output container format for [`encode_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }
}

/// Load an image from disk and convert to an RGBA8 pixel buffer.
pub fn decode_image(path: &Path) -> Result<PixelBuffer, Error> {
    let img = image::open(path)
        .map_err(|e| Error::Decode(format!("failed to open {}: {e}", path.display())))?
        .into_rgba8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    PixelBuffer::from_vec(w, h, img.into_raw())
}

/// Decode an in-memory encoded image (any format `image` can sniff).
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, Error> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::Decode(format!("failed to decode {} bytes: {e}", bytes.len())))?
        .into_rgba8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    PixelBuffer::from_vec(w, h, img.into_raw())
}

/// Encode a pixel buffer to disk.
///
/// `quality` is 1..=100 and only affects JPEG; PNG and WebP (lossless in the
/// `image` crate) ignore it.
pub fn encode_image(
    buf: &PixelBuffer,
    path: &Path,
    format: ImageFormat,
    quality: u8,
) -> Result<(), Error> {
    buf.validate()?;
    if !(1..=100).contains(&quality) {
        return Err(Error::param(format!("jpeg quality {quality} outside 1..=100")));
    }
    ensure_parent_dir(path)?;

    let img: RgbaImage =
        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(buf.w as u32, buf.h as u32, buf.data.clone())
            .ok_or_else(|| Error::Encode("failed to wrap pixel buffer".to_string()))?;

    match format {
        ImageFormat::Png => img
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| Error::Encode(format!("failed to save {}: {e}", path.display()))),
        ImageFormat::WebP => img
            .save_with_format(path, image::ImageFormat::WebP)
            .map_err(|e| Error::Encode(format!("failed to save {}: {e}", path.display()))),
        ImageFormat::Jpeg => {
            // JPEG has no alpha; drop it before encoding.
            let rgb = image::DynamicImage::ImageRgba8(img).into_rgb8();
            let file = fs::File::create(path)
                .map_err(|e| Error::Encode(format!("failed to create {}: {e}", path.display())))?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
            rgb.write_with_encoder(encoder)
                .map_err(|e| Error::Encode(format!("failed to save {}: {e}", path.display())))
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Encode(format!("failed to create {}: {e}", parent.display())))?;
        }
    }
    Ok(())
}
