//! Point transforms: per-pixel tonal adjustments with no neighbor dependency.
//!
//! Every function borrows the source buffer, validates it, and returns a new
//! buffer of the same size with alpha untouched. Slider deltas come from a
//! UI range of [-100, 100] and are rejected outside it.
use crate::error::Error;
use crate::image::rgba::{clamp_u8, luma_f64};
use crate::image::PixelBuffer;

const DELTA_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

fn check_delta(name: &str, delta: i32) -> Result<(), Error> {
    if !DELTA_RANGE.contains(&delta) {
        return Err(Error::param(format!("{name} delta {delta} outside [-100, 100]")));
    }
    Ok(())
}

/// Shift each of R, G, B by `delta`, clamped to [0, 255].
pub fn brightness(buf: &PixelBuffer, delta: i32) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    check_delta("brightness", delta)?;
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = (*c as i32 + delta).clamp(0, 255) as u8;
        }
    }
    Ok(out)
}

/// Scale each channel away from mid-gray by the standard contrast factor
/// `259(d + 255) / (255(259 - d))`.
///
/// The factor's pole at `d = 259` is unreachable because `delta` is validated
/// to [-100, 100].
pub fn contrast(buf: &PixelBuffer, delta: i32) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    check_delta("contrast", delta)?;
    let d = delta as f64;
    let factor = (259.0 * (d + 255.0)) / (255.0 * (259.0 - d));
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = clamp_u8(factor * (*c as f64 - 128.0) + 128.0);
        }
    }
    Ok(out)
}

/// Replace R, G, B with the Rec. 601 luminance of the pixel.
pub fn grayscale(buf: &PixelBuffer) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        let gray = clamp_u8(luma_f64(px[0], px[1], px[2]));
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
    Ok(out)
}

/// Invert each of R, G, B. Exact involution: applying twice restores the input.
pub fn negative(buf: &PixelBuffer) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
    Ok(out)
}

/// Blend each channel toward (`delta < 0`) or away from (`delta > 0`) the
/// pixel's luminance with factor `(delta + 100) / 100`.
pub fn saturation(buf: &PixelBuffer, delta: i32) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    check_delta("saturation", delta)?;
    let factor = (delta as f64 + 100.0) / 100.0;
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        let gray = luma_f64(px[0], px[1], px[2]);
        for c in &mut px[..3] {
            *c = clamp_u8(gray + factor * (*c as f64 - gray));
        }
    }
    Ok(out)
}
