//! Histogram computation, equalization, and linear stretch.
//!
//! Gray levels are the rounded Rec. 601 luminance. Equalization and stretch
//! derive their statistics from the gray histogram; equalization rewrites the
//! image as grayscale (legacy behavior, kept for compatibility), stretch
//! remaps each color channel with the gray min/max.
use crate::error::Error;
use crate::image::rgba::clamp_u8;
use crate::image::PixelBuffer;

/// Per-channel and luminance intensity counts, one bin per 0..=255 level.
///
/// Each array sums to `w * h`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistogramData {
    pub red: [u32; 256],
    pub green: [u32; 256],
    pub blue: [u32; 256],
    pub gray: [u32; 256],
}

/// Single-pass histogram over all four distributions.
pub fn histogram(buf: &PixelBuffer) -> Result<HistogramData, Error> {
    buf.validate()?;
    let mut hist = HistogramData {
        red: [0; 256],
        green: [0; 256],
        blue: [0; 256],
        gray: [0; 256],
    };
    for px in buf.data.chunks_exact(4) {
        hist.red[px[0] as usize] += 1;
        hist.green[px[1] as usize] += 1;
        hist.blue[px[2] as usize] += 1;
        hist.gray[crate::image::luma_f64(px[0], px[1], px[2]).round() as usize] += 1;
    }
    Ok(hist)
}

/// Histogram equalization through the gray CDF.
///
/// Builds `LUT[i] = round((CDF[i] - cdf_min) / (total - cdf_min) * 255)` where
/// `cdf_min` is the first nonzero CDF entry, then writes `LUT[gray]` to R=G=B.
/// The output discards original color; alpha is untouched. A constant image
/// maps to black (the denominator degenerates to zero).
pub fn equalize(buf: &PixelBuffer) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    let gray_hist = histogram(buf)?.gray;
    let total = (buf.w * buf.h) as u64;

    let mut cdf = [0u64; 256];
    let mut running = 0u64;
    for (bin, count) in cdf.iter_mut().zip(gray_hist.iter()) {
        running += *count as u64;
        *bin = running;
    }
    let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);

    let mut lut = [0u8; 256];
    let denom = total.saturating_sub(cdf_min);
    if denom > 0 {
        for (out, &c) in lut.iter_mut().zip(cdf.iter()) {
            *out = clamp_u8((c.saturating_sub(cdf_min)) as f64 / denom as f64 * 255.0);
        }
    }

    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        let level = lut[crate::image::luma_f64(px[0], px[1], px[2]).round() as usize];
        px[0] = level;
        px[1] = level;
        px[2] = level;
    }
    Ok(out)
}

/// Linear contrast stretch.
///
/// Min/max are taken from the gray distribution but applied per channel, so a
/// channel value outside the gray extremes clamps. A constant-gray image is
/// returned unchanged (deliberate no-op, not an error).
pub fn stretch(buf: &PixelBuffer) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    let mut min = 255u8;
    let mut max = 0u8;
    for px in buf.data.chunks_exact(4) {
        let gray = crate::image::luma_f64(px[0], px[1], px[2]).round() as u8;
        min = min.min(gray);
        max = max.max(gray);
    }
    if max <= min {
        return Ok(buf.clone());
    }

    let range = (max - min) as f64;
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = clamp_u8((*c as f64 - min as f64) / range * 255.0);
        }
    }
    Ok(out)
}
