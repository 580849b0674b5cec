//! Owned RGBA8 pixel buffer in row-major layout.
//!
//! - Channel order is R, G, B, A per pixel, rows top-to-bottom.
//! - Invariant: `data.len() == w * h * 4`.
//! - Engine functions borrow a buffer read-only and allocate a fresh output,
//!   so callers can keep the original around for undo/compare.
use crate::error::Error;

/// Rec. 601 luma weights used everywhere a grayscale value is derived.
pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Interleaved RGBA bytes, `w * h * 4` of them
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved RGBA bytes, checking the length invariant.
    pub fn from_vec(w: usize, h: usize, data: Vec<u8>) -> Result<Self, Error> {
        let expected = w
            .checked_mul(h)
            .and_then(|n| n.checked_mul(4))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Construct a buffer filled with a single RGBA value.
    pub fn new_fill(w: usize, h: usize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(w * h * 4);
        for _ in 0..w * h {
            data.extend_from_slice(&rgba);
        }
        Self { w, h, data }
    }

    /// Re-check the length invariant; engines call this before touching pixels.
    pub fn validate(&self) -> Result<(), Error> {
        let expected = self.w * self.h * 4;
        if self.data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    /// Byte index of the R channel at (x, y).
    pub fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * 4
    }

    #[inline]
    pub fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    pub fn set_rgba(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.idx(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Unrounded luminance of the pixel at (x, y).
    #[inline]
    pub fn luma(&self, x: usize, y: usize) -> f64 {
        let i = self.idx(x, y);
        luma_f64(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Luminance rounded to the nearest 0..=255 level.
    #[inline]
    pub fn luma_level(&self, x: usize, y: usize) -> u8 {
        self.luma(x, y).round() as u8
    }
}

/// `0.299 R + 0.587 G + 0.114 B`, always in [0, 255].
#[inline]
pub fn luma_f64(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Round and clamp an accumulated channel value into a byte.
#[inline]
pub fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Clamp a signed coordinate into `[0, len - 1]` (replicate border policy).
#[inline]
pub fn clamp_coord(i: isize, len: usize) -> usize {
    debug_assert!(len > 0, "clamp_coord on empty axis");
    i.clamp(0, len as isize - 1) as usize
}
