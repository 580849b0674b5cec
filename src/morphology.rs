//! Grayscale morphology over a configurable structuring element.
//!
//! Erosion and dilation read the red channel as the intensity proxy (inputs
//! need not be pre-grayscaled) and write the min/max back to R=G=B. Opening,
//! closing, and the morphological gradient are compositions of the two.
use crate::error::Error;
use crate::image::rgba::clamp_coord;
use crate::image::PixelBuffer;

/// Structuring-element shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeShape {
    Square,
    Cross,
    Circle,
}

/// Binary neighborhood mask defining the reach of erosion/dilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    side: usize,
    mask: Vec<bool>,
}

impl StructuringElement {
    /// Build a mask of the given shape. `side` must be odd and at least 3;
    /// even sides have no well-defined center and are rejected.
    pub fn new(shape: SeShape, side: usize) -> Result<Self, Error> {
        if side < 3 || side % 2 == 0 {
            return Err(Error::param(format!(
                "structuring element side {side} must be odd and >= 3"
            )));
        }
        let center = (side / 2) as isize;
        let mut mask = Vec::with_capacity(side * side);
        for y in 0..side as isize {
            for x in 0..side as isize {
                let active = match shape {
                    SeShape::Square => true,
                    SeShape::Cross => y == center || x == center,
                    SeShape::Circle => {
                        let dx = (x - center) as f64;
                        let dy = (y - center) as f64;
                        (dx * dx + dy * dy).sqrt() <= center as f64
                    }
                };
                mask.push(active);
            }
        }
        Ok(Self { side, mask })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn is_active(&self, kx: usize, ky: usize) -> bool {
        self.mask[ky * self.side + kx]
    }
}

impl Default for StructuringElement {
    /// 3x3 square, the classic default.
    fn default() -> Self {
        Self::new(SeShape::Square, 3).expect("3x3 square satisfies invariants")
    }
}

fn reduce_neighborhood<F>(
    buf: &PixelBuffer,
    se: &StructuringElement,
    init: u8,
    fold: F,
) -> Result<PixelBuffer, Error>
where
    F: Fn(u8, u8) -> u8,
{
    buf.validate()?;
    let (w, h) = (buf.w, buf.h);
    let mut out = buf.clone();
    if w == 0 || h == 0 {
        return Ok(out);
    }

    let side = se.side();
    let half = (side / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = init;
            for ky in 0..side {
                let ny = clamp_coord(y as isize + ky as isize - half, h);
                for kx in 0..side {
                    if !se.is_active(kx, ky) {
                        continue;
                    }
                    let nx = clamp_coord(x as isize + kx as isize - half, w);
                    acc = fold(acc, buf.data[buf.idx(nx, ny)]);
                }
            }
            let i = out.idx(x, y);
            out.data[i] = acc;
            out.data[i + 1] = acc;
            out.data[i + 2] = acc;
        }
    }
    Ok(out)
}

/// Minimum of the red channel over the active mask cells.
pub fn erode(buf: &PixelBuffer, se: &StructuringElement) -> Result<PixelBuffer, Error> {
    reduce_neighborhood(buf, se, 255, u8::min)
}

/// Maximum of the red channel over the active mask cells.
pub fn dilate(buf: &PixelBuffer, se: &StructuringElement) -> Result<PixelBuffer, Error> {
    reduce_neighborhood(buf, se, 0, u8::max)
}

/// Erosion followed by dilation; removes specks smaller than the element.
pub fn opening(buf: &PixelBuffer, se: &StructuringElement) -> Result<PixelBuffer, Error> {
    let eroded = erode(buf, se)?;
    dilate(&eroded, se)
}

/// Dilation followed by erosion; fills holes smaller than the element.
pub fn closing(buf: &PixelBuffer, se: &StructuringElement) -> Result<PixelBuffer, Error> {
    let dilated = dilate(buf, se)?;
    erode(&dilated, se)
}

/// Morphological gradient: `dilate - erode` per pixel, alpha forced to 255.
///
/// Dilation dominates erosion at every pixel for the same element, so the
/// difference never underflows.
pub fn gradient(buf: &PixelBuffer, se: &StructuringElement) -> Result<PixelBuffer, Error> {
    let dilated = dilate(buf, se)?;
    let eroded = erode(buf, se)?;
    let mut out = dilated;
    for (px, lo) in out.data.chunks_exact_mut(4).zip(eroded.data.chunks_exact(4)) {
        let diff = px[0] - lo[0];
        px[0] = diff;
        px[1] = diff;
        px[2] = diff;
        px[3] = 255;
    }
    Ok(out)
}
