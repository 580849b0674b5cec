//! Global, Otsu, and local-adaptive binarization.
//!
//! All three binarize against the rounded gray level, writing 0 or 255 to
//! R=G=B and leaving alpha untouched.
use crate::error::Error;
use crate::image::rgba::clamp_coord;
use crate::image::PixelBuffer;
use log::debug;

/// Binarize with a fixed level: 255 where `gray >= level`, else 0.
pub fn global_threshold(buf: &PixelBuffer, level: u8) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(4) {
        let gray = crate::image::luma_f64(px[0], px[1], px[2]).round() as u8;
        let binary = if gray >= level { 255 } else { 0 };
        px[0] = binary;
        px[1] = binary;
        px[2] = binary;
    }
    Ok(out)
}

/// Select the Otsu threshold: the level maximizing between-class variance.
///
/// Scans all 256 candidates with running weighted sums. When several levels
/// tie for the maximum (a flat plateau between two well-separated modes), the
/// midpoint of the plateau is taken; a first-seen policy would land on the
/// plateau's low end and the `>=` binarization would then wash a perfectly
/// bimodal image to all white. The scan order is fixed, so the result is
/// deterministic either way.
pub fn otsu_level(buf: &PixelBuffer) -> Result<u8, Error> {
    buf.validate()?;
    let hist = crate::histogram::histogram(buf)?.gray;
    let total = (buf.w * buf.h) as f64;

    let mut sum = 0.0;
    for (level, &count) in hist.iter().enumerate() {
        sum += level as f64 * count as f64;
    }

    let mut sum_b = 0.0;
    let mut w_b = 0.0;
    let mut max_variance = 0.0;
    let mut tied_sum = 0usize;
    let mut tied_count = 0usize;
    for (level, &count) in hist.iter().enumerate() {
        w_b += count as f64;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0.0 {
            break;
        }
        sum_b += level as f64 * count as f64;
        let mean_b = sum_b / w_b;
        let mean_f = (sum - sum_b) / w_f;
        let variance = w_b * w_f * (mean_b - mean_f) * (mean_b - mean_f);
        if variance > max_variance {
            max_variance = variance;
            tied_sum = level;
            tied_count = 1;
        } else if variance == max_variance && tied_count > 0 {
            tied_sum += level;
            tied_count += 1;
        }
    }
    let best = if tied_count > 0 {
        (tied_sum / tied_count) as u8
    } else {
        0
    };
    debug!("otsu_level: selected {best} (between-class variance {max_variance:.1})");
    Ok(best)
}

/// Binarize with the automatically selected Otsu level.
pub fn otsu_threshold(buf: &PixelBuffer) -> Result<PixelBuffer, Error> {
    let level = otsu_level(buf)?;
    global_threshold(buf, level)
}

/// Local-adaptive binarization against the neighborhood mean.
///
/// For each pixel the mean gray over an edge-clamped `block_size` square is
/// computed and the pixel turns white when `gray >= mean - constant`.
/// `block_size` must be odd and at least 3. Cost is O(W·H·b²).
pub fn adaptive_threshold(
    buf: &PixelBuffer,
    block_size: usize,
    constant: f64,
) -> Result<PixelBuffer, Error> {
    buf.validate()?;
    if block_size < 3 || block_size % 2 == 0 {
        return Err(Error::param(format!(
            "adaptive block size {block_size} must be odd and >= 3"
        )));
    }
    if !constant.is_finite() {
        return Err(Error::param(format!("adaptive constant {constant} must be finite")));
    }
    let (w, h) = (buf.w, buf.h);
    let mut out = buf.clone();
    if w == 0 || h == 0 {
        return Ok(out);
    }

    let half = (block_size / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for dy in -half..=half {
                let ny = clamp_coord(y as isize + dy, h);
                for dx in -half..=half {
                    let nx = clamp_coord(x as isize + dx, w);
                    sum += buf.luma(nx, ny);
                }
            }
            let mean = sum / (block_size * block_size) as f64;
            let gray = buf.luma(x, y);
            let binary = if gray >= mean - constant { 255 } else { 0 };
            let i = out.idx(x, y);
            out.data[i] = binary;
            out.data[i + 1] = binary;
            out.data[i + 2] = binary;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{adaptive_threshold, global_threshold, otsu_level, otsu_threshold};
    use crate::image::PixelBuffer;

    #[test]
    fn all_black_through_mid_threshold_stays_black() {
        let buf = PixelBuffer::new_fill(3, 3, [0, 0, 0, 255]);
        let out = global_threshold(&buf, 128).expect("ok");
        for px in out.data.chunks_exact(4) {
            assert_eq!(&px[..3], &[0, 0, 0]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn zero_threshold_turns_black_white() {
        let buf = PixelBuffer::new_fill(3, 3, [0, 0, 0, 255]);
        let out = global_threshold(&buf, 0).expect("ok");
        for px in out.data.chunks_exact(4) {
            assert_eq!(&px[..3], &[255, 255, 255]);
        }
    }

    #[test]
    fn global_threshold_keeps_alpha() {
        let buf = PixelBuffer::new_fill(2, 2, [200, 200, 200, 42]);
        let out = global_threshold(&buf, 128).expect("ok");
        assert_eq!(out.rgba(0, 0), [255, 255, 255, 42]);
    }

    fn bimodal_4x4() -> PixelBuffer {
        let mut buf = PixelBuffer::new_fill(4, 4, [255, 255, 255, 255]);
        for y in 0..4 {
            for x in 2..4 {
                buf.set_rgba(x, y, [0, 0, 0, 255]);
            }
        }
        buf
    }

    #[test]
    fn otsu_separates_bimodal_split_exactly() {
        let buf = bimodal_4x4();
        let level = otsu_level(&buf).expect("ok");
        assert!(level > 0 && level <= 255, "level={level}");
        let out = otsu_threshold(&buf).expect("ok");
        for y in 0..4 {
            assert_eq!(out.rgba(0, y)[0], 255);
            assert_eq!(out.rgba(3, y)[0], 0);
        }
    }

    #[test]
    fn otsu_is_deterministic() {
        let buf = bimodal_4x4();
        let a = otsu_level(&buf).expect("ok");
        let b = otsu_level(&buf).expect("ok");
        assert_eq!(a, b);
        assert_eq!(
            otsu_threshold(&buf).expect("ok"),
            otsu_threshold(&buf).expect("ok")
        );
    }

    #[test]
    fn adaptive_rejects_even_block() {
        let buf = bimodal_4x4();
        assert!(adaptive_threshold(&buf, 4, 2.0).is_err());
        assert!(adaptive_threshold(&buf, 1, 2.0).is_err());
    }

    #[test]
    fn adaptive_on_uniform_image_is_all_white() {
        // gray >= mean - constant holds everywhere when gray == mean.
        let buf = PixelBuffer::new_fill(5, 5, [90, 90, 90, 255]);
        let out = adaptive_threshold(&buf, 3, 2.0).expect("ok");
        for px in out.data.chunks_exact(4) {
            assert_eq!(&px[..3], &[255, 255, 255]);
        }
    }

    #[test]
    fn adaptive_picks_out_dark_speck() {
        let mut buf = PixelBuffer::new_fill(7, 7, [200, 200, 200, 255]);
        buf.set_rgba(3, 3, [0, 0, 0, 255]);
        let out = adaptive_threshold(&buf, 3, 2.0).expect("ok");
        assert_eq!(out.rgba(3, 3)[0], 0);
        assert_eq!(out.rgba(0, 0)[0], 255);
    }
}
