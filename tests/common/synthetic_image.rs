use image_kernels::image::PixelBuffer;

/// Generates a high-contrast checkerboard with per-pixel alpha variation.
pub fn checkerboard_rgba(width: usize, height: usize, cell: usize) -> PixelBuffer {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut buf = PixelBuffer::new_fill(width, height, [0, 0, 0, 255]);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            let v = if sum & 1 == 0 { 32u8 } else { 220u8 };
            let a = 200 + ((x + y) % 56) as u8;
            buf.set_rgba(x, y, [v, v, v, a]);
        }
    }
    buf
}

/// Smooth diagonal color ramp; every channel varies, alpha constant.
pub fn ramp_rgba(width: usize, height: usize) -> PixelBuffer {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut buf = PixelBuffer::new_fill(width, height, [0, 0, 0, 255]);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 255) / (width + height)) as u8;
            buf.set_rgba(x, y, [r, g, b, 255]);
        }
    }
    buf
}

/// Left half white, right half black, split by columns.
pub fn bimodal_columns(width: usize, height: usize) -> PixelBuffer {
    let mut buf = PixelBuffer::new_fill(width, height, [255, 255, 255, 255]);
    for y in 0..height {
        for x in width / 2..width {
            buf.set_rgba(x, y, [0, 0, 0, 255]);
        }
    }
    buf
}
