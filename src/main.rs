use image_kernels::image::PixelBuffer;
use image_kernels::pipeline::{run_pipeline, Op};

fn main() {
    // Demo stub: builds a synthetic two-tone buffer and runs a short pipeline.
    let w = 64usize;
    let h = 64usize;
    let mut buf = PixelBuffer::new_fill(w, h, [30, 30, 30, 255]);
    for y in 0..h {
        for x in w / 2..w {
            buf.set_rgba(x, y, [220, 220, 220, 255]);
        }
    }

    let ops = [
        Op::Grayscale,
        Op::GaussianBlur {
            strength: Default::default(),
        },
        Op::OtsuThreshold,
    ];
    match run_pipeline(&buf, &ops) {
        Ok(out) => {
            let white = out
                .data
                .chunks_exact(4)
                .filter(|px| px[0] == 255)
                .count();
            println!("{}x{} processed, {white}/{} pixels white", out.w, out.h, w * h);
        }
        Err(e) => eprintln!("pipeline failed: {e}"),
    }
}
