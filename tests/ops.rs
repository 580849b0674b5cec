mod common;

use common::synthetic_image::{bimodal_columns, checkerboard_rgba, ramp_rgba};
use image_kernels::histogram::histogram;
use image_kernels::image::PixelBuffer;
use image_kernels::morphology::{SeShape, StructuringElement};
use image_kernels::pipeline::{run_pipeline, Op};
use image_kernels::{adjust, convolve, filters, morphology, threshold, Kernel};

fn assert_alpha_equal(a: &PixelBuffer, b: &PixelBuffer) {
    for (pa, pb) in a.data.chunks_exact(4).zip(b.data.chunks_exact(4)) {
        assert_eq!(pa[3], pb[3], "alpha drifted");
    }
}

#[test]
fn every_operation_preserves_dimensions() {
    let buf = checkerboard_rgba(17, 13, 4);
    let se = StructuringElement::new(SeShape::Cross, 3).expect("valid element");
    let outputs = vec![
        adjust::brightness(&buf, 25).expect("brightness"),
        adjust::contrast(&buf, -40).expect("contrast"),
        adjust::saturation(&buf, 60).expect("saturation"),
        adjust::grayscale(&buf).expect("grayscale"),
        adjust::negative(&buf).expect("negative"),
        convolve::sobel_edge(&buf).expect("sobel"),
        convolve::unsharp_mask(&buf, 1.0, 1.5).expect("unsharp"),
        filters::box_blur(&buf).expect("box blur"),
        filters::motion_blur(&buf).expect("motion blur"),
        image_kernels::histogram::equalize(&buf).expect("equalize"),
        image_kernels::histogram::stretch(&buf).expect("stretch"),
        threshold::otsu_threshold(&buf).expect("otsu"),
        threshold::adaptive_threshold(&buf, 5, 2.0).expect("adaptive"),
        morphology::opening(&buf, &se).expect("opening"),
        morphology::gradient(&buf, &se).expect("gradient"),
    ];
    for out in outputs {
        assert_eq!((out.w, out.h), (buf.w, buf.h));
    }
}

#[test]
fn point_transforms_and_morphology_preserve_alpha() {
    let buf = checkerboard_rgba(16, 16, 4);
    let se = StructuringElement::default();
    assert_alpha_equal(&buf, &adjust::brightness(&buf, 30).expect("brightness"));
    assert_alpha_equal(&buf, &adjust::contrast(&buf, 30).expect("contrast"));
    assert_alpha_equal(&buf, &adjust::saturation(&buf, -30).expect("saturation"));
    assert_alpha_equal(&buf, &adjust::grayscale(&buf).expect("grayscale"));
    assert_alpha_equal(&buf, &adjust::negative(&buf).expect("negative"));
    assert_alpha_equal(&buf, &filters::box_blur(&buf).expect("box blur"));
    assert_alpha_equal(&buf, &morphology::erode(&buf, &se).expect("erode"));
    assert_alpha_equal(&buf, &morphology::dilate(&buf, &se).expect("dilate"));
}

#[test]
fn sobel_and_gradient_force_full_opacity() {
    let buf = checkerboard_rgba(12, 12, 3);
    let edges = convolve::sobel_edge(&buf).expect("sobel");
    // Interior only: the border ring is copied from the source.
    for y in 1..buf.h - 1 {
        for x in 1..buf.w - 1 {
            assert_eq!(edges.rgba(x, y)[3], 255);
        }
    }
    let grad = morphology::gradient(&buf, &StructuringElement::default()).expect("gradient");
    for px in grad.data.chunks_exact(4) {
        assert_eq!(px[3], 255);
    }
}

#[test]
fn negative_twice_restores_exactly() {
    let buf = ramp_rgba(20, 10);
    let back = adjust::negative(&adjust::negative(&buf).expect("first")).expect("second");
    assert_eq!(back, buf);
}

#[test]
fn grayscale_is_a_projection() {
    let buf = ramp_rgba(15, 15);
    let once = adjust::grayscale(&buf).expect("first");
    assert_eq!(once, adjust::grayscale(&once).expect("second"));
}

#[test]
fn zero_deltas_are_noops() {
    let buf = ramp_rgba(9, 7);
    assert_eq!(adjust::brightness(&buf, 0).expect("brightness"), buf);
    assert_eq!(adjust::contrast(&buf, 0).expect("contrast"), buf);
}

#[test]
fn stretch_on_constant_image_is_noop() {
    let buf = PixelBuffer::new_fill(6, 6, [120, 120, 120, 255]);
    assert_eq!(image_kernels::histogram::stretch(&buf).expect("stretch"), buf);
}

#[test]
fn histogram_sums_match_pixel_count() {
    let buf = checkerboard_rgba(23, 11, 5);
    let hist = histogram(&buf).expect("histogram");
    let n = (buf.w * buf.h) as u32;
    for counts in [&hist.red, &hist.green, &hist.blue, &hist.gray] {
        assert_eq!(counts.iter().sum::<u32>(), n);
    }
}

#[test]
fn otsu_reproduces_bimodal_columns() {
    let buf = bimodal_columns(4, 4);
    let level = threshold::otsu_level(&buf).expect("level");
    let level2 = threshold::otsu_level(&buf).expect("level again");
    assert_eq!(level, level2);
    // Any level in (0, 255] separates the halves with the >= comparison.
    assert!(level > 0);

    let out = threshold::otsu_threshold(&buf).expect("otsu");
    for y in 0..4 {
        for x in 0..2 {
            assert_eq!(out.rgba(x, y)[0], 255, "white half at ({x},{y})");
        }
        for x in 2..4 {
            assert_eq!(out.rgba(x, y)[0], 0, "black half at ({x},{y})");
        }
    }
}

#[test]
fn identity_kernel_convolution_is_noop() {
    let buf = ramp_rgba(11, 8);
    let identity = Kernel::from_rows(
        &[
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ],
        1.0,
        0.0,
    )
    .expect("valid kernel");
    assert_eq!(convolve::convolve(&buf, &identity).expect("convolve"), buf);
}

#[test]
fn opening_keeps_all_white_image_white() {
    let buf = PixelBuffer::new_fill(9, 9, [255, 255, 255, 255]);
    let se = StructuringElement::new(SeShape::Square, 3).expect("valid element");
    assert_eq!(morphology::opening(&buf, &se).expect("opening"), buf);
}

#[test]
fn dilation_dominates_erosion_pointwise() {
    let buf = checkerboard_rgba(14, 14, 3);
    for shape in [SeShape::Square, SeShape::Cross, SeShape::Circle] {
        let se = StructuringElement::new(shape, 5).expect("valid element");
        let hi = morphology::dilate(&buf, &se).expect("dilate");
        let lo = morphology::erode(&buf, &se).expect("erode");
        for (a, b) in hi.data.chunks_exact(4).zip(lo.data.chunks_exact(4)) {
            assert!(a[0] >= b[0], "dilate < erode under {shape:?}");
        }
    }
}

#[test]
fn editor_style_pipeline_runs_end_to_end() {
    let buf = ramp_rgba(32, 24);
    let ops = [
        Op::Brightness { delta: 10 },
        Op::Contrast { delta: 15 },
        Op::Grayscale,
        Op::GaussianBlur {
            strength: Default::default(),
        },
        Op::OtsuThreshold,
        Op::Opening {
            shape: SeShape::Square,
            side: 3,
        },
    ];
    let out = run_pipeline(&buf, &ops).expect("pipeline");
    assert_eq!((out.w, out.h), (32, 24));
    // Binarized then opened: only the two extreme levels survive.
    for px in out.data.chunks_exact(4) {
        assert!(px[0] == 0 || px[0] == 255);
    }
}
