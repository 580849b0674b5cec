#![doc = include_str!("../README.md")]

pub mod adjust;
pub mod batch;
pub mod convolve;
pub mod error;
pub mod filters;
pub mod histogram;
pub mod image;
pub mod kernels;
pub mod morphology;
pub mod pipeline;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::Error;
pub use crate::histogram::HistogramData;
pub use crate::image::{ImageFormat, PixelBuffer};
pub use crate::kernels::{Kernel, PresetKernel};
pub use crate::morphology::{SeShape, StructuringElement};
pub use crate::pipeline::{run_pipeline, Op};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use image_kernels::prelude::*;
///
/// let buf = PixelBuffer::new_fill(8, 8, [128, 64, 32, 255]);
/// let edges = image_kernels::filters::edge_detection(&buf, EdgeMethod::Sobel).unwrap();
/// assert_eq!((edges.w, edges.h), (8, 8));
/// ```
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::filters::{BlurStrength, EdgeMethod, SharpenStrength};
    pub use crate::image::PixelBuffer;
    pub use crate::kernels::{Kernel, PresetKernel};
    pub use crate::morphology::{SeShape, StructuringElement};
    pub use crate::pipeline::{run_pipeline, Op};
}
