//! Declarative operation chains.
//!
//! An [`Op`] names one engine operation with its parameters; a pipeline is an
//! ordered list of ops applied left to right. Pipelines deserialize from JSON
//! (tagged by an `"op"` field), so a processing recipe can live in a config
//! file next to the batch tool that consumes it.
use crate::error::Error;
use crate::filters::{BlurStrength, EdgeMethod, SharpenStrength};
use crate::image::PixelBuffer;
use crate::morphology::{SeShape, StructuringElement};
use crate::{adjust, convolve, filters, histogram, morphology, threshold};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_shape() -> SeShape {
    SeShape::Square
}

fn default_side() -> usize {
    3
}

fn default_adaptive_constant() -> f64 {
    2.0
}

/// One engine operation plus its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Brightness {
        delta: i32,
    },
    Contrast {
        delta: i32,
    },
    Saturation {
        delta: i32,
    },
    Grayscale,
    Negative,
    GaussianBlur {
        #[serde(default)]
        strength: BlurStrength,
    },
    BoxBlur,
    Sharpen {
        #[serde(default)]
        strength: SharpenStrength,
    },
    EdgeDetection {
        #[serde(default)]
        method: EdgeMethod,
    },
    Emboss,
    MotionBlur,
    UnsharpMask {
        amount: f64,
        radius: f64,
    },
    Equalize,
    Stretch,
    GlobalThreshold {
        level: u8,
    },
    OtsuThreshold,
    AdaptiveThreshold {
        block_size: usize,
        #[serde(default = "default_adaptive_constant")]
        constant: f64,
    },
    Erode {
        #[serde(default = "default_shape")]
        shape: SeShape,
        #[serde(default = "default_side")]
        side: usize,
    },
    Dilate {
        #[serde(default = "default_shape")]
        shape: SeShape,
        #[serde(default = "default_side")]
        side: usize,
    },
    Opening {
        #[serde(default = "default_shape")]
        shape: SeShape,
        #[serde(default = "default_side")]
        side: usize,
    },
    Closing {
        #[serde(default = "default_shape")]
        shape: SeShape,
        #[serde(default = "default_side")]
        side: usize,
    },
    MorphGradient {
        #[serde(default = "default_shape")]
        shape: SeShape,
        #[serde(default = "default_side")]
        side: usize,
    },
}

/// Dispatch a single operation.
pub fn apply(buf: &PixelBuffer, op: &Op) -> Result<PixelBuffer, Error> {
    match *op {
        Op::Brightness { delta } => adjust::brightness(buf, delta),
        Op::Contrast { delta } => adjust::contrast(buf, delta),
        Op::Saturation { delta } => adjust::saturation(buf, delta),
        Op::Grayscale => adjust::grayscale(buf),
        Op::Negative => adjust::negative(buf),
        Op::GaussianBlur { strength } => filters::gaussian_blur(buf, strength),
        Op::BoxBlur => filters::box_blur(buf),
        Op::Sharpen { strength } => filters::sharpen(buf, strength),
        Op::EdgeDetection { method } => filters::edge_detection(buf, method),
        Op::Emboss => filters::emboss(buf),
        Op::MotionBlur => filters::motion_blur(buf),
        Op::UnsharpMask { amount, radius } => convolve::unsharp_mask(buf, amount, radius),
        Op::Equalize => histogram::equalize(buf),
        Op::Stretch => histogram::stretch(buf),
        Op::GlobalThreshold { level } => threshold::global_threshold(buf, level),
        Op::OtsuThreshold => threshold::otsu_threshold(buf),
        Op::AdaptiveThreshold {
            block_size,
            constant,
        } => threshold::adaptive_threshold(buf, block_size, constant),
        Op::Erode { shape, side } => morphology::erode(buf, &StructuringElement::new(shape, side)?),
        Op::Dilate { shape, side } => {
            morphology::dilate(buf, &StructuringElement::new(shape, side)?)
        }
        Op::Opening { shape, side } => {
            morphology::opening(buf, &StructuringElement::new(shape, side)?)
        }
        Op::Closing { shape, side } => {
            morphology::closing(buf, &StructuringElement::new(shape, side)?)
        }
        Op::MorphGradient { shape, side } => {
            morphology::gradient(buf, &StructuringElement::new(shape, side)?)
        }
    }
}

/// Apply a chain of operations left to right, failing fast on the first error.
pub fn run_pipeline(buf: &PixelBuffer, ops: &[Op]) -> Result<PixelBuffer, Error> {
    let mut current = buf.clone();
    for op in ops {
        current = apply(&current, op)?;
    }
    Ok(current)
}

/// A processing recipe as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub ops: Vec<Op>,
}

/// Load a pipeline config from a JSON file.
pub fn load_pipeline(path: &Path) -> Result<PipelineConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{apply, run_pipeline, Op, PipelineConfig};
    use crate::image::PixelBuffer;

    #[test]
    fn pipeline_chains_operations_in_order() {
        let buf = PixelBuffer::new_fill(4, 4, [10, 20, 30, 255]);
        let out = run_pipeline(
            &buf,
            &[Op::Negative, Op::Negative, Op::Brightness { delta: 5 }],
        )
        .expect("ok");
        assert_eq!(out.rgba(0, 0), [15, 25, 35, 255]);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let buf = PixelBuffer::new_fill(3, 3, [1, 2, 3, 4]);
        assert_eq!(run_pipeline(&buf, &[]).expect("ok"), buf);
    }

    #[test]
    fn pipeline_fails_fast_on_bad_parameter() {
        let buf = PixelBuffer::new_fill(3, 3, [0, 0, 0, 255]);
        let err = run_pipeline(&buf, &[Op::Grayscale, Op::Brightness { delta: 500 }]);
        assert!(err.is_err());
    }

    #[test]
    fn ops_deserialize_from_tagged_json() {
        let json = r#"{
            "ops": [
                {"op": "grayscale"},
                {"op": "gaussian_blur", "strength": "heavy"},
                {"op": "adaptive_threshold", "block_size": 11},
                {"op": "erode", "shape": "circle", "side": 5},
                {"op": "opening"}
            ]
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.ops.len(), 5);
        assert_eq!(
            config.ops[2],
            Op::AdaptiveThreshold {
                block_size: 11,
                constant: 2.0
            }
        );
        match config.ops[4] {
            Op::Opening { side, .. } => assert_eq!(side, 3),
            ref other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn op_round_trips_through_serde() {
        let op = Op::UnsharpMask {
            amount: 1.2,
            radius: 2.0,
        };
        let json = serde_json::to_string(&op).expect("serializes");
        let back: Op = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, op);
    }

    #[test]
    fn morphology_op_validates_side_at_apply_time() {
        let buf = PixelBuffer::new_fill(3, 3, [0, 0, 0, 255]);
        let bad = Op::Erode {
            shape: super::default_shape(),
            side: 4,
        };
        assert!(apply(&buf, &bad).is_err());
    }
}
