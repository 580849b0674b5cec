//! Convolution kernel type and the preset catalog.
//!
//! Filters are expressed as data: a [`Kernel`] holds a square odd-sided weight
//! matrix plus a normalization divisor and bias offset, and every preset in
//! [`PresetKernel`] is just a catalog entry dispatched through the one generic
//! convolution routine in [`crate::convolve`].
use crate::error::Error;

/// Square convolution kernel with normalization and bias.
///
/// Invariants enforced by [`Kernel::new`]: `matrix.len() == side * side`,
/// `side` odd and at least 3, `divisor` finite and nonzero.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    side: usize,
    matrix: Vec<f64>,
    divisor: f64,
    offset: f64,
}

impl Kernel {
    /// Build a kernel from a flat row-major weight matrix.
    pub fn new(side: usize, matrix: Vec<f64>, divisor: f64, offset: f64) -> Result<Self, Error> {
        if side < 3 || side % 2 == 0 {
            return Err(Error::param(format!(
                "kernel side {side} must be odd and >= 3"
            )));
        }
        if matrix.len() != side * side {
            return Err(Error::param(format!(
                "kernel matrix has {} weights, expected {}",
                matrix.len(),
                side * side
            )));
        }
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(Error::param(format!("kernel divisor {divisor} must be finite and nonzero")));
        }
        Ok(Self {
            side,
            matrix,
            divisor,
            offset,
        })
    }

    /// Build a kernel from nested rows (each row must have `rows.len()` weights).
    pub fn from_rows(rows: &[Vec<f64>], divisor: f64, offset: f64) -> Result<Self, Error> {
        let side = rows.len();
        let mut matrix = Vec::with_capacity(side * side);
        for row in rows {
            if row.len() != side {
                return Err(Error::param(format!(
                    "kernel row has {} weights, expected {side}",
                    row.len()
                )));
            }
            matrix.extend_from_slice(row);
        }
        Self::new(side, matrix, divisor, offset)
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    /// Weight at kernel cell (kx, ky).
    pub fn weight(&self, kx: usize, ky: usize) -> f64 {
        self.matrix[ky * self.side + kx]
    }
}

/// Build a normalized Gaussian kernel of the given odd size.
///
/// The divisor is the weight sum, so the kernel integrates to one. Used by
/// unsharp masking with `sigma = radius`.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Result<Kernel, Error> {
    if sigma <= 0.0 || !sigma.is_finite() {
        return Err(Error::param(format!("gaussian sigma {sigma} must be positive")));
    }
    if size < 3 || size % 2 == 0 {
        return Err(Error::param(format!("gaussian size {size} must be odd and >= 3")));
    }
    let half = (size / 2) as isize;
    let mut matrix = Vec::with_capacity(size * size);
    let mut sum = 0.0;
    for y in -half..=half {
        for x in -half..=half {
            let v = (-((x * x + y * y) as f64) / (2.0 * sigma * sigma)).exp();
            matrix.push(v);
            sum += v;
        }
    }
    Kernel::new(size, matrix, sum, 0.0)
}

const GAUSSIAN_3X3: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

const GAUSSIAN_5X5: [[f64; 5]; 5] = [
    [1.0, 4.0, 6.0, 4.0, 1.0],
    [4.0, 16.0, 24.0, 16.0, 4.0],
    [6.0, 24.0, 36.0, 24.0, 6.0],
    [4.0, 16.0, 24.0, 16.0, 4.0],
    [1.0, 4.0, 6.0, 4.0, 1.0],
];

const BOX_3X3: [[f64; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]];

const SHARPEN: [[f64; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

const SHARPEN_STRONG: [[f64; 3]; 3] = [[-1.0, -1.0, -1.0], [-1.0, 9.0, -1.0], [-1.0, -1.0, -1.0]];

pub(crate) const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

pub(crate) const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const LAPLACIAN: [[f64; 3]; 3] = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

const PREWITT_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];

const PREWITT_Y: [[f64; 3]; 3] = [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

const EMBOSS: [[f64; 3]; 3] = [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]];

/// Named kernel presets consumed by the convolution engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKernel {
    Gaussian3,
    Gaussian5,
    Box3,
    Sharpen,
    SharpenStrong,
    SobelX,
    SobelY,
    Laplacian,
    PrewittX,
    PrewittY,
    Emboss,
    MotionBlur,
}

impl PresetKernel {
    /// Materialize the catalog entry.
    pub fn kernel(self) -> Kernel {
        let built = match self {
            Self::Gaussian3 => from_3x3(&GAUSSIAN_3X3, 16.0, 0.0),
            Self::Gaussian5 => from_5x5(&GAUSSIAN_5X5, 256.0, 0.0),
            Self::Box3 => from_3x3(&BOX_3X3, 9.0, 0.0),
            Self::Sharpen => from_3x3(&SHARPEN, 1.0, 0.0),
            Self::SharpenStrong => from_3x3(&SHARPEN_STRONG, 1.0, 0.0),
            Self::SobelX => from_3x3(&SOBEL_X, 1.0, 0.0),
            Self::SobelY => from_3x3(&SOBEL_Y, 1.0, 0.0),
            Self::Laplacian => from_3x3(&LAPLACIAN, 1.0, 0.0),
            Self::PrewittX => from_3x3(&PREWITT_X, 1.0, 0.0),
            Self::PrewittY => from_3x3(&PREWITT_Y, 1.0, 0.0),
            Self::Emboss => from_3x3(&EMBOSS, 1.0, 128.0),
            Self::MotionBlur => motion_blur_9x9(),
        };
        built.expect("catalog entries satisfy kernel invariants")
    }
}

fn from_3x3(m: &[[f64; 3]; 3], divisor: f64, offset: f64) -> Result<Kernel, Error> {
    Kernel::new(3, m.iter().flatten().copied().collect(), divisor, offset)
}

fn from_5x5(m: &[[f64; 5]; 5], divisor: f64, offset: f64) -> Result<Kernel, Error> {
    Kernel::new(5, m.iter().flatten().copied().collect(), divisor, offset)
}

/// 9x9 identity diagonal, normalized by 9: a 45-degree streak.
fn motion_blur_9x9() -> Result<Kernel, Error> {
    let side = 9;
    let mut matrix = vec![0.0; side * side];
    for i in 0..side {
        matrix[i * side + i] = 1.0;
    }
    Kernel::new(side, matrix, 9.0, 0.0)
}
