use core::fmt;

/// Failure taxonomy shared by every engine function.
///
/// Engines validate their inputs eagerly and return a specific kind instead of
/// producing garbage output. Decode/encode failures originate in the `image`
/// collaborator and are surfaced with their context message.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Buffer byte length does not match `width * height * 4`.
    SizeMismatch { expected: usize, actual: usize },
    /// Out-of-range scalar, even-sided kernel/structuring element, zero
    /// divisor, and similar precondition violations.
    InvalidParameter(String),
    Decode(String),
    Encode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "pixel buffer size mismatch: expected {expected} bytes, got {actual}")
            }
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::Decode(msg) => write!(f, "decode failed: {msg}"),
            Self::Encode(msg) => write!(f, "encode failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub(crate) fn param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
