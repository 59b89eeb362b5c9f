use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// Frame layout cannot be interpreted; the frame is skipped.
    UnsupportedFormat(String),
    /// Target tensor dimensions are unusable. Raised at configuration time.
    InvalidDimensions { width: u32, height: u32 },
    /// Model could not be loaded. Fatal to pipeline startup.
    ModelLoad(String),
    /// Requested device is not compiled in or not available.
    UnsupportedDevice(Device),
    /// Engine failure while running the model.
    Inference(String),
    /// Engine produced output with an unexpected shape.
    ShapeMismatch { expected: String, got: String },
    /// Top-k selection constraint violated.
    InvalidTopK { k: usize, len: usize },
    /// A selected class index has no entry in the label table.
    LabelIndex { index: usize, table_len: usize },
    Io(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::UnsupportedFormat(msg) => write!(f, "unsupported frame format: {msg}"),
            InferError::InvalidDimensions { width, height } => {
                write!(f, "invalid tensor dimensions: {width}x{height}")
            }
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::UnsupportedDevice(device) => {
                write!(f, "unsupported device: {device}")
            }
            InferError::Inference(msg) => write!(f, "inference error: {msg}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::InvalidTopK { k, len } => {
                write!(f, "top-k out of range: k={k} with {len} scores")
            }
            InferError::LabelIndex { index, table_len } => {
                write!(
                    f,
                    "class index {index} outside label table of {table_len} entries"
                )
            }
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<glance_camera::LayoutError> for InferError {
    fn from(err: glance_camera::LayoutError) -> Self {
        InferError::UnsupportedFormat(err.to_string())
    }
}

impl From<glance_base::TensorError> for InferError {
    fn from(err: glance_base::TensorError) -> Self {
        match err {
            glance_base::TensorError::ShapeOverflow => InferError::ShapeMismatch {
                expected: "shape with a representable element count".to_string(),
                got: "overflowing shape".to_string(),
            },
            glance_base::TensorError::ShapeMismatch { expected, got } => {
                InferError::ShapeMismatch {
                    expected: format!("{expected} elements"),
                    got: format!("{got} elements"),
                }
            }
        }
    }
}
