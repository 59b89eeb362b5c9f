pub mod backend;
pub mod backends;
pub mod classify;
pub mod device;
pub mod error;
pub mod labels;
pub mod modelsource;
pub mod preprocess;
pub mod session;
pub mod topk;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use classify::Classifier;
pub use device::Device;
pub use error::InferError;
pub use labels::LabelTable;
pub use modelsource::ModelSource;
pub use preprocess::{TensorBuilder, IMAGENET_MEAN, IMAGENET_STD};
pub use session::Session;
pub use topk::{RankedLabel, TopKSelector};
