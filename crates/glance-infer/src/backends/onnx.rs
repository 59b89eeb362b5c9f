use crate::{Backend, Device, InferError, ModelSource, Session};
use glance_base::Tensor;
use ndarray::ArrayD;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};

pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let device = &self.device;
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::ModelLoad(format!("failed to create session builder: {}", e))
        })?;

        // Map Device to ort execution providers
        builder = match device {
            Device::Cpu => {
                log::info!("[onnx] using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::ep::ExecutionProvider;
                use ort::execution_providers::CUDAExecutionProvider;
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                log::info!(
                    "[onnx] CUDA EP requested (device_id={}), available: {}",
                    device_id,
                    available
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        // Load model
        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from file: {}", e))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {}", e))
            })?,
        };

        // A classifier has one image input and one score output; use the
        // first of each and ignore auxiliary heads.
        let input_name = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .next()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?;
        let output_name = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .next()
            .ok_or_else(|| InferError::ModelLoad("model has no outputs".to_string()))?;

        Ok(Box::new(OnnxSession {
            session,
            input_name,
            output_name,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_name: String,
    output_name: String,
}

impl Session for OnnxSession {
    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        let array = tensor_to_ndarray(input)?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Inference(format!("failed to create tensor ref: {}", e)))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => tensor_ref])
            .map_err(|e| InferError::Inference(format!("inference failed: {}", e)))?;

        let value = &outputs[self.output_name.as_str()];
        let array = value.try_extract_array::<f32>().map_err(|e| {
            InferError::Inference(format!("output '{}' is not f32: {}", self.output_name, e))
        })?;

        ndarray_to_tensor(array)
    }

    fn input_name(&self) -> &str {
        &self.input_name
    }

    fn output_name(&self) -> &str {
        &self.output_name
    }
}

// Helper function to convert Tensor<f32> to ndarray::ArrayD<f32>
fn tensor_to_ndarray(tensor: &Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape.clone(), tensor.data.clone())
        .map_err(|e| InferError::Inference(format!("failed to create ndarray from tensor: {}", e)))
}

// Helper function to convert ndarray::ArrayD<f32> to Tensor<f32>
fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
