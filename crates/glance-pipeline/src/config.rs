use glance_infer::ModelSource;

/// Configuration for one inference pipeline instance.
///
/// Defaults match the torchvision ImageNet classifiers: 224x224 input,
/// top 3 labels, a 10-sample smoothing window.
#[derive(Debug)]
pub struct PipelineConfig {
    model: ModelSource,
    tensor_width: u32,
    tensor_height: u32,
    top_k: usize,
    smoothing_window: usize,
    event_capacity: usize,
}

impl PipelineConfig {
    pub fn new(model: ModelSource) -> Self {
        Self {
            model,
            tensor_width: 224,
            tensor_height: 224,
            top_k: 3,
            smoothing_window: 10,
            event_capacity: 16,
        }
    }

    /// Set the model input size in pixels.
    pub fn with_tensor_size(mut self, width: u32, height: u32) -> Self {
        self.tensor_width = width;
        self.tensor_height = height;
        self
    }

    /// Set how many top labels each result carries.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the latency smoothing window in samples.
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    /// Set the event channel capacity. Events beyond it are dropped
    /// rather than blocking the worker.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    // Getters
    pub fn tensor_width(&self) -> u32 {
        self.tensor_width
    }

    pub fn tensor_height(&self) -> u32 {
        self.tensor_height
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn smoothing_window(&self) -> usize {
        self.smoothing_window
    }

    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Consume the config and take the model source out of it.
    pub fn into_model(self) -> ModelSource {
        self.model
    }
}
