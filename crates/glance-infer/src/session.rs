use crate::InferError;
use glance_base::Tensor;

/// A loaded classification model.
///
/// Classification models have one input (the image tensor) and one
/// primary output (the score vector), so the trait is a single-tensor
/// contract. `run` takes `&mut self`: one session handle can never have
/// two forwards in flight.
///
/// Sessions cross thread boundaries (loaded on the caller, run on a
/// worker), hence the `Send` bound.
pub trait Session: Send {
    /// Run the model on one input tensor and return its primary output.
    fn run(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError>;

    fn input_name(&self) -> &str;
    fn output_name(&self) -> &str;
}
