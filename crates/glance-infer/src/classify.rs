use crate::{Backend, InferError, ModelSource, Session};
use glance_base::Tensor;

/// A classification model loaded once and reused for every frame.
///
/// Wraps a [`Session`] and flattens its output into a plain score
/// vector. The class count observed on the first forward is pinned;
/// an engine that later changes its output width gets rejected with a
/// shape mismatch instead of silently shifting label indices.
pub struct Classifier {
    session: Box<dyn Session>,
    class_count: Option<usize>,
}

impl Classifier {
    /// Load the model through the given backend.
    ///
    /// # Errors
    ///
    /// Returns `InferError::ModelLoad` when the backend cannot produce a
    /// session. Callers treat that as fatal and accept no frames.
    pub fn load(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        Ok(Self {
            session,
            class_count: None,
        })
    }

    /// Class count pinned by the first successful forward, if any.
    pub fn class_count(&self) -> Option<usize> {
        self.class_count
    }

    /// Run one forward pass and return the per-class scores.
    ///
    /// Takes `&mut self`; a single classifier handle cannot run two
    /// forwards concurrently.
    pub fn infer(&mut self, input: &Tensor<f32>) -> Result<Vec<f32>, InferError> {
        let output = self.session.run(input)?;
        let scores = flatten_scores(output)?;

        match self.class_count {
            None => self.class_count = Some(scores.len()),
            Some(expected) if expected != scores.len() => {
                return Err(InferError::ShapeMismatch {
                    expected: format!("{expected} classes"),
                    got: format!("{} classes", scores.len()),
                });
            }
            Some(_) => {}
        }

        Ok(scores)
    }
}

/// Accepts `[C]` or `[1, ..., 1, C]` score tensors and unwraps them to
/// the raw vector.
fn flatten_scores(output: Tensor<f32>) -> Result<Vec<f32>, InferError> {
    let valid = match output.shape.split_last() {
        Some((_, leading)) => leading.iter().all(|&dim| dim == 1),
        None => false,
    };
    if !valid {
        return Err(InferError::ShapeMismatch {
            expected: "[C] or [1, C] score tensor".to_string(),
            got: format!("{:?}", output.shape),
        });
    }
    Ok(output.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_scores_vector() {
        let t = Tensor::new(vec![4], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(flatten_scores(t).unwrap(), vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_flatten_scores_batched() {
        let t = Tensor::new(vec![1, 3], vec![0.5, 0.2, 0.3]).unwrap();
        assert_eq!(flatten_scores(t).unwrap(), vec![0.5, 0.2, 0.3]);
    }

    #[test]
    fn test_flatten_scores_rejects_matrix() {
        let t = Tensor::new(vec![2, 3], vec![0.0; 6]).unwrap();
        assert!(matches!(
            flatten_scores(t),
            Err(InferError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_flatten_scores_rejects_scalar_shape() {
        let t = Tensor::new(vec![], vec![1.0]).unwrap();
        assert!(matches!(
            flatten_scores(t),
            Err(InferError::ShapeMismatch { .. })
        ));
    }
}
