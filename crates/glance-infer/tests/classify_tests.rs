use glance_base::Tensor;
use glance_infer::{Backend, Classifier, InferError, ModelSource, Session};

// Stub backend returning canned score tensors
struct StubBackend {
    outputs: Vec<Tensor<f32>>,
    fail_load: bool,
}

struct StubSession {
    outputs: Vec<Tensor<f32>>,
    call: usize,
}

impl Backend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    fn load_model(&self, _model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        if self.fail_load {
            return Err(InferError::ModelLoad("stub refused".to_string()));
        }
        Ok(Box::new(StubSession {
            outputs: self.outputs.clone(),
            call: 0,
        }))
    }
}

impl Session for StubSession {
    fn run(&mut self, _input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        if self.outputs.is_empty() {
            return Err(InferError::Inference("no canned output".to_string()));
        }
        let output = self.outputs[self.call % self.outputs.len()].clone();
        self.call += 1;
        Ok(output)
    }

    fn input_name(&self) -> &str {
        "input"
    }

    fn output_name(&self) -> &str {
        "output"
    }
}

fn dummy_input() -> Tensor<f32> {
    Tensor::zeros(vec![1, 3, 4, 4]).unwrap()
}

#[test]
fn test_load_failure_propagates() {
    let backend = StubBackend {
        outputs: vec![],
        fail_load: true,
    };
    let result = Classifier::load(ModelSource::Memory(vec![]), &backend);
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[test]
fn test_infer_returns_flat_scores() {
    let backend = StubBackend {
        outputs: vec![Tensor::new(vec![1, 3], vec![0.2, 0.5, 0.3]).unwrap()],
        fail_load: false,
    };
    let mut classifier = Classifier::load(ModelSource::Memory(vec![]), &backend).unwrap();

    let scores = classifier.infer(&dummy_input()).unwrap();
    assert_eq!(scores, vec![0.2, 0.5, 0.3]);
    assert_eq!(classifier.class_count(), Some(3));
}

#[test]
fn test_infer_accepts_unbatched_output() {
    let backend = StubBackend {
        outputs: vec![Tensor::new(vec![4], vec![0.1, 0.2, 0.3, 0.4]).unwrap()],
        fail_load: false,
    };
    let mut classifier = Classifier::load(ModelSource::Memory(vec![]), &backend).unwrap();
    assert_eq!(classifier.infer(&dummy_input()).unwrap().len(), 4);
}

#[test]
fn test_class_count_pinned_across_forwards() {
    let backend = StubBackend {
        outputs: vec![
            Tensor::new(vec![1, 3], vec![0.1, 0.2, 0.7]).unwrap(),
            Tensor::new(vec![1, 5], vec![0.1; 5]).unwrap(),
        ],
        fail_load: false,
    };
    let mut classifier = Classifier::load(ModelSource::Memory(vec![]), &backend).unwrap();

    classifier.infer(&dummy_input()).unwrap();
    let second = classifier.infer(&dummy_input());
    assert!(matches!(second, Err(InferError::ShapeMismatch { .. })));
    // Pinned count survives the rejected forward
    assert_eq!(classifier.class_count(), Some(3));
}

#[test]
fn test_matrix_output_rejected() {
    let backend = StubBackend {
        outputs: vec![Tensor::new(vec![2, 2], vec![0.0; 4]).unwrap()],
        fail_load: false,
    };
    let mut classifier = Classifier::load(ModelSource::Memory(vec![]), &backend).unwrap();
    assert!(matches!(
        classifier.infer(&dummy_input()),
        Err(InferError::ShapeMismatch { .. })
    ));
}
