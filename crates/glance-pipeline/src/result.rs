use glance_infer::{InferError, RankedLabel};

/// One completed frame analysis.
///
/// `forward_duration_ms` covers the model forward alone;
/// `total_duration_ms` covers preprocessing through selection.
/// `smoothed_total_ms` is the sliding-window average of total durations,
/// present once the window has filled.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub top_labels: Vec<RankedLabel>,
    pub forward_duration_ms: u64,
    pub total_duration_ms: u64,
    pub smoothed_total_ms: Option<f64>,
}

/// What the pipeline reports to its observer.
#[derive(Debug)]
pub enum PipelineEvent {
    Result(AnalysisResult),
    Error(InferError),
}
