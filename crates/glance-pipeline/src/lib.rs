//! Frame-to-result inference pipeline.
//!
//! [`InferencePipeline`] owns a worker thread that turns submitted
//! camera frames into classification results: preprocess, forward,
//! top-k selection, latency smoothing. At most one inference is in
//! flight; frames offered while the single inbound slot is occupied are
//! dropped and released immediately. Results and per-frame errors
//! arrive on an event channel the pipeline never blocks on.

pub mod config;
pub mod pipeline;
pub mod result;
pub mod smoother;

pub use config::PipelineConfig;
pub use pipeline::{InferencePipeline, SubmitOutcome};
pub use result::{AnalysisResult, PipelineEvent};
pub use smoother::LatencySmoother;
