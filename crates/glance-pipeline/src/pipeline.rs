use crate::smoother::LatencySmoother;
use crate::{AnalysisResult, PipelineConfig, PipelineEvent};
use glance_camera::Frame;
use glance_infer::{Backend, Classifier, InferError, LabelTable, TensorBuilder, TopKSelector};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tokio::sync::mpsc;

/// What happened to a submitted frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Frame took the inbound slot and will be analyzed.
    Accepted,
    /// Slot occupied; the frame was dropped and its buffer released.
    Busy,
    /// Worker is no longer running; the frame was dropped and released.
    Stopped,
}

/// Classification pipeline with a single worker thread.
///
/// `start` loads the model before any frame is accepted, so load
/// failures surface there and nowhere else. Submitted frames go through
/// an inbound channel of capacity 1: one frame can wait while one is
/// being analyzed, and everything else is refused as [`SubmitOutcome::Busy`].
/// The worker owns every piece of mutable state, which keeps the whole
/// pipeline lock-free.
///
/// Each frame is held for exactly one analysis and released when that
/// analysis finishes, whether it produced a result or an error. Dropping
/// the pipeline (or calling [`shutdown`](Self::shutdown)) closes the
/// inbound channel, lets the worker drain what it already holds, and
/// joins it.
pub struct InferencePipeline {
    slot: Option<mpsc::Sender<Frame>>,
    events: Option<mpsc::Receiver<PipelineEvent>>,
    worker: Option<JoinHandle<()>>,
}

impl InferencePipeline {
    /// Validate the config, load the model, and spawn the worker.
    ///
    /// # Errors
    ///
    /// Returns `InferError::InvalidDimensions` or `InferError::InvalidTopK`
    /// for unusable configs and `InferError::ModelLoad` when the backend
    /// cannot load the model. No worker exists after an error.
    pub fn start(
        config: PipelineConfig,
        backend: &dyn Backend,
        labels: LabelTable,
    ) -> Result<Self, InferError> {
        if config.top_k() == 0 {
            return Err(InferError::InvalidTopK { k: 0, len: 0 });
        }
        let builder = TensorBuilder::new(config.tensor_width(), config.tensor_height())?;
        let selector = TopKSelector::new(config.top_k());
        let smoother = LatencySmoother::new(config.smoothing_window());
        let event_capacity = config.event_capacity().max(1);

        // Load once, before any frame is accepted
        let classifier = Classifier::load(config.into_model(), backend)?;

        let (slot_tx, slot_rx) = mpsc::channel::<Frame>(1);
        let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>(event_capacity);

        let handle = thread::spawn(move || {
            worker_loop(slot_rx, event_tx, builder, classifier, selector, smoother, labels);
        });

        Ok(Self {
            slot: Some(slot_tx),
            events: Some(event_rx),
            worker: Some(handle),
        })
    }

    /// Offer a frame to the worker without waiting.
    ///
    /// A refused frame (slot occupied or worker gone) is dropped here,
    /// which releases its buffer back to the capture source immediately.
    pub fn submit(&self, frame: Frame) -> SubmitOutcome {
        let Some(slot) = self.slot.as_ref() else {
            return SubmitOutcome::Stopped;
        };
        match slot.try_send(frame) {
            Ok(()) => SubmitOutcome::Accepted,
            Err(mpsc::error::TrySendError::Full(frame)) => {
                drop(frame);
                SubmitOutcome::Busy
            }
            Err(mpsc::error::TrySendError::Closed(frame)) => {
                drop(frame);
                SubmitOutcome::Stopped
            }
        }
    }

    /// Take the event receiver. Yields `Some` exactly once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<PipelineEvent>> {
        self.events.take()
    }

    /// Stop accepting frames, finish in-flight work, and join the worker.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        // Closing the slot lets the worker drain and exit
        drop(self.slot.take());
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InferencePipeline {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// Send an error event without blocking the worker.
fn report_error(events: &mpsc::Sender<PipelineEvent>, err: InferError) {
    log::warn!("frame analysis failed: {err}");
    if events.try_send(PipelineEvent::Error(err)).is_err() {
        log::debug!("event channel full, error dropped");
    }
}

fn worker_loop(
    mut slot: mpsc::Receiver<Frame>,
    events: mpsc::Sender<PipelineEvent>,
    builder: TensorBuilder,
    mut classifier: Classifier,
    selector: TopKSelector,
    mut smoother: LatencySmoother,
    labels: LabelTable,
) {
    // Emitted once per pipeline lifetime; afterwards short label tables
    // degrade to placeholder labels silently.
    let mut label_gap_reported = false;

    while let Some(frame) = slot.blocking_recv() {
        let started = Instant::now();
        log::trace!(
            "analyzing {}x{} frame, mean luma {:.1}",
            frame.width(),
            frame.height(),
            frame.mean_luma()
        );

        let tensor = match builder.build(&frame) {
            Ok(tensor) => tensor,
            Err(err) => {
                drop(frame);
                report_error(&events, err);
                continue;
            }
        };

        let forward_started = Instant::now();
        let scores = match classifier.infer(&tensor) {
            Ok(scores) => scores,
            Err(err) => {
                drop(frame);
                report_error(&events, err);
                continue;
            }
        };
        let forward_duration_ms = forward_started.elapsed().as_millis() as u64;

        let top_labels = match selector.select(&scores, &labels) {
            Ok(ranked) => ranked,
            Err(err @ InferError::LabelIndex { .. }) => {
                if !label_gap_reported {
                    label_gap_reported = true;
                    report_error(&events, err);
                }
                match selector.select_lenient(&scores, &labels) {
                    Ok(ranked) => ranked,
                    Err(err) => {
                        drop(frame);
                        report_error(&events, err);
                        continue;
                    }
                }
            }
            Err(err) => {
                drop(frame);
                report_error(&events, err);
                continue;
            }
        };

        // Analysis complete; hand the buffer back before dispatching
        drop(frame);

        let total_duration_ms = started.elapsed().as_millis() as u64;
        let smoothed_total_ms = smoother.push(total_duration_ms);

        let result = AnalysisResult {
            top_labels,
            forward_duration_ms,
            total_duration_ms,
            smoothed_total_ms,
        };
        if events.try_send(PipelineEvent::Result(result)).is_err() {
            log::debug!("event channel full, result dropped");
        }
    }

    // Slot closed: in-flight work is done, drop the model with the worker
    log::debug!("pipeline worker draining complete");
}
