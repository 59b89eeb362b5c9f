mod fmt;

use fmt::{format_avg_ms, format_fps, format_labels, format_ms};
use glance_base::{init_stdout_logger, log_fatal};
use glance_camera::{Camera, CameraConfig, SyntheticCamera};
use glance_infer::{Device, LabelTable, ModelSource, OnnxBackend};
use glance_pipeline::{InferencePipeline, PipelineConfig, PipelineEvent, SubmitOutcome};
use std::env;
use std::path::PathBuf;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const TOP_K: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    // Get model and label paths from environment or use defaults
    let model_path: PathBuf = env::var("GLANCE_MODEL_PATH")
        .unwrap_or_else(|_| "models/mobilenet_v2.onnx".to_string())
        .into();
    let labels_path: PathBuf = env::var("GLANCE_LABELS_PATH")
        .unwrap_or_else(|_| "models/imagenet_classes.txt".to_string())
        .into();

    println!("Live Label Experiment");
    println!("Model: {}", model_path.display());
    println!("Labels: {}", labels_path.display());
    println!("Resolution: {}x{}", WIDTH, HEIGHT);
    println!("Controls: Ctrl-C to exit");
    println!();

    // Load the label table
    println!("Loading labels...");
    let labels = LabelTable::load(&labels_path)?;
    println!("{} labels loaded", labels.len());

    // Load the model and spawn the analysis worker
    println!("Loading classifier...");
    let backend = OnnxBackend::new(Device::Cpu);
    let config = PipelineConfig::new(ModelSource::File(model_path)).with_top_k(TOP_K);
    let mut pipeline = match InferencePipeline::start(config, &backend, labels) {
        Ok(pipeline) => pipeline,
        Err(err) => log_fatal!("cannot start pipeline: {err}"),
    };
    let mut events = pipeline
        .take_events()
        .ok_or("pipeline event channel already taken")?;
    println!("Classifier ready");

    // Initialize camera
    println!("Opening camera...");
    let camera_config = CameraConfig::default()
        .with_width(WIDTH)
        .with_height(HEIGHT);
    let mut camera = SyntheticCamera::new(camera_config);
    println!("Camera ready");

    println!("Starting main loop...");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut submitted: u64 = 0;
    let mut dropped: u64 = 0;

    // Main loop
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                println!();
                break;
            }
            frame = camera.recv() => {
                match pipeline.submit(frame?) {
                    SubmitOutcome::Accepted => submitted += 1,
                    SubmitOutcome::Busy => dropped += 1,
                    SubmitOutcome::Stopped => break,
                }
            }
            event = events.recv() => {
                match event {
                    Some(PipelineEvent::Result(result)) => {
                        let avg = match result.smoothed_total_ms {
                            Some(ms) => format_avg_ms(ms),
                            None => "avg:-".to_string(),
                        };
                        println!(
                            "{}  fwd:{} total:{} {} {}",
                            format_labels(&result.top_labels),
                            format_ms(result.forward_duration_ms),
                            format_ms(result.total_duration_ms),
                            format_fps(result.total_duration_ms),
                            avg,
                        );
                    }
                    Some(PipelineEvent::Error(err)) => {
                        eprintln!("analysis error: {err}");
                    }
                    None => break,
                }
            }
        }
    }

    println!("Exiting... {submitted} frames submitted, {dropped} dropped");
    pipeline.shutdown();
    Ok(())
}
