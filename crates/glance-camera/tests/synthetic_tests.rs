use glance_camera::{Camera, CameraConfig, SyntheticCamera};
use std::time::Duration;

fn test_config() -> CameraConfig {
    CameraConfig::default()
        .with_width(8)
        .with_height(8)
        .with_fps(500)
        .with_buffer_count(2)
}

#[tokio::test]
async fn test_synthetic_frame_dimensions() {
    let mut camera = SyntheticCamera::new(test_config());
    let frame = camera.recv().await.unwrap();

    assert_eq!(frame.width(), 8);
    assert_eq!(frame.height(), 8);
    assert_eq!(frame.planes()[0].data.len(), 64);
    assert_eq!(frame.planes()[1].data.len(), 16);
    assert_eq!(frame.planes()[2].data.len(), 16);
}

#[tokio::test]
async fn test_synthetic_pattern_is_deterministic() {
    let mut camera = SyntheticCamera::new(test_config());

    // Frame 0: luma(x, y) = (x + y) mod 256
    let frame0 = camera.recv().await.unwrap();
    assert_eq!(frame0.planes()[0].data[0], 0);
    assert_eq!(frame0.planes()[0].data[3], 3);
    assert_eq!(frame0.planes()[0].data[8], 1);
    assert_eq!(frame0.planes()[1].data[0], 128);
    drop(frame0);

    // Frame 1: gradient slides by one
    let frame1 = camera.recv().await.unwrap();
    assert_eq!(frame1.planes()[0].data[0], 1);
    assert_eq!(frame1.planes()[0].data[3], 4);
}

#[tokio::test]
async fn test_synthetic_two_cameras_same_pattern() {
    let mut a = SyntheticCamera::new(test_config());
    let mut b = SyntheticCamera::new(test_config());

    let frame_a = a.recv().await.unwrap();
    let frame_b = b.recv().await.unwrap();
    assert_eq!(frame_a.planes()[0].data, frame_b.planes()[0].data);
}

#[tokio::test]
async fn test_synthetic_backpressure_single_buffer() {
    let config = test_config().with_buffer_count(1);
    let mut camera = SyntheticCamera::new(config);

    // Hold the only buffer; the capture thread must stall
    let held = camera.recv().await.unwrap();
    let stalled = tokio::time::timeout(Duration::from_millis(100), camera.recv()).await;
    assert!(stalled.is_err(), "capture should stall while buffer is held");

    // Releasing the frame lets capture resume
    held.release();
    let next = tokio::time::timeout(Duration::from_secs(2), camera.recv())
        .await
        .expect("capture should resume after release")
        .unwrap();
    assert_eq!(next.width(), 8);
}

#[tokio::test]
async fn test_synthetic_mean_luma_matches_pattern() {
    let mut camera = SyntheticCamera::new(test_config());
    let frame = camera.recv().await.unwrap();

    // Mean of (x + y) over an 8x8 grid is 7.0
    let mean = frame.mean_luma();
    assert!((mean - 7.0).abs() < 1e-3, "mean luma was {mean}");
}

#[test]
fn test_synthetic_drop_without_recv() {
    // Dropping a camera that never started must not hang
    let camera = SyntheticCamera::new(test_config());
    drop(camera);
}

#[tokio::test]
async fn test_synthetic_drop_with_outstanding_frame() {
    // Dropping the camera while a frame is still held must not deadlock
    let mut camera = SyntheticCamera::new(test_config().with_buffer_count(1));
    let held = camera.recv().await.unwrap();
    drop(camera);
    drop(held);
}
