use crate::frame::{Frame, Plane, ReleaseHandle};
use crate::{Camera, CameraConfig, CameraError};
use std::sync::mpsc as std_mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;

type FrameResult = Result<Frame, CameraError>;

/// How long the capture thread waits on a release signal before
/// rechecking whether the consumer side has gone away.
const RELEASE_POLL: Duration = Duration::from_millis(20);

/// Deterministic test-pattern camera.
///
/// Produces I420 frames with a luma gradient that slides one pixel per
/// frame and neutral chroma. Frame contents depend only on the frame
/// index and the configured size, which makes captured output exactly
/// reproducible.
///
/// The source honors `CameraConfig::buffer_count`: at most that many
/// frames are outstanding at once, and capture stalls until a consumer
/// releases one. With a buffer count of 1 the camera hands over frames
/// strictly one at a time.
pub struct SyntheticCamera {
    config: CameraConfig,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for SyntheticCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticCamera")
            .field("config", &self.config)
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl Camera for SyntheticCamera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        // Ensure capture thread is running
        self.ensure_started();

        // Receive next frame from channel
        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("Receiver not initialized".to_string()))?;

        receiver.recv().await.ok_or_else(|| {
            CameraError::Stream(
                "Capture thread terminated; recreate SyntheticCamera to restart".to_string(),
            )
        })?
    }
}

impl Drop for SyntheticCamera {
    fn drop(&mut self) {
        // Drop the receiver to signal the thread to stop
        drop(self.receiver.take());

        // Wait for the thread to finish
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl SyntheticCamera {
    /// Create a new synthetic camera with the given configuration.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            receiver: None,
            thread_handle: None,
        }
    }

    /// Start the capture thread if not already running.
    ///
    /// This is called automatically on the first `recv()` call.
    fn ensure_started(&mut self) {
        if self.receiver.is_some() {
            return;
        }

        let config = self.config.clone();
        let buffer_count = self.config.buffer_count().max(1) as usize;
        let (tx, rx) = mpsc::channel(buffer_count);

        // Spawn capture thread
        let handle = thread::spawn(move || {
            Self::capture_loop(config, tx);
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);
    }

    /// Background thread capture loop.
    ///
    /// Generates test-pattern frames at the configured rate. Every frame
    /// carries a release handle wired back to this loop; the outstanding
    /// count goes up when a frame is handed over and down when its
    /// handle fires, and production pauses while all buffers are out.
    fn capture_loop(config: CameraConfig, tx: mpsc::Sender<FrameResult>) {
        let (release_tx, release_rx) = std_mpsc::channel::<()>();
        let buffer_count = config.buffer_count().max(1) as usize;
        let frame_interval = if config.fps() > 0 {
            Duration::from_secs_f64(1.0 / config.fps() as f64)
        } else {
            Duration::ZERO
        };

        let mut outstanding: usize = 0;
        let mut index: u64 = 0;

        loop {
            // Reclaim buffers the consumer has released
            while release_rx.try_recv().is_ok() {
                outstanding = outstanding.saturating_sub(1);
            }

            if outstanding >= buffer_count {
                // All buffers are out; wait for a release, but keep an
                // eye on the consumer side going away.
                match release_rx.recv_timeout(RELEASE_POLL) {
                    Ok(()) => {
                        outstanding = outstanding.saturating_sub(1);
                    }
                    Err(std_mpsc::RecvTimeoutError::Timeout) => {
                        if tx.is_closed() {
                            break;
                        }
                        continue;
                    }
                    Err(std_mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }

            // Reserve the channel slot before building the frame, so a
            // frame is never constructed (and its release never armed)
            // unless it will actually be delivered.
            match tx.try_reserve() {
                Ok(permit) => {
                    let frame =
                        test_pattern_frame(&config, index, ReleaseHandle::new(release_tx.clone()));
                    index += 1;
                    outstanding += 1;
                    permit.send(Ok(frame));
                }
                Err(mpsc::error::TrySendError::Full(())) => {
                    // Consumer has not drained the channel yet; skip this tick
                    log::debug!("SyntheticCamera: channel full, skipping frame {}", index);
                }
                Err(mpsc::error::TrySendError::Closed(())) => {
                    // Receiver dropped - exit thread
                    break;
                }
            }

            if !frame_interval.is_zero() {
                thread::sleep(frame_interval);
            }
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

/// Build the I420 test pattern for one frame index.
///
/// Luma at (x, y) is `(x + y + index) mod 256`; both chroma planes are
/// the neutral 128, so the decoded RGB image is a gray diagonal gradient.
fn test_pattern_frame(config: &CameraConfig, index: u64, release: ReleaseHandle) -> Frame {
    let width = config.width() as usize;
    let height = config.height() as usize;
    let chroma_w = width.div_ceil(2);
    let chroma_h = height.div_ceil(2);

    let mut luma = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            luma[y * width + x] = ((x + y + index as usize) % 256) as u8;
        }
    }

    let chroma = vec![128u8; chroma_w * chroma_h];

    Frame::new(
        config.width(),
        config.height(),
        [
            Plane::packed(luma, width),
            Plane::packed(chroma.clone(), chroma_w),
            Plane::packed(chroma, chroma_w),
        ],
        release,
    )
}
