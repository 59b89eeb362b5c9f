use crate::{CameraError, Frame};

/// Async camera trait for frame capture.
///
/// Implementations deliver YUV 4:2:0 [`Frame`]s, each carrying a release
/// handle that must fire exactly once when the consumer is done with the
/// buffer. `Frame`'s drop glue takes care of that, so consumers only
/// need to let frames go out of scope.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame from the camera.
    async fn recv(&mut self) -> Result<Frame, CameraError>;
}
