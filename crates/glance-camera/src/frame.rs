use std::fmt;
use std::sync::mpsc;

/// One plane of a planar or semi-planar image buffer.
///
/// `row_stride` is the byte distance between the starts of consecutive
/// rows; `pixel_stride` is the byte distance between consecutive samples
/// within a row. Strides may exceed the packed size (row padding,
/// interleaved chroma).
#[derive(Clone, Debug)]
pub struct Plane {
    pub data: Vec<u8>,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }

    /// Packed plane: pixel stride 1, row stride equal to the row width.
    pub fn packed(data: Vec<u8>, width: usize) -> Self {
        Self {
            data,
            row_stride: width,
            pixel_stride: 1,
        }
    }
}

/// Capability to return a frame buffer to its capture source.
///
/// Firing is one-shot: the signal sender is taken on the first release,
/// so a handle can never signal twice. Dropping an unfired handle fires
/// it, which makes release automatic however the owning `Frame` exits
/// scope.
pub struct ReleaseHandle {
    signal: Option<mpsc::Sender<()>>,
}

impl ReleaseHandle {
    /// Handle that signals the given sender exactly once.
    pub fn new(signal: mpsc::Sender<()>) -> Self {
        Self {
            signal: Some(signal),
        }
    }

    /// Handle with no capture source behind it. Releasing is a no-op.
    /// Useful for frames built directly in tests.
    pub fn detached() -> Self {
        Self { signal: None }
    }

    fn fire(&mut self) {
        if let Some(signal) = self.signal.take() {
            // Source may already be gone; a missed signal is fine then.
            let _ = signal.send(());
        }
    }
}

impl Drop for ReleaseHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for ReleaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseHandle")
            .field("armed", &self.signal.is_some())
            .finish()
    }
}

/// A captured YUV 4:2:0 frame.
///
/// Plane 0 is full-resolution luma. Planes 1 and 2 are half-resolution
/// chroma (U then V), either planar (pixel stride 1) or semi-planar
/// (pixel stride 2, U and V interleaved in each other's gaps).
///
/// The frame owns a `ReleaseHandle`; the capture source is signalled
/// exactly once when the frame is released, explicitly via
/// [`Frame::release`] or implicitly when the frame is dropped.
pub struct Frame {
    width: u32,
    height: u32,
    planes: [Plane; 3],
    release: ReleaseHandle,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("release", &self.release)
            .finish()
    }
}

impl Frame {
    pub fn new(width: u32, height: u32, planes: [Plane; 3], release: ReleaseHandle) -> Self {
        Self {
            width,
            height,
            planes,
            release,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn planes(&self) -> &[Plane; 3] {
        &self.planes
    }

    /// Return the buffer to the capture source.
    ///
    /// Dropping the frame has the same effect; this form marks the
    /// release point in code that holds frames across several steps.
    pub fn release(mut self) {
        self.release.fire();
    }

    /// Average luma over the full frame, in [0, 255].
    ///
    /// Samples plane 0 through its strides and skips anything the plane
    /// buffer does not cover, so a malformed layout degrades to a partial
    /// average instead of a panic.
    pub fn mean_luma(&self) -> f32 {
        let luma = &self.planes[0];
        let mut sum: u64 = 0;
        let mut count: u64 = 0;
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                let idx = y * luma.row_stride + x * luma.pixel_stride;
                if let Some(&value) = luma.data.get(idx) {
                    sum += value as u64;
                    count += 1;
                }
            }
        }
        if count == 0 {
            0.0
        } else {
            sum as f32 / count as f32
        }
    }
}
