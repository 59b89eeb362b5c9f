use crate::InferError;
use glance_base::Tensor;
use glance_camera::{Frame, Yuv420View};

/// Per-channel RGB normalization constants shared by the torchvision
/// ImageNet model family.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Converts camera frames into normalized NCHW input tensors.
///
/// The conversion center-crops the frame to the target aspect ratio,
/// samples it down to the target size with nearest-neighbor, converts
/// each sample from YUV to RGB, and normalizes per channel to
/// `(value/255 - mean) / std`. Everything happens in one pass over the
/// output pixels; no intermediate RGB image is materialized.
pub struct TensorBuilder {
    target_w: u32,
    target_h: u32,
}

impl TensorBuilder {
    /// Create a builder producing `[1, 3, target_h, target_w]` tensors.
    ///
    /// # Errors
    ///
    /// Returns `InferError::InvalidDimensions` if either dimension is zero.
    pub fn new(target_w: u32, target_h: u32) -> Result<Self, InferError> {
        if target_w == 0 || target_h == 0 {
            return Err(InferError::InvalidDimensions {
                width: target_w,
                height: target_h,
            });
        }
        Ok(Self { target_w, target_h })
    }

    pub fn target_width(&self) -> u32 {
        self.target_w
    }

    pub fn target_height(&self) -> u32 {
        self.target_h
    }

    /// Build the input tensor for one frame.
    ///
    /// # Errors
    ///
    /// Returns `InferError::UnsupportedFormat` if the frame's plane
    /// layout cannot be interpreted as YUV 4:2:0.
    pub fn build(&self, frame: &Frame) -> Result<Tensor<f32>, InferError> {
        let view = Yuv420View::new(frame)?;

        let (crop_w, crop_h, off_x, off_y) =
            center_crop(frame.width() as usize, frame.height() as usize, self.target_w as usize, self.target_h as usize);

        let tw = self.target_w as usize;
        let th = self.target_h as usize;
        let channel_len = tw * th;
        let mut data = vec![0.0f32; 3 * channel_len];

        for out_y in 0..th {
            // Map output row to source row using nearest-neighbor
            let src_y = off_y + out_y * crop_h / th;
            for out_x in 0..tw {
                let src_x = off_x + out_x * crop_w / tw;
                let [r, g, b] = view.sample_rgb(src_x as u32, src_y as u32);

                let idx = out_y * tw + out_x;
                data[idx] = (r as f32 / 255.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
                data[channel_len + idx] = (g as f32 / 255.0 - IMAGENET_MEAN[1]) / IMAGENET_STD[1];
                data[2 * channel_len + idx] = (b as f32 / 255.0 - IMAGENET_MEAN[2]) / IMAGENET_STD[2];
            }
        }

        Ok(Tensor::new(vec![1, 3, th, tw], data)?)
    }
}

/// Largest centered sub-rectangle of `w` x `h` with the target aspect
/// ratio. Returns (crop_w, crop_h, off_x, off_y).
fn center_crop(w: usize, h: usize, target_w: usize, target_h: usize) -> (usize, usize, usize, usize) {
    let (crop_w, crop_h) = if w * target_h >= h * target_w {
        // Source is wider than the target aspect; full height
        ((h * target_w / target_h).max(1), h)
    } else {
        // Source is taller; full width
        (w, (w * target_h / target_w).max(1))
    };
    let off_x = (w - crop_w) / 2;
    let off_y = (h - crop_h) / 2;
    (crop_w, crop_h, off_x, off_y)
}
