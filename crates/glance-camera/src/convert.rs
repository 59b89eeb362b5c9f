use crate::frame::{Frame, Plane};
use std::fmt;

/// Converts one YUV sample to RGB using BT.601 coefficients:
/// - R = Y + 1.402 * (V - 128)
/// - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
/// - B = Y + 1.772 * (U - 128)
///
/// Each channel is clamped to [0, 255].
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32;
    let u = u as f32;
    let v = v as f32;

    let r = (y + 1.402 * (v - 128.0)).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344 * (u - 128.0) - 0.714 * (v - 128.0)).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * (u - 128.0)).clamp(0.0, 255.0) as u8;

    [r, g, b]
}

/// Why a frame's plane layout cannot be interpreted as YUV 4:2:0.
#[derive(Debug, PartialEq)]
pub enum LayoutError {
    EmptyFrame { width: u32, height: u32 },
    LumaStride { pixel_stride: usize },
    ChromaStride { u_stride: usize, v_stride: usize },
    PlaneTooShort { plane: usize, expected: usize, got: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::EmptyFrame { width, height } => {
                write!(f, "frame has no pixels: {width}x{height}")
            }
            LayoutError::LumaStride { pixel_stride } => {
                write!(f, "luma plane must have pixel stride 1, got {pixel_stride}")
            }
            LayoutError::ChromaStride { u_stride, v_stride } => {
                write!(
                    f,
                    "chroma pixel strides must match and be 1 or 2, got U={u_stride} V={v_stride}"
                )
            }
            LayoutError::PlaneTooShort {
                plane,
                expected,
                got,
            } => {
                write!(
                    f,
                    "plane {plane} too short: expected at least {expected} bytes, got {got}"
                )
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// A validated read-only view of a frame's YUV 4:2:0 layout.
///
/// Construction checks strides and plane sizes once; sampling afterwards
/// indexes without further bounds decisions. Covers both planar (I420,
/// chroma pixel stride 1) and semi-planar (NV12/NV21, chroma pixel
/// stride 2) arrangements.
pub struct Yuv420View<'a> {
    width: u32,
    height: u32,
    luma: &'a Plane,
    u: &'a Plane,
    v: &'a Plane,
}

impl<'a> Yuv420View<'a> {
    pub fn new(frame: &'a Frame) -> Result<Self, LayoutError> {
        let width = frame.width();
        let height = frame.height();
        if width == 0 || height == 0 {
            return Err(LayoutError::EmptyFrame { width, height });
        }

        let planes = frame.planes();
        let luma = &planes[0];
        let u = &planes[1];
        let v = &planes[2];

        if luma.pixel_stride != 1 {
            return Err(LayoutError::LumaStride {
                pixel_stride: luma.pixel_stride,
            });
        }
        if u.pixel_stride != v.pixel_stride || !(u.pixel_stride == 1 || u.pixel_stride == 2) {
            return Err(LayoutError::ChromaStride {
                u_stride: u.pixel_stride,
                v_stride: v.pixel_stride,
            });
        }

        // Chroma is subsampled 2x2; odd dimensions round up.
        let chroma_w = (width as usize).div_ceil(2);
        let chroma_h = (height as usize).div_ceil(2);

        let luma_needed = (height as usize - 1) * luma.row_stride + width as usize;
        if luma.data.len() < luma_needed {
            return Err(LayoutError::PlaneTooShort {
                plane: 0,
                expected: luma_needed,
                got: luma.data.len(),
            });
        }
        for (index, chroma) in [(1usize, u), (2, v)] {
            let needed = (chroma_h - 1) * chroma.row_stride + (chroma_w - 1) * chroma.pixel_stride + 1;
            if chroma.data.len() < needed {
                return Err(LayoutError::PlaneTooShort {
                    plane: index,
                    expected: needed,
                    got: chroma.data.len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            luma,
            u,
            v,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB value of the pixel at (x, y).
    ///
    /// Coordinates must satisfy `x < width` and `y < height`; validated
    /// plane sizes then guarantee in-bounds access.
    pub fn sample_rgb(&self, x: u32, y: u32) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height);
        let (x, y) = (x as usize, y as usize);

        let luma = self.luma.data[y * self.luma.row_stride + x];
        let cx = x / 2;
        let cy = y / 2;
        let u = self.u.data[cy * self.u.row_stride + cx * self.u.pixel_stride];
        let v = self.v.data[cy * self.v.row_stride + cx * self.v.pixel_stride];

        yuv_to_rgb(luma, u, v)
    }
}
