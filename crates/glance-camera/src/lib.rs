//! Camera capture abstraction for the glance ecosystem.
//!
//! This crate provides a unified `Camera` trait for async frame capture,
//! a YUV 4:2:0 `Frame` handle with an exactly-once buffer release contract,
//! and a deterministic synthetic capture source for demos and tests.

pub mod config;
pub mod convert;
pub mod error;
pub mod frame;
pub mod synthetic;
pub mod traits;

pub use config::CameraConfig;
pub use convert::{yuv_to_rgb, LayoutError, Yuv420View};
pub use error::CameraError;
pub use frame::{Frame, Plane, ReleaseHandle};
pub use synthetic::SyntheticCamera;
pub use traits::Camera;
