//! GPU device + surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue for one window
//! - configures the Surface and keeps it in sync with window resizes
//! - hands out one encoder + view per frame

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
