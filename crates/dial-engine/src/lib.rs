//! Dial engine crate.
//!
//! Owns the window loop, the GPU surface and the 2D drawing primitives the
//! clock face is built from. Nothing in here knows about clocks.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
