//! Paint model shared between the clock and the renderers.
//!
//! Only solid colors exist; every shape is filled with one [`Color`].

pub mod color;

pub use color::Color;
