//! Font loading and text measurement.
//!
//! Rasterization lives in `render::shapes::text`; this module only owns the
//! parsed fonts and the layout math both sides agree on.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
