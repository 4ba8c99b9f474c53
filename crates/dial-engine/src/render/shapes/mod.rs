//! Shape renderers, one per `DrawCmd` variant.

mod common;

pub mod circle;
pub mod line;
pub mod text;
