//! Analog numeral clock.
//!
//! Sixty rim ticks, a center dot and three radial trails of numerals (seconds,
//! minutes, hours), redrawn once per wall-clock second onto a retained
//! [`dial_engine::scene::DrawList`].

pub mod app;
pub mod canvas;
pub mod config;
pub mod face;
pub mod fonts;
pub mod geometry;
pub mod time;

pub use app::ClockApp;
pub use config::ClockConfig;
pub use face::{ClockFace, Redraw};
pub use time::{ClockReading, FixedTime, LocalTime, TimeSource};
