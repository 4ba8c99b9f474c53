//! Dial layout in design units.
//!
//! The face is laid out on a 400-unit wide square; [`Scale`] maps design
//! units to logical pixels for the current canvas. Angles follow screen
//! convention (+Y down), so `-π/2` points at twelve o'clock.

use std::f32::consts::{FRAC_PI_2, TAU};

use dial_engine::coords::Vec2;

use crate::fonts::FontRole;
use crate::time::ClockReading;

/// Width of the face in design units.
pub const DESIGN_WIDTH: f32 = 400.0;

/// Number of rim ticks; every fifth one marks an hour.
pub const TICK_COUNT: u32 = 60;

/// Radius of the center dot in design units.
pub const CENTER_DOT_RADIUS: f32 = 5.0;

/// Distance from the center at which every trail starts; negative puts it
/// just behind the center on the opposite side.
pub const TRAIL_START: f32 = -4.0;

/// Design-unit to logical-pixel factor for one canvas width.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scale(f32);

impl Scale {
    pub fn for_width(canvas_width: f32) -> Self {
        Self(canvas_width / DESIGN_WIDTH)
    }

    #[inline]
    pub fn factor(self) -> f32 {
        self.0
    }

    /// Converts design units to logical pixels.
    #[inline]
    pub fn units(self, design: f32) -> f32 {
        design * self.0
    }
}

/// Angle of a position `fraction` of the way round the dial.
#[inline]
pub fn dial_angle(fraction: f32) -> f32 {
    TAU * fraction - FRAC_PI_2
}

/// One rim tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tick {
    pub index: u32,
    pub angle: f32,
    /// Every fifth tick marks an hour and is longer and wider.
    pub hour: bool,
    /// Radii and width in design units.
    pub inner: f32,
    pub outer: f32,
    pub width: f32,
}

impl Tick {
    const MINOR: (f32, f32, f32) = (185.0, 195.0, 1.0);
    const HOUR: (f32, f32, f32) = (175.0, 195.0, 3.0);

    /// Tick `index`, wrapping past [`TICK_COUNT`].
    pub fn new(index: u32) -> Self {
        let index = index % TICK_COUNT;
        let hour = index % 5 == 0;
        let (inner, outer, width) = if hour { Self::HOUR } else { Self::MINOR };
        Self {
            index,
            angle: dial_angle(index as f32 / TICK_COUNT as f32),
            hour,
            inner,
            outer,
            width,
        }
    }

    /// Inner and outer endpoints in logical pixels.
    pub fn endpoints(&self, center: Vec2, scale: Scale) -> (Vec2, Vec2) {
        let dir = Vec2::from_angle(self.angle);
        (
            center + dir * scale.units(self.inner),
            center + dir * scale.units(self.outer),
        )
    }
}

/// All sixty ticks in index order.
pub fn ticks() -> impl Iterator<Item = Tick> {
    (0..TICK_COUNT).map(Tick::new)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Hand {
    Seconds,
    Minutes,
    Hours,
}

/// How a hand's numerals look and how far its trail reaches.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandStyle {
    pub font: FontRole,
    /// Font size in design units.
    pub size: f32,
    /// Extra space between consecutive numerals, in design units.
    pub gap: f32,
    pub repeats: u32,
}

impl Hand {
    /// Paint order.
    pub const ALL: [Hand; 3] = [Hand::Seconds, Hand::Minutes, Hand::Hours];

    pub fn style(self) -> HandStyle {
        match self {
            Hand::Seconds => HandStyle {
                font: FontRole::Light,
                size: 12.0,
                gap: 4.0,
                repeats: 6,
            },
            Hand::Minutes => HandStyle {
                font: FontRole::Regular,
                size: 15.0,
                gap: 4.0,
                repeats: 7,
            },
            Hand::Hours => HandStyle {
                font: FontRole::Black,
                size: 18.0,
                gap: 5.0,
                repeats: 7,
            },
        }
    }

    /// The raw value the numerals print; hours stay on the 24-hour clock.
    pub fn value(self, reading: ClockReading) -> u32 {
        match self {
            Hand::Seconds => reading.seconds,
            Hand::Minutes => reading.minutes,
            Hand::Hours => reading.hours,
        }
    }

    /// Fraction of a full turn, in `[0, 1)`.
    pub fn fraction(self, reading: ClockReading) -> f32 {
        match self {
            Hand::Seconds => reading.seconds as f32 / 60.0,
            Hand::Minutes => reading.minutes as f32 / 60.0,
            Hand::Hours => (reading.hours % 12) as f32 / 12.0,
        }
    }

    pub fn angle(self, reading: ClockReading) -> f32 {
        dial_angle(self.fraction(reading))
    }
}

impl HandStyle {
    /// Centers of the trail's numerals, nearest the center first.
    ///
    /// The walk starts [`TRAIL_START`] units from `center` and steps outward by
    /// `size + gap` before every numeral.
    pub fn trail(&self, center: Vec2, angle: f32, scale: Scale) -> Vec<Vec2> {
        let dir = Vec2::from_angle(angle);
        let step = dir * scale.units(self.size + self.gap);
        let mut at = center + dir * scale.units(TRAIL_START);

        (0..self.repeats)
            .map(|_| {
                at += step;
                at
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn close_vec(a: Vec2, b: Vec2) -> bool {
        close(a.x, b.x) && close(a.y, b.y)
    }

    #[test]
    fn scale_is_width_over_400() {
        assert!(close(Scale::for_width(400.0).factor(), 1.0));
        assert!(close(Scale::for_width(720.0).factor(), 1.8));
        assert!(close(Scale::for_width(720.0).units(5.0), 9.0));
        // Linear in width.
        assert!(close(
            Scale::for_width(200.0).units(10.0) * 2.0,
            Scale::for_width(400.0).units(10.0)
        ));
    }

    #[test]
    fn tick_angles_start_at_twelve() {
        for i in 0..TICK_COUNT {
            let expected = TAU * i as f32 / 60.0 - FRAC_PI_2;
            assert!(close(Tick::new(i).angle, expected), "tick {i}");
        }

        let (_, outer) = Tick::new(0).endpoints(Vec2::zero(), Scale::for_width(400.0));
        assert!(close_vec(outer, Vec2::new(0.0, -195.0)));
    }

    #[test]
    fn every_fifth_tick_is_an_hour_tick() {
        let hours: Vec<u32> = ticks().filter(|t| t.hour).map(|t| t.index).collect();
        assert_eq!(hours, (0..60).step_by(5).collect::<Vec<_>>());

        let minor = Tick::new(1);
        let hour = Tick::new(5);
        assert!(hour.width > minor.width);
        assert!(hour.outer - hour.inner > minor.outer - minor.inner);
        assert_eq!(ticks().count(), 60);
    }

    #[test]
    fn tick_endpoints_scale_with_canvas() {
        let center = Vec2::new(360.0, 360.0);
        let (inner, outer) = Tick::new(15).endpoints(center, Scale::for_width(720.0));
        // Index 15 is an hour tick pointing right.
        assert!(close_vec(inner, Vec2::new(360.0 + 175.0 * 1.8, 360.0)));
        assert!(close_vec(outer, Vec2::new(360.0 + 195.0 * 1.8, 360.0)));
    }

    #[test]
    fn minor_tick_spans_185_to_195() {
        let center = Vec2::new(360.0, 360.0);
        let scale = Scale::for_width(720.0);
        for index in [1, 14, 16, 59] {
            let tick = Tick::new(index);
            assert!(!tick.hour);
            let (inner, outer) = tick.endpoints(center, scale);
            assert!((inner.distance(center) - 185.0 * 1.8).abs() < 1e-3, "tick {index}");
            assert!((outer.distance(center) - 195.0 * 1.8).abs() < 1e-3, "tick {index}");
            assert!(close(scale.units(tick.width), 1.8));
        }
    }

    #[test]
    fn fifteen_minutes_points_right() {
        let r = ClockReading::new(0, 15, 0).unwrap();
        assert!(close(Hand::Minutes.angle(r), 0.0));
    }

    #[test]
    fn midnight_points_every_hand_up() {
        let midnight = ClockReading::new(0, 0, 0).unwrap();
        for hand in Hand::ALL {
            assert!(close(hand.fraction(midnight), 0.0));
            assert!(close(hand.angle(midnight), -FRAC_PI_2));
        }
    }

    #[test]
    fn hours_wrap_at_twelve_but_print_raw() {
        let r = ClockReading::new(15, 0, 0).unwrap();
        assert!(close(Hand::Hours.fraction(r), 0.25));
        assert_eq!(Hand::Hours.value(r), 15);
        assert!(close(
            Hand::Hours.angle(r),
            Hand::Hours.angle(ClockReading::new(3, 0, 0).unwrap())
        ));
    }

    #[test]
    fn trail_steps_outward_from_behind_center() {
        let style = Hand::Seconds.style();
        // Pointing right at scale 1: start at x = -4, step 16.
        let trail = style.trail(Vec2::zero(), 0.0, Scale::for_width(400.0));
        assert_eq!(trail.len(), 6);
        for (i, p) in trail.iter().enumerate() {
            let x = -4.0 + 16.0 * (i + 1) as f32;
            assert!(close_vec(*p, Vec2::new(x, 0.0)), "step {i}: {p:?}");
        }
    }

    #[test]
    fn hand_styles_grow_from_seconds_to_hours() {
        let hours = Hand::Hours.style();
        assert_eq!(hours.font, FontRole::Black);
        assert_eq!((hours.size, hours.gap, hours.repeats), (18.0, 5.0, 7));
        assert_eq!(Hand::Minutes.style().repeats, 7);
        assert_eq!(Hand::Seconds.style().font, FontRole::Light);
    }
}
