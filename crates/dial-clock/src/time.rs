//! Wall-clock readings and where they come from.

use chrono::{Local, Timelike};

/// Hours (0–23), minutes (0–59) and seconds (0–59) of one instant.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ClockReading {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockReading {
    /// Returns `None` unless every field is in range.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        (hours < 24 && minutes < 60 && seconds < 60).then_some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Reads the fields from any chrono time value.
    ///
    /// A leap second (`second() == 59` with nanos past 1e9) still reads as 59.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hours: t.hour(),
            minutes: t.minute(),
            seconds: t.second().min(59),
        }
    }
}

/// A source of clock readings.
pub trait TimeSource {
    fn now(&self) -> ClockReading;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// The host's local wall clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> ClockReading {
        ClockReading::from_timelike(&Local::now())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// A clock stopped at one reading.
#[derive(Debug, Copy, Clone, Default)]
pub struct FixedTime {
    reading: ClockReading,
}

impl FixedTime {
    pub fn new(reading: ClockReading) -> Self {
        Self { reading }
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> ClockReading {
        self.reading
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn new_rejects_out_of_range_fields() {
        assert!(ClockReading::new(23, 59, 59).is_some());
        assert!(ClockReading::new(24, 0, 0).is_none());
        assert!(ClockReading::new(0, 60, 0).is_none());
        assert!(ClockReading::new(0, 0, 60).is_none());
    }

    #[test]
    fn reads_fields_from_chrono() {
        let t = NaiveTime::from_hms_opt(13, 7, 42).unwrap();
        assert_eq!(
            ClockReading::from_timelike(&t),
            ClockReading::new(13, 7, 42).unwrap()
        );
    }

    #[test]
    fn leap_second_reads_as_59() {
        let t = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        assert_eq!(ClockReading::from_timelike(&t).seconds, 59);
    }

    #[test]
    fn fixed_time_never_moves() {
        let reading = ClockReading::new(8, 30, 5).unwrap();
        let src = FixedTime::new(reading);
        assert_eq!(src.now(), reading);
        assert_eq!(src.now(), reading);
        assert_eq!(src.name(), "fixed");
        assert_eq!(FixedTime::default().now(), ClockReading::new(0, 0, 0).unwrap());
    }

    #[test]
    fn local_time_is_in_range() {
        let r = LocalTime.now();
        assert!(ClockReading::new(r.hours, r.minutes, r.seconds).is_some());
    }
}
