use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::time::Duration;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Fixed-precision instant or duration, stored as signed nanoseconds.
///
/// Integer storage keeps simulation time an exact multiple of the update
/// period no matter how many steps have run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Time(i64);

impl Time {
    pub const ZERO: Time = Time(0);

    /// Build from floating seconds, rounded to the nearest nanosecond.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * NANOS_PER_SEC).round() as i64)
    }

    pub const fn from_millis(ms: i64) -> Self {
        Self(ms * 1_000_000)
    }

    pub const fn from_micros(us: i64) -> Self {
        Self(us * 1_000)
    }

    pub const fn from_nanos(ns: i64) -> Self {
        Self(ns)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC
    }

    pub fn as_nanos(self) -> i64 {
        self.0
    }

    /// `self / other` as a float. Returns 0.0 when `other` is zero.
    pub fn ratio(self, other: Time) -> f64 {
        if other.0 == 0 {
            0.0
        } else {
            self.0 as f64 / other.0 as f64
        }
    }

    /// Convert to a std duration; negative values clamp to zero.
    pub fn to_duration(self) -> Duration {
        Duration::from_nanos(self.0.max(0) as u64)
    }
}

impl From<Duration> for Time {
    fn from(d: Duration) -> Self {
        Self(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Time {
    fn sub_assign(&mut self, rhs: Time) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}s", self.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_secs_rounds_to_nanos() {
        assert_eq!(Time::from_secs_f64(1.0 / 50.0), Time::from_millis(20));
        assert_eq!(Time::from_secs_f64(0.25), Time::from_millis(250));
        assert_eq!(Time::from_secs_f64(1.0 / 60.0).as_nanos(), 16_666_667);
    }

    #[test]
    fn arithmetic_and_ordering() {
        let mut t = Time::from_millis(10);
        t += Time::from_millis(15);
        assert_eq!(t, Time::from_millis(25));
        t -= Time::from_millis(5);
        assert_eq!(t - Time::from_millis(20), Time::ZERO);
        assert!(Time::from_millis(1) < Time::from_millis(2));
        assert!(Time::from_millis(2) >= Time::from_millis(2));
        assert_eq!(Time::from_micros(1500) + Time::from_nanos(500_000), Time::from_millis(2));
    }

    #[test]
    fn repeated_addition_is_exact() {
        let step = Time::from_secs_f64(1.0 / 50.0);
        let mut t = Time::ZERO;
        for _ in 0..50_000 {
            t += step;
        }
        assert_eq!(t, Time::from_millis(1_000_000));
    }

    #[test]
    fn ratio_and_zero_divisor() {
        assert_eq!(Time::from_millis(5).ratio(Time::from_millis(20)), 0.25);
        assert_eq!(Time::from_millis(5).ratio(Time::ZERO), 0.0);
    }

    #[test]
    fn duration_conversion() {
        assert_eq!(Time::from(Duration::from_millis(3)), Time::from_millis(3));
        assert_eq!(Time::from_millis(-3).to_duration(), Duration::ZERO);
        assert_eq!(Time::from_millis(7).to_duration(), Duration::from_millis(7));
    }

    #[test]
    fn display_in_seconds() {
        assert_eq!(Time::from_millis(20).to_string(), "0.0200s");
    }
}
