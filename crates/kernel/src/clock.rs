use std::collections::VecDeque;
use std::time::Instant;

use crate::time::Time;

/// Time source and sleep provider consumed by the loop driver.
pub trait Clock {
    /// Current instant, monotonic.
    fn now(&mut self) -> Time;

    /// Yield for roughly `duration`. Precision is not guaranteed.
    fn sleep(&mut self, duration: Time);
}

/// Wall clock backed by `std::time::Instant`, measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Time {
        Time::from(self.origin.elapsed())
    }

    fn sleep(&mut self, duration: Time) {
        std::thread::sleep(duration.to_duration());
    }
}

/// Deterministic clock that replays a list of frame durations.
///
/// Every call to `now` returns the current instant and then advances by the
/// next scripted duration, so the n-th frame measured by the loop sees the
/// n-th entry. Once the script runs out, `idle_step` is used. Sleeping never
/// moves time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClock {
    current: Time,
    script: VecDeque<Time>,
    idle_step: Time,
    sleeps: u64,
}

impl ScriptedClock {
    pub fn new(frames: impl IntoIterator<Item = Time>) -> Self {
        Self {
            script: frames.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Script given as frame durations in milliseconds.
    pub fn from_millis(frames: &[i64]) -> Self {
        Self::new(frames.iter().map(|&ms| Time::from_millis(ms)))
    }

    pub fn with_idle_step(mut self, step: Time) -> Self {
        self.idle_step = step;
        self
    }

    pub fn push(&mut self, frame: Time) {
        self.script.push_back(frame);
    }

    /// Scripted frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn sleeps(&self) -> u64 {
        self.sleeps
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> Time {
        let now = self.current;
        self.current += self.script.pop_front().unwrap_or(self.idle_step);
        now
    }

    fn sleep(&mut self, _duration: Time) {
        self.sleeps += 1;
    }
}
