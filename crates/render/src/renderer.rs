use std::time::Instant;

use rogue_kernel::{Renderer, Time};

/// Ring buffer of recent present-to-present intervals.
#[derive(Debug, Clone)]
pub struct PresentTimer {
    history: Vec<Time>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl PresentTimer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            history: vec![Time::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, interval: Time) {
        self.history[self.index] = interval;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled { self.capacity } else { self.index }
    }

    pub fn average(&self) -> Time {
        let count = self.count();
        if count == 0 {
            return Time::ZERO;
        }
        let total: i64 = self.history[..count].iter().map(|t| t.as_nanos()).sum();
        Time::from_nanos(total / count as i64)
    }

    pub fn max(&self) -> Time {
        self.history[..self.count()]
            .iter()
            .copied()
            .max()
            .unwrap_or(Time::ZERO)
    }

    /// Presents per second implied by the average interval.
    pub fn rate(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

/// Renderer with no GPU behind it. Counts and times presents and can
/// summarise them as text for CLI output and logs.
#[derive(Debug)]
pub struct TextRenderer {
    presented: u64,
    last_present: Option<Instant>,
    timer: PresentTimer,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            presented: 0,
            last_present: None,
            timer: PresentTimer::new(120),
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn timer(&self) -> &PresentTimer {
        &self.timer
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Frames (presented={}) ===\n", self.presented));
        out.push_str(&format!(
            "avg interval: {}  max interval: {}  rate: {:.1}/s\n",
            self.timer.average(),
            self.timer.max(),
            self.timer.rate()
        ));
        out
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn present(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_present {
            self.timer.record(Time::from(now - last));
        }
        self.last_present = Some(now);
        self.presented += 1;
        tracing::trace!(frame = self.presented, "present");
    }
}
