use crate::time::Time;

/// Outcome of feeding one frame of wall-clock time into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Fixed steps executed for this frame.
    pub updates: u32,
    /// True when the measured frame time exceeded the cap and was cut down.
    pub clamped: bool,
    /// Value of the running-slowly flag after the last step of this frame.
    pub running_slowly: bool,
    /// `1 - accumulated / period`; 1.0 means exactly on the last completed step.
    pub interpolation: f32,
}

/// Fixed-timestep accumulator.
///
/// Wall-clock frame time is added to an accumulator which is drained in
/// whole update periods. Simulation time only ever moves by exactly one
/// period per step, so the step sequence depends on the total elapsed time
/// and not on how it was sliced into frames (up to the per-frame cap).
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    period: Time,
    max_frame_time: Time,
    accumulated: Time,
    simulation_time: Time,
    steps: u64,
    running_slowly: bool,
}

impl FixedTimestep {
    /// Default cap on a single frame's contribution to the accumulator.
    pub const DEFAULT_MAX_FRAME_TIME: Time = Time::from_millis(250);

    pub fn new(period: Time, max_frame_time: Time) -> Self {
        assert!(period > Time::ZERO, "update period must be positive");
        assert!(max_frame_time > Time::ZERO, "frame time cap must be positive");
        Self {
            period,
            max_frame_time,
            accumulated: Time::ZERO,
            simulation_time: Time::ZERO,
            steps: 0,
            running_slowly: false,
        }
    }

    pub fn period(&self) -> Time {
        self.period
    }

    pub fn set_period(&mut self, period: Time) {
        assert!(period > Time::ZERO, "update period must be positive");
        self.period = period;
    }

    pub fn max_frame_time(&self) -> Time {
        self.max_frame_time
    }

    pub fn accumulated(&self) -> Time {
        self.accumulated
    }

    pub fn simulation_time(&self) -> Time {
        self.simulation_time
    }

    /// Total fixed steps since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn running_slowly(&self) -> bool {
        self.running_slowly
    }

    /// Zero the simulation clock and the accumulator.
    pub fn reset(&mut self) {
        self.accumulated = Time::ZERO;
        self.simulation_time = Time::ZERO;
        self.steps = 0;
        self.running_slowly = false;
    }

    /// Feed one frame of elapsed time and run as many fixed steps as fit.
    ///
    /// `step` receives `(simulation_time, period, running_slowly)` for each
    /// step. Negative frame times count as zero.
    pub fn advance<F>(&mut self, frame_time: Time, mut step: F) -> FrameStep
    where
        F: FnMut(Time, Time, bool),
    {
        let clamped = frame_time > self.max_frame_time;
        let frame_time = if clamped {
            tracing::trace!(%frame_time, cap = %self.max_frame_time, "clamping frame time");
            self.max_frame_time
        } else {
            frame_time.max(Time::ZERO)
        };

        self.accumulated += frame_time;

        let mut updates = 0u32;
        while self.accumulated >= self.period {
            // Only the value after the final step is visible to the caller.
            self.running_slowly = updates > 0;
            step(self.simulation_time, self.period, self.running_slowly);
            updates += 1;
            self.steps += 1;
            self.simulation_time += self.period;
            self.accumulated -= self.period;
        }

        FrameStep {
            updates,
            clamped,
            running_slowly: self.running_slowly,
            interpolation: self.interpolation(),
        }
    }

    /// Render blend factor for the current accumulator state.
    pub fn interpolation(&self) -> f32 {
        (1.0 - self.accumulated.ratio(self.period)) as f32
    }

    /// True when the next step is far enough away to yield the CPU.
    pub fn should_sleep(&self, max_sleep_skew: Time) -> bool {
        self.accumulated + max_sleep_skew < self.period
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(Time::from_millis(20), Self::DEFAULT_MAX_FRAME_TIME)
    }
}
