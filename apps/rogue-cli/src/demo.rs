//! Demo game used by the CLI: a marker that tours an oriented plane one
//! cell per fixed step.

use glam::Vec3;
use serde::Serialize;
use tracing::info;

use rogue_common::{Axis, PlaneIter, Point};
use rogue_kernel::{Game, HookResult, LoopControl, Time};
use rogue_render::Interpolated;

/// What `draw` saw on one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Steps run since the previous draw.
    pub updates: u64,
    pub simulation_time: Time,
    pub interpolation: f32,
    pub running_slowly: bool,
    pub cell: Point,
    pub drawn: Vec3,
}

pub struct Wanderer {
    axis: Axis,
    side: i32,
    depth: i32,
    tour: PlaneIter,
    cell: Point,
    steps: u64,
    steps_at_last_draw: u64,
    max_steps: Option<u64>,
    drawn: Interpolated<Vec3>,
    frames: Vec<FrameReport>,
}

impl Wanderer {
    pub fn new(axis: Axis, side: i32) -> Self {
        Self {
            axis,
            side,
            depth: 0,
            tour: PlaneIter::new(axis, 0, side, side),
            cell: Point::ZERO,
            steps: 0,
            steps_at_last_draw: 0,
            max_steps: None,
            drawn: Interpolated::new(Vec3::ZERO),
            frames: Vec::new(),
        }
    }

    /// Stop the loop once this many steps have run.
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn cell(&self) -> Point {
        self.cell
    }

    pub fn frames(&self) -> &[FrameReport] {
        &self.frames
    }

    fn next_cell(&mut self) -> Point {
        if let Some(p) = self.tour.next() {
            return p;
        }
        self.depth += 1;
        self.tour = PlaneIter::new(self.axis, self.depth, self.side, self.side);
        // A fresh plane of a positive side always has a first cell.
        self.tour.next().unwrap_or(self.cell)
    }
}

impl Game for Wanderer {
    fn initialize(&mut self) -> HookResult {
        if self.side <= 0 {
            return Err(format!("plane side must be positive, got {}", self.side).into());
        }
        self.cell = self.next_cell();
        self.drawn = Interpolated::new(glam::IVec3::from(self.cell).as_vec3());
        info!(axis = %self.axis, side = self.side, start = %self.cell, "wanderer ready");
        Ok(())
    }

    fn update(&mut self, control: &mut LoopControl, _simulation_time: Time, _delta_time: Time) {
        self.cell = self.next_cell();
        self.drawn.push(glam::IVec3::from(self.cell).as_vec3());
        self.steps += 1;
        if self.max_steps.is_some_and(|max| self.steps >= max) {
            control.exit();
        }
    }

    fn draw(&mut self, control: &mut LoopControl, simulation_time: Time, interpolation: f32) {
        self.frames.push(FrameReport {
            frame: self.frames.len() as u64,
            updates: self.steps - self.steps_at_last_draw,
            simulation_time,
            interpolation,
            running_slowly: control.is_running_slowly(),
            cell: self.cell,
            drawn: self.drawn.sample(interpolation),
        });
        self.steps_at_last_draw = self.steps;
    }
}

/// Deterministic pseudo-random frame times in milliseconds: mostly 1..=40ms
/// with an occasional 300ms stall.
pub fn jitter_frames(seed: u64, count: usize) -> Vec<i64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = splitmix64(state);
            if state % 97 == 0 {
                300
            } else {
                1 + (state % 40) as i64
            }
        })
        .collect()
}

fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
