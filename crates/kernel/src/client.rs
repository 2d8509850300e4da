use serde::Serialize;
use tracing::{debug, error, info};

use crate::clock::{Clock, SystemClock};
use crate::config::{ClientConfig, ConfigError};
use crate::platform::{Renderer, Window};
use crate::time::Time;
use crate::timestep::{FixedTimestep, FrameStep};

/// Error reported by a [`Game`] lifecycle hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;
pub type HookResult = Result<(), HookError>;

/// Errors that abort [`GameClient::try_run`] before the main loop.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("game initialization failed: {source}")]
    Initialize { source: HookError },
    #[error("content loading failed: {source}")]
    LoadContent { source: HookError },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Process-level outcome of [`GameClient::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    FatalError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::FatalError => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Lifecycle of the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Running,
    Stopped,
}

/// Loop flags visible to game hooks.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    running: bool,
    running_slowly: bool,
}

impl LoopControl {
    /// Ask the loop to stop. Checked once per frame, so the current frame
    /// still finishes drawing.
    pub fn exit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when the most recent step was not the first one of its frame.
    pub fn is_running_slowly(&self) -> bool {
        self.running_slowly
    }
}

/// Hooks a concrete game supplies to the loop driver. Every hook has a
/// default, so implementors only override what they need.
///
/// `update` must be a pure function of the game state and its arguments for
/// simulation to be reproducible. `draw` may read `interpolation` but must
/// never feed it back into simulation state.
pub trait Game {
    /// Set up engine-side systems. Runs after the window is shown.
    fn initialize_client(&mut self) -> HookResult {
        debug!("initializing the game client");
        Ok(())
    }

    /// Set up game-specific systems needed for first play.
    fn initialize(&mut self) -> HookResult {
        Ok(())
    }

    fn load_content(&mut self) -> HookResult {
        info!("loading game content");
        Ok(())
    }

    /// Runs after the main loop exits, and only if it was entered.
    fn unload_content(&mut self) {
        info!("unloading game content");
    }

    /// Advance the simulation by exactly `delta_time`.
    fn update(&mut self, _control: &mut LoopControl, _simulation_time: Time, _delta_time: Time) {}

    /// Render the current state. `interpolation` is 1.0 when the render
    /// moment falls exactly on the last completed step.
    fn draw(&mut self, _control: &mut LoopControl, _simulation_time: Time, _interpolation: f32) {}
}

/// Counters collected over one run of the main loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LoopStats {
    pub frames: u64,
    pub updates: u64,
    pub clamped_frames: u64,
    pub slow_frames: u64,
    pub sleeps: u64,
    pub simulation_time: Time,
}

impl LoopStats {
    fn record(&mut self, frame: &FrameStep) {
        self.frames += 1;
        self.updates += u64::from(frame.updates);
        if frame.clamped {
            self.clamped_frames += 1;
        }
        if frame.updates > 1 {
            self.slow_frames += 1;
        }
    }
}

/// Fixed-timestep game loop driver.
///
/// Borrows the window and renderer for its whole lifetime; owns the clock.
/// Simulation runs at a fixed rate through [`Game::update`] while
/// [`Game::draw`] runs once per frame with an interpolation factor.
pub struct GameClient<'a, W: ?Sized, R: ?Sized, C = SystemClock> {
    window: &'a mut W,
    renderer: &'a mut R,
    clock: C,
    timestep: FixedTimestep,
    control: LoopControl,
    state: LoopState,
    max_sleep_skew: Time,
    sleep_quantum: Time,
    sleep_enabled: bool,
    stats: LoopStats,
}

impl<'a, W, R> GameClient<'a, W, R, SystemClock>
where
    W: Window + ?Sized,
    R: Renderer + ?Sized,
{
    /// Driver on the wall clock with default tuning (50 Hz).
    pub fn new(window: &'a mut W, renderer: &'a mut R) -> Self {
        Self::with_clock(window, renderer, SystemClock::new())
    }
}

impl<'a, W, R, C> GameClient<'a, W, R, C>
where
    W: Window + ?Sized,
    R: Renderer + ?Sized,
    C: Clock,
{
    pub fn with_clock(window: &'a mut W, renderer: &'a mut R, clock: C) -> Self {
        let defaults = ClientConfig::default();
        Self {
            window,
            renderer,
            clock,
            timestep: FixedTimestep::new(defaults.update_period(), defaults.max_frame_time()),
            control: LoopControl::default(),
            state: LoopState::NotStarted,
            max_sleep_skew: defaults.max_sleep_skew(),
            sleep_quantum: defaults.sleep_quantum(),
            sleep_enabled: defaults.sleep_enabled,
            stats: LoopStats::default(),
        }
    }

    /// Apply a configuration after validating it.
    pub fn with_config(mut self, config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        self.timestep = FixedTimestep::new(config.update_period(), config.max_frame_time());
        self.max_sleep_skew = config.max_sleep_skew();
        self.sleep_quantum = config.sleep_quantum();
        self.sleep_enabled = config.sleep_enabled;
        debug!(?config, "applied client config");
        Ok(self)
    }

    /// Set how many times per second [`Game::update`] runs.
    ///
    /// Panics if `updates_per_second` is zero, or so large that the period
    /// rounds to zero nanoseconds. Use [`GameClient::with_config`] to get an
    /// error instead.
    pub fn set_update_frequency(&mut self, updates_per_second: u32) {
        assert!(updates_per_second > 0, "update frequency must be positive");
        let period = Time::from_secs_f64(1.0 / f64::from(updates_per_second));
        assert!(
            period > Time::ZERO,
            "update frequency {updates_per_second} Hz is too fast for nanosecond precision"
        );
        self.timestep.set_period(period);
        debug!(%period, "setting the update frequency");
    }

    pub fn update_period(&self) -> Time {
        self.timestep.period()
    }

    pub fn max_sleep_skew(&self) -> Time {
        self.max_sleep_skew
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    pub fn is_running_slowly(&self) -> bool {
        self.control.is_running_slowly()
    }

    /// Stats from the most recent run.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run the game to completion and report a process status. Errors are
    /// logged rather than returned.
    pub fn run<G: Game + ?Sized>(&mut self, game: &mut G) -> ExitStatus {
        match self.try_run(game) {
            Ok(_) => ExitStatus::Success,
            Err(e) => {
                error!(error = %e, "game client aborted");
                ExitStatus::FatalError
            }
        }
    }

    /// Show the window, initialize, load content, run the main loop, then
    /// unload. The main loop is only entered if every startup hook succeeds.
    pub fn try_run<G: Game + ?Sized>(&mut self, game: &mut G) -> Result<LoopStats, ClientError> {
        self.window.show();

        game.initialize_client()
            .and_then(|()| game.initialize())
            .map_err(|source| ClientError::Initialize { source })?;

        game.load_content()
            .map_err(|source| ClientError::LoadContent { source })?;

        let stats = self.run_main_loop(game);
        game.unload_content();
        Ok(stats)
    }

    fn run_main_loop<G: Game + ?Sized>(&mut self, game: &mut G) -> LoopStats {
        let _span = tracing::info_span!("main_loop").entered();
        info!(period = %self.timestep.period(), "entering the main game loop");

        self.timestep.reset();
        self.stats = LoopStats::default();
        self.control = LoopControl {
            running: true,
            running_slowly: false,
        };
        self.state = LoopState::Running;

        let mut system_time = self.clock.now();

        while self.control.running && !self.window.did_user_quit() {
            self.window.process_messages();

            let now = self.clock.now();
            let frame_time = now - system_time;
            system_time = now;

            let control = &mut self.control;
            let frame = self.timestep.advance(frame_time, |simulation_time, delta, slow| {
                control.running_slowly = slow;
                game.update(control, simulation_time, delta);
            });
            self.stats.record(&frame);

            game.draw(
                &mut self.control,
                self.timestep.simulation_time(),
                frame.interpolation,
            );
            self.renderer.present();

            if self.sleep_enabled && self.timestep.should_sleep(self.max_sleep_skew) {
                self.clock.sleep(self.sleep_quantum);
                self.stats.sleeps += 1;
            }
        }

        self.control.running = false;
        self.state = LoopState::Stopped;
        self.stats.simulation_time = self.timestep.simulation_time();

        info!(
            frames = self.stats.frames,
            updates = self.stats.updates,
            slow_frames = self.stats.slow_frames,
            clamped_frames = self.stats.clamped_frames,
            simulation_time = %self.stats.simulation_time,
            "game has left the main game loop"
        );
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ScriptedClock;

    /// Window that quits after a fixed number of message pumps.
    #[derive(Default)]
    struct TestWindow {
        shown: bool,
        pumps: u32,
        limit: u32,
    }

    impl TestWindow {
        fn frames(limit: u32) -> Self {
            Self {
                limit,
                ..Self::default()
            }
        }
    }

    impl Window for TestWindow {
        fn show(&mut self) {
            self.shown = true;
        }

        fn process_messages(&mut self) {
            self.pumps += 1;
        }

        fn did_user_quit(&self) -> bool {
            self.pumps >= self.limit
        }
    }

    #[derive(Default)]
    struct TestRenderer {
        presented: u32,
    }

    impl Renderer for TestRenderer {
        fn present(&mut self) {
            self.presented += 1;
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Drawn {
        updates_before: usize,
        simulation_time: Time,
        interpolation: f32,
        slow: bool,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        updates: Vec<(Time, Time)>,
        draws: Vec<Drawn>,
        fail_init_client: bool,
        fail_init: bool,
        fail_load: bool,
        exit_after_updates: Option<usize>,
    }

    impl Game for Recorder {
        fn initialize_client(&mut self) -> HookResult {
            self.calls.push("initialize_client");
            if self.fail_init_client {
                return Err("no client".into());
            }
            Ok(())
        }

        fn initialize(&mut self) -> HookResult {
            self.calls.push("initialize");
            if self.fail_init {
                return Err("no init".into());
            }
            Ok(())
        }

        fn load_content(&mut self) -> HookResult {
            self.calls.push("load_content");
            if self.fail_load {
                return Err("missing assets".into());
            }
            Ok(())
        }

        fn unload_content(&mut self) {
            self.calls.push("unload_content");
        }

        fn update(&mut self, control: &mut LoopControl, simulation_time: Time, delta_time: Time) {
            self.updates.push((simulation_time, delta_time));
            if Some(self.updates.len()) == self.exit_after_updates {
                control.exit();
            }
        }

        fn draw(&mut self, control: &mut LoopControl, simulation_time: Time, interpolation: f32) {
            self.draws.push(Drawn {
                updates_before: self.updates.len(),
                simulation_time,
                interpolation,
                slow: control.is_running_slowly(),
            });
        }
    }

    fn run_scripted(game: &mut Recorder, frames_ms: &[i64]) -> (ExitStatus, LoopStats) {
        let mut window = TestWindow::frames(frames_ms.len() as u32);
        let mut renderer = TestRenderer::default();
        let clock = ScriptedClock::from_millis(frames_ms);
        let mut client = GameClient::with_clock(&mut window, &mut renderer, clock);
        let status = client.run(game);
        let stats = client.stats();
        if status.is_success() {
            assert_eq!(client.state(), LoopState::Stopped);
        } else {
            assert_eq!(client.state(), LoopState::NotStarted);
        }
        assert!(!client.is_running());
        drop(client);
        assert!(window.shown);
        assert_eq!(u64::from(renderer.presented), stats.frames);
        (status, stats)
    }

    #[test]
    fn defaults_are_fifty_hz() {
        let mut window = TestWindow::default();
        let mut renderer = TestRenderer::default();
        let client = GameClient::new(&mut window, &mut renderer);
        assert_eq!(client.update_period(), Time::from_millis(20));
        assert_eq!(client.max_sleep_skew(), Time::from_millis(10));
        assert_eq!(client.state(), LoopState::NotStarted);
        assert!(!client.is_running_slowly());
    }

    #[test]
    fn set_update_frequency_recomputes_period() {
        let mut window = TestWindow::default();
        let mut renderer = TestRenderer::default();
        let mut client = GameClient::new(&mut window, &mut renderer);
        client.set_update_frequency(100);
        assert_eq!(client.update_period(), Time::from_millis(10));
        client.set_update_frequency(1);
        assert_eq!(client.update_period(), Time::from_millis(1000));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn zero_update_frequency_panics() {
        let mut window = TestWindow::default();
        let mut renderer = TestRenderer::default();
        let mut client = GameClient::new(&mut window, &mut renderer);
        client.set_update_frequency(0);
    }

    #[test]
    fn lifecycle_order_on_success() {
        let mut game = Recorder::default();
        let (status, _) = run_scripted(&mut game, &[20]);
        assert_eq!(status, ExitStatus::Success);
        assert_eq!(
            game.calls,
            vec!["initialize_client", "initialize", "load_content", "unload_content"]
        );
    }

    #[test]
    fn failed_client_init_skips_everything_else() {
        let mut game = Recorder {
            fail_init_client: true,
            ..Recorder::default()
        };
        let (status, stats) = run_scripted(&mut game, &[20]);
        assert_eq!(status, ExitStatus::FatalError);
        assert_eq!(game.calls, vec!["initialize_client"]);
        assert_eq!(stats.frames, 0);
    }

    #[test]
    fn failed_init_skips_load_content() {
        let mut game = Recorder {
            fail_init: true,
            ..Recorder::default()
        };
        let (status, _) = run_scripted(&mut game, &[20]);
        assert_eq!(status, ExitStatus::FatalError);
        assert_eq!(game.calls, vec!["initialize_client", "initialize"]);
        assert!(game.updates.is_empty());
    }

    #[test]
    fn failed_load_never_enters_loop_or_unloads() {
        let mut game = Recorder {
            fail_load: true,
            ..Recorder::default()
        };
        let (status, _) = run_scripted(&mut game, &[20, 20]);
        assert_eq!(status, ExitStatus::FatalError);
        assert_eq!(
            game.calls,
            vec!["initialize_client", "initialize", "load_content"]
        );
        assert!(game.draws.is_empty());
    }

    #[test]
    fn try_run_reports_which_stage_failed() {
        let mut window = TestWindow::frames(1);
        let mut renderer = TestRenderer::default();
        let mut client = GameClient::with_clock(&mut window, &mut renderer, ScriptedClock::default());
        let mut game = Recorder {
            fail_load: true,
            ..Recorder::default()
        };
        let err = client.try_run(&mut game).unwrap_err();
        assert!(matches!(err, ClientError::LoadContent { .. }));
        assert!(err.to_string().contains("missing assets"));
    }

    #[test]
    fn fifty_hz_scenario_through_the_loop() {
        let mut game = Recorder::default();
        let (_, stats) = run_scripted(&mut game, &[50, 10, 20]);

        let per_frame: Vec<usize> = game.draws.iter().map(|d| d.updates_before).collect();
        assert_eq!(per_frame, vec![2, 3, 4]);
        assert_eq!(stats.updates, 4);
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.simulation_time, Time::from_millis(80));

        let expected: Vec<Time> = (0..4).map(|i| Time::from_millis(20 * i)).collect();
        let got: Vec<Time> = game.updates.iter().map(|(t, _)| *t).collect();
        assert_eq!(got, expected);
        assert!(game.updates.iter().all(|(_, dt)| *dt == Time::from_millis(20)));
    }

    #[test]
    fn draw_sees_running_slowly_after_catch_up() {
        let mut game = Recorder::default();
        let (_, stats) = run_scripted(&mut game, &[50, 20, 5]);
        let slow: Vec<bool> = game.draws.iter().map(|d| d.slow).collect();
        // Frame 3 runs no step, so the flag keeps its last value.
        assert_eq!(slow, vec![true, false, false]);
        assert_eq!(stats.slow_frames, 1);
    }

    #[test]
    fn draw_gets_simulation_time_and_interpolation() {
        let mut game = Recorder::default();
        run_scripted(&mut game, &[25, 10]);
        assert_eq!(game.draws[0].simulation_time, Time::from_millis(20));
        assert_eq!(game.draws[0].interpolation, 0.75);
        assert_eq!(game.draws[1].simulation_time, Time::from_millis(20));
        assert_eq!(game.draws[1].interpolation, 0.25);
        assert!(game
            .draws
            .iter()
            .all(|d| d.interpolation > 0.0 && d.interpolation <= 1.0));
    }

    #[test]
    fn stall_is_clamped_in_the_loop() {
        let mut game = Recorder::default();
        let (_, stats) = run_scripted(&mut game, &[2_000]);
        assert_eq!(stats.clamped_frames, 1);
        assert_eq!(stats.updates, 12);
    }

    #[test]
    fn exit_from_update_stops_after_current_frame() {
        let mut game = Recorder {
            exit_after_updates: Some(1),
            ..Recorder::default()
        };
        let mut window = TestWindow::frames(100);
        let mut renderer = TestRenderer::default();
        let clock = ScriptedClock::from_millis(&[60, 20, 20]);
        let mut client = GameClient::with_clock(&mut window, &mut renderer, clock);
        assert!(client.run(&mut game).is_success());
        // The rest of the frame's steps still run, then the loop stops.
        assert_eq!(game.updates.len(), 3);
        assert_eq!(game.draws.len(), 1);
        assert_eq!(game.calls.last(), Some(&"unload_content"));
    }

    #[test]
    fn sleeps_only_when_next_step_is_far() {
        let mut game = Recorder::default();
        // Accumulator after each frame: 0, 15, 5 (ms). Skew is 10ms.
        let (_, stats) = run_scripted(&mut game, &[20, 15, 10]);
        assert_eq!(stats.sleeps, 2);
    }

    #[test]
    fn sleeping_does_not_change_simulation() {
        let frames = [3, 17, 44, 9, 21, 2, 300, 16];
        let mut with_sleep = Recorder::default();
        run_scripted(&mut with_sleep, &frames);

        let mut without_sleep = Recorder::default();
        let mut window = TestWindow::frames(frames.len() as u32);
        let mut renderer = TestRenderer::default();
        let config = ClientConfig {
            sleep_enabled: false,
            ..ClientConfig::default()
        };
        let mut client = GameClient::with_clock(&mut window, &mut renderer, ScriptedClock::from_millis(&frames))
            .with_config(&config)
            .unwrap();
        client.run(&mut without_sleep);
        assert_eq!(client.stats().sleeps, 0);
        assert_eq!(client.clock().sleeps(), 0);

        assert_eq!(with_sleep.updates, without_sleep.updates);
    }

    #[test]
    #[should_panic(expected = "too fast for nanosecond precision")]
    fn sub_nanosecond_period_panics_with_frequency_message() {
        let mut window = TestWindow::default();
        let mut renderer = TestRenderer::default();
        let mut client = GameClient::new(&mut window, &mut renderer);
        client.set_update_frequency(3_000_000_000);
    }

    #[test]
    fn with_config_reports_out_of_range_values() {
        let bad = [
            ClientConfig {
                update_frequency: 3_000_000_000,
                ..ClientConfig::default()
            },
            ClientConfig {
                max_sleep_skew_secs: 1e12,
                ..ClientConfig::default()
            },
        ];
        for config in &bad {
            let mut window = TestWindow::default();
            let mut renderer = TestRenderer::default();
            let result = GameClient::new(&mut window, &mut renderer).with_config(config);
            assert!(matches!(result, Err(ClientError::Config(_))));
        }
    }

    #[test]
    fn with_config_rejects_invalid() {
        let mut window = TestWindow::default();
        let mut renderer = TestRenderer::default();
        let config = ClientConfig {
            update_frequency: 0,
            ..ClientConfig::default()
        };
        let result = GameClient::new(&mut window, &mut renderer).with_config(&config);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn with_config_applies_rate_and_cap() {
        let mut window = TestWindow::frames(1);
        let mut renderer = TestRenderer::default();
        let config = ClientConfig {
            update_frequency: 100,
            max_frame_time_secs: 0.05,
            ..ClientConfig::default()
        };
        let mut client = GameClient::with_clock(&mut window, &mut renderer, ScriptedClock::from_millis(&[500]))
            .with_config(&config)
            .unwrap();
        assert_eq!(client.update_period(), Time::from_millis(10));
        let stats = client.try_run(&mut Recorder::default()).unwrap();
        assert_eq!(stats.updates, 5);
        assert_eq!(stats.clamped_frames, 1);
    }

    #[test]
    fn exit_status_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::FatalError.code(), 1);
        assert!(!ExitStatus::FatalError.is_success());
    }
}
