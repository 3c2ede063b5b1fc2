//! Countdown engine for the widget.
//!
//! The engine owns the authoritative remaining-seconds count and the one
//! second cadence that decrements it. It follows the bubbletea-rs message
//! pattern: the cadence is a [`bubbletea_rs::tick`] command that delivers a
//! [`TickMsg`] back to [`Model::update`], which applies one decrement and
//! schedules the next tick.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::audio::Silent;
//! use countdown_widget::timer::{new, Phase};
//!
//! let mut engine = new(Box::new(Silent));
//! assert_eq!(engine.phase(), Phase::Idle);
//!
//! // Zero is refused silently: no state change, no cadence.
//! assert!(engine.start(0).is_none());
//! assert_eq!(engine.phase(), Phase::Idle);
//!
//! let _cadence = engine.start(5).expect("cadence command");
//! assert_eq!(engine.phase(), Phase::Running);
//! assert_eq!(engine.remaining(), 5);
//! ```
//!
//! # Cadence ownership
//!
//! Every state transition bumps the engine's tag and, if the countdown is
//! still running and not paused, issues a fresh tick command carrying the
//! new tag. Ticks from an earlier cadence carry an old tag and are dropped,
//! so at most one cadence ever decrements the count no matter how quickly
//! pause/resume/cancel/start are toggled.

use crate::audio::AudioPlayer;
use crate::breakdown::TimeBreakdown;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

// Internal ID management for engine instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// The default cadence period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Lifecycle of a countdown.
///
/// ```text
/// Idle --start--> Running --pause--> Paused --resume--> Running
/// Running --last tick--> Ended
/// Running | Paused | Ended --cancel/reset--> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing to count down. Initial state and the state after any reset.
    #[default]
    Idle,
    /// Counting down.
    Running,
    /// Running but holding the count.
    Paused,
    /// Reached zero. Terminal until reset.
    Ended,
}

/// Flag view of the engine state, as consumed by the rendering layer.
///
/// `ended` implies `!running` and a zero count; `paused` implies `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownState {
    pub total_seconds_remaining: u64,
    pub running: bool,
    pub paused: bool,
    pub ended: bool,
}

/// What a single tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A second elapsed and time remains. The tick sound was played.
    Tick,
    /// The count reached zero. The alarm was played.
    Completed,
}

/// Message delivered by the cadence once per period.
///
/// Only the engine with a matching `id` handles it, and only if the tag is
/// that of its live cadence.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The engine that scheduled this tick.
    pub id: i64,
    /// Cadence generation; stale generations are rejected.
    tag: i64,
}

/// Sent once when a countdown reaches zero.
///
/// Embedding models can react to completion here instead of polling
/// [`Model::ended`].
///
/// ```rust
/// use countdown_widget::timer::CompletedMsg;
/// use bubbletea_rs::Msg;
///
/// fn on_message(msg: &Msg, engine_id: i64) -> bool {
///     matches!(msg.downcast_ref::<CompletedMsg>(), Some(done) if done.id == engine_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedMsg {
    /// The engine that finished.
    pub id: i64,
}

/// Countdown engine.
#[derive(Debug)]
pub struct Model {
    /// The cadence period. One period elapsing removes one second.
    pub interval: Duration,

    remaining: u64,
    phase: Phase,
    id: i64,
    tag: i64,
    audio: Box<dyn AudioPlayer>,
}

/// Creates an idle engine with a one second cadence.
pub fn new(audio: Box<dyn AudioPlayer>) -> Model {
    new_with_interval(audio, DEFAULT_INTERVAL)
}

/// Creates an idle engine with a custom cadence period.
///
/// The count still drops by exactly one per tick; a shorter interval only
/// makes the countdown run faster, which is useful for demos.
pub fn new_with_interval(audio: Box<dyn AudioPlayer>, interval: Duration) -> Model {
    Model {
        interval,
        remaining: 0,
        phase: Phase::Idle,
        id: next_id(),
        tag: 0,
        audio,
    }
}

impl Model {
    /// Unique identifier of this engine instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left on the count.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Days/hours/minutes/seconds of the remaining count.
    pub fn breakdown(&self) -> TimeBreakdown {
        TimeBreakdown::from_seconds(self.remaining)
    }

    /// Running or paused.
    pub fn running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    /// Started and currently holding the count.
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Reached zero and waiting for a reset.
    pub fn ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Never started, or cancelled since.
    pub fn idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Snapshot of the count and its flags for rendering.
    ///
    /// ```rust
    /// use countdown_widget::audio::Silent;
    /// use countdown_widget::timer;
    ///
    /// let mut engine = timer::new(Box::new(Silent));
    /// engine.start(90);
    /// engine.pause();
    /// let state = engine.state();
    /// assert_eq!(state.total_seconds_remaining, 90);
    /// assert!(state.running && state.paused && !state.ended);
    /// ```
    pub fn state(&self) -> CountdownState {
        CountdownState {
            total_seconds_remaining: self.remaining,
            running: self.running(),
            paused: self.paused(),
            ended: self.ended(),
        }
    }

    /// Starts counting down from `initial_seconds`.
    ///
    /// Zero is refused without any state change and no cadence is
    /// established. Starting again while a countdown is active replaces it;
    /// the old cadence is invalidated.
    pub fn start(&mut self, initial_seconds: u64) -> Option<Cmd> {
        if initial_seconds == 0 {
            debug!(engine = self.id, "ignoring start with zero duration");
            return None;
        }
        if self.phase == Phase::Ended {
            self.silence();
        }
        self.remaining = initial_seconds;
        self.phase = Phase::Running;
        info!(engine = self.id, seconds = initial_seconds, "countdown started");
        self.cadence()
    }

    /// Applies one elapsed second.
    ///
    /// Does nothing unless the countdown is running and not paused.
    pub fn tick(&mut self) -> Option<Signal> {
        if self.phase != Phase::Running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.phase = Phase::Ended;
            // Stop the cadence.
            self.tag += 1;
            info!(engine = self.id, "countdown ended");
            if let Err(e) = self.audio.play_alarm() {
                warn!(engine = self.id, error = %e, "alarm sound failed");
            }
            return Some(Signal::Completed);
        }

        debug!(engine = self.id, remaining = self.remaining, "tick");
        if let Err(e) = self.audio.play_tick() {
            debug!(engine = self.id, error = %e, "tick sound failed");
        }
        Some(Signal::Tick)
    }

    /// Holds the count. No-op unless running and not paused.
    pub fn pause(&mut self) -> Option<Cmd> {
        if self.phase != Phase::Running {
            return None;
        }
        self.phase = Phase::Paused;
        info!(engine = self.id, remaining = self.remaining, "countdown paused");
        self.cadence()
    }

    /// Continues a paused count. No-op unless paused.
    pub fn resume(&mut self) -> Option<Cmd> {
        if self.phase != Phase::Paused {
            return None;
        }
        self.phase = Phase::Running;
        info!(engine = self.id, remaining = self.remaining, "countdown resumed");
        self.cadence()
    }

    /// Pauses a running count or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Option<Cmd> {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::Ended => None,
        }
    }

    /// Stops everything and returns to a zeroed Idle state.
    ///
    /// Safe to call from any phase, any number of times.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Idle {
            info!(engine = self.id, "countdown reset");
        }
        self.remaining = 0;
        self.phase = Phase::Idle;
        self.tag += 1;
        self.silence();
    }

    /// Same as [`Model::cancel`]; the name used after a countdown ended.
    pub fn reset(&mut self) {
        self.cancel()
    }

    /// Handles a cadence message. Returns the next tick while the countdown
    /// continues, and a [`CompletedMsg`] command for the tick that ends it.
    pub fn handle_tick(&mut self, msg: &TickMsg) -> Option<Cmd> {
        if msg.id != self.id {
            return None;
        }
        // A tag other than the live one belongs to a cadence that was
        // cancelled by a pause, reset or restart.
        if msg.tag != self.tag {
            debug!(engine = self.id, tag = msg.tag, live = self.tag, "dropping stale tick");
            return None;
        }

        match self.tick() {
            Some(Signal::Tick) if self.phase == Phase::Running => Some(self.tick_cmd()),
            Some(Signal::Completed) => Some(self.completed_cmd()),
            _ => None,
        }
    }

    /// Forwards [`TickMsg`]s to [`Model::handle_tick`]; ignores everything else.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            return self.handle_tick(tick_msg);
        }
        None
    }

    /// Invalidates the current cadence and starts a new one if the count
    /// should keep moving.
    fn cadence(&mut self) -> Option<Cmd> {
        self.tag += 1;
        if self.phase == Phase::Running {
            Some(self.tick_cmd())
        } else {
            None
        }
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn completed_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompletedMsg { id }) as Msg
        })
    }

    fn silence(&mut self) {
        if let Err(e) = self.audio.stop_alarm() {
            warn!(engine = self.id, error = %e, "failed to stop alarm");
        }
    }

    #[cfg(test)]
    pub(crate) fn live_tick(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::{Counts, Recorder};
    use crate::audio::Silent;
    use crate::input::{DurationInput, InputSpec, TargetDateInput};
    use chrono::{Duration as ChronoDuration, Local};

    fn recorded() -> (Model, Recorder) {
        let recorder = Recorder::default();
        (new(Box::new(recorder.clone())), recorder)
    }

    /// Delivers the live cadence's tick `n` times.
    fn run_ticks(engine: &mut Model, n: usize) {
        for _ in 0..n {
            let msg = engine.live_tick();
            engine.handle_tick(&msg);
        }
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = new(Box::new(Silent));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.state(), CountdownState::default());
        assert_eq!(engine.interval, DEFAULT_INTERVAL);
        assert!(engine.id() > 0);
    }

    #[test]
    fn test_unique_ids() {
        let a = new(Box::new(Silent));
        let b = new(Box::new(Silent));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_start_zero_is_noop() {
        let mut engine = new(Box::new(Silent));
        assert!(engine.start(0).is_none());
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.tag, 0, "no cadence should be established");
    }

    #[test]
    fn test_start_sets_running_state() {
        let mut engine = new(Box::new(Silent));
        assert!(engine.start(10).is_some());
        assert_eq!(
            engine.state(),
            CountdownState {
                total_seconds_remaining: 10,
                running: true,
                paused: false,
                ended: false,
            }
        );
    }

    #[test]
    fn test_five_second_scenario() {
        let (mut engine, recorder) = recorded();
        let secs = InputSpec::Duration(DurationInput::new(0, 0, 0, 5))
            .resolve(Local::now())
            .expect("resolves");
        engine.start(secs);

        run_ticks(&mut engine, 4);
        assert_eq!(engine.remaining(), 1);
        assert_eq!(engine.phase(), Phase::Running);

        let last = engine.live_tick();
        assert!(engine.handle_tick(&last).is_some(), "completion is announced");
        let after = engine.live_tick();
        assert!(engine.handle_tick(&after).is_none(), "cadence stops at zero");

        assert_eq!(engine.phase(), Phase::Ended);
        assert_eq!(engine.remaining(), 0);
        let counts = recorder.snapshot();
        assert_eq!(counts.alarms, 1);
        assert_eq!(counts.ticks, 4);
    }

    #[test]
    fn test_ended_invariant() {
        let mut engine = new(Box::new(Silent));
        engine.start(1);
        assert_eq!(engine.tick(), Some(Signal::Completed));
        let state = engine.state();
        assert!(state.ended);
        assert!(!state.running);
        assert!(!state.paused);
        assert_eq!(state.total_seconds_remaining, 0);
        // Further ticks never go below zero or fire again.
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining(), 0);
    }

    #[tokio::test]
    async fn test_completion_sends_completed_msg() {
        let mut engine = new(Box::new(Silent));
        engine.start(1);
        let last = engine.live_tick();
        let cmd = engine.handle_tick(&last).expect("completion command");

        let msg = cmd.await.expect("completion message");
        let done = msg.downcast_ref::<CompletedMsg>().expect("CompletedMsg");
        assert_eq!(done.id, engine.id());
        assert!(msg.downcast_ref::<TickMsg>().is_none());
    }

    #[test]
    fn test_pause_resume_loses_no_ticks() {
        let mut engine = new(Box::new(Silent));
        engine.start(10);
        run_ticks(&mut engine, 3);
        let before_pause = engine.live_tick();

        assert!(engine.pause().is_none());
        assert!(engine.paused());
        assert!(engine.running());

        // The pre-pause cadence fires while paused: dropped.
        assert!(engine.handle_tick(&before_pause).is_none());
        assert_eq!(engine.remaining(), 7);

        assert!(engine.resume().is_some());
        run_ticks(&mut engine, 6);
        assert_eq!(engine.remaining(), 1);
        assert_eq!(engine.phase(), Phase::Running);

        run_ticks(&mut engine, 1);
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.phase(), Phase::Ended);
    }

    #[test]
    fn test_paused_tick_does_not_decrement() {
        let mut engine = new(Box::new(Silent));
        engine.start(3);
        engine.pause();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining(), 3);
    }

    #[test]
    fn test_stale_cadence_is_rejected_after_restart() {
        let mut engine = new(Box::new(Silent));
        engine.start(30);
        let old = engine.live_tick();
        engine.start(20);
        assert!(engine.handle_tick(&old).is_none());
        assert_eq!(engine.remaining(), 20);

        run_ticks(&mut engine, 1);
        assert_eq!(engine.remaining(), 19);
    }

    #[test]
    fn test_rapid_toggle_keeps_one_cadence() {
        let mut engine = new(Box::new(Silent));
        engine.start(100);
        let mut issued = vec![engine.live_tick()];
        for _ in 0..5 {
            engine.toggle_pause();
            issued.push(engine.live_tick());
            engine.toggle_pause();
            issued.push(engine.live_tick());
        }
        // Every cadence that was ever issued fires once.
        for msg in &issued {
            engine.handle_tick(msg);
        }
        assert_eq!(engine.remaining(), 99, "only the live cadence may decrement");
    }

    #[test]
    fn test_tick_for_other_engine_is_ignored() {
        let mut a = new(Box::new(Silent));
        let mut b = new(Box::new(Silent));
        a.start(5);
        b.start(5);
        let foreign = b.live_tick();
        assert!(a.handle_tick(&foreign).is_none());
        assert_eq!(a.remaining(), 5);
    }

    #[test]
    fn test_update_ignores_unrelated_messages() {
        let mut engine = new(Box::new(Silent));
        engine.start(5);
        assert!(engine.update(Box::new("not a tick")).is_none());
        assert_eq!(engine.remaining(), 5);

        let msg = engine.live_tick();
        assert!(engine.update(Box::new(msg)).is_some());
        assert_eq!(engine.remaining(), 4);
    }

    #[test]
    fn test_cancel_is_idempotent_from_every_phase() {
        for phase in [Phase::Idle, Phase::Running, Phase::Paused, Phase::Ended] {
            let (mut engine, recorder) = recorded();
            match phase {
                Phase::Idle => {}
                Phase::Running => {
                    engine.start(10);
                }
                Phase::Paused => {
                    engine.start(10);
                    engine.pause();
                }
                Phase::Ended => {
                    engine.start(1);
                    engine.tick();
                }
            }
            assert_eq!(engine.phase(), phase);

            engine.cancel();
            let once = engine.state();
            engine.cancel();
            assert_eq!(engine.state(), once);
            assert_eq!(once, CountdownState::default());
            assert_eq!(engine.phase(), Phase::Idle);
            assert!(recorder.snapshot().stops >= 2, "alarm silenced on every cancel");
        }
    }

    #[test]
    fn test_cancel_stops_cadence() {
        let mut engine = new(Box::new(Silent));
        engine.start(10);
        let live = engine.live_tick();
        engine.cancel();
        assert!(engine.handle_tick(&live).is_none());
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_pause_while_idle_is_noop() {
        let mut engine = new(Box::new(Silent));
        let before = engine.state();
        assert!(engine.pause().is_none());
        assert!(engine.resume().is_none());
        assert!(engine.toggle_pause().is_none());
        assert_eq!(engine.state(), before);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_pause_after_end_is_noop() {
        let mut engine = new(Box::new(Silent));
        engine.start(1);
        engine.tick();
        assert!(engine.toggle_pause().is_none());
        assert_eq!(engine.phase(), Phase::Ended);
    }

    #[test]
    fn test_past_target_date_leaves_engine_idle() {
        let mut engine = new(Box::new(Silent));
        let now = Local::now();
        let spec = InputSpec::TargetDate(TargetDateInput::new(now - ChronoDuration::minutes(5)));
        if let Some(secs) = spec.resolve(now) {
            engine.start(secs);
        }
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_audio_failures_are_ignored() {
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut engine = new(Box::new(recorder.clone()));
        engine.start(2);
        assert_eq!(engine.tick(), Some(Signal::Tick));
        assert_eq!(engine.tick(), Some(Signal::Completed));
        engine.reset();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(
            recorder.snapshot(),
            Counts {
                ticks: 1,
                alarms: 1,
                stops: 1,
            }
        );
    }

    #[test]
    fn test_restart_after_end_silences_alarm() {
        let (mut engine, recorder) = recorded();
        engine.start(1);
        engine.tick();
        engine.start(3);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(recorder.snapshot().stops, 1);
    }
}
