//! Frame-driving session around a field engine.
//!
//! [`AnimationSession`] owns one engine and decides, tick by tick, whether
//! it advances. The host feeds it the outside world as discrete signals:
//! pointer samples, resize notices, visibility flips, section activation.
//! The session never reads a clock of its own; every deadline comes from
//! the `Instant` the caller passes to [`AnimationSession::tick`], which
//! keeps the whole schedule deterministic under test.
//!
//! Signal handling follows three rules:
//! - Pointer samples coalesce: at most one is pending, and it is the
//!   first received since the last delivery. Later samples are dropped,
//!   not queued, so a backlogged session never replays stale motion.
//! - Resize settles before it applies: each notice re-arms a 250 ms
//!   deadline, and only a deadline that passes with no further notice
//!   reaches the engine.
//! - A due resize applies even while hidden. The deadline is a timer,
//!   not a frame, so hiding the page must not hold an old extent alive.

use std::time::{Duration, Instant};

use constel_core::error::EngineError;
use constel_core::{Extent, FieldEngine};
use glam::DVec2;

/// Quiet period a resize must survive before reaching the engine.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created or stopped; ticks are no-ops.
    Idle,
    /// Started; ticks advance the engine when nothing gates them.
    Running,
}

/// What a single [`AnimationSession::tick`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not running.
    Idle,
    /// The engine advanced one frame.
    Stepped,
    /// The session is hidden; the frame was skipped.
    SkippedHidden,
    /// The engine reports itself inactive; the frame was skipped.
    SkippedInactive,
}

/// Drives a [`FieldEngine`] from host signals and a caller-supplied clock.
pub struct AnimationSession<E> {
    engine: E,
    phase: SessionPhase,
    visible: bool,
    pending_pointer: Option<DVec2>,
    pending_resize: Option<(Extent, Instant)>,
    frames: u64,
}

impl<E: FieldEngine> AnimationSession<E> {
    /// Wraps an engine in an idle, visible session.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            phase: SessionPhase::Idle,
            visible: true,
            pending_pointer: None,
            pending_resize: None,
            frames: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Frames actually stepped since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Starts ticking. Starting a running session changes nothing.
    pub fn start(&mut self) {
        self.phase = SessionPhase::Running;
    }

    /// Stops ticking and drops undelivered signals. The engine keeps its
    /// state, so a later [`start`](Self::start) resumes where it left off.
    pub fn stop(&mut self) {
        self.phase = SessionPhase::Idle;
        self.pending_pointer = None;
        self.pending_resize = None;
    }

    /// Records a pointer sample for the next stepped frame.
    ///
    /// While one sample is already pending it stays pending; the new one
    /// is dropped.
    pub fn pointer_moved(&mut self, pos: DVec2) {
        if self.pending_pointer.is_none() {
            self.pending_pointer = Some(pos);
        }
    }

    /// Forwards pointer departure immediately and discards any pending
    /// sample, so a stale position cannot resurrect the force next frame.
    pub fn pointer_left(&mut self) {
        self.pending_pointer = None;
        self.engine.pointer_left();
    }

    /// Notes a new extent and re-arms the settle deadline. Only the last
    /// extent of a burst survives.
    pub fn notify_resize(&mut self, extent: Extent, now: Instant) {
        self.pending_resize = Some((extent, now + RESIZE_DEBOUNCE));
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The engine's section scrolled into view: activate and run.
    pub fn section_activated(&mut self) {
        self.engine.set_active(true);
        self.start();
    }

    /// The engine's section scrolled out of view. The session keeps
    /// running; the engine's inactivity is what pauses the frames.
    pub fn section_deactivated(&mut self) {
        self.engine.set_active(false);
    }

    /// Advances one frame if nothing gates it.
    ///
    /// Order per call: a due resize applies first, even when the outcome
    /// below is a skip. Then hidden and inactive gates short-circuit
    /// without consuming the pending pointer. Finally the pointer sample,
    /// if any, is delivered and the engine steps.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, EngineError> {
        if self.phase == SessionPhase::Idle {
            return Ok(TickOutcome::Idle);
        }
        if let Some((extent, deadline)) = self.pending_resize {
            if now >= deadline {
                self.pending_resize = None;
                self.engine.resize(extent)?;
            }
        }
        if !self.visible {
            return Ok(TickOutcome::SkippedHidden);
        }
        if !self.engine.is_active() {
            return Ok(TickOutcome::SkippedInactive);
        }
        if let Some(pos) = self.pending_pointer.take() {
            self.engine.pointer_moved(pos);
        }
        self.engine.step()?;
        self.frames += 1;
        Ok(TickOutcome::Stepped)
    }
}
