//! The render loop: tick, drain due events, paint, present.
//!
//! Time comes from an injected [`FrameClock`], so the same loop runs paced
//! in the binary ([`FixedRateClock`]) and instantly in tests
//! ([`ManualClock`]). Presenting goes through a [`Surface`]; a surface
//! failure costs one frame and the loop carries on.

#[cfg(test)]
#[path = "frame_loop_test.rs"]
mod frame_loop_test;

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::engine::{Action, EngineCore, HostEvent};
use crate::error::ErrorCode;
use crate::render::DisplayList;
use crate::viewport::CameraRig;

/// One frame's timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Zero-based frame number.
    pub frame: u64,
    /// Time since the clock started.
    pub elapsed: Duration,
}

/// Source of frame ticks. `None` ends the loop.
pub trait FrameClock {
    fn next_tick(&mut self) -> Option<Tick>;
}

/// Clock that yields a fixed number of ticks without waiting.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    frame: u64,
    remaining: u64,
    step: Duration,
}

impl ManualClock {
    #[must_use]
    pub fn new(frames: u64) -> Self {
        Self { frame: 0, remaining: frames, step: Duration::from_millis(16) }
    }

    /// Allow `frames` more ticks.
    pub fn advance(&mut self, frames: u64) {
        self.remaining += frames;
    }
}

impl FrameClock for ManualClock {
    fn next_tick(&mut self) -> Option<Tick> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let frame = self.frame;
        self.frame += 1;
        let elapsed = self.step * u32::try_from(frame).unwrap_or(u32::MAX);
        Some(Tick { frame, elapsed })
    }
}

/// Clock that sleeps to hold a target frame rate.
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    period: Duration,
    start: Instant,
    next_deadline: Instant,
    frame: u64,
    limit: Option<u64>,
}

impl FixedRateClock {
    /// `fps` of 0 is treated as 1. `limit` caps the number of ticks.
    #[must_use]
    pub fn new(fps: u32, limit: Option<u64>) -> Self {
        let period = Duration::from_secs(1) / fps.max(1);
        let start = Instant::now();
        Self { period, start, next_deadline: start, frame: 0, limit }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameClock for FixedRateClock {
    fn next_tick(&mut self) -> Option<Tick> {
        if self.limit.is_some_and(|limit| self.frame >= limit) {
            return None;
        }
        let now = Instant::now();
        if now < self.next_deadline {
            thread::sleep(self.next_deadline - now);
        } else if now - self.next_deadline > self.period {
            // Fell behind; don't try to catch up with a burst of frames.
            self.next_deadline = now;
        }
        self.next_deadline += self.period;
        let frame = self.frame;
        self.frame += 1;
        Some(Tick { frame, elapsed: self.start.elapsed() })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface io: {0}")]
    Io(#[from] std::io::Error),
    #[error("surface rejected frame: {0}")]
    Rejected(String),
}

impl ErrorCode for SurfaceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_SURFACE_IO",
            Self::Rejected(_) => "E_SURFACE_REJECTED",
        }
    }
}

/// Where finished display lists go.
pub trait Surface {
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] when the frame could not be shown.
    fn present(&mut self, list: &DisplayList) -> Result<(), SurfaceError>;
}

/// A host event due at a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    #[serde(default)]
    pub frame: u64,
    #[serde(flatten)]
    pub event: HostEvent,
}

/// Host events waiting for their frame, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<ScheduledEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue ordered by frame; events sharing a frame keep their order.
    #[must_use]
    pub fn from_scheduled(mut events: Vec<ScheduledEvent>) -> Self {
        events.sort_by_key(|e| e.frame);
        Self { pending: events.into() }
    }

    /// Queue an event for `frame`, after anything already due by then.
    pub fn push(&mut self, frame: u64, event: HostEvent) {
        let at = self.pending.partition_point(|e| e.frame <= frame);
        self.pending.insert(at, ScheduledEvent { frame, event });
    }

    /// Remove and return every event due at or before `frame`.
    pub fn drain_due(&mut self, frame: u64) -> Vec<HostEvent> {
        let due = self.pending.partition_point(|e| e.frame <= frame);
        self.pending.drain(..due).map(|e| e.event).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// What one loop iteration did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub tick: Tick,
    pub actions: Vec<Action>,
    pub presented: bool,
}

/// Totals for a finished [`RenderLoop::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub frames: u64,
    pub failed_presents: u64,
    pub actions: u64,
}

/// Drives an engine from a clock onto a surface.
pub struct RenderLoop<C, S> {
    clock: C,
    surface: S,
    frame: DisplayList,
}

impl<C: FrameClock, S: Surface> RenderLoop<C, S> {
    #[must_use]
    pub fn new(clock: C, surface: S) -> Self {
        Self { clock, surface, frame: DisplayList::default() }
    }

    /// Run one iteration. `None` once the clock has stopped.
    pub fn step<R: CameraRig>(&mut self, engine: &mut EngineCore<R>, queue: &mut EventQueue) -> Option<FrameReport> {
        let tick = self.clock.next_tick()?;

        let mut actions = Vec::new();
        for event in queue.drain_due(tick.frame) {
            actions.extend(engine.handle(event));
        }

        engine.paint(&mut self.frame);
        let presented = match self.surface.present(&self.frame) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(frame = tick.frame, code = err.error_code(), error = %err, "present failed");
                false
            }
        };

        Some(FrameReport { tick, actions, presented })
    }

    /// Step until the clock stops.
    pub fn run<R: CameraRig>(&mut self, engine: &mut EngineCore<R>, queue: &mut EventQueue) -> LoopStats {
        tracing::info!(queued = queue.len(), "render loop started");
        let mut stats = LoopStats::default();
        while let Some(report) = self.step(engine, queue) {
            stats.frames += 1;
            stats.actions += u64::try_from(report.actions.len()).unwrap_or(u64::MAX);
            if !report.presented {
                stats.failed_presents += 1;
            }
            for action in &report.actions {
                tracing::debug!(frame = report.tick.frame, ?action, "action");
            }
        }
        tracing::info!(frames = stats.frames, failed_presents = stats.failed_presents, "render loop stopped");
        stats
    }

    /// The most recently painted frame.
    #[must_use]
    pub fn last_frame(&self) -> &DisplayList {
        &self.frame
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
