//! Diurnal / annual motion driver.
//!
//! Two independent flags decide which time angles advance. Their
//! disjunction is the "animating" state. The animator also remembers
//! whether a frame callback is already pending so that re-enabling a flag
//! never spawns a second frame loop.
//!
//! - `set_auto` reports whether the caller must schedule the first frame
//! - `on_frame` advances the angles and reports whether to schedule another
//!
//! Stopping is cooperative: a pending frame still runs, sees both flags
//! off, and lets the loop lapse.

use std::time::{Duration, Instant};

use crate::config::TimeStep;
use crate::sky::scene::{wrap_angle, SceneParams};

/// Which time angle a flag drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoTarget {
    Diurnal,
    Annual,
}

/// What the frame loop should do after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Schedule another frame
    Continue,
    /// Do not reschedule; the loop has ended
    Stop,
}

#[derive(Debug, Clone)]
pub struct Animator {
    auto_diurnal: bool,
    auto_annual: bool,
    /// A frame callback is pending
    scheduled: bool,
    step: TimeStep,
}

impl Animator {
    pub fn new(step: TimeStep) -> Self {
        Self {
            auto_diurnal: false,
            auto_annual: false,
            scheduled: false,
            step,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.auto_diurnal || self.auto_annual
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn auto(&self, target: AutoTarget) -> bool {
        match target {
            AutoTarget::Diurnal => self.auto_diurnal,
            AutoTarget::Annual => self.auto_annual,
        }
    }

    /// Flip one flag. Returns `true` when the caller must schedule a frame
    /// to start the loop.
    pub fn set_auto(&mut self, target: AutoTarget, enabled: bool) -> bool {
        match target {
            AutoTarget::Diurnal => self.auto_diurnal = enabled,
            AutoTarget::Annual => self.auto_annual = enabled,
        }
        if self.is_animating() && !self.scheduled {
            self.scheduled = true;
            log::info!("[animator] loop started ({:?} on)", target);
            true
        } else {
            log::debug!(
                "[animator] {:?} = {}, animating = {}, pending frame = {}",
                target,
                enabled,
                self.is_animating(),
                self.scheduled
            );
            false
        }
    }

    /// Frame callback. `elapsed` is the real time since the previous frame.
    pub fn on_frame(&mut self, params: &mut SceneParams, elapsed: Duration) -> FrameControl {
        if !self.is_animating() {
            self.scheduled = false;
            log::info!("[animator] loop stopped");
            return FrameControl::Stop;
        }
        let (d_diurnal, d_annual) = match self.step {
            TimeStep::RealTime { diurnal_rate, annual_rate } => {
                let dt = elapsed.as_secs_f64();
                (diurnal_rate * dt, annual_rate * dt)
            }
            TimeStep::Fixed { diurnal, annual } => (diurnal, annual),
        };
        if self.auto_diurnal {
            params.diurnal = wrap_angle(params.diurnal + d_diurnal);
        }
        if self.auto_annual {
            params.annual = wrap_angle(params.annual + d_annual);
        }
        self.scheduled = true;
        FrameControl::Continue
    }
}

/// Target spacing of animation frames.
pub const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Deadline for the next animation frame.
///
/// The host may repaint for reasons of its own (pointer motion, widget
/// hover). Only a pass at or after the deadline counts as a frame, so a
/// fixed step advances once per scheduled frame.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FRAME_PERIOD)
    }
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm the next frame one period after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Consume the pending frame if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending frame, if one is armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
