//! Frame loop: drives a per-refresh callback and tracks timing statistics.
//!
//! The loop never touches a clock or a browser API itself. Timestamps arrive
//! as arguments (the host's refresh callback already carries one) and
//! scheduling goes through the [`FrameScheduler`] port injected at
//! construction, so the whole state machine is testable with a manual
//! scheduler. The browser implementation is [`crate::engine::RafScheduler`].

#[cfg(test)]
#[path = "frame_loop_test.rs"]
mod frame_loop_test;

/// Scheduling port: "call my tick on the next display refresh".
///
/// `request` arms one future tick; `cancel` revokes a pending one. The
/// scheduler is responsible for routing the host's callback (with its
/// timestamp) back to [`FrameLoop::tick`].
pub trait FrameScheduler {
    fn request(&mut self);
    fn cancel(&mut self);
}

/// Two-state (stopped/running) frame loop with lifetime-cumulative counters.
///
/// While running, each tick accumulates elapsed time, invokes the registered
/// callback with the delta since the previous tick, and re-requests itself.
/// Pausing cancels the pending tick but keeps `frame_count` and
/// `run_time_ms`, so a later start resumes accumulation rather than starting
/// a new series.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    callback: Box<dyn FnMut(f64)>,
    running: bool,
    frame_count: u64,
    run_time_ms: f64,
    last_frame_ms: f64,
    run_started_at_ms: f64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    /// Create a stopped loop. The callback defaults to an explicit no-op
    /// until the host installs one.
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            callback: Box::new(|_delta_ms| {}),
            running: false,
            frame_count: 0,
            run_time_ms: 0.0,
            last_frame_ms: 0.0,
            run_started_at_ms: 0.0,
        }
    }

    /// Replace the per-tick callback. The callback receives the time since
    /// the previous tick in milliseconds.
    pub fn set_callback(&mut self, callback: impl FnMut(f64) + 'static) -> &mut Self {
        self.callback = Box::new(callback);
        self
    }

    /// Stopped → Running. Records `now_ms` as both the run start and the
    /// previous-frame timestamp (so the first delta doesn't span the pause)
    /// and requests the first tick. No-op while already running.
    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.run_started_at_ms = now_ms;
        self.last_frame_ms = now_ms;
        self.running = true;
        self.scheduler.request();
    }

    /// One scheduled tick. Ignored while stopped: a tick that was already
    /// in flight when [`FrameLoop::pause`] ran must not count.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.running {
            return;
        }
        let delta_ms = now_ms - self.last_frame_ms;
        self.run_time_ms += delta_ms;
        (self.callback)(delta_ms);
        self.frame_count += 1;
        self.last_frame_ms = now_ms;
        self.scheduler.request();
    }

    /// Running → Stopped. Cancels the pending tick. Idempotent; counters are
    /// not reset.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.scheduler.cancel();
    }

    // --- Statistics ---

    /// Lifetime average frames per second, or `None` before the first tick
    /// (no data yet, never a division by zero).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn frames_per_second(&self) -> Option<f64> {
        if self.frame_count == 0 || self.run_time_ms <= 0.0 {
            return None;
        }
        Some(self.frame_count as f64 / self.run_time_ms * 1000.0)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks observed over the loop's lifetime, across pause/start cycles.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Accumulated running time in milliseconds, across pause/start cycles.
    #[must_use]
    pub fn run_time_ms(&self) -> f64 {
        self.run_time_ms
    }

    /// Timestamp passed to the most recent [`FrameLoop::start`].
    #[must_use]
    pub fn run_started_at_ms(&self) -> f64 {
        self.run_started_at_ms
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler access, used by the browser glue to install the
    /// refresh-callback closure after the loop is constructed.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
