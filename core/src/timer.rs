use web_time::{Duration, Instant};

/// Elapsed-time clock owned by a single game.
///
/// Nothing ticks in the background: the displayed seconds are derived from the recorded instants, so a stopped or
/// dropped timer can never outlive its game. Starting again discards the previous run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameTimer {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl GameTimer {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Cancels any previous run and starts counting from `now`.
    pub fn start_at(&mut self, now: Instant) {
        if self.is_running() {
            log::debug!("restarting a running timer");
        }
        self.started_at = Some(now);
        self.stopped_at = None;
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    /// Freezes the count at `now`, no-op unless running.
    pub fn stop_at(&mut self, now: Instant) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    /// Back to idle, as if never started.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .stopped_at
                .unwrap_or(now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    /// How many whole seconds have passed since start, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Instant::now())
    }

    pub fn elapsed_secs_at(&self, now: Instant) -> u32 {
        self.elapsed_at(now).as_secs().try_into().unwrap_or(u32::MAX)
    }
}
