//! Frame tasks and delayed attempts driven by the UI loop.

use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Runs on every frame
    Scheduled,
    /// Skipped until resumed
    Suspended,
    /// Never runs again
    Cancelled,
}

/// A per-frame task with an explicit lifecycle.
#[derive(Debug, Clone)]
pub struct FrameTask {
    /// Shown in logs
    name: &'static str,
    state: TaskState,
}

impl FrameTask {
    pub fn scheduled(name: &'static str) -> Self {
        Self {
            name,
            state: TaskState::Scheduled,
        }
    }

    pub fn suspended(name: &'static str) -> Self {
        Self {
            name,
            state: TaskState::Suspended,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        self.state == TaskState::Scheduled
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == TaskState::Cancelled
    }

    /// Suspend or resume; a cancelled task stays cancelled
    pub fn set_suspended(&mut self, suspended: bool) {
        self.state = match (self.state, suspended) {
            (TaskState::Cancelled, _) => TaskState::Cancelled,
            (_, true) => TaskState::Suspended,
            (_, false) => TaskState::Scheduled,
        };
    }

    pub fn cancel(&mut self) {
        if self.state != TaskState::Cancelled {
            debug!("Frame task '{}' cancelled", self.name);
        }
        self.state = TaskState::Cancelled;
    }
}

/// A fixed series of deadlines measured from a start instant.
///
/// Each poll reports how many deadlines have passed since the previous poll.
#[derive(Debug, Clone)]
pub struct DelayedAttempts {
    started: Instant,
    /// Offsets from `started`, ascending
    delays: Vec<Duration>,
    /// First deadline not yet reported
    next: usize,
}

impl DelayedAttempts {
    pub fn new(started: Instant, mut delays: Vec<Duration>) -> Self {
        delays.sort();
        Self {
            started,
            delays,
            next: 0,
        }
    }

    /// Consume the deadlines reached by `now`
    pub fn poll(&mut self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let before = self.next;
        while self.next < self.delays.len() && self.delays[self.next] <= elapsed {
            self.next += 1;
        }
        self.next - before
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.delays.len()
    }

    /// Drop all pending attempts
    pub fn cancel(&mut self) {
        self.next = self.delays.len();
    }
}
