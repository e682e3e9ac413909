//! Countdown timer.
//!
//! [`Countdown`] is the pure state machine; [`CountdownTimer`] drives it once
//! per period on the tokio runtime and fires the completion notification.

mod timer;

pub use timer::CountdownTimer;

use crate::notify::{LocalNotification, COUNTDOWN_CHANNEL_ID};

/// Seconds a fresh countdown starts from.
pub const COUNTDOWN_START_SECS: u32 = 10;

pub const FINISHED_TITLE: &str = "⏰ Countdown finished";
pub const FINISHED_BODY: &str = "Time is up!";

/// Point-in-time view of a countdown, published to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub seconds_left: u32,
    pub running: bool,
    pub fired: bool,
}

impl CountdownSnapshot {
    /// Short status shown next to the remaining time.
    pub const fn status_label(self) -> &'static str {
        if self.running {
            "Running"
        } else if self.seconds_left == 0 {
            "Finished"
        } else {
            "Ready"
        }
    }
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed.
    Idle,
    /// Decremented and still above zero.
    Continue,
    /// Reached zero and stopped. `notify` is true only for the first arrival
    /// at zero since the last reset.
    Finished { notify: bool },
}

/// Countdown state machine: `Idle(N) -> Running -> Idle(0, fired) -> Idle(N)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    initial: u32,
    seconds_left: u32,
    running: bool,
    fired: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_START_SECS)
    }
}

impl Countdown {
    pub const fn new(initial: u32) -> Self {
        Self {
            initial,
            seconds_left: initial,
            running: false,
            fired: false,
        }
    }

    pub const fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    pub const fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            seconds_left: self.seconds_left,
            running: self.running,
            fired: self.fired,
        }
    }

    /// Mark the countdown running.
    ///
    /// Returns `false` when it already was, in which case the caller must not
    /// schedule another tick.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Advance by one period.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left > 0 {
            return TickOutcome::Continue;
        }

        self.running = false;
        let notify = !self.fired;
        self.fired = true;
        TickOutcome::Finished { notify }
    }

    /// Stop and restore the initial value, clearing the one-shot latch.
    pub fn reset(&mut self) {
        self.seconds_left = self.initial;
        self.running = false;
        self.fired = false;
    }
}

/// The notification posted when a countdown reaches zero.
pub fn finished_notification() -> LocalNotification {
    LocalNotification::new(FINISHED_TITLE, FINISHED_BODY, COUNTDOWN_CHANNEL_ID)
}

/// Render remaining seconds as `mm:ss`.
pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
