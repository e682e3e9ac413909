use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{finished_notification, Countdown, CountdownSnapshot, TickOutcome};
use crate::notify::NotificationCenter;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives a [`Countdown`] on the tokio runtime.
///
/// At most one ticker task exists at a time. Dropping the timer aborts it, so
/// a torn-down view never receives updates.
pub struct CountdownTimer {
    shared: Arc<Shared>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    period: Duration,
}

struct Shared {
    state: Mutex<TimerState>,
    updates: watch::Sender<CountdownSnapshot>,
    notifications: Option<Arc<NotificationCenter>>,
}

/// Countdown plus the generation of the run allowed to tick it.
///
/// Every start and reset bumps the generation, so a ticker that wakes after
/// being aborted sees a stale value and exits without touching the state.
struct TimerState {
    countdown: Countdown,
    generation: u64,
}

impl TimerState {
    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: CountdownSnapshot) {
        self.updates.send_replace(snapshot);
    }

    async fn alert(&self) {
        let Some(center) = self.notifications.clone() else {
            tracing::info!("Countdown finished; notifications are unavailable");
            return;
        };

        match center.deliver(finished_notification()).await {
            Ok(()) => tracing::debug!("Countdown notification delivered"),
            Err(error) => tracing::warn!("Countdown notification not delivered: {}", error),
        }
    }
}

impl CountdownTimer {
    pub fn new(countdown: Countdown, notifications: Option<Arc<NotificationCenter>>) -> Self {
        Self::with_period(countdown, notifications, TICK_PERIOD)
    }

    /// Timer with a custom tick period.
    pub fn with_period(
        countdown: Countdown,
        notifications: Option<Arc<NotificationCenter>>,
        period: Duration,
    ) -> Self {
        let (updates, _) = watch::channel(countdown.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(TimerState {
                    countdown,
                    generation: 0,
                }),
                updates,
                notifications,
            }),
            ticker: Mutex::new(None),
            period,
        }
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        self.shared.state().countdown.snapshot()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Start ticking. No-op while already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut ticker = self.ticker();
        let (snapshot, generation) = {
            let mut state = self.shared.state();
            if !state.countdown.start() {
                return;
            }
            (state.countdown.snapshot(), state.next_generation())
        };
        self.shared.publish(snapshot);

        tracing::debug!(seconds_left = snapshot.seconds_left, "Countdown started");
        *ticker = Some(tokio::spawn(run_ticker(
            Arc::clone(&self.shared),
            self.period,
            generation,
        )));
    }

    /// Cancel any active tick and restore the initial state.
    pub fn reset(&self) {
        let mut ticker = self.ticker();
        if let Some(handle) = ticker.take() {
            handle.abort();
        }

        let snapshot = {
            let mut state = self.shared.state();
            state.next_generation();
            state.countdown.reset();
            state.countdown.snapshot()
        };
        self.shared.publish(snapshot);
        tracing::debug!("Countdown reset");
    }

    fn ticker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker().take() {
            handle.abort();
        }
    }
}

async fn run_ticker(shared: Arc<Shared>, period: Duration, generation: u64) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let (outcome, snapshot) = {
            let mut state = shared.state();
            if state.generation != generation {
                tracing::debug!(generation, "Stale countdown ticker exiting");
                break;
            }
            let outcome = state.countdown.tick();
            (outcome, state.countdown.snapshot())
        };
        shared.publish(snapshot);

        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::Idle => break,
            TickOutcome::Finished { notify } => {
                tracing::info!("Countdown finished");
                if notify {
                    shared.alert().await;
                }
                break;
            }
        }
    }
}
