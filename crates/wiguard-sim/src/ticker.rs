//! Cancellable periodic tasks.
//!
//! A [`PeriodicTask`] runs a callback on a fixed cadence on the tokio
//! runtime until it is stopped. The first tick fires one full period after
//! spawn. Stopping is idempotent and also happens on drop, so a task can
//! never outlive the value that owns it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct PeriodicTask {
    name: &'static str,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl PeriodicTask {
    /// Spawn `on_tick` every `period`. Must be called inside a tokio runtime.
    ///
    /// `on_tick` receives the 1-based tick number. A panic inside it ends
    /// this task only; [`is_active`](Self::is_active) then reports `false`.
    pub fn spawn<F>(name: &'static str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        let token = CancellationToken::new();
        let ticks = Arc::new(AtomicU64::new(0));

        let task_token = token.clone();
        let task_ticks = ticks.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            debug!(task = name, period_ms = period.as_millis() as u64, "Periodic task started");

            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        let n = task_ticks.fetch_add(1, Ordering::Relaxed) + 1;
                        on_tick(n);
                    }
                }
            }

            debug!(task = name, "Periodic task stopped");
        });

        Self {
            name,
            token,
            handle: Some(handle),
            ticks,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ticks delivered so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// True while the task is scheduled and has not died
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
            && self
                .handle
                .as_ref()
                .map(|h| !h.is_finished())
                .unwrap_or(false)
    }

    /// Stop the task. No tick starts after this returns.
    pub fn stop(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                warn!(task = self.name, "Periodic task had already terminated");
            }
            handle.abort();
        }
        info!(task = self.name, ticks = self.ticks(), "Periodic task cancelled");
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.stop();
    }
}
