//! Dashboard View Lifecycle
//!
//! Owns the live telemetry of the command-center view. Mounting the view
//! starts two periodic tasks on the configured cadence:
//! - `metrics-stream`: pushes one activity sample into the sliding window
//! - `stats-aggregator`: advances the stat-card counters
//!
//! Each task is the only writer of its watch channel and publishes a whole
//! new value per tick. Unmounting (or dropping the view) stops both tasks;
//! the last published values stay readable. If one task dies, the other
//! keeps running.

use crate::config::SimConfig;
use crate::core::{MetricsWindow, StatsSnapshot};
use crate::entropy::Entropy;
use crate::telemetry::{MetricsStreamGenerator, StatsAggregator};
use crate::ticker::PeriodicTask;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

/// Combined view state, as rendered by a UI
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    pub timestamp: String,
    pub is_mounted: bool,
    pub metrics_active: bool,
    pub stats_active: bool,
    pub activity: Vec<u8>,
    pub stats: StatsSnapshot,
}

pub struct DashboardView {
    config: SimConfig,
    entropy: Entropy,
    metrics_tx: watch::Sender<MetricsWindow>,
    stats_tx: watch::Sender<StatsSnapshot>,
    metrics_task: Option<PeriodicTask>,
    stats_task: Option<PeriodicTask>,
}

impl DashboardView {
    pub fn new(config: SimConfig, entropy: Entropy) -> Self {
        let (metrics_tx, _) = watch::channel(MetricsWindow::new(config.window_capacity));
        let (stats_tx, _) = watch::channel(config.initial_stats);
        Self {
            config,
            entropy,
            metrics_tx,
            stats_tx,
            metrics_task: None,
            stats_task: None,
        }
    }

    /// Start the telemetry tick. Must be called inside a tokio runtime.
    ///
    /// The window starts empty and the counters start from the configured
    /// initial values, as on a fresh view. Returns `false` if already mounted.
    pub fn on_view_mount(&mut self) -> bool {
        if self.is_mounted() {
            debug!("Dashboard already mounted");
            return false;
        }

        let period = self.config.tick_interval();

        let mut metrics =
            MetricsStreamGenerator::new(self.config.window_capacity, self.entropy.fork());
        self.metrics_tx.send_replace(metrics.window().clone());
        let metrics_tx = self.metrics_tx.clone();
        self.metrics_task = Some(PeriodicTask::spawn("metrics-stream", period, move |tick| {
            let sample = metrics.tick();
            metrics_tx.send_replace(metrics.window().clone());
            debug!(tick, sample, "Activity sample");
        }));

        let mut stats = StatsAggregator::new(self.config.initial_stats, self.entropy.fork());
        self.stats_tx.send_replace(stats.snapshot());
        let stats_tx = self.stats_tx.clone();
        self.stats_task = Some(PeriodicTask::spawn("stats-aggregator", period, move |tick| {
            let snapshot = stats.tick();
            stats_tx.send_replace(snapshot);
            debug!(
                tick,
                threats_blocked = snapshot.threats_blocked,
                network_health = snapshot.network_health,
                attacks_today = snapshot.attacks_today,
                "Stats updated"
            );
        }));

        info!(period_ms = self.config.tick_interval_ms, "Dashboard mounted");
        true
    }

    /// Stop the telemetry tick. Returns `false` if the view was not mounted.
    pub fn on_view_unmount(&mut self) -> bool {
        let was_mounted = self.metrics_task.is_some() || self.stats_task.is_some();
        if let Some(mut task) = self.metrics_task.take() {
            task.stop();
        }
        if let Some(mut task) = self.stats_task.take() {
            task.stop();
        }
        if was_mounted {
            info!("Dashboard unmounted");
        }
        was_mounted
    }

    pub fn is_mounted(&self) -> bool {
        self.metrics_task.is_some() || self.stats_task.is_some()
    }

    pub fn metrics_active(&self) -> bool {
        self.metrics_task
            .as_ref()
            .map(PeriodicTask::is_active)
            .unwrap_or(false)
    }

    pub fn stats_active(&self) -> bool {
        self.stats_task
            .as_ref()
            .map(PeriodicTask::is_active)
            .unwrap_or(false)
    }

    pub fn metrics(&self) -> MetricsWindow {
        self.metrics_tx.borrow().clone()
    }

    pub fn stats(&self) -> StatsSnapshot {
        *self.stats_tx.borrow()
    }

    pub fn subscribe_metrics(&self) -> watch::Receiver<MetricsWindow> {
        self.metrics_tx.subscribe()
    }

    pub fn subscribe_stats(&self) -> watch::Receiver<StatsSnapshot> {
        self.stats_tx.subscribe()
    }

    pub fn state(&self) -> DashboardState {
        DashboardState {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            is_mounted: self.is_mounted(),
            metrics_active: self.metrics_active(),
            stats_active: self.stats_active(),
            activity: self.metrics().to_vec(),
            stats: self.stats(),
        }
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.on_view_unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn view(seed: u64) -> DashboardView {
        let config = SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        };
        DashboardView::new(config, Entropy::seeded(seed))
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_ticks_every_two_seconds() {
        let mut view = view(1);
        assert!(view.on_view_mount());
        assert!(view.metrics().is_empty());

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert!(view.metrics().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(view.metrics().len(), 1);

        tokio::time::sleep(Duration::from_secs(8)).await;
        assert_eq!(view.metrics().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_caps_at_twenty() {
        let mut view = view(2);
        view.on_view_mount();
        tokio::time::sleep(Duration::from_secs(2 * 30 + 1)).await;
        let window = view.metrics();
        assert_eq!(window.len(), 20);
        assert!(window.samples().all(|s| s < 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_updates() {
        let mut view = view(3);
        let mut rx = view.subscribe_stats();
        view.on_view_mount();

        tokio::time::sleep(Duration::from_millis(6500)).await;
        assert!(view.on_view_unmount());
        assert!(!view.is_mounted());
        let frozen = view.stats();
        let frozen_window = view.metrics();

        rx.borrow_and_update();
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(view.stats(), frozen);
        assert_eq!(view.metrics(), frozen_window);
        assert_eq!(frozen_window.len(), 3);

        assert!(!view.on_view_unmount());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_starts_fresh() {
        let mut view = view(4);
        view.on_view_mount();
        tokio::time::sleep(Duration::from_secs(11)).await;
        view.on_view_unmount();
        assert_eq!(view.metrics().len(), 5);

        assert!(view.on_view_mount());
        assert!(view.metrics().is_empty());
        assert_eq!(view.stats(), StatsSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_mount_is_noop() {
        let mut view = view(5);
        assert!(view.on_view_mount());
        assert!(!view.on_view_mount());
        tokio::time::sleep(Duration::from_millis(4100)).await;
        assert_eq!(view.metrics().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counters_monotonic_while_mounted() {
        let mut view = view(6);
        let mut rx = view.subscribe_stats();
        view.on_view_mount();

        let mut prev = view.stats();
        for _ in 0..50 {
            rx.changed().await.unwrap();
            let next = *rx.borrow_and_update();
            assert!(next.threats_blocked >= prev.threats_blocked);
            assert!(next.attacks_today >= prev.attacks_today);
            assert!((90..100).contains(&next.network_health));
            assert_eq!(next.active_decoys, 8);
            prev = next;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_reports_lifecycle() {
        let mut view = view(7);
        let state = view.state();
        assert!(!state.is_mounted);
        assert!(state.activity.is_empty());

        view.on_view_mount();
        tokio::time::sleep(Duration::from_millis(2100)).await;
        let state = view.state();
        assert!(state.is_mounted && state.metrics_active && state.stats_active);
        assert_eq!(state.activity.len(), 1);
    }
}
