//! Dashboard telemetry generators.
//!
//! - [`MetricsStreamGenerator`]: one activity sample in `[0, 100)` per tick
//!   into a fixed-capacity sliding window.
//! - [`StatsAggregator`]: per-tick update of the stat-card counters.
//!
//! Both are plain state machines advanced by `tick`; scheduling and
//! publication live in [`crate::dashboard`].

use crate::core::{MetricsWindow, StatsSnapshot};
use crate::entropy::Entropy;

/// Exclusive upper bound of an activity sample
pub const SAMPLE_CEILING: u32 = 100;

/// Baseline network health; each tick adds `[0, NETWORK_HEALTH_SPREAD)`
pub const NETWORK_HEALTH_FLOOR: u8 = 90;
pub const NETWORK_HEALTH_SPREAD: u32 = 10;

/// Exclusive upper bound of threats blocked per tick
pub const MAX_BLOCKED_PER_TICK: u32 = 3;

/// Probability that a tick records a new attack
pub const ATTACK_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct MetricsStreamGenerator {
    window: MetricsWindow,
    entropy: Entropy,
    ticks: u64,
}

impl MetricsStreamGenerator {
    /// Generator with an empty window of `capacity`
    pub fn new(capacity: usize, entropy: Entropy) -> Self {
        Self {
            window: MetricsWindow::new(capacity),
            entropy,
            ticks: 0,
        }
    }

    /// Draw one sample and push it into the window
    pub fn tick(&mut self) -> u8 {
        let sample = self.entropy.below(SAMPLE_CEILING) as u8;
        self.window.push(sample);
        self.ticks += 1;
        sample
    }

    pub fn window(&self) -> &MetricsWindow {
        &self.window
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[derive(Debug, Clone)]
pub struct StatsAggregator {
    snapshot: StatsSnapshot,
    entropy: Entropy,
}

impl StatsAggregator {
    pub fn new(initial: StatsSnapshot, entropy: Entropy) -> Self {
        Self {
            snapshot: initial,
            entropy,
        }
    }

    /// Advance the counters by one tick.
    ///
    /// `threats_blocked` grows by 0..=2, `attacks_today` by one with
    /// probability 0.2, `network_health` is re-drawn. `active_decoys` is
    /// left alone.
    pub fn tick(&mut self) -> StatsSnapshot {
        let blocked = self.entropy.below(MAX_BLOCKED_PER_TICK) as u64;
        let health = NETWORK_HEALTH_FLOOR + self.entropy.below(NETWORK_HEALTH_SPREAD) as u8;
        let attacked = self.entropy.chance(ATTACK_PROBABILITY);

        let s = &mut self.snapshot;
        s.threats_blocked = s.threats_blocked.saturating_add(blocked);
        s.network_health = health;
        if attacked {
            s.attacks_today = s.attacks_today.saturating_add(1);
        }
        *s
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut generator = MetricsStreamGenerator::new(20, Entropy::seeded(11));
        for _ in 0..100 {
            let sample = generator.tick();
            assert!(sample < 100);
            assert!(generator.window().len() <= 20);
        }
        assert_eq!(generator.window().len(), 20);
        assert_eq!(generator.ticks(), 100);
    }

    #[test]
    fn test_window_holds_most_recent_in_order() {
        let mut generator = MetricsStreamGenerator::new(20, Entropy::seeded(12));
        let samples: Vec<u8> = (0..35).map(|_| generator.tick()).collect();
        assert_eq!(generator.window().to_vec(), samples[15..].to_vec());
    }

    #[test]
    fn test_window_fills_before_evicting() {
        let mut generator = MetricsStreamGenerator::new(20, Entropy::seeded(13));
        for n in 1..=20 {
            generator.tick();
            assert_eq!(generator.window().len(), n);
        }
    }

    #[test]
    fn test_counters_are_monotonic() {
        let mut stats = StatsAggregator::new(StatsSnapshot::default(), Entropy::seeded(21));
        let mut prev = stats.snapshot();
        for _ in 0..500 {
            let next = stats.tick();
            assert!(next.threats_blocked >= prev.threats_blocked);
            assert!(next.threats_blocked - prev.threats_blocked <= 2);
            assert!(next.attacks_today >= prev.attacks_today);
            assert!(next.attacks_today - prev.attacks_today <= 1);
            assert!((90..100).contains(&next.network_health));
            assert_eq!(next.active_decoys, prev.active_decoys);
            prev = next;
        }
    }

    #[test]
    fn test_attack_rate_is_about_one_in_five() {
        let initial = StatsSnapshot::default();
        let mut stats = StatsAggregator::new(initial, Entropy::seeded(22));
        let ticks = 5000;
        for _ in 0..ticks {
            stats.tick();
        }
        let attacks = stats.snapshot().attacks_today - initial.attacks_today;
        let rate = attacks as f64 / ticks as f64;
        assert!((0.17..0.23).contains(&rate), "rate was {}", rate);
    }

    #[test]
    fn test_seeded_generators_replay() {
        let mut a = MetricsStreamGenerator::new(20, Entropy::seeded(5));
        let mut b = MetricsStreamGenerator::new(20, Entropy::seeded(5));
        for _ in 0..30 {
            assert_eq!(a.tick(), b.tick());
        }
    }
}
