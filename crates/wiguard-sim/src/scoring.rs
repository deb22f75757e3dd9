//! Anomaly scoring for simulated attack phases.
//!
//! A phase score is `U[0,1) * (phase + 1) * 0.2`: both the expected value and
//! the reachable maximum grow with the phase index, modelling detection
//! confidence that rises as the attack progresses. The last phase can reach
//! at most `1.0` (exclusive).

use crate::entropy::Entropy;

/// Score growth per phase
pub const SCORE_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyScorer;

impl AnomalyScorer {
    /// Exclusive upper bound of the score for `phase_index`
    pub fn upper_bound(phase_index: usize) -> f64 {
        (phase_index + 1) as f64 * SCORE_STEP
    }

    pub fn score(&self, phase_index: usize, entropy: &mut Entropy) -> f64 {
        entropy.unit() * Self::upper_bound(phase_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PHASE_COUNT;

    #[test]
    fn test_score_bounds() {
        let scorer = AnomalyScorer;
        let mut entropy = Entropy::seeded(99);
        for _ in 0..2000 {
            for phase in 0..PHASE_COUNT {
                let score = scorer.score(phase, &mut entropy);
                assert!(score >= 0.0);
                assert!(score < AnomalyScorer::upper_bound(phase));
                assert!(score < 1.0);
            }
        }
    }

    #[test]
    fn test_upper_bound_grows_with_phase() {
        assert!((AnomalyScorer::upper_bound(0) - 0.2).abs() < 1e-12);
        assert_eq!(AnomalyScorer::upper_bound(4), 1.0);
        for phase in 1..PHASE_COUNT {
            assert!(AnomalyScorer::upper_bound(phase) > AnomalyScorer::upper_bound(phase - 1));
        }
    }

    #[test]
    fn test_mean_rises_with_phase() {
        let scorer = AnomalyScorer;
        let mut entropy = Entropy::seeded(5);
        let means: Vec<f64> = (0..PHASE_COUNT)
            .map(|phase| {
                let n = 4000;
                (0..n).map(|_| scorer.score(phase, &mut entropy)).sum::<f64>() / n as f64
            })
            .collect();
        for pair in means.windows(2) {
            assert!(pair[1] > pair[0], "means should increase: {:?}", means);
        }
    }
}
