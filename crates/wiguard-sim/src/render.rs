//! Text and JSON rendering of simulator output for the CLI.

use crate::catalog::AttackCatalog;
use crate::core::{MetricsWindow, PhaseResult, RunStatus, SimulationRun, StatsSnapshot};
use crate::error::{Result, SimError};
use serde::Serialize;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Single-line JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(SimError::Render)
}

/// `1247` → `1,247`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render_catalog(catalog: &AttackCatalog) -> String {
    let mut out = String::new();
    out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
    out.push_str("║                 Available Attack Simulations                 ║\n");
    out.push_str("╠══════════════════════════════════════════════════════════════╣\n");
    for attack in catalog.list() {
        out.push_str(&format!(
            "║ {:12} {:24} {:>8}                 ║\n",
            attack.id, attack.name, attack.severity
        ));
        out.push_str(&format!("║   {:58} ║\n", attack.description));
    }
    out.push_str("╚══════════════════════════════════════════════════════════════╝");
    out
}

pub fn render_phase(phase: &PhaseResult) -> String {
    format!(
        "[{}] {:8} {:9} {:40} score={:.3}",
        phase.timestamp_label, phase.phase_label, phase.status, phase.narrative, phase.anomaly_score
    )
}

pub fn render_run_summary(run: &SimulationRun) -> String {
    let attack = run.attack_name.as_deref().unwrap_or(run.attack_id.as_str());
    match run.status {
        RunStatus::Idle => "Ready".to_string(),
        RunStatus::Running => format!("Simulation running: {} ({} phases)", attack, run.log.len()),
        RunStatus::Completed => {
            let peak = run
                .log
                .iter()
                .map(|p| p.anomaly_score)
                .fold(0.0_f64, f64::max);
            format!(
                "Simulation complete: {} detected after {} phases (peak score {:.3})",
                attack,
                run.log.len(),
                peak
            )
        }
        RunStatus::Cancelled => format!("Simulation cancelled: {}", attack),
    }
}

/// Bar sparkline of the activity window, oldest first
pub fn render_activity(window: &MetricsWindow) -> String {
    window
        .samples()
        .map(|s| BARS[(s as usize * BARS.len() / 100).min(BARS.len() - 1)])
        .collect()
}

pub fn render_stats(stats: &StatsSnapshot) -> String {
    format!(
        "Threats Blocked: {} | Active Decoys: {} | Network Health: {}% | Attacks Today: {}",
        format_thousands(stats.threats_blocked),
        stats.active_decoys,
        stats.network_health,
        stats.attacks_today
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1247), "1,247");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_render_phase_uses_three_decimals() {
        let phase = PhaseResult::new(4, "10:00:05", "Attack pattern detected by ML engine", 0.87654);
        let line = render_phase(&phase);
        assert!(line.contains("Phase 5"));
        assert!(line.contains("DETECTED"));
        assert!(line.ends_with("score=0.877"));
    }

    #[test]
    fn test_render_activity() {
        let mut window = MetricsWindow::new(4);
        for s in [0, 50, 99] {
            window.push(s);
        }
        assert_eq!(render_activity(&window), "▁▅█");
    }

    #[test]
    fn test_render_stats() {
        let line = render_stats(&StatsSnapshot::default());
        assert_eq!(
            line,
            "Threats Blocked: 1,247 | Active Decoys: 8 | Network Health: 94% | Attacks Today: 23"
        );
    }

    #[test]
    fn test_phase_json_shape() {
        let phase = PhaseResult::new(0, "10:00:01", "Scanning for target networks...", 0.1);
        let json = to_json(&phase).unwrap();
        assert!(json.contains("\"status\":\"EXECUTING\""));
        assert!(json.contains("\"phase_index\":0"));
    }

    #[test]
    fn test_catalog_listing_mentions_every_attack() {
        let catalog = AttackCatalog::builtin();
        let listing = render_catalog(&catalog);
        for id in catalog.ids() {
            assert!(listing.contains(id));
        }
        assert!(listing.contains("CRITICAL"));
    }
}
