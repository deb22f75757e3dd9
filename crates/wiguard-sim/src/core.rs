//! Core Types for wiguard-sim
//!
//! Data model shared by the simulation controller, the telemetry generators
//! and whatever renders them. Types are co-located here as the single source
//! of truth; every outbound type is `Serialize` so a UI can consume it as JSON.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// Number of phases in every attack run.
pub const PHASE_COUNT: usize = 5;

/// Index of the phase that is always flagged as detected.
pub const DETECTION_PHASE: usize = PHASE_COUNT - 1;

/// Default capacity of the live activity window.
pub const DEFAULT_WINDOW_CAPACITY: usize = 20;

// ============================================================================
// Attack Definitions
// ============================================================================

/// Static severity classification of an attack
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Display label, as shown on severity badges
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One entry of the attack catalog. Immutable once the catalog is built.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AttackDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub phase_narratives: [&'static str; PHASE_COUNT],
}

// ============================================================================
// Simulation Runs
// ============================================================================

/// Status of a single phase result
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhaseStatus {
    Executing,
    Detected,
}

impl PhaseStatus {
    /// The final phase is always detected, independent of its score.
    pub fn for_phase(phase_index: usize) -> Self {
        if phase_index == DETECTION_PHASE {
            Self::Detected
        } else {
            Self::Executing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Executing => "EXECUTING",
            Self::Detected => "DETECTED",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Result of one completed phase. Never mutated after it is appended.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PhaseResult {
    pub phase_index: usize,
    /// 1-based display label ("Phase 3")
    pub phase_label: String,
    /// Wall-clock time the phase completed, `HH:MM:SS`
    pub timestamp_label: String,
    pub status: PhaseStatus,
    pub narrative: String,
    /// Synthetic detection confidence in `[0, 1)`
    pub anomaly_score: f64,
}

impl PhaseResult {
    pub fn new(
        phase_index: usize,
        timestamp_label: impl Into<String>,
        narrative: impl Into<String>,
        anomaly_score: f64,
    ) -> Self {
        Self {
            phase_index,
            phase_label: format!("Phase {}", phase_index + 1),
            timestamp_label: timestamp_label.into(),
            status: PhaseStatus::for_phase(phase_index),
            narrative: narrative.into(),
            anomaly_score,
        }
    }
}

/// Lifecycle state of the simulation controller
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// The observable state of the current (or last) simulation run
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct SimulationRun {
    /// Identifies the run; `None` while idle
    pub run_id: Option<Uuid>,
    pub attack_id: String,
    pub attack_name: Option<String>,
    pub status: RunStatus,
    /// Append-only within a run, in phase order
    pub log: Vec<PhaseResult>,
}

impl SimulationRun {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Latest appended phase, if any
    pub fn last_phase(&self) -> Option<&PhaseResult> {
        self.log.last()
    }

    /// True once the run produced its detection phase
    pub fn detected(&self) -> bool {
        self.log
            .last()
            .map(|p| p.status == PhaseStatus::Detected)
            .unwrap_or(false)
    }
}

// ============================================================================
// Dashboard Telemetry
// ============================================================================

/// Fixed-capacity FIFO of the most recent activity samples
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricsWindow {
    capacity: usize,
    samples: VecDeque<u8>,
}

impl MetricsWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append a sample, evicting the oldest ones past capacity
    pub fn push(&mut self, sample: u8) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in arrival order, oldest first
    pub fn samples(&self) -> impl Iterator<Item = u8> + '_ {
        self.samples.iter().copied()
    }

    pub fn latest(&self) -> Option<u8> {
        self.samples.back().copied()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.samples.iter().copied().collect()
    }
}

impl Default for MetricsWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

/// Summary counters shown on the dashboard stat cards
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Non-decreasing for the lifetime of a view
    pub threats_blocked: u64,
    /// Static in-core; owned by decoy management
    pub active_decoys: u32,
    /// Re-sampled every tick within `[90, 100)`
    pub network_health: u8,
    /// Non-decreasing for the lifetime of a view
    pub attacks_today: u64,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            threats_blocked: 1247,
            active_decoys: 8,
            network_health: 94,
            attacks_today: 23,
        }
    }
}
