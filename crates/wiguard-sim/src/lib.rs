//! # wiguard-sim - Wi-Guard Simulation & Telemetry Engine
//!
//! Drives the Wi-Guard wireless-defense dashboard with synthetic data:
//! scripted multi-phase attack simulations and a live telemetry stream.
//! Nothing here senses a real network; every value is generated.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          wiguard-sim                                │
//! │                                                                     │
//! │   AttackCatalog ──┐                                                 │
//! │   AnomalyScorer ──┼──► SimulationController ──► watch<SimulationRun>│
//! │   Entropy (fork) ─┘      (phase task, 1/s)                          │
//! │                                                                     │
//! │   Entropy (fork) ──► DashboardView                                  │
//! │                        ├─ metrics-stream   ──► watch<MetricsWindow> │
//! │                        └─ stats-aggregator ──► watch<StatsSnapshot> │
//! │                           (periodic tasks, 1 per 2s)                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The simulation and the two telemetry generators are independent timed
//! activities. Each owns exactly one watch channel and publishes a complete
//! value per step, so observers never see a half-applied update.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wiguard_sim::{AttackCatalog, Entropy, SimConfig, SimulationController};
//!
//! # async fn demo() {
//! let config = SimConfig::default();
//! let mut root = Entropy::from_seed_option(config.seed);
//! let mut controller =
//!     SimulationController::from_config(Arc::new(AttackCatalog::builtin()), &config, root.fork());
//!
//! controller.start("deauth");
//! let run = controller.wait_until_settled().await;
//! assert_eq!(run.log.len(), 5);
//! # }
//! ```
//!
//! ## Available Attacks
//!
//! | Id            | Name                   | Severity |
//! |---------------|------------------------|----------|
//! | `deauth`      | Deauthentication Flood | HIGH     |
//! | `evil_twin`   | Evil Twin AP           | CRITICAL |
//! | `ssid_spam`   | SSID Spoofing          | MEDIUM   |
//! | `probe_flood` | Probe Request Flood    | MEDIUM   |

// Core types - single source of truth
pub mod core;

// Static attack table and phase narratives
pub mod catalog;

pub mod config;
pub mod error;

// Randomness and scoring
pub mod entropy;
pub mod scoring;

// Timed activities
pub mod engine;
pub mod ticker;

// Dashboard telemetry
pub mod dashboard;
pub mod telemetry;

pub mod render;

// Re-exports for convenience
pub use crate::core::{
    AttackDefinition, DETECTION_PHASE, MetricsWindow, PHASE_COUNT, PhaseResult, PhaseStatus,
    RunStatus, Severity, SimulationRun, StatsSnapshot,
};

pub use catalog::{AttackCatalog, UNKNOWN_PHASE};
pub use config::SimConfig;
pub use dashboard::{DashboardState, DashboardView};
pub use engine::{SimulationController, StartOutcome};
pub use entropy::Entropy;
pub use error::{Result, SimError};
pub use scoring::AnomalyScorer;
pub use telemetry::{MetricsStreamGenerator, StatsAggregator};
pub use ticker::PeriodicTask;
