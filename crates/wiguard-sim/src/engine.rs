//! Attack Simulation Controller
//!
//! Drives one attack simulation at a time through its five phases.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   SimulationController                       │
//! │                                                              │
//! │  start(id) ──► phase task ──┬─ wait phase_interval ◄─┐       │
//! │                             │  (or cancelled → exit) │       │
//! │                             ├─ narrative + score     │       │
//! │                             └─ append to log ────────┘ x5    │
//! │                                        │                     │
//! │  cancel() ── token ──────────┐         ▼                     │
//! │                              └──► watch<SimulationRun> ──► UI│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! State machine: `Idle → Running → {Completed, Cancelled}`.
//!
//! Every append happens inside a single `send_if_modified` on the watch
//! channel and re-checks the run's cancellation token and id under the
//! channel lock. Once [`SimulationController::cancel`] returns, the phase
//! task can no longer touch the published run.

use crate::catalog::AttackCatalog;
use crate::config::SimConfig;
use crate::core::{DETECTION_PHASE, PHASE_COUNT, PhaseResult, RunStatus, SimulationRun};
use crate::entropy::Entropy;
use crate::scoring::AnomalyScorer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What `start` did with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { run_id: Uuid },
    /// No attack selected
    IgnoredEmpty,
    /// A run is already in progress
    IgnoredRunning,
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Handle to the task driving the current run
struct ActiveRun {
    run_id: Uuid,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Everything a phase task owns
struct PhaseTask {
    run_id: Uuid,
    attack_id: String,
    catalog: Arc<AttackCatalog>,
    scorer: AnomalyScorer,
    entropy: Entropy,
    interval: Duration,
    token: CancellationToken,
    tx: watch::Sender<SimulationRun>,
}

pub struct SimulationController {
    catalog: Arc<AttackCatalog>,
    scorer: AnomalyScorer,
    phase_interval: Duration,
    entropy: Entropy,
    tx: watch::Sender<SimulationRun>,
    active: Option<ActiveRun>,
}

impl SimulationController {
    pub fn new(catalog: Arc<AttackCatalog>, phase_interval: Duration, entropy: Entropy) -> Self {
        let (tx, _rx) = watch::channel(SimulationRun::idle());
        Self {
            catalog,
            scorer: AnomalyScorer,
            phase_interval,
            entropy,
            tx,
            active: None,
        }
    }

    pub fn from_config(catalog: Arc<AttackCatalog>, config: &SimConfig, entropy: Entropy) -> Self {
        Self::new(catalog, config.phase_interval(), entropy)
    }

    pub fn catalog(&self) -> &AttackCatalog {
        &self.catalog
    }

    /// Start simulating `attack_id`. Must be called inside a tokio runtime.
    ///
    /// Ignored when no attack is selected or a run is already in progress.
    /// An id missing from the catalog still runs, with every phase narrated
    /// as [`UNKNOWN_PHASE`](crate::catalog::UNKNOWN_PHASE).
    pub fn start(&mut self, attack_id: &str) -> StartOutcome {
        let attack_id = attack_id.trim();
        if attack_id.is_empty() {
            debug!("Start ignored: no attack selected");
            return StartOutcome::IgnoredEmpty;
        }
        if self.tx.borrow().is_running() {
            if self.is_active() {
                warn!(attack = attack_id, "Start ignored: simulation already running");
                return StartOutcome::IgnoredRunning;
            }
            warn!("Previous phase task died mid-run; replacing it");
        }

        // A finished run's task has already exited; make sure of it.
        self.retire_active();

        let run_id = Uuid::new_v4();
        let token = CancellationToken::new();
        let attack_name = self.catalog.get(attack_id).map(|a| a.name.to_string());
        if attack_name.is_none() {
            warn!(attack = attack_id, "Attack not in catalog; phases will be unnarrated");
        }

        self.tx.send_replace(SimulationRun {
            run_id: Some(run_id),
            attack_id: attack_id.to_string(),
            attack_name,
            status: RunStatus::Running,
            log: Vec::with_capacity(PHASE_COUNT),
        });

        let task = PhaseTask {
            run_id,
            attack_id: attack_id.to_string(),
            catalog: self.catalog.clone(),
            scorer: self.scorer,
            entropy: self.entropy.fork(),
            interval: self.phase_interval,
            token: token.clone(),
            tx: self.tx.clone(),
        };
        let handle = tokio::spawn(run_phases(task));

        info!(attack = attack_id, %run_id, "Simulation started");

        self.active = Some(ActiveRun {
            run_id,
            token,
            handle,
        });
        StartOutcome::Started { run_id }
    }

    /// Abort the current run and clear the visible log.
    ///
    /// A running simulation becomes `Cancelled` with an empty log and no
    /// further phase results. A finished run is cleared back to `Idle`.
    /// Returns `true` if a running simulation was aborted.
    pub fn cancel(&mut self) -> bool {
        let run_id = self.active.as_ref().map(|a| a.run_id);
        self.retire_active();

        let mut aborted = false;
        self.tx.send_if_modified(|run| match run.status {
            RunStatus::Running => {
                run.status = RunStatus::Cancelled;
                run.log.clear();
                aborted = true;
                true
            }
            RunStatus::Completed | RunStatus::Cancelled => {
                *run = SimulationRun::idle();
                true
            }
            RunStatus::Idle => false,
        });

        if aborted {
            info!(run_id = ?run_id, "Simulation cancelled");
        }
        aborted
    }

    /// Drop any run and return to `Idle`
    pub fn reset(&mut self) {
        self.retire_active();
        self.tx.send_replace(SimulationRun::idle());
        debug!("Simulation reset");
    }

    pub fn status(&self) -> RunStatus {
        self.tx.borrow().status
    }

    /// Copy of the current run
    pub fn snapshot(&self) -> SimulationRun {
        self.tx.borrow().clone()
    }

    /// Observe the run; the receiver sees every published change
    pub fn subscribe(&self) -> watch::Receiver<SimulationRun> {
        self.tx.subscribe()
    }

    /// True while a phase task is alive
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .map(|a| !a.token.is_cancelled() && !a.handle.is_finished())
            .unwrap_or(false)
    }

    /// Wait until the current run is no longer `Running` and return it
    pub async fn wait_until_settled(&self) -> SimulationRun {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let settled = match rx.wait_for(|run| !run.is_running()).await {
            Ok(run) => run.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    fn retire_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
            active.handle.abort();
        }
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        self.retire_active();
    }
}

/// Phase loop of a single run
async fn run_phases(task: PhaseTask) {
    let PhaseTask {
        run_id,
        attack_id,
        catalog,
        scorer,
        mut entropy,
        interval,
        token,
        tx,
    } = task;

    for phase_index in 0..PHASE_COUNT {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(%run_id, phase = phase_index, "Phase task stopped by cancellation");
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        let result = PhaseResult::new(
            phase_index,
            timestamp_label(),
            catalog.phase_narrative(&attack_id, phase_index),
            scorer.score(phase_index, &mut entropy),
        );
        let score = result.anomaly_score;

        let appended = tx.send_if_modified(|run| {
            if token.is_cancelled()
                || run.run_id != Some(run_id)
                || run.status != RunStatus::Running
            {
                return false;
            }
            run.log.push(result);
            if phase_index == DETECTION_PHASE {
                run.status = RunStatus::Completed;
            }
            true
        });

        if !appended {
            debug!(%run_id, phase = phase_index, "Phase result discarded; run no longer active");
            return;
        }

        debug!(%run_id, attack = %attack_id, phase = phase_index, score, "Phase appended");
    }

    info!(%run_id, attack = %attack_id, "Simulation completed; attack detected");
}

fn timestamp_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
