//! Attack Catalog
//!
//! Static table of wireless attack scenarios the simulator can run:
//! - **deauth**: Deauthentication flood against connected clients
//! - **evil_twin**: Rogue access point cloning a trusted SSID
//! - **ssid_spam**: Beacon flood of fake network names
//! - **probe_flood**: Probe request flood against access points
//!
//! The catalog is built once and shared read-only (`Arc<AttackCatalog>`)
//! between the controller and anything that renders it.

use crate::core::{AttackDefinition, Severity};

/// Narrative returned for an unknown attack or an out-of-range phase.
pub const UNKNOWN_PHASE: &str = "Unknown phase";

/// Immutable table of attack definitions
#[derive(Debug, Clone)]
pub struct AttackCatalog {
    attacks: Vec<AttackDefinition>,
}

impl AttackCatalog {
    /// Build a catalog from explicit definitions
    pub fn new(attacks: Vec<AttackDefinition>) -> Self {
        Self { attacks }
    }

    /// The four attacks shipped with Wi-Guard
    pub fn builtin() -> Self {
        Self::new(vec![
            AttackDefinition {
                id: "deauth",
                name: "Deauthentication Flood",
                description: "Simulates mass client disconnection attacks",
                severity: Severity::High,
                phase_narratives: [
                    "Scanning for target networks...",
                    "Identifying connected clients...",
                    "Sending deauth packets...",
                    "Monitoring disconnections...",
                    "Attack pattern detected by ML engine",
                ],
            },
            AttackDefinition {
                id: "evil_twin",
                name: "Evil Twin AP",
                description: "Creates fake access point to capture credentials",
                severity: Severity::Critical,
                phase_narratives: [
                    "Creating fake access point...",
                    "Broadcasting spoofed SSID...",
                    "Waiting for client connections...",
                    "Capturing authentication attempts...",
                    "Suspicious AP behavior flagged",
                ],
            },
            AttackDefinition {
                id: "ssid_spam",
                name: "SSID Spoofing",
                description: "Floods area with fake network names",
                severity: Severity::Medium,
                phase_narratives: [
                    "Generating fake network names...",
                    "Broadcasting multiple SSIDs...",
                    "Overwhelming client devices...",
                    "Creating network confusion...",
                    "Abnormal beacon patterns detected",
                ],
            },
            AttackDefinition {
                id: "probe_flood",
                name: "Probe Request Flood",
                description: "Overwhelms APs with connection requests",
                severity: Severity::Medium,
                phase_narratives: [
                    "Initiating probe requests...",
                    "Flooding target access points...",
                    "Overwhelming AP resources...",
                    "Monitoring response times...",
                    "Unusual traffic patterns identified",
                ],
            },
        ])
    }

    /// Look up an attack by id
    pub fn get(&self, attack_id: &str) -> Option<&AttackDefinition> {
        self.attacks.iter().find(|a| a.id == attack_id)
    }

    pub fn contains(&self, attack_id: &str) -> bool {
        self.get(attack_id).is_some()
    }

    /// All attacks in catalog order
    pub fn list(&self) -> &[AttackDefinition] {
        &self.attacks
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.attacks.iter().map(|a| a.id).collect()
    }

    /// Scripted narrative for a phase of an attack.
    ///
    /// Never fails: an unknown attack id or a phase index past the script
    /// yields [`UNKNOWN_PHASE`].
    pub fn phase_narrative(&self, attack_id: &str, phase_index: usize) -> &'static str {
        self.get(attack_id)
            .and_then(|a| a.phase_narratives.get(phase_index).copied())
            .unwrap_or(UNKNOWN_PHASE)
    }
}

impl Default for AttackCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids() {
        let catalog = AttackCatalog::builtin();
        assert_eq!(
            catalog.ids(),
            vec!["deauth", "evil_twin", "ssid_spam", "probe_flood"]
        );
    }

    #[test]
    fn test_deauth_narratives() {
        let catalog = AttackCatalog::builtin();
        assert_eq!(
            catalog.phase_narrative("deauth", 0),
            "Scanning for target networks..."
        );
        assert_eq!(
            catalog.phase_narrative("deauth", 4),
            "Attack pattern detected by ML engine"
        );
    }

    #[test]
    fn test_unknown_attack_falls_back() {
        let catalog = AttackCatalog::builtin();
        assert_eq!(catalog.phase_narrative("unknown-id", 2), UNKNOWN_PHASE);
        assert_eq!(catalog.phase_narrative("", 0), UNKNOWN_PHASE);
    }

    #[test]
    fn test_out_of_range_phase_falls_back() {
        let catalog = AttackCatalog::builtin();
        assert_eq!(catalog.phase_narrative("evil_twin", 5), UNKNOWN_PHASE);
        assert_eq!(catalog.phase_narrative("evil_twin", usize::MAX), UNKNOWN_PHASE);
    }

    #[test]
    fn test_severities() {
        let catalog = AttackCatalog::builtin();
        assert_eq!(catalog.get("evil_twin").unwrap().severity, Severity::Critical);
        assert_eq!(catalog.get("deauth").unwrap().severity, Severity::High);
        assert!(catalog.get("wps_pixie").is_none());
    }
}
