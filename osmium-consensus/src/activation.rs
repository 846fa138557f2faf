//! Whether a masternode hard fork (EHF) signal may activate a deployment bit.

use log::{info, warn};
use osmium_shared_types::{Deployments, VERSIONBITS_NUM_BITS};

/// Checks a masternode activation request for `bit` at median time `time_past`.
///
/// A configured bit is valid only inside its `[start_time, timeout]` window
/// and only when the deployment is EHF eligible. Bits no deployment uses are
/// accepted with a warning so future forks are not blocked. Bits outside the
/// version bits range are rejected.
pub fn is_valid_mn_activation(deployments: &Deployments, bit: u8, time_past: i64) -> bool {
    if bit >= VERSIONBITS_NUM_BITS {
        warn!("MnEHF bit={} is outside the {} usable version bits", bit, VERSIONBITS_NUM_BITS);
        return false;
    }

    match deployments.find_by_bit(bit) {
        Some((pos, deployment)) => {
            if !deployment.is_in_window(time_past) {
                info!(
                    "Activation by bit={} deployment='{}' is out of time range start={} timeout={}",
                    bit,
                    pos.name(),
                    deployment.start_time,
                    deployment.timeout
                );
                return false;
            }
            if !deployment.use_ehf {
                info!("Trying to set MnEHF for non-masternode activation fork bit={}", bit);
                return false;
            }
            info!("Set MnEHF for bit={} is valid", bit);
            true
        }
        None => {
            warn!("Unknown MnEHF fork bit={}", bit);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osmium_shared_types::{Deployment, DeploymentPos};

    fn table() -> Deployments {
        let mut table = Deployments::default();
        table[DeploymentPos::TestDummy] = Deployment { bit: 28, ..Default::default() };
        table[DeploymentPos::V20] =
            Deployment { bit: 9, start_time: 0, timeout: 100, ..Default::default() };
        table[DeploymentPos::MnRr] =
            Deployment { bit: 10, start_time: 0, timeout: 100, use_ehf: true, ..Default::default() };
        table
    }

    #[test]
    fn ehf_deployment_window() {
        let table = table();
        assert!(is_valid_mn_activation(&table, 10, 50));
        assert!(is_valid_mn_activation(&table, 10, 0));
        assert!(is_valid_mn_activation(&table, 10, 100));
        assert!(!is_valid_mn_activation(&table, 10, 150));
        assert!(!is_valid_mn_activation(&table, 10, -1));
    }

    #[test]
    fn non_ehf_deployment_is_rejected() {
        assert!(!is_valid_mn_activation(&table(), 9, 50));
    }

    #[test]
    fn unknown_bit_is_permissive() {
        let table = table();
        for bit in [1u8, 5, 27] {
            assert!(is_valid_mn_activation(&table, bit, 50));
        }
    }

    #[test]
    fn out_of_range_bit_is_rejected() {
        assert!(!is_valid_mn_activation(&table(), 29, 50));
        assert!(!is_valid_mn_activation(&table(), 255, 50));
    }
}
