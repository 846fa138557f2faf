//! Version bits soft-fork deployments.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of header version bits usable for signalling.
pub const VERSIONBITS_NUM_BITS: u8 = 29;

/// Number of deployment slots in every profile.
pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 3;

/// Known deployment kinds, one slot each in [`Deployments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeploymentPos {
    TestDummy = 0,
    V20 = 1,
    MnRr = 2,
}

/// Static description of a deployment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentInfo {
    /// Name used by `vbparams` overrides and getblocktemplate rules
    pub name: &'static str,
    /// Whether getblocktemplate clients may ignore the rule
    pub gbt_force: bool,
}

impl DeploymentPos {
    pub const ALL: [DeploymentPos; MAX_VERSION_BITS_DEPLOYMENTS] =
        [DeploymentPos::TestDummy, DeploymentPos::V20, DeploymentPos::MnRr];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> DeploymentInfo {
        match self {
            DeploymentPos::TestDummy => DeploymentInfo { name: "testdummy", gbt_force: true },
            DeploymentPos::V20 => DeploymentInfo { name: "v20", gbt_force: true },
            DeploymentPos::MnRr => DeploymentInfo { name: "mn_rr", gbt_force: true },
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pos| pos.name() == name)
    }
}

/// Activation parameters of a single deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Bit position to select the particular bit in nVersion
    pub bit: u8,
    /// Median time past at which voting starts
    pub start_time: i64,
    /// Median time past after which the attempt is considered failed
    pub timeout: i64,
    /// Signalling window in blocks
    pub window_size: i64,
    /// Blocks required in the first window
    pub threshold_start: i64,
    /// Floor the threshold decays to
    pub threshold_min: i64,
    /// Threshold decay coefficient
    pub falloff_coeff: i64,
    /// Eligible for masternode hard fork (EHF) signalling
    pub use_ehf: bool,
}

impl Deployment {
    /// Timeout value meaning "never expires".
    pub const NO_TIMEOUT: i64 = i64::MAX;

    /// Start time that marks a deployment as always active.
    pub const ALWAYS_ACTIVE: i64 = -1;

    /// Whether `time_past` lies inside `[start_time, timeout]`.
    pub fn is_in_window(&self, time_past: i64) -> bool {
        time_past >= self.start_time && time_past <= self.timeout
    }
}

/// Fixed-size table holding one [`Deployment`] per [`DeploymentPos`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments([Deployment; MAX_VERSION_BITS_DEPLOYMENTS]);

impl Deployments {
    pub fn new(table: [Deployment; MAX_VERSION_BITS_DEPLOYMENTS]) -> Self {
        Deployments(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeploymentPos, &Deployment)> {
        DeploymentPos::ALL.into_iter().zip(self.0.iter())
    }

    /// First deployment configured on `bit`, if any.
    pub fn find_by_bit(&self, bit: u8) -> Option<(DeploymentPos, &Deployment)> {
        self.iter().find(|(_, deployment)| deployment.bit == bit)
    }
}

impl Index<DeploymentPos> for Deployments {
    type Output = Deployment;

    fn index(&self, pos: DeploymentPos) -> &Deployment {
        &self.0[pos.index()]
    }
}

impl IndexMut<DeploymentPos> for Deployments {
    fn index_mut(&mut self, pos: DeploymentPos) -> &mut Deployment {
        &mut self.0[pos.index()]
    }
}
