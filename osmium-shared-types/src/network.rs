use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Network profiles a node can run on. Chosen once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Test,
    Devnet,
    Regtest,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown chain {0}")]
pub struct ParseNetworkError(pub String);

impl Network {
    pub const ALL: [Network; 4] = [Network::Main, Network::Test, Network::Devnet, Network::Regtest];

    /// Network id string as used on the command line and in data directories.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Devnet => "devnet",
            Network::Regtest => "regtest",
        }
    }

    /// Devnet and regtest accept startup overrides; main and test never do.
    pub fn allows_overrides(&self) -> bool {
        matches!(self, Network::Devnet | Network::Regtest)
    }

    /// Only the public networks resize their quorums with the masternode count.
    pub fn adapts_quorums(&self) -> bool {
        matches!(self, Network::Main | Network::Test)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "devnet" => Ok(Network::Devnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(ParseNetworkError(other.to_string())),
        }
    }
}
