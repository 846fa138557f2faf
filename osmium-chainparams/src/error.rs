use osmium_consensus::ConsensusError;
use osmium_shared_types::{Hash256, Network, ParseNetworkError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainParamsError {
    #[error("Unknown chain {0}")]
    UnknownNetwork(String),

    #[error("{network} genesis hash mismatch: expected {expected}, computed {actual}")]
    GenesisHashMismatch { network: Network, expected: Hash256, actual: Hash256 },

    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {actual}")]
    GenesisMerkleMismatch { network: Network, expected: Hash256, actual: Hash256 },

    #[error("Could not find devnet genesis block for {name}: {source}")]
    DevnetGenesisNotFound { name: String, source: ConsensusError },

    #[error("{what} parameters malformed, expecting {expected}")]
    MalformedOverride { what: &'static str, expected: &'static str },

    #[error("Invalid {field} ({value})")]
    InvalidOverrideValue { field: String, value: String },

    #[error("Invalid deployment ({0})")]
    UnknownDeployment(String),

    #[error("Invalid LLMQ type specified for -{option}: {name}")]
    InvalidLlmqType { option: &'static str, name: String },

    #[error("LLMQ type {name} specified for -{option} {rule}")]
    LlmqRotationMismatch { option: &'static str, name: String, rule: &'static str },

    #[error("Chain parameters already selected for {0}")]
    AlreadySelected(Network),

    #[error("Chain parameters have not been selected")]
    NotSelected,

    #[error(transparent)]
    Consensus(ConsensusError),
}

impl ChainParamsError {
    /// Attaches the network to a genesis self-check failure.
    pub fn genesis(network: Network, err: ConsensusError) -> Self {
        match err {
            ConsensusError::GenesisHashMismatch { expected, actual } => {
                ChainParamsError::GenesisHashMismatch { network, expected, actual }
            }
            ConsensusError::GenesisMerkleMismatch { expected, actual } => {
                ChainParamsError::GenesisMerkleMismatch { network, expected, actual }
            }
            other => ChainParamsError::Consensus(other),
        }
    }
}

impl From<ConsensusError> for ChainParamsError {
    fn from(err: ConsensusError) -> Self {
        ChainParamsError::Consensus(err)
    }
}

impl From<ParseNetworkError> for ChainParamsError {
    fn from(err: ParseNetworkError) -> Self {
        ChainParamsError::UnknownNetwork(err.0)
    }
}

pub type Result<T> = std::result::Result<T, ChainParamsError>;
