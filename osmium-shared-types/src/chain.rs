//! Chain-level records: checkpoints, snapshots, address prefixes and the dev fee schedule.

use serde::{Deserialize, Serialize};

use crate::{Amount, Hash256};

/// A trusted (height, hash) pair used to anchor fast sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: Hash256,
}

/// A UTXO snapshot the node may assume valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssumeutxoData {
    pub height: u32,
    /// Hash of the serialized UTXO set at `height`
    pub hash_serialized: Hash256,
    /// Total number of transactions up to and including `height`
    pub chain_tx_count: u64,
}

/// Chain transaction statistics used for sync progress estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainTxData {
    /// UNIX timestamp of last known number of transactions
    pub time: i64,
    /// Total number of transactions between genesis and that timestamp
    pub tx_count: u64,
    /// Estimated number of transactions per second after that timestamp
    pub tx_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

/// Version bytes for every base58 encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

/// One step of the dev fee schedule: `reward_percentage` applies up to `block_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevfeeRewardStructure {
    pub block_height: i32,
    pub reward_percentage: i64,
}

/// Dev fee paid out of each block reward after `start_block_height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevfeePayment {
    pub reward_structures: Vec<DevfeeRewardStructure>,
    pub start_block_height: i32,
    /// Payout address; `None` means the client default
    pub address: Option<String>,
}

impl DevfeePayment {
    pub fn new(
        reward_structures: Vec<DevfeeRewardStructure>,
        start_block_height: i32,
        address: Option<&str>,
    ) -> Self {
        Self {
            reward_structures,
            start_block_height,
            address: address.map(str::to_string),
        }
    }

    /// Dev fee owed at `block_height` for a block paying `block_reward`.
    pub fn dev_fee_amount(&self, block_height: i32, block_reward: Amount) -> Amount {
        if block_height <= self.start_block_height {
            return 0;
        }
        self.reward_structures
            .iter()
            .find(|s| s.block_height == i32::MAX || block_height <= s.block_height)
            .and_then(|s| {
                let fee = i128::from(block_reward) * i128::from(s.reward_percentage) / 100;
                Amount::try_from(fee).ok()
            })
            .unwrap_or(0)
    }
}
