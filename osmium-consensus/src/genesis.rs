//! Genesis block synthesis and the startup self-check against hard-coded hashes.

use log::{debug, info};
use osmium_shared_types::{Amount, Hash256};

use crate::block::{Block, BlockHeader, CoinbaseTransaction, ScriptBuilder, OP_CHECKSIG, OP_RETURN};
use crate::error::{ConsensusError, ConsensusResult};
use crate::pow::{search_nonce, PowHasher};

pub const GENESIS_TIMESTAMP: &str = "Are You Not Entertained? - Maximus Decimus Meridius";

/// Uncompressed public key the genesis coinbase pays to.
pub const GENESIS_OUTPUT_PUBKEY: [u8; 65] = [
    0x04, 0x2b, 0xc4, 0x8e, 0x0a, 0x28, 0xee, 0x4f, 0x3d, 0x01, 0x9c, 0xe8, 0x39, 0xc1, 0xb0, 0x9c,
    0x88, 0x33, 0xb9, 0xf1, 0x3c, 0xa8, 0x75, 0x30, 0x80, 0xbf, 0x45, 0x77, 0x1d, 0xf0, 0xf2, 0xb4,
    0xd2, 0xbe, 0xd1, 0xb4, 0x4a, 0xef, 0xce, 0x24, 0xfa, 0x16, 0x47, 0x78, 0xe6, 0xfd, 0xc7, 0xfb,
    0x56, 0xe9, 0x73, 0xed, 0x77, 0x5f, 0xdb, 0x53, 0x93, 0x5b, 0xa9, 0x0f, 0x3a, 0xe8, 0xd1, 0x6c,
    0x4b,
];

/// Compact target pushed into every genesis coinbase scriptSig.
const GENESIS_SCRIPT_BITS: i64 = 486_604_799;

/// Hard-coded values a synthesized genesis block must reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisExpectation {
    pub hash: Hash256,
    pub merkle_root: Hash256,
}

/// Builds a genesis block paying `reward` with an arbitrary timestamp and output script.
pub fn create_genesis_block_with(
    timestamp: &str,
    output_script: Vec<u8>,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: Amount,
) -> Block {
    let script_sig = ScriptBuilder::new()
        .push_int(GENESIS_SCRIPT_BITS)
        .push_script_num(4)
        .push_slice(timestamp.as_bytes())
        .into_bytes();
    let coinbase = CoinbaseTransaction {
        version: 1,
        script_sig,
        value: reward,
        script_pubkey: output_script,
    };
    let header = BlockHeader {
        version,
        prev_block_hash: Hash256::ZERO,
        merkle_root: coinbase.txid(),
        time,
        bits,
        nonce,
    };
    Block { header, coinbase }
}

/// The chain's genesis block with the fixed timestamp and payout key.
pub fn create_genesis_block(time: u32, nonce: u32, bits: u32, version: i32, reward: Amount) -> Block {
    let output_script = ScriptBuilder::new()
        .push_slice(&GENESIS_OUTPUT_PUBKEY)
        .push_opcode(OP_CHECKSIG)
        .into_bytes();
    create_genesis_block_with(GENESIS_TIMESTAMP, output_script, time, nonce, bits, version, reward)
}

/// The second block of a devnet, which carries the devnet name so that
/// devnets sharing a genesis still diverge at height 1.
pub fn create_devnet_genesis_block(
    prev_block_hash: Hash256,
    devnet_name: &str,
    time: u32,
    nonce: u32,
    bits: u32,
    reward: Amount,
) -> Block {
    let script_sig = ScriptBuilder::new()
        .push_int(1)
        .push_slice(devnet_name.as_bytes())
        .into_bytes();
    let coinbase = CoinbaseTransaction {
        version: 1,
        script_sig,
        value: reward,
        script_pubkey: ScriptBuilder::new().push_opcode(OP_RETURN).into_bytes(),
    };
    let header = BlockHeader {
        version: 4,
        prev_block_hash,
        merkle_root: coinbase.txid(),
        time,
        bits,
        nonce,
    };
    Block { header, coinbase }
}

/// Searches the whole nonce space for a devnet genesis block following `prev`.
pub fn find_devnet_genesis_block(
    prev: &Block,
    prev_hash: Hash256,
    devnet_name: &str,
    reward: Amount,
    hasher: &dyn PowHasher,
) -> ConsensusResult<Block> {
    let mut block = create_devnet_genesis_block(
        prev_hash,
        devnet_name,
        prev.header.time.wrapping_add(1),
        0,
        prev.header.bits,
        reward,
    );
    block.header = search_nonce(block.header, 0..=u32::MAX, hasher)?;
    info!(
        "Found devnet genesis block for {} at nonce {}",
        devnet_name, block.header.nonce
    );
    Ok(block)
}

/// Checks a synthesized genesis block and returns the hash to record for it.
///
/// The merkle root is always recomputed. The header hash is only recomputed
/// when `hasher` is given; otherwise the expected hash is adopted.
pub fn verify_genesis(
    block: &Block,
    expected: &GenesisExpectation,
    hasher: Option<&dyn PowHasher>,
) -> ConsensusResult<Hash256> {
    let merkle_root = block.compute_merkle_root();
    if merkle_root != expected.merkle_root {
        return Err(ConsensusError::GenesisMerkleMismatch {
            expected: expected.merkle_root,
            actual: merkle_root,
        });
    }

    match hasher {
        Some(hasher) => {
            let hash = hasher.pow_hash(&block.header);
            if hash != expected.hash {
                return Err(ConsensusError::GenesisHashMismatch {
                    expected: expected.hash,
                    actual: hash,
                });
            }
            Ok(hash)
        }
        None => {
            debug!("No header hasher supplied, adopting genesis hash {}", expected.hash);
            Ok(expected.hash)
        }
    }
}
