//! Minimal block and coinbase encoding, enough to synthesize genesis blocks.
//!
//! Transactions use the legacy serialization (no extra payload) and the
//! merkle root of a single-transaction block is that transaction's txid.

use osmium_shared_types::{Amount, Hash256};
use sha2::{Digest, Sha256};

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_CHECKSIG: u8 = 0xac;

/// Double SHA-256.
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    Hash256(out)
}

fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        out.push(n as u8);
    } else if n <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&n.to_le_bytes());
    }
}

/// Minimal-encoding script number, little-endian with a sign bit.
pub fn script_num_bytes(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut result = Vec::new();
    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    // result is non-empty here
    let last = result.len() - 1;
    if result[last] & 0x80 != 0 {
        result.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        result[last] |= 0x80;
    }
    result
}

/// Builds scripts the same way the reference client's `CScript <<` does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuilder(Vec<u8>);

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Small integers become OP_N, everything else a script number push.
    pub fn push_int(self, n: i64) -> Self {
        match n {
            0 => self.push_opcode(OP_0),
            -1 => self.push_opcode(OP_1NEGATE),
            1..=16 => self.push_opcode(OP_1 + (n as u8 - 1)),
            _ => self.push_slice(&script_num_bytes(n)),
        }
    }

    pub fn push_script_num(self, n: i64) -> Self {
        self.push_slice(&script_num_bytes(n))
    }

    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// A coinbase transaction with one null-prevout input and one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinbaseTransaction {
    pub version: i32,
    pub script_sig: Vec<u8>,
    pub value: Amount,
    pub script_pubkey: Vec<u8>,
}

impl CoinbaseTransaction {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64 + self.script_sig.len() + self.script_pubkey.len());
        out.extend_from_slice(&self.version.to_le_bytes());
        write_compact_size(&mut out, 1);
        out.extend_from_slice(&[0u8; 32]);
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        write_compact_size(&mut out, self.script_sig.len() as u64);
        out.extend_from_slice(&self.script_sig);
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        write_compact_size(&mut out, 1);
        out.extend_from_slice(&self.value.to_le_bytes());
        write_compact_size(&mut out, self.script_pubkey.len() as u64);
        out.extend_from_slice(&self.script_pubkey);
        out.extend_from_slice(&0u32.to_le_bytes());
        out
    }

    pub fn txid(&self) -> Hash256 {
        sha256d(&self.serialize())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub const SERIALIZED_SIZE: usize = 80;

    pub fn serialize(&self) -> [u8; Self::SERIALIZED_SIZE] {
        let mut out = [0u8; Self::SERIALIZED_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }
}

/// A block holding only its coinbase, which is all a genesis block needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub coinbase: CoinbaseTransaction,
}

impl Block {
    pub fn compute_merkle_root(&self) -> Hash256 {
        self.coinbase.txid()
    }

    pub fn time(&self) -> u32 {
        self.header.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_numbers_use_minimal_encoding() {
        assert_eq!(script_num_bytes(0), Vec::<u8>::new());
        assert_eq!(script_num_bytes(4), vec![0x04]);
        assert_eq!(script_num_bytes(128), vec![0x80, 0x00]);
        assert_eq!(script_num_bytes(-1), vec![0x81]);
        assert_eq!(script_num_bytes(486604799), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn push_int_prefers_small_opcodes() {
        assert_eq!(ScriptBuilder::new().push_int(1).into_bytes(), vec![OP_1]);
        assert_eq!(ScriptBuilder::new().push_int(16).into_bytes(), vec![0x60]);
        assert_eq!(ScriptBuilder::new().push_int(0).into_bytes(), vec![OP_0]);
        assert_eq!(
            ScriptBuilder::new().push_int(17).into_bytes(),
            vec![0x01, 0x11]
        );
    }

    #[test]
    fn long_pushes_use_pushdata() {
        let data = vec![0xaa; 80];
        let script = ScriptBuilder::new().push_slice(&data).into_bytes();
        assert_eq!(&script[..2], &[OP_PUSHDATA1, 80]);
        assert_eq!(script.len(), 82);
    }

    #[test]
    fn header_layout_is_80_bytes() {
        let header = BlockHeader {
            version: 1,
            prev_block_hash: Hash256::ZERO,
            merkle_root: Hash256([0x11; 32]),
            time: 0x01020304,
            bits: 0x207fffff,
            nonce: 7,
        };
        let bytes = header.serialize();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[36..68], &[0x11; 32]);
        assert_eq!(&bytes[68..72], &[4, 3, 2, 1]);
        assert_eq!(&bytes[72..76], &[0xff, 0xff, 0x7f, 0x20]);
        assert_eq!(&bytes[76..80], &[7, 0, 0, 0]);
    }
}
