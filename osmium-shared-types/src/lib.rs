//! Plain data types shared by the Osmium consensus and chain parameter crates.
//!
//! Nothing in here knows which network is selected; these are the records the
//! profile registry fills in and every other subsystem reads.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub mod chain;
pub mod deployment;
pub mod llmq;
pub mod network;

pub use chain::{
    AssumeutxoData, Base58Prefixes, Base58Type, ChainTxData, Checkpoint, DevfeePayment,
    DevfeeRewardStructure,
};
pub use deployment::{
    Deployment, DeploymentInfo, DeploymentPos, Deployments, MAX_VERSION_BITS_DEPLOYMENTS,
    VERSIONBITS_NUM_BITS,
};
pub use llmq::{LlmqParams, LlmqType};
pub use network::{Network, ParseNetworkError};

/// Amount in the smallest currency unit.
pub type Amount = i64;

/// One whole coin.
pub const COIN: Amount = 100_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashParseError {
    #[error("Hash hex string too long: {0} digits")]
    TooLong(usize),

    #[error("Invalid hex in hash: {0}")]
    InvalidHex(String),
}

/// A 256-bit hash stored in internal (little-endian) byte order.
///
/// Display and serde use the reversed, big-endian hex form that block
/// explorers print, so `00000df9...` reads the same in code and in logs.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Parses a display-order hex literal at compile time.
    ///
    /// Shorter literals are right-aligned, so `"0x00"` is the zero hash.
    /// Intended for `const` items only; a malformed literal fails the build.
    pub const fn from_hex_const(s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut start = 0;
        if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
            start = 2;
        }
        let digits = bytes.len() - start;
        assert!(digits <= 64, "hash literal longer than 64 hex digits");

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < digits {
            let c = bytes[bytes.len() - 1 - i];
            let nibble = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit in hash literal"),
            };
            if i % 2 == 0 {
                out[i / 2] |= nibble;
            } else {
                out[i / 2] |= nibble << 4;
            }
            i += 1;
        }
        Hash256(out)
    }

    /// Parses a display-order hex string supplied at runtime.
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if digits.len() > 64 {
            return Err(HashParseError::TooLong(digits.len()));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes: [u8; 32] = hex::decode(&padded)
            .map_err(|_| HashParseError::InvalidHex(s.to_string()))?
            .try_into()
            .map_err(|_| HashParseError::InvalidHex(s.to_string()))?;
        bytes.reverse();
        Ok(Hash256(bytes))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Display-order hex string.
    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const GENESIS: Hash256 =
        Hash256::from_hex_const("0x00000df94c615d91d23f22f8facd46e4b06e17f4214fff88af826ef77fdac797");

    #[test]
    fn const_and_runtime_parsers_agree() {
        let runtime =
            Hash256::from_hex("00000df94c615d91d23f22f8facd46e4b06e17f4214fff88af826ef77fdac797")
                .unwrap();
        assert_eq!(GENESIS, runtime);
        assert_eq!(
            GENESIS.to_hex(),
            "00000df94c615d91d23f22f8facd46e4b06e17f4214fff88af826ef77fdac797"
        );
    }

    #[test]
    fn internal_order_is_little_endian() {
        let mut expected = hex!("00000df94c615d91d23f22f8facd46e4b06e17f4214fff88af826ef77fdac797");
        expected.reverse();
        assert_eq!(GENESIS.as_bytes(), &expected);
    }

    #[test]
    fn short_literals_are_right_aligned() {
        assert!(Hash256::from_hex_const("0x00").is_zero());
        let work = Hash256::from_hex_const("0x0000000000000000000000000000000000000000000000000000000000100010");
        assert_eq!(work.0[0], 0x10);
        assert_eq!(work.0[1], 0x00);
        assert_eq!(work.0[2], 0x10);
        assert_eq!(Hash256::from_hex("0x100010").unwrap(), work);
    }

    #[test]
    fn rejects_bad_runtime_input() {
        assert!(matches!(Hash256::from_hex("zz"), Err(HashParseError::InvalidHex(_))));
        let long = "0".repeat(65);
        assert_eq!(Hash256::from_hex(&long), Err(HashParseError::TooLong(65)));
    }

    #[test]
    fn serde_uses_display_hex() {
        let json = serde_json::to_string(&GENESIS).unwrap();
        assert_eq!(
            json,
            "\"00000df94c615d91d23f22f8facd46e4b06e17f4214fff88af826ef77fdac797\""
        );
        let back: Hash256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GENESIS);
    }
}
