//! EVM 地址 (Ethereum / BSC)
//!
//! 0x + Keccak-256(载荷) 后 20 字节的十六进制，附 EIP-55 大小写校验。
//! https://eips.ethereum.org/EIPS/eip-55

use sha3::{Digest, Keccak256};

use super::{payload_digest, AddressCodec};
use crate::{
    domain::{
        chain_config::ChainId,
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

pub(crate) const EVM_ADDRESS_LEN: usize = 42;

pub struct EvmCodec {
    chain: ChainId,
}

impl EvmCodec {
    pub fn new(chain: ChainId) -> Self {
        Self { chain }
    }
}

impl AddressCodec for EvmCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let digest = payload_digest(self.chain, key, user);
        let hash = Keccak256::digest(digest);
        Ok(to_checksum_address(&hash[12..]))
    }

    fn is_well_formed(&self, address: &str) -> bool {
        // 1. 基本格式检查
        let Some(hex_part) = address.strip_prefix("0x") else {
            return false;
        };
        if address.len() != EVM_ADDRESS_LEN {
            return false;
        }

        // 2. 验证hex字符
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }

        // 3. EIP-55 Checksum验证（如果地址包含大写字母）
        if hex_part.chars().any(|c| c.is_ascii_uppercase()) {
            return verify_eip55_checksum(hex_part);
        }

        true
    }
}

/// 生成 EIP-55 校验和地址
pub(crate) fn to_checksum_address(address_bytes: &[u8]) -> String {
    let lower = hex::encode(address_bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        if ch.is_ascii_alphabetic() && hash_nibble(&hash, i) >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn verify_eip55_checksum(hex_part: &str) -> bool {
    let lower = hex_part.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    hex_part.chars().enumerate().all(|(i, ch)| {
        if !ch.is_ascii_alphabetic() {
            return true;
        }
        ch.is_ascii_uppercase() == (hash_nibble(&hash, i) >= 8)
    })
}

fn hash_nibble(hash: &[u8], i: usize) -> u8 {
    let byte = hash[i / 2];
    if i % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0f
    }
}
