//! Base58Check 地址
//!
//! 版本字节 + 20 字节载荷 + 双 SHA-256 校验和前 4 字节。
//! - Bitcoin 字母表：Tron (0x41 → `T`)、Dogecoin (0x1e → `D`)，固定 34 字符
//! - Ripple 字母表：XRP (0x00 → `r`)，25..=35 字符
//!
//! 校验只看形状，不重新计算校验和。

use super::{
    all_in_alphabet, double_sha256_checksum, payload_digest, AddressCodec, BASE58_ALPHABET,
    RIPPLE_ALPHABET,
};
use crate::{
    domain::{
        chain_config::ChainId,
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

pub(crate) const BASE58CHECK_LEN: usize = 34;
pub(crate) const RIPPLE_MIN_LEN: usize = 25;
pub(crate) const RIPPLE_MAX_LEN: usize = 35;

fn versioned_payload(version: u8, body: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + body.len() + 4);
    payload.push(version);
    payload.extend_from_slice(body);
    let checksum = double_sha256_checksum(&payload);
    payload.extend_from_slice(&checksum);
    payload
}

pub struct Base58CheckCodec {
    chain: ChainId,
    version: u8,
    prefix: char,
}

impl Base58CheckCodec {
    pub fn new(chain: ChainId, version: u8, prefix: char) -> Self {
        Self {
            chain,
            version,
            prefix,
        }
    }
}

impl AddressCodec for Base58CheckCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let digest = payload_digest(self.chain, key, user);
        let address = bs58::encode(versioned_payload(self.version, &digest[..20])).into_string();

        if !address.starts_with(self.prefix) || address.len() != BASE58CHECK_LEN {
            return Err(DerivationError::encoding(
                self.chain,
                format!("version byte {:#04x} did not yield prefix {}", self.version, self.prefix),
            ));
        }
        Ok(address)
    }

    fn is_well_formed(&self, address: &str) -> bool {
        address.len() == BASE58CHECK_LEN
            && address.starts_with(self.prefix)
            && all_in_alphabet(address, BASE58_ALPHABET)
    }
}

pub struct RippleCodec {
    chain: ChainId,
}

impl RippleCodec {
    const VERSION: u8 = 0x00;

    pub fn new(chain: ChainId) -> Self {
        Self { chain }
    }
}

impl AddressCodec for RippleCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let digest = payload_digest(self.chain, key, user);
        let address = bs58::encode(versioned_payload(Self::VERSION, &digest[..20]))
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_string();

        if !self.is_well_formed(&address) {
            return Err(DerivationError::encoding(
                self.chain,
                "ripple encoding produced unexpected shape",
            ));
        }
        Ok(address)
    }

    fn is_well_formed(&self, address: &str) -> bool {
        (RIPPLE_MIN_LEN..=RIPPLE_MAX_LEN).contains(&address.len())
            && address.starts_with('r')
            && all_in_alphabet(address, RIPPLE_ALPHABET)
    }
}
