//! TON 用户友好地址
//!
//! 36 字节：flag(0x51, non-bounceable) + workchain(0) + 32 字节账户哈希 + CRC16-XMODEM，
//! base64url 编码后 48 个字符，固定以 `UQ` 开头。
//! 校验接受 `UQ` / `EQ`（bounceable）两种前缀，只看形状。

use base64::Engine;

use super::{all_in_alphabet, payload_digest, AddressCodec, BASE64URL_ALPHABET};
use crate::{
    domain::{
        chain_config::ChainId,
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

pub(crate) const TON_ADDRESS_LEN: usize = 48;
const NON_BOUNCEABLE_FLAG: u8 = 0x51;
const BASECHAIN: u8 = 0x00;

pub struct TonCodec {
    chain: ChainId,
}

impl TonCodec {
    pub fn new(chain: ChainId) -> Self {
        Self { chain }
    }
}

impl AddressCodec for TonCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let account = payload_digest(self.chain, key, user);

        let mut raw = Vec::with_capacity(36);
        raw.push(NON_BOUNCEABLE_FLAG);
        raw.push(BASECHAIN);
        raw.extend_from_slice(&account);
        let crc = crc16_xmodem(&raw);
        raw.extend_from_slice(&crc.to_be_bytes());

        let address = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&raw);
        if !address.starts_with("UQ") {
            return Err(DerivationError::encoding(
                self.chain,
                "user-friendly encoding did not yield UQ prefix",
            ));
        }
        Ok(address)
    }

    fn is_well_formed(&self, address: &str) -> bool {
        address.len() == TON_ADDRESS_LEN
            && (address.starts_with("UQ") || address.starts_with("EQ"))
            && all_in_alphabet(address, BASE64URL_ALPHABET)
    }
}

/// CRC16-XMODEM (poly 0x1021, init 0)
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
