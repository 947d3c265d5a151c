//! Cardano Shelley 地址 (addr1...)
//!
//! Shelley Base Address 组成:
//! - Header (1 byte): 0x01 = base address, mainnet
//! - Payment credential (28 bytes): Blake2b-224
//! - Stake credential (28 bytes): Blake2b-224
//! - Bech32 编码，前缀 "addr"
//!
//! 两个凭证都来自派生密钥的哈希，而不是真实的 Ed25519 公钥。

use bech32::Hrp;
use blake2::{
    digest::{Update, VariableOutput},
    Blake2bVar,
};

use super::{all_in_alphabet, AddressCodec, BECH32_CHARSET};
use crate::{
    domain::{
        chain_config::ChainId,
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

/// enterprise 地址 58 字符，base 地址 103 字符
pub(crate) const CARDANO_MIN_LEN: usize = 58;
pub(crate) const CARDANO_MAX_LEN: usize = 108;
const BASE_ADDRESS_MAINNET: u8 = 0x01;
const CREDENTIAL_LEN: usize = 28;

pub struct CardanoCodec {
    chain: ChainId,
    hrp: &'static str,
}

impl CardanoCodec {
    pub fn new(chain: ChainId, hrp: &'static str) -> Self {
        Self { chain, hrp }
    }

    fn credential(
        &self,
        role: &[u8],
        key: &DerivedKey,
        user: UserId,
    ) -> Result<[u8; CREDENTIAL_LEN], DerivationError> {
        let mut hasher = Blake2bVar::new(CREDENTIAL_LEN)
            .map_err(|e| DerivationError::encoding(self.chain, format!("blake2b: {}", e)))?;
        hasher.update(self.chain.config().domain_tag.as_bytes());
        hasher.update(role);
        hasher.update(key.as_bytes());
        hasher.update(&user.to_be_bytes());

        let mut output = [0u8; CREDENTIAL_LEN];
        hasher
            .finalize_variable(&mut output)
            .map_err(|e| DerivationError::encoding(self.chain, format!("blake2b: {}", e)))?;
        Ok(output)
    }
}

impl AddressCodec for CardanoCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let payment = self.credential(b"payment", key, user)?;
        let stake = self.credential(b"stake", key, user)?;

        let mut address_bytes = Vec::with_capacity(1 + 2 * CREDENTIAL_LEN);
        address_bytes.push(BASE_ADDRESS_MAINNET);
        address_bytes.extend_from_slice(&payment);
        address_bytes.extend_from_slice(&stake);

        let hrp = Hrp::parse(self.hrp)
            .map_err(|e| DerivationError::encoding(self.chain, format!("invalid hrp: {}", e)))?;
        bech32::encode::<bech32::Bech32>(hrp, &address_bytes)
            .map_err(|e| DerivationError::encoding(self.chain, format!("bech32: {}", e)))
    }

    fn is_well_formed(&self, address: &str) -> bool {
        let Some(data) = address
            .strip_prefix(self.hrp)
            .and_then(|rest| rest.strip_prefix('1'))
        else {
            return false;
        };

        (CARDANO_MIN_LEN..=CARDANO_MAX_LEN).contains(&address.len())
            && all_in_alphabet(data, BECH32_CHARSET)
    }
}
