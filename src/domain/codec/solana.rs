//! Solana 地址：32 字节的裸 Base58，无前缀、无校验和

use super::{all_in_alphabet, payload_digest, AddressCodec, BASE58_ALPHABET};
use crate::{
    domain::{
        chain_config::ChainId,
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

pub(crate) const SOLANA_MIN_LEN: usize = 32;
pub(crate) const SOLANA_MAX_LEN: usize = 44;

pub struct SolanaCodec {
    chain: ChainId,
}

impl SolanaCodec {
    pub fn new(chain: ChainId) -> Self {
        Self { chain }
    }
}

impl AddressCodec for SolanaCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let pubkey = payload_digest(self.chain, key, user);
        Ok(bs58::encode(pubkey).into_string())
    }

    fn is_well_formed(&self, address: &str) -> bool {
        if address.len() < SOLANA_MIN_LEN || address.len() > SOLANA_MAX_LEN {
            return false;
        }
        if !all_in_alphabet(address, BASE58_ALPHABET) {
            return false;
        }

        matches!(bs58::decode(address).into_vec(), Ok(decoded) if decoded.len() == 32)
    }
}
