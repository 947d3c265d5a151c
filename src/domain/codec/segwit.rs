//! P2WPKH 风格地址 (bc1q... / ltc1q...)
//!
//! 20 字节见证程序 = 载荷摘要前 20 字节，按 BIP173 编码（带 bech32 校验和）。
//! 校验只看形状：hrp + "1"、小写字符集、数据部分 39..=59 个字符。
//! 外部传入的 legacy P2PKH / P2SH 地址（Bitcoin `1`/`3`，Litecoin `L`/`M`）
//! 按首字符、Base58 字母表和长度校验；引擎自身只产出 bech32 形式。

use bech32::Hrp;

use super::{all_in_alphabet, payload_digest, AddressCodec, BASE58_ALPHABET, BECH32_CHARSET};
use crate::{
    domain::{
        chain_config::ChainId,
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

/// 分隔符之后数据部分的长度范围（P2WPKH 39，P2WSH 59）
pub(crate) const DATA_MIN_LEN: usize = 39;
pub(crate) const DATA_MAX_LEN: usize = 59;
/// legacy Base58 地址最短长度
const LEGACY_MIN_LEN: usize = 26;

pub struct SegwitCodec {
    chain: ChainId,
    hrp: &'static str,
    legacy_prefixes: &'static [char],
    legacy_max_len: usize,
}

impl SegwitCodec {
    /// 只接受 bech32 形式
    pub fn new(chain: ChainId, hrp: &'static str) -> Self {
        Self {
            chain,
            hrp,
            legacy_prefixes: &[],
            legacy_max_len: 0,
        }
    }

    /// 校验时额外接受以这些字符开头的 legacy Base58 地址
    pub fn with_legacy(mut self, prefixes: &'static [char], max_len: usize) -> Self {
        self.legacy_prefixes = prefixes;
        self.legacy_max_len = max_len;
        self
    }

    fn is_legacy_shape(&self, address: &str) -> bool {
        address.starts_with(self.legacy_prefixes)
            && (LEGACY_MIN_LEN..=self.legacy_max_len).contains(&address.len())
            && all_in_alphabet(address, BASE58_ALPHABET)
    }
}

impl AddressCodec for SegwitCodec {
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError> {
        let digest = payload_digest(self.chain, key, user);
        let witness_program = &digest[..20];

        let hrp = Hrp::parse(self.hrp)
            .map_err(|e| DerivationError::encoding(self.chain, format!("invalid hrp: {}", e)))?;
        bech32::segwit::encode_v0(hrp, witness_program)
            .map_err(|e| DerivationError::encoding(self.chain, format!("bech32: {}", e)))
    }

    fn is_well_formed(&self, address: &str) -> bool {
        let Some(data) = address
            .strip_prefix(self.hrp)
            .and_then(|rest| rest.strip_prefix('1'))
        else {
            return self.is_legacy_shape(address);
        };

        (DATA_MIN_LEN..=DATA_MAX_LEN).contains(&data.len()) && all_in_alphabet(data, BECH32_CHARSET)
    }
}
