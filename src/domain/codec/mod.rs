//! 链地址编码器
//!
//! 每个地址格式族一个实现，统一提供两种能力：
//! - `encode`：把派生密钥映射成该链规范字母表和长度范围内的地址
//! - `is_well_formed`：只校验形状（前缀、长度、字母表）
//!
//! 这里的地址不是由真实公钥计算出来的，只保证形状与链格式一致，
//! 不能用于真实资金路由。EVM 的 EIP-55 是唯一会在校验时重新计算的校验和。

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::{
    domain::{
        chain_config::{AddressFormat, ChainId},
        seed::{DerivedKey, UserId},
    },
    error::DerivationError,
};

mod base58check;
mod cardano;
mod evm;
mod fallback;
mod segwit;
mod solana;
mod ton;

pub use base58check::{Base58CheckCodec, RippleCodec};
pub use cardano::CardanoCodec;
pub use evm::EvmCodec;
pub use fallback::FallbackCodec;
pub use segwit::SegwitCodec;
pub use solana::SolanaCodec;
pub use ton::TonCodec;

/// Bech32 数据部分字符集
pub(crate) const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
/// Bitcoin Base58 字母表
pub(crate) const BASE58_ALPHABET: &str =
    "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
/// Ripple Base58 字母表
pub(crate) const RIPPLE_ALPHABET: &str =
    "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";
/// base64url 字母表（无填充）
pub(crate) const BASE64URL_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// 链地址编码器 trait
pub trait AddressCodec: Send + Sync {
    /// 由派生密钥生成地址
    ///
    /// 输入合法时不应失败；内部无法继续编码时返回 `EncodingFailure`，
    /// 由服务层转换为降级地址。
    fn encode(&self, key: &DerivedKey, user: UserId) -> Result<String, DerivationError>;

    /// 形状校验，不校验链上可用性
    fn is_well_formed(&self, address: &str) -> bool;
}

/// 按地址格式构造默认编码器
pub fn for_chain(chain: ChainId) -> Arc<dyn AddressCodec> {
    match chain.config().address_format {
        AddressFormat::Segwit {
            hrp,
            legacy_prefixes,
            legacy_max_len,
        } => Arc::new(SegwitCodec::new(chain, hrp).with_legacy(legacy_prefixes, legacy_max_len)),
        AddressFormat::Base58Check { version, prefix } => {
            Arc::new(Base58CheckCodec::new(chain, version, prefix))
        }
        AddressFormat::EvmHex => Arc::new(EvmCodec::new(chain)),
        AddressFormat::TonFriendly => Arc::new(TonCodec::new(chain)),
        AddressFormat::SolanaBase58 => Arc::new(SolanaCodec::new(chain)),
        AddressFormat::RippleBase58 => Arc::new(RippleCodec::new(chain)),
        AddressFormat::CardanoBech32 { hrp } => Arc::new(CardanoCodec::new(chain, hrp)),
    }
}

/// 混入链域标签的载荷摘要
pub(crate) fn payload_digest(chain: ChainId, key: &DerivedKey, user: UserId) -> [u8; 32] {
    Sha256::new()
        .chain_update(chain.config().domain_tag.as_bytes())
        .chain_update([0u8])
        .chain_update(key.as_bytes())
        .chain_update(user.to_be_bytes())
        .finalize()
        .into()
}

/// 双 SHA-256 前 4 字节
pub(crate) fn double_sha256_checksum(payload: &[u8]) -> [u8; 4] {
    let hash = Sha256::digest(Sha256::digest(payload));
    [hash[0], hash[1], hash[2], hash[3]]
}

pub(crate) fn all_in_alphabet(s: &str, alphabet: &str) -> bool {
    s.chars().all(|c| alphabet.contains(c))
}
