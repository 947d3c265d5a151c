//! 降级编码器
//!
//! 主编码器失败时使用。输入为 (链, 用户, 主密钥派生标记) 的哈希流，
//! 按目标链格式截断并加前缀，产出的字符串恰好落在该链的形状校验范围内。
//! 降级地址只用于展示，调用方通过 `is_fallback` 识别。

use sha2::{Digest, Sha256};

use super::{
    base58check::BASE58CHECK_LEN, segwit::DATA_MIN_LEN, ton::TON_ADDRESS_LEN, BASE58_ALPHABET,
    BASE64URL_ALPHABET, BECH32_CHARSET, RIPPLE_ALPHABET,
};
use crate::domain::{
    chain_config::{AddressFormat, ChainId},
    seed::{FallbackMarker, UserId},
};

/// Cardano base 地址数据部分长度（不含 "addr1"）
const CARDANO_DATA_LEN: usize = 98;
const RIPPLE_FALLBACK_LEN: usize = 34;

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackCodec;

impl FallbackCodec {
    /// 总是成功
    pub(crate) fn encode(&self, chain: ChainId, user: UserId, marker: &FallbackMarker) -> String {
        let stream = HashStream::new(chain, user, marker);

        match chain.config().address_format {
            AddressFormat::Segwit { hrp, .. } => {
                // hrp + "1" + 见证版本 'q' + 38 个数据字符
                format!("{}1q{}", hrp, stream.chars(BECH32_CHARSET, DATA_MIN_LEN - 1))
            }
            AddressFormat::Base58Check { prefix, .. } => {
                format!("{}{}", prefix, stream.chars(BASE58_ALPHABET, BASE58CHECK_LEN - 1))
            }
            AddressFormat::EvmHex => format!("0x{}", hex::encode(stream.bytes(20))),
            AddressFormat::TonFriendly => {
                format!("UQ{}", stream.chars(BASE64URL_ALPHABET, TON_ADDRESS_LEN - 2))
            }
            AddressFormat::SolanaBase58 => bs58::encode(stream.bytes(32)).into_string(),
            AddressFormat::RippleBase58 => {
                format!("r{}", stream.chars(RIPPLE_ALPHABET, RIPPLE_FALLBACK_LEN - 1))
            }
            AddressFormat::CardanoBech32 { hrp } => {
                format!("{}1{}", hrp, stream.chars(BECH32_CHARSET, CARDANO_DATA_LEN))
            }
        }
    }
}

/// 计数器模式的 SHA-256 字节流
struct HashStream<'a> {
    chain: ChainId,
    user: UserId,
    marker: &'a FallbackMarker,
}

impl<'a> HashStream<'a> {
    fn new(chain: ChainId, user: UserId, marker: &'a FallbackMarker) -> Self {
        Self {
            chain,
            user,
            marker,
        }
    }

    fn bytes(&self, len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(len + 32);
        let mut counter: u32 = 0;
        while out.len() < len {
            let block = Sha256::new()
                .chain_update(b"fallback")
                .chain_update(self.marker.as_bytes())
                .chain_update(self.chain.config().domain_tag.as_bytes())
                .chain_update(self.user.to_be_bytes())
                .chain_update(counter.to_be_bytes())
                .finalize();
            out.extend_from_slice(&block);
            counter += 1;
        }
        out.truncate(len);
        out
    }

    fn chars(&self, alphabet: &str, len: usize) -> String {
        let symbols = alphabet.as_bytes();
        self.bytes(len)
            .into_iter()
            .map(|b| symbols[b as usize % symbols.len()] as char)
            .collect()
    }
}
