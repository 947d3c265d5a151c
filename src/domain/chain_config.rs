//! 多链配置模块
//!
//! 定义所有支持的区块链、地址格式以及派生路径常量。
//! 链集合是封闭的：新增一条链必须同时补齐这里的静态配置表，
//! 否则 `ChainId::config` 的测试会失败。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DerivationError;

/// 支持的链（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Bitcoin,
    Ethereum,
    Tron,
    Ton,
    Bsc,
    Litecoin,
    Dogecoin,
    Cardano,
    Solana,
    Ripple,
}

impl ChainId {
    pub const COUNT: usize = 10;

    /// 全部链，顺序与 `CHAIN_CONFIGS` 一致
    pub const ALL: [ChainId; Self::COUNT] = [
        ChainId::Bitcoin,
        ChainId::Ethereum,
        ChainId::Tron,
        ChainId::Ton,
        ChainId::Bsc,
        ChainId::Litecoin,
        ChainId::Dogecoin,
        ChainId::Cardano,
        ChainId::Solana,
        ChainId::Ripple,
    ];

    /// 规范名称（小写）
    pub fn as_str(self) -> &'static str {
        match self {
            ChainId::Bitcoin => "bitcoin",
            ChainId::Ethereum => "ethereum",
            ChainId::Tron => "tron",
            ChainId::Ton => "ton",
            ChainId::Bsc => "bsc",
            ChainId::Litecoin => "litecoin",
            ChainId::Dogecoin => "dogecoin",
            ChainId::Cardano => "cardano",
            ChainId::Solana => "solana",
            ChainId::Ripple => "ripple",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// 静态链配置
    pub fn config(self) -> &'static ChainConfig {
        &CHAIN_CONFIGS[self.index()]
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = DerivationError;

    /// 支持规范名称与别名（btc / usdt / bnb ...），大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::chain_normalizer::normalize_chain_identifier(s)
    }
}

/// 地址编码格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    /// Bech32 segwit v0 (bc1q... / ltc1q...)，校验时另接受 legacy Base58 地址
    Segwit {
        hrp: &'static str,
        /// legacy P2PKH / P2SH 首字符
        legacy_prefixes: &'static [char],
        legacy_max_len: usize,
    },
    /// Base58Check，版本字节决定首字符 (Tron `T`, Dogecoin `D`)
    Base58Check { version: u8, prefix: char },
    /// 0x + 40 hex，EIP-55 大小写校验 (Ethereum 系列)
    EvmHex,
    /// TON 用户友好格式 (UQ..., 48 字符 base64url)
    TonFriendly,
    /// 32 字节公钥的裸 Base58 (Solana)
    SolanaBase58,
    /// Ripple 字母表的 Base58Check (r...)
    RippleBase58,
    /// Shelley 地址 Bech32 (addr1...)
    CardanoBech32 { hrp: &'static str },
}

/// 链配置
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain: ChainId,
    /// 链名称
    pub name: &'static str,
    /// 链符号 (BTC, ETH, USDT ...)
    pub symbol: &'static str,
    /// 网络名称（展示用）
    pub network_name: &'static str,
    /// SLIP-44 coin type
    pub coin_type: u32,
    pub address_format: AddressFormat,
    /// 默认派生路径常量，仅作为域分隔输入，不是真实的 HD 路径
    pub derivation_path: &'static str,
    /// 编码器混入的链域标签
    pub domain_tag: &'static str,
}

static CHAIN_CONFIGS: [ChainConfig; ChainId::COUNT] = [
    ChainConfig {
        chain: ChainId::Bitcoin,
        name: "Bitcoin",
        symbol: "BTC",
        network_name: "Bitcoin Network",
        coin_type: 0,
        address_format: AddressFormat::Segwit {
            hrp: "bc",
            legacy_prefixes: &['1', '3'],
            legacy_max_len: 35,
        },
        derivation_path: "m/44'/0'/0'/0",
        domain_tag: "btc",
    },
    ChainConfig {
        chain: ChainId::Ethereum,
        name: "Ethereum",
        symbol: "ETH",
        network_name: "Ethereum Network",
        coin_type: 60,
        address_format: AddressFormat::EvmHex,
        derivation_path: "m/44'/60'/0'/0",
        domain_tag: "eth",
    },
    ChainConfig {
        chain: ChainId::Tron,
        name: "USDT TRC20",
        symbol: "USDT",
        network_name: "TRON Network",
        coin_type: 195,
        address_format: AddressFormat::Base58Check {
            version: 0x41,
            prefix: 'T',
        },
        derivation_path: "m/44'/195'/0'/0",
        domain_tag: "tron",
    },
    ChainConfig {
        chain: ChainId::Ton,
        name: "TON",
        symbol: "TON",
        network_name: "TON Network",
        coin_type: 607,
        address_format: AddressFormat::TonFriendly,
        derivation_path: "m/44'/607'/0'/0",
        domain_tag: "ton",
    },
    ChainConfig {
        chain: ChainId::Bsc,
        name: "BNB",
        symbol: "BNB",
        network_name: "BSC Network",
        coin_type: 60, // BSC 使用与 ETH 相同的派生路径
        address_format: AddressFormat::EvmHex,
        derivation_path: "m/44'/60'/0'/0",
        domain_tag: "bsc",
    },
    ChainConfig {
        chain: ChainId::Litecoin,
        name: "Litecoin",
        symbol: "LTC",
        network_name: "Litecoin Network",
        coin_type: 2,
        address_format: AddressFormat::Segwit {
            hrp: "ltc",
            legacy_prefixes: &['L', 'M'],
            legacy_max_len: 34,
        },
        derivation_path: "m/44'/2'/0'/0",
        domain_tag: "ltc",
    },
    ChainConfig {
        chain: ChainId::Dogecoin,
        name: "Dogecoin",
        symbol: "DOGE",
        network_name: "Dogecoin Network",
        coin_type: 3,
        address_format: AddressFormat::Base58Check {
            version: 0x1e,
            prefix: 'D',
        },
        derivation_path: "m/44'/3'/0'/0",
        domain_tag: "doge",
    },
    ChainConfig {
        chain: ChainId::Cardano,
        name: "Cardano",
        symbol: "ADA",
        network_name: "Cardano Network",
        coin_type: 1815,
        address_format: AddressFormat::CardanoBech32 { hrp: "addr" },
        derivation_path: "m/1852'/1815'/0'/0",
        domain_tag: "ada",
    },
    ChainConfig {
        chain: ChainId::Solana,
        name: "Solana",
        symbol: "SOL",
        network_name: "Solana Network",
        coin_type: 501,
        address_format: AddressFormat::SolanaBase58,
        derivation_path: "m/44'/501'/0'/0'",
        domain_tag: "sol",
    },
    ChainConfig {
        chain: ChainId::Ripple,
        name: "XRP",
        symbol: "XRP",
        network_name: "XRP Ledger",
        coin_type: 144,
        address_format: AddressFormat::RippleBase58,
        derivation_path: "m/44'/144'/0'/0",
        domain_tag: "xrp",
    },
];
