//! 链标识符标准化模块
//!
//! 外部调用方（聊天指令层、资料存储）使用的是币种 id（btc / usdt / bnb ...），
//! 这里统一映射为封闭的 `ChainId`。

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{domain::chain_config::ChainId, error::DerivationError};

/// 链标识符配置
#[derive(Debug, Clone)]
pub struct ChainIdentifier {
    pub chain: ChainId,
    /// 别名列表（小写）
    pub aliases: &'static [&'static str],
}

static CHAIN_IDENTIFIERS: [ChainIdentifier; ChainId::COUNT] = [
    ChainIdentifier {
        chain: ChainId::Bitcoin,
        aliases: &["btc", "xbt"],
    },
    ChainIdentifier {
        chain: ChainId::Ethereum,
        aliases: &["eth", "ether", "erc20"],
    },
    ChainIdentifier {
        chain: ChainId::Tron,
        aliases: &["trx", "usdt", "trc20"],
    },
    ChainIdentifier {
        chain: ChainId::Ton,
        aliases: &["toncoin"],
    },
    ChainIdentifier {
        chain: ChainId::Bsc,
        aliases: &["bnb", "binance", "bep20"],
    },
    ChainIdentifier {
        chain: ChainId::Litecoin,
        aliases: &["ltc"],
    },
    ChainIdentifier {
        chain: ChainId::Dogecoin,
        aliases: &["doge"],
    },
    ChainIdentifier {
        chain: ChainId::Cardano,
        aliases: &["ada"],
    },
    ChainIdentifier {
        chain: ChainId::Solana,
        aliases: &["sol"],
    },
    ChainIdentifier {
        chain: ChainId::Ripple,
        aliases: &["xrp"],
    },
];

/// 别名索引（静态初始化，只读）
static ALIAS_INDEX: Lazy<HashMap<&'static str, ChainId>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for ident in &CHAIN_IDENTIFIERS {
        // 注册规范名称
        index.insert(ident.chain.as_str(), ident.chain);

        // 注册所有别名
        for alias in ident.aliases {
            index.insert(*alias, ident.chain);
        }
    }
    index
});

/// 标准化链标识符
///
/// # 示例
/// ```rust
/// # use ironaddr::domain::ChainId;
/// # use ironaddr::utils::chain_normalizer::normalize_chain_identifier;
/// assert_eq!(normalize_chain_identifier("ETH").unwrap(), ChainId::Ethereum);
/// assert_eq!(normalize_chain_identifier("usdt").unwrap(), ChainId::Tron);
/// assert_eq!(normalize_chain_identifier(" Bitcoin ").unwrap(), ChainId::Bitcoin);
/// ```
pub fn normalize_chain_identifier(input: &str) -> Result<ChainId, DerivationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DerivationError::UnknownChain(String::new()));
    }

    ALIAS_INDEX
        .get(trimmed.to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| DerivationError::UnknownChain(trimmed.to_string()))
}
