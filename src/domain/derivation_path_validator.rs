//! BIP44 风格派生路径验证器
//!
//! 派生路径在这里只是密钥拉伸的域分隔常量，但仍然要求符合
//! `m/<n>[']/<n>[']/...` 的格式，避免配置拼写错误悄悄改变所有地址。

use crate::{domain::chain_config::ChainId, error::DerivationError};

/// 硬化索引上限（不含硬化位）
const MAX_INDEX: u32 = 0x7FFF_FFFF;
/// 路径最大深度
const MAX_DEPTH: usize = 10;

/// 派生路径验证器
#[derive(Debug, Default, Clone, Copy)]
pub struct DerivationPathValidator;

impl DerivationPathValidator {
    pub fn new() -> Self {
        Self
    }

    /// 验证派生路径格式
    ///
    /// # 返回
    /// - Ok(true): 格式正确且 coin type 与链的 SLIP-44 编号一致
    /// - Ok(false): 格式正确但 coin type 不是该链的标准值
    /// - Err: 格式错误
    pub fn validate_path(&self, chain: ChainId, path: &str) -> Result<bool, DerivationError> {
        let invalid = || DerivationError::InvalidDerivationPath {
            chain,
            path: path.to_string(),
        };

        // 1. 基本格式验证
        let Some(rest) = path.strip_prefix("m/") else {
            return Err(invalid());
        };

        // 2. 解析路径组件
        let components = rest
            .split('/')
            .map(parse_component)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        if components.is_empty() || components.len() > MAX_DEPTH {
            return Err(invalid());
        }

        // 3. 第二段是 coin type
        let standard_coin_type = chain.config().coin_type;
        Ok(match components.get(1) {
            Some(&(coin_type, true)) => coin_type == standard_coin_type,
            _ => false,
        })
    }

    /// 获取链的标准派生路径
    pub fn standard_path(&self, chain: ChainId) -> &'static str {
        chain.config().derivation_path
    }
}

/// 解析单个组件，返回 (索引, 是否硬化)
fn parse_component(component: &str) -> Option<(u32, bool)> {
    let (digits, hardened) = match component.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (component, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: u32 = digits.parse().ok()?;
    (index <= MAX_INDEX).then_some((index, hardened))
}
