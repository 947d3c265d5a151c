//! 地址验证模块
//!
//! 无状态入口：不需要主密钥即可按链标识做形状校验，
//! 校验规则与 `WalletService::validate_address` 使用的默认编码器一致。

use crate::{domain::codec, error::DerivationError, utils::chain_normalizer};

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证地址格式
    ///
    /// # 参数
    /// - `chain`: 链标识符（会自动标准化，支持别名）
    /// - `address`: 待验证的地址
    ///
    /// # 返回
    /// - Ok(true): 地址形状有效
    /// - Ok(false): 地址形状无效
    /// - Err: 不支持的链
    pub fn validate(chain: &str, address: &str) -> Result<bool, DerivationError> {
        let chain = chain_normalizer::normalize_chain_identifier(chain)?;
        Ok(codec::for_chain(chain).is_well_formed(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evm_address_validation() {
        // 有效的 Ethereum 地址（全小写，无checksum）
        assert!(
            AddressValidator::validate("ETH", "0x742d35cc6634c0532925a3b844bc9e7595f0beb6").unwrap()
        );
        assert!(
            AddressValidator::validate("bnb", "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap()
        );

        // 无效的地址
        assert!(!AddressValidator::validate("ETH", "invalid").unwrap());
        assert!(!AddressValidator::validate("ETH", "0x123").unwrap());
    }

    #[test]
    fn test_other_families() {
        assert!(AddressValidator::validate("usdt", "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t").unwrap());
        assert!(AddressValidator::validate("xrp", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap());
        assert!(
            AddressValidator::validate("btc", "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq").unwrap()
        );
        assert!(!AddressValidator::validate(
            "ltc",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"
        )
        .unwrap());
    }

    #[test]
    fn test_legacy_bitcoin_family_addresses() {
        // P2PKH / P2SH
        assert!(AddressValidator::validate("btc", "1A1zP1eP5QGefi2DMiefTL5SLmv7DivfNa").unwrap());
        assert!(
            AddressValidator::validate("bitcoin", "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy").unwrap()
        );
        assert!(AddressValidator::validate("ltc", "LaMT348PWRnrqeeWArpwQPbuanpXDZGEUz").unwrap());

        // legacy 前缀不能跨链
        assert!(!AddressValidator::validate("ltc", "1A1zP1eP5QGefi2DMiefTL5SLmv7DivfNa").unwrap());
        assert!(!AddressValidator::validate("btc", "LaMT348PWRnrqeeWArpwQPbuanpXDZGEUz").unwrap());
        assert!(!AddressValidator::validate("doge", "1A1zP1eP5QGefi2DMiefTL5SLmv7DivfNa").unwrap());
    }

    #[test]
    fn test_unsupported_chain() {
        let err =
            AddressValidator::validate("polygon", "0x742d35cc6634c0532925a3b844bc9e7595f0beb6")
                .unwrap_err();
        assert_eq!(err, DerivationError::UnknownChain("polygon".to_string()));
    }
}
