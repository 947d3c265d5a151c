//! 地址生成验证测试
//!
//! 固定助记词下的具体场景：格式、稳定性、跨重启一致性。

mod common;

use std::collections::HashSet;

use ironaddr::{
    config::WalletConfig,
    domain::{ChainId, SeedMaterial, UserId, WalletService},
};

use common::{test_service, TEST_PASSPHRASE, TEST_PHRASE};

fn wallet_config() -> WalletConfig {
    WalletConfig {
        recovery_phrase: TEST_PHRASE.to_string(),
        passphrase: TEST_PASSPHRASE.to_string(),
        kdf_iterations: 2048,
        cache_capacity: None,
        derivation_paths: Default::default(),
    }
}

/// 测试用例：Ethereum 用户 12345
#[test]
fn test_ethereum_address_for_user_12345() {
    let seed = SeedMaterial::new();
    let service = WalletService::from_config(&seed, &wallet_config()).unwrap();

    let record = service.derive_address(ChainId::Ethereum, UserId(12345));
    assert!(!record.is_fallback);
    assert!(
        record.address.starts_with("0x"),
        "Ethereum address should start with 0x"
    );
    assert_eq!(
        record.address.len(),
        42,
        "Ethereum address should be 42 characters"
    );

    let again = service.derive_address(ChainId::Ethereum, UserId(12345));
    assert_eq!(record.address, again.address);
    assert!(service.validate_address(&record.address, ChainId::Ethereum));
}

/// 测试用例：用户 999 的全部链地址
#[test]
fn test_derive_all_addresses_for_user_999() {
    let service = test_service();
    let records = service.derive_all_addresses(UserId(999));

    assert_eq!(records.len(), ChainId::COUNT);
    for chain in ChainId::ALL {
        let record = records
            .get(&chain)
            .unwrap_or_else(|| panic!("missing record for {}", chain));
        assert_eq!(record.chain, chain);
        assert!(!record.is_fallback, "{} fell back", chain);
    }

    let distinct: HashSet<&str> = records.values().map(|r| r.address.as_str()).collect();
    assert_eq!(distinct.len(), ChainId::COUNT, "addresses must differ across chains");
}

/// 测试用例：各链地址前缀
#[test]
fn test_chain_prefixes() {
    let service = test_service();
    let records = service.derive_all_addresses(UserId(42));

    let expected_prefix = [
        (ChainId::Bitcoin, "bc1q"),
        (ChainId::Ethereum, "0x"),
        (ChainId::Tron, "T"),
        (ChainId::Ton, "UQ"),
        (ChainId::Bsc, "0x"),
        (ChainId::Litecoin, "ltc1q"),
        (ChainId::Dogecoin, "D"),
        (ChainId::Cardano, "addr1"),
        (ChainId::Ripple, "r"),
    ];
    for (chain, prefix) in expected_prefix {
        let address = &records[&chain].address;
        assert!(
            address.starts_with(prefix),
            "{} address {} should start with {}",
            chain,
            address,
            prefix
        );
    }

    // Solana 没有前缀，只检查长度和可解码性
    let solana = &records[&ChainId::Solana].address;
    assert!((32..=44).contains(&solana.len()));
}

/// 测试用例：模拟进程重启，相同配置得到相同地址
#[test]
fn test_restart_determinism() {
    let before = {
        let seed = SeedMaterial::new();
        let service = WalletService::from_config(&seed, &wallet_config()).unwrap();
        service.derive_all_addresses(UserId(2024))
    };

    let after = {
        let seed = SeedMaterial::new();
        let service = WalletService::from_config(&seed, &wallet_config()).unwrap();
        service.derive_all_addresses(UserId(2024))
    };

    assert_eq!(before, after);
}

/// 测试用例：不同口令得到不同地址
#[test]
fn test_passphrase_separates_wallets() {
    let mut other = wallet_config();
    other.passphrase = "another-key".to_string();

    let a = WalletService::from_config(&SeedMaterial::new(), &wallet_config()).unwrap();
    let b = WalletService::from_config(&SeedMaterial::new(), &other).unwrap();

    assert_ne!(
        a.derive_address(ChainId::Bitcoin, UserId(1)).address,
        b.derive_address(ChainId::Bitcoin, UserId(1)).address
    );
}

/// 测试用例：非法助记词在启动时失败
#[test]
fn test_invalid_phrase_is_fatal() {
    let mut config = wallet_config();
    // 词表内的单词，但校验和错误
    config.recovery_phrase = "abandon ".repeat(12).trim_end().to_string();

    let seed = SeedMaterial::new();
    let err = WalletService::from_config(&seed, &config).err().unwrap();
    assert_eq!(err.code(), "invalid_recovery_phrase");
    assert!(err.is_fatal());
    assert!(!seed.is_initialized());
}
