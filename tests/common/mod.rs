//! 测试辅助模块
//! 提供测试用主密钥和服务构造函数

#![allow(dead_code)]

use std::sync::Arc;

use ironaddr::domain::{AddressCache, DerivationRegistry, MasterSecret, WalletService};

/// 测试助记词（BIP39 英文词表，校验和有效）
pub const TEST_PHRASE: &str =
    "nothing ridge argue engine loan boat dry radar wink universe remind fence";
pub const TEST_PASSPHRASE: &str = "test-key";

/// 测试使用的低迭代次数，避免大批量派生拖慢测试
pub const TEST_KDF_ITERATIONS: u32 = 1;

pub fn test_master() -> Arc<MasterSecret> {
    Arc::new(
        MasterSecret::from_recovery_phrase(TEST_PHRASE, TEST_PASSPHRASE)
            .expect("test phrase must be valid"),
    )
}

/// 默认注册表 + 无上限缓存
pub fn test_service() -> WalletService {
    test_service_with(DerivationRegistry::new())
}

pub fn test_service_with(registry: DerivationRegistry) -> WalletService {
    WalletService::new(
        test_master(),
        registry,
        AddressCache::new(),
        TEST_KDF_ITERATIONS,
    )
    .expect("failed to build test wallet service")
}
