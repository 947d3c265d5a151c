//! 多链钱包服务
//!
//! 对外唯一入口：按 (链, 用户) 派生地址、批量派生、地址校验。
//!
//! 派生流程：缓存 → 用户种子 → 派生密钥 → 链编码器。
//! 主编码器失败时改用降级编码器并标记 `is_fallback`，调用方永远拿到一个地址。

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    config::WalletConfig,
    domain::{
        address_cache::{AddressCache, CacheStats},
        chain_config::ChainId,
        derivation::DerivationRegistry,
        seed::{FallbackMarker, MasterSecret, SeedMaterial, UserId},
    },
    error::DerivationError,
    infrastructure::log_redact::redact_address,
};

/// 派生结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    pub chain: ChainId,
    pub address: String,
    /// 降级地址只用于展示，不能作为真实收款地址
    pub is_fallback: bool,
}

/// 链信息（展示用）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain: ChainId,
    pub name: &'static str,
    pub symbol: &'static str,
    pub network_name: &'static str,
    pub derivation_path: String,
}

/// 多链钱包服务
pub struct WalletService {
    master: Arc<MasterSecret>,
    fallback_marker: FallbackMarker,
    registry: DerivationRegistry,
    cache: AddressCache,
    kdf_iterations: u32,
}

impl WalletService {
    /// 由已初始化的主密钥和注册表构造
    pub fn new(
        master: Arc<MasterSecret>,
        registry: DerivationRegistry,
        cache: AddressCache,
        kdf_iterations: u32,
    ) -> Result<Self, DerivationError> {
        let fallback_marker = master.fallback_marker()?;
        Ok(Self {
            master,
            fallback_marker,
            registry,
            cache,
            kdf_iterations: kdf_iterations.max(1),
        })
    }

    /// 从配置构造：初始化种子材料、应用派生路径覆盖
    ///
    /// 所有错误都是启动期致命错误。
    pub fn from_config(
        seed: &SeedMaterial,
        config: &WalletConfig,
    ) -> Result<Self, DerivationError> {
        let registry = DerivationRegistry::new().with_path_overrides(&config.path_overrides()?)?;
        let master = seed.initialize(&config.recovery_phrase, &config.passphrase)?;

        tracing::info!(
            kdf_iterations = config.kdf_iterations,
            cache_capacity = ?config.cache_capacity,
            path_overrides = config.derivation_paths.len(),
            "wallet service ready"
        );

        Self::new(
            master,
            registry,
            AddressCache::with_capacity(config.cache_capacity),
            config.kdf_iterations,
        )
    }

    /// 派生单条链地址（不会失败）
    pub fn derive_address(&self, chain: ChainId, user: UserId) -> AddressRecord {
        if let Some(address) = self.cache.get(chain, user) {
            tracing::debug!(chain = %chain, user = %user, "address cache hit");
            return AddressRecord {
                chain,
                address,
                is_fallback: false,
            };
        }

        match self.encode_primary(chain, user) {
            Ok(address) => {
                let address = self.cache.put(chain, user, address);
                tracing::debug!(
                    chain = %chain,
                    user = %user,
                    address = %redact_address(&address),
                    "address derived"
                );
                AddressRecord {
                    chain,
                    address,
                    is_fallback: false,
                }
            }
            Err(err) => {
                let address =
                    self.registry
                        .fallback_codec()
                        .encode(chain, user, &self.fallback_marker);
                tracing::warn!(
                    chain = %chain,
                    user = %user,
                    code = err.code(),
                    error = %err,
                    address = %redact_address(&address),
                    "primary encoding failed, returning fallback address"
                );
                AddressRecord {
                    chain,
                    address,
                    is_fallback: true,
                }
            }
        }
    }

    /// 为所有支持的链派生地址，各链互不影响
    pub fn derive_all_addresses(&self, user: UserId) -> BTreeMap<ChainId, AddressRecord> {
        ChainId::ALL
            .into_iter()
            .map(|chain| (chain, self.derive_address(chain, user)))
            .collect()
    }

    /// 形状校验，空串或垃圾输入返回 false
    pub fn validate_address(&self, address: &str, chain: ChainId) -> bool {
        self.registry.codec_for(chain).is_well_formed(address)
    }

    /// 以字符串链标识校验地址，未知链返回 false
    pub fn validate_address_for(&self, address: &str, chain: &str) -> bool {
        match chain.parse::<ChainId>() {
            Ok(chain) => self.validate_address(address, chain),
            Err(err) => {
                tracing::debug!(code = err.code(), "address validation for unknown chain");
                false
            }
        }
    }

    /// 列出所有支持的链
    pub fn supported_chains(&self) -> Vec<ChainInfo> {
        ChainId::ALL
            .into_iter()
            .map(|chain| {
                let config = chain.config();
                ChainInfo {
                    chain,
                    name: config.name,
                    symbol: config.symbol,
                    network_name: config.network_name,
                    derivation_path: self.registry.path_for(chain).to_string(),
                }
            })
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 私有辅助方法
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn encode_primary(&self, chain: ChainId, user: UserId) -> Result<String, DerivationError> {
        let user_secret = self.master.per_user_secret(user)?;
        let key = user_secret.derive_key(self.registry.path_for(chain), user, self.kdf_iterations);

        let codec = self.registry.codec_for(chain);
        let address = codec.encode(&key, user)?;
        // 编码器自身的形状校验不通过，同样按编码失败处理
        if !codec.is_well_formed(&address) {
            return Err(DerivationError::encoding(
                chain,
                "encoded address failed shape validation",
            ));
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        codec::{self, AddressCodec},
        seed::DerivedKey,
    };

    const PHRASE: &str =
        "nothing ridge argue engine loan boat dry radar wink universe remind fence";

    fn master() -> Arc<MasterSecret> {
        Arc::new(MasterSecret::from_recovery_phrase(PHRASE, "test-key").unwrap())
    }

    fn service(registry: DerivationRegistry) -> WalletService {
        WalletService::new(master(), registry, AddressCache::new(), 1).unwrap()
    }

    /// 总是返回不合形状的字符串
    struct MalformedCodec;

    impl AddressCodec for MalformedCodec {
        fn encode(&self, _key: &DerivedKey, _user: UserId) -> Result<String, DerivationError> {
            Ok("definitely-not-an-address".to_string())
        }

        fn is_well_formed(&self, address: &str) -> bool {
            codec::for_chain(ChainId::Ripple).is_well_formed(address)
        }
    }

    #[test]
    fn test_derive_is_cached() {
        let service = service(DerivationRegistry::new());
        let first = service.derive_address(ChainId::Ethereum, UserId(1));
        let second = service.derive_address(ChainId::Ethereum, UserId(1));
        assert_eq!(first, second);
        assert!(!first.is_fallback);

        let stats = service.cache_stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_malformed_primary_output_falls_back() {
        let registry =
            DerivationRegistry::new().with_codec(ChainId::Ripple, Arc::new(MalformedCodec));
        let service = service(registry);

        let record = service.derive_address(ChainId::Ripple, UserId(3));
        assert!(record.is_fallback);
        assert!(record.address.starts_with('r'));
        assert!(service.validate_address(&record.address, ChainId::Ripple));
        // 降级结果不进入缓存
        assert_eq!(service.cache_stats().entries, 0);
    }

    #[test]
    fn test_path_override_changes_address() {
        let default = service(DerivationRegistry::new());
        let overrides =
            std::collections::HashMap::from([(ChainId::Bitcoin, "m/84'/0'/0'/0".to_string())]);
        let overridden = service(
            DerivationRegistry::new()
                .with_path_overrides(&overrides)
                .unwrap(),
        );

        assert_ne!(
            default.derive_address(ChainId::Bitcoin, UserId(1)).address,
            overridden.derive_address(ChainId::Bitcoin, UserId(1)).address
        );
        assert_eq!(
            default.derive_address(ChainId::Ethereum, UserId(1)).address,
            overridden.derive_address(ChainId::Ethereum, UserId(1)).address
        );
    }

    #[test]
    fn test_validate_address_for_aliases() {
        let service = service(DerivationRegistry::new());
        let eth = service.derive_address(ChainId::Ethereum, UserId(8)).address;
        assert!(service.validate_address_for(&eth, "ETH"));
        assert!(service.validate_address_for(&eth, "bep20"));
        assert!(!service.validate_address_for(&eth, "trx"));
        assert!(!service.validate_address_for(&eth, "polygon"));
    }

    #[test]
    fn test_record_serialization() {
        let record = AddressRecord {
            chain: ChainId::Tron,
            address: "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string(),
            is_fallback: false,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chain": "tron",
                "address": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
                "isFallback": false
            })
        );
    }

    #[test]
    fn test_supported_chains() {
        let service = service(DerivationRegistry::new());
        let chains = service.supported_chains();
        assert_eq!(chains.len(), ChainId::COUNT);
        let tron = chains.iter().find(|c| c.chain == ChainId::Tron).unwrap();
        assert_eq!(tron.symbol, "USDT");
        assert_eq!(tron.derivation_path, "m/44'/195'/0'/0");
    }

    #[test]
    fn test_from_config_initializes_seed_once() {
        let seed = SeedMaterial::new();
        let config = WalletConfig {
            recovery_phrase: PHRASE.to_string(),
            passphrase: "test-key".to_string(),
            kdf_iterations: 1,
            cache_capacity: Some(4),
            derivation_paths: std::collections::HashMap::new(),
        };

        let service = WalletService::from_config(&seed, &config).unwrap();
        assert!(seed.is_initialized());
        assert_eq!(service.cache_stats().capacity, Some(4));

        let err = WalletService::from_config(&seed, &config).err().unwrap();
        assert_eq!(err, DerivationError::AlreadyInitialized);
    }

    #[test]
    fn test_from_config_rejects_bad_path_before_seed() {
        let seed = SeedMaterial::new();
        let config = WalletConfig {
            recovery_phrase: PHRASE.to_string(),
            passphrase: String::new(),
            kdf_iterations: 1,
            cache_capacity: None,
            derivation_paths: std::collections::HashMap::from([(
                "sol".to_string(),
                "not/a/path".to_string(),
            )]),
        };

        let err = WalletService::from_config(&seed, &config).err().unwrap();
        assert!(err.is_fatal());
        assert!(!seed.is_initialized());
    }

    #[test]
    fn test_from_config_rejects_duplicate_override_before_seed() {
        let seed = SeedMaterial::new();
        let config = WalletConfig {
            recovery_phrase: PHRASE.to_string(),
            passphrase: String::new(),
            kdf_iterations: 1,
            cache_capacity: None,
            derivation_paths: std::collections::HashMap::from([
                ("ltc".to_string(), "m/84'/2'/0'/0".to_string()),
                ("litecoin".to_string(), "m/44'/2'/0'/0".to_string()),
            ]),
        };

        let err = WalletService::from_config(&seed, &config).err().unwrap();
        assert_eq!(err, DerivationError::DuplicatePathOverride(ChainId::Litecoin));
        assert!(err.is_fatal());
        assert!(!seed.is_initialized());
    }
}
