//! Domain 模块
//!
//! 包含核心派生逻辑和领域模型

pub mod address_cache;
pub mod chain_config;
pub mod codec;
pub mod derivation;
pub mod derivation_path_validator;
pub mod multi_chain_wallet;
pub mod seed;

// 重新导出常用类型
pub use address_cache::{AddressCache, CacheStats};
pub use chain_config::{AddressFormat, ChainConfig, ChainId};
pub use codec::AddressCodec;
pub use derivation::DerivationRegistry;
pub use derivation_path_validator::DerivationPathValidator;
pub use multi_chain_wallet::{AddressRecord, ChainInfo, WalletService};
pub use seed::{DerivedKey, MasterSecret, SeedMaterial, UserId, UserSecret};
