//! 派生引擎错误类型
//!
//! 分为两类：
//! - 启动期致命错误（助记词非法、重复初始化、派生路径配置错误或重复覆盖）
//! - 可在服务边界本地吸收的错误（编码失败 → 降级地址）

use thiserror::Error;

use crate::domain::chain_config::ChainId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// 助记词未通过 BIP39 词表/校验和检查
    #[error("invalid recovery phrase: {0}")]
    InvalidRecoveryPhrase(String),

    /// SeedMaterial 已经初始化过
    #[error("seed material is already initialized")]
    AlreadyInitialized,

    /// 链编码器无法产出地址（服务层会转换为降级地址）
    #[error("address encoding failed for {chain}: {reason}")]
    EncodingFailure { chain: ChainId, reason: String },

    /// 链标识不在支持列表中
    #[error("unknown chain: {0}")]
    UnknownChain(String),

    /// 配置中的派生路径格式错误
    #[error("invalid derivation path for {chain}: {path}")]
    InvalidDerivationPath { chain: ChainId, path: String },

    /// 多个链名（或别名）覆盖了同一条链的派生路径
    #[error("duplicate derivation path override for {0}")]
    DuplicatePathOverride(ChainId),

    /// 密钥材料无法进入 MAC/KDF（不包含任何密钥内容）
    #[error("key material rejected: {0}")]
    KeyMaterial(&'static str),
}

impl DerivationError {
    pub(crate) fn encoding(chain: ChainId, reason: impl Into<String>) -> Self {
        Self::EncodingFailure {
            chain,
            reason: reason.into(),
        }
    }

    /// 稳定的错误码，供调用方记录或映射
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRecoveryPhrase(_) => "invalid_recovery_phrase",
            Self::AlreadyInitialized => "already_initialized",
            Self::EncodingFailure { .. } => "encoding_failure",
            Self::UnknownChain(_) => "unknown_chain",
            Self::InvalidDerivationPath { .. } => "invalid_derivation_path",
            Self::DuplicatePathOverride(_) => "duplicate_path_override",
            Self::KeyMaterial(_) => "key_material",
        }
    }

    /// 启动期错误：进程不应带着该错误继续运行
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidRecoveryPhrase(_)
            | Self::AlreadyInitialized
            | Self::InvalidDerivationPath { .. }
            | Self::DuplicatePathOverride(_) => true,
            Self::EncodingFailure { .. } | Self::UnknownChain(_) | Self::KeyMaterial(_) => false,
        }
    }
}
