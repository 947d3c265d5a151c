//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::{collections::HashMap, fmt, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    domain::{chain_config::ChainId, derivation_path_validator::DerivationPathValidator},
    error::DerivationError,
    infrastructure::pbkdf2::DEFAULT_ITERATIONS,
    utils::chain_normalizer::normalize_chain_identifier,
};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 钱包派生配置
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// BIP39 助记词（启动时一次性使用）
    pub recovery_phrase: String,
    pub passphrase: String,
    /// 派生密钥的 PBKDF2 迭代次数
    pub kdf_iterations: u32,
    /// 地址缓存容量，未设置表示不限
    pub cache_capacity: Option<usize>,
    /// 派生路径覆盖，键为链名或别名
    pub derivation_paths: HashMap<String, String>,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            recovery_phrase: std::env::var("WALLET_RECOVERY_PHRASE").unwrap_or_default(),
            passphrase: std::env::var("WALLET_PASSPHRASE").unwrap_or_default(),
            kdf_iterations: std::env::var("WALLET_KDF_ITERATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ITERATIONS),
            cache_capacity: std::env::var("ADDRESS_CACHE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok()),
            derivation_paths: HashMap::new(),
        }
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("recovery_phrase", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("kdf_iterations", &self.kdf_iterations)
            .field("cache_capacity", &self.cache_capacity)
            .field("derivation_paths", &self.derivation_paths)
            .finish()
    }
}

impl WalletConfig {
    /// 解析派生路径覆盖，链名支持别名
    ///
    /// 两个键归一到同一条链时报错，而不是按 HashMap 遍历顺序取其一。
    pub fn path_overrides(&self) -> Result<HashMap<ChainId, String>, DerivationError> {
        let mut overrides = HashMap::with_capacity(self.derivation_paths.len());
        for (name, path) in &self.derivation_paths {
            let chain = normalize_chain_identifier(name)?;
            if overrides.insert(chain, path.clone()).is_some() {
                return Err(DerivationError::DuplicatePathOverride(chain));
            }
        }
        Ok(overrides)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            wallet: WalletConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载
    ///
    /// 文件中出现的字段覆盖环境变量，缺省字段仍取环境变量的值。
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) if path.as_ref().exists() => Self::from_file(path),
            _ => Self::from_env(),
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if self.wallet.recovery_phrase.trim().is_empty() {
            anyhow::bail!("WALLET_RECOVERY_PHRASE must be set");
        }

        if self.wallet.kdf_iterations == 0 {
            anyhow::bail!("WALLET_KDF_ITERATIONS must be at least 1");
        }

        if self.wallet.cache_capacity == Some(0) {
            anyhow::bail!(
                "ADDRESS_CACHE_CAPACITY must be positive (unset it for an unbounded cache)"
            );
        }

        // 验证派生路径覆盖
        let validator = DerivationPathValidator::new();
        for (chain, path) in self
            .wallet
            .path_overrides()
            .context("Invalid chain in [wallet.derivation_paths]")?
        {
            validator
                .validate_path(chain, &path)
                .context("Invalid entry in [wallet.derivation_paths]")?;
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
