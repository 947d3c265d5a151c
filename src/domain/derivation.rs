//! 派生注册表
//!
//! 每条链对应一个 (派生路径常量, 编码器) 条目，按 `ChainId` 下标存放在定长数组里。
//! 注册表在构造时一次建好，之后只读；不存在"未注册"的链。

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    domain::{
        chain_config::ChainId,
        codec::{self, AddressCodec, FallbackCodec},
        derivation_path_validator::DerivationPathValidator,
    },
    error::DerivationError,
};

struct RegistryEntry {
    path: String,
    codec: Arc<dyn AddressCodec>,
}

/// 派生注册表
pub struct DerivationRegistry {
    entries: [RegistryEntry; ChainId::COUNT],
    fallback: FallbackCodec,
}

impl DerivationRegistry {
    /// 使用默认路径和默认编码器构造
    pub fn new() -> Self {
        Self {
            entries: ChainId::ALL.map(|chain| RegistryEntry {
                path: chain.config().derivation_path.to_string(),
                codec: codec::for_chain(chain),
            }),
            fallback: FallbackCodec,
        }
    }

    /// 覆盖部分链的派生路径
    ///
    /// 每条覆盖路径都先经过格式校验；coin type 与标准值不符时只记录告警。
    pub fn with_path_overrides(
        mut self,
        overrides: &HashMap<ChainId, String>,
    ) -> Result<Self, DerivationError> {
        let validator = DerivationPathValidator::new();
        for (&chain, path) in overrides {
            if !validator.validate_path(chain, path)? {
                tracing::warn!(
                    chain = %chain,
                    path = %path,
                    standard = validator.standard_path(chain),
                    "derivation path override uses a non-standard coin type"
                );
            }
            self.entries[chain.index()].path = path.clone();
        }
        Ok(self)
    }

    /// 替换某条链的编码器（嵌入方扩展或故障注入）
    pub fn with_codec(mut self, chain: ChainId, codec: Arc<dyn AddressCodec>) -> Self {
        self.entries[chain.index()].codec = codec;
        self
    }

    pub fn codec_for(&self, chain: ChainId) -> &dyn AddressCodec {
        self.entries[chain.index()].codec.as_ref()
    }

    pub fn path_for(&self, chain: ChainId) -> &str {
        &self.entries[chain.index()].path
    }

    pub fn fallback_codec(&self) -> &FallbackCodec {
        &self.fallback
    }
}

impl Default for DerivationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DerivationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                ChainId::ALL
                    .iter()
                    .map(|chain| (chain.as_str(), self.path_for(*chain))),
            )
            .finish()
    }
}
