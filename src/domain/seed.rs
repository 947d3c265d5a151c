//! 种子材料
//!
//! 进程级主密钥（MasterSecret）由助记词 + 口令一次性派生，之后只读；
//! 每个用户的种子（UserSecret）通过 HMAC 从主密钥派生，互相不可反推。
//!
//! ```text
//! 助记词 + 口令
//!    ↓  BIP39 (PBKDF2-HMAC-SHA512, 2048 轮)
//! MasterSecret (64 字节)
//!    ↓  HMAC-SHA256("user_{id}")
//! UserSecret (32 字节)
//!    ↓  PBKDF2-HMAC-SHA256(用户种子 || 路径常量 || 用户 id)
//! DerivedKey (32 字节) → 各链编码器
//! ```

use std::{fmt, sync::Arc};

use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{error::DerivationError, infrastructure::pbkdf2};

type HmacSha256 = Hmac<Sha256>;

/// 用户标识（外部系统的 64 位用户 id）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 进程级主密钥
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret {
    bytes: [u8; 64],
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret(<redacted>)")
    }
}

impl MasterSecret {
    /// 从助记词和口令派生主密钥
    ///
    /// 助记词会先做空白归一化并转小写，再按英文词表做 BIP39 校验。
    /// 口令取 SHA-256 十六进制的前 32 个字符作为 BIP39 passphrase。
    pub fn from_recovery_phrase(phrase: &str, passphrase: &str) -> Result<Self, DerivationError> {
        let normalized = Zeroizing::new(
            phrase
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        );
        let mnemonic = Mnemonic::parse_in(Language::English, normalized.as_str())
            .map_err(|e| DerivationError::InvalidRecoveryPhrase(e.to_string()))?;

        let bip39_passphrase = normalize_passphrase(passphrase);
        let seed = Zeroizing::new(mnemonic.to_seed(bip39_passphrase.as_str()));

        Ok(Self { bytes: *seed })
    }

    /// 派生用户种子
    ///
    /// 不混入时间分桶：同一 (主密钥, 用户) 永远得到同一个种子。
    pub fn per_user_secret(&self, user: UserId) -> Result<UserSecret, DerivationError> {
        let message = format!("user_{}", user);
        let bytes = hmac_sha256(&self.bytes, message.as_bytes())?;
        Ok(UserSecret {
            bytes: Zeroizing::new(bytes),
        })
    }

    /// 降级编码器使用的标记，避免直接把助记词或主密钥放进哈希输入
    pub(crate) fn fallback_marker(&self) -> Result<FallbackMarker, DerivationError> {
        let bytes = hmac_sha256(&self.bytes, b"fallback-marker")?;
        Ok(FallbackMarker {
            bytes: Zeroizing::new(bytes),
        })
    }
}

/// 用户种子，只在一次派生调用内存活
pub struct UserSecret {
    bytes: Zeroizing<[u8; 32]>,
}

impl fmt::Debug for UserSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserSecret(<redacted>)")
    }
}

impl UserSecret {
    /// 结合派生路径常量和用户 id 拉伸出派生密钥
    pub fn derive_key(&self, path: &str, user: UserId, iterations: u32) -> DerivedKey {
        let mut material = Zeroizing::new(Vec::with_capacity(32 + path.len() + 8));
        material.extend_from_slice(&self.bytes[..]);
        material.extend_from_slice(path.as_bytes());
        material.extend_from_slice(&user.to_be_bytes());

        DerivedKey {
            bytes: pbkdf2::stretch_key(&material, iterations),
        }
    }
}

/// 派生密钥，不离开引擎边界
pub struct DerivedKey {
    bytes: Zeroizing<[u8; pbkdf2::KEY_LENGTH]>,
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

impl DerivedKey {
    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; pbkdf2::KEY_LENGTH]) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8; pbkdf2::KEY_LENGTH] {
        &self.bytes
    }
}

/// 主密钥派生出的降级标记
pub(crate) struct FallbackMarker {
    bytes: Zeroizing<[u8; 32]>,
}

impl FallbackMarker {
    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

/// 种子材料：每个进程只初始化一次
///
/// 第二次调用 `initialize` 返回 `AlreadyInitialized`，不会覆盖已有主密钥。
/// 可以直接放进 `static`。
#[derive(Default)]
pub struct SeedMaterial {
    master: OnceCell<Arc<MasterSecret>>,
}

impl SeedMaterial {
    pub const fn new() -> Self {
        Self {
            master: OnceCell::new(),
        }
    }

    pub fn initialize(
        &self,
        phrase: &str,
        passphrase: &str,
    ) -> Result<Arc<MasterSecret>, DerivationError> {
        if self.master.get().is_some() {
            return Err(DerivationError::AlreadyInitialized);
        }

        let master = Arc::new(MasterSecret::from_recovery_phrase(phrase, passphrase)?);
        self.master
            .set(Arc::clone(&master))
            .map_err(|_| DerivationError::AlreadyInitialized)?;

        tracing::info!("master seed initialized");
        Ok(master)
    }

    pub fn master(&self) -> Option<Arc<MasterSecret>> {
        self.master.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.master.get().is_some()
    }
}

fn normalize_passphrase(passphrase: &str) -> Zeroizing<String> {
    let digest = Zeroizing::new(hex::encode(Sha256::digest(passphrase.as_bytes())));
    Zeroizing::new(digest[..32].to_string())
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; 32], DerivationError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| DerivationError::KeyMaterial("hmac key length rejected"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}
