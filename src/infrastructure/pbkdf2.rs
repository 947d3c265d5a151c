//! PBKDF2 密钥拉伸模块
//! 用于从用户种子 + 派生路径拉伸出定长派生密钥

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// 默认迭代次数
pub const DEFAULT_ITERATIONS: u32 = 2_048;
/// 派生密钥长度（字节）
pub const KEY_LENGTH: usize = 32;
/// 固定盐值：派生结果必须跨进程稳定，不能使用随机盐
const DERIVATION_SALT: &[u8] = b"ironaddr/derived-key/v1";

/// 拉伸密钥材料
///
/// # Arguments
/// * `material` - 待拉伸的输入（已拼接好的 用户种子 || 路径 || 用户 id）
/// * `iterations` - 迭代次数，0 会被当作 1 处理
pub fn stretch_key(material: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(material, DERIVATION_SALT, iterations.max(1), &mut key[..]);
    key
}
