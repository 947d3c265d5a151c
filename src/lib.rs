//! ironaddr - 确定性多链充值地址派生引擎
//!
//! 由一份助记词为每个 (链, 用户) 派生稳定的展示地址，
//! 覆盖 Bitcoin / Ethereum / TRON / TON / BSC / Litecoin / Dogecoin / Cardano / Solana / XRP。
//!
//! 地址只保证形状与链格式一致，不是由真实公钥计算出来的，不能用于真实资金路由。

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

// 重新导出常用类型
pub use error::DerivationError;

pub mod prelude {
    pub use crate::{
        config::{Config, WalletConfig},
        domain::{AddressRecord, ChainId, SeedMaterial, UserId, WalletService},
        error::DerivationError,
    };
}
