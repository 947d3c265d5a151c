//! ironaddr 命令行入口
//!
//! ```text
//! ironaddr <user_id> [chain]          派生单条链或全部链的地址（JSON 输出）
//! ironaddr validate <chain> <address> 校验地址形状
//! ironaddr chains                     列出支持的链
//! ```

use anyhow::{Context, Result};
use ironaddr::{
    config::Config,
    domain::{ChainId, SeedMaterial, UserId, WalletService},
    infrastructure::logging,
    utils::AddressValidator,
};

static SEED_MATERIAL: SeedMaterial = SeedMaterial::new();

const USAGE: &str = "usage: ironaddr <user_id> [chain] \
    | ironaddr validate <chain> <address> \
    | ironaddr chains";

fn main() -> Result<()> {
    // 1. 加载环境变量
    dotenvy::dotenv().ok();

    // 2. 加载配置（CONFIG_PATH 指向的文件优先）
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::from_env_and_file(config_path.as_deref())?;

    // 3. 初始化日志
    logging::init_logging(&config.logging)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["validate", chain, address] => {
            let valid = AddressValidator::validate(chain, address)?;
            serde_json::json!({ "chain": chain, "valid": valid })
        }
        ["chains"] => {
            config.validate()?;
            let service = WalletService::from_config(&SEED_MATERIAL, &config.wallet)
                .context("Failed to initialize wallet service")?;
            serde_json::to_value(service.supported_chains())?
        }
        [user] | [user, _] => {
            config.validate()?;
            let user = UserId(
                user.parse::<u64>()
                    .with_context(|| format!("Invalid user id: {}", user))?,
            );
            let service = WalletService::from_config(&SEED_MATERIAL, &config.wallet)
                .context("Failed to initialize wallet service")?;

            match args.get(1) {
                Some(chain) => {
                    let chain: ChainId = chain.parse()?;
                    serde_json::to_value(service.derive_address(chain, user))?
                }
                None => serde_json::to_value(service.derive_all_addresses(user))?,
            }
        }
        _ => anyhow::bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
