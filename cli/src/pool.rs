//! Pool creation and inspection commands

use anyhow::{Context, Result};
use bondcurve_sdk::CreatePoolParams;
use colored::Colorize;

use crate::config::NetworkConfig;

pub async fn create_pool(
    config: &NetworkConfig,
    base_token: String,
    quote_token: String,
    base_amount: String,
    quote_amount: String,
) -> Result<()> {
    println!("{}", "=== Create Pool ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    println!("{} {}", "Base Mint:".bright_cyan(), base_token);
    println!("{} {}", "Quote Mint:".bright_cyan(), quote_token);
    println!("{} {}", "Base Amount:".bright_cyan(), base_amount);
    println!("{} {}", "Quote Amount:".bright_cyan(), quote_amount);
    println!("{} {}", "Creator:".bright_cyan(), config.pubkey());

    let client = config.client();
    let pass = client
        .create_pool(CreatePoolParams {
            base_token,
            quote_token,
            base_amount,
            quote_amount,
        })
        .await
        .context("Pool creation failed")?;

    println!("\n{} {}", "Success!".bright_green().bold(), "✓".bright_green());
    println!("{} {}", "Signature:".bright_cyan(), pass.signature);
    println!("{} {}", "Pool Address:".bright_cyan(), pass.pool);
    Ok(())
}

pub async fn show_pool(config: &NetworkConfig, pool: String) -> Result<()> {
    println!("{}", "=== Pool State ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    println!("{} {}", "Pool:".bright_cyan(), pool);

    let client = config.client();
    let info = client
        .get_pool_info(&pool)
        .await
        .context("Failed to fetch pool state")?;

    println!("\n{} {}", "Owner:".bright_cyan(), info.owner);
    println!("{} {}", "Base Mint:".bright_cyan(), info.base_mint);
    println!("{} {}", "Quote Mint:".bright_cyan(), info.quote_mint);
    println!(
        "{} {} real + {} virtual = {}",
        "Base Reserves:".bright_cyan(),
        info.real_base_reserves,
        info.virt_base_reserves,
        info.base_reserves()
    );
    println!(
        "{} {} real + {} virtual = {}",
        "Quote Reserves:".bright_cyan(),
        info.real_quote_reserves,
        info.virt_quote_reserves,
        info.quote_reserves()
    );
    println!(
        "{} {}",
        "Curve Complete:".bright_cyan(),
        if info.complete {
            "yes".bright_green()
        } else {
            "no".yellow()
        }
    );
    Ok(())
}
