//! Main-state administration commands

use anyhow::{Context, Result};
use bondcurve_sdk::amount::format_fixed_point;
use bondcurve_sdk::constants::FEE_DIVISOR;
use bondcurve_sdk::UpdateMainStateParams;
use colored::Colorize;

use crate::config::NetworkConfig;

pub async fn init_state(config: &NetworkConfig) -> Result<()> {
    println!("{}", "=== Initialize Main State ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    println!("{} {}", "Program:".bright_cyan(), config.program_id);
    println!("{} {}", "Owner:".bright_cyan(), config.pubkey());

    let client = config.client();
    let pass = client
        .init_main_state()
        .await
        .context("Main state initialization failed")?;

    println!("\n{} {}", "Success!".bright_green().bold(), "✓".bright_green());
    println!("{} {}", "Signature:".bright_cyan(), pass.signature);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn update_state(
    config: &NetworkConfig,
    new_owner: Option<String>,
    new_fee_recipient: Option<String>,
    trading_fee: Option<u64>,
    total_token_supply: Option<u64>,
    init_real_base_reserves: Option<u64>,
    init_virt_base_reserves: Option<u64>,
    init_virt_quote_reserves: Option<u64>,
) -> Result<()> {
    println!("{}", "=== Update Main State ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    if let Some(owner) = &new_owner {
        println!("{} {}", "New Owner:".bright_cyan(), owner);
    }
    if let Some(recipient) = &new_fee_recipient {
        println!("{} {}", "New Fee Recipient:".bright_cyan(), recipient);
    }
    if let Some(fee) = trading_fee {
        println!(
            "{} {} ({}%)",
            "New Trading Fee:".bright_cyan(),
            fee,
            fee as f64 * 100.0 / FEE_DIVISOR as f64
        );
    }

    let client = config.client();
    let pass = client
        .update_main_state(UpdateMainStateParams {
            new_owner,
            new_fee_recipient,
            trading_fee,
            total_token_supply,
            init_real_base_reserves,
            init_virt_base_reserves,
            init_virt_quote_reserves,
        })
        .await
        .context("Main state update failed")?;

    println!("\n{} {}", "Success!".bright_green().bold(), "✓".bright_green());
    println!("{} {}", "Signature:".bright_cyan(), pass.signature);
    Ok(())
}

pub async fn show_state(config: &NetworkConfig) -> Result<()> {
    println!("{}", "=== Main State ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);

    let client = config.client();
    let state = client
        .get_main_state_info()
        .await
        .context("Failed to fetch main state")?;

    println!("\n{} {}", "Owner:".bright_cyan(), state.owner);
    println!("{} {}", "Fee Recipient:".bright_cyan(), state.fee_recipient);
    println!(
        "{} {}%",
        "Trading Fee:".bright_cyan(),
        state.trading_fee as f64 * 100.0 / FEE_DIVISOR as f64
    );
    println!(
        "{} {}",
        "Total Token Supply:".bright_cyan(),
        state.total_token_supply
    );
    println!(
        "{} {}",
        "Init Real Base Reserves:".bright_cyan(),
        state.init_real_base_reserves
    );
    println!(
        "{} {}",
        "Init Virt Base Reserves:".bright_cyan(),
        state.init_virt_base_reserves
    );
    println!(
        "{} {} ({} SOL)",
        "Init Virt Quote Reserves:".bright_cyan(),
        state.init_virt_quote_reserves,
        format_fixed_point(u128::from(state.init_virt_quote_reserves), 9)
    );
    Ok(())
}

pub async fn withdraw(config: &NetworkConfig, pool: String) -> Result<()> {
    println!("{}", "=== Withdraw Pool Reserves ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {}", "Admin:".bright_cyan(), config.pubkey());

    let client = config.client();
    // rejected by the program while the curve is incomplete
    let pass = client.withdraw(&pool).await.context("Withdraw failed")?;

    println!("\n{} {}", "Success!".bright_green().bold(), "✓".bright_green());
    println!("{} {}", "Signature:".bright_cyan(), pass.signature);
    Ok(())
}
