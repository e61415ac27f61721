//! Trading and quoting commands

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::NetworkConfig;

pub async fn buy(config: &NetworkConfig, pool: String, amount: String) -> Result<()> {
    println!("{}", "=== Buy ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {} (quote units)", "Amount:".bright_cyan(), amount);
    println!("{} {}", "Buyer:".bright_cyan(), config.pubkey());

    let client = config.client();
    match client.quote_buy(&pool, &amount).await {
        Ok(expected) => println!("{} {}", "Expected Output:".bright_cyan(), expected),
        // a failed quote is advisory only, the trade itself still settles on chain
        Err(err) => log::debug!("pre-trade quote unavailable: {err}"),
    }

    let pass = client.buy(&pool, &amount).await.context("Buy failed")?;

    println!("\n{} {}", "Success!".bright_green().bold(), "✓".bright_green());
    println!("{} {}", "Signature:".bright_cyan(), pass.signature);
    Ok(())
}

pub async fn sell(config: &NetworkConfig, pool: String, amount: String) -> Result<()> {
    println!("{}", "=== Sell ===".bright_green().bold());
    println!("{} {}", "Network:".bright_cyan(), config.network);
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {} (base units)", "Amount:".bright_cyan(), amount);
    println!("{} {}", "Seller:".bright_cyan(), config.pubkey());

    let client = config.client();
    match client.quote_sell(&pool, &amount).await {
        Ok(expected) => println!("{} {}", "Expected Output:".bright_cyan(), expected),
        Err(err) => log::debug!("pre-trade quote unavailable: {err}"),
    }

    let pass = client.sell(&pool, &amount).await.context("Sell failed")?;

    println!("\n{} {}", "Success!".bright_green().bold(), "✓".bright_green());
    println!("{} {}", "Signature:".bright_cyan(), pass.signature);
    Ok(())
}

pub async fn quote_buy(config: &NetworkConfig, pool: String, amount: String) -> Result<()> {
    println!("{}", "=== Quote Buy ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {} (quote units)", "Input:".bright_cyan(), amount);

    let client = config.client();
    let output = client
        .quote_buy(&pool, &amount)
        .await
        .context("Quote failed")?;

    println!("{} {} (base units)", "Output:".bright_cyan(), output);
    println!(
        "{}",
        "Quotes are computed from current reserves and may be stale at execution".dimmed()
    );
    Ok(())
}

pub async fn quote_sell(config: &NetworkConfig, pool: String, amount: String) -> Result<()> {
    println!("{}", "=== Quote Sell ===".bright_green().bold());
    println!("{} {}", "Pool:".bright_cyan(), pool);
    println!("{} {} (base units)", "Input:".bright_cyan(), amount);

    let client = config.client();
    let output = client
        .quote_sell(&pool, &amount)
        .await
        .context("Quote failed")?;

    println!("{} {} (quote units)", "Output:".bright_cyan(), output);
    println!(
        "{}",
        "Quotes are computed from current reserves and may be stale at execution".dimmed()
    );
    Ok(())
}
