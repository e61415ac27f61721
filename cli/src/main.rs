//! Bondcurve CLI - client for the bonding-curve AMM program
//!
//! Derives accounts, quotes trades against current reserves, and submits
//! state transitions to the deployed program on Solana networks (localnet,
//! devnet, mainnet).

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod admin;
mod config;
mod pool;
mod trade;

use config::NetworkConfig;

#[derive(Parser)]
#[command(name = "bondcurve")]
#[command(about = "Bondcurve CLI - trade and administer bonding-curve AMM pools", long_about = None)]
#[command(version)]
struct Cli {
    /// Network to connect to (localnet, devnet, mainnet-beta)
    #[arg(short, long, default_value = "localnet")]
    network: String,

    /// RPC URL (overrides network default)
    #[arg(short, long)]
    url: Option<String>,

    /// Path to keypair file
    #[arg(short, long)]
    keypair: Option<PathBuf>,

    /// AMM program id (overrides the deployed default)
    #[arg(short, long)]
    program_id: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the main-state configuration account
    InitState,

    /// Update main-state fields (omitted fields keep their value)
    UpdateState {
        /// New program owner
        #[arg(long)]
        new_owner: Option<String>,

        /// New trading-fee recipient
        #[arg(long)]
        new_fee_recipient: Option<String>,

        /// New trading fee (basis points over 1000)
        #[arg(long)]
        trading_fee: Option<u64>,

        /// New total token supply (fixed-point units)
        #[arg(long)]
        total_token_supply: Option<u64>,

        /// New initial real base reserves for future pools
        #[arg(long)]
        init_real_base_reserves: Option<u64>,

        /// New initial virtual base reserves for future pools
        #[arg(long)]
        init_virt_base_reserves: Option<u64>,

        /// New initial virtual quote reserves for future pools
        #[arg(long)]
        init_virt_quote_reserves: Option<u64>,
    },

    /// Create a bonding-curve pool for a token pair
    CreatePool {
        /// Base token mint address
        base_token: String,

        /// Quote token mint address
        quote_token: String,

        /// Base deposit (decimal, in base-token units)
        #[arg(long)]
        base_amount: String,

        /// Quote deposit (decimal, in quote-token units)
        #[arg(long, default_value = "0")]
        quote_amount: String,
    },

    /// Buy base tokens with quote tokens
    Buy {
        /// Pool address
        pool: String,

        /// Quote amount to spend (decimal)
        amount: String,
    },

    /// Sell base tokens for quote tokens
    Sell {
        /// Pool address
        pool: String,

        /// Base amount to sell (decimal)
        amount: String,
    },

    /// Quote the output of a hypothetical buy
    QuoteBuy {
        /// Pool address
        pool: String,

        /// Quote amount to spend (decimal)
        amount: String,
    },

    /// Quote the output of a hypothetical sell
    QuoteSell {
        /// Pool address
        pool: String,

        /// Base amount to sell (decimal)
        amount: String,
    },

    /// Withdraw reserves of a completed curve (admin only)
    Withdraw {
        /// Pool address
        pool: String,
    },

    /// Show the main-state configuration
    State,

    /// Show a pool's reserves
    Pool {
        /// Pool address
        pool: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = NetworkConfig::new(
        &cli.network,
        cli.url.clone(),
        cli.keypair.clone(),
        cli.program_id.clone(),
    )?;

    if cli.verbose {
        println!("{} {}", "Network:".bright_cyan(), config.network);
        println!("{} {}", "RPC URL:".bright_cyan(), config.rpc_url);
        println!("{} {}", "Keypair:".bright_cyan(), config.keypair_path.display());
        println!("{} {}", "Program:".bright_cyan(), config.program_id);
    }

    match cli.command {
        Commands::InitState => {
            admin::init_state(&config).await?;
        }
        Commands::UpdateState {
            new_owner,
            new_fee_recipient,
            trading_fee,
            total_token_supply,
            init_real_base_reserves,
            init_virt_base_reserves,
            init_virt_quote_reserves,
        } => {
            admin::update_state(
                &config,
                new_owner,
                new_fee_recipient,
                trading_fee,
                total_token_supply,
                init_real_base_reserves,
                init_virt_base_reserves,
                init_virt_quote_reserves,
            )
            .await?;
        }
        Commands::CreatePool {
            base_token,
            quote_token,
            base_amount,
            quote_amount,
        } => {
            pool::create_pool(&config, base_token, quote_token, base_amount, quote_amount).await?;
        }
        Commands::Buy { pool, amount } => {
            trade::buy(&config, pool, amount).await?;
        }
        Commands::Sell { pool, amount } => {
            trade::sell(&config, pool, amount).await?;
        }
        Commands::QuoteBuy { pool, amount } => {
            trade::quote_buy(&config, pool, amount).await?;
        }
        Commands::QuoteSell { pool, amount } => {
            trade::quote_sell(&config, pool, amount).await?;
        }
        Commands::Withdraw { pool } => {
            admin::withdraw(&config, pool).await?;
        }
        Commands::State => {
            admin::show_state(&config).await?;
        }
        Commands::Pool { pool } => {
            pool::show_pool(&config, pool).await?;
        }
    }

    Ok(())
}
