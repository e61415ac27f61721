//! Protocol constants shared with the on-chain program

use solana_sdk::pubkey::Pubkey;

/// Seed of the main-state PDA
pub const MAIN_SEED: &[u8] = b"main";
/// Seed prefix of pool-state PDAs
pub const POOL_SEED: &[u8] = b"pool";

/// Trading fee denominator: `trading_fee / FEE_DIVISOR` is the fee rate
pub const FEE_DIVISOR: u64 = 1000;

/// Compute budget requested for pool creation and trades
pub const TRADE_COMPUTE_UNIT_LIMIT: u32 = 300_000;

/// Program id of the deployed AMM program
pub const DEFAULT_PROGRAM_ID: &str = "5BXzjtQpmqdXeDNmThjDYHsjFGviDCeW58SpumTW86Fa";

pub const TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const NATIVE_MINT: Pubkey =
    solana_sdk::pubkey!("So11111111111111111111111111111111111111112");
