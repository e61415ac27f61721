//! Deterministic account derivation
//!
//! Pure functions from seeds to addresses. These must match the program's own
//! derivations exactly; they are an external contract, not a local choice.

use solana_sdk::pubkey::Pubkey;

use crate::constants::{ASSOCIATED_TOKEN_PROGRAM_ID, MAIN_SEED, POOL_SEED, TOKEN_PROGRAM_ID};
use crate::error::{ClientError, Result};

/// Derives every PDA the program owns.
#[derive(Debug, Clone, Copy)]
pub struct Pdas {
    program_id: Pubkey,
}

impl Pdas {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Singleton main-state address, seeds `["main"]`.
    pub fn main_state(&self) -> Result<(Pubkey, u8)> {
        Pubkey::try_find_program_address(&[MAIN_SEED], &self.program_id)
            .ok_or(ClientError::DerivationExhausted)
    }

    /// Pool-state address, seeds `["pool", base_mint, quote_mint, owner]`.
    pub fn pool_state(
        &self,
        base_mint: &Pubkey,
        quote_mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<(Pubkey, u8)> {
        Pubkey::try_find_program_address(
            &[
                POOL_SEED,
                base_mint.as_ref(),
                quote_mint.as_ref(),
                owner.as_ref(),
            ],
            &self.program_id,
        )
        .ok_or(ClientError::DerivationExhausted)
    }
}

/// Associated token account of `owner` for `mint`.
///
/// `owner` may itself be a PDA (the pool state owns its reserve accounts).
pub fn associated_token_address(mint: &Pubkey, owner: &Pubkey) -> Result<Pubkey> {
    Pubkey::try_find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _)| address)
    .ok_or(ClientError::DerivationExhausted)
}
