//! Program account layouts and decoding
//!
//! Accounts are Anchor-style: an 8-byte discriminator derived from the
//! account name, then the fields in declaration order, little-endian. The
//! bincode fixed-int encoding matches that layout for every type used here,
//! so the structs below double as the wire description.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use solana_sdk::hash::hashv;
use solana_sdk::pubkey::Pubkey;

use crate::error::{ClientError, Result};

/// Singleton program configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainState {
    pub initialized: bool,
    pub owner: Pubkey,
    pub fee_recipient: Pubkey,
    /// Basis points over [`crate::constants::FEE_DIVISOR`]
    pub trading_fee: u64,
    pub total_token_supply: u64,
    pub init_real_base_reserves: u64,
    pub init_virt_base_reserves: u64,
    pub init_virt_quote_reserves: u64,
}

impl MainState {
    pub const NAME: &'static str = "MainState";
}

/// One bonding-curve pool per trading pair
///
/// The effective reserve on each side is `real + virt`; the virtual part
/// bootstraps pricing at low liquidity and is never withdrawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub owner: Pubkey,
    /// Invariant product snapshot taken at pool creation
    pub konst: u128,
    pub base_mint: Pubkey,
    pub virt_base_reserves: u64,
    pub real_base_reserves: u64,
    pub quote_mint: Pubkey,
    pub virt_quote_reserves: u64,
    pub real_quote_reserves: u64,
    /// Set by the program once the curve reaches its completion threshold
    pub complete: bool,
}

impl PoolState {
    pub const NAME: &'static str = "PoolState";

    pub fn base_reserves(&self) -> u64 {
        self.virt_base_reserves + self.real_base_reserves
    }

    pub fn quote_reserves(&self) -> u64 {
        self.virt_quote_reserves + self.real_quote_reserves
    }
}

/// Anchor account discriminator: `sha256("account:<Name>")[..8]`
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let hash = hashv(&[b"account:", name.as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

/// Decode an account image, checking its discriminator first.
///
/// Trailing bytes (struct padding in the allocated account) are ignored.
pub fn decode_account<T: DeserializeOwned>(name: &str, data: &[u8]) -> Result<T> {
    if data.len() < 8 || data[..8] != account_discriminator(name) {
        log::debug!("account data does not carry the {name} discriminator");
        return Err(ClientError::InvalidInput);
    }
    bincode::deserialize(&data[8..]).map_err(|err| {
        log::debug!("failed to decode {name}: {err}");
        ClientError::InvalidInput
    })
}

/// Length of an SPL mint account
pub const MINT_ACCOUNT_LEN: usize = 82;
/// Byte offset of the `decimals` field inside an SPL mint account
const MINT_DECIMALS_OFFSET: usize = 44;

/// Extract the decimal precision from a raw SPL mint account image.
pub fn mint_decimals(data: &[u8]) -> Result<u8> {
    if data.len() < MINT_ACCOUNT_LEN {
        log::debug!("mint account too short: {} bytes", data.len());
        return Err(ClientError::InvalidInput);
    }
    Ok(data[MINT_DECIMALS_OFFSET])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_account<T: Serialize>(name: &str, value: &T) -> Vec<u8> {
        let mut data = account_discriminator(name).to_vec();
        data.extend(bincode::serialize(value).unwrap());
        data
    }

    fn sample_pool() -> PoolState {
        PoolState {
            owner: Pubkey::new_unique(),
            konst: 30_000_000_000_000_000_000,
            base_mint: Pubkey::new_unique(),
            virt_base_reserves: 200_000_000_000_000,
            real_base_reserves: 800_000_000_000_000,
            quote_mint: Pubkey::new_unique(),
            virt_quote_reserves: 30_000_000_000,
            real_quote_reserves: 1_234,
            complete: false,
        }
    }

    #[test]
    fn decodes_pool_state_from_account_image() {
        let pool = sample_pool();
        let data = encode_account(PoolState::NAME, &pool);
        let decoded: PoolState = decode_account(PoolState::NAME, &data).unwrap();
        assert_eq!(decoded, pool);
    }

    #[test]
    fn tolerates_trailing_padding() {
        let pool = sample_pool();
        let mut data = encode_account(PoolState::NAME, &pool);
        data.extend_from_slice(&[0u8; 7]);
        let decoded: PoolState = decode_account(PoolState::NAME, &data).unwrap();
        assert_eq!(decoded, pool);
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let pool = sample_pool();
        let data = encode_account(MainState::NAME, &pool);
        assert_eq!(
            decode_account::<PoolState>(PoolState::NAME, &data),
            Err(ClientError::InvalidInput)
        );
        assert_eq!(
            decode_account::<PoolState>(PoolState::NAME, &[1, 2, 3]),
            Err(ClientError::InvalidInput)
        );
    }

    #[test]
    fn pool_state_wire_layout_is_fixed() {
        // 32 + 16 + 32 + 8 + 8 + 32 + 8 + 8 + 1
        let encoded = bincode::serialize(&sample_pool()).unwrap();
        assert_eq!(encoded.len(), 145);
        // 1 + 32 + 32 + 8 * 5
        let main = MainState {
            initialized: true,
            owner: Pubkey::new_unique(),
            fee_recipient: Pubkey::new_unique(),
            trading_fee: 10,
            total_token_supply: 1_000_000_000_000_000,
            init_real_base_reserves: 800_000_000_000_000,
            init_virt_base_reserves: 200_000_000_000_000,
            init_virt_quote_reserves: 30_000_000_000,
        };
        assert_eq!(bincode::serialize(&main).unwrap().len(), 105);
    }

    #[test]
    fn reads_mint_decimals() {
        let mut data = vec![0u8; MINT_ACCOUNT_LEN];
        data[MINT_DECIMALS_OFFSET] = 6;
        assert_eq!(mint_decimals(&data).unwrap(), 6);
        assert_eq!(mint_decimals(&data[..40]), Err(ClientError::InvalidInput));
    }
}
