//! Instruction builders for the on-chain program
//!
//! Each builder lists its account metas in the exact order of the program's
//! accounts struct and encodes its args after the 8-byte method
//! discriminator. The bincode fixed-int encoding (little-endian, 1-byte
//! Option tags) matches the program's argument layout.

use serde::Serialize;
use solana_sdk::hash::hashv;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::constants::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::{ClientError, Result};

/// Method discriminator: `sha256("global:<name>")[..8]`
pub fn sighash(name: &str) -> [u8; 8] {
    let hash = hashv(&[b"global:", name.as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

fn encode_data<T: Serialize>(name: &str, args: &T) -> Result<Vec<u8>> {
    let mut data = sighash(name).to_vec();
    let encoded = bincode::serialize(args).map_err(|err| {
        log::debug!("failed to encode {name} args: {err}");
        ClientError::InvalidInput
    })?;
    data.extend(encoded);
    Ok(data)
}

/// Partial update of the main state: `None` fields keep their on-chain value.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct UpdateMainStateInput {
    pub owner: Option<Pubkey>,
    pub fee_recipient: Option<Pubkey>,
    pub trading_fee: Option<u64>,
    pub total_token_supply: Option<u64>,
    pub init_real_base_reserves: Option<u64>,
    pub init_virt_base_reserves: Option<u64>,
    pub init_virt_quote_reserves: Option<u64>,
}

#[derive(Serialize)]
struct CreatePoolArgs {
    base_amount: u64,
    quote_amount: u64,
}

/// Accounts for `create_pool`, in program order.
#[derive(Debug, Clone, Copy)]
pub struct CreatePoolKeys {
    pub creator: Pubkey,
    pub main_state: Pubkey,
    pub pool_state: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub creator_base_ata: Pubkey,
    pub creator_quote_ata: Pubkey,
    pub reserver_base_ata: Pubkey,
    pub reserver_quote_ata: Pubkey,
}

/// Accounts shared by `buy` and `sell`, in program order.
#[derive(Debug, Clone, Copy)]
pub struct TradeKeys {
    pub trader: Pubkey,
    pub main_state: Pubkey,
    pub fee_recipient: Pubkey,
    pub fee_quote_ata: Pubkey,
    pub pool_state: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub trader_base_ata: Pubkey,
    pub trader_quote_ata: Pubkey,
    pub reserver_base_ata: Pubkey,
    pub reserver_quote_ata: Pubkey,
}

/// Accounts for `withdraw`, in program order.
#[derive(Debug, Clone, Copy)]
pub struct WithdrawKeys {
    pub admin: Pubkey,
    pub main_state: Pubkey,
    pub owner: Pubkey,
    pub pool_state: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub reserver_base_ata: Pubkey,
    pub reserver_quote_ata: Pubkey,
    pub admin_base_ata: Pubkey,
    pub admin_quote_ata: Pubkey,
}

pub fn init_main_state(
    program_id: &Pubkey,
    owner: &Pubkey,
    main_state: &Pubkey,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(*main_state, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: encode_data("init_main_state", &())?,
    })
}

pub fn update_main_state(
    program_id: &Pubkey,
    owner: &Pubkey,
    main_state: &Pubkey,
    input: &UpdateMainStateInput,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(*main_state, false),
        ],
        data: encode_data("update_main_state", input)?,
    })
}

pub fn create_pool(
    program_id: &Pubkey,
    keys: &CreatePoolKeys,
    base_amount: u64,
    quote_amount: u64,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(keys.creator, true),
            AccountMeta::new(keys.main_state, false),
            AccountMeta::new(keys.pool_state, false),
            AccountMeta::new_readonly(keys.base_mint, false),
            AccountMeta::new_readonly(keys.quote_mint, false),
            AccountMeta::new(keys.creator_base_ata, false),
            AccountMeta::new(keys.creator_quote_ata, false),
            AccountMeta::new(keys.reserver_base_ata, false),
            AccountMeta::new(keys.reserver_quote_ata, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: encode_data(
            "create_pool",
            &CreatePoolArgs {
                base_amount,
                quote_amount,
            },
        )?,
    })
}

pub fn buy(program_id: &Pubkey, keys: &TradeKeys, amount: u64) -> Result<Instruction> {
    trade("buy", program_id, keys, amount)
}

pub fn sell(program_id: &Pubkey, keys: &TradeKeys, amount: u64) -> Result<Instruction> {
    trade("sell", program_id, keys, amount)
}

fn trade(name: &str, program_id: &Pubkey, keys: &TradeKeys, amount: u64) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(keys.trader, true),
            AccountMeta::new(keys.main_state, false),
            AccountMeta::new(keys.fee_recipient, false),
            AccountMeta::new(keys.fee_quote_ata, false),
            AccountMeta::new(keys.pool_state, false),
            AccountMeta::new_readonly(keys.base_mint, false),
            AccountMeta::new_readonly(keys.quote_mint, false),
            AccountMeta::new(keys.trader_base_ata, false),
            AccountMeta::new(keys.trader_quote_ata, false),
            AccountMeta::new(keys.reserver_base_ata, false),
            AccountMeta::new(keys.reserver_quote_ata, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: encode_data(name, &amount)?,
    })
}

pub fn withdraw(program_id: &Pubkey, keys: &WithdrawKeys) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(keys.admin, true),
            AccountMeta::new(keys.main_state, false),
            AccountMeta::new(keys.owner, false),
            AccountMeta::new(keys.pool_state, false),
            AccountMeta::new(keys.base_mint, false),
            AccountMeta::new(keys.quote_mint, false),
            AccountMeta::new(keys.reserver_base_ata, false),
            AccountMeta::new(keys.reserver_quote_ata, false),
            AccountMeta::new(keys.admin_base_ata, false),
            AccountMeta::new(keys.admin_quote_ata, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: encode_data("withdraw", &())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sighash_is_stable() {
        assert_eq!(sighash("buy"), sighash("buy"));
        assert_ne!(sighash("buy"), sighash("sell"));
        assert_eq!(sighash("buy").len(), 8);
    }

    #[test]
    fn partial_update_encodes_none_for_omitted_fields() {
        let input = UpdateMainStateInput {
            trading_fee: Some(25),
            ..Default::default()
        };
        let ix = update_main_state(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &input,
        )
        .unwrap();
        // sighash, two absent pubkeys, present fee, four absent u64s
        let expected_args = [
            vec![0u8, 0],
            vec![1],
            25u64.to_le_bytes().to_vec(),
            vec![0u8, 0, 0, 0],
        ]
        .concat();
        assert_eq!(&ix.data[8..], &expected_args[..]);
    }

    #[test]
    fn full_update_carries_pubkeys_verbatim() {
        let new_owner = Pubkey::new_unique();
        let input = UpdateMainStateInput {
            owner: Some(new_owner),
            ..Default::default()
        };
        let ix = update_main_state(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &input,
        )
        .unwrap();
        assert_eq!(ix.data[8], 1);
        assert_eq!(&ix.data[9..41], new_owner.as_ref());
    }

    #[test]
    fn trade_amount_follows_discriminator() {
        let keys = TradeKeys {
            trader: Pubkey::new_unique(),
            main_state: Pubkey::new_unique(),
            fee_recipient: Pubkey::new_unique(),
            fee_quote_ata: Pubkey::new_unique(),
            pool_state: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            trader_base_ata: Pubkey::new_unique(),
            trader_quote_ata: Pubkey::new_unique(),
            reserver_base_ata: Pubkey::new_unique(),
            reserver_quote_ata: Pubkey::new_unique(),
        };
        let ix = buy(&Pubkey::new_unique(), &keys, 42_000_000_000).unwrap();
        assert_eq!(&ix.data[..8], &sighash("buy"));
        assert_eq!(&ix.data[8..], &42_000_000_000u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 14);
        // only the trader signs
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts.iter().skip(1).all(|meta| !meta.is_signer));
        // mints and the three programs are read-only
        assert!(!ix.accounts[5].is_writable);
        assert!(!ix.accounts[6].is_writable);
        assert!(ix.accounts[11..].iter().all(|meta| !meta.is_writable));
    }

    #[test]
    fn init_main_state_has_no_args() {
        let ix = init_main_state(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
        )
        .unwrap();
        assert_eq!(ix.data.len(), 8);
        assert_eq!(ix.accounts.len(), 3);
    }
}
