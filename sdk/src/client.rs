//! Orchestration client
//!
//! One method per program action, all with the same discipline: check the
//! signer, validate inputs locally (before any network round-trip), fetch the
//! state the action needs, convert amounts at per-mint precision, derive the
//! touched accounts, submit, and map the outcome into [`ClientError`].

use std::str::FromStr;
use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

use crate::amount;
use crate::constants::TRADE_COMPUTE_UNIT_LIMIT;
use crate::curve;
use crate::error::{ClientError, Result};
use crate::fetch::{RetryPolicy, StateAccessor};
use crate::instruction::{self, CreatePoolKeys, TradeKeys, UpdateMainStateInput, WithdrawKeys};
use crate::pda::{associated_token_address, Pdas};
use crate::state::{MainState, PoolState};

/// Successful submission outcome
#[derive(Debug, Clone, Copy)]
pub struct TxPass {
    pub signature: Signature,
}

/// Pool creation additionally reports the derived pool address.
#[derive(Debug, Clone, Copy)]
pub struct CreatePoolPass {
    pub signature: Signature,
    pub pool: Pubkey,
}

#[derive(Debug, Clone)]
pub struct CreatePoolParams {
    pub base_token: String,
    pub quote_token: String,
    pub base_amount: String,
    pub quote_amount: String,
}

/// Main-state update: only `Some` fields are changed on chain.
#[derive(Debug, Default, Clone)]
pub struct UpdateMainStateParams {
    pub new_owner: Option<String>,
    pub new_fee_recipient: Option<String>,
    pub trading_fee: Option<u64>,
    pub total_token_supply: Option<u64>,
    pub init_real_base_reserves: Option<u64>,
    pub init_virt_base_reserves: Option<u64>,
    pub init_virt_quote_reserves: Option<u64>,
}

pub struct CurveClient {
    rpc: Arc<RpcClient>,
    accessor: StateAccessor,
    pdas: Pdas,
    program_id: Pubkey,
    payer: Option<Arc<Keypair>>,
}

impl CurveClient {
    pub fn new(rpc_url: &str, program_id: Pubkey, payer: Option<Arc<Keypair>>) -> Self {
        Self::with_retry_policy(rpc_url, program_id, payer, RetryPolicy::default())
    }

    pub fn with_retry_policy(
        rpc_url: &str,
        program_id: Pubkey,
        payer: Option<Arc<Keypair>>,
        retry: RetryPolicy,
    ) -> Self {
        let rpc = Arc::new(RpcClient::new_with_commitment(
            rpc_url.to_string(),
            CommitmentConfig::confirmed(),
        ));
        Self {
            accessor: StateAccessor::new(rpc.clone(), retry),
            pdas: Pdas::new(program_id),
            rpc,
            program_id,
            payer,
        }
    }

    pub fn pdas(&self) -> &Pdas {
        &self.pdas
    }

    fn signer(&self) -> Result<Arc<Keypair>> {
        self.payer.clone().ok_or(ClientError::WalletNotFound)
    }

    fn parse_pubkey(value: &str) -> Result<Pubkey> {
        Pubkey::from_str(value.trim()).map_err(|err| {
            log::debug!("pubkey parse failed for {value:?}: {err}");
            ClientError::InvalidInput
        })
    }

    async fn submit(&self, instructions: &[Instruction], payer: &Keypair) -> Result<Signature> {
        let blockhash = self.rpc.get_latest_blockhash().await.map_err(|err| {
            log::debug!("blockhash fetch failed: {err}");
            ClientError::TxFailed
        })?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        self.rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|err| {
                log::debug!("transaction failed: {err}");
                ClientError::TxFailed
            })
    }

    /// Create the singleton main-state account. The signer becomes owner and
    /// initial fee recipient.
    pub async fn init_main_state(&self) -> Result<TxPass> {
        let payer = self.signer()?;
        let (main_state, _) = self.pdas.main_state()?;
        let ix = instruction::init_main_state(&self.program_id, &payer.pubkey(), &main_state)?;
        let signature = self.submit(&[ix], &payer).await?;
        Ok(TxPass { signature })
    }

    /// Partial update of the main state; omitted fields keep their value.
    pub async fn update_main_state(&self, params: UpdateMainStateParams) -> Result<TxPass> {
        let payer = self.signer()?;
        let new_owner = match &params.new_owner {
            Some(address) => Some(Self::parse_pubkey(address)?),
            None => None,
        };
        let new_fee_recipient = match &params.new_fee_recipient {
            Some(address) => Some(Self::parse_pubkey(address)?),
            None => None,
        };
        let input = UpdateMainStateInput {
            owner: new_owner,
            fee_recipient: new_fee_recipient,
            trading_fee: params.trading_fee,
            total_token_supply: params.total_token_supply,
            init_real_base_reserves: params.init_real_base_reserves,
            init_virt_base_reserves: params.init_virt_base_reserves,
            init_virt_quote_reserves: params.init_virt_quote_reserves,
        };
        let (main_state, _) = self.pdas.main_state()?;
        let ix =
            instruction::update_main_state(&self.program_id, &payer.pubkey(), &main_state, &input)?;
        let signature = self.submit(&[ix], &payer).await?;
        Ok(TxPass { signature })
    }

    /// Create a pool for (base, quote). Real reserves are seeded from the
    /// creator's deposit; virtual reserves from the main-state config.
    pub async fn create_pool(&self, params: CreatePoolParams) -> Result<CreatePoolPass> {
        let payer = self.signer()?;
        let creator = payer.pubkey();
        let base_mint = Self::parse_pubkey(&params.base_token)?;
        let quote_mint = Self::parse_pubkey(&params.quote_token)?;

        let (base_decimals, quote_decimals) =
            self.accessor.mint_decimals_pair(&base_mint, &quote_mint).await?;
        let base_amount = amount::to_fixed_point_u64(&params.base_amount, base_decimals)?;
        let quote_amount = amount::to_fixed_point_u64(&params.quote_amount, quote_decimals)?;

        let (main_state, _) = self.pdas.main_state()?;
        let (pool_state, _) = self.pdas.pool_state(&base_mint, &quote_mint, &creator)?;
        let keys = CreatePoolKeys {
            creator,
            main_state,
            pool_state,
            base_mint,
            quote_mint,
            creator_base_ata: associated_token_address(&base_mint, &creator)?,
            creator_quote_ata: associated_token_address(&quote_mint, &creator)?,
            reserver_base_ata: associated_token_address(&base_mint, &pool_state)?,
            reserver_quote_ata: associated_token_address(&quote_mint, &pool_state)?,
        };

        let instructions = [
            ComputeBudgetInstruction::set_compute_unit_limit(TRADE_COMPUTE_UNIT_LIMIT),
            instruction::create_pool(&self.program_id, &keys, base_amount, quote_amount)?,
        ];
        let signature = self.submit(&instructions, &payer).await?;
        Ok(CreatePoolPass {
            signature,
            pool: pool_state,
        })
    }

    /// Swap `amount` quote tokens (decimal string) into base tokens.
    pub async fn buy(&self, pool_id: &str, amount: &str) -> Result<TxPass> {
        let payer = self.signer()?;
        let pool = Self::parse_pubkey(pool_id)?;
        let (main_state_address, main_state, pool_info) = self.trade_state(&pool).await?;
        let quote_decimals = self.accessor.mint_decimals(&pool_info.quote_mint).await?;
        let amount = amount::to_fixed_point_u64(amount, quote_decimals)?;

        let keys = self.trade_keys(&payer.pubkey(), main_state_address, &main_state, pool, &pool_info)?;
        let instructions = [
            ComputeBudgetInstruction::set_compute_unit_limit(TRADE_COMPUTE_UNIT_LIMIT),
            instruction::buy(&self.program_id, &keys, amount)?,
        ];
        let signature = self.submit(&instructions, &payer).await?;
        Ok(TxPass { signature })
    }

    /// Swap `amount` base tokens (decimal string) into quote tokens.
    pub async fn sell(&self, pool_id: &str, amount: &str) -> Result<TxPass> {
        let payer = self.signer()?;
        let pool = Self::parse_pubkey(pool_id)?;
        let (main_state_address, main_state, pool_info) = self.trade_state(&pool).await?;
        let base_decimals = self.accessor.mint_decimals(&pool_info.base_mint).await?;
        let amount = amount::to_fixed_point_u64(amount, base_decimals)?;

        let keys = self.trade_keys(&payer.pubkey(), main_state_address, &main_state, pool, &pool_info)?;
        let instructions = [
            ComputeBudgetInstruction::set_compute_unit_limit(TRADE_COMPUTE_UNIT_LIMIT),
            instruction::sell(&self.program_id, &keys, amount)?,
        ];
        let signature = self.submit(&instructions, &payer).await?;
        Ok(TxPass { signature })
    }

    /// Collect accumulated reserves once the curve is complete. The program,
    /// not this client, enforces the completion threshold and the admin
    /// identity; a rejection comes back as `TxFailed`.
    pub async fn withdraw(&self, pool_id: &str) -> Result<TxPass> {
        let payer = self.signer()?;
        let admin = payer.pubkey();
        let pool = Self::parse_pubkey(pool_id)?;
        let (main_state_address, _) = self.pdas.main_state()?;
        let main_state = self.accessor.main_state(&main_state_address).await?;
        let pool_info = self.accessor.pool_state(&pool).await?;

        let keys = WithdrawKeys {
            admin,
            main_state: main_state_address,
            owner: main_state.owner,
            pool_state: pool,
            base_mint: pool_info.base_mint,
            quote_mint: pool_info.quote_mint,
            reserver_base_ata: associated_token_address(&pool_info.base_mint, &pool)?,
            reserver_quote_ata: associated_token_address(&pool_info.quote_mint, &pool)?,
            admin_base_ata: associated_token_address(&pool_info.base_mint, &admin)?,
            admin_quote_ata: associated_token_address(&pool_info.quote_mint, &admin)?,
        };
        let ix = instruction::withdraw(&self.program_id, &keys)?;
        let signature = self.submit(&[ix], &payer).await?;
        Ok(TxPass { signature })
    }

    /// Fresh main-state snapshot.
    pub async fn get_main_state_info(&self) -> Result<MainState> {
        let (main_state_address, _) = self.pdas.main_state()?;
        self.accessor.main_state(&main_state_address).await
    }

    /// Fresh pool snapshot.
    pub async fn get_pool_info(&self, pool_id: &str) -> Result<PoolState> {
        let pool = Self::parse_pubkey(pool_id)?;
        self.accessor.pool_state(&pool).await
    }

    /// Predicted base-token output (decimal) for buying with `amount` quote
    /// tokens. Reads fresh reserves; the prediction can still be stale by the
    /// time a trade lands.
    pub async fn quote_buy(&self, pool_id: &str, amount: &str) -> Result<f64> {
        let pool = Self::parse_pubkey(pool_id)?;
        let main_state = self.get_main_state_info().await?;
        let pool_info = self.accessor.pool_state(&pool).await?;
        let (base_decimals, quote_decimals) = self
            .accessor
            .mint_decimals_pair(&pool_info.base_mint, &pool_info.quote_mint)
            .await?;

        let quote_in = amount::to_fixed_point_u64(amount, quote_decimals)?;
        let base_out = curve::quote_buy_output(&pool_info, main_state.trading_fee, quote_in)
            .ok_or(ClientError::InvalidInput)?;
        Ok(amount::to_decimal(u128::from(base_out), base_decimals))
    }

    /// Predicted quote-token output (decimal) for selling `amount` base
    /// tokens.
    pub async fn quote_sell(&self, pool_id: &str, amount: &str) -> Result<f64> {
        let pool = Self::parse_pubkey(pool_id)?;
        let main_state = self.get_main_state_info().await?;
        let pool_info = self.accessor.pool_state(&pool).await?;
        let (base_decimals, quote_decimals) = self
            .accessor
            .mint_decimals_pair(&pool_info.base_mint, &pool_info.quote_mint)
            .await?;

        let base_in = amount::to_fixed_point_u64(amount, base_decimals)?;
        let quote_out = curve::quote_sell_output(&pool_info, main_state.trading_fee, base_in)
            .ok_or(ClientError::InvalidInput)?;
        Ok(amount::to_decimal(u128::from(quote_out), quote_decimals))
    }

    async fn trade_state(&self, pool: &Pubkey) -> Result<(Pubkey, MainState, PoolState)> {
        let (main_state_address, _) = self.pdas.main_state()?;
        let main_state = self.accessor.main_state(&main_state_address).await?;
        let pool_info = self.accessor.pool_state(pool).await?;
        Ok((main_state_address, main_state, pool_info))
    }

    fn trade_keys(
        &self,
        trader: &Pubkey,
        main_state_address: Pubkey,
        main_state: &MainState,
        pool: Pubkey,
        pool_info: &PoolState,
    ) -> Result<TradeKeys> {
        Ok(TradeKeys {
            trader: *trader,
            main_state: main_state_address,
            fee_recipient: main_state.fee_recipient,
            fee_quote_ata: associated_token_address(&pool_info.quote_mint, &main_state.fee_recipient)?,
            pool_state: pool,
            base_mint: pool_info.base_mint,
            quote_mint: pool_info.quote_mint,
            trader_base_ata: associated_token_address(&pool_info.base_mint, trader)?,
            trader_quote_ata: associated_token_address(&pool_info.quote_mint, trader)?,
            reserver_base_ata: associated_token_address(&pool_info.base_mint, &pool)?,
            reserver_quote_ata: associated_token_address(&pool_info.quote_mint, &pool)?,
        })
    }
}
