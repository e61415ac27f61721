//! Remote state reads with bounded retry
//!
//! Every read goes through one [`RetryPolicy`]: a transient failure gets
//! exactly one more attempt after a fixed delay, then surfaces as
//! `FailedToFetchData`. Absence is `Ok(None)`; whether that is an error is
//! the caller's call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;

use crate::error::{ClientError, Result};
use crate::state::{self, MainState, PoolState};

/// Bounded retry: `attempts` total tries with a fixed `delay` between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub async fn run<T, E, F, Fut>(&self, mut call: F) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.attempts => {
                    log::debug!(
                        "attempt {attempt} failed ({err}), retrying in {:?}",
                        self.delay
                    );
                    attempt += 1;
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Read-side accessor for program accounts.
pub struct StateAccessor {
    rpc: Arc<RpcClient>,
    retry: RetryPolicy,
}

impl StateAccessor {
    pub fn new(rpc: Arc<RpcClient>, retry: RetryPolicy) -> Self {
        Self { rpc, retry }
    }

    /// Fetch one account; `Ok(None)` if it does not exist.
    pub async fn fetch(&self, address: &Pubkey) -> Result<Option<Account>> {
        let commitment = self.rpc.commitment();
        self.retry
            .run(|| async {
                self.rpc
                    .get_account_with_commitment(address, commitment)
                    .await
                    .map(|response| response.value)
            })
            .await
            .map_err(|err| {
                log::debug!("account fetch failed for {address}: {err}");
                ClientError::FailedToFetchData
            })
    }

    /// Fetch several accounts in one round-trip, same retry discipline.
    pub async fn fetch_many(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        self.retry
            .run(|| self.rpc.get_multiple_accounts(addresses))
            .await
            .map_err(|err| {
                log::debug!("batched account fetch failed: {err}");
                ClientError::FailedToFetchData
            })
    }

    pub async fn main_state(&self, address: &Pubkey) -> Result<MainState> {
        let account = self
            .fetch(address)
            .await?
            .ok_or(ClientError::MainStateInfoNotFound)?;
        state::decode_account(MainState::NAME, &account.data)
    }

    pub async fn pool_state(&self, address: &Pubkey) -> Result<PoolState> {
        let account = self.fetch(address).await?.ok_or(ClientError::PoolNotFound)?;
        state::decode_account(PoolState::NAME, &account.data)
    }

    /// Decimal precision of one mint.
    pub async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8> {
        let account = self.fetch(mint).await?.ok_or(ClientError::TokenNotFound)?;
        state::mint_decimals(&account.data)
    }

    /// Decimal precision of a pool's base and quote mints.
    pub async fn mint_decimals_pair(&self, base_mint: &Pubkey, quote_mint: &Pubkey) -> Result<(u8, u8)> {
        let accounts = self.fetch_many(&[*base_mint, *quote_mint]).await?;
        let mut decimals = [0u8; 2];
        for (slot, account) in decimals.iter_mut().zip(&accounts) {
            let account = account.as_ref().ok_or(ClientError::TokenNotFound)?;
            *slot = state::mint_decimals(&account.data)?;
        }
        Ok((decimals[0], decimals[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn quick_retry() -> RetryPolicy {
        RetryPolicy {
            attempts: 2,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn first_success_needs_no_retry() {
        let calls = Cell::new(0u32);
        let result: std::result::Result<u32, &str> = quick_retry()
            .run(|| async {
                calls.set(calls.get() + 1);
                Ok(7)
            })
            .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn transient_failure_gets_exactly_one_retry() {
        let calls = Cell::new(0u32);
        let result: std::result::Result<u32, &str> = quick_retry()
            .run(|| async {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    Err("transient")
                } else {
                    Ok(42)
                }
            })
            .await;
        assert_eq!(result, Ok(42));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn failure_surfaces_after_retry_exhaustion() {
        let calls = Cell::new(0u32);
        let result: std::result::Result<u32, &str> = quick_retry()
            .run(|| async {
                calls.set(calls.get() + 1);
                Err("still down")
            })
            .await;
        assert_eq!(result, Err("still down"));
        assert_eq!(calls.get(), 2);
    }
}
