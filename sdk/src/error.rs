//! Error taxonomy returned by every orchestration operation
//!
//! Errors are values, never panics. Each fallible boundary call converts the
//! underlying failure into one of these codes; the original failure is kept
//! in a `log::debug!` side channel at the conversion site.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No signer was configured on the client
    #[error("wallet not found")]
    WalletNotFound,

    /// Malformed address or out-of-range amount
    #[error("invalid input")]
    InvalidInput,

    /// Transaction submission was rejected by the program or the transport
    #[error("transaction failed")]
    TxFailed,

    /// Account read failed after retry exhaustion
    #[error("failed to fetch data")]
    FailedToFetchData,

    #[error("pool not found")]
    PoolNotFound,

    #[error("main state info not found")]
    MainStateInfoNotFound,

    /// A referenced mint account does not exist
    #[error("token not found")]
    TokenNotFound,

    /// No valid bump seed exists for a program-address derivation
    #[error("derivation exhausted")]
    DerivationExhausted,
}

pub type Result<T> = std::result::Result<T, ClientError>;
