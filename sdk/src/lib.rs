//! Client-side orchestration layer for the bondcurve bonding-curve AMM.
//!
//! The on-chain program is the authoritative state machine; this crate only
//! requests state transitions from it and predicts their effect. It covers:
//! - deterministic derivation of every account a transition touches,
//! - decimal <-> fixed-point amount conversion at per-mint precision,
//! - client-side swap quotes that reproduce the program's arithmetic exactly,
//! - transaction submission with a typed success/failure result.

pub mod amount;
pub mod client;
pub mod constants;
pub mod curve;
pub mod error;
pub mod fetch;
pub mod instruction;
pub mod pda;
pub mod state;

pub use client::{CreatePoolParams, CreatePoolPass, CurveClient, TxPass, UpdateMainStateParams};
pub use error::{ClientError, Result};
pub use fetch::{RetryPolicy, StateAccessor};
pub use instruction::UpdateMainStateInput;
pub use pda::Pdas;
pub use state::{MainState, PoolState};
