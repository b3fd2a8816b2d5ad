//! Sim API domain.
//!
//! Thin async client for the Sim blockchain data API: request construction,
//! query parameter serialization and error types. Results are returned as raw
//! JSON; shaping them into tool results is the tools domain's job.

mod client;
mod error;
pub mod params;

pub use client::{API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, SimClient, SimRequest};
pub use error::{SimError, SimResult};
pub use params::{
    ChainIds, EvmBalancesParams, EvmTransactionsParams, QueryParams, SvmBalancesParams,
    SvmTransactionsParams, TokenPriceParams,
};
