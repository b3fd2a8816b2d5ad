//! Sim tool definitions.
//!
//! One function per tool builds its [`ToolDescriptor`]: schema, hints and a
//! callback bound to a shared [`SimClient`]. [`sim_tools`] returns them in the
//! order clients see them listed.

pub mod descriptions;
mod evm;
mod svm;

use std::future::Future;
use std::sync::Arc;

use futures::{FutureExt, TryFutureExt};
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use super::common::{error_result, invoke_and_envelope, parse_arguments};
use super::definition::{ToolCallback, ToolDescriptor};
use crate::domains::sim::{SimClient, SimError, SimResult};

pub use evm::{
    get_balances, get_evm_transactions, get_token_price, list_supported_chains_token_balances,
    list_supported_chains_transactions,
};
pub use svm::{get_svm_balances, get_svm_transactions};

/// Every Sim tool, in listing order.
pub fn sim_tools(client: Arc<SimClient>) -> Vec<ToolDescriptor> {
    vec![
        get_balances(client.clone()),
        get_evm_transactions(client.clone()),
        get_token_price(client.clone()),
        list_supported_chains_transactions(client.clone()),
        list_supported_chains_token_balances(client.clone()),
        get_svm_balances(client.clone()),
        get_svm_transactions(client),
    ]
}

/// Build a callback that decodes `A` from the validated arguments and
/// forwards it to `call`.
fn sim_callback<A, F, Fut>(client: Arc<SimClient>, call: F) -> ToolCallback
where
    A: DeserializeOwned + Send + 'static,
    F: Fn(Arc<SimClient>, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = SimResult<Value>> + Send + 'static,
{
    Arc::new(move |arguments: JsonObject| match parse_arguments::<A>(arguments) {
        Ok(args) => invoke_and_envelope(call(client.clone(), args).inspect_err(log_failure)).boxed(),
        Err(e) => {
            let result = error_result(e);
            async move { result }.boxed()
        }
    })
}

fn log_failure(e: &SimError) {
    match e {
        SimError::MissingApiKey => {}
        e if e.is_retryable() => warn!("Transient Sim API failure: {}", e),
        e => error!("Sim API call failed: {}", e),
    }
}

/// Arguments of the tools that take no input.
#[derive(Debug, serde::Deserialize)]
struct NoArgs {}
