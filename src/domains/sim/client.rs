//! HTTP client for the Sim API.
//!
//! One method per remote resource. Each builds a [`SimRequest`], attaches the
//! API key header, issues a GET and returns the decoded JSON body as-is,
//! whatever the HTTP status.

use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::{SimError, SimResult};
use super::params::{
    EvmBalancesParams, EvmTransactionsParams, QueryParams, SvmBalancesParams,
    SvmTransactionsParams, TokenPriceParams,
};
use crate::core::config::Config;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.sim.dune.com";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Sim-Api-Key";

/// Default time budget for a single remote call.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// Request construction
// ============================================================================

/// A GET request against the Sim API, before it is bound to a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRequest {
    segments: Vec<String>,
    query: QueryParams,
}

impl SimRequest {
    fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: QueryParams::new(),
        }
    }

    fn segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn balances(address: &str, params: &EvmBalancesParams) -> Self {
        Self::new(&["v1", "evm", "balances"])
            .segment(address)
            .query(params.to_query())
    }

    pub fn evm_transactions(address: &str, params: &EvmTransactionsParams) -> Self {
        Self::new(&["v1", "evm", "transactions"])
            .segment(address)
            .query(params.to_query())
    }

    pub fn token_price(contract_address: &str, params: &TokenPriceParams) -> Self {
        Self::new(&["v1", "evm", "token-info"])
            .segment(contract_address)
            .query(params.to_query())
    }

    pub fn supported_chains_transactions() -> Self {
        Self::new(&["v1", "evm", "transactions", "chains"])
    }

    pub fn supported_chains_token_balances() -> Self {
        Self::new(&["v1", "evm", "balances", "chains"])
    }

    pub fn svm_balances(address: &str, params: &SvmBalancesParams) -> Self {
        Self::new(&["beta", "balances", "svm"])
            .segment(address)
            .query(params.to_query())
    }

    pub fn svm_transactions(address: &str, params: &SvmTransactionsParams) -> Self {
        Self::new(&["beta", "transactions", "svm"])
            .segment(address)
            .query(params.to_query())
    }

    /// Path relative to the API origin, e.g. `/v1/evm/balances/0xabc`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Bind the request to `base_url`. Path segments are percent-encoded.
    pub fn url(&self, base_url: &str) -> SimResult<Url> {
        let mut url = Url::parse(base_url)
            .map_err(|e| SimError::invalid_url(format!("{}: {}", base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| SimError::invalid_url(format!("{} cannot be a base URL", base_url)))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            let encoded = self
                .query
                .encode()
                .map_err(|e| SimError::invalid_url(e.to_string()))?;
            url.set_query(Some(&encoded));
        }

        Ok(url)
    }
}

// ============================================================================
// Client
// ============================================================================

/// Sim API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct SimClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout_ms: u64,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for SimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl SimClient {
    /// Create a client. A blank API key counts as missing.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_ms: u64,
    ) -> SimResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            timeout_ms,
        })
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &Config) -> SimResult<Self> {
        Self::new(
            config.sim.base_url.clone(),
            config.credentials.sim_api_key.clone(),
            config.sim.timeout_ms,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Token balances for a wallet across EVM chains.
    pub async fn get_balances(
        &self,
        address: &str,
        params: &EvmBalancesParams,
    ) -> SimResult<Value> {
        self.execute(SimRequest::balances(address, params)).await
    }

    /// Transactions for a wallet across EVM chains.
    pub async fn get_evm_transactions(
        &self,
        address: &str,
        params: &EvmTransactionsParams,
    ) -> SimResult<Value> {
        self.execute(SimRequest::evm_transactions(address, params))
            .await
    }

    /// Token metadata and USD price for a contract.
    pub async fn get_token_price(
        &self,
        contract_address: &str,
        params: &TokenPriceParams,
    ) -> SimResult<Value> {
        self.execute(SimRequest::token_price(contract_address, params))
            .await
    }

    /// Chains supported by the transactions endpoint.
    pub async fn list_supported_chains_transactions(&self) -> SimResult<Value> {
        self.execute(SimRequest::supported_chains_transactions())
            .await
    }

    /// Chains supported by the balances endpoint.
    pub async fn list_supported_chains_token_balances(&self) -> SimResult<Value> {
        self.execute(SimRequest::supported_chains_token_balances())
            .await
    }

    /// Token balances for a Solana wallet.
    pub async fn get_svm_balances(
        &self,
        address: &str,
        params: &SvmBalancesParams,
    ) -> SimResult<Value> {
        self.execute(SimRequest::svm_balances(address, params)).await
    }

    /// Transactions for a Solana wallet.
    pub async fn get_svm_transactions(
        &self,
        address: &str,
        params: &SvmTransactionsParams,
    ) -> SimResult<Value> {
        self.execute(SimRequest::svm_transactions(address, params))
            .await
    }

    /// Send a request and decode the JSON body.
    ///
    /// Fails with [`SimError::MissingApiKey`] before any network access when
    /// no key is configured.
    #[instrument(skip_all, fields(path = %request.path()))]
    pub async fn execute(&self, request: SimRequest) -> SimResult<Value> {
        let api_key = self.api_key.as_deref().ok_or(SimError::MissingApiKey)?;
        let url = request.url(&self.base_url)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Sim API responded with HTTP {}", status);
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|source| SimError::Decode {
            status: status.as_u16(),
            source,
        })
    }

    fn classify(&self, error: reqwest::Error) -> SimError {
        if error.is_timeout() {
            SimError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            SimError::Request(error)
        }
    }
}
