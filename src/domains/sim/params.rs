//! Query parameter sets for the Sim API endpoints.
//!
//! Every optional parameter follows the same serialization rules:
//! - absent (or empty string) values are omitted from the URL entirely
//! - list values are sent as one comma-joined string, in input order
//! - booleans are sent as `"true"` / `"false"`
//!
//! Parameters are emitted in declaration order, so the query string of a
//! request is deterministic.

use serde::Deserialize;

/// Chain filter accepted by the EVM endpoints.
///
/// Callers may pass either a ready-made string (`"1,10"` or `"all"`) or a
/// list of chain IDs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChainIds {
    Raw(String),
    List(Vec<String>),
}

impl ChainIds {
    /// The `all` filter, covering every supported chain.
    pub fn all() -> Self {
        Self::Raw("all".to_string())
    }

    /// Value as sent on the wire.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Raw(value) => value.clone(),
            Self::List(ids) => ids.join(","),
        }
    }
}

impl From<&str> for ChainIds {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for ChainIds {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<Vec<String>> for ChainIds {
    fn from(ids: Vec<String>) -> Self {
        Self::List(ids)
    }
}

impl<const N: usize> From<[&str; N]> for ChainIds {
    fn from(ids: [&str; N]) -> Self {
        Self::List(ids.iter().map(|id| id.to_string()).collect())
    }
}

/// Ordered list of query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string parameter. Empty strings count as absent.
    pub fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append a numeric parameter.
    pub fn number(mut self, key: &'static str, value: Option<u64>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append a boolean parameter as `"true"` / `"false"`.
    pub fn flag(mut self, key: &'static str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Append a chain filter, comma-joining lists.
    pub fn chains(self, key: &'static str, value: Option<&ChainIds>) -> Self {
        let value = value.map(ChainIds::to_query_value);
        self.text(key, value.as_deref())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Look up the value sent for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encode the pairs into a query string (without the leading `?`).
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.pairs)
    }
}

/// Optional parameters for `GET /v1/evm/balances/{address}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvmBalancesParams {
    pub chain_ids: Option<ChainIds>,
    pub exclude_spam_tokens: Option<bool>,
    /// Maximum number of tokens to return.
    pub limit: Option<u64>,
}

impl EvmBalancesParams {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .chains("chain_ids", self.chain_ids.as_ref())
            .flag("exclude_spam_tokens", self.exclude_spam_tokens)
            .number("limit", self.limit)
    }
}

/// Optional parameters for `GET /v1/evm/transactions/{address}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvmTransactionsParams {
    pub chain_ids: Option<ChainIds>,
    pub limit: Option<u64>,
    pub after_block_number: Option<u64>,
    pub after_timestamp: Option<u64>,
    pub tx_hash: Option<String>,
}

impl EvmTransactionsParams {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .chains("chain_ids", self.chain_ids.as_ref())
            .number("limit", self.limit)
            .number("after_block_number", self.after_block_number)
            .number("after_timestamp", self.after_timestamp)
            .text("tx_hash", self.tx_hash.as_deref())
    }
}

/// Optional parameters for `GET /v1/evm/token-info/{address}`.
///
/// The chain filter falls back to `all` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPriceParams {
    pub chain_ids: Option<ChainIds>,
}

impl Default for TokenPriceParams {
    fn default() -> Self {
        Self {
            chain_ids: Some(ChainIds::all()),
        }
    }
}

impl TokenPriceParams {
    pub fn to_query(&self) -> QueryParams {
        let chain_ids = self
            .chain_ids
            .as_ref()
            .map(ChainIds::to_query_value)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| ChainIds::all().to_query_value());
        QueryParams::new().text("chain_ids", Some(&chain_ids))
    }
}

/// Optional parameters for `GET /beta/balances/svm/{address}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvmBalancesParams {
    /// Comma-separated chains, or `all`.
    pub chains: Option<String>,
    pub limit: Option<u64>,
    /// Pagination cursor from a previous response.
    pub offset: Option<String>,
}

impl SvmBalancesParams {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .text("chains", self.chains.as_deref())
            .number("limit", self.limit)
            .text("offset", self.offset.as_deref())
    }
}

/// Optional parameters for `GET /beta/transactions/svm/{address}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvmTransactionsParams {
    pub limit: Option<u64>,
    pub after_block_number: Option<u64>,
    pub after_timestamp: Option<u64>,
    pub tx_hash: Option<String>,
    pub offset: Option<String>,
}

impl SvmTransactionsParams {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .number("limit", self.limit)
            .number("after_block_number", self.after_block_number)
            .number("after_timestamp", self.after_timestamp)
            .text("tx_hash", self.tx_hash.as_deref())
            .text("offset", self.offset.as_deref())
    }
}
