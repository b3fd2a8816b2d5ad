//! Reusable parameter descriptors.
//!
//! A [`PropertySpec`] is one entry of a tool's input schema. The supported
//! kinds form a closed set; each maps to exactly one validation rule in
//! [`super::schema`].

use serde_json::{Map, Value, json};

/// The parameter kinds a tool schema can declare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
    /// Free text, optionally restricted to a fixed set of values.
    String { allowed: &'static [&'static str] },
    /// Numeric value with optional inclusive bounds and an advertised default.
    Number {
        minimum: Option<i64>,
        maximum: Option<i64>,
        default: Option<i64>,
    },
    /// Boolean flag, filled with `default` when omitted.
    Boolean { default: Option<bool> },
    /// List of strings.
    StringArray,
}

impl PropertyKind {
    /// JSON-Schema `type` keyword.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::Boolean { .. } => "boolean",
            Self::StringArray => "array",
        }
    }
}

/// A single parameter descriptor: kind plus human description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertySpec {
    pub kind: PropertyKind,
    pub description: &'static str,
}

impl PropertySpec {
    pub const fn string(description: &'static str) -> Self {
        Self {
            kind: PropertyKind::String { allowed: &[] },
            description,
        }
    }

    pub const fn one_of(description: &'static str, allowed: &'static [&'static str]) -> Self {
        Self {
            kind: PropertyKind::String { allowed },
            description,
        }
    }

    pub const fn number(description: &'static str) -> Self {
        Self {
            kind: PropertyKind::Number {
                minimum: None,
                maximum: None,
                default: None,
            },
            description,
        }
    }

    pub const fn bounded(
        description: &'static str,
        minimum: Option<i64>,
        maximum: Option<i64>,
        default: Option<i64>,
    ) -> Self {
        Self {
            kind: PropertyKind::Number {
                minimum,
                maximum,
                default,
            },
            description,
        }
    }

    pub const fn boolean(description: &'static str, default: Option<bool>) -> Self {
        Self {
            kind: PropertyKind::Boolean { default },
            description,
        }
    }

    pub const fn string_array(description: &'static str) -> Self {
        Self {
            kind: PropertyKind::StringArray,
            description,
        }
    }

    /// Same kind, different description.
    pub const fn described(self, description: &'static str) -> Self {
        Self {
            kind: self.kind,
            description,
        }
    }

    /// Render as a JSON-Schema property fragment.
    pub fn to_json(&self) -> Value {
        let mut fragment = Map::new();
        fragment.insert("type".into(), json!(self.kind.type_name()));
        fragment.insert("description".into(), json!(self.description));

        match self.kind {
            PropertyKind::String { allowed } => {
                if !allowed.is_empty() {
                    fragment.insert("enum".into(), json!(allowed));
                }
            }
            PropertyKind::Number {
                minimum,
                maximum,
                default,
            } => {
                if let Some(minimum) = minimum {
                    fragment.insert("minimum".into(), json!(minimum));
                }
                if let Some(maximum) = maximum {
                    fragment.insert("maximum".into(), json!(maximum));
                }
                if let Some(default) = default {
                    fragment.insert("default".into(), json!(default));
                }
            }
            PropertyKind::Boolean { default } => {
                if let Some(default) = default {
                    fragment.insert("default".into(), json!(default));
                }
            }
            PropertyKind::StringArray => {
                fragment.insert("items".into(), json!({ "type": "string" }));
            }
        }

        Value::Object(fragment)
    }
}

/// Property definitions shared across tools, keyed by semantic name.
pub struct CommonProperties;

impl CommonProperties {
    pub const ADDRESS: PropertySpec =
        PropertySpec::string("Wallet or contract address (hexadecimal format)");

    pub const CHAIN_IDS: PropertySpec =
        PropertySpec::string_array("List of blockchain chain IDs to filter by");

    pub const CHAIN_IDS_STRING: PropertySpec =
        PropertySpec::string("Comma-separated chain IDs or 'all' for all chains");

    pub const LIMIT: PropertySpec = PropertySpec::bounded(
        "Maximum number of results to return",
        Some(1),
        Some(1000),
        Some(10),
    );

    pub const EXCLUDE_SPAM: PropertySpec =
        PropertySpec::boolean("Whether to exclude spam tokens from results", Some(true));

    pub const AFTER_BLOCK_NUMBER: PropertySpec = PropertySpec::bounded(
        "Return results after this block number",
        Some(0),
        None,
        None,
    );

    pub const AFTER_TIMESTAMP: PropertySpec = PropertySpec::bounded(
        "Return results after this Unix timestamp",
        Some(0),
        None,
        None,
    );

    pub const TX_HASH: PropertySpec = PropertySpec::string("Filter by specific transaction hash");

    pub const CONTRACT_ADDRESS: PropertySpec = PropertySpec::string("Token contract address");

    pub const MINT_ADDRESSES: PropertySpec =
        PropertySpec::string_array("List of Solana token mint addresses");

    pub const OFFSET: PropertySpec =
        PropertySpec::string("Pagination offset from previous response");

    /// The whole catalog, in a stable order.
    pub fn all() -> [(&'static str, PropertySpec); 11] {
        [
            ("address", Self::ADDRESS),
            ("chainIds", Self::CHAIN_IDS),
            ("chainIdsString", Self::CHAIN_IDS_STRING),
            ("limit", Self::LIMIT),
            ("excludeSpam", Self::EXCLUDE_SPAM),
            ("afterBlockNumber", Self::AFTER_BLOCK_NUMBER),
            ("afterTimestamp", Self::AFTER_TIMESTAMP),
            ("txHash", Self::TX_HASH),
            ("contractAddress", Self::CONTRACT_ADDRESS),
            ("mintAddresses", Self::MINT_ADDRESSES),
            ("offset", Self::OFFSET),
        ]
    }

    /// Look up a descriptor by semantic name.
    pub fn get(name: &str) -> Option<PropertySpec> {
        Self::all()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, spec)| spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(CommonProperties::get("limit"), Some(CommonProperties::LIMIT));
        assert_eq!(CommonProperties::get("txHash"), Some(CommonProperties::TX_HASH));
        assert_eq!(CommonProperties::get("unknown"), None);
    }

    #[test]
    fn test_catalog_names_unique() {
        let all = CommonProperties::all();
        let mut names: Vec<_> = all.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_limit_fragment() {
        assert_eq!(
            CommonProperties::LIMIT.to_json(),
            json!({
                "type": "number",
                "description": "Maximum number of results to return",
                "minimum": 1,
                "maximum": 1000,
                "default": 10
            })
        );
    }

    #[test]
    fn test_array_fragment_has_items() {
        assert_eq!(
            CommonProperties::MINT_ADDRESSES.to_json(),
            json!({
                "type": "array",
                "description": "List of Solana token mint addresses",
                "items": { "type": "string" }
            })
        );
    }

    #[test]
    fn test_boolean_fragment_has_default() {
        let fragment = CommonProperties::EXCLUDE_SPAM.to_json();
        assert_eq!(fragment["type"], "boolean");
        assert_eq!(fragment["default"], true);
    }

    #[test]
    fn test_enum_fragment() {
        let spec = PropertySpec::one_of("Sort order", &["asc", "desc"]);
        assert_eq!(spec.to_json()["enum"], json!(["asc", "desc"]));
        assert!(PropertySpec::string("plain").to_json().get("enum").is_none());
    }

    #[test]
    fn test_described_keeps_kind() {
        let spec = CommonProperties::ADDRESS.described("Solana wallet address");
        assert_eq!(spec.kind, CommonProperties::ADDRESS.kind);
        assert_eq!(spec.description, "Solana wallet address");
    }
}
