//! EVM tools: balances, transactions, token price and supported chains.

use std::sync::Arc;

use serde::Deserialize;

use super::descriptions::evm::{
    GET_BALANCES, GET_EVM_TRANSACTIONS, GET_TOKEN_PRICE, LIST_SUPPORTED_CHAINS_TOKEN_BALANCES,
    LIST_SUPPORTED_CHAINS_TRANSACTIONS,
};
use super::{NoArgs, sim_callback};
use crate::domains::sim::{
    ChainIds, EvmBalancesParams, EvmTransactionsParams, SimClient, TokenPriceParams,
};
use crate::domains::tools::definition::{ToolDescriptor, ToolOptions, define_api_tool};
use crate::domains::tools::properties::CommonProperties;

#[derive(Debug, Deserialize)]
struct BalancesArgs {
    address: String,
    chain_ids: Option<ChainIds>,
    exclude_spam_tokens: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct EvmTransactionsArgs {
    address: String,
    chain_ids: Option<ChainIds>,
    limit: Option<u64>,
    after_block_number: Option<u64>,
    after_timestamp: Option<u64>,
    tx_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenPriceArgs {
    contract_address: String,
    chain_ids: Option<ChainIds>,
}

pub fn get_balances(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, args: BalancesArgs| async move {
        let params = EvmBalancesParams {
            chain_ids: args.chain_ids,
            exclude_spam_tokens: args.exclude_spam_tokens,
            limit: None,
        };
        client.get_balances(&args.address, &params).await
    });

    define_api_tool(
        ToolOptions::new("getBalances", callback)
            .title(GET_BALANCES.title)
            .description(GET_BALANCES.description),
        vec![
            ("address", CommonProperties::ADDRESS),
            ("chain_ids", CommonProperties::CHAIN_IDS_STRING),
            ("exclude_spam_tokens", CommonProperties::EXCLUDE_SPAM),
        ],
        &["address"],
    )
}

pub fn get_evm_transactions(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, args: EvmTransactionsArgs| async move {
        let params = EvmTransactionsParams {
            chain_ids: args.chain_ids,
            limit: args.limit,
            after_block_number: args.after_block_number,
            after_timestamp: args.after_timestamp,
            tx_hash: args.tx_hash,
        };
        client.get_evm_transactions(&args.address, &params).await
    });

    define_api_tool(
        ToolOptions::new("getEVMTransactions", callback)
            .title(GET_EVM_TRANSACTIONS.title)
            .description(GET_EVM_TRANSACTIONS.description),
        vec![
            ("address", CommonProperties::ADDRESS),
            ("chain_ids", CommonProperties::CHAIN_IDS_STRING),
            ("limit", CommonProperties::LIMIT),
            ("after_block_number", CommonProperties::AFTER_BLOCK_NUMBER),
            ("after_timestamp", CommonProperties::AFTER_TIMESTAMP),
            ("tx_hash", CommonProperties::TX_HASH),
        ],
        &["address"],
    )
}

pub fn get_token_price(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, args: TokenPriceArgs| async move {
        let params = TokenPriceParams {
            chain_ids: args.chain_ids,
        };
        client
            .get_token_price(&args.contract_address, &params)
            .await
    });

    define_api_tool(
        ToolOptions::new("getTokenPrice", callback)
            .title(GET_TOKEN_PRICE.title)
            .description(GET_TOKEN_PRICE.description),
        vec![
            ("contract_address", CommonProperties::CONTRACT_ADDRESS),
            ("chain_ids", CommonProperties::CHAIN_IDS_STRING),
        ],
        &["contract_address"],
    )
}

pub fn list_supported_chains_transactions(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, _: NoArgs| async move {
        client.list_supported_chains_transactions().await
    });

    define_api_tool(
        ToolOptions::new("listSupportedChainsTransactions", callback)
            .title(LIST_SUPPORTED_CHAINS_TRANSACTIONS.title)
            .description(LIST_SUPPORTED_CHAINS_TRANSACTIONS.description)
            .idempotent(true),
        vec![],
        &[],
    )
}

pub fn list_supported_chains_token_balances(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, _: NoArgs| async move {
        client.list_supported_chains_token_balances().await
    });

    define_api_tool(
        ToolOptions::new("listSupportedChainsTokenBalances", callback)
            .title(LIST_SUPPORTED_CHAINS_TOKEN_BALANCES.title)
            .description(LIST_SUPPORTED_CHAINS_TOKEN_BALANCES.description)
            .idempotent(true),
        vec![],
        &[],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::ArgumentSchema;
    use httpmock::prelude::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn client_for(server: &MockServer) -> Arc<SimClient> {
        Arc::new(SimClient::new(&server.base_url(), Some("test-key".to_string()), 5_000).unwrap())
    }

    fn object(value: serde_json::Value) -> rmcp::model::JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_get_balances_forwards_arguments() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/evm/balances/0xabc")
                    .query_param("chain_ids", "1,10")
                    .query_param("exclude_spam_tokens", "true")
                    .header("X-Sim-Api-Key", "test-key");
                then.status(200).json_body(json!({ "balances": [] }));
            })
            .await;

        let tool = get_balances(client_for(&server));
        let arguments = ArgumentSchema::translate(tool.input_schema())
            .validate(Some(object(json!({ "address": "0xabc", "chain_ids": "1,10" }))))
            .unwrap();
        let result = (tool.callback())(arguments).await;

        mock.assert_async().await;
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_token_price_defaults_to_all_chains() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/evm/token-info/0xdead")
                    .query_param("chain_ids", "all");
                then.status(200).json_body(json!({ "tokens": [] }));
            })
            .await;

        let tool = get_token_price(client_for(&server));
        let result = (tool.callback())(object(json!({ "contract_address": "0xdead" }))).await;

        mock.assert_async().await;
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_remote_error_body_becomes_error_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/evm/transactions/0xabc");
                then.status(400).json_body(json!({ "error": "invalid address" }));
            })
            .await;

        let tool = get_evm_transactions(client_for(&server));
        let result = (tool.callback())(object(json!({ "address": "0xabc" }))).await;

        assert_eq!(result.is_error, Some(true));
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "Error: invalid address"),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_arguments_become_error_envelope() {
        let server = MockServer::start_async().await;
        let tool = get_evm_transactions(client_for(&server));
        let result = (tool.callback())(object(json!({ "address": "0xabc", "limit": 2.5 }))).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_timed_out_call_becomes_error_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/evm/transactions/chains");
                then.status(200)
                    .json_body(json!({ "chains": [] }))
                    .delay(std::time::Duration::from_millis(1_000));
            })
            .await;

        let client =
            Arc::new(SimClient::new(&server.base_url(), Some("test-key".to_string()), 100).unwrap());
        let tool = list_supported_chains_transactions(client);
        let result = (tool.callback())(object(json!({}))).await;

        assert_eq!(result.is_error, Some(true));
        match &result.content[0].raw {
            RawContent::Text(text) => assert!(text.text.contains("timed out after 100ms"), "{}", text.text),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_supported_chains_tools_are_idempotent() {
        let client = Arc::new(SimClient::new("http://localhost:1", None, 1_000).unwrap());
        for tool in [
            list_supported_chains_transactions(client.clone()),
            list_supported_chains_token_balances(client),
        ] {
            let hints = tool.annotations();
            assert!(hints.idempotent);
            assert!(hints.read_only);
            assert!(!hints.destructive);
            assert!(tool.input_schema().properties().is_empty());
        }
    }
}
