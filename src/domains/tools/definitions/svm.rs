//! Solana (SVM) tools.

use std::sync::Arc;

use serde::Deserialize;

use super::descriptions::svm::{GET_SVM_BALANCES, GET_SVM_TRANSACTIONS};
use super::sim_callback;
use crate::domains::sim::{SimClient, SvmBalancesParams, SvmTransactionsParams};
use crate::domains::tools::definition::{ToolDescriptor, ToolOptions, define_api_tool};
use crate::domains::tools::properties::{CommonProperties, PropertySpec};

#[derive(Debug, Deserialize)]
struct SvmBalancesArgs {
    address: String,
    chains: Option<String>,
    limit: Option<u64>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SvmTransactionsArgs {
    address: String,
    limit: Option<u64>,
    offset: Option<String>,
}

pub fn get_svm_balances(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, args: SvmBalancesArgs| async move {
        let params = SvmBalancesParams {
            chains: args.chains,
            limit: args.limit,
            offset: args.offset,
        };
        client.get_svm_balances(&args.address, &params).await
    });

    define_api_tool(
        ToolOptions::new("getSVMBalances", callback)
            .title(GET_SVM_BALANCES.title)
            .description(GET_SVM_BALANCES.description),
        vec![
            (
                "address",
                CommonProperties::ADDRESS.described("Solana wallet address to check balances for"),
            ),
            (
                "chains",
                PropertySpec::string(
                    "Comma-separated list of chains to include, or 'all' for all supported chains",
                ),
            ),
            ("limit", CommonProperties::LIMIT),
            ("offset", CommonProperties::OFFSET),
        ],
        &["address"],
    )
}

pub fn get_svm_transactions(client: Arc<SimClient>) -> ToolDescriptor {
    let callback = sim_callback(client, |client, args: SvmTransactionsArgs| async move {
        let params = SvmTransactionsParams {
            limit: args.limit,
            offset: args.offset,
            ..Default::default()
        };
        client.get_svm_transactions(&args.address, &params).await
    });

    define_api_tool(
        ToolOptions::new("getSVMTransactions", callback)
            .title(GET_SVM_TRANSACTIONS.title)
            .description(GET_SVM_TRANSACTIONS.description),
        vec![
            (
                "address",
                CommonProperties::ADDRESS
                    .described("Solana wallet address to check transactions for"),
            ),
            ("limit", CommonProperties::LIMIT),
            ("offset", CommonProperties::OFFSET),
        ],
        &["address"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_svm_balances_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/beta/balances/svm/So1ana")
                    .query_param("chains", "solana")
                    .query_param("limit", "5");
                then.status(200).json_body(json!({ "balances": [] }));
            })
            .await;

        let client = Arc::new(SimClient::new(&server.base_url(), Some("k".into()), 5_000).unwrap());
        let tool = get_svm_balances(client);
        let arguments = json!({ "address": "So1ana", "chains": "solana", "limit": 5 });
        let result = (tool.callback())(arguments.as_object().cloned().unwrap()).await;

        mock.assert_async().await;
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_svm_transactions_pagination() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/beta/transactions/svm/So1ana")
                    .query_param("offset", "cursor-2");
                then.status(200).json_body(json!({ "transactions": [], "next_offset": null }));
            })
            .await;

        let client = Arc::new(SimClient::new(&server.base_url(), Some("k".into()), 5_000).unwrap());
        let tool = get_svm_transactions(client);
        let arguments = json!({ "address": "So1ana", "offset": "cursor-2" });
        let result = (tool.callback())(arguments.as_object().cloned().unwrap()).await;

        mock.assert_async().await;
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_svm_schemas() {
        let client = Arc::new(SimClient::new("http://localhost:1", None, 1_000).unwrap());
        let balances = get_svm_balances(client.clone());
        let names: Vec<_> = balances
            .input_schema()
            .properties()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, ["address", "chains", "limit", "offset"]);
        assert_eq!(balances.input_schema().required(), ["address"]);

        let transactions = get_svm_transactions(client);
        assert_eq!(transactions.input_schema().properties().len(), 3);
    }
}
