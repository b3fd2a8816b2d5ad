//! Titles and descriptions of the Sim tools, grouped by chain family.

/// Title and description shown to clients for one tool.
pub struct ToolText {
    pub title: &'static str,
    pub description: &'static str,
}

pub mod evm {
    use super::ToolText;

    pub const GET_BALANCES: ToolText = ToolText {
        title: "Get Token Balances",
        description: "Retrieve token balances for a specified wallet address across EVM blockchains. Returns normalized, real-time data with enriched metadata and USD pricing.",
    };

    pub const GET_EVM_TRANSACTIONS: ToolText = ToolText {
        title: "Get EVM Transactions",
        description: "Retrieve transactions for a given wallet address across EVM chains. Returns comprehensive transaction data including block information, gas details, and transaction status.",
    };

    pub const GET_TOKEN_PRICE: ToolText = ToolText {
        title: "Get Token Price",
        description: "Get the current USD price for a specified token contract address. Supports filtering by chain IDs with default coverage across all supported chains.",
    };

    pub const LIST_SUPPORTED_CHAINS_TRANSACTIONS: ToolText = ToolText {
        title: "List Supported Chains (Transactions)",
        description: "List all blockchain networks supported by the Sim Transactions API. Returns an array of chain objects with chain IDs, names, and tags.",
    };

    pub const LIST_SUPPORTED_CHAINS_TOKEN_BALANCES: ToolText = ToolText {
        title: "List Supported Chains (Balances)",
        description: "List all blockchain networks supported by the Sim Token Balances API. Returns an array of chain objects with chain IDs, names, and tags.",
    };
}

pub mod svm {
    use super::ToolText;

    pub const GET_SVM_BALANCES: ToolText = ToolText {
        title: "Get Solana Token Balances",
        description: "Retrieve token balances for a Solana wallet address (SVM). Returns balance data with USD values, supporting filtering by mint addresses and spam token exclusion.",
    };

    pub const GET_SVM_TRANSACTIONS: ToolText = ToolText {
        title: "Get Solana Transactions",
        description: "Fetch transactions for a Solana wallet address on the Solana Virtual Machine (SVM). Returns comprehensive transaction data including signatures, block information, success status, and fees.",
    };
}
