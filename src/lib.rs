//! Sim API MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing the Sim blockchain data API
//! (EVM balances, transactions and token prices, supported chains, Solana
//! balances and transactions) as MCP tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and the
//!   STDIO / HTTP transports
//! - **domains**: business logic organized by bounded contexts
//!   - **sim**: async client for the Sim HTTP API
//!   - **tools**: tool definitions, argument validation and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use sim_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
