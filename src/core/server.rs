//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the Sim client, the tool registry and the rmcp tool
//! router built from it. It is constructed once at startup and cloned into
//! each transport task.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use super::error::Error;
use crate::domains::sim::SimClient;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered Sim tools, shared with the HTTP transport.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the Sim base URL cannot be parsed. A missing API key is
    /// not an error here; it is reported on every tool call instead.
    pub fn new(config: Config) -> super::error::Result<Self> {
        reqwest::Url::parse(&config.sim.base_url).map_err(|e| {
            Error::config(format!("invalid Sim base URL {:?}: {}", config.sim.base_url, e))
        })?;

        let client = Arc::new(SimClient::from_config(&config)?);
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing client.
    pub fn with_client(config: Config, client: Arc<SimClient>) -> Self {
        info!("Starting MCP server initialization...");
        if !client.has_api_key() {
            warn!("No Sim API key configured; tool calls will report a configuration error");
        }
        let registry = Arc::new(ToolRegistry::new(client));
        let tool_router = build_tool_router::<Self>(&registry);
        info!("MCP server initialization complete ({} tools)", registry.len());

        Self {
            config: Arc::new(config),
            registry,
            tool_router,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.get_all_tools()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Blockchain data from the Sim API: EVM balances, transactions and token \
                 prices, supported chains, and Solana balances and transactions."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
