//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is built once from a shared [`SimClient`] and is read-only
//! afterwards. Both transports go through [`RegisteredTool::invoke`], so
//! argument validation and panic isolation behave the same on STDIO and HTTP.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{debug, error, info, warn};

use super::common::error_result;
use super::definition::ToolDescriptor;
use super::definitions::sim_tools;
use super::error::ToolError;
use super::schema::ArgumentSchema;
use crate::domains::sim::SimClient;

/// A tool descriptor paired with its translated argument schema.
#[derive(Clone)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    schema: ArgumentSchema,
}

impl RegisteredTool {
    pub fn new(descriptor: ToolDescriptor) -> Self {
        let schema = ArgumentSchema::translate(descriptor.input_schema());
        Self { descriptor, schema }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Validate `arguments` and run the tool.
    ///
    /// Invalid arguments are returned as [`ToolError::InvalidArguments`].
    /// Everything past validation ends in an envelope, including a panic
    /// inside the callback.
    pub async fn invoke(
        &self,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let name = self.name();
        let arguments = self.schema.validate(arguments).inspect_err(|e| {
            warn!("Rejected arguments for tool {}: {}", name, e);
        })?;

        info!("Tool called: {}", name);
        debug!("Arguments for {}: {:?}", name, arguments);

        let callback = self.descriptor.callback().clone();
        let call = async move { callback(arguments).await };

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(result) => {
                if result.is_error == Some(true) {
                    info!("Tool {} returned an error result", name);
                } else {
                    info!("Tool {} succeeded", name);
                }
                Ok(result)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, message);
                Ok(error_result(format!(
                    "Tool {} failed unexpectedly: {}",
                    name, message
                )))
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Register every Sim tool against `client`.
    pub fn new(client: Arc<SimClient>) -> Self {
        Self::from_descriptors(sim_tools(client))
    }

    /// Register an explicit list of tools, in order.
    pub fn from_descriptors(descriptors: Vec<ToolDescriptor>) -> Self {
        let tools: Vec<RegisteredTool> = descriptors
            .into_iter()
            .map(|descriptor| {
                debug!("Registering tool: {}", descriptor.name());
                RegisteredTool::new(descriptor)
            })
            .collect();

        debug_assert!(
            tools
                .iter()
                .enumerate()
                .all(|(i, a)| tools[..i].iter().all(|b| a.name() != b.name())),
            "tool names must be unique"
        );

        info!("Registered {} tools", tools.len());
        Self { tools }
    }

    /// Get all tool names, in listing order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(RegisteredTool::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn tools(&self) -> &[RegisteredTool] {
        &self.tools
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|tool| tool.descriptor().to_tool())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a tool call by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;
        tool.invoke(arguments).await
    }
}
