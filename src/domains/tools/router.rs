//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered tool becomes one dynamic route; the route validates and
//! dispatches through [`RegisteredTool::invoke`].

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::{RegisteredTool, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .iter()
        .cloned()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(tool))
        })
}

fn create_route<S>(tool: RegisteredTool) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(
        tool.descriptor().to_tool(),
        move |ctx: ToolCallContext<'_, S>| {
            let arguments = ctx.arguments.clone();
            let tool = tool.clone();
            async move { tool.invoke(arguments).await.map_err(McpError::from) }.boxed()
        },
    )
}
