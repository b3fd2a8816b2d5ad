//! Tools domain module.
//!
//! ## Architecture
//!
//! - `properties.rs` - shared property catalog
//! - `definition.rs` - descriptor builder and annotation presets
//! - `definitions/` - the Sim tools, grouped by chain family
//! - `schema.rs` - argument schemas translated from tool properties
//! - `common.rs` - result envelope helpers
//! - `registry.rs` - central tool registry and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry
//! - `error.rs` - tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a constructor in `definitions/` using `define_api_tool`
//! 2. Add its title and description to `definitions/descriptions.rs`
//! 3. List it in `definitions::sim_tools`
//!
//! The registry, router and HTTP transport pick it up from there.

pub mod common;
pub mod definition;
pub mod definitions;
mod error;
pub mod properties;
mod registry;
pub mod router;
pub mod schema;

pub use definition::{
    ToolCallback, ToolDescriptor, ToolOptions, define_api_tool, define_read_only_tool, define_tool,
};
pub use error::ToolError;
pub use properties::{CommonProperties, PropertyKind, PropertySpec};
pub use registry::{RegisteredTool, ToolRegistry};
pub use router::build_tool_router;
pub use schema::ArgumentSchema;
