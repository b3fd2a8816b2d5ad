//! Tool definition builder.
//!
//! [`define_tool`] assembles a [`ToolDescriptor`] from options, a property
//! set and the list of required fields. [`define_read_only_tool`] and
//! [`define_api_tool`] are fixed annotation presets on top of it.

use futures::future::BoxFuture;
use rmcp::model::{CallToolResult, JsonObject, Tool, ToolAnnotations};
use serde_json::{Value, json};
use std::sync::Arc;

use super::properties::PropertySpec;

/// Callback run with the validated argument map of a tool call.
pub type ToolCallback =
    Arc<dyn Fn(JsonObject) -> BoxFuture<'static, CallToolResult> + Send + Sync>;

/// Caller-supplied part of a tool definition.
#[derive(Clone)]
pub struct ToolOptions {
    name: &'static str,
    description: Option<&'static str>,
    title: Option<&'static str>,
    read_only_hint: Option<bool>,
    destructive_hint: Option<bool>,
    idempotent_hint: Option<bool>,
    open_world_hint: Option<bool>,
    callback: ToolCallback,
}

impl ToolOptions {
    pub fn new(name: &'static str, callback: ToolCallback) -> Self {
        Self {
            name,
            description: None,
            title: None,
            read_only_hint: None,
            destructive_hint: None,
            idempotent_hint: None,
            open_world_hint: None,
            callback,
        }
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn read_only(mut self, hint: bool) -> Self {
        self.read_only_hint = Some(hint);
        self
    }

    pub fn destructive(mut self, hint: bool) -> Self {
        self.destructive_hint = Some(hint);
        self
    }

    pub fn idempotent(mut self, hint: bool) -> Self {
        self.idempotent_hint = Some(hint);
        self
    }

    pub fn open_world(mut self, hint: bool) -> Self {
        self.open_world_hint = Some(hint);
        self
    }
}

/// Closed object schema of a tool's arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSchema {
    properties: Vec<(&'static str, PropertySpec)>,
    required: Vec<&'static str>,
}

impl InputSchema {
    pub fn properties(&self) -> &[(&'static str, PropertySpec)] {
        &self.properties
    }

    pub fn required(&self) -> &[&'static str] {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(&name)
    }

    /// Render as a JSON-Schema object. `required` is only present when
    /// non-empty; unknown fields are always rejected.
    pub fn to_json(&self) -> JsonObject {
        let properties: JsonObject = self
            .properties
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.to_json()))
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !self.required.is_empty() {
            schema.insert("required".into(), json!(self.required));
        }
        schema.insert("additionalProperties".into(), json!(false));
        schema
    }
}

/// Behavioral hints published with a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotations {
    pub read_only: bool,
    pub destructive: bool,
    pub idempotent: bool,
    pub open_world: bool,
}

/// Immutable tool metadata plus its callback.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: &'static str,
    title: Option<&'static str>,
    description: Option<&'static str>,
    input_schema: InputSchema,
    annotations: Annotations,
    callback: ToolCallback,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("input_schema", &self.input_schema)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> Option<&'static str> {
        self.title
    }

    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    pub fn input_schema(&self) -> &InputSchema {
        &self.input_schema
    }

    pub fn annotations(&self) -> Annotations {
        self.annotations
    }

    pub fn callback(&self) -> &ToolCallback {
        &self.callback
    }

    /// Protocol model of this tool, as published by `tools/list`.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: self.description.map(Into::into),
            input_schema: Arc::new(self.input_schema.to_json()),
            annotations: Some(ToolAnnotations {
                title: self.title.map(str::to_string),
                read_only_hint: Some(self.annotations.read_only),
                destructive_hint: Some(self.annotations.destructive),
                idempotent_hint: Some(self.annotations.idempotent),
                open_world_hint: Some(self.annotations.open_world),
            }),
            output_schema: None,
            icons: None,
            meta: None,
            title: self.title.map(str::to_string),
        }
    }
}

/// Build a tool descriptor.
///
/// Hints not set in `options` default to `read_only = false`,
/// `destructive = true`, `idempotent = false`, `open_world = true`.
pub fn define_tool(
    options: ToolOptions,
    properties: Vec<(&'static str, PropertySpec)>,
    required: &[&'static str],
) -> ToolDescriptor {
    debug_assert!(!options.name.is_empty(), "tool name must not be empty");
    debug_assert!(
        required
            .iter()
            .all(|r| properties.iter().any(|(name, _)| name == r)),
        "required fields of {} must be declared properties",
        options.name
    );

    ToolDescriptor {
        name: options.name,
        title: options.title,
        description: options.description,
        input_schema: InputSchema {
            properties,
            required: required.to_vec(),
        },
        annotations: Annotations {
            read_only: options.read_only_hint.unwrap_or(false),
            destructive: options.destructive_hint.unwrap_or(true),
            idempotent: options.idempotent_hint.unwrap_or(false),
            open_world: options.open_world_hint.unwrap_or(true),
        },
        callback: options.callback,
    }
}

/// Tool that only reads state.
pub fn define_read_only_tool(
    options: ToolOptions,
    properties: Vec<(&'static str, PropertySpec)>,
    required: &[&'static str],
) -> ToolDescriptor {
    define_tool(options.read_only(true).destructive(false), properties, required)
}

/// Read-only tool backed by an external service.
pub fn define_api_tool(
    options: ToolOptions,
    properties: Vec<(&'static str, PropertySpec)>,
    required: &[&'static str],
) -> ToolDescriptor {
    define_tool(
        options.read_only(true).destructive(false).open_world(true),
        properties,
        required,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::common::success_result;
    use crate::domains::tools::properties::CommonProperties;
    use futures::FutureExt;

    fn noop() -> ToolCallback {
        Arc::new(|_args| async { success_result("ok".to_string()) }.boxed())
    }

    #[test]
    fn test_default_annotations() {
        let tool = define_tool(ToolOptions::new("plain", noop()), vec![], &[]);
        assert_eq!(
            tool.annotations(),
            Annotations {
                read_only: false,
                destructive: true,
                idempotent: false,
                open_world: true,
            }
        );
    }

    #[test]
    fn test_overrides_are_respected() {
        let options = ToolOptions::new("custom", noop())
            .destructive(false)
            .open_world(false)
            .idempotent(true);
        let tool = define_tool(options, vec![], &[]);
        let hints = tool.annotations();
        assert!(!hints.destructive);
        assert!(!hints.open_world);
        assert!(hints.idempotent);
        assert!(!hints.read_only);
    }

    #[test]
    fn test_read_only_preset() {
        let tool = define_read_only_tool(
            ToolOptions::new("reader", noop()).open_world(false),
            vec![],
            &[],
        );
        let hints = tool.annotations();
        assert!(hints.read_only);
        assert!(!hints.destructive);
        assert!(!hints.open_world);
    }

    #[test]
    fn test_api_preset_overrides_caller_hints() {
        let options = ToolOptions::new("api", noop())
            .read_only(false)
            .destructive(true)
            .open_world(false)
            .idempotent(true);
        let hints = define_api_tool(options, vec![], &[]).annotations();
        assert!(hints.read_only);
        assert!(!hints.destructive);
        assert!(hints.open_world);
        assert!(hints.idempotent);
    }

    #[test]
    fn test_schema_omits_empty_required() {
        let tool = define_tool(ToolOptions::new("empty", noop()), vec![], &[]);
        let schema = tool.input_schema().to_json();
        assert!(!schema.contains_key("required"));
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["properties"], json!({}));
    }

    #[test]
    fn test_schema_with_required() {
        let tool = define_api_tool(
            ToolOptions::new("with_address", noop()),
            vec![
                ("address", CommonProperties::ADDRESS),
                ("limit", CommonProperties::LIMIT),
            ],
            &["address"],
        );
        let schema = tool.input_schema().to_json();
        assert_eq!(schema["required"], json!(["address"]));
        assert_eq!(schema["properties"]["limit"]["maximum"], json!(1000));
        assert!(tool.input_schema().is_required("address"));
        assert!(!tool.input_schema().is_required("limit"));
    }

    #[test]
    fn test_to_tool_model() {
        let tool = define_api_tool(
            ToolOptions::new("getThing", noop())
                .title("Get Thing")
                .description("Fetch a thing"),
            vec![("address", CommonProperties::ADDRESS)],
            &["address"],
        )
        .to_tool();

        assert_eq!(tool.name, "getThing");
        assert_eq!(tool.description.as_deref(), Some("Fetch a thing"));
        assert_eq!(tool.title.as_deref(), Some("Get Thing"));

        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.title.as_deref(), Some("Get Thing"));
        assert_eq!(annotations.read_only_hint, Some(true));
        assert_eq!(annotations.destructive_hint, Some(false));
        assert_eq!(annotations.open_world_hint, Some(true));
        assert_eq!(annotations.idempotent_hint, Some(false));

        assert_eq!(tool.input_schema["additionalProperties"], json!(false));
    }

    #[test]
    fn test_untitled_tool_has_no_title_annotation() {
        let tool = define_tool(ToolOptions::new("untitled", noop()), vec![], &[]).to_tool();
        assert!(tool.title.is_none());
        assert!(tool.annotations.unwrap().title.is_none());
    }
}
