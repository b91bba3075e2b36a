//! MCP server implementation and session state management.

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::borrow::Cow;
use std::sync::Arc;

use crate::state::ServerState;
use crate::tools::refresh::handle_refresh;
use crate::tools::search::{SearchRequest, handle_search};
use crate::tools::set_corpus::{SetCorpusRequest, handle_set_corpus};

/// MCP server for docs and task-definition search.
#[derive(Clone)]
pub struct CorpusServer {
    /// Shared state (corpus root, current index snapshot)
    state: Arc<ServerState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for CorpusServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl CorpusServer {
    /// Create a new CorpusServer with empty state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(ServerState::new()),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared server state.
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    #[tool(
        description = "Configure the corpus directory to index. The directory is scanned recursively for markdown documentation pages and JSON task definitions, and a search index is built immediately."
    )]
    async fn set_corpus(
        &self,
        Parameters(request): Parameters<SetCorpusRequest>,
    ) -> std::result::Result<String, String> {
        handle_set_corpus(&self.state, request).await
    }

    #[tool(
        description = "Search documentation pages and task definitions with ranked, typo-tolerant keyword matching. Supports kind, tag, and subscription filters plus pagination.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "Re-ingest the configured corpus directory and atomically replace the search index. Use after docs or task definitions change on disk."
    )]
    async fn refresh_index(&self) -> std::result::Result<String, String> {
        handle_refresh(&self.state).await
    }
}

impl Default for CorpusServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for CorpusServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::new(ServerCapabilities::builder().enable_tools().build());
        info.protocol_version = ProtocolVersion::V_2024_11_05;
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(
            "taskdocs-mcp: ranked keyword search over documentation pages and task \
             definitions. Start by using set_corpus to point at a corpus directory, \
             then search with optional kind/tags/subscriptions filters."
                .to_string(),
        );
        info
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline definitions instead of $ref patterns, so MCP Inspector renders
/// optional fields and arrays as proper widgets rather than raw JSON input.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
