//! MCP Server for bookswap-mcp
//!
//! MCP Protocol (stdio) <-> application::CatalogService / ExchangeService
//!
//! 8 tools: list_books, add_book, delete_book, search_books, stats,
//! clear_books, export_books, import_books

use std::path::PathBuf;

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::bootstrap;
use crate::application::error::AppError;
use crate::application::exchange::ExchangeService;
use crate::application::listing::{render_listing, render_stats};
use crate::application::service::CatalogService;
use crate::config::Config;
use crate::domain::error::DomainError;
use crate::domain::model::id::BookId;
use crate::domain::model::record::NewBook;
use crate::infra::json_store::JsonCatalogStore;

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動する。空のカタログにはサンプルを投入する（`--no-seed` で無効）。
pub async fn run(config: Config) -> anyhow::Result<()> {
    let server = BookswapMcpServer::new(config.catalog_path, config.export_dir);

    if !config.no_seed {
        let svc = server.service();
        bootstrap::seed_if_empty(svc.store())?;
    }

    tracing::info!(catalog = %server.catalog_path.display(), "serving on stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct BookswapMcpServer {
    catalog_path: PathBuf,
    export_dir: PathBuf,
    tool_router: ToolRouter<Self>,
}

impl BookswapMcpServer {
    fn new(catalog_path: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            catalog_path,
            export_dir,
            tool_router: Self::tool_router(),
        }
    }

    fn service(&self) -> CatalogService<JsonCatalogStore> {
        CatalogService::new(JsonCatalogStore::new(&self.catalog_path))
    }

    fn to_mcp_error(e: AppError) -> McpError {
        if e.is_invalid_input() {
            McpError::invalid_params(format!("{e}"), None)
        } else {
            McpError::internal_error(format!("{e}"), None)
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for BookswapMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bookswap-mcp".to_string(),
                title: Some("Bookswap MCP: Book Exchange Catalog".to_string()),
                description: Some(
                    "Catalog of books offered for exchange. \
                     Add, search, delete, import and export listings."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a shared list of books people are offering to swap.\n\
                 \n\
                 Each book has a title, author, uploader (who offers it) and free-form contact. \
                 Use `search_books` to find listings by title, author or uploader, \
                 `add_book` to list a new one, `delete_book` with the id shown in listings to remove one.\n\
                 \n\
                 Backups: `export_books` writes books_backup_<date>.json; \
                 `import_books` merges such a file, skipping ids that already exist."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

/// importパスの拡張子を検証する。
fn validate_import_path(file_path: &str) -> Result<PathBuf, McpError> {
    let path = PathBuf::from(file_path);
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(path),
        _ => Err(McpError::invalid_params(
            "Only .json files can be imported",
            None,
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpEmptyRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (required)")]
    pub title: Option<String>,
    #[schemars(description = "Author (required)")]
    pub author: Option<String>,
    #[schemars(description = "Name of the person offering the book (required)")]
    pub uploader: Option<String>,
    #[schemars(description = "How to reach the uploader: email, phone, messaging handle (required)")]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpDeleteBookRequest {
    #[schemars(description = "Book id as shown by `list_books` / `search_books`")]
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchRequest {
    #[schemars(
        description = "Case-insensitive substring matched against title, author and uploader. Empty returns all books."
    )]
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpExportRequest {
    #[schemars(description = "Output directory (default: server's export directory)")]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpImportRequest {
    #[schemars(description = "Path to a JSON backup file (array of book records)")]
    pub file_path: String,
}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl BookswapMcpServer {
    #[tool(
        name = "list_books",
        description = "List every book in the catalog in the order they were added.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let books = self.service().get_all();
        Ok(CallToolResult::success(vec![Content::text(render_listing(
            "Books", &books,
        ))]))
    }

    #[tool(
        name = "add_book",
        description = "List a new book for exchange. title, author, uploader and contact are all required and must be non-empty.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let new_book = NewBook {
            title: req.title,
            author: req.author,
            uploader: req.uploader,
            contact: req.contact,
        };
        let record = self.service().add(new_book).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Added: {} by {} (id: {})",
            record.title(),
            record.author(),
            record.id()
        ))]))
    }

    #[tool(
        name = "delete_book",
        description = "Remove a book by its id.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn delete_book(
        &self,
        Parameters(req): Parameters<McpDeleteBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let id = BookId::from(req.book_id.trim());
        match self.service().delete_by_id(&id) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Deleted: {id}"
            ))])),
            Err(AppError::Domain(DomainError::BookNotFound(_))) => Err(McpError::invalid_params(
                format!("No book with id '{id}'. Use `list_books` to see ids."),
                None,
            )),
            Err(e) => Err(Self::to_mcp_error(e)),
        }
    }

    #[tool(
        name = "search_books",
        description = "Find books whose title, author or uploader contains the keyword (case-insensitive). Contact details are not searched.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let hits = self.service().search(&req.keyword);
        let heading = if req.keyword.trim().is_empty() {
            "Books".to_string()
        } else {
            format!("Results for '{}'", req.keyword)
        };
        Ok(CallToolResult::success(vec![Content::text(render_listing(
            &heading, &hits,
        ))]))
    }

    #[tool(
        name = "stats",
        description = "Show how many books are listed and how many distinct uploaders offer them.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn stats(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let stats = self.service().stats();
        Ok(CallToolResult::success(vec![Content::text(render_stats(
            &stats,
        ))]))
    }

    #[tool(
        name = "clear_books",
        description = "Delete the whole catalog. This cannot be undone; export first if unsure.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn clear_books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.service().clear_all().map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(
            "Catalog cleared.",
        )]))
    }

    #[tool(
        name = "export_books",
        description = "Write the whole catalog to books_backup_<YYYY-MM-DD>.json (pretty-printed JSON array). Catalog is NOT modified.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn export_books(
        &self,
        Parameters(req): Parameters<McpExportRequest>,
    ) -> Result<CallToolResult, McpError> {
        let output_dir = req
            .output_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| self.export_dir.clone());

        let svc = self.service();
        let path = ExchangeService::export(&svc, &output_dir).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Catalog exported to: {}",
            path.display()
        ))]))
    }

    #[tool(
        name = "import_books",
        description = "Merge books from a JSON backup file. Books whose id already exists are skipped; new ones are appended.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn import_books(
        &self,
        Parameters(req): Parameters<McpImportRequest>,
    ) -> Result<CallToolResult, McpError> {
        let import_path = validate_import_path(&req.file_path)?;
        let svc = self.service();
        let outcome = ExchangeService::import_file(&svc, &import_path)
            .await
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Imported {} new books ({} total)",
            outcome.imported, outcome.total
        ))]))
    }
}
