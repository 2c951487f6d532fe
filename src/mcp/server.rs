

use rmcp::{
    handler::server::{
        router::tool::ToolRouter,
        wrapper::Parameters,
    },
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use futures::FutureExt;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::config::ParserConfig;
use crate::query_processor::QueryParser;
use crate::utils::{query_fingerprint, safe_truncate_ellipsis};

const CONFIG_URI: &str = "config://yuezi";
const STATUS_URI: &str = "status://models";


#[derive(Debug, Deserialize, JsonSchema)]
pub struct ParseQueryParams {
    #[schemars(description = "Free-text maternity-care-center search, e.g. '鼓楼区 爱帝宫 高档 3万-5万'")]
    pub query: String,
}

#[derive(Debug, Serialize)]
struct HealthDocument {
    status: &'static str,
    message: &'static str,
    timestamp: String,
    uptime_secs: u64,
}


#[derive(Clone)]
pub struct YueziMcpServer {
    parser: Arc<QueryParser>,
    config: Arc<ParserConfig>,
    started: Instant,
    tool_router: ToolRouter<Self>,
}

impl YueziMcpServer {

    pub fn new(parser: Arc<QueryParser>, config: ParserConfig) -> Self {
        Self {
            parser,
            config: Arc::new(config),
            started: Instant::now(),
            tool_router: Self::tool_router(),
        }
    }


    fn result_to_json<T: Serialize>(result: T) -> Result<String, McpError> {
        serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

#[tool_router]
impl YueziMcpServer {

    #[tool(description = "Parse a maternity-care-center search query into structured keywords. Returns: {范围, 品牌, 档次, 分店, 类型, 地址, 模式, 价格, 价格条件, 语义扩展, 句向量}")]
    async fn parse_query(
        &self,
        Parameters(params): Parameters<ParseQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.query.is_empty() {
            return Err(McpError::invalid_params(
                "未提供查询内容，请传入 'query'",
                None,
            ));
        }

        let request_id = Uuid::new_v4();
        let fingerprint = query_fingerprint(&params.query);
        info!(%request_id, %fingerprint, "🔍 Parsing query");
        debug!(%request_id, "Query preview: '{}'", safe_truncate_ellipsis(&params.query, 30));

        let outcome = AssertUnwindSafe(self.parser.extract(&params.query))
            .catch_unwind()
            .await;
        let result = outcome.map_err(|_| {
            error!(%request_id, %fingerprint, "Extraction panicked");
            McpError::internal_error("服务器内部错误", None)
        })?;

        info!(
            %request_id,
            "✅ Parsed: {} brand, {} tier, {} mode, price={}",
            result.brand.len(),
            result.tier.len(),
            result.mode.len(),
            result.price.is_some()
        );

        let json = Self::result_to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }


    #[tool(description = "Report service liveness. Returns: {status, message, timestamp, uptime_secs}")]
    async fn health(&self) -> Result<CallToolResult, McpError> {
        let doc = HealthDocument {
            status: "healthy",
            message: crate::api::handlers::HEALTH_MESSAGE,
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_secs: self.started.elapsed().as_secs(),
        };
        let json = Self::result_to_json(&doc)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}


#[tool_handler]
impl ServerHandler for YueziMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "yuezi".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Maternity-care-center query parsing. Use parse_query to turn a free-text \
                 search into area, brand, tier, service type, mode and price constraints."
                    .to_string(),
            ),
        }
    }


    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.resources(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let content = serde_json::to_string_pretty(&self.resource_document(&uri)?)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }
}


impl YueziMcpServer {

    fn resources(&self) -> Vec<Resource> {
        vec![
            RawResource::new(CONFIG_URI, "yuezi-config".to_string()).no_annotation(),
            RawResource::new(STATUS_URI, "model-status".to_string()).no_annotation(),
        ]
    }

    fn resource_document(&self, uri: &str) -> Result<Value, McpError> {
        match uri {
            CONFIG_URI => {
                let config = &self.config;
                Ok(json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "dictionaries": {
                        "data_dir": config.data_dir,
                        "custom_words": config.custom_words_path,
                    },
                    "semantic": {
                        "word_vectors": config.word_vectors_path,
                        "topn": config.expansion_topn,
                    },
                    "encoder": {
                        "url": config.encoder_url,
                        "model": config.encoder_model,
                        "timeout_ms": config.encoder_timeout_ms,
                        "dims": config.sentence_vector_dims,
                    },
                    "tools": ["parse_query", "health"],
                }))
            }
            STATUS_URI => serde_json::to_value(self.parser.status())
                .map_err(|e| McpError::internal_error(e.to_string(), None)),
            _ => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(json!({ "uri": uri })),
            )),
        }
    }
}


pub async fn run_server() -> anyhow::Result<()> {
    info!("🚀 Initializing Yuezi MCP Server...");

    let config = ParserConfig::from_env()?;
    let parser = Arc::new(QueryParser::initialize(&config).await);

    let status = parser.status();
    info!("✅ Yuezi MCP Server ready");
    info!(
        "   📚 Lexicon: {} brands, {} service types, {} attributes, {} areas",
        status.lexicon.brands,
        status.lexicon.service_types,
        status.lexicon.attributes,
        status.lexicon.areas
    );
    info!(
        "   🧠 Word vectors: {}, encoder: {}",
        status.word_vectors_loaded,
        status.encoder_model.as_deref().unwrap_or("disabled")
    );

    let server = YueziMcpServer::new(parser, config);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
