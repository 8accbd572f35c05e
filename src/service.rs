use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::WidgetConfig;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::formatters::{present, JsonRenderer, TextRenderer};
use crate::models::{GetWidgetRequest, OutputFormat};
use crate::pipeline::{MinimumSlotPolicy, Pipeline};

/// Weather widget service that handles MCP requests
#[derive(Clone)]
pub struct WidgetService {
    fetcher: Arc<dyn Fetcher>,
    config: Arc<WidgetConfig>,
    tool_router: ToolRouter<Self>,
}

impl WidgetService {
    /// Creates a service backed by a real HTTP client
    pub fn new(config: WidgetConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout())?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: WidgetConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Builds the pipeline for one call, applying request overrides
    fn pipeline_for(&self, request: &GetWidgetRequest) -> Pipeline {
        let pipeline = self.config.pipeline();
        match request.slots {
            Some(count) => pipeline.with_policy(MinimumSlotPolicy::FirstN { count }),
            None => pipeline,
        }
    }

    /// Runs one fetch-transform-render cycle. Returns the rendered text and
    /// whether the run failed.
    pub async fn render_widget(&self, request: &GetWidgetRequest) -> (String, bool) {
        let pipeline = self.pipeline_for(request);
        let outcome = pipeline.run(self.fetcher.as_ref()).await;

        let rendered = match request.format.unwrap_or_default() {
            OutputFormat::Text => {
                let mut sink = TextRenderer::new(request.theme.unwrap_or(self.config.theme));
                present(&mut sink, &outcome);
                sink.into_output()
            }
            OutputFormat::Json => {
                let mut sink = JsonRenderer::default();
                present(&mut sink, &outcome);
                sink.into_output()
            }
        };

        (rendered, outcome.is_err())
    }
}

#[tool_handler]
impl ServerHandler for WidgetService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "forecast-widget".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather forecast widget. Fetches the configured city forecast and renders \
                the current time slot with emphasis followed by the upcoming slots."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WidgetService {
    /// Renders the forecast widget for the configured city
    #[tool(description = "Get the weather forecast widget for the configured city. Optional: format ('text' or 'json'), theme ('emoji' or 'text'), slots (show only the first N forecast slots, e.g. 3).")]
    async fn get_weather_widget(
        &self,
        Parameters(request): Parameters<GetWidgetRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Rendering weather widget from {} (format: {:?}, slots: {:?})",
            self.config.endpoint,
            request.format.unwrap_or_default(),
            request.slots
        );

        let (rendered, failed) = self.render_widget(&request).await;

        if failed {
            Ok(CallToolResult::error(vec![Content::text(rendered)]))
        } else {
            Ok(CallToolResult::success(vec![Content::text(rendered)]))
        }
    }
}
