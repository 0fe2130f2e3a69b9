//! Image search tool handler

use super::handler::{text_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::{SearchRequest, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct SearchImagesHandler {
    services: Arc<Services>,
}

impl SearchImagesHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for SearchImagesHandler {
    fn name(&self) -> &str {
        "search_images"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_images".to_string(),
            description: "Search for images using the Unsplash API. \
                         Returns matching photos with reduced URL sets (small, regular, full), \
                         photographer attribution, and a link to the photo page. \
                         Results are returned as formatted JSON."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query for images",
                        "minLength": 1
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number for pagination (default: 1)",
                        "default": DEFAULT_PAGE,
                        "minimum": 1
                    },
                    "per_page": {
                        "type": "integer",
                        "description": "Number of results per page (default: 10, max: 30)",
                        "default": DEFAULT_PER_PAGE,
                        "minimum": 1,
                        "maximum": MAX_PER_PAGE
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct SearchImagesArgs {
            query: String,
            #[serde(default)]
            page: Option<u32>,
            #[serde(default)]
            per_page: Option<u32>,
        }

        // Parse and validate arguments
        let args: SearchImagesArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let request = SearchRequest {
            query: args.query,
            page: args.page,
            per_page: args.per_page,
        };

        // Validation failures stop here; no outbound call is made
        request.validate().map_err(McpError::from)?;

        // Execute search via the upstream client
        let response = self
            .services
            .unsplash
            .search_photos(request)
            .await
            .map_err(McpError::from)?;

        // Format the response as pretty-printed JSON
        let text = serde_json::to_string_pretty(&response)?;

        Ok(text_content(text))
    }
}
