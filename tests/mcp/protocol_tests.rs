//! MCP protocol wire-shape tests

#[cfg(test)]
mod tests {
    use serde_json::json;
    use unsplash_mcp::mcp::protocol::*;

    #[test]
    fn test_parse_initialize_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "clientInfo": {
                    "name": "test",
                    "version": "1.0"
                }
            }
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "initialize");
        assert_eq!(req.jsonrpc, "2.0");
        assert!(req.id.is_some());
        assert!(req.params.is_some());
    }

    #[test]
    fn test_parse_tools_call_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {
                "name": "search_images",
                "arguments": {"query": "mountain", "per_page": 5}
            }
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        let params: ToolCallParams = serde_json::from_value(req.params.unwrap()).unwrap();
        assert_eq!(params.name, "search_images");
        assert_eq!(params.arguments["query"], "mountain");
        assert_eq!(params.arguments["per_page"], 5);
    }

    #[test]
    fn test_serialize_initialize_response() {
        let response = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "unsplash-mcp".to_string(),
                version: "0.3.2".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["protocolVersion"], "2024-11-05");
        assert_eq!(json["serverInfo"]["name"], "unsplash-mcp");
        assert_eq!(json["capabilities"]["tools"]["listChanged"], false);
    }

    #[test]
    fn test_error_response_wire_shape() {
        let response = JsonRpcResponse::error(
            Some(json!(3)),
            SESSION_REQUIRED,
            "Bad Request: No valid session ID provided".to_string(),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "error": {
                    "code": -32000,
                    "message": "Bad Request: No valid session ID provided"
                }
            })
        );
    }

    #[test]
    fn test_success_response_wire_shape() {
        let response = JsonRpcResponse::success(Some(json!(1)), json!({"status": "ok"}));

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_tool_result_wire_shape() {
        let result = ToolResult {
            content: vec![ContentBlock::Text {
                text: "{\"total\": 0}".to_string(),
            }],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "content": [{"type": "text", "text": "{\"total\": 0}"}]
            })
        );
    }
}
