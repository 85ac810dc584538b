//! MCP server implementation

use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::McpError;
use crate::protocol::*;
use crate::tools::{self, parse_params};

/// MCP Server
///
/// Handles Model Context Protocol requests via stdio transport. Tool calls
/// run to completion on an owned Tokio runtime before the next line is read.
pub struct McpServer {
    config: ServerConfig,
    runtime: Runtime,
}

impl McpServer {
    /// Create a new MCP server
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the runtime
    /// cannot be started.
    pub fn new(config: ServerConfig) -> Result<Self, McpError> {
        config.validate()?;
        let runtime = Runtime::new()?;
        Ok(Self { config, runtime })
    }

    /// Active configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the MCP server on stdin/stdout until stdin closes
    pub fn run(&self) -> Result<(), McpError> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        self.serve(stdin.lock(), &mut stdout)
    }

    /// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<(), McpError> {
        info!("MCP server started");

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(&line) {
                self.write_response(writer, &response)?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one JSON-RPC message; notifications yield no response
    pub fn handle_message(&self, line: &str) -> Option<Value> {
        debug!("Received request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                return Some(
                    JsonRpcError::new(None, -32700, format!("Parse error: {}", e)).into_value(),
                );
            }
        };

        if request.jsonrpc != "2.0" {
            let message = format!("Unsupported jsonrpc version: {}", request.jsonrpc);
            let err = McpError::InvalidRequest(message);
            return Some(JsonRpcError::new(request.id, err.error_code(), err.to_string()).into_value());
        }

        if request.is_notification() {
            debug!("Notification {} ignored", request.method);
            return None;
        }

        Some(self.handle_request(request))
    }

    /// Handle a JSON-RPC request
    fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(request.params),
            "ping" => Ok(json!({})),
            _ => {
                return JsonRpcError::new(
                    id,
                    -32601,
                    format!("Method not found: {}", request.method),
                )
                .into_value();
            }
        };

        match result {
            Ok(value) => JsonRpcResponse::new(id, value).into_value(),
            Err(e) => {
                warn!("Request failed: {}", e);
                JsonRpcError::new(id, e.error_code(), e.to_string()).into_value()
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value, McpError> {
        let response = InitializeResponse {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: "signflow-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: Capabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
        };
        Ok(serde_json::to_value(response)?)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let response = ToolListResponse {
            tools: tools::definitions(),
        };
        Ok(serde_json::to_value(response)?)
    }

    /// Handle tools/call request
    fn handle_tool_call(&self, params: Value) -> Result<Value, McpError> {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::InvalidParams("Missing tool name".to_string()))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        info!("Calling tool {}", tool_name);

        let config = &self.config;
        let outcome = match tool_name {
            "create_workflow" => self
                .runtime
                .block_on(tools::handle_create_workflow(config, parse_params(arguments)?))?,
            "update_and_approve" => self
                .runtime
                .block_on(tools::handle_update_and_approve(config, parse_params(arguments)?))?,
            "create_and_approve" => self
                .runtime
                .block_on(tools::handle_create_and_approve(config, parse_params(arguments)?))?,
            "create_workflow_from_text" => self
                .runtime
                .block_on(tools::handle_from_text(config, parse_params(arguments)?))?,
            "create_workflow_from_natural_language" => self.runtime.block_on(
                tools::handle_from_natural_language(config, parse_params(arguments)?),
            )?,
            "preview_workflow" => {
                let preview = tools::handle_preview(config, parse_params(arguments)?)?;
                let result = ToolCallResult::new(serde_json::to_value(preview)?, false);
                return Ok(serde_json::to_value(result)?);
            }
            _ => return Err(McpError::ToolNotFound(tool_name.to_string())),
        };

        let is_error = !outcome.success;
        let result = ToolCallResult::new(serde_json::to_value(outcome)?, is_error);
        Ok(serde_json::to_value(result)?)
    }

    /// Write response to the transport
    fn write_response<W: Write>(&self, writer: &mut W, response: &Value) -> Result<(), McpError> {
        let response_str = serde_json::to_string(response)?;
        writeln!(writer, "{}", response_str)?;
        writer.flush()?;
        debug!("Sent response: {}", response_str);
        Ok(())
    }
}
