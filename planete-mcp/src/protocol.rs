//! JSON-RPC framing and method dispatch

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::info;
use crate::tools::Planete;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "planete";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: INVALID_PARAMS, message: message.into(), data: None }
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }
}

impl McpResponse {
    pub fn success(id: Option<JsonValue>, result: JsonValue) -> Self {
        McpResponse { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    pub fn failure(id: Option<JsonValue>, error: McpError) -> Self {
        McpResponse { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }

    /// Response to a line that is not valid JSON-RPC
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        McpResponse::failure(
            None,
            McpError { code: PARSE_ERROR, message: format!("Parse error: {}", detail), data: None },
        )
    }
}

pub fn handle_request(planete: &Planete, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(planete, &request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => Ok(handle_tools_list()),
        "tools/call" => handle_tool_call(planete, &request.params),

        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse::success(request.id.clone(), r),
        Err(e) => McpResponse::failure(request.id.clone(), e),
    }
}

fn handle_initialize(planete: &Planete, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Astrophysical unit and prefix converter"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": format!(
            "Planete converts values between {} units in {} categories (CGS based, \
             astronomical scales included). Units and prefixes may be given by name or \
             abbreviation. Only convert between units of the same category; use \
             'list_units' to find them.",
            planete.units().len(),
            planete.units().categories().len()
        )
    }))
}

fn handle_tools_list() -> JsonValue {
    let unit_ref = |what: &str| json!({
        "type": "string",
        "description": format!("{} unit, by name (e.g. \"earthMass\") or abbreviation (e.g. \"M⊕\")", what)
    });
    let prefix_ref = json!({
        "type": "string",
        "description": "Prefix applied to the value, by name or abbreviation (default: none)"
    });
    let value = json!({
        "type": "number",
        "description": "Value expressed in the source unit"
    });

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another through the category reference unit. \
                                Without 'to' the first unit of the source's category is used.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": value,
                        "from": unit_ref("Source"),
                        "to": unit_ref("Target"),
                        "prefix": prefix_ref
                    },
                    "required": ["value", "from"]
                }
            },
            {
                "name": "convert_by_si",
                "description": "Ratio of two units through their absolute SI values. Most units carry no SI value.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "from": unit_ref("Source"),
                        "to": unit_ref("Target")
                    },
                    "required": ["from", "to"]
                }
            },
            {
                "name": "list_units",
                "description": "List catalog units in declaration order, optionally for one category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category filter",
                            "enum": planete_units::Category::ALL.iter().map(|c| c.name()).collect::<Vec<_>>()
                        },
                        "sourcesOnly": {
                            "type": "boolean",
                            "description": "Skip dimensionless scalars that are not conversion sources (default: false)"
                        }
                    }
                }
            },
            {
                "name": "list_prefixes",
                "description": "List the decimal prefixes, including the neutral one.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_categories",
                "description": "List the physical categories present in the catalog.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "save_conversion",
                "description": "Convert a value and store the result in the history.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": value,
                        "from": unit_ref("Source"),
                        "to": unit_ref("Target"),
                        "prefix": prefix_ref
                    },
                    "required": ["value", "from", "to"]
                }
            },
            {
                "name": "list_history",
                "description": "List saved conversions, newest first.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "delete_conversion",
                "description": "Delete a saved conversion by id.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "description": "Id returned by save_conversion or list_history"
                        }
                    },
                    "required": ["id"]
                }
            }
        ]
    })
}

fn handle_tool_call(planete: &Planete, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => planete.tool_convert(&args),
        "convert_by_si" => planete.tool_convert_by_si(&args),
        "list_units" => planete.tool_list_units(&args),
        "list_prefixes" => Ok(planete.tool_list_prefixes()),
        "list_categories" => Ok(planete.tool_list_categories()),
        "save_conversion" => planete.tool_save_conversion(&args),
        "list_history" => planete.tool_list_history(),
        "delete_conversion" => planete.tool_delete_conversion(&args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}
