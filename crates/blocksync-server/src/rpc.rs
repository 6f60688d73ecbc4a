//! JSON-RPC 2.0 message types, one JSON object per line.

use serde::Serialize;
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// A validated request. `id` is `None` for notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub params: Value,
    pub id: Option<Value>,
}

impl Request {
    /// Checks the envelope of a decoded message. On failure returns the id to
    /// answer with (or `null`) and the error.
    pub fn from_value(value: Value) -> Result<Request, (Value, RpcError)> {
        let Value::Object(mut obj) = value else {
            return Err((
                Value::Null,
                RpcError::new(INVALID_REQUEST, "Invalid Request"),
            ));
        };
        let id = obj.remove("id");
        let reply_id = id.clone().unwrap_or(Value::Null);

        if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err((reply_id, RpcError::new(INVALID_REQUEST, "Invalid Request")));
        }
        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            return Err((
                reply_id,
                RpcError::new(INVALID_REQUEST, "Method not specified"),
            ));
        };
        let method = method.to_string();
        let params = match obj.remove("params") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(p) => p,
        };

        Ok(Request { method, params, id })
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A required string parameter.
pub fn required_str(params: &Value, key: &str) -> Result<String, RpcError> {
    optional_str(params, key)
        .ok_or_else(|| RpcError::invalid_params(format!("Invalid params: {key} is required")))
}

/// An optional string parameter; a non-string value counts as absent.
pub fn optional_str(params: &Value, key: &str) -> Option<String> {
    params.get(key).and_then(Value::as_str).map(str::to_string)
}
