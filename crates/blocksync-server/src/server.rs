//! Line-oriented JSON-RPC server over a reader/writer pair.

use std::io::{self, BufRead, Write};
use std::path::Path;

use blocksync_engine::{IoError, PageParent, RemoteStore, SyncError, SyncService};
use log::{debug, info, warn};
use serde_json::{Value, json};

use crate::rpc::{
    METHOD_NOT_FOUND, PARSE_ERROR, Request, Response, RpcError, optional_str, required_str,
};
use crate::tools::{Tool, initialize_result, tool_definitions};

/// What a tool produced: the direct-method result and a one-line summary for
/// `tools/call`.
struct ToolOutput {
    result: Value,
    summary: String,
}

pub struct McpServer<S> {
    service: SyncService<S>,
}

impl<S: RemoteStore> McpServer<S> {
    pub fn new(service: SyncService<S>) -> Self {
        Self { service }
    }

    /// Serves requests until `input` is exhausted. Request failures are
    /// answered with error objects; only I/O on the channel itself ends the loop.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        info!("server started");
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line) {
                let text = serde_json::to_string(&response).map_err(io::Error::other)?;
                writeln!(output, "{text}")?;
                output.flush()?;
            }
        }
        info!("input closed, shutting down");
        Ok(())
    }

    /// Handles one message. Returns `None` for notifications.
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("unparseable message: {e}");
                return Some(Response::failure(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, "Parse error"),
                ));
            }
        };
        let request = match Request::from_value(value) {
            Ok(r) => r,
            Err((id, error)) => {
                warn!("invalid request: {}", error.message);
                return Some(Response::failure(id, error));
            }
        };

        if request.is_notification() {
            debug!("notification {}", request.method);
            return None;
        }
        let id = request.id.clone()?;
        debug!("request {} id={id}", request.method);

        Some(match self.dispatch(&request.method, &request.params) {
            Ok(result) => Response::success(id, result),
            Err(error) => {
                warn!("{} failed: {}", request.method, error.message);
                Response::failure(id, error)
            }
        })
    }

    fn dispatch(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => {
                let client = params.get("clientInfo");
                info!(
                    "client connected: {} {}",
                    client
                        .and_then(|c| c.get("name"))
                        .and_then(Value::as_str)
                        .unwrap_or("unknown"),
                    client
                        .and_then(|c| c.get("version"))
                        .and_then(Value::as_str)
                        .unwrap_or("unknown"),
                );
                Ok(initialize_result())
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.call_tool(params),
            other => match Tool::from_name(other) {
                Some(tool) => self.invoke(tool, params).map(|out| out.result),
                None => Err(RpcError::new(
                    METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                )),
            },
        }
    }

    /// `tools/call`: tool failures are reported in the result with `isError`.
    fn call_tool(&self, params: &Value) -> Result<Value, RpcError> {
        let name = required_str(params, "name")?;
        let Some(arguments) = params.get("arguments") else {
            return Err(RpcError::invalid_params(
                "Invalid params: arguments is required",
            ));
        };

        let outcome = match Tool::from_name(&name) {
            Some(tool) => self.invoke(tool, arguments),
            None => Err(RpcError::invalid_params(format!("Unknown tool: {name}"))),
        };
        Ok(match outcome {
            Ok(out) => json!({ "content": [{ "type": "text", "text": out.summary }] }),
            Err(error) => json!({
                "content": [{ "type": "text", "text": error.message }],
                "isError": true,
            }),
        })
    }

    fn invoke(&self, tool: Tool, args: &Value) -> Result<ToolOutput, RpcError> {
        match tool {
            Tool::UploadMarkdown => {
                let filepath = required_str(args, "filepath")?;
                let parent = PageParent::from_ids(
                    optional_str(args, "database_id"),
                    optional_str(args, "page_id"),
                )
                .map_err(|e| RpcError::invalid_params(e.to_string()))?;
                let page_id = self
                    .service
                    .upload_markdown(Path::new(&filepath), &parent)
                    .map_err(|e| match e {
                        SyncError::Io(IoError::NotFound(_)) => {
                            RpcError::invalid_params(format!("File not found: {filepath}"))
                        }
                        other => RpcError::internal(format!("Failed to upload markdown: {other}")),
                    })?;
                Ok(ToolOutput {
                    summary: format!("Uploaded {filepath} as page {page_id}"),
                    result: json!({ "page_id": page_id }),
                })
            }
            Tool::DownloadMarkdown => {
                let page_id = required_str(args, "page_id")?;
                let output_path = required_str(args, "output_path")?;
                let written = self
                    .service
                    .download_page(&page_id, Path::new(&output_path))
                    .map_err(|e| RpcError::internal(format!("Failed to download markdown: {e}")))?;
                Ok(ToolOutput {
                    summary: format!("Downloaded page {page_id} to {}", written.display()),
                    result: json!({ "output_path": output_path }),
                })
            }
            Tool::AppendToPage => {
                let page_id = required_str(args, "page_id")?;
                let content = required_str(args, "content")?;
                let count = self
                    .service
                    .append_to_page(&page_id, &content)
                    .map_err(|e| RpcError::internal(format!("Failed to append to page: {e}")))?;
                Ok(ToolOutput {
                    summary: format!("Appended {count} blocks to page {page_id}"),
                    result: json!({
                        "success": true,
                        "message": "Content appended successfully",
                        "blocks": count,
                    }),
                })
            }
            Tool::UpdatePageContent => {
                let page_id = required_str(args, "page_id")?;
                let content = required_str(args, "content")?;
                let count = self
                    .service
                    .update_page_content(&page_id, &content)
                    .map_err(|e| {
                        RpcError::internal(format!("Failed to update page content: {e}"))
                    })?;
                Ok(ToolOutput {
                    summary: format!("Replaced the content of page {page_id} with {count} blocks"),
                    result: json!({
                        "success": true,
                        "message": "Page content updated successfully",
                        "blocks": count,
                    }),
                })
            }
        }
    }
}
