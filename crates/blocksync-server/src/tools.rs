use serde_json::{Value, json};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "blocksync";

pub const INSTRUCTIONS: &str = "Notes for using blocksync:\n\
1. Pass absolute paths for filepath; relative paths resolve against the server's workspace root.\n\
2. page_id and database_id take the bare id, not a page URL.\n\
3. To get an id from a page URL, use the last path segment (the zzz in https://www.notion.so/xxx/yyy-zzz).";

/// Tools exposed through `tools/list` and `tools/call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    UploadMarkdown,
    DownloadMarkdown,
    AppendToPage,
    UpdatePageContent,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::UploadMarkdown,
        Tool::DownloadMarkdown,
        Tool::AppendToPage,
        Tool::UpdatePageContent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::UploadMarkdown => "uploadMarkdown",
            Tool::DownloadMarkdown => "downloadMarkdown",
            Tool::AppendToPage => "appendToPage",
            Tool::UpdatePageContent => "updatePageContent",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn definition(self) -> Value {
        let (description, properties, required) = match self {
            Tool::UploadMarkdown => (
                "Upload a markdown file and create a page from it. Documents over 100 blocks are sent in chunks.",
                json!({
                    "filepath": {
                        "type": "string",
                        "description": "Path of the markdown file to upload. Use an absolute path."
                    },
                    "database_id": {
                        "type": "string",
                        "description": "Database to create the page in. An id, not a URL."
                    },
                    "page_id": {
                        "type": "string",
                        "description": "Parent page, used when database_id is not given. An id, not a URL."
                    }
                }),
                json!(["filepath"]),
            ),
            Tool::DownloadMarkdown => (
                "Download a page and save it as a markdown file.",
                json!({
                    "page_id": {
                        "type": "string",
                        "description": "Page to download. An id, not a URL."
                    },
                    "output_path": {
                        "type": "string",
                        "description": "File to write. Use an absolute path."
                    }
                }),
                json!(["page_id", "output_path"]),
            ),
            Tool::AppendToPage => (
                "Append markdown content to an existing page. Long content is sent in chunks.",
                json!({
                    "page_id": {
                        "type": "string",
                        "description": "Page to append to. An id, not a URL."
                    },
                    "content": {
                        "type": "string",
                        "description": "Markdown to append."
                    }
                }),
                json!(["page_id", "content"]),
            ),
            Tool::UpdatePageContent => (
                "Replace the whole content of an existing page with markdown. Long content is sent in chunks.",
                json!({
                    "page_id": {
                        "type": "string",
                        "description": "Page to update. An id, not a URL."
                    },
                    "content": {
                        "type": "string",
                        "description": "New markdown content."
                    }
                }),
                json!(["page_id", "content"]),
            ),
        };
        json!({
            "name": self.name(),
            "description": description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

pub fn tool_definitions() -> Vec<Value> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

/// Result of the `initialize` handshake.
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "listChanged": false },
        },
        "instructions": INSTRUCTIONS,
    })
}
