//! [`RemoteStore`] over the Notion REST API.

use std::time::Duration;

use blocksync_config::Config;
use blocksync_engine::remote::{Paginated, title_property};
use blocksync_engine::{PageParent, RemoteError, RemoteStore};
use log::debug;
use serde_json::{Value, json};

const PAGE_SIZE: u32 = 100;

pub struct NotionClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
    api_version: String,
}

impl NotionClient {
    pub fn new(token: &str, config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            api_version: config.api_version.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        debug!("{method} {path}");
        self.agent
            .request(method, &self.url(path))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", &self.api_version)
    }

    fn send(&self, request: ureq::Request, body: Option<Value>) -> Result<Value, RemoteError> {
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        match result {
            Ok(response) => response
                .into_json::<Value>()
                .map_err(|e| RemoteError::Decode(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_json::<Value>().unwrap_or(Value::Null);
                Err(api_error(status, &body))
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(RemoteError::Transport(transport.to_string()))
            }
        }
    }

    fn paginated(&self, value: Value) -> Result<Paginated, RemoteError> {
        serde_json::from_value(value).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/// Maps a non-2xx response to an error, using the API's `{code, message}` body
/// when present.
fn api_error(status: u16, body: &Value) -> RemoteError {
    let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
    RemoteError::Api {
        status,
        code: field("code").unwrap_or_else(|| "unknown".to_string()),
        message: field("message").unwrap_or_else(|| format!("HTTP {status}")),
    }
}

fn id_of(value: &Value) -> Result<String, RemoteError> {
    value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RemoteError::Decode("response has no id".to_string()))
}

impl RemoteStore for NotionClient {
    fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Value],
    ) -> Result<String, RemoteError> {
        let body = json!({
            "parent": parent.to_json(),
            "properties": title_property(title),
            "children": children,
        });
        let page = self.send(self.request("POST", "pages"), Some(body))?;
        id_of(&page)
    }

    fn append_children(&self, block_id: &str, children: &[Value]) -> Result<(), RemoteError> {
        let path = format!("blocks/{block_id}/children");
        self.send(
            self.request("PATCH", &path),
            Some(json!({ "children": children })),
        )?;
        Ok(())
    }

    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError> {
        let path = format!("blocks/{block_id}/children");
        let mut request = self
            .request("GET", &path)
            .query("page_size", &PAGE_SIZE.to_string());
        if let Some(cursor) = cursor {
            request = request.query("start_cursor", cursor);
        }
        let value = self.send(request, None)?;
        self.paginated(value)
    }

    fn delete_block(&self, block_id: &str) -> Result<(), RemoteError> {
        self.send(self.request("DELETE", &format!("blocks/{block_id}")), None)?;
        Ok(())
    }

    fn retrieve_page(&self, page_id: &str) -> Result<Value, RemoteError> {
        self.send(self.request("GET", &format!("pages/{page_id}")), None)
    }

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError> {
        let mut body = json!({ "page_size": PAGE_SIZE });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        let path = format!("databases/{database_id}/query");
        let value = self.send(self.request("POST", &path), Some(body))?;
        self.paginated(value)
    }
}
