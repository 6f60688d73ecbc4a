use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Remote API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Could not decode remote response: {0}")]
    Decode(String),
    #[error("Remote object not found: {0}")]
    NotFound(String),
}

/// Neither a database id nor a page id was given for a new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Either a database id or a page id is required")]
pub struct MissingParent;

/// Where a new page is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageParent {
    Database(String),
    Page(String),
}

impl PageParent {
    /// Picks the parent from optional ids; the database wins when both are set.
    pub fn from_ids(
        database_id: Option<String>,
        page_id: Option<String>,
    ) -> Result<PageParent, MissingParent> {
        let non_empty = |id: Option<String>| id.filter(|s| !s.trim().is_empty());
        match (non_empty(database_id), non_empty(page_id)) {
            (Some(db), _) => Ok(PageParent::Database(db)),
            (None, Some(page)) => Ok(PageParent::Page(page)),
            (None, None) => Err(MissingParent),
        }
    }

    /// The remote `parent` object.
    pub fn to_json(&self) -> Value {
        match self {
            PageParent::Database(id) => json!({ "database_id": id }),
            PageParent::Page(id) => json!({ "page_id": id }),
        }
    }
}

/// One page of a paginated list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paginated {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Authenticated create/read/delete calls against a hierarchical block store.
///
/// Block and page payloads are the store's native JSON; the `blocks` adapter
/// converts them to and from the document model.
pub trait RemoteStore: Send + Sync {
    /// Creates a page with an initial batch of child blocks and returns its id.
    fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Value],
    ) -> Result<String, RemoteError>;

    fn append_children(&self, block_id: &str, children: &[Value]) -> Result<(), RemoteError>;

    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError>;

    fn delete_block(&self, block_id: &str) -> Result<(), RemoteError>;

    fn retrieve_page(&self, page_id: &str) -> Result<Value, RemoteError>;

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError>;
}

impl<S: RemoteStore + ?Sized> RemoteStore for &S {
    fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Value],
    ) -> Result<String, RemoteError> {
        (**self).create_page(parent, title, children)
    }

    fn append_children(&self, block_id: &str, children: &[Value]) -> Result<(), RemoteError> {
        (**self).append_children(block_id, children)
    }

    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError> {
        (**self).list_children(block_id, cursor)
    }

    fn delete_block(&self, block_id: &str) -> Result<(), RemoteError> {
        (**self).delete_block(block_id)
    }

    fn retrieve_page(&self, page_id: &str) -> Result<Value, RemoteError> {
        (**self).retrieve_page(page_id)
    }

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError> {
        (**self).query_database(database_id, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_wins_over_page() {
        let parent = PageParent::from_ids(Some("db".into()), Some("pg".into())).unwrap();
        assert_eq!(parent, PageParent::Database("db".into()));
        assert_eq!(parent.to_json(), json!({ "database_id": "db" }));
    }

    #[test]
    fn page_parent_when_no_database() {
        let parent = PageParent::from_ids(Some(" ".into()), Some("pg".into())).unwrap();
        assert_eq!(parent, PageParent::Page("pg".into()));
    }

    #[test]
    fn missing_parent_is_an_error() {
        assert_eq!(PageParent::from_ids(None, None), Err(MissingParent));
        assert_eq!(
            PageParent::from_ids(Some("".into()), Some("  ".into())),
            Err(MissingParent)
        );
    }

    #[test]
    fn paginated_decodes_list_response() {
        let value = json!({
            "object": "list",
            "results": [{ "id": "b1" }],
            "has_more": true,
            "next_cursor": "b2"
        });
        let page: Paginated = serde_json::from_value(value).unwrap();
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("b2"));
        assert_eq!(page.results.len(), 1);
    }
}
