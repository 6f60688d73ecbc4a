use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};

use super::store::{PageParent, Paginated, RemoteError, RemoteStore};

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
struct StoredPage {
    title: String,
    parent: Option<PageParent>,
    children: Vec<Value>,
}

#[derive(Debug, Default)]
struct State {
    pages: BTreeMap<String, StoredPage>,
    /// Insertion order of pages, for database queries.
    order: Vec<String>,
    next_id: u64,
    appends: Vec<(String, usize)>,
}

impl State {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:04}", self.next_id)
    }

    fn adopt(&mut self, children: &[Value]) -> Vec<Value> {
        children
            .iter()
            .map(|child| {
                let mut child = child.clone();
                if let Some(obj) = child.as_object_mut() {
                    let id = self.fresh_id("block");
                    obj.insert("id".to_string(), json!(id));
                }
                child
            })
            .collect()
    }
}

/// A deterministic in-process block store.
///
/// Pages are kept in a mutex-guarded map with sequential ids. List calls are
/// paginated with a configurable page size so that cursor handling is
/// exercised exactly as against the real service.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: page_size.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a page with raw remote children and returns its id.
    pub fn insert_page(&self, parent: Option<PageParent>, title: &str, children: &[Value]) -> String {
        let mut state = self.lock();
        let id = state.fresh_id("page");
        let children = state.adopt(children);
        state.pages.insert(
            id.clone(),
            StoredPage {
                title: title.to_string(),
                parent,
                children,
            },
        );
        state.order.push(id.clone());
        id
    }

    /// Child blocks of a page, ids included.
    pub fn children(&self, page_id: &str) -> Vec<Value> {
        self.lock()
            .pages
            .get(page_id)
            .map(|p| p.children.clone())
            .unwrap_or_default()
    }

    pub fn page_count(&self) -> usize {
        self.lock().pages.len()
    }

    /// `(block id, child count)` of every append call, in order.
    pub fn appends(&self) -> Vec<(String, usize)> {
        self.lock().appends.clone()
    }

    fn paginate(&self, items: Vec<Value>, cursor: Option<&str>) -> Result<Paginated, RemoteError> {
        let start = match cursor {
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| RemoteError::Decode(format!("bad cursor {c}")))?,
            None => 0,
        };
        let end = (start + self.page_size).min(items.len());
        let has_more = end < items.len();
        Ok(Paginated {
            results: items.get(start..end).map(<[Value]>::to_vec).unwrap_or_default(),
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }
}

fn page_json(id: &str, page: &StoredPage) -> Value {
    json!({
        "object": "page",
        "id": id,
        "parent": page.parent.as_ref().map(PageParent::to_json),
        "properties": {
            "title": {
                "id": "title",
                "type": "title",
                "title": [{
                    "type": "text",
                    "text": { "content": page.title },
                    "plain_text": page.title
                }]
            }
        }
    })
}

impl RemoteStore for InMemoryStore {
    fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Value],
    ) -> Result<String, RemoteError> {
        if let PageParent::Page(id) = parent
            && !self.lock().pages.contains_key(id)
        {
            return Err(RemoteError::NotFound(id.clone()));
        }
        Ok(self.insert_page(Some(parent.clone()), title, children))
    }

    fn append_children(&self, block_id: &str, children: &[Value]) -> Result<(), RemoteError> {
        let mut state = self.lock();
        if !state.pages.contains_key(block_id) {
            return Err(RemoteError::NotFound(block_id.to_string()));
        }
        let adopted = state.adopt(children);
        state.appends.push((block_id.to_string(), children.len()));
        if let Some(page) = state.pages.get_mut(block_id) {
            page.children.extend(adopted);
        }
        Ok(())
    }

    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError> {
        let children = self
            .lock()
            .pages
            .get(block_id)
            .map(|p| p.children.clone())
            .ok_or_else(|| RemoteError::NotFound(block_id.to_string()))?;
        self.paginate(children, cursor)
    }

    fn delete_block(&self, block_id: &str) -> Result<(), RemoteError> {
        let mut state = self.lock();
        for page in state.pages.values_mut() {
            if let Some(pos) = page
                .children
                .iter()
                .position(|c| c.get("id").and_then(Value::as_str) == Some(block_id))
            {
                page.children.remove(pos);
                return Ok(());
            }
        }
        Err(RemoteError::NotFound(block_id.to_string()))
    }

    fn retrieve_page(&self, page_id: &str) -> Result<Value, RemoteError> {
        self.lock()
            .pages
            .get(page_id)
            .map(|p| page_json(page_id, p))
            .ok_or_else(|| RemoteError::NotFound(page_id.to_string()))
    }

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated, RemoteError> {
        let pages: Vec<Value> = {
            let state = self.lock();
            state
                .order
                .iter()
                .filter_map(|id| state.pages.get(id).map(|p| (id, p)))
                .filter(|(_, p)| p.parent == Some(PageParent::Database(database_id.to_string())))
                .map(|(id, p)| page_json(id, p))
                .collect()
        };
        self.paginate(pages, cursor)
    }
}
