//! Bulk upload and download between markdown files and a [`RemoteStore`].

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::Value;

use crate::io::{self, IoError};
use crate::models::Document;
use crate::parsing::parse_document;
use crate::remote::{
    MissingParent, PageParent, Paginated, RemoteError, RemoteStore, blocks_to_remote,
    document_from_remote, page_title,
};
use crate::rendering::render_document;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Document has {count} blocks, more than the limit of {limit}")]
    BlockLimit { count: usize, limit: usize },
    #[error("Failed to append chunk {index}/{total}: {source}")]
    Chunk {
        index: usize,
        total: usize,
        #[source]
        source: RemoteError,
    },
    #[error(transparent)]
    MissingParent(#[from] MissingParent),
}

/// Limits and pacing for remote calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub max_blocks_per_request: usize,
    pub max_total_blocks: usize,
    /// Pause between consecutive chunk appends.
    pub rate_limit_delay: Duration,
    /// Pause after each block deletion.
    pub delete_delay: Duration,
    /// Relative paths are resolved against this directory.
    pub workspace_root: PathBuf,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_blocks_per_request: 100,
            max_total_blocks: 1000,
            rate_limit_delay: Duration::from_millis(400),
            delete_delay: Duration::from_millis(100),
            workspace_root: PathBuf::from("."),
        }
    }
}

/// Uploads parsed markdown to a store and renders stored pages back to markdown.
pub struct SyncService<S> {
    store: S,
    options: SyncOptions,
}

impl<S: RemoteStore> SyncService<S> {
    pub fn new(store: S, options: SyncOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Reads a markdown file and creates a page from it. Returns the page id.
    pub fn upload_markdown(&self, path: &Path, parent: &PageParent) -> Result<String, SyncError> {
        let text = io::read_markdown(path, &self.options.workspace_root)?;
        info!("uploading {}", path.display());
        self.upload_text(&text, parent)
    }

    /// Creates a page from markdown text. Returns the page id.
    pub fn upload_text(&self, text: &str, parent: &PageParent) -> Result<String, SyncError> {
        let doc = parse_document(text);
        let blocks = blocks_to_remote(&doc.blocks);
        self.check_limit(blocks.len())?;

        let title = doc.title_or_empty();
        if blocks.len() <= self.options.max_blocks_per_request {
            let page_id = self.store.create_page(parent, title, &blocks)?;
            info!("created page {page_id} with {} blocks", blocks.len());
            return Ok(page_id);
        }

        let page_id = self.store.create_page(parent, title, &[])?;
        info!("created empty page {page_id}, appending {} blocks in chunks", blocks.len());
        self.append_chunked(&page_id, &blocks)?;
        Ok(page_id)
    }

    /// Fetches a page title and all of its child blocks.
    pub fn fetch_document(&self, page_id: &str) -> Result<Document, SyncError> {
        let page = self.store.retrieve_page(page_id)?;
        let children = self.list_all_children(page_id)?;
        debug!("fetched page {page_id} with {} blocks", children.len());
        Ok(document_from_remote(&page, &children))
    }

    /// Downloads a page to a markdown file. Returns the path written.
    pub fn download_page(&self, page_id: &str, output_path: &Path) -> Result<PathBuf, SyncError> {
        let doc = self.fetch_document(page_id)?;
        let path = io::resolve_path(output_path, &self.options.workspace_root);
        io::write_markdown(&path, &render_document(&doc))?;
        info!("downloaded page {page_id} to {}", path.display());
        Ok(path)
    }

    /// Appends markdown to an existing page. Any title heading is discarded.
    /// Returns the number of blocks appended.
    pub fn append_to_page(&self, page_id: &str, markdown: &str) -> Result<usize, SyncError> {
        let doc = parse_document(markdown);
        let blocks = blocks_to_remote(&doc.blocks);
        self.check_limit(blocks.len())?;
        self.append_chunked(page_id, &blocks)?;
        info!("appended {} blocks to page {page_id}", blocks.len());
        Ok(blocks.len())
    }

    /// Replaces all content of a page. Returns the number of blocks written.
    ///
    /// Existing children are deleted one by one; a failed deletion is logged
    /// and skipped.
    pub fn update_page_content(&self, page_id: &str, markdown: &str) -> Result<usize, SyncError> {
        let count = parse_document(markdown).blocks.len();
        self.check_limit(count)?;

        let existing = self.list_all_children(page_id)?;
        info!("replacing {} blocks on page {page_id}", existing.len());
        for block in &existing {
            let Some(id) = block.get("id").and_then(Value::as_str) else {
                continue;
            };
            if let Err(e) = self.store.delete_block(id) {
                warn!("failed to delete block {id}: {e}");
            }
            pause(self.options.delete_delay);
        }

        self.append_to_page(page_id, markdown)
    }

    /// Downloads every page of a database into `output_dir` as
    /// `<title or id>.md`. Returns the paths written.
    pub fn download_database(
        &self,
        database_id: &str,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, SyncError> {
        let pages = collect_pages(|cursor| self.store.query_database(database_id, cursor))?;
        info!("downloading {} pages from database {database_id}", pages.len());

        let mut written = Vec::with_capacity(pages.len());
        for page in &pages {
            let Some(id) = page.get("id").and_then(Value::as_str) else {
                continue;
            };
            let path = output_dir.join(format!("{}.md", file_stem(&page_title(page), id)));
            written.push(self.download_page(id, &path)?);
        }
        Ok(written)
    }

    fn check_limit(&self, count: usize) -> Result<(), SyncError> {
        if count > self.options.max_total_blocks {
            return Err(SyncError::BlockLimit {
                count,
                limit: self.options.max_total_blocks,
            });
        }
        Ok(())
    }

    fn append_chunked(&self, block_id: &str, blocks: &[Value]) -> Result<(), SyncError> {
        if blocks.is_empty() {
            return Ok(());
        }
        let chunks: Vec<&[Value]> = blocks
            .chunks(self.options.max_blocks_per_request.max(1))
            .collect();
        let total = chunks.len();
        for (i, chunk) in chunks.into_iter().enumerate() {
            debug!("appending chunk {}/{total} ({} blocks)", i + 1, chunk.len());
            self.store
                .append_children(block_id, chunk)
                .map_err(|source| SyncError::Chunk {
                    index: i + 1,
                    total,
                    source,
                })?;
            if i + 1 < total {
                pause(self.options.rate_limit_delay);
            }
        }
        Ok(())
    }

    fn list_all_children(&self, block_id: &str) -> Result<Vec<Value>, SyncError> {
        collect_pages(|cursor| self.store.list_children(block_id, cursor))
    }
}

/// Follows `next_cursor` until the listing is exhausted.
fn collect_pages<F>(mut fetch: F) -> Result<Vec<Value>, SyncError>
where
    F: FnMut(Option<&str>) -> Result<Paginated, RemoteError>,
{
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch(cursor.as_deref())?;
        all.extend(page.results);
        match (page.has_more, page.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }
    Ok(all)
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// File name for a downloaded page: its title, or its id when untitled.
fn file_stem(title: &str, id: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return id.to_string();
    }
    title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}
