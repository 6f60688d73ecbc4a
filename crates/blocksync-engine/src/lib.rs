pub mod io;
pub mod models;
pub mod parsing;
pub mod remote;
pub mod rendering;
pub mod sync;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::IoError;
pub use models::{Block, Document, InlineRun};
pub use remote::{InMemoryStore, PageParent, RemoteError, RemoteStore};
pub use sync::{SyncError, SyncOptions, SyncService};

/// Parses markdown text into a [`Document`]. Never fails.
pub fn parse(markdown: &str) -> Document {
    parsing::parse_document(markdown)
}

/// Renders a [`Document`] as markdown text. Never fails.
pub fn render(document: &Document) -> String {
    rendering::render_document(document)
}
