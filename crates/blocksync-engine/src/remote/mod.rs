//! Remote side of synchronization: the block JSON adapter and the store seam.

pub mod blocks;
pub mod memory;
pub mod rich_text;
pub mod store;

pub use blocks::{
    block_from_remote, block_to_remote, blocks_from_remote, blocks_to_remote,
    document_from_remote, page_title, title_property,
};
pub use memory::InMemoryStore;
pub use rich_text::{Annotations, RichText, runs_to_rich_text, rich_text_to_runs};
pub use store::{MissingParent, PageParent, Paginated, RemoteError, RemoteStore};
