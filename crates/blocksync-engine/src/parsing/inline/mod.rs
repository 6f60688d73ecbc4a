//! # Inline Parsing
//!
//! Cursor-based inline parsing with explicit raw zones.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and operates over the text of
//! inline-eligible blocks (paragraphs, headings, list item text).
//!
//! The parser uses a cursor-based approach with "raw zones":
//! - Code spans suppress all other inline parsing inside them
//! - Emphasis inner text is literal apart from backslash escapes
//! - Link text is parsed again, without links
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum (Text, CodeSpan, Emphasis, Link)
//! - **`kinds`**: Inline-specific types with owned delimiters
//! - **`cursor`**: `Cursor` for byte-by-byte parsing with position tracking
//! - **`parser`**: `parse_inline()` main entry point with `try_parse_*` helpers
//! - **`runs`**: lowering of nodes to `InlineRun`s

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod runs;
pub mod types;

pub use parser::{parse_inline, parse_inline_without_links};
pub use runs::inline_runs;
pub use types::InlineNode;
