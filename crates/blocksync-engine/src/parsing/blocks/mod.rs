//! # Block Parsing
//!
//! Two-phase block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (indentation, fence detection, blank status)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` state machine accumulates
//!    paragraph lines, consumes fence content and emits `BlockNode`s
//!
//! ## Modules
//!
//! - **`types`**: Core types (`BlockNode`, `BlockKind`)
//! - **`kinds`**: Block-specific types with owned delimiters (CodeFence, Heading, ListItem, Paragraph)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Lists are flat: indentation before a marker is ignored
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - All block nodes store byte spans into the rope

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use open::{BlockOpen, try_open_leaf};
pub use types::{BlockKind, BlockNode};
