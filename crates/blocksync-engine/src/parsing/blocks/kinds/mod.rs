//! Block kinds that own their syntax delimiters.
//!
//! The classifier, builder and renderer never hardcode `#`, `-` or fences;
//! they ask these types.

pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod paragraph;

pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use heading::Heading;
pub use list_item::{ListItem, ListMarker};
pub use paragraph::Paragraph;
