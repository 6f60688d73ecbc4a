//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'` - raw zone that suppresses other parsing
//! - **`Emphasis`**: `STAR = b'*'` - bold / italic delimiter runs
//! - **`Link`**: `[` `]` `(` `)` and the `<...>` destination form
//! - **`Escape`**: `BACKSLASH = b'\\'` - literal punctuation
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in parser or renderer code.

pub mod code_span;
pub mod emphasis;
pub mod escape;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use escape::Escape;
pub use link::Link;
