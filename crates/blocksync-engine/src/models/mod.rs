pub mod document;

pub use document::{
    Block, Document, InlineRun, MAX_HEADING_LEVEL, clamp_heading_level, normalize_runs,
    plain_text,
};
