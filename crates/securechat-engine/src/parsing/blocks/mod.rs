//! # Block Segmentation
//!
//! Two-phase parsing of flat markdown into content blocks.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (blank status, fence detection, list item match)
//!
//! 2. **Segmentation** (`segment`): A `Segmenter` walks the classified lines with a
//!    single cursor and emits one `Segment` per maximal run
//!
//! List runs are then folded into trees by `list_tree`.
//!
//! ## Modules
//!
//! - **`types`**: Core types (`Segment`, `ContentBlock`)
//! - **`kinds`**: Segment-specific line rules (CodeFence, ListItem, Paragraph)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`segment`**: `Segmenter` iterator
//! - **`list_tree`**: `build_list_tree` indentation grouping
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: lines inside are kept verbatim, fences included
//! - A paragraph never crosses a blank line, a fence opener or a list item line
//! - A blank line always ends a list run

pub mod classify;
pub mod kinds;
pub mod list_tree;
pub mod segment;
pub mod types;

pub use classify::{LineClass, MarkdownLineClassifier};
pub use kinds::{CodeFence, ListItem, ListMarker, Paragraph};
pub use list_tree::build_list_tree;
pub use segment::{Segmenter, segment};
pub use types::{ContentBlock, Segment};
