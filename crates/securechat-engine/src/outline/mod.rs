//! # Outline Model
//!
//! Blocks as exposed by an external outline store, the store seams the
//! engine reads from and writes to, and the walker that flattens a block
//! subtree into an indented listing.

pub mod memory;
pub mod node;
pub mod store;
pub mod walker;

pub use memory::MemoryOutline;
pub use node::{BlockId, ChildRef, ExternalNode, ParentRef};
pub use store::{BlockStore, OutlineSink, Placement, StoreError};
pub use walker::{
    BlockTreeWalker, BlockVisitor, ListingRenderer, MAX_INDENT, OutlineContext, collect_context,
};
