use async_trait::async_trait;

use super::node::{BlockId, ExternalNode};
use crate::parsing::blocks::ContentBlock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Block not found: {0}")]
    NotFound(BlockId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid outline JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid outline: {0}")]
    Invalid(String),
}

/// Read access to outline blocks. Lookups may suspend and may fail.
#[async_trait]
pub trait BlockStore: Send + Sync {
    async fn get_block(&self, id: &BlockId) -> Result<ExternalNode, StoreError>;
}

/// Where an inserted batch lands relative to its anchor block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Appended after the anchor's existing children.
    #[default]
    Children,
    /// Directly after the anchor, under the anchor's parent.
    Siblings,
}

/// Write access to the outline: inserts parsed blocks as a batch.
///
/// Implementations must preserve the given order and the nested
/// `children` structure exactly.
#[async_trait]
pub trait OutlineSink: Send {
    /// Inserts `blocks` at `anchor` and returns the identifiers of the new
    /// top-level blocks in order.
    async fn insert_batch(
        &mut self,
        anchor: &BlockId,
        blocks: &[ContentBlock],
        placement: Placement,
    ) -> Result<Vec<BlockId>, StoreError>;
}
