//! The "ask" flow: turn the block being edited and its surroundings into a
//! prompt, send it to the completion service and insert the answer as
//! nested blocks under the block being edited.

use log::{debug, info, warn};

use crate::completion::{CompletionError, CompletionService};
use crate::outline::{
    BlockId, BlockStore, ExternalNode, OutlineContext, OutlineSink, Placement, StoreError,
    collect_context,
};
use crate::parsing::{blocks::ContentBlock, parse_markdown};
use crate::prompt::{build_prompt, notification_message};

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// A prompt built from the outline around one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPrompt {
    pub current: BlockId,
    pub container: BlockId,
    pub context: OutlineContext,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub prepared: PreparedPrompt,
    pub response: String,
    pub blocks: Vec<ContentBlock>,
    /// Ids of the inserted top-level blocks, in order.
    pub inserted: Vec<BlockId>,
}

/// The block whose subtree gives the current block its context: the parent
/// if there is one that resolves, otherwise the current block itself.
pub async fn resolve_container<S>(
    store: &S,
    current: &ExternalNode,
) -> Result<ExternalNode, StoreError>
where
    S: BlockStore + ?Sized,
{
    let Some(parent) = &current.parent else {
        return Ok(current.clone());
    };
    match store.get_block(&parent.id).await {
        Ok(container) => Ok(container),
        Err(StoreError::NotFound(id)) => {
            warn!("parent {id} of {} not found, using the block itself", current.id);
            Ok(current.clone())
        }
        Err(e) => Err(e),
    }
}

/// Builds the prompt for `current_id` without contacting the completion service.
pub async fn prepare<S>(store: &S, current_id: &BlockId) -> Result<PreparedPrompt, StoreError>
where
    S: BlockStore + ?Sized,
{
    let current = store.get_block(current_id).await?;
    let container = resolve_container(store, &current).await?;
    let context = collect_context(store, &container, &current.id).await?;
    debug!("block content: {:?}", context.block_content);
    debug!("container content: {:?}", context.container_content);

    Ok(PreparedPrompt {
        current: current.id,
        container: container.id,
        prompt: build_prompt(&context),
        context,
    })
}

/// Runs the full flow for `current_id` and inserts the answer as its children.
pub async fn ask<S, C>(
    store: &mut S,
    completion: &C,
    current_id: &BlockId,
) -> Result<AskOutcome, AskError>
where
    S: BlockStore + OutlineSink,
    C: CompletionService + ?Sized,
{
    let prepared = prepare(&*store, current_id).await?;
    info!("{}", notification_message(&prepared.context.block_content));

    let response = completion.complete(&prepared.prompt).await?;
    let blocks = parse_markdown(&response);

    let inserted = if blocks.is_empty() {
        info!("response contained no blocks, nothing inserted");
        Vec::new()
    } else {
        debug!(
            "inserting {} blocks under {}",
            blocks.iter().map(ContentBlock::count).sum::<usize>(),
            prepared.current
        );
        store
            .insert_batch(&prepared.current, &blocks, Placement::Children)
            .await?
    };

    Ok(AskOutcome {
        prepared,
        response,
        blocks,
        inserted,
    })
}
