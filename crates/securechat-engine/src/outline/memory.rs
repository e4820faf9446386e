use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use log::{debug, info};

use super::node::{BlockId, ChildRef, ExternalNode, ParentRef};
use super::store::{BlockStore, OutlineSink, Placement, StoreError};
use crate::parsing::blocks::ContentBlock;

/// An outline held in memory, persisted as a flat JSON array of blocks.
///
/// Top-level blocks are those without a parent; their order is the order
/// in which they appear in the array.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutline {
    nodes: HashMap<BlockId, ExternalNode>,
    order: Vec<BlockId>,
}

impl MemoryOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an outline from its blocks.
    ///
    /// Every loaded child must name its referencing block as parent, and
    /// no parent chain may loop back on itself, so the child graph is a
    /// forest. Children and parents missing from the file are allowed and
    /// surface as lookup failures later.
    pub fn from_nodes(nodes: impl IntoIterator<Item = ExternalNode>) -> Result<Self, StoreError> {
        let mut outline = Self::new();
        for node in nodes {
            if outline.nodes.contains_key(&node.id) {
                return Err(StoreError::Invalid(format!(
                    "duplicate block id {}",
                    node.id
                )));
            }
            outline.order.push(node.id.clone());
            outline.nodes.insert(node.id.clone(), node);
        }
        outline.check_links()?;
        Ok(outline)
    }

    fn check_links(&self) -> Result<(), StoreError> {
        for node in self.nodes.values() {
            for child_id in node.child_ids() {
                let Some(child) = self.nodes.get(child_id) else {
                    continue;
                };
                if child.parent.as_ref().map(|p| &p.id) != Some(&node.id) {
                    return Err(StoreError::Invalid(format!(
                        "block {child_id} is listed under {} but its parent is {}",
                        node.id,
                        child
                            .parent
                            .as_ref()
                            .map_or_else(|| "none".to_string(), |p| p.id.to_string())
                    )));
                }
            }
        }

        for node in self.nodes.values() {
            let mut steps = 0;
            let mut cursor = node.parent.as_ref().and_then(|p| self.nodes.get(&p.id));
            while let Some(ancestor) = cursor {
                if ancestor.id == node.id || steps > self.nodes.len() {
                    return Err(StoreError::Invalid(format!(
                        "block {} is its own ancestor",
                        node.id
                    )));
                }
                steps += 1;
                cursor = ancestor.parent.as_ref().and_then(|p| self.nodes.get(&p.id));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let nodes: Vec<ExternalNode> = serde_json::from_str(json)?;
        Self::from_nodes(nodes)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        let nodes: Vec<&ExternalNode> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&nodes)?)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let outline = Self::from_json(&json)?;
        debug!("loaded {} blocks from {}", outline.len(), path.display());
        Ok(outline)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn get(&self, id: &BlockId) -> Option<&ExternalNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All blocks in persisted order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Creates a block (and its subtree) under `parent`, recording every new
    /// id in `created` in pre-order.
    fn create_subtree(
        &mut self,
        parent: Option<&BlockId>,
        block: &ContentBlock,
        created: &mut Vec<BlockId>,
    ) -> BlockId {
        let id = BlockId::generate();
        created.push(id.clone());

        let mut node = ExternalNode::new(id.clone(), block.content.clone());
        node.parent = parent.map(|p| ParentRef { id: p.clone() });
        self.nodes.insert(id.clone(), node);

        let child_ids: Vec<ChildRef> = block
            .children()
            .iter()
            .map(|child| ChildRef::Uuid(self.create_subtree(Some(&id), child, created)))
            .collect();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = child_ids;
        }
        id
    }
}

#[async_trait]
impl BlockStore for MemoryOutline {
    async fn get_block(&self, id: &BlockId) -> Result<ExternalNode, StoreError> {
        self.nodes
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

#[async_trait]
impl OutlineSink for MemoryOutline {
    async fn insert_batch(
        &mut self,
        anchor: &BlockId,
        blocks: &[ContentBlock],
        placement: Placement,
    ) -> Result<Vec<BlockId>, StoreError> {
        let anchor_node = self
            .nodes
            .get(anchor)
            .ok_or_else(|| StoreError::NotFound(anchor.clone()))?;

        let parent = match placement {
            Placement::Children => Some(anchor.clone()),
            Placement::Siblings => anchor_node.parent.as_ref().map(|p| p.id.clone()),
        };
        if let Some(parent) = &parent
            && !self.nodes.contains_key(parent)
        {
            return Err(StoreError::NotFound(parent.clone()));
        }

        let mut created = Vec::new();
        let top: Vec<BlockId> = blocks
            .iter()
            .map(|block| self.create_subtree(parent.as_ref(), block, &mut created))
            .collect();
        let refs = top.iter().cloned().map(ChildRef::Uuid);
        let created_count = created.len();

        match (placement, &parent) {
            (Placement::Children, _) => {
                if let Some(node) = self.nodes.get_mut(anchor) {
                    node.children.extend(refs);
                }
                self.order.extend(created);
            }
            (Placement::Siblings, Some(parent)) => {
                if let Some(node) = self.nodes.get_mut(parent) {
                    let at = node
                        .children
                        .iter()
                        .position(|r| r.target() == Some(anchor))
                        .map_or(node.children.len(), |pos| pos + 1);
                    node.children.splice(at..at, refs);
                }
                self.order.extend(created);
            }
            (Placement::Siblings, None) => {
                let at = self
                    .order
                    .iter()
                    .position(|id| id == anchor)
                    .map_or(self.order.len(), |pos| pos + 1);
                self.order.splice(at..at, created);
            }
        }

        info!(
            "inserted {created_count} blocks ({} top-level) at {anchor}",
            top.len()
        );
        Ok(top)
    }
}
