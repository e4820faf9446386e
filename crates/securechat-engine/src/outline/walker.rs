use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};

use super::node::{BlockId, ChildRef, ExternalNode};
use super::store::{BlockStore, StoreError};

/// Widest indentation the listing renderer will emit, in spaces.
pub const MAX_INDENT: usize = 16;

/// Receives every rendered node of a walk in pre-order.
pub trait BlockVisitor {
    fn visit(&mut self, node: &ExternalNode, level: usize);
}

impl<F> BlockVisitor for F
where
    F: FnMut(&ExternalNode, usize),
{
    fn visit(&mut self, node: &ExternalNode, level: usize) {
        self(node, level)
    }
}

/// Pre-order, depth-first traversal over a block subtree.
///
/// Children are fetched from the store one at a time, and child `k + 1` is
/// only requested after the whole subtree of child `k` has been visited.
/// The focus block is never handed to the visitor and its children are
/// never fetched.
pub struct BlockTreeWalker<'s, S: BlockStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: BlockStore + ?Sized> BlockTreeWalker<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Walks `root` from level 0 and returns the focus block's content if the
    /// focus block was reached. A failed lookup aborts the walk.
    pub async fn walk<V>(
        &self,
        root: &ExternalNode,
        focus: &BlockId,
        visitor: &mut V,
    ) -> Result<Option<String>, StoreError>
    where
        V: BlockVisitor + Send,
    {
        let mut focus_content = None;
        self.walk_node(root, 0, focus, visitor, &mut focus_content)
            .await?;
        Ok(focus_content)
    }

    fn walk_node<'a, V>(
        &'a self,
        node: &'a ExternalNode,
        level: usize,
        focus: &'a BlockId,
        visitor: &'a mut V,
        focus_content: &'a mut Option<String>,
    ) -> BoxFuture<'a, Result<(), StoreError>>
    where
        V: BlockVisitor + Send,
    {
        async move {
            if &node.id == focus {
                *focus_content = Some(node.content.clone());
                return Ok(());
            }

            visitor.visit(node, level);

            for child_ref in &node.children {
                let id = match child_ref {
                    ChildRef::Uuid(id) => id,
                    ChildRef::Unrecognized(raw) => {
                        warn!("skipping malformed child reference {raw} under {}", node.id);
                        continue;
                    }
                };
                debug!("fetching child {id} at level {}", level + 1);
                let child = self.store.get_block(id).await?;
                self.walk_node(&child, level + 1, focus, &mut *visitor, &mut *focus_content)
                    .await?;
            }
            Ok(())
        }
        .boxed()
    }
}

/// Renders visited blocks as `"<pad>* <content>"` lines, where the pad is one
/// space per level up to [`MAX_INDENT`].
#[derive(Debug, Default)]
pub struct ListingRenderer {
    lines: Vec<String>,
}

impl ListingRenderer {
    pub fn render_line(node: &ExternalNode, level: usize) -> String {
        let pad = " ".repeat(level.min(MAX_INDENT));
        format!("{pad}* {}", node.content)
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

impl BlockVisitor for ListingRenderer {
    fn visit(&mut self, node: &ExternalNode, level: usize) {
        self.lines.push(Self::render_line(node, level));
    }
}

/// The two halves of a prompt taken from an outline subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineContext {
    /// Indented listing of every rendered block.
    pub container_content: String,
    /// The focus block's own content; empty if it was not reached.
    pub block_content: String,
}

/// Walks `root` with the default listing renderer, isolating `focus`.
pub async fn collect_context<S>(
    store: &S,
    root: &ExternalNode,
    focus: &BlockId,
) -> Result<OutlineContext, StoreError>
where
    S: BlockStore + ?Sized,
{
    let mut renderer = ListingRenderer::default();
    let focus_content = BlockTreeWalker::new(store)
        .walk(root, focus, &mut renderer)
        .await?;
    Ok(OutlineContext {
        container_content: renderer.finish(),
        block_content: focus_content.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::MemoryOutline;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    /// Store wrapper that records every lookup.
    struct RecordingStore {
        inner: MemoryOutline,
        fetched: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn new(inner: MemoryOutline) -> Self {
            Self {
                inner,
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BlockStore for RecordingStore {
        async fn get_block(&self, id: &BlockId) -> Result<ExternalNode, StoreError> {
            self.fetched.lock().unwrap().push(id.to_string());
            tokio::task::yield_now().await;
            self.inner.get_block(id).await
        }
    }

    fn tree() -> MemoryOutline {
        MemoryOutline::from_nodes([
            ExternalNode::new("root", "Root").with_child("a").with_child("d"),
            ExternalNode::new("a", "A").with_parent("root").with_child("b").with_child("c"),
            ExternalNode::new("b", "B").with_parent("a"),
            ExternalNode::new("c", "C").with_parent("a"),
            ExternalNode::new("d", "D").with_parent("root"),
        ])
        .unwrap()
    }

    async fn context_for(store: &MemoryOutline, focus: &str) -> OutlineContext {
        let root = store.get(&BlockId::new("root")).unwrap().clone();
        collect_context(store, &root, &BlockId::new(focus)).await.unwrap()
    }

    #[tokio::test]
    async fn renders_pre_order_with_indentation() {
        let ctx = context_for(&tree(), "missing").await;
        assert_eq!(ctx.container_content, "* Root\n * A\n  * B\n  * C\n * D");
        assert_eq!(ctx.block_content, "");
    }

    #[tokio::test]
    async fn focus_block_and_its_subtree_are_excluded() {
        let store = RecordingStore::new(tree());
        let root = store.inner.get(&BlockId::new("root")).unwrap().clone();

        let ctx = collect_context(&store, &root, &BlockId::new("a")).await.unwrap();

        assert_eq!(ctx.container_content, "* Root\n * D");
        assert_eq!(ctx.block_content, "A");
        assert_eq!(store.fetched(), vec!["a", "d"]);
    }

    #[tokio::test]
    async fn focus_on_root_renders_nothing() {
        let ctx = context_for(&tree(), "root").await;
        assert_eq!(ctx.container_content, "");
        assert_eq!(ctx.block_content, "Root");
    }

    #[tokio::test]
    async fn lookups_happen_in_document_order() {
        let store = RecordingStore::new(tree());
        let root = store.inner.get(&BlockId::new("root")).unwrap().clone();

        collect_context(&store, &root, &BlockId::new("none"))
            .await
            .unwrap();

        assert_eq!(store.fetched(), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn malformed_child_refs_are_never_fetched() {
        let mut root = ExternalNode::new("root", "Root").with_child("a");
        root.children.push(ChildRef::from_value(json!(["not-uuid", "x"])));
        let store = RecordingStore::new(
            MemoryOutline::from_nodes([
                root.clone(),
                ExternalNode::new("a", "A").with_parent("root"),
                ExternalNode::new("x", "X").with_parent("root"),
            ])
            .unwrap(),
        );

        let ctx = collect_context(&store, &root, &BlockId::new("none"))
            .await
            .unwrap();

        assert_eq!(ctx.container_content, "* Root\n * A");
        assert_eq!(store.fetched(), vec!["a"]);
    }

    #[tokio::test]
    async fn failed_lookup_aborts_the_walk() {
        let root = ExternalNode::new("root", "Root").with_child("gone");
        let store = MemoryOutline::from_nodes([root.clone()]).unwrap();

        let err = collect_context(&store, &root, &BlockId::new("none"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(id) if id.as_str() == "gone"));
    }

    #[tokio::test]
    async fn indentation_is_capped() {
        let mut nodes = Vec::new();
        for depth in 0..20 {
            let mut node = ExternalNode::new(format!("n{depth}").as_str(), format!("L{depth}"));
            if depth > 0 {
                node = node.with_parent(format!("n{}", depth - 1).as_str());
            }
            if depth < 19 {
                node = node.with_child(format!("n{}", depth + 1).as_str());
            }
            nodes.push(node);
        }
        let store = MemoryOutline::from_nodes(nodes).unwrap();
        let root = store.get(&BlockId::new("n0")).unwrap().clone();

        let ctx = collect_context(&store, &root, &BlockId::new("none"))
            .await
            .unwrap();
        let last = ctx.container_content.lines().last().unwrap();

        assert_eq!(last, format!("{}* L19", " ".repeat(MAX_INDENT)));
    }

    #[tokio::test]
    async fn closure_visitor_sees_levels() {
        let store = tree();
        let root = store.get(&BlockId::new("root")).unwrap().clone();
        let mut seen = Vec::new();

        BlockTreeWalker::new(&store)
            .walk(&root, &BlockId::new("c"), &mut |node: &ExternalNode, level: usize| {
                seen.push((node.id.to_string(), level))
            })
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![
                ("root".to_string(), 0),
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("d".to_string(), 1),
            ]
        );
    }
}
